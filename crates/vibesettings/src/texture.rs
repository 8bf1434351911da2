//! Tile image loading and fragment slicing.
//!
//! Each tile keeps its image as a pixbuf scaled to the exact tile size at
//! load time. The shatter effect slices fragment textures out of that same
//! pixbuf, so shards line up pixel-for-pixel with the intact tile.

use std::path::Path;

use gtk4::gdk;
use gtk4::gdk_pixbuf::Pixbuf;

use vibesettings_core::error::{Error, Result};
use vibesettings_core::geometry::IntRect;

/// A tile's image, held at the tile's exact pixel size.
pub struct TileImage {
    pixbuf: Pixbuf,
}

impl TileImage {
    /// Load an image file stretched to exactly `width` x `height`.
    ///
    /// Aspect ratio is not preserved: the crop math assumes the pixbuf
    /// dimensions equal the tile dimensions.
    pub fn load(path: &Path, width: i32, height: i32) -> Result<Self> {
        let pixbuf = Pixbuf::from_file_at_scale(path, width, height, false).map_err(|e| {
            Error::Image {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { pixbuf })
    }

    pub fn width(&self) -> i32 {
        self.pixbuf.width()
    }

    pub fn height(&self) -> i32 {
        self.pixbuf.height()
    }

    /// Texture for the whole tile.
    pub fn texture(&self) -> gdk::Texture {
        gdk::Texture::for_pixbuf(&self.pixbuf)
    }

    /// Texture for one fragment crop, or `None` when the crop falls outside
    /// the pixbuf. The spawn math clamps crops into bounds, so `None` only
    /// happens if the image failed to load at the expected size.
    pub fn fragment_texture(&self, crop: IntRect) -> Option<gdk::Texture> {
        if crop.is_empty()
            || crop.x < 0
            || crop.y < 0
            || crop.x + crop.width > self.pixbuf.width()
            || crop.y + crop.height > self.pixbuf.height()
        {
            return None;
        }

        let sub = self
            .pixbuf
            .new_subpixbuf(crop.x, crop.y, crop.width, crop.height);
        Some(gdk::Texture::for_pixbuf(&sub))
    }
}
