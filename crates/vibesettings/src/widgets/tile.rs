//! The clickable tile widget on the menu canvas.
//!
//! A tile is an image with a title label overlaid in its bottom-left
//! corner. The widget itself is dumb: hover and click behavior is wired
//! up by the grid, which owns the animation drivers.

use gtk4::prelude::*;
use gtk4::{Align, ContentFit, EventControllerMotion, GestureClick, Label, Overlay, Picture};
use std::rc::Rc;
use tracing::warn;

use vibesettings_core::geometry::Rect;
use vibesettings_core::tileset::{self, TileSpec};

use crate::styles::tile;
use crate::texture::TileImage;

/// One tile on the settings mosaic.
pub struct SettingsTile {
    root: Overlay,
    spec: TileSpec,
    image: Option<TileImage>,
}

impl SettingsTile {
    pub fn new(spec: TileSpec) -> Rc<Self> {
        let root = Overlay::new();
        root.add_css_class(tile::TILE);
        if spec.section == "power" {
            root.add_css_class(tile::POWER);
        }
        root.set_size_request(spec.width, spec.height);
        root.set_cursor_from_name(Some("pointer"));

        // Missing or unreadable images degrade to a plain tile with a label;
        // the grid stays usable either way.
        let image = match tileset::resolve_asset(&spec.image) {
            Some(path) => match TileImage::load(&path, spec.width, spec.height) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Tile '{}': {}", spec.section, e);
                    None
                }
            },
            None => {
                warn!(
                    "Tile '{}': image '{}' not found in data directories",
                    spec.section, spec.image
                );
                None
            }
        };

        if let Some(ref image) = image {
            let picture = Picture::for_paintable(&image.texture());
            picture.add_css_class(tile::IMAGE);
            picture.set_content_fit(ContentFit::Fill);
            root.set_child(Some(&picture));
        }

        let label = Label::new(Some(&spec.title));
        label.add_css_class(tile::LABEL);
        label.set_halign(Align::Start);
        label.set_valign(Align::End);
        root.add_overlay(&label);

        Rc::new(Self { root, spec, image })
    }

    /// Get the root GTK widget for this tile.
    pub fn widget(&self) -> &Overlay {
        &self.root
    }

    pub fn spec(&self) -> &TileSpec {
        &self.spec
    }

    /// The tile's sliced image, if it loaded.
    pub fn image(&self) -> Option<&TileImage> {
        self.image.as_ref()
    }

    /// Tile rectangle in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.spec.x as f64,
            self.spec.y as f64,
            self.spec.width as f64,
            self.spec.height as f64,
        )
    }

    pub fn is_power(&self) -> bool {
        self.spec.section == "power"
    }

    /// Wire up hover callbacks (used for the hover bounce).
    pub fn connect_hover(&self, on_enter: impl Fn() + 'static, on_leave: impl Fn() + 'static) {
        let motion = EventControllerMotion::new();
        motion.connect_enter(move |_, _, _| on_enter());
        motion.connect_leave(move |_| on_leave());
        self.root.add_controller(motion);
    }

    /// Wire up the click callback.
    pub fn connect_clicked(&self, on_click: impl Fn() + 'static) {
        let gesture = GestureClick::new();
        gesture.set_button(1);
        gesture.connect_pressed(move |gesture, n_press, _, _| {
            if n_press == 1 {
                gesture.set_state(gtk4::EventSequenceState::Claimed);
                on_click();
            }
        });
        self.root.add_controller(gesture);
    }
}
