//! Built-in tile sets and section metadata.
//!
//! A tile set defines the main menu mosaic: which section each tile opens,
//! its label, its image asset, and its placement. Two sets ship built in;
//! user configs can switch between them or replace the list entirely with
//! `[[tiles.custom]]` entries.

use std::env;
use std::path::PathBuf;

use crate::geometry::Rect;

/// Known tile set names accepted by `tiles.set`.
pub const VALID_TILE_SETS: &[&str] = &["aurora", "ember"];

/// Section ids understood by the launcher and the section pages.
pub const SECTIONS: &[&str] = &[
    "battery",
    "network",
    "bluetooth",
    "sound",
    "display",
    "power",
    "appearance",
    "language",
    "storage",
    "applications",
    "updates",
];

/// True when `id` names a built-in section.
pub fn is_known_section(id: &str) -> bool {
    SECTIONS.contains(&id)
}

/// One tile of the main menu mosaic.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSpec {
    /// Section id this tile opens (see [`SECTIONS`]).
    pub section: String,
    /// Label rendered under the tile image.
    pub title: String,
    /// Image asset path, relative to the data directories.
    pub image: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TileSpec {
    fn new(section: &str, title: &str, image: &str, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            section: section.to_string(),
            title: title.to_string(),
            image: image.to_string(),
            x,
            y,
            width,
            height,
        }
    }

    /// Tile bounds in window coordinates, as consumed by the animations.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x as f64,
            self.y as f64,
            self.width as f64,
            self.height as f64,
        )
    }
}

/// Look up a built-in tile set by name.
pub fn builtin(name: &str) -> Option<Vec<TileSpec>> {
    match name {
        "aurora" => Some(aurora()),
        "ember" => Some(ember()),
        _ => None,
    }
}

/// The default mosaic: a wide appearance tile in the middle row.
fn aurora() -> Vec<TileSpec> {
    let dir = "tiles/aurora";
    vec![
        TileSpec::new("network", "Network", &format!("{dir}/network.png"), 20, 20, 220, 220),
        TileSpec::new("bluetooth", "Bluetooth", &format!("{dir}/bluetooth.png"), 260, 20, 220, 220),
        TileSpec::new("sound", "Sound", &format!("{dir}/sound.png"), 500, 20, 220, 220),
        TileSpec::new("display", "Display", &format!("{dir}/display.png"), 740, 20, 220, 220),
        TileSpec::new("appearance", "Appearance", &format!("{dir}/appearance.png"), 20, 260, 460, 220),
        TileSpec::new("battery", "Battery", &format!("{dir}/battery.png"), 500, 260, 220, 220),
        TileSpec::new("updates", "Updates", &format!("{dir}/updates.png"), 740, 260, 220, 220),
        TileSpec::new("language", "Language", &format!("{dir}/language.png"), 20, 500, 220, 220),
        TileSpec::new("storage", "Storage", &format!("{dir}/storage.png"), 260, 500, 220, 220),
        TileSpec::new("applications", "Applications", &format!("{dir}/applications.png"), 500, 500, 220, 220),
        TileSpec::new("power", "Power", &format!("{dir}/power.png"), 740, 500, 220, 220),
    ]
}

/// Alternate mosaic: a tall appearance tile down the left edge.
fn ember() -> Vec<TileSpec> {
    let dir = "tiles/ember";
    vec![
        TileSpec::new("appearance", "Appearance", &format!("{dir}/appearance.png"), 20, 20, 220, 460),
        TileSpec::new("network", "Network", &format!("{dir}/network.png"), 260, 20, 220, 220),
        TileSpec::new("sound", "Sound", &format!("{dir}/sound.png"), 500, 20, 220, 220),
        TileSpec::new("display", "Display", &format!("{dir}/display.png"), 740, 20, 220, 220),
        TileSpec::new("bluetooth", "Bluetooth", &format!("{dir}/bluetooth.png"), 260, 260, 220, 220),
        TileSpec::new("battery", "Battery", &format!("{dir}/battery.png"), 500, 260, 220, 220),
        TileSpec::new("updates", "Updates", &format!("{dir}/updates.png"), 740, 260, 220, 220),
        TileSpec::new("language", "Language", &format!("{dir}/language.png"), 20, 500, 220, 220),
        TileSpec::new("storage", "Storage", &format!("{dir}/storage.png"), 260, 500, 220, 220),
        TileSpec::new("applications", "Applications", &format!("{dir}/applications.png"), 500, 500, 220, 220),
        TileSpec::new("power", "Power", &format!("{dir}/power.png"), 740, 500, 220, 220),
    ]
}

/// Directories searched for image assets, in priority order.
pub fn data_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. $XDG_DATA_HOME/vibesettings
    if let Ok(xdg_data) = env::var("XDG_DATA_HOME") {
        paths.push(PathBuf::from(xdg_data).join("vibesettings"));
    }

    // 2. ~/.local/share/vibesettings
    if let Ok(home) = env::var("HOME") {
        paths.push(PathBuf::from(home).join(".local/share/vibesettings"));
    }

    // 3. /usr/share/vibesettings
    paths.push(PathBuf::from("/usr/share/vibesettings"));

    // 4. ./assets (development checkout)
    paths.push(PathBuf::from("assets"));

    paths
}

/// Resolve a relative asset path against the data directories. Absolute
/// paths pass through untouched so custom tiles can point anywhere.
pub fn resolve_asset(relative: &str) -> Option<PathBuf> {
    let as_path = PathBuf::from(relative);
    if as_path.is_absolute() {
        return as_path.exists().then_some(as_path);
    }

    data_search_paths()
        .into_iter()
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.exists())
}
