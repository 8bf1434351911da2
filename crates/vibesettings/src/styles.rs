//! Shared CSS class constants for vibesettings.
//!
//! This module centralizes all CSS class names used across the codebase,
//! making them discoverable, avoiding typos, and enabling IDE autocompletion.
//!
//! # Usage
//!
//! ```ignore
//! use crate::styles::{class, tile};
//!
//! widget.add_css_class(tile::TILE);
//! button.add_css_class(class::BTN_RESET);
//! ```

/// Core structural/layout CSS classes.
pub mod class {
    /// Main settings window (`.settings-window`).
    pub const WINDOW: &str = "settings-window";

    /// Fixed canvas holding the tile mosaic (`.menu-canvas`).
    pub const MENU_CANVAS: &str = "menu-canvas";

    /// Section page container (`.section-page`).
    pub const PAGE: &str = "section-page";

    /// Section page title label (`.section-title`).
    pub const PAGE_TITLE: &str = "section-title";

    /// Section page hint label below the title (`.section-hint`).
    pub const PAGE_HINT: &str = "section-hint";

    /// Back button on section pages (`.section-back`).
    pub const BACK: &str = "section-back";

    /// Reset button - strips all GTK chrome (`.vs-btn-reset`).
    ///
    /// Use for buttons that need custom styling without default backgrounds,
    /// borders, shadows, or padding.
    pub const BTN_RESET: &str = "vs-btn-reset";
}

/// Tile and fragment classes.
pub mod tile {
    /// Tile container on the menu canvas (`.tile`).
    pub const TILE: &str = "tile";

    /// Tile image picture (`.tile-image`).
    pub const IMAGE: &str = "tile-image";

    /// Tile title label overlaid on the image (`.tile-label`).
    pub const LABEL: &str = "tile-label";

    /// The power tile gets its own accent treatment (`.tile-power`).
    pub const POWER: &str = "tile-power";

    /// A single shard during the shatter effect (`.tile-fragment`).
    ///
    /// Shards carry a thin light border as a glass edge; its opacity rides
    /// the fragment alpha because the driver fades the whole widget.
    pub const FRAGMENT: &str = "tile-fragment";
}
