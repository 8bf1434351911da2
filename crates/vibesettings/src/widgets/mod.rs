//! Widget implementations for the settings window.
//!
//! Each widget is a self-contained GTK4 component. The grid constructs
//! tiles from the active tile set and wires their hover/click callbacks
//! to the animation drivers.

mod section_page;
mod tile;

pub use section_page::build_section_page;
pub use tile::SettingsTile;
