//! Timer-driven animation effects for the settings window.
//!
//! The math for every effect lives in `vibesettings-core`; the drivers
//! here own the GLib timers and push each frame into GTK widgets.

mod bounce;
mod fall;
mod shatter;

pub use bounce::{HoverBounce, HoverPulse};
pub use fall::QuitCascade;
pub use shatter::ShatterEffect;
