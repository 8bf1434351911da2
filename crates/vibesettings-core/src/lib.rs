//! Core library for vibesettings.
//!
//! Everything in this crate is GTK-free: configuration parsing, tile set
//! definitions, and the animation state machines (shatter, bounce, fall)
//! as pure math over caller-supplied clocks and RNGs. The `vibesettings`
//! binary owns the widgets and timers and drives these types from them.

pub mod bounce;
pub mod config;
pub mod error;
pub mod fall;
pub mod geometry;
pub mod logging;
pub mod shatter;
pub mod tileset;

pub use config::{Config, ConfigLoadResult};
pub use error::{Error, Result};
