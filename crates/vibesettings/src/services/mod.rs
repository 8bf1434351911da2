//! Background services for the settings window.

pub mod config_manager;
