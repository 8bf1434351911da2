//! Section name resolution and external tool launching.
//!
//! Sections can be addressed from the command line by their canonical id
//! or a handful of common aliases (`wifi` for `network`, `audio` for
//! `sound`, ...). Configured commands are launched detached; the settings
//! window stays up regardless of what happens to the child.

use gtk4::glib;
use tracing::{debug, warn};

/// Accepted aliases for canonical section ids.
const SECTION_ALIASES: &[(&str, &str)] = &[
    ("apps", "applications"),
    ("wifi", "network"),
    ("audio", "sound"),
    ("wallpaper", "appearance"),
    ("monitor", "display"),
    ("update", "updates"),
];

/// Resolve a user-supplied section name to its canonical id.
///
/// Matching is case-insensitive. Unknown names pass through unchanged so
/// the caller can report them against the known section list.
pub fn resolve_section(name: &str) -> String {
    let lower = name.to_lowercase();
    for (alias, canonical) in SECTION_ALIASES {
        if lower == *alias {
            return (*canonical).to_string();
        }
    }
    lower
}

/// Launch a configured command for a section as a detached process.
///
/// Fire-and-forget: a failure to spawn is logged but never surfaces in the
/// UI. The command string is parsed like a shell command line.
pub fn launch(section: &str, command: &str) {
    debug!("Launching command for section {}: {}", section, command);
    if let Err(e) = glib::spawn_command_line_async(command) {
        warn!("Failed to launch '{}' for section {}: {}", command, section, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve_section("wifi"), "network");
        assert_eq!(resolve_section("audio"), "sound");
        assert_eq!(resolve_section("apps"), "applications");
        assert_eq!(resolve_section("wallpaper"), "appearance");
        assert_eq!(resolve_section("monitor"), "display");
        assert_eq!(resolve_section("update"), "updates");
    }

    #[test]
    fn test_resolve_canonical_passthrough() {
        assert_eq!(resolve_section("network"), "network");
        assert_eq!(resolve_section("power"), "power");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve_section("WiFi"), "network");
        assert_eq!(resolve_section("Bluetooth"), "bluetooth");
    }

    #[test]
    fn test_resolve_unknown_passthrough() {
        assert_eq!(resolve_section("plasma"), "plasma");
    }
}
