//! Configuration types and parsing.
//!
//! This module defines the vibesettings configuration schema. The Config
//! type is intended to be a stable, serialization-friendly schema; derived
//! values (the active tile list, resolved asset paths) are computed from it
//! rather than stored in it. Animation tuning is deliberately absent: the
//! effect constants live in code and only whole effects can be toggled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use toml::Table;

use crate::error::{Error, Result};
use crate::tileset::{self, TileSpec, VALID_TILE_SETS};

/// Embedded default configuration TOML, compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../../config.toml");

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Path where config was found, if any.
    pub source: Option<PathBuf>,
    /// Whether defaults were used (no config file found).
    pub used_defaults: bool,
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Main window configuration.
    pub window: WindowConfig,

    /// Tile set selection and custom tiles.
    pub tiles: TilesConfig,

    /// Per-effect enable switches.
    pub animations: AnimationsConfig,

    /// Section id to external command mapping.
    pub launcher: LauncherConfig,

    /// Advanced configuration options.
    pub advanced: AdvancedConfig,
}

impl Config {
    /// Load configuration from the embedded default TOML string.
    pub fn from_default_toml() -> Result<Self> {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, merging with embedded defaults.
    ///
    /// User-provided values override defaults, but any missing sections or
    /// fields fall back to the embedded default config.
    ///
    /// Returns an error if the file doesn't exist or can't be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_with_defaults(&content)
    }

    /// Load configuration from a TOML string, merging with embedded defaults.
    ///
    /// This parses both the default config and user config as TOML tables,
    /// deep-merges them (user values win), then deserializes the result.
    fn load_with_defaults(user_toml: &str) -> Result<Self> {
        // This should never fail since it's embedded and tested
        let mut base: Table = toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("embedded DEFAULT_CONFIG_TOML should always be valid");

        let user: Table = toml::from_str(user_toml)?;

        deep_merge_toml(&mut base, user);

        let config: Config = base.try_into()?;
        Ok(config)
    }

    /// Find and load configuration using the XDG lookup chain.
    ///
    /// If `explicit_path` is `Some`, that path is used directly and an error
    /// is returned if it doesn't exist or can't be parsed (no fallback).
    ///
    /// If `explicit_path` is `None`, searches in order:
    /// 1. `$XDG_CONFIG_HOME/vibesettings/config.toml`
    /// 2. `~/.config/vibesettings/config.toml`
    /// 3. `./config.toml` (current working directory)
    ///
    /// If no config file is found in the search chain, the embedded defaults
    /// are used.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<ConfigLoadResult> {
        // If an explicit path was provided, use it strictly (no fallback)
        if let Some(path) = explicit_path {
            let config = Self::load(path)?;
            return Ok(ConfigLoadResult {
                config,
                source: Some(path.to_path_buf()),
                used_defaults: false,
            });
        }

        // No explicit path - search the XDG chain
        // Rule: if a config file exists but fails to load, that's an error (no silent fallback).
        // Only use defaults when no config files exist at all.
        let search_paths = Self::config_search_paths();
        let mut first_error: Option<(PathBuf, Error)> = None;

        for path in &search_paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        return Ok(ConfigLoadResult {
                            config,
                            source: Some(path.clone()),
                            used_defaults: false,
                        });
                    }
                    Err(e) => {
                        // Record the first error we encounter - we'll return it if no config loads
                        if first_error.is_none() {
                            first_error = Some((path.clone(), e));
                        }
                    }
                }
            }
        }

        // If we found at least one config file that failed to load, return that error
        // instead of silently falling back to defaults
        if let Some((path, error)) = first_error {
            tracing::error!(
                "Config file {:?} exists but failed to load: {}",
                path,
                error
            );
            return Err(error);
        }

        // No config files exist anywhere - use embedded default TOML
        tracing::info!("No config file found, using built-in default config");
        tracing::debug!(
            "Searched: {}",
            search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML)?;

        Ok(ConfigLoadResult {
            config,
            source: None,
            used_defaults: true,
        })
    }

    /// Get the list of paths to search for config files.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. $XDG_CONFIG_HOME/vibesettings/config.toml
        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("vibesettings/config.toml"));
        }

        // 2. ~/.config/vibesettings/config.toml
        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/vibesettings/config.toml"));
        }

        // 3. ./config.toml (cwd)
        paths.push(PathBuf::from("config.toml"));

        paths
    }

    /// Validate the configuration, returning errors for invalid values.
    ///
    /// This performs strict validation - any invalid value causes an error,
    /// and all problems are collected rather than stopping at the first.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        // Validate tiles.set
        if !VALID_TILE_SETS.contains(&self.tiles.set.as_str()) {
            errors.push(format!(
                "tiles.set: invalid value '{}', expected one of: {}",
                self.tiles.set,
                VALID_TILE_SETS.join(", ")
            ));
        }

        // Validate tiles.background_color: must be a hex color
        if !is_valid_hex_color(&self.tiles.background_color) {
            errors.push(format!(
                "tiles.background_color: invalid value '{}', expected a hex color like '#16161e'",
                self.tiles.background_color
            ));
        }

        // Validate window dimensions
        if self.window.width == 0 {
            errors.push("window.width: must be greater than 0".to_string());
        }
        if self.window.height == 0 {
            errors.push("window.height: must be greater than 0".to_string());
        }

        // Validate custom tiles
        for (index, tile) in self.tiles.custom.iter().enumerate() {
            let prefix = format!("tiles.custom[{}]", index);
            if tile.section.is_empty() {
                errors.push(format!("{}: section must not be empty", prefix));
            }
            if tile.image.is_empty() {
                errors.push(format!("{}: image must not be empty", prefix));
            }
            if tile.width == 0 || tile.height == 0 {
                errors.push(format!(
                    "{}: width and height must be greater than 0",
                    prefix
                ));
            }
            if tile.x < 0 || tile.y < 0 {
                errors.push(format!("{}: x and y must not be negative", prefix));
            }
        }

        // Section pages are keyed by section id, so each may appear once
        let mut seen = std::collections::HashSet::new();
        for tile in &self.tiles.custom {
            if !tile.section.is_empty() && !seen.insert(tile.section.as_str()) {
                errors.push(format!(
                    "tiles.custom: duplicate section '{}'",
                    tile.section
                ));
            }
        }

        // Validate launcher.commands keys: a command must target a built-in
        // section or one defined by a custom tile
        for section in self.launcher.commands.keys() {
            let is_custom = self.tiles.custom.iter().any(|t| &t.section == section);
            if !tileset::is_known_section(section) && !is_custom {
                errors.push(format!(
                    "launcher.commands.{}: unknown section; known sections: {}",
                    section,
                    tileset::SECTIONS.join(", ")
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigValidation(errors))
        }
    }

    /// Check for potential configuration issues and return warnings.
    ///
    /// Unlike `validate()`, these are non-fatal issues that might indicate
    /// typos or unused configuration.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        // The power tile starts the quit cascade, so a command mapped to it
        // would never run.
        if self.launcher.commands.contains_key("power") {
            warnings.push(
                "launcher.commands.power: the power tile quits the application; \
                 this command is never launched"
                    .to_string(),
            );
        }

        // Commands for sections no tile in the active set opens
        let tiles = self.active_tiles();
        for section in self.launcher.commands.keys() {
            if section != "power" && !tiles.iter().any(|t| &t.section == section) {
                warnings.push(format!(
                    "launcher.commands.{}: no tile in the active set opens this section",
                    section
                ));
            }
        }

        // Overlapping custom tiles render on top of each other
        for (i, a) in self.tiles.custom.iter().enumerate() {
            for (j, b) in self.tiles.custom.iter().enumerate().skip(i + 1) {
                let separated = a.x + a.width as i32 <= b.x
                    || b.x + b.width as i32 <= a.x
                    || a.y + a.height as i32 <= b.y
                    || b.y + b.height as i32 <= a.y;
                if !separated {
                    warnings.push(format!(
                        "tiles.custom[{}] and tiles.custom[{}] overlap ('{}' and '{}')",
                        i, j, a.section, b.section
                    ));
                }
            }
        }

        warnings
    }

    /// The tile list the window should build: custom tiles when any are
    /// defined, the selected built-in set otherwise.
    pub fn active_tiles(&self) -> Vec<TileSpec> {
        if !self.tiles.custom.is_empty() {
            return self.tiles.custom.iter().map(TileEntry::to_spec).collect();
        }

        match tileset::builtin(&self.tiles.set) {
            Some(tiles) => tiles,
            None => {
                // validate() rejects unknown names; guard anyway so a
                // misconfigured reload can't take the grid down.
                tracing::warn!("Unknown tile set '{}', using 'aurora'", self.tiles.set);
                tileset::builtin("aurora").unwrap_or_default()
            }
        }
    }

    /// External command for a section, if one is configured.
    pub fn command_for(&self, section: &str) -> Option<&str> {
        self.launcher.commands.get(section).map(String::as_str)
    }

    /// Print a human-readable summary of the configuration.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Window:".to_string());
        lines.push(format!(
            "  size: {}x{} ({})",
            self.window.width,
            self.window.height,
            if self.window.fullscreen {
                "fullscreen"
            } else {
                "windowed"
            }
        ));
        lines.push(format!("  title: {}", self.window.title));

        let tiles = self.active_tiles();
        lines.push("\nTiles:".to_string());
        if self.tiles.custom.is_empty() {
            lines.push(format!("  set: {} (built-in)", self.tiles.set));
        } else {
            lines.push("  set: custom".to_string());
        }
        lines.push(format!("  count: {}", tiles.len()));
        for tile in &tiles {
            lines.push(format!(
                "    - {} '{}' at ({}, {}) {}x{}",
                tile.section, tile.title, tile.x, tile.y, tile.width, tile.height
            ));
        }

        lines.push("\nAnimations:".to_string());
        lines.push(format!("  hover_bounce: {}", self.animations.hover_bounce));
        lines.push(format!("  shatter: {}", self.animations.shatter));
        lines.push(format!("  quit_cascade: {}", self.animations.quit_cascade));

        lines.push("\nLauncher:".to_string());
        lines.push(format!(
            "  commands: {} configured",
            self.launcher.commands.len()
        ));

        lines.join("\n")
    }
}

/// True for `#rgb` and `#rrggbb` strings.
fn is_valid_hex_color(value: &str) -> bool {
    value.starts_with('#') && {
        let hex = value.trim_start_matches('#');
        (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// Deep merge two TOML tables, with `overlay` values taking precedence.
///
/// For nested tables, recursively merges. For arrays and other values,
/// the overlay value completely replaces the base value.
fn deep_merge_toml(base: &mut Table, overlay: Table) {
    for (key, overlay_value) in overlay {
        match (base.get_mut(&key), overlay_value) {
            // Both are tables: recursively merge
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge_toml(base_table, overlay_table);
            }
            // Otherwise: overlay value wins (insert or replace)
            (_, overlay_value) => {
                base.insert(key, overlay_value);
            }
        }
    }
}

/// Main window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Window width in pixels.
    pub width: u32,

    /// Window height in pixels.
    pub height: u32,

    /// Window title.
    pub title: String,

    /// Start fullscreen instead of windowed.
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 980,
            height: 740,
            title: "Settings".to_string(),
            fullscreen: false,
        }
    }
}

/// Tile set selection and custom tile definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TilesConfig {
    /// Built-in tile set name. Ignored when `custom` is non-empty.
    pub set: String,

    /// Window background color behind the tiles.
    pub background_color: String,

    /// User-defined tile list replacing the built-in set.
    pub custom: Vec<TileEntry>,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            set: "aurora".to_string(),
            background_color: "#16161e".to_string(),
            custom: Vec::new(),
        }
    }
}

/// One user-defined tile.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct TileEntry {
    /// Section id this tile opens.
    pub section: String,

    /// Label rendered under the tile image.
    pub title: String,

    /// Image path, relative to the data directories or absolute.
    pub image: String,

    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TileEntry {
    fn to_spec(&self) -> TileSpec {
        TileSpec {
            section: self.section.clone(),
            title: self.title.clone(),
            image: self.image.clone(),
            x: self.x,
            y: self.y,
            width: self.width as i32,
            height: self.height as i32,
        }
    }
}

/// Per-effect enable switches. Effect parameters are code constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationsConfig {
    /// Bob tiles up and down while hovered.
    pub hover_bounce: bool,

    /// Glass shatter effect on tile click.
    pub shatter: bool,

    /// Falling-tile cascade when quitting through the power tile.
    pub quit_cascade: bool,
}

impl Default for AnimationsConfig {
    fn default() -> Self {
        Self {
            hover_bounce: true,
            shatter: true,
            quit_cascade: true,
        }
    }
}

/// Section id to external command mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Command line launched when the section page opens.
    pub commands: HashMap<String, String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            commands: default_commands(),
        }
    }
}

/// Default section commands, kept in sync with the embedded config.toml.
fn default_commands() -> HashMap<String, String> {
    let mut commands = HashMap::new();
    commands.insert("network".to_string(), "nm-connection-editor".to_string());
    commands.insert("bluetooth".to_string(), "blueman-manager".to_string());
    commands.insert("sound".to_string(), "pavucontrol".to_string());
    commands.insert("display".to_string(), "nwg-displays".to_string());
    commands.insert("appearance".to_string(), "nwg-look".to_string());
    commands.insert("storage".to_string(), "gnome-disks".to_string());
    commands
}

/// Advanced configuration options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AdvancedConfig {
    /// Log every animation timer tick at trace level. Extremely noisy.
    pub log_timer_ticks: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_toml_parses() {
        let config = Config::from_default_toml().expect("embedded config must parse");
        assert_eq!(config.window.width, 980);
        assert_eq!(config.window.height, 740);
        assert_eq!(config.tiles.set, "aurora");
    }

    #[test]
    fn test_default_config_toml_validates() {
        let config = Config::from_default_toml().unwrap();
        config.validate().expect("embedded config must validate");
    }

    #[test]
    fn test_default_struct_matches_default_toml() {
        let from_toml = Config::from_default_toml().unwrap();
        let from_struct = Config::default();

        assert_eq!(from_toml.window.width, from_struct.window.width);
        assert_eq!(from_toml.window.height, from_struct.window.height);
        assert_eq!(from_toml.window.title, from_struct.window.title);
        assert_eq!(from_toml.tiles.set, from_struct.tiles.set);
        assert_eq!(
            from_toml.tiles.background_color,
            from_struct.tiles.background_color
        );
        assert_eq!(
            from_toml.animations.hover_bounce,
            from_struct.animations.hover_bounce
        );
        assert_eq!(from_toml.launcher.commands, from_struct.launcher.commands);
        assert_eq!(
            from_toml.advanced.log_timer_ticks,
            from_struct.advanced.log_timer_ticks
        );
    }

    #[test]
    fn test_default_validates() {
        Config::default()
            .validate()
            .expect("defaults must be valid");
    }

    #[test]
    fn test_partial_user_config_keeps_defaults() {
        let config = Config::load_with_defaults("[window]\nwidth = 1200\n").unwrap();
        assert_eq!(config.window.width, 1200);
        // Everything else falls back to the embedded defaults
        assert_eq!(config.window.height, 740);
        assert_eq!(config.tiles.set, "aurora");
        assert!(!config.launcher.commands.is_empty());
    }

    #[test]
    fn test_user_commands_merge_into_defaults() {
        let config =
            Config::load_with_defaults("[launcher.commands]\nupdates = \"foot -e paru\"\n")
                .unwrap();
        // New key added, defaults preserved (tables deep-merge)
        assert_eq!(config.command_for("updates"), Some("foot -e paru"));
        assert_eq!(config.command_for("sound"), Some("pavucontrol"));
    }

    #[test]
    fn test_custom_tiles_array_replaces_not_merges() {
        let toml = r#"
[[tiles.custom]]
section = "network"
title = "Net"
image = "net.png"
x = 0
y = 0
width = 200
height = 200
"#;
        let config = Config::load_with_defaults(toml).unwrap();
        assert_eq!(config.tiles.custom.len(), 1);
        let tiles = config.active_tiles();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].section, "network");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::load_with_defaults("[window]\nwdith = 100\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_tile_set_rejected() {
        let mut config = Config::default();
        config.tiles.set = "nonexistent".to_string();

        let err = config.validate().unwrap_err();
        match err {
            Error::ConfigValidation(errors) => {
                assert!(errors.iter().any(|e| e.contains("tiles.set")));
                assert!(errors.iter().any(|e| e.contains("aurora")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_window_size_rejected() {
        let mut config = Config::default();
        config.window.width = 0;
        config.window.height = 0;

        let err = config.validate().unwrap_err();
        match err {
            Error::ConfigValidation(errors) => {
                assert_eq!(errors.iter().filter(|e| e.contains("window.")).count(), 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_background_color_rejected() {
        let mut config = Config::default();
        config.tiles.background_color = "blue".to_string();
        assert!(config.validate().is_err());

        config.tiles.background_color = "#16161e".to_string();
        assert!(config.validate().is_ok());

        config.tiles.background_color = "#abc".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_degenerate_custom_tile_rejected() {
        let mut config = Config::default();
        config.tiles.custom.push(TileEntry {
            section: String::new(),
            title: "Broken".to_string(),
            image: String::new(),
            x: -5,
            y: 0,
            width: 0,
            height: 100,
        });

        let err = config.validate().unwrap_err();
        match err {
            Error::ConfigValidation(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.contains("section must not be empty")));
                assert!(errors.iter().any(|e| e.contains("image must not be empty")));
                assert!(errors.iter().any(|e| e.contains("width and height")));
                assert!(errors.iter().any(|e| e.contains("must not be negative")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_custom_section_rejected() {
        let mut config = Config::default();
        for title in ["Wifi", "Ethernet"] {
            config.tiles.custom.push(TileEntry {
                section: "network".to_string(),
                title: title.to_string(),
                image: "net.png".to_string(),
                x: 0,
                y: 0,
                width: 200,
                height: 200,
            });
        }

        let err = config.validate().unwrap_err();
        match err {
            Error::ConfigValidation(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.contains("duplicate section 'network'")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_command_section_rejected() {
        let mut config = Config::default();
        config
            .launcher
            .commands
            .insert("netwrok".to_string(), "nmtui".to_string());

        let err = config.validate().unwrap_err();
        match err {
            Error::ConfigValidation(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.contains("launcher.commands.netwrok")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_command_for_custom_section_accepted() {
        let mut config = Config::default();
        config.tiles.custom.push(TileEntry {
            section: "dotfiles".to_string(),
            title: "Dotfiles".to_string(),
            image: "dots.png".to_string(),
            x: 0,
            y: 0,
            width: 200,
            height: 200,
        });
        config
            .launcher
            .commands
            .insert("dotfiles".to_string(), "foot -e yazi".to_string());

        config.validate().expect("custom section commands are valid");
    }

    #[test]
    fn test_power_command_warning() {
        let mut config = Config::default();
        config
            .launcher
            .commands
            .insert("power".to_string(), "systemctl poweroff".to_string());

        let warnings = config.warnings();
        assert!(warnings.iter().any(|w| w.contains("power")));
    }

    #[test]
    fn test_overlapping_custom_tiles_warning() {
        let mut config = Config::default();
        for section in ["network", "sound"] {
            config.tiles.custom.push(TileEntry {
                section: section.to_string(),
                title: section.to_string(),
                image: format!("{}.png", section),
                x: 10,
                y: 10,
                width: 200,
                height: 200,
            });
        }

        let warnings = config.warnings();
        assert!(warnings.iter().any(|w| w.contains("overlap")));
    }

    #[test]
    fn test_no_warnings_for_defaults() {
        assert!(Config::default().warnings().is_empty());
    }

    #[test]
    fn test_active_tiles_selects_ember() {
        let mut config = Config::default();
        config.tiles.set = "ember".to_string();

        let tiles = config.active_tiles();
        assert!(!tiles.is_empty());
        // Ember's signature tall appearance tile
        let appearance = tiles.iter().find(|t| t.section == "appearance").unwrap();
        assert_eq!(appearance.height, 460);
    }

    #[test]
    fn test_deep_merge_toml_tables() {
        let mut base: Table = toml::from_str(
            r#"
[window]
width = 980
height = 740
"#,
        )
        .unwrap();
        let overlay: Table = toml::from_str(
            r#"
[window]
width = 1200
"#,
        )
        .unwrap();

        deep_merge_toml(&mut base, overlay);

        let window = base.get("window").unwrap().as_table().unwrap();
        assert_eq!(window.get("width").unwrap().as_integer(), Some(1200));
        assert_eq!(window.get("height").unwrap().as_integer(), Some(740));
    }

    #[test]
    fn test_deep_merge_toml_arrays_replace() {
        let mut base: Table = toml::from_str("values = [1, 2, 3]").unwrap();
        let overlay: Table = toml::from_str("values = [9]").unwrap();

        deep_merge_toml(&mut base, overlay);

        let values = base.get("values").unwrap().as_array().unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let missing = Path::new("/nonexistent/vibesettings-config.toml");
        match Config::load(missing) {
            Err(Error::ConfigNotFound(path)) => assert_eq!(path, missing),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_config_search_paths_end_with_cwd() {
        let paths = Config::config_search_paths();
        assert!(!paths.is_empty());
        assert_eq!(paths.last().unwrap(), &PathBuf::from("config.toml"));
    }

    #[test]
    fn test_summary_mentions_tiles_and_window() {
        let summary = Config::default().summary();
        assert!(summary.contains("980x740"));
        assert!(summary.contains("aurora"));
        assert!(summary.contains("hover_bounce: true"));
    }
}
