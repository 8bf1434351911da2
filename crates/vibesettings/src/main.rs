//! vibesettings - An animated settings launcher
//!
//! This is the main entry point for the vibesettings application.

mod animations;
mod css;
mod grid;
mod launcher;
mod services;
pub mod styles;
mod texture;
mod widgets;
mod window;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gtk4::Application;
use gtk4::prelude::*;
use tracing::{debug, error, info, warn};

use vibesettings_core::{Config, logging};

use crate::services::config_manager::ConfigManager;
use crate::window::SettingsWindow;

/// vibesettings - An animated settings launcher
#[derive(Parser, Debug)]
#[command(name = "vibesettings", version, about, long_about = None)]
struct Args {
    /// Open directly at a section, skipping the menu (e.g. network, sound;
    /// aliases like wifi or audio work too)
    section: Option<String>,

    /// Path to the configuration file (uses XDG lookup if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print example configuration and exit
    #[arg(long)]
    print_example_config: bool,

    /// Validate configuration and exit (returns non-zero on errors)
    #[arg(long)]
    check_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    logging::init(args.verbose);

    // Load configuration using XDG lookup chain
    // If --config is specified, it must exist and be valid (no fallback)
    let load_result = match Config::find_and_load(args.config.as_deref()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref source) = load_result.source {
        info!("Loaded configuration from {:?}", source);
    } else if load_result.used_defaults {
        warn!("Using default configuration (no config file found)");
    }

    let config = load_result.config;

    // Validate configuration (strict - fail on invalid values)
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    debug!("Configuration validated successfully");

    for warning in config.warnings() {
        warn!("{}", warning);
    }

    // --check-config: just validate and exit
    if args.check_config {
        if let Some(ref source) = load_result.source {
            println!("Configuration valid: {}", source.display());
        } else {
            println!("Configuration valid (using defaults)");
        }
        println!("{}", config.summary());
        return ExitCode::SUCCESS;
    }

    // --print-example-config: print the example config with comments
    if args.print_example_config {
        print!("{}", vibesettings_core::config::DEFAULT_CONFIG_TOML);
        return ExitCode::SUCCESS;
    }

    // Resolve the optional startup section before GTK spins up
    let initial_section = match args.section.as_deref() {
        Some(name) => match resolve_initial_section(name, &config) {
            Ok(section) => Some(section),
            Err(message) => {
                eprintln!("Error: {}", message);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    info!("Configuration loaded successfully");
    info!(
        "Window: {}x{} \"{}\"",
        config.window.width, config.window.height, config.window.title
    );
    info!(
        "Tile set: {} ({} tiles)",
        config.tiles.set,
        config.active_tiles().len()
    );

    // Run the GTK application
    run_gtk_app(config, load_result.source, initial_section)
}

/// Map a CLI section argument to a section the active tile set can open.
fn resolve_initial_section(name: &str, config: &Config) -> Result<String, String> {
    let section = launcher::resolve_section(name);

    if section == "power" {
        return Err("section 'power' quits the application and has no page".to_string());
    }

    let tiles = config.active_tiles();
    if tiles.iter().any(|tile| tile.section == section) {
        return Ok(section);
    }

    let available: Vec<&str> = tiles
        .iter()
        .filter(|tile| tile.section != "power")
        .map(|tile| tile.section.as_str())
        .collect();
    Err(format!(
        "unknown section '{}'; available sections: {}",
        name,
        available.join(", ")
    ))
}

/// Initialize and run the GTK4 application.
fn run_gtk_app(
    config: Config,
    config_source: Option<PathBuf>,
    initial_section: Option<String>,
) -> ExitCode {
    // Log the config source for diagnostics
    if let Some(ref source) = config_source {
        info!("Running with configuration file: {}", source.display());
    } else {
        info!("Running with default configuration (no file found)");
    }

    // Initialize the config manager singleton (before GTK, so it's ready for hot-reload)
    ConfigManager::init_global(config.clone(), config_source.clone());

    // Default to Wayland backend
    // SAFETY: This is called before GTK initialization, and we're setting a
    // well-known environment variable. No other threads are accessing env vars yet.
    if std::env::var("GDK_BACKEND").is_err() {
        unsafe {
            std::env::set_var("GDK_BACKEND", "wayland");
        }
    }

    let app = Application::builder()
        .application_id("io.github.vibesettings")
        .flags(gtk4::gio::ApplicationFlags::NON_UNIQUE)
        .build();

    // Clone config for the activate closure
    let config_for_activate = config.clone();

    app.connect_activate(move |app| {
        info!("GTK application activated");

        // Load CSS styling
        window::load_css(&config_for_activate);

        let settings_window = SettingsWindow::new(app, config_for_activate.clone());

        // Hook the grid up for live config reload
        ConfigManager::global().register_grid(settings_window.grid());

        if let Some(ref section) = initial_section {
            info!("Opening directly at section '{}'", section);
            settings_window.grid().jump_to_section(section);
        }

        settings_window.present();

        // Attach to the application so the window and its grid stay alive
        // for the lifetime of the app.
        unsafe {
            app.set_data("vibesettings-window", settings_window);
        }

        // Start config file watcher for live reload
        ConfigManager::global().start_watching();
    });

    app.connect_startup(|_| {
        info!("GTK application starting up");
    });

    app.connect_shutdown(|_| {
        info!("GTK application shutting down");
        // Stop config watcher
        ConfigManager::global().stop_watching();
    });

    // Run the application with empty args (we already parsed with clap)
    let empty_args: Vec<String> = vec![];
    let status = app.run_with_args(&empty_args);

    if status == gtk4::glib::ExitCode::SUCCESS {
        ExitCode::SUCCESS
    } else {
        error!("GTK application exited with error");
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_initial_section_known() {
        let config = Config::default();
        assert_eq!(
            resolve_initial_section("network", &config).unwrap(),
            "network"
        );
    }

    #[test]
    fn test_resolve_initial_section_alias() {
        let config = Config::default();
        assert_eq!(resolve_initial_section("wifi", &config).unwrap(), "network");
        assert_eq!(resolve_initial_section("audio", &config).unwrap(), "sound");
    }

    #[test]
    fn test_resolve_initial_section_power_rejected() {
        let config = Config::default();
        let err = resolve_initial_section("power", &config).unwrap_err();
        assert!(err.contains("power"));
    }

    #[test]
    fn test_resolve_initial_section_unknown() {
        let config = Config::default();
        let err = resolve_initial_section("netwrok", &config).unwrap_err();
        assert!(err.contains("netwrok"));
        assert!(err.contains("network"));
    }
}
