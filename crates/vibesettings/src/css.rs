//! CSS generation for the settings window.
//!
//! All styling is generated from code with config values interpolated,
//! then applied at USER priority so it wins over GTK theme defaults.
//! A user `style.css` (loaded separately in `window.rs`) sits one
//! priority step above everything here.

use vibesettings_core::Config;

/// Generate the full stylesheet for the application.
pub fn stylesheet(config: &Config) -> String {
    let window_css = window_css(&config.tiles.background_color);
    let tile_css = tile_css();
    let page_css = page_css();

    format!("{window_css}\n{tile_css}\n{page_css}")
}

/// Window and canvas CSS with config values interpolated.
fn window_css(background_color: &str) -> String {
    format!(
        r#"
/* ===== WINDOW ===== */

.settings-window {{
    background-color: {background_color};
}}

/* The canvas must stay transparent so the window color shows between tiles */
.menu-canvas {{
    background: transparent;
}}
"#
    )
}

/// Tile and fragment CSS.
fn tile_css() -> String {
    r#"
/* ===== TILES ===== */

.tile {
    border-radius: 18px;
    background-color: rgba(255, 255, 255, 0.04);
}

.tile:hover {
    background-color: rgba(255, 255, 255, 0.08);
}

.tile-image {
    border-radius: 18px;
}

.tile-label {
    font-size: 15px;
    font-weight: 600;
    color: rgba(255, 255, 255, 0.92);
    text-shadow: 0 1px 3px rgba(0, 0, 0, 0.8);
    margin: 10px;
}

.tile-power .tile-label {
    color: #ffb4a9;
}

/* Each shard gets a thin glass-edge highlight. Widget opacity drives the
   fade, so the border dims together with the texture */
.tile-fragment {
    padding: 0;
    border: 1px solid rgba(255, 255, 255, 0.35);
    background: transparent;
}
"#
    .to_string()
}

/// Section page CSS.
fn page_css() -> String {
    r#"
/* ===== SECTION PAGES ===== */

.section-page {
    padding: 28px;
}

.section-title {
    font-size: 26px;
    font-weight: 700;
    color: rgba(255, 255, 255, 0.95);
}

.section-hint {
    font-size: 14px;
    color: rgba(255, 255, 255, 0.55);
}

.section-back {
    font-size: 14px;
    color: rgba(255, 255, 255, 0.7);
    padding: 4px 10px;
    border-radius: 8px;
}

.section-back:hover {
    background-color: rgba(255, 255, 255, 0.08);
    color: rgba(255, 255, 255, 0.95);
}

.vs-btn-reset {
    background: none;
    border: none;
    box-shadow: none;
    padding: 0;
    min-width: 0;
    min-height: 0;
}
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_interpolates_background() {
        let mut config = Config::default();
        config.tiles.background_color = "#0a0a0a".to_string();

        let css = stylesheet(&config);
        assert!(css.contains("background-color: #0a0a0a"));
    }

    #[test]
    fn test_stylesheet_covers_all_surfaces() {
        let css = stylesheet(&Config::default());
        for selector in [".settings-window", ".tile", ".tile-fragment", ".section-page"] {
            assert!(css.contains(selector), "missing selector {}", selector);
        }
    }
}
