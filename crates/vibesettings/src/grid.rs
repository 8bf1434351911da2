//! The settings menu: a fixed canvas of image tiles plus one page per
//! section, stacked behind it.
//!
//! The grid owns every animation driver and the single `animating` guard
//! that keeps them from overlapping. Clicking a tile shatters it and then
//! swaps the stack to that section's page; clicking the power tile drops
//! the whole grid off the bottom of the window and closes it.

use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Fixed, Stack};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};

use vibesettings_core::Config;

use crate::animations::{HoverBounce, HoverPulse, QuitCascade, ShatterEffect};
use crate::launcher;
use crate::styles::class;
use crate::widgets::{build_section_page, SettingsTile};

const MENU_PAGE: &str = "menu";

/// Per-tile hover animation handle.
#[derive(Clone)]
enum HoverEffect {
    Bounce(Rc<HoverBounce>),
    Pulse(Rc<HoverPulse>),
}

impl HoverEffect {
    fn start(&self) {
        match self {
            HoverEffect::Bounce(bounce) => bounce.start(),
            HoverEffect::Pulse(pulse) => pulse.start(),
        }
    }

    fn stop(&self) {
        match self {
            HoverEffect::Bounce(bounce) => bounce.stop(),
            HoverEffect::Pulse(pulse) => pulse.stop(),
        }
    }
}

pub struct SettingsGrid {
    stack: Stack,
    canvas: Fixed,
    config: RefCell<Config>,
    tiles: RefCell<Vec<Rc<SettingsTile>>>,
    hover_effects: RefCell<Vec<HoverEffect>>,
    section_pages: RefCell<Vec<GtkBox>>,
    active_shatter: RefCell<Option<Rc<ShatterEffect>>>,
    cascade: RefCell<Option<Rc<QuitCascade>>>,
    /// Set while a tile animation runs or a section page is open; cleared
    /// when the menu comes back. Blocks every other tile interaction.
    animating: Cell<bool>,
    on_quit: Box<dyn Fn()>,
}

impl SettingsGrid {
    pub fn new(config: Config, on_quit: impl Fn() + 'static) -> Rc<Self> {
        let stack = Stack::new();
        let canvas = Fixed::new();
        canvas.add_css_class(class::MENU_CANVAS);
        stack.add_named(&canvas, Some(MENU_PAGE));

        let grid = Rc::new(Self {
            stack,
            canvas,
            config: RefCell::new(config),
            tiles: RefCell::new(Vec::new()),
            hover_effects: RefCell::new(Vec::new()),
            section_pages: RefCell::new(Vec::new()),
            active_shatter: RefCell::new(None),
            cascade: RefCell::new(None),
            animating: Cell::new(false),
            on_quit: Box::new(on_quit),
        });

        grid.populate();
        grid
    }

    pub fn widget(&self) -> &Stack {
        &self.stack
    }

    /// Build tiles, hover effects and section pages from the current config.
    fn populate(self: &Rc<Self>) {
        let specs = self.config.borrow().active_tiles();
        info!("Building settings menu with {} tiles", specs.len());

        let mut tiles = Vec::with_capacity(specs.len());
        let mut effects = Vec::with_capacity(specs.len());
        let mut pages = Vec::new();

        for (index, spec) in specs.into_iter().enumerate() {
            let section = spec.section.clone();
            let title = spec.title.clone();
            let (x, y, width, height) = (spec.x, spec.y, spec.width, spec.height);

            let tile = SettingsTile::new(spec);
            self.canvas.put(tile.widget(), x as f64, y as f64);

            let effect = if tile.is_power() {
                HoverEffect::Pulse(HoverPulse::new(
                    &self.canvas,
                    tile.widget(),
                    x,
                    y,
                    width,
                    height,
                ))
            } else {
                HoverEffect::Bounce(HoverBounce::new(&self.canvas, tile.widget(), x, y))
            };

            let grid_weak = Rc::downgrade(self);
            let enter_effect = effect.clone();
            let on_enter = move || {
                let Some(grid) = grid_weak.upgrade() else {
                    return;
                };
                if grid.animating.get() || !grid.config.borrow().animations.hover_bounce {
                    return;
                }
                enter_effect.start();
            };
            let grid_weak = Rc::downgrade(self);
            let leave_effect = effect.clone();
            let on_leave = move || {
                let Some(grid) = grid_weak.upgrade() else {
                    return;
                };
                // While a shatter or the quit cascade owns the widgets,
                // the snap back to rest would fight it.
                if grid.animating.get() {
                    return;
                }
                leave_effect.stop();
            };
            tile.connect_hover(on_enter, on_leave);

            let grid_weak = Rc::downgrade(self);
            tile.connect_clicked(move || {
                if let Some(grid) = grid_weak.upgrade() {
                    grid.on_tile_clicked(index);
                }
            });

            if !tile.is_power() {
                let command = self
                    .config
                    .borrow()
                    .command_for(&section)
                    .map(str::to_owned);
                let grid_weak = Rc::downgrade(self);
                let page = build_section_page(&title, command.as_deref(), move || {
                    if let Some(grid) = grid_weak.upgrade() {
                        grid.show_menu();
                    }
                });
                self.stack.add_named(&page, Some(&section));
                pages.push(page);
            }

            tiles.push(tile);
            effects.push(effect);
        }

        *self.tiles.borrow_mut() = tiles;
        *self.hover_effects.borrow_mut() = effects;
        *self.section_pages.borrow_mut() = pages;
    }

    fn on_tile_clicked(self: &Rc<Self>, index: usize) {
        if self.animating.get() {
            debug!("Ignoring tile click while an animation is running");
            return;
        }

        let tile = {
            let tiles = self.tiles.borrow();
            let Some(tile) = tiles.get(index) else {
                return;
            };
            tile.clone()
        };

        if let Some(effect) = self.hover_effects.borrow().get(index) {
            effect.stop();
        }

        if tile.is_power() {
            if self.config.borrow().animations.quit_cascade {
                self.start_quit_cascade();
            } else {
                (self.on_quit)();
            }
            return;
        }

        let section = tile.spec().section.clone();
        if !self.config.borrow().animations.shatter {
            self.animating.set(true);
            self.navigate(&section);
            return;
        }

        self.animating.set(true);

        // No two shatter effects coexist; the slot owns the current one.
        if let Some(previous) = self.active_shatter.borrow_mut().take() {
            previous.cancel();
        }

        let log_ticks = self.config.borrow().advanced.log_timer_ticks;
        let grid_weak = Rc::downgrade(self);
        let shatter = ShatterEffect::start(&self.canvas, &tile, log_ticks, move || {
            if let Some(grid) = grid_weak.upgrade() {
                grid.active_shatter.borrow_mut().take();
                grid.navigate(&section);
            }
        });
        *self.active_shatter.borrow_mut() = Some(shatter);
    }

    fn start_quit_cascade(self: &Rc<Self>) {
        info!("Power tile activated, starting quit cascade");
        self.animating.set(true);
        self.stop_all_hovers();
        if let Some(shatter) = self.active_shatter.borrow_mut().take() {
            shatter.cancel();
        }

        // The allocated height tracks the real window size; the configured
        // height only matters before the first layout pass.
        let allocated = self.canvas.height();
        let floor_y = if allocated > 0 {
            allocated as f64
        } else {
            self.config.borrow().window.height as f64
        };

        let tiles = self.tiles.borrow().clone();
        let grid_weak = Rc::downgrade(self);
        let cascade = QuitCascade::start(&self.canvas, &tiles, floor_y, move || {
            if let Some(grid) = grid_weak.upgrade() {
                grid.cascade.borrow_mut().take();
                (grid.on_quit)();
            }
        });
        *self.cascade.borrow_mut() = Some(cascade);
    }

    /// Swap to a section page and launch its external tool, if configured.
    fn navigate(&self, section: &str) {
        if self.stack.child_by_name(section).is_none() {
            warn!("No page for section '{}', staying on menu", section);
            self.show_menu();
            return;
        }
        self.stack.set_visible_child_name(section);

        let config = self.config.borrow();
        if let Some(command) = config.command_for(section) {
            launcher::launch(section, command);
        }
    }

    /// Return to the menu page and put every tile back at rest.
    fn show_menu(&self) {
        for tile in self.tiles.borrow().iter() {
            let spec = tile.spec();
            tile.widget().set_visible(true);
            tile.widget().set_opacity(1.0);
            self.canvas.move_(tile.widget(), spec.x as f64, spec.y as f64);
        }
        self.stack.set_visible_child_name(MENU_PAGE);
        self.animating.set(false);
    }

    /// Open directly at a section, as if its tile had been clicked without
    /// the shatter. Used for the CLI positional argument.
    pub fn jump_to_section(&self, section: &str) {
        if self.stack.child_by_name(section).is_none() {
            warn!("Cannot jump to unknown section '{}'", section);
            return;
        }
        self.animating.set(true);
        self.navigate(section);
    }

    /// Swap in a new config without touching the widget tree. Used when a
    /// reload only changed values the grid reads live, like animation flags.
    pub fn set_config(&self, config: Config) {
        *self.config.borrow_mut() = config;
    }

    /// Tear the menu down and rebuild it from `config`. Any running
    /// animation is cancelled first.
    pub fn rebuild(self: &Rc<Self>, config: Config) {
        info!("Rebuilding settings menu after config change");
        self.cancel_animations();

        for tile in self.tiles.borrow_mut().drain(..) {
            self.canvas.remove(tile.widget());
        }
        self.hover_effects.borrow_mut().clear();
        for page in self.section_pages.borrow_mut().drain(..) {
            self.stack.remove(&page);
        }

        *self.config.borrow_mut() = config;
        self.animating.set(false);
        self.populate();
        self.stack.set_visible_child_name(MENU_PAGE);
    }

    fn stop_all_hovers(&self) {
        for effect in self.hover_effects.borrow().iter() {
            effect.stop();
        }
    }

    fn cancel_animations(&self) {
        if let Some(shatter) = self.active_shatter.borrow_mut().take() {
            shatter.cancel();
        }
        if let Some(cascade) = self.cascade.borrow_mut().take() {
            cascade.cancel();
        }
        self.stop_all_hovers();
    }
}

impl Drop for SettingsGrid {
    fn drop(&mut self) {
        self.cancel_animations();
    }
}
