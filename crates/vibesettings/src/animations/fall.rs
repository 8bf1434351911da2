//! GTK driver for the quit cascade.
//!
//! When the power tile is activated, every tile on the menu canvas drops
//! off the bottom of the window one after another, fading as it goes. The
//! window closes once the last tile has landed below the floor line.

use gtk4::glib::{self, SourceId};
use gtk4::prelude::*;
use gtk4::{Fixed, Widget};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

use vibesettings_core::fall::{
    cascade_delay_ms, fall_target, FadeOut, FallPath, FADE_TICK_MS, FALL_TICK_MS,
};
use vibesettings_core::geometry::Vec2;

use crate::widgets::SettingsTile;

/// Fall-and-fade animation for a single tile.
struct FallEffect {
    canvas: Fixed,
    widget: Widget,
    path: FallPath,
    fade: RefCell<FadeOut>,
    start_us: i64,
    fall_timer: RefCell<Option<SourceId>>,
    fade_timer: RefCell<Option<SourceId>>,
    on_landed: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl FallEffect {
    fn start(
        canvas: &Fixed,
        widget: &Widget,
        origin: Vec2,
        floor_y: f64,
        on_landed: impl FnOnce() + 'static,
    ) -> Rc<Self> {
        let target = fall_target(origin, floor_y, &mut rand::thread_rng());
        let effect = Rc::new(Self {
            canvas: canvas.clone(),
            widget: widget.clone(),
            path: FallPath::new(origin, target),
            fade: RefCell::new(FadeOut::new()),
            start_us: glib::monotonic_time(),
            fall_timer: RefCell::new(None),
            fade_timer: RefCell::new(None),
            on_landed: RefCell::new(Some(Box::new(on_landed))),
        });

        let effect_weak = Rc::downgrade(&effect);
        let source_id = glib::timeout_add_local(
            Duration::from_millis(FALL_TICK_MS as u64),
            move || {
                let Some(effect) = effect_weak.upgrade() else {
                    return glib::ControlFlow::Break;
                };

                let elapsed_ms = ((glib::monotonic_time() - effect.start_us) / 1000).max(0) as u32;
                let position = effect.path.position_at(elapsed_ms);
                effect.canvas.move_(&effect.widget, position.x, position.y);

                if effect.path.is_done(elapsed_ms) {
                    // Clear the source ID since glib removes it on Break
                    effect.fall_timer.borrow_mut().take();
                    if let Some(on_landed) = effect.on_landed.borrow_mut().take() {
                        on_landed();
                    }
                    return glib::ControlFlow::Break;
                }
                glib::ControlFlow::Continue
            },
        );
        *effect.fall_timer.borrow_mut() = Some(source_id);

        let effect_weak = Rc::downgrade(&effect);
        let source_id = glib::timeout_add_local(
            Duration::from_millis(FADE_TICK_MS as u64),
            move || {
                let Some(effect) = effect_weak.upgrade() else {
                    return glib::ControlFlow::Break;
                };

                let mut fade = effect.fade.borrow_mut();
                effect.widget.set_opacity(fade.tick());
                if fade.is_done() {
                    effect.fade_timer.borrow_mut().take();
                    return glib::ControlFlow::Break;
                }
                glib::ControlFlow::Continue
            },
        );
        *effect.fade_timer.borrow_mut() = Some(source_id);

        effect
    }

    /// Stop both timers without firing the landing callback.
    fn cancel(&self) {
        if let Some(source_id) = self.fall_timer.borrow_mut().take() {
            source_id.remove();
        }
        if let Some(source_id) = self.fade_timer.borrow_mut().take() {
            source_id.remove();
        }
        self.on_landed.borrow_mut().take();
    }
}

impl Drop for FallEffect {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Staggered falling exit for the whole tile grid.
pub struct QuitCascade {
    canvas: Fixed,
    floor_y: f64,
    tiles: Vec<(Widget, Vec2)>,
    falls: RefCell<Vec<Rc<FallEffect>>>,
    stagger_timers: RefCell<Vec<Option<SourceId>>>,
    pending: Cell<usize>,
    on_complete: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl QuitCascade {
    /// Begin the cascade for `tiles` on `canvas`. Each tile starts its fall
    /// after its stagger delay; `on_complete` fires once every tile has
    /// dropped past `floor_y`.
    pub fn start(
        canvas: &Fixed,
        tiles: &[Rc<SettingsTile>],
        floor_y: f64,
        on_complete: impl FnOnce() + 'static,
    ) -> Rc<Self> {
        let entries: Vec<(Widget, Vec2)> = tiles
            .iter()
            .map(|tile| {
                let bounds = tile.bounds();
                (
                    tile.widget().clone().upcast(),
                    Vec2::new(bounds.x, bounds.y),
                )
            })
            .collect();

        debug!("QuitCascade: starting for {} tiles", entries.len());

        let cascade = Rc::new(Self {
            canvas: canvas.clone(),
            floor_y,
            tiles: entries,
            falls: RefCell::new(Vec::new()),
            stagger_timers: RefCell::new(Vec::new()),
            pending: Cell::new(tiles.len()),
            on_complete: RefCell::new(Some(Box::new(on_complete))),
        });

        if cascade.tiles.is_empty() {
            // Nothing to animate, but the caller still expects the callback.
            let cascade_weak = Rc::downgrade(&cascade);
            glib::idle_add_local_once(move || {
                if let Some(cascade) = cascade_weak.upgrade() {
                    cascade.finish();
                }
            });
            return cascade;
        }

        let mut timers = Vec::with_capacity(cascade.tiles.len());
        for index in 0..cascade.tiles.len() {
            let cascade_weak = Rc::downgrade(&cascade);
            let source_id = glib::timeout_add_local_once(
                Duration::from_millis(cascade_delay_ms(index)),
                move || {
                    if let Some(cascade) = cascade_weak.upgrade() {
                        // Clear the source ID since it's already been removed by glib
                        cascade.stagger_timers.borrow_mut()[index].take();
                        cascade.begin_fall(index);
                    }
                },
            );
            timers.push(Some(source_id));
        }
        *cascade.stagger_timers.borrow_mut() = timers;

        cascade
    }

    fn begin_fall(self: &Rc<Self>, index: usize) {
        let (widget, origin) = &self.tiles[index];
        let cascade_weak = Rc::downgrade(self);
        let effect = FallEffect::start(&self.canvas, widget, *origin, self.floor_y, move || {
            if let Some(cascade) = cascade_weak.upgrade() {
                cascade.fall_landed();
            }
        });
        self.falls.borrow_mut().push(effect);
    }

    fn fall_landed(&self) {
        let remaining = self.pending.get().saturating_sub(1);
        self.pending.set(remaining);
        if remaining == 0 {
            self.finish();
        }
    }

    fn finish(&self) {
        if let Some(on_complete) = self.on_complete.borrow_mut().take() {
            debug!("QuitCascade: all tiles landed");
            on_complete();
        }
    }

    /// Abort the cascade, leaving tiles wherever they currently are. The
    /// completion callback is dropped without firing.
    pub fn cancel(&self) {
        for source_id in self.stagger_timers.borrow_mut().drain(..).flatten() {
            source_id.remove();
        }
        for effect in self.falls.borrow_mut().drain(..) {
            effect.cancel();
        }
        self.on_complete.borrow_mut().take();
    }
}

impl Drop for QuitCascade {
    fn drop(&mut self) {
        self.cancel();
    }
}
