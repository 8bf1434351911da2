//! GTK drivers for the hover effects.
//!
//! `HoverBounce` bobs a tile up and down on the canvas while the pointer
//! is over it; `HoverPulse` breathes the power tile's scale instead, so
//! the one destructive tile feels different under the cursor. Both are
//! created once per tile by the grid and restarted on every hover.

use gtk4::glib::{self, SourceId};
use gtk4::prelude::*;
use gtk4::{graphene, gsk, Fixed, Widget};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use vibesettings_core::bounce::{BounceState, PulseState, BOUNCE_TICK_MS};

/// Bobbing position animation for one tile.
pub struct HoverBounce {
    canvas: Fixed,
    widget: Widget,
    state: RefCell<Option<BounceState>>,
    timer: RefCell<Option<SourceId>>,
    base_x: i32,
    base_y: i32,
}

impl HoverBounce {
    pub fn new(canvas: &Fixed, widget: &impl IsA<Widget>, base_x: i32, base_y: i32) -> Rc<Self> {
        Rc::new(Self {
            canvas: canvas.clone(),
            widget: widget.upcast_ref().clone(),
            state: RefCell::new(None),
            timer: RefCell::new(None),
            base_x,
            base_y,
        })
    }

    /// Start bobbing. Does nothing if the bounce is already running, so a
    /// flood of enter events cannot stack timers or shift the rest point.
    pub fn start(self: &Rc<Self>) {
        if self.timer.borrow().is_some() {
            return;
        }

        *self.state.borrow_mut() = Some(BounceState::new(self.base_x, self.base_y));

        let bounce_weak = Rc::downgrade(self);
        let source_id = glib::timeout_add_local(
            Duration::from_millis(BOUNCE_TICK_MS as u64),
            move || {
                let Some(bounce) = bounce_weak.upgrade() else {
                    return glib::ControlFlow::Break;
                };

                let mut state = bounce.state.borrow_mut();
                let Some(state) = state.as_mut() else {
                    return glib::ControlFlow::Break;
                };

                let (x, y) = state.tick();
                bounce.canvas.move_(&bounce.widget, x as f64, y as f64);
                glib::ControlFlow::Continue
            },
        );
        *self.timer.borrow_mut() = Some(source_id);
    }

    /// Stop bobbing and snap the tile back to its exact rest position.
    /// Safe to call when not running.
    pub fn stop(&self) {
        if let Some(source_id) = self.timer.borrow_mut().take() {
            source_id.remove();
        }
        if let Some(state) = self.state.borrow_mut().take() {
            let (x, y) = state.rest_position();
            self.canvas.move_(&self.widget, x as f64, y as f64);
        }
    }
}

impl Drop for HoverBounce {
    fn drop(&mut self) {
        if let Some(source_id) = self.timer.borrow_mut().take() {
            source_id.remove();
        }
    }
}

/// Breathing scale animation for the power tile.
pub struct HoverPulse {
    canvas: Fixed,
    widget: Widget,
    state: RefCell<Option<PulseState>>,
    timer: RefCell<Option<SourceId>>,
    base_x: i32,
    base_y: i32,
    width: i32,
    height: i32,
}

impl HoverPulse {
    pub fn new(
        canvas: &Fixed,
        widget: &impl IsA<Widget>,
        base_x: i32,
        base_y: i32,
        width: i32,
        height: i32,
    ) -> Rc<Self> {
        Rc::new(Self {
            canvas: canvas.clone(),
            widget: widget.upcast_ref().clone(),
            state: RefCell::new(None),
            timer: RefCell::new(None),
            base_x,
            base_y,
            width,
            height,
        })
    }

    /// Start pulsing. Idempotent like `HoverBounce::start`.
    pub fn start(self: &Rc<Self>) {
        if self.timer.borrow().is_some() {
            return;
        }

        *self.state.borrow_mut() = Some(PulseState::new());

        let pulse_weak = Rc::downgrade(self);
        let source_id = glib::timeout_add_local(
            Duration::from_millis(BOUNCE_TICK_MS as u64),
            move || {
                let Some(pulse) = pulse_weak.upgrade() else {
                    return glib::ControlFlow::Break;
                };

                let mut state = pulse.state.borrow_mut();
                let Some(state) = state.as_mut() else {
                    return glib::ControlFlow::Break;
                };

                let scale = state.tick();
                pulse
                    .canvas
                    .set_child_transform(&pulse.widget, Some(&pulse.transform(scale)));
                glib::ControlFlow::Continue
            },
        );
        *self.timer.borrow_mut() = Some(source_id);
    }

    /// Stop pulsing and restore the tile to its unscaled placement.
    pub fn stop(&self) {
        if let Some(source_id) = self.timer.borrow_mut().take() {
            source_id.remove();
        }
        if self.state.borrow_mut().take().is_some() {
            let transform = self.transform(PulseState::rest_scale());
            self.canvas.set_child_transform(&self.widget, Some(&transform));
        }
    }

    /// Scale about the tile center while keeping its canvas placement.
    ///
    /// The canvas positions children through their transform, so the base
    /// translation has to be part of it.
    fn transform(&self, scale: f64) -> gsk::Transform {
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;
        gsk::Transform::new()
            .translate(&graphene::Point::new(
                self.base_x as f32 + half_w,
                self.base_y as f32 + half_h,
            ))
            .scale(scale as f32, scale as f32)
            .translate(&graphene::Point::new(-half_w, -half_h))
    }
}

impl Drop for HoverPulse {
    fn drop(&mut self) {
        if let Some(source_id) = self.timer.borrow_mut().take() {
            source_id.remove();
        }
    }
}
