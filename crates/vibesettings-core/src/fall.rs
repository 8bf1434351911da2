//! Quit cascade math: falling tiles with a separate fade-out ladder.
//!
//! When the power tile is activated, tiles drop off the bottom of the window
//! one after another. Each tile follows an ease-in-quad path to a point below
//! the window while a slower timer steps its opacity down. The drivers live
//! in the shell; everything here is plain state.

use rand::Rng;

use crate::geometry::Vec2;

/// Total fall duration per tile, in milliseconds.
pub const FALL_DURATION_MS: u32 = 1200;
/// Timer period for position updates (~60 Hz).
pub const FALL_TICK_MS: u32 = 16;
/// Timer period for the opacity ladder.
pub const FADE_TICK_MS: u32 = 30;
/// Opacity subtracted per fade tick.
pub const FADE_STEP: f64 = 0.03;
/// Delay between consecutive tiles joining the cascade.
pub const CASCADE_STAGGER_MS: u64 = 150;
/// Horizontal drift range for the fall target, in pixels.
pub const FALL_DRIFT_RANGE: i32 = 100;
/// How far below the window floor tiles aim for.
pub const FLOOR_OVERSHOOT: f64 = 100.0;

/// Quadratic ease-in on a clamped [0, 1] input.
pub fn ease_in_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Pick the fall target for a tile starting at `origin`: a point past the
/// window floor with a random sideways drift.
pub fn fall_target<R: Rng + ?Sized>(origin: Vec2, floor_y: f64, rng: &mut R) -> Vec2 {
    let drift = rng.gen_range(-FALL_DRIFT_RANGE..=FALL_DRIFT_RANGE);
    Vec2::new(origin.x + drift as f64, floor_y + FLOOR_OVERSHOOT)
}

/// An eased path from a tile's position to its fall target.
#[derive(Debug, Clone)]
pub struct FallPath {
    start: Vec2,
    end: Vec2,
    duration_ms: u32,
}

impl FallPath {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            duration_ms: FALL_DURATION_MS,
        }
    }

    /// Position along the path after `elapsed_ms`. Progress clamps to [0, 1],
    /// so overshooting the duration just parks the tile at the target.
    pub fn position_at(&self, elapsed_ms: u32) -> Vec2 {
        let t = f64::from(elapsed_ms) / f64::from(self.duration_ms);
        let eased = ease_in_quad(t);
        self.start + (self.end - self.start) * eased
    }

    pub fn is_done(&self, elapsed_ms: u32) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

/// Stepwise opacity fade, floored at fully transparent.
#[derive(Debug, Clone)]
pub struct FadeOut {
    opacity: f64,
}

impl FadeOut {
    pub fn new() -> Self {
        Self { opacity: 1.0 }
    }

    /// Step the opacity down and return the new value.
    pub fn tick(&mut self) -> f64 {
        self.opacity = (self.opacity - FADE_STEP).max(0.0);
        self.opacity
    }

    pub fn is_done(&self) -> bool {
        self.opacity <= 0.0
    }
}

impl Default for FadeOut {
    fn default() -> Self {
        Self::new()
    }
}

/// Start delay for the tile at `index` in the cascade.
pub fn cascade_delay_ms(index: usize) -> u64 {
    index as u64 * CASCADE_STAGGER_MS
}
