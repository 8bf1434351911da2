//! Hover animations: the vertical tile bob and the image scale pulse.
//!
//! Both are triangle waves driven by a ~60 Hz timer in the shell. State here
//! is pure so the wave shape and the exact rest-position restore can be unit
//! tested without a main loop.

/// Timer period for hover animations (~60 Hz).
pub const BOUNCE_TICK_MS: u32 = 16;
/// Vertical displacement added per tick, in pixels.
pub const BOUNCE_STEP: f64 = 0.7;
/// The wave reverses once the offset magnitude exceeds this, in pixels.
pub const BOUNCE_LIMIT: f64 = 8.0;

/// Scale delta added per tick for the image pulse variant.
pub const PULSE_STEP: f64 = 0.004;
/// The pulse reverses once the scale offset magnitude exceeds this.
pub const PULSE_LIMIT: f64 = 0.05;

/// Triangle-wave vertical bob for a hovered tile.
///
/// Captures the tile's resting position at creation; every tick nudges the
/// offset and reports the position to move the tile to. Stopping the bounce
/// must move the tile back to exactly [`BounceState::rest_position`].
#[derive(Debug, Clone)]
pub struct BounceState {
    base_x: i32,
    base_y: i32,
    offset: f64,
    direction: f64,
}

impl BounceState {
    pub fn new(base_x: i32, base_y: i32) -> Self {
        Self {
            base_x,
            base_y,
            offset: 0.0,
            direction: 1.0,
        }
    }

    /// Advance one tick and return the position the tile should move to.
    ///
    /// The direction flips after the offset passes the limit, so the peak
    /// overshoot is at most one step beyond [`BOUNCE_LIMIT`].
    pub fn tick(&mut self) -> (i32, i32) {
        self.offset += self.direction * BOUNCE_STEP;
        if self.offset.abs() > BOUNCE_LIMIT {
            self.direction = -self.direction;
        }
        (self.base_x, self.base_y + self.offset.round() as i32)
    }

    /// The exact pre-bounce position, for the snap-back on hover-leave.
    pub fn rest_position(&self) -> (i32, i32) {
        (self.base_x, self.base_y)
    }
}

/// Triangle-wave scale pulse for image-only tiles.
///
/// Same wave shape as [`BounceState`] but applied as a uniform scale factor
/// around 1.0 instead of a positional offset.
#[derive(Debug, Clone)]
pub struct PulseState {
    offset: f64,
    direction: f64,
}

impl PulseState {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            direction: 1.0,
        }
    }

    /// Advance one tick and return the scale factor to apply.
    pub fn tick(&mut self) -> f64 {
        self.offset += self.direction * PULSE_STEP;
        if self.offset.abs() > PULSE_LIMIT {
            self.direction = -self.direction;
        }
        1.0 + self.offset
    }

    /// The resting scale, restored when the hover ends.
    pub fn rest_scale() -> f64 {
        1.0
    }
}

impl Default for PulseState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounce_moves_up_then_down() {
        let mut state = BounceState::new(100, 200);

        let (x, y) = state.tick();
        assert_eq!(x, 100);
        assert_eq!(y, 201); // 0.7 rounds to 1

        let (_, y2) = state.tick();
        assert_eq!(y2, 201); // 1.4 still rounds to 1

        let (_, y3) = state.tick();
        assert_eq!(y3, 202); // 2.1
    }

    #[test]
    fn test_bounce_offset_stays_within_limit_plus_step() {
        let mut state = BounceState::new(0, 0);
        for _ in 0..500 {
            let (_, y) = state.tick();
            assert!(
                y.abs() as f64 <= BOUNCE_LIMIT + BOUNCE_STEP + 0.5,
                "offset escaped: {}",
                y
            );
        }
    }

    #[test]
    fn test_bounce_direction_flips_past_limit() {
        let mut state = BounceState::new(0, 0);

        // 12 ticks climb to 8.4, past the 8.0 limit, flipping the direction.
        let mut peak = 0;
        for _ in 0..12 {
            let (_, y) = state.tick();
            peak = peak.max(y);
        }
        assert_eq!(peak, 8);

        // The next tick must come back down.
        let (_, after_flip) = state.tick();
        assert!(after_flip < peak + 1);
        let mut lowest = after_flip;
        for _ in 0..24 {
            let (_, y) = state.tick();
            lowest = lowest.min(y);
        }
        assert!(lowest < 0, "wave never crossed below the baseline");
    }

    #[test]
    fn test_rest_position_is_exact_regardless_of_phase() {
        let mut state = BounceState::new(260, 500);
        for ticks in [1, 5, 11, 23, 67] {
            for _ in 0..ticks {
                state.tick();
            }
            assert_eq!(state.rest_position(), (260, 500));
        }
    }

    #[test]
    fn test_pulse_wave_bounds() {
        let mut pulse = PulseState::new();
        for _ in 0..1000 {
            let scale = pulse.tick();
            assert!(scale >= 1.0 - PULSE_LIMIT - PULSE_STEP);
            assert!(scale <= 1.0 + PULSE_LIMIT + PULSE_STEP);
        }
    }

    #[test]
    fn test_pulse_rest_scale() {
        assert_eq!(PulseState::rest_scale(), 1.0);
    }
}
