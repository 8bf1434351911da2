//! Glass shatter effect: fragment generation, physics stepping, timeline.
//!
//! A clicked tile's image is sliced into an irregular 5x4 grid of fragments.
//! Each fragment gets an outward radial velocity, spin, and its own gravity,
//! then falls and fades over a fixed 250 ms window. Everything in this module
//! is pure state math; the shell drives it from a periodic timer and applies
//! the resulting frames to widgets.
//!
//! Randomness is injected through [`rand::Rng`] so tests can run against a
//! seeded generator. Visual variety is intentional; nothing here promises
//! reproducibility across runs.

use rand::Rng;

use crate::geometry::{IntRect, Rect, Vec2, clamp_crop};

/// Fragment grid columns. Fixed by design, not configurable.
pub const GRID_COLS: usize = 5;
/// Fragment grid rows. Fixed by design, not configurable.
pub const GRID_ROWS: usize = 4;
/// Upper bound on fragments per effect.
pub const MAX_FRAGMENTS: usize = GRID_COLS * GRID_ROWS;

/// Timer period driving the effect (~120 Hz).
pub const TICK_INTERVAL_MS: u32 = 8;
/// Fixed integration step in seconds. Physics advances by this amount per
/// tick regardless of wall time; the monotonic clock only decides
/// termination and fade progress.
pub const DELTA_TIME: f64 = 0.008;
/// Total effect duration in seconds. A tick with `elapsed > DURATION_SECS`
/// terminates the effect.
pub const DURATION_SECS: f64 = 0.25;

/// Per-cell size multiplier range applied to the nominal cell dimensions.
const SIZE_MULT_MIN: f64 = 0.7;
const SIZE_MULT_MAX: f64 = 1.3;
/// Crop origin jitter in pixels, per axis.
const CROP_JITTER_PX: i32 = 10;
/// Base outward force plus per-pixel-of-distance gain.
const BASE_FORCE: f64 = 400.0;
const FORCE_PER_PX: f64 = 5.0;
/// Velocity jitter is a uniform draw in +-VELOCITY_RAND_RANGE scaled down.
const VELOCITY_RAND_RANGE: f64 = 500.0;
const VELOCITY_JITTER_SCALE: f64 = 0.3;
/// Scale applied to the raw random draw when a fragment sits exactly at the
/// tile center. The result is deliberately not normalized.
const FALLBACK_DIRECTION_SCALE: f64 = 0.01;
/// Constant upward bias added to every fragment's initial Y velocity.
const UPWARD_BIAS: f64 = -100.0;
/// Rotation speed range in degrees/second before distance scaling.
const ROTATION_SPEED_MAX: f64 = 15.0;
/// Fragments further from the center spin faster by this factor per pixel.
const ROTATION_DISTANCE_GAIN: f64 = 0.02;
/// Per-fragment gravity range in px/s^2.
const GRAVITY_MIN: f64 = 800.0;
const GRAVITY_MAX: f64 = 1200.0;
/// Anisotropic per-tick air resistance.
const DRAG_X: f64 = 0.995;
const DRAG_Y: f64 = 0.998;
/// Fragments shrink up to 20%, floored at 80% of their size.
const SCALE_SHRINK: f64 = 0.2;
const SCALE_FLOOR: f64 = 0.8;

/// Immutable creation-time parameters for one fragment.
///
/// `crop` is in scaled-source-image space (the source is scaled to exactly
/// the tile's size before slicing); `position` is in parent-container space.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSpawn {
    pub crop: IntRect,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees per second, constant for the fragment's lifetime.
    pub rotation_speed: f64,
    /// Downward acceleration in px/s^2, constant for the fragment's lifetime.
    pub gravity: f64,
}

/// Mutable per-tick state of one fragment.
#[derive(Debug, Clone)]
struct FragmentState {
    position: Vec2,
    velocity: Vec2,
    rotation: f64,
    rotation_speed: f64,
    gravity: f64,
}

impl FragmentState {
    fn from_spawn(spawn: &FragmentSpawn) -> Self {
        Self {
            position: spawn.position,
            velocity: spawn.velocity,
            rotation: 0.0,
            rotation_speed: spawn.rotation_speed,
            gravity: spawn.gravity,
        }
    }

    /// One fixed-step integration: gravity, drag, position, rotation.
    fn integrate(&mut self) {
        self.velocity.y += self.gravity * DELTA_TIME;
        self.velocity.x *= DRAG_X;
        self.velocity.y *= DRAG_Y;
        self.position.x += self.velocity.x * DELTA_TIME;
        self.position.y += self.velocity.y * DELTA_TIME;
        self.rotation += self.rotation_speed * DELTA_TIME;
    }
}

/// Render snapshot for one fragment after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentFrame {
    pub position: Vec2,
    /// Current rotation in degrees.
    pub rotation: f64,
    /// Opacity in [0, 1]; also applied to the fragment's border glow.
    pub alpha: f64,
    /// Uniform size factor in [0.8, 1.0].
    pub scale: f64,
}

/// Continue/stop signal returned by [`ShatterTimeline::tick`]. The shell maps
/// this onto the timer scheduler's control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Finished,
}

/// Generate fragment spawns for a tile occupying `bounds`.
///
/// Partitions the tile into a 5x4 grid; each cell gets a randomized size and
/// a jittered crop origin, clamped into the tile. Cells whose clamped crop
/// degenerates to zero area produce no fragment, so the result holds at most
/// [`MAX_FRAGMENTS`] entries.
pub fn spawn_fragments<R: Rng + ?Sized>(bounds: Rect, rng: &mut R) -> Vec<FragmentSpawn> {
    let tile_w = bounds.width as i32;
    let tile_h = bounds.height as i32;
    let base_w = bounds.width / GRID_COLS as f64;
    let base_h = bounds.height / GRID_ROWS as f64;
    let tile_center = bounds.center();

    let mut spawns = Vec::with_capacity(MAX_FRAGMENTS);

    for col in 0..GRID_COLS {
        for row in 0..GRID_ROWS {
            let size_mult = rng.gen_range(SIZE_MULT_MIN..=SIZE_MULT_MAX);
            let frag_w = (base_w * size_mult) as i32;
            let frag_h = (base_h * size_mult) as i32;

            let nominal = IntRect::new(
                (col as f64 * base_w) as i32 + rng.gen_range(-CROP_JITTER_PX..=CROP_JITTER_PX),
                (row as f64 * base_h) as i32 + rng.gen_range(-CROP_JITTER_PX..=CROP_JITTER_PX),
                frag_w,
                frag_h,
            );

            let crop = clamp_crop(nominal, tile_w, tile_h);
            if crop.is_empty() {
                continue;
            }

            let position = Vec2::new(bounds.x + crop.x as f64, bounds.y + crop.y as f64);
            let frag_center = Vec2::new(
                position.x + crop.width as f64 / 2.0,
                position.y + crop.height as f64 / 2.0,
            );

            let distance = (frag_center - tile_center).length();
            let velocity = explosion_velocity(tile_center, frag_center, rng);

            let rotation_speed = rng.gen_range(-ROTATION_SPEED_MAX..=ROTATION_SPEED_MAX)
                * (1.0 + distance * ROTATION_DISTANCE_GAIN);
            let gravity = rng.gen_range(GRAVITY_MIN..=GRAVITY_MAX);

            spawns.push(FragmentSpawn {
                crop,
                position,
                velocity,
                rotation_speed,
                gravity,
            });
        }
    }

    spawns
}

/// Outward force for a fragment at `distance` pixels from the tile center.
fn explosion_force(distance: f64) -> f64 {
    BASE_FORCE + distance * FORCE_PER_PX
}

/// Initial velocity for a fragment: radial direction times force, plus
/// per-axis jitter and a constant upward bias.
///
/// A fragment sitting exactly at the tile center has no radial direction;
/// it falls back to small scaled random components, left un-normalized.
fn explosion_velocity<R: Rng + ?Sized>(
    tile_center: Vec2,
    frag_center: Vec2,
    rng: &mut R,
) -> Vec2 {
    let delta = frag_center - tile_center;
    let distance = delta.length();

    let direction = match delta.normalized() {
        Some(unit) => unit,
        None => Vec2::new(
            rng.gen_range(-VELOCITY_RAND_RANGE..=VELOCITY_RAND_RANGE) * FALLBACK_DIRECTION_SCALE,
            rng.gen_range(-VELOCITY_RAND_RANGE..=VELOCITY_RAND_RANGE) * FALLBACK_DIRECTION_SCALE,
        ),
    };

    let force = explosion_force(distance);
    let jitter_x =
        rng.gen_range(-VELOCITY_RAND_RANGE..=VELOCITY_RAND_RANGE) * VELOCITY_JITTER_SCALE;
    let jitter_y =
        rng.gen_range(-VELOCITY_RAND_RANGE..=VELOCITY_RAND_RANGE) * VELOCITY_JITTER_SCALE;

    Vec2::new(
        direction.x * force + jitter_x,
        direction.y * force + jitter_y + UPWARD_BIAS,
    )
}

/// The running state of one shatter effect.
///
/// Owns every fragment for the effect's lifetime; fragments never outlive
/// their timeline. One instance exists per effect, mutated only from the
/// single UI-thread timer callback.
#[derive(Debug)]
pub struct ShatterTimeline {
    fragments: Vec<FragmentState>,
    start_us: i64,
    alpha: f64,
    scale: f64,
}

impl ShatterTimeline {
    /// Build a timeline from spawns and the effect's start timestamp
    /// (monotonic microseconds).
    pub fn new(spawns: &[FragmentSpawn], start_us: i64) -> Self {
        Self {
            fragments: spawns.iter().map(FragmentState::from_spawn).collect(),
            start_us,
            alpha: 1.0,
            scale: 1.0,
        }
    }

    /// Advance one tick at monotonic time `now_us`.
    ///
    /// Returns [`TickStatus::Finished`] once `elapsed > DURATION_SECS`,
    /// leaving fragment state untouched from then on (further calls keep
    /// returning `Finished`). Otherwise integrates every fragment by the
    /// fixed step and refreshes the frame-wide alpha/scale from elapsed
    /// time.
    pub fn tick(&mut self, now_us: i64) -> TickStatus {
        let elapsed = (now_us - self.start_us) as f64 / 1_000_000.0;
        if elapsed > DURATION_SECS {
            return TickStatus::Finished;
        }

        for fragment in &mut self.fragments {
            fragment.integrate();
        }

        let progress = elapsed / DURATION_SECS;
        self.alpha = (1.0 - progress * progress).max(0.0);
        self.scale = (1.0 - progress * SCALE_SHRINK).max(SCALE_FLOOR);

        TickStatus::Running
    }

    /// Render snapshot for every fragment, in spawn order.
    pub fn frames(&self) -> impl Iterator<Item = FragmentFrame> + '_ {
        self.fragments.iter().map(|f| FragmentFrame {
            position: f.position,
            rotation: f.rotation,
            alpha: self.alpha,
            scale: self.scale,
        })
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    const REFERENCE_TILE: Rect = Rect {
        x: 100.0,
        y: 100.0,
        width: 120.0,
        height: 260.0,
    };

    #[test]
    fn test_fragment_count_never_exceeds_grid() {
        for seed in 0..100 {
            let spawns = spawn_fragments(REFERENCE_TILE, &mut rng(seed));
            assert!(
                spawns.len() <= MAX_FRAGMENTS,
                "seed {} produced {} fragments",
                seed,
                spawns.len()
            );
        }
    }

    #[test]
    fn test_regular_tile_fills_the_grid() {
        // A 220x220 tile has 44x55 base cells; even the smallest multiplier
        // leaves every clamped crop non-empty, so all 20 cells survive.
        let bounds = Rect::new(20.0, 20.0, 220.0, 220.0);
        for seed in 0..100 {
            let spawns = spawn_fragments(bounds, &mut rng(seed));
            assert_eq!(spawns.len(), MAX_FRAGMENTS, "seed {}", seed);
        }
    }

    #[test]
    fn test_crops_stay_in_bounds_for_every_seed() {
        let tiles = [
            Rect::new(0.0, 0.0, 220.0, 220.0),
            REFERENCE_TILE,
            Rect::new(5.0, 7.0, 33.0, 41.0),
            Rect::new(740.0, 20.0, 220.0, 460.0),
        ];
        for tile in tiles {
            let w = tile.width as i32;
            let h = tile.height as i32;
            for seed in 0..200 {
                for spawn in spawn_fragments(tile, &mut rng(seed)) {
                    let c = spawn.crop;
                    assert!(c.x >= 0 && c.y >= 0, "seed {} crop {:?}", seed, c);
                    assert!(c.x + c.width <= w, "seed {} crop {:?}", seed, c);
                    assert!(c.y + c.height <= h, "seed {} crop {:?}", seed, c);
                    assert!(!c.is_empty(), "seed {} crop {:?}", seed, c);
                }
            }
        }
    }

    #[test]
    fn test_tiny_tile_produces_no_fragments() {
        // 3x3 tile: cell bases under one pixel truncate to zero-size crops,
        // so every cell is skipped and the effect degrades to nothing.
        let spawns = spawn_fragments(Rect::new(0.0, 0.0, 3.0, 3.0), &mut rng(1));
        assert!(spawns.is_empty());
    }

    #[test]
    fn test_spawns_are_deterministic_per_seed() {
        let a = spawn_fragments(REFERENCE_TILE, &mut rng(42));
        let b = spawn_fragments(REFERENCE_TILE, &mut rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_spawn_parameters_within_ranges() {
        for seed in 0..50 {
            for spawn in spawn_fragments(REFERENCE_TILE, &mut rng(seed)) {
                assert!((GRAVITY_MIN..=GRAVITY_MAX).contains(&spawn.gravity));

                let frag_center = Vec2::new(
                    spawn.position.x + spawn.crop.width as f64 / 2.0,
                    spawn.position.y + spawn.crop.height as f64 / 2.0,
                );
                let distance = (frag_center - REFERENCE_TILE.center()).length();
                let max_spin = ROTATION_SPEED_MAX * (1.0 + distance * ROTATION_DISTANCE_GAIN);
                assert!(
                    spawn.rotation_speed.abs() <= max_spin,
                    "seed {} spin {} exceeds {}",
                    seed,
                    spawn.rotation_speed,
                    max_spin
                );
            }
        }
    }

    #[test]
    fn test_explosion_force_grows_with_distance() {
        assert_eq!(explosion_force(0.0), 400.0);
        assert_eq!(explosion_force(10.0), 450.0);
        assert!(explosion_force(155.0) > explosion_force(20.0));
    }

    #[test]
    fn test_center_fragment_gets_fallback_direction() {
        // Fragment center exactly on the tile center (160, 230): the radial
        // direction has zero length, so the fallback path must produce a
        // finite velocity with no NaN components.
        let center = REFERENCE_TILE.center();
        assert_eq!(center, Vec2::new(160.0, 230.0));

        for seed in 0..100 {
            let v = explosion_velocity(center, center, &mut rng(seed));
            assert!(v.x.is_finite() && v.y.is_finite(), "seed {} -> {:?}", seed, v);
            assert!(!v.x.is_nan() && !v.y.is_nan());
        }
    }

    #[test]
    fn test_all_velocities_finite_for_every_seed() {
        for seed in 0..200 {
            for spawn in spawn_fragments(REFERENCE_TILE, &mut rng(seed)) {
                assert!(spawn.velocity.x.is_finite());
                assert!(spawn.velocity.y.is_finite());
            }
        }
    }

    fn timeline_at_origin(seed: u64) -> ShatterTimeline {
        let spawns = spawn_fragments(REFERENCE_TILE, &mut rng(seed));
        ShatterTimeline::new(&spawns, 0)
    }

    #[test]
    fn test_termination_boundary() {
        // elapsed == 0.24999 continues; 0.25001 stops. A tick at exactly
        // 0.25 still animates (the stop condition is strictly greater-than).
        let mut timeline = timeline_at_origin(7);
        assert_eq!(timeline.tick(249_990), TickStatus::Running);
        assert_eq!(timeline.tick(250_000), TickStatus::Running);
        assert_eq!(timeline.tick(250_010), TickStatus::Finished);
    }

    #[test]
    fn test_finished_is_sticky() {
        let mut timeline = timeline_at_origin(7);
        assert_eq!(timeline.tick(260_000), TickStatus::Finished);
        assert_eq!(timeline.tick(270_000), TickStatus::Finished);
    }

    #[test]
    fn test_alpha_monotone_bounded_and_zero_at_end() {
        let mut timeline = timeline_at_origin(3);
        let mut last_alpha = 1.0;
        for i in 0..=31 {
            let now = i * i64::from(TICK_INTERVAL_MS) * 1000;
            assert_eq!(timeline.tick(now), TickStatus::Running);
            let alpha = timeline.frames().next().map(|f| f.alpha).unwrap_or(1.0);
            assert!((0.0..=1.0).contains(&alpha), "tick {} alpha {}", i, alpha);
            assert!(alpha <= last_alpha, "alpha rose at tick {}", i);
            last_alpha = alpha;
        }

        // Exactly at the duration bound, fade progress is 1 and alpha is 0.
        let mut at_end = timeline_at_origin(3);
        assert_eq!(at_end.tick(250_000), TickStatus::Running);
        let alpha = at_end.frames().next().map(|f| f.alpha).unwrap();
        assert_eq!(alpha, 0.0);
    }

    #[test]
    fn test_scale_monotone_within_floor() {
        let mut timeline = timeline_at_origin(3);
        let mut last_scale = 1.0;
        for i in 0..=31 {
            let now = i * i64::from(TICK_INTERVAL_MS) * 1000;
            timeline.tick(now);
            let scale = timeline.frames().next().map(|f| f.scale).unwrap();
            assert!((0.8..=1.0).contains(&scale), "tick {} scale {}", i, scale);
            assert!(scale <= last_scale, "scale rose at tick {}", i);
            last_scale = scale;
        }

        let mut at_end = timeline_at_origin(3);
        at_end.tick(250_000);
        let scale = at_end.frames().next().map(|f| f.scale).unwrap();
        assert_eq!(scale, 0.8);
    }

    #[test]
    fn test_integration_single_fragment() {
        let spawn = FragmentSpawn {
            crop: IntRect::new(0, 0, 10, 10),
            position: Vec2::new(50.0, 50.0),
            velocity: Vec2::new(100.0, 0.0),
            rotation_speed: 10.0,
            gravity: 1000.0,
        };
        let mut timeline = ShatterTimeline::new(&[spawn], 0);
        assert_eq!(timeline.tick(8_000), TickStatus::Running);

        let frame = timeline.frames().next().unwrap();
        // vy: (0 + 1000 * 0.008) * 0.998 = 7.984, vx: 100 * 0.995 = 99.5
        let expected_x = 50.0 + 99.5 * DELTA_TIME;
        let expected_y = 50.0 + 7.984 * DELTA_TIME;
        assert!((frame.position.x - expected_x).abs() < 1e-9);
        assert!((frame.position.y - expected_y).abs() < 1e-9);
        assert!((frame.rotation - 10.0 * DELTA_TIME).abs() < 1e-12);
    }

    #[test]
    fn test_thirty_two_ticks_reach_termination() {
        // 32 ticks at 8 ms span 256 ms; the timer must be told to stop no
        // later than the 32nd tick.
        let mut timeline = timeline_at_origin(11);
        let mut finished_at = None;
        for i in 1..=32 {
            let now = i * i64::from(TICK_INTERVAL_MS) * 1000;
            if timeline.tick(now) == TickStatus::Finished {
                finished_at = Some(i);
                break;
            }
        }
        assert_eq!(finished_at, Some(32));
    }

    #[test]
    fn test_zero_fragment_timeline_still_terminates() {
        // Image load failure degrades to zero fragments; the timeline still
        // runs its course so cleanup happens on schedule.
        let mut timeline = ShatterTimeline::new(&[], 0);
        assert!(timeline.is_empty());
        assert_eq!(timeline.tick(8_000), TickStatus::Running);
        assert_eq!(timeline.tick(250_010), TickStatus::Finished);
    }

    #[test]
    fn test_fixed_step_is_independent_of_tick_spacing() {
        // Positions depend only on the number of ticks taken, never on the
        // wall-time gaps between them.
        let spawns = spawn_fragments(REFERENCE_TILE, &mut rng(9));
        let mut fast = ShatterTimeline::new(&spawns, 0);
        let mut slow = ShatterTimeline::new(&spawns, 0);

        for i in 1..=10 {
            fast.tick(i * 8_000);
            slow.tick(i * 20_000);
        }

        for (a, b) in fast.frames().zip(slow.frames()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.rotation, b.rotation);
        }
    }
}
