//! Randomized sweeps over the shatter math.
//!
//! The inline tests in `shatter.rs` pin exact values for single seeds;
//! these run wider seed ranges across assorted tile geometries to check
//! the properties that must hold for every spawn.

use rand::rngs::StdRng;
use rand::SeedableRng;
use vibesettings_core::geometry::Rect;
use vibesettings_core::shatter::{
    spawn_fragments, ShatterTimeline, TickStatus, DURATION_SECS, MAX_FRAGMENTS, TICK_INTERVAL_MS,
};

/// Tile geometries the built-in sets actually use, plus degenerate ones.
fn tile_geometries() -> Vec<Rect> {
    vec![
        Rect::new(20.0, 20.0, 220.0, 220.0),
        Rect::new(740.0, 20.0, 220.0, 460.0),
        Rect::new(500.0, 500.0, 460.0, 220.0),
        Rect::new(100.0, 100.0, 120.0, 260.0),
        Rect::new(0.0, 0.0, 64.0, 64.0),
        Rect::new(5.0, 5.0, 9.0, 9.0),
        Rect::new(0.0, 0.0, 3.0, 3.0),
        Rect::new(0.0, 0.0, 1.0, 1.0),
    ]
}

#[test]
fn fragment_count_never_exceeds_grid() {
    for bounds in tile_geometries() {
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let spawns = spawn_fragments(bounds, &mut rng);
            assert!(
                spawns.len() <= MAX_FRAGMENTS,
                "seed {} on {:?} produced {} fragments",
                seed,
                bounds,
                spawns.len()
            );
        }
    }
}

#[test]
fn crops_stay_inside_tile_for_every_seed() {
    for bounds in tile_geometries() {
        let w = bounds.width as i32;
        let h = bounds.height as i32;
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            for spawn in spawn_fragments(bounds, &mut rng) {
                let crop = spawn.crop;
                assert!(crop.x >= 0 && crop.y >= 0, "seed {}: {:?}", seed, crop);
                assert!(crop.width >= 1 && crop.height >= 1, "seed {}: {:?}", seed, crop);
                assert!(
                    crop.x + crop.width <= w && crop.y + crop.height <= h,
                    "seed {} on {:?}: crop {:?} leaves the tile",
                    seed,
                    bounds,
                    crop
                );
            }
        }
    }
}

#[test]
fn spawn_values_are_always_finite() {
    for bounds in tile_geometries() {
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            for spawn in spawn_fragments(bounds, &mut rng) {
                assert!(spawn.position.x.is_finite() && spawn.position.y.is_finite());
                assert!(spawn.velocity.x.is_finite() && spawn.velocity.y.is_finite());
                assert!(spawn.rotation_speed.is_finite());
                assert!(spawn.gravity.is_finite());
            }
        }
    }
}

#[test]
fn timeline_finishes_within_expected_ticks() {
    // Ticks 1..=31 stay at or under the 250ms cutoff (248ms at tick 31);
    // tick 32 lands at 256ms and must finish the effect.
    let max_ticks: i64 = 32;
    assert!(DURATION_SECS * 1000.0 / TICK_INTERVAL_MS as f64 > (max_ticks - 1) as f64);

    for bounds in tile_geometries() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let spawns = spawn_fragments(bounds, &mut rng);
            let mut timeline = ShatterTimeline::new(&spawns, 0);

            let mut ticks = 0;
            loop {
                ticks += 1;
                let now_us = ticks * TICK_INTERVAL_MS as i64 * 1000;
                if timeline.tick(now_us) == TickStatus::Finished {
                    break;
                }
                assert!(ticks <= max_ticks, "seed {} never finished", seed);
            }
            assert_eq!(ticks, max_ticks, "seed {} finished early or late", seed);
        }
    }
}

#[test]
fn frames_fade_and_shrink_monotonically() {
    let bounds = Rect::new(20.0, 20.0, 220.0, 220.0);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let spawns = spawn_fragments(bounds, &mut rng);
        let mut timeline = ShatterTimeline::new(&spawns, 0);

        let mut last_alpha = f64::INFINITY;
        let mut last_scale = f64::INFINITY;
        let mut now_us = 0i64;
        loop {
            now_us += TICK_INTERVAL_MS as i64 * 1000;
            if timeline.tick(now_us) == TickStatus::Finished {
                break;
            }
            let frame = timeline
                .frames()
                .next()
                .expect("running timeline yields frames");
            assert!(frame.alpha <= last_alpha, "alpha rose at {}us", now_us);
            assert!(frame.scale <= last_scale, "scale rose at {}us", now_us);
            assert!((0.0..=1.0).contains(&frame.alpha));
            assert!((0.8..=1.0).contains(&frame.scale));
            assert!(frame.position.x.is_finite() && frame.position.y.is_finite());
            assert!(frame.rotation.is_finite());
            last_alpha = frame.alpha;
            last_scale = frame.scale;
        }
    }
}

#[test]
fn fragments_spread_in_different_directions() {
    // A shatter that flings every shard the same way reads as a glitch.
    // With a full grid the outward directions must disagree.
    let bounds = Rect::new(20.0, 20.0, 220.0, 220.0);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let spawns = spawn_fragments(bounds, &mut rng);
        assert_eq!(spawns.len(), MAX_FRAGMENTS);

        let leftward = spawns.iter().filter(|s| s.velocity.x < 0.0).count();
        let rightward = spawns.iter().filter(|s| s.velocity.x > 0.0).count();
        assert!(
            leftward >= 2 && rightward >= 2,
            "seed {}: {} left / {} right",
            seed,
            leftward,
            rightward
        );
    }
}
