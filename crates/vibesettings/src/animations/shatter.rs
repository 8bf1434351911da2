//! GTK driver for the tile shatter effect.
//!
//! Hides the clicked tile and scatters its sliced texture across the
//! canvas: one `Picture` per fragment, repositioned every 8ms from the
//! pure timeline in `vibesettings_core::shatter`. When the timeline
//! crosses its cutoff the shards are removed, the source tile comes back,
//! and the completion callback fires exactly once.

use gtk4::glib::{self, SourceId};
use gtk4::prelude::*;
use gtk4::{graphene, gsk, ContentFit, Fixed, Picture, Widget};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};

use vibesettings_core::shatter::{
    spawn_fragments, FragmentFrame, FragmentSpawn, ShatterTimeline, TickStatus, TICK_INTERVAL_MS,
};

use crate::styles::tile;
use crate::widgets::SettingsTile;

/// One shard widget plus its crop dimensions for the center transform.
struct Shard {
    picture: Picture,
    width: i32,
    height: i32,
}

/// A running shatter effect on the menu canvas.
pub struct ShatterEffect {
    canvas: Fixed,
    source: Widget,
    shards: Vec<Shard>,
    timeline: RefCell<ShatterTimeline>,
    timer: RefCell<Option<SourceId>>,
    on_done: RefCell<Option<Box<dyn FnOnce()>>>,
    cleaned: Cell<bool>,
    log_ticks: bool,
}

impl ShatterEffect {
    /// Spawn fragments for `tile`, hide it, and start the 8ms timer.
    ///
    /// A tile without a loaded image (or too small to produce any crop)
    /// still runs the full timeline with zero shards: the tile disappears
    /// and reappears with no particles, and navigation proceeds as usual.
    pub fn start(
        canvas: &Fixed,
        tile: &SettingsTile,
        log_ticks: bool,
        on_done: impl FnOnce() + 'static,
    ) -> Rc<Self> {
        // Build a shard widget per fragment. Spawns whose texture cannot be
        // sliced (image loaded at the wrong size) are dropped from the
        // timeline too, keeping shards and frames aligned by index.
        let mut kept: Vec<FragmentSpawn> = Vec::new();
        let mut shards: Vec<Shard> = Vec::new();
        if let Some(image) = tile.image() {
            for spawn in spawn_fragments(tile.bounds(), &mut rand::thread_rng()) {
                let Some(texture) = image.fragment_texture(spawn.crop) else {
                    continue;
                };

                let picture = Picture::for_paintable(&texture);
                picture.add_css_class(tile::FRAGMENT);
                picture.set_content_fit(ContentFit::Fill);
                picture.set_size_request(spawn.crop.width, spawn.crop.height);
                // Shards fly over other tiles; they must never swallow input
                picture.set_can_target(false);

                canvas.put(&picture, 0.0, 0.0);
                shards.push(Shard {
                    picture,
                    width: spawn.crop.width,
                    height: spawn.crop.height,
                });
                kept.push(spawn);
            }
        }

        if shards.is_empty() {
            debug!("Shatter for '{}' produced no fragments", tile.spec().section);
        } else {
            debug!(
                "Shatter started for '{}' with {} fragments",
                tile.spec().section,
                shards.len()
            );
        }

        let timeline = ShatterTimeline::new(&kept, glib::monotonic_time());

        let source: Widget = tile.widget().clone().upcast();
        source.set_visible(false);

        let effect = Rc::new(Self {
            canvas: canvas.clone(),
            source,
            shards,
            timeline: RefCell::new(timeline),
            timer: RefCell::new(None),
            on_done: RefCell::new(Some(Box::new(on_done))),
            cleaned: Cell::new(false),
            log_ticks,
        });

        // Paint the shards at their spawn positions before the first tick so
        // the tile appears to break in place rather than flicker
        effect.apply_frames();

        let effect_weak = Rc::downgrade(&effect);
        let source_id = glib::timeout_add_local(
            Duration::from_millis(TICK_INTERVAL_MS as u64),
            move || {
                let Some(effect) = effect_weak.upgrade() else {
                    return glib::ControlFlow::Break;
                };

                let status = effect.timeline.borrow_mut().tick(glib::monotonic_time());
                if effect.log_ticks {
                    trace!("Shatter tick: {:?}", status);
                }

                match status {
                    TickStatus::Running => {
                        effect.apply_frames();
                        glib::ControlFlow::Continue
                    }
                    TickStatus::Finished => {
                        // Clear the source ID since glib removes it on Break
                        effect.timer.borrow_mut().take();
                        effect.remove_shards();
                        if let Some(done) = effect.on_done.borrow_mut().take() {
                            done();
                        }
                        glib::ControlFlow::Break
                    }
                }
            },
        );
        *effect.timer.borrow_mut() = Some(source_id);

        effect
    }

    /// Push the current timeline frames into the shard widgets.
    fn apply_frames(&self) {
        let timeline = self.timeline.borrow();
        for (shard, frame) in self.shards.iter().zip(timeline.frames()) {
            let transform = shard_transform(&frame, shard.width, shard.height);
            self.canvas
                .set_child_transform(&shard.picture, Some(&transform));
            shard.picture.set_opacity(frame.alpha);
        }
    }

    /// Remove all shard widgets and bring the source tile back. Safe to
    /// call repeatedly.
    fn remove_shards(&self) {
        if self.cleaned.replace(true) {
            return;
        }
        for shard in &self.shards {
            self.canvas.remove(&shard.picture);
        }
        self.source.set_visible(true);
    }

    /// Stop the effect without firing the completion callback.
    ///
    /// Used when something else takes over the canvas (config rebuild, quit
    /// cascade). Idempotent.
    pub fn cancel(&self) {
        if let Some(source_id) = self.timer.borrow_mut().take() {
            source_id.remove();
        }
        self.remove_shards();
        self.on_done.borrow_mut().take();
    }
}

impl Drop for ShatterEffect {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Transform placing a shard's top-left at `frame.position`, with rotation
/// and scale applied about the shard's own center. On the first frame this
/// lines every shard up exactly with the hidden tile.
fn shard_transform(frame: &FragmentFrame, width: i32, height: i32) -> gsk::Transform {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    gsk::Transform::new()
        .translate(&graphene::Point::new(
            frame.position.x as f32 + half_w,
            frame.position.y as f32 + half_h,
        ))
        .rotate(frame.rotation as f32)
        .scale(frame.scale as f32, frame.scale as f32)
        .translate(&graphene::Point::new(-half_w, -half_h))
}
