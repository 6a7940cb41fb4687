//! Procedural track generation
//!
//! Segments scroll left each tick; anything whose right edge passes x = 0 is
//! dropped and new segments are appended on the right until the visible window
//! is covered again. A small share of spawns open a gap escorted by a gem or
//! step the brick level up or down once the score is high enough.

use glam::Vec2;
use rand::Rng;

use super::state::{BrickLevel, Gem, GemId, Segment, SegmentId};
use crate::tuning::Tuning;

/// What the current tick knows about the run, for difficulty gating
#[derive(Debug, Clone, Copy)]
pub struct TrackContext<'a> {
    pub tuning: &'a Tuning,
    pub score: u64,
    pub scroll_speed: f32,
    pub skater_height: f32,
}

/// Entities added or dropped by one [`TrackGenerator::advance`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackDelta {
    pub removed_segments: Vec<SegmentId>,
    pub spawned_gems: Vec<GemId>,
    pub removed_gems: Vec<GemId>,
}

/// How the next segment is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPlan {
    /// Directly after the previous segment
    Plain,
    /// Pushed right by a gap with a gem above it
    Gap,
    /// Plain, and later segments switch brick level
    Step,
}

/// Map a generation roll to a placement, gated by score
pub fn plan_spawn(roll: u32, score: u64, tuning: &Tuning) -> SpawnPlan {
    if roll < tuning.gap_roll_threshold && score > tuning.gem_unlock_score {
        SpawnPlan::Gap
    } else if roll < tuning.level_roll_threshold && score > tuning.level_toggle_score {
        SpawnPlan::Step
    } else {
        SpawnPlan::Plain
    }
}

/// Highest top among segments spanning `x`, widened by `tolerance` on each side
pub fn support_near(segments: &[Segment], x: f32, tolerance: f32) -> Option<f32> {
    segments
        .iter()
        .filter(|seg| seg.left() - tolerance <= x && x <= seg.right() + tolerance)
        .map(Segment::top)
        .reduce(f32::max)
}

/// Owns the live segments and gems
#[derive(Debug, Clone, Default)]
pub struct TrackGenerator {
    /// Live segments, in spawn (left to right) order
    segments: Vec<Segment>,
    /// Live gems, in spawn order
    gems: Vec<Gem>,
    brick_level: BrickLevel,
    next_id: u32,
}

impl TrackGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entity and return to the low brick level
    pub fn reset(&mut self) {
        self.segments.clear();
        self.gems.clear();
        self.brick_level = BrickLevel::Low;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn gems(&self) -> &[Gem] {
        &self.gems
    }

    pub fn brick_level(&self) -> BrickLevel {
        self.brick_level
    }

    /// Rightmost segment edge, `None` while the track is empty
    pub fn farthest_right_edge(&self) -> Option<f32> {
        self.segments.iter().map(Segment::right).reduce(f32::max)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Scroll everything left by `scroll`, cull off-screen entities and refill
    /// the visible window.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        scroll: f32,
        ctx: &TrackContext<'_>,
        rng: &mut R,
    ) -> TrackDelta {
        let mut delta = TrackDelta::default();

        // Existing gems first, so gems spawned below land exactly over their gap
        for gem in &mut self.gems {
            gem.pos.x -= scroll;
        }
        let removed_gems = &mut delta.removed_gems;
        self.gems.retain(|gem| {
            let live = gem.right() >= 0.0;
            if !live {
                removed_gems.push(gem.id);
            }
            live
        });

        for seg in &mut self.segments {
            seg.pos.x -= scroll;
        }
        let removed_segments = &mut delta.removed_segments;
        self.segments.retain(|seg| {
            let live = seg.right() >= 0.0;
            if !live {
                removed_segments.push(seg.id);
            }
            live
        });

        self.fill_window(ctx, rng, &mut delta);

        log::trace!(
            "Track scrolled {:.2}: {} segments, {} gems",
            scroll,
            self.segments.len(),
            self.gems.len()
        );
        delta
    }

    /// Append segments until the rightmost edge reaches the visible width
    fn fill_window<R: Rng + ?Sized>(
        &mut self,
        ctx: &TrackContext<'_>,
        rng: &mut R,
        delta: &mut TrackDelta,
    ) {
        let tuning = ctx.tuning;
        let mut farthest = self.farthest_right_edge();
        let mut farthest_top = self.segments.last().map(Segment::top);

        while farthest.is_none_or(|edge| edge < tuning.visible_width) {
            let size = tuning.segment_size;
            let level = self.brick_level;
            let y = size.y / 2.0 + level.elevation(tuning.high_level_elevation);
            let mut left = farthest.map_or(0.0, |edge| edge + tuning.segment_seam);

            // The very first segment is always placed plainly
            if farthest.is_some() {
                let roll = rng.random_range(0..tuning.roll_range);
                match plan_spawn(roll, ctx.score, tuning) {
                    SpawnPlan::Gap => {
                        let gap = tuning.gap_per_scroll_speed * ctx.scroll_speed;
                        let jitter = if tuning.gem_height_jitter > 0 {
                            rng.random_range(0..tuning.gem_height_jitter) as f32
                        } else {
                            0.0
                        };
                        // Bottom clears a skater standing on either side of the gap
                        let new_top = y + size.y / 2.0;
                        let baseline = farthest_top.map_or(new_top, |top| top.max(new_top));
                        let gem_y = baseline + ctx.skater_height + tuning.gem_size.y / 2.0 + jitter;
                        let gem_pos = Vec2::new(left + gap / 2.0, gem_y);
                        let id = self.next_entity_id();
                        self.gems.push(Gem {
                            id,
                            pos: gem_pos,
                            size: tuning.gem_size,
                        });
                        delta.spawned_gems.push(id);
                        left += gap;
                        log::debug!("Gap of {:.1} with gem {} at {:?}", gap, id, gem_pos);
                    }
                    SpawnPlan::Step => {
                        self.brick_level = self.brick_level.toggled();
                        log::debug!("Brick level now {:?}", self.brick_level);
                    }
                    SpawnPlan::Plain => {}
                }
            }

            let segment = Segment {
                id: self.next_entity_id(),
                pos: Vec2::new(left + size.x / 2.0, y),
                size,
                level,
            };
            // Width comes from the segment just placed, never a cached value
            farthest = Some(segment.right());
            farthest_top = Some(segment.top());
            self.segments.push(segment);
        }
    }

    /// Remove collected gems. Every id must be live.
    pub fn remove_gems(&mut self, ids: &[GemId]) {
        for &id in ids {
            let index = self.gems.iter().position(|gem| gem.id == id);
            debug_assert!(index.is_some(), "collected gem {id} is not on the track");
            if let Some(index) = index {
                self.gems.remove(index);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn push_gem(&mut self, pos: Vec2, size: Vec2) -> GemId {
        let id = self.next_entity_id();
        self.gems.push(Gem { id, pos, size });
        id
    }

    #[cfg(test)]
    pub(crate) fn segments_mut(&mut self) -> &mut Vec<Segment> {
        &mut self.segments
    }
}
