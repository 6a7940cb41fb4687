//! Demo/idle player
//!
//! Reads the track a few frames of scroll ahead of the skater's leading edge
//! and jumps for gaps, rising steps and gems within reach.

use super::session::GameSession;
use super::state::{GamePhase, Gem, Segment, Skater};
use super::track::support_near;
use crate::tuning::Tuning;

/// Missing floor this many frames ahead means jump now
const GAP_LEAD_FRAMES: f32 = 1.0;
/// A rising step this many frames ahead needs the full climb time
const STEP_LEAD_FRAMES: f32 = 7.0;
/// How far ahead a gem is worth leaving the ground for
const GEM_LEAD_FRAMES: f32 = 8.0;

/// Whether the autopilot presses jump on the coming frame
pub fn wants_jump<R>(session: &GameSession<R>) -> bool {
    session.phase() == GamePhase::Running
        && should_jump(
            session.skater(),
            session.segments(),
            session.gems(),
            session.scroll_speed(),
            session.tuning(),
        )
}

/// Jump decision from raw entity state
pub fn should_jump(
    skater: &Skater,
    segments: &[Segment],
    gems: &[Gem],
    scroll_speed: f32,
    tuning: &Tuning,
) -> bool {
    if !skater.grounded {
        return false;
    }

    let body = skater.bounds();
    let lead = body.right();
    let feet = body.bottom();
    let speed = scroll_speed.max(1.0);
    let seam = tuning.segment_seam;

    // Floor runs out under the leading edge
    if support_near(segments, lead + speed * GAP_LEAD_FRAMES, seam).is_none() {
        return true;
    }

    // Step face coming up
    let rising = support_near(segments, lead + speed * STEP_LEAD_FRAMES, seam)
        .is_some_and(|top| top > feet + tuning.landing_slop);
    if rising {
        return true;
    }

    let apex = tuning.jump_speed * tuning.jump_speed / (2.0 * tuning.gravity);
    gems.iter().any(|gem| {
        let gem_box = gem.bounds();
        let ahead = gem_box.left() - lead;
        (0.0..=speed * GEM_LEAD_FRAMES).contains(&ahead)
            && gem_box.top() > body.top()
            && gem_box.bottom() < body.top() + apex
    })
}
