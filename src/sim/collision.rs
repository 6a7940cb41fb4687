//! Contact detection between the skater, segments and gems
//!
//! [`resolve`] is a pure function of current positions and returns a
//! [`ContactReport`]; [`ContactReport::apply`] then moves the skater out of
//! whatever it hit. Segments act as the floor, the ceiling, and the face of a
//! step; gems are trigger volumes.

use super::state::{Gem, GemId, Segment, Skater};
use crate::tuning::Tuning;

/// Contacts found for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactReport {
    /// Top of the highest segment the skater landed on
    pub support: Option<f32>,
    /// Bottom of the lowest segment the skater bumped its head on
    pub ceiling: Option<f32>,
    /// Skater centre x after being pushed out of a segment's side
    pub wall: Option<f32>,
    /// Gems the skater overlaps, in track order
    pub collected: Vec<GemId>,
}

impl ContactReport {
    /// Whether the skater is standing on a segment this tick
    pub fn grounded(&self) -> bool {
        self.support.is_some()
    }

    /// Move the skater out of the contacts. Returns true when this is a
    /// touchdown from the air.
    pub fn apply(&self, skater: &mut Skater, frame_scale: f32, tuning: &Tuning) -> bool {
        let half = skater.size / 2.0;

        if let Some(x) = self.wall {
            // Shoved backwards pitches the board up, shoved forwards pitches it down
            let direction = if x < skater.pos.x { 1.0 } else { -1.0 };
            skater.pos.x = x;
            skater.spin += direction * tuning.side_hit_spin * frame_scale;
        }

        if let Some(bottom) = self.ceiling {
            skater.pos.y = bottom - half.y;
            skater.vel_y = skater.vel_y.min(0.0);
        }

        match self.support {
            Some(top) => {
                let touchdown = !skater.grounded;
                skater.pos.y = top + half.y;
                skater.vel_y = 0.0;
                skater.grounded = true;
                if self.wall.is_none() {
                    skater.rotation = 0.0;
                    skater.spin = 0.0;
                }
                touchdown
            }
            None => false,
        }
    }
}

/// Find every contact between the skater and the track.
///
/// A landing needs horizontal overlap, feet that started the step at or above
/// the segment top, feet now below it, and a vertical speed that is not
/// rising. The test is swept on the vertical axis, so a fast fall cannot pass
/// through a segment in a single step.
pub fn resolve(skater: &Skater, segments: &[Segment], gems: &[Gem], tuning: &Tuning) -> ContactReport {
    let body = skater.bounds();
    let prev = skater.prev_bounds();
    let slop = tuning.landing_slop;
    let mut report = ContactReport::default();

    for seg in segments {
        let seg_box = seg.bounds();
        if !body.overlaps_x(&seg_box) {
            continue;
        }

        let top = seg_box.top();
        let from_above = prev.bottom() >= top - slop
            && body.bottom() < top
            && skater.vel_y <= tuning.grounded_speed_threshold;
        if from_above {
            report.support = Some(report.support.map_or(top, |s| s.max(top)));
            continue;
        }

        if !body.overlaps(&seg_box) {
            continue;
        }

        let from_below = skater.vel_y > 0.0 && prev.top() <= seg_box.bottom() + slop;
        if from_below {
            let bottom = seg_box.bottom();
            report.ceiling = Some(report.ceiling.map_or(bottom, |c| c.min(bottom)));
            continue;
        }

        let pushed_x = if skater.pos.x < seg.pos.x {
            seg_box.left() - skater.size.x / 2.0
        } else {
            seg_box.right() + skater.size.x / 2.0
        };
        let farther = report
            .wall
            .is_none_or(|x| (pushed_x - skater.pos.x).abs() > (x - skater.pos.x).abs());
        if farther {
            report.wall = Some(pushed_x);
        }
    }

    report.collected = gems
        .iter()
        .filter(|gem| body.overlaps(&gem.bounds()))
        .map(|gem| gem.id)
        .collect();

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BrickLevel;
    use glam::Vec2;

    fn segment(id: u32, left: f32, level: BrickLevel, tuning: &Tuning) -> Segment {
        let size = tuning.segment_size;
        Segment {
            id,
            pos: Vec2::new(
                left + size.x / 2.0,
                size.y / 2.0 + level.elevation(tuning.high_level_elevation),
            ),
            size,
            level,
        }
    }

    fn skater_at(pos: Vec2, prev: Vec2, vel_y: f32, tuning: &Tuning) -> Skater {
        let mut skater = Skater::new(tuning.skater_size);
        skater.pos = pos;
        skater.prev_pos = prev;
        skater.vel_y = vel_y;
        skater
    }

    #[test]
    fn test_resting_skater_is_supported() {
        let tuning = Tuning::default();
        let segs = [segment(1, 100.0, BrickLevel::Low, &tuning)];
        let rest_y = 64.0 + 32.0;
        // One frame of gravity has pulled the feet 1.5 units into the segment
        let skater = skater_at(Vec2::new(150.0, rest_y - 1.5), Vec2::new(150.0, rest_y), -1.5, &tuning);

        let report = resolve(&skater, &segs, &[], &tuning);
        assert!(report.grounded());
        assert_eq!(report.support, Some(64.0));
        assert_eq!(report.wall, None);
    }

    #[test]
    fn test_no_contact_when_clear_of_segments() {
        let tuning = Tuning::default();
        let segs = [segment(1, 100.0, BrickLevel::Low, &tuning)];
        let skater = skater_at(Vec2::new(150.0, 200.0), Vec2::new(150.0, 202.0), -2.0, &tuning);
        assert_eq!(resolve(&skater, &segs, &[], &tuning), ContactReport::default());
    }

    #[test]
    fn test_fast_fall_through_thin_segment_still_lands() {
        let tuning = Tuning {
            segment_size: Vec2::new(96.0, 8.0),
            ..Default::default()
        };
        let segs = [segment(1, 100.0, BrickLevel::Low, &tuning)];
        // Feet start above the top (y = 8) and end well below the bottom
        let skater = skater_at(Vec2::new(150.0, -40.0), Vec2::new(150.0, 45.0), -85.0, &tuning);
        assert!(!skater.bounds().overlaps(&segs[0].bounds()));

        let report = resolve(&skater, &segs, &[], &tuning);
        assert_eq!(report.support, Some(8.0));
    }

    #[test]
    fn test_rising_skater_does_not_land() {
        let tuning = Tuning::default();
        let segs = [segment(1, 100.0, BrickLevel::Low, &tuning)];
        // First frame of a jump from rest on the segment
        let skater = skater_at(Vec2::new(150.0, 114.5), Vec2::new(150.0, 96.0), 18.5, &tuning);
        let report = resolve(&skater, &segs, &[], &tuning);
        assert!(!report.grounded());
        assert_eq!(report, ContactReport::default());
    }

    #[test]
    fn test_step_face_pushes_skater_back() {
        let tuning = Tuning::default();
        let segs = [
            segment(1, 73.0, BrickLevel::Low, &tuning),
            segment(2, 170.0, BrickLevel::High, &tuning),
        ];
        // Standing on the low segment with the leading edge 14 units into the step
        let skater = skater_at(Vec2::new(160.0, 94.5), Vec2::new(160.0, 96.0), -1.5, &tuning);

        let report = resolve(&skater, &segs, &[], &tuning);
        assert_eq!(report.support, Some(64.0));
        assert_eq!(report.wall, Some(170.0 - tuning.skater_size.x / 2.0));
    }

    #[test]
    fn test_head_bump() {
        let tuning = Tuning::default();
        let segs = [segment(1, 100.0, BrickLevel::High, &tuning)];
        // High segment spans y 100..164; head rises from 98 to 110
        let skater = skater_at(Vec2::new(150.0, 78.0), Vec2::new(150.0, 66.0), 12.0, &tuning);

        let report = resolve(&skater, &segs, &[], &tuning);
        assert_eq!(report.ceiling, Some(100.0));
        assert_eq!(report.wall, None);
    }

    #[test]
    fn test_gem_overlap_collects_all() {
        let tuning = Tuning::default();
        let gems = [
            Gem { id: 7, pos: Vec2::new(150.0, 100.0), size: tuning.gem_size },
            Gem { id: 8, pos: Vec2::new(160.0, 120.0), size: tuning.gem_size },
            Gem { id: 9, pos: Vec2::new(400.0, 100.0), size: tuning.gem_size },
        ];
        let skater = skater_at(Vec2::new(150.0, 100.0), Vec2::new(150.0, 100.0), 0.0, &tuning);

        let report = resolve(&skater, &[], &gems, &tuning);
        assert_eq!(report.collected, vec![7, 8]);
    }

    #[test]
    fn test_gem_touching_edge_is_not_collected() {
        let tuning = Tuning::default();
        // Skater right edge at 174, gem left edge at 174
        let gems = [Gem { id: 1, pos: Vec2::new(190.0, 100.0), size: tuning.gem_size }];
        let skater = skater_at(Vec2::new(150.0, 100.0), Vec2::new(150.0, 100.0), 0.0, &tuning);
        assert!(resolve(&skater, &[], &gems, &tuning).collected.is_empty());
    }

    #[test]
    fn test_apply_landing_levels_out() {
        let tuning = Tuning::default();
        let mut skater = skater_at(Vec2::new(150.0, 80.0), Vec2::new(150.0, 110.0), -30.0, &tuning);
        skater.grounded = false;
        skater.rotation = 20.0;
        skater.spin = 1.0;

        let report = ContactReport {
            support: Some(64.0),
            ..Default::default()
        };
        assert!(report.apply(&mut skater, 1.0, &tuning));
        assert_eq!(skater.pos.y, 96.0);
        assert_eq!(skater.vel_y, 0.0);
        assert!(skater.grounded);
        assert_eq!(skater.rotation, 0.0);
        assert_eq!(skater.spin, 0.0);

        // Already grounded: not a touchdown
        assert!(!report.apply(&mut skater, 1.0, &tuning));
    }

    #[test]
    fn test_apply_wall_adds_spin_and_keeps_tilt() {
        let tuning = Tuning::default();
        let mut skater = skater_at(Vec2::new(160.0, 94.5), Vec2::new(160.0, 96.0), -1.5, &tuning);
        skater.rotation = 10.0;

        let report = ContactReport {
            support: Some(64.0),
            wall: Some(146.0),
            ..Default::default()
        };
        report.apply(&mut skater, 2.0, &tuning);
        assert_eq!(skater.pos.x, 146.0);
        assert_eq!(skater.spin, 2.0 * tuning.side_hit_spin);
        assert_eq!(skater.rotation, 10.0);
        assert!(skater.grounded);
    }

    #[test]
    fn test_apply_ceiling_stops_rise() {
        let tuning = Tuning::default();
        let mut skater = skater_at(Vec2::new(150.0, 78.0), Vec2::new(150.0, 66.0), 12.0, &tuning);
        skater.grounded = false;
        let report = ContactReport {
            ceiling: Some(100.0),
            ..Default::default()
        };
        assert!(!report.apply(&mut skater, 1.0, &tuning));
        assert_eq!(skater.pos.y, 68.0);
        assert_eq!(skater.vel_y, 0.0);
    }
}
