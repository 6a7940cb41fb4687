//! Skater kinematics
//!
//! Free fall under constant gravity, scaled by normalized frames so the arc is
//! the same at any frame rate. There is no floor here: collision resolution
//! stops the skater on segments.

use super::state::Skater;
use crate::tuning::Tuning;

/// Advance the skater by `frame_scale` normalized frames.
///
/// A jump only takes effect while grounded. Returns whether the jump impulse
/// was applied.
pub fn integrate(skater: &mut Skater, frame_scale: f32, jump_requested: bool, tuning: &Tuning) -> bool {
    let jumped = jump_requested && skater.grounded;
    if jumped {
        skater.vel_y = tuning.jump_speed;
    }

    skater.vel_y -= tuning.gravity * frame_scale;

    skater.prev_pos = skater.pos;
    skater.pos.y += skater.vel_y * frame_scale;
    skater.rotation += skater.spin * frame_scale;

    // Small vertical jitter while rolling still counts as grounded
    if skater.vel_y.abs() > tuning.grounded_speed_threshold {
        skater.grounded = false;
    }

    jumped
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn skater_at_rest() -> Skater {
        let mut skater = Skater::new(Vec2::new(48.0, 64.0));
        skater.reset(Vec2::new(160.0, 96.0));
        skater
    }

    #[test]
    fn test_gravity_accumulates() {
        let tuning = Tuning::default();
        let mut skater = skater_at_rest();
        skater.grounded = false;

        integrate(&mut skater, 1.0, false, &tuning);
        assert_eq!(skater.vel_y, -tuning.gravity);
        assert_eq!(skater.pos.y, 96.0 - tuning.gravity);

        integrate(&mut skater, 1.0, false, &tuning);
        assert_eq!(skater.vel_y, -2.0 * tuning.gravity);
        assert_eq!(skater.pos.y, 96.0 - 3.0 * tuning.gravity);
        assert_eq!(skater.prev_pos.y, 96.0 - tuning.gravity);
    }

    #[test]
    fn test_zero_frame_scale_does_not_move() {
        let tuning = Tuning::default();
        let mut skater = skater_at_rest();
        integrate(&mut skater, 0.0, false, &tuning);
        assert_eq!(skater.pos.y, 96.0);
        assert_eq!(skater.vel_y, 0.0);
        assert!(skater.grounded);
    }

    #[test]
    fn test_jump_from_ground() {
        let tuning = Tuning::default();
        let mut skater = skater_at_rest();

        assert!(integrate(&mut skater, 1.0, true, &tuning));
        assert_eq!(skater.vel_y, tuning.jump_speed - tuning.gravity);
        assert!(skater.pos.y > 96.0);
        assert!(!skater.grounded);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let tuning = Tuning::default();
        let mut skater = skater_at_rest();
        skater.pos.y = 300.0;
        skater.vel_y = -4.0;
        skater.grounded = false;

        let mut reference = skater.clone();
        assert!(!integrate(&mut skater, 1.0, true, &tuning));
        integrate(&mut reference, 1.0, false, &tuning);
        assert_eq!(skater.vel_y, reference.vel_y);
        assert_eq!(skater.pos, reference.pos);
    }

    #[test]
    fn test_small_vertical_speed_stays_grounded() {
        let tuning = Tuning::default();
        let mut skater = skater_at_rest();
        // One frame of gravity from rest stays under the threshold
        integrate(&mut skater, 1.0, false, &tuning);
        assert!(skater.vel_y.abs() <= tuning.grounded_speed_threshold);
        assert!(skater.grounded);

        // A second frame without support crosses it
        integrate(&mut skater, 1.0, false, &tuning);
        assert!(!skater.grounded);
    }

    #[test]
    fn test_frame_rate_independent_velocity() {
        let tuning = Tuning::default();
        let mut at_60 = skater_at_rest();
        let mut at_30 = skater_at_rest();
        at_60.grounded = false;
        at_30.grounded = false;

        integrate(&mut at_60, 1.0, false, &tuning);
        integrate(&mut at_60, 1.0, false, &tuning);
        integrate(&mut at_30, 2.0, false, &tuning);
        assert_eq!(at_60.vel_y, at_30.vel_y);
    }

    #[test]
    fn test_spin_integrates_rotation() {
        let tuning = Tuning::default();
        let mut skater = skater_at_rest();
        skater.spin = 2.5;
        integrate(&mut skater, 2.0, false, &tuning);
        assert_eq!(skater.rotation, 5.0);
    }
}
