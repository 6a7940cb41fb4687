//! Game balance tuning
//!
//! Every gameplay constant is mirrored here so a session can be built from a
//! JSON document (missing keys fall back to [`crate::consts`]). Values are
//! fixed for the lifetime of a [`GameSession`](crate::sim::GameSession).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SkaterError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Reference frame duration in seconds (1/60)
    pub reference_dt: f64,
    /// Seconds between time-based score ticks
    pub score_tick_interval: f64,

    // === World ===
    pub visible_width: f32,
    pub visible_height: f32,

    // === Skater physics ===
    pub gravity: f32,
    pub jump_speed: f32,
    pub grounded_speed_threshold: f32,
    pub skater_size: Vec2,
    pub max_tilt_degrees: f32,
    pub landing_slop: f32,
    pub side_hit_spin: f32,

    // === Scrolling ===
    pub starting_scroll_speed: f32,
    pub scroll_speed_increment: f32,

    // === Track generation ===
    pub segment_size: Vec2,
    pub segment_seam: f32,
    pub high_level_elevation: f32,
    pub roll_range: u32,
    pub gap_roll_threshold: u32,
    pub level_roll_threshold: u32,
    pub gem_unlock_score: u64,
    pub level_toggle_score: u64,
    pub gap_per_scroll_speed: f32,

    // === Gems ===
    pub gem_size: Vec2,
    pub gem_bonus: u64,
    pub gem_height_jitter: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reference_dt: REFERENCE_DT,
            score_tick_interval: SCORE_TICK_INTERVAL,

            visible_width: VISIBLE_WIDTH,
            visible_height: VISIBLE_HEIGHT,

            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            grounded_speed_threshold: GROUNDED_SPEED_THRESHOLD,
            skater_size: Vec2::new(SKATER_WIDTH, SKATER_HEIGHT),
            max_tilt_degrees: MAX_TILT_DEGREES,
            landing_slop: LANDING_SLOP,
            side_hit_spin: SIDE_HIT_SPIN,

            starting_scroll_speed: STARTING_SCROLL_SPEED,
            scroll_speed_increment: SCROLL_SPEED_INCREMENT,

            segment_size: Vec2::new(SEGMENT_WIDTH, SEGMENT_HEIGHT),
            segment_seam: SEGMENT_SEAM,
            high_level_elevation: HIGH_LEVEL_ELEVATION,
            roll_range: ROLL_RANGE,
            gap_roll_threshold: GAP_ROLL_THRESHOLD,
            level_roll_threshold: LEVEL_ROLL_THRESHOLD,
            gem_unlock_score: GEM_UNLOCK_SCORE,
            level_toggle_score: LEVEL_TOGGLE_SCORE,
            gap_per_scroll_speed: GAP_PER_SCROLL_SPEED,

            gem_size: Vec2::splat(GEM_SIZE),
            gem_bonus: GEM_BONUS,
            gem_height_jitter: GEM_HEIGHT_JITTER,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, SkaterError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: &std::path::Path) -> Result<Self, SkaterError> {
        let json = std::fs::read_to_string(path).map_err(|source| SkaterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SkaterError> {
        positive("reference_dt", self.reference_dt)?;
        positive("score_tick_interval", self.score_tick_interval)?;
        positive("visible_width", self.visible_width as f64)?;
        positive("visible_height", self.visible_height as f64)?;
        positive("gravity", self.gravity as f64)?;
        positive("jump_speed", self.jump_speed as f64)?;
        non_negative("grounded_speed_threshold", self.grounded_speed_threshold as f64)?;
        positive("skater_size.x", self.skater_size.x as f64)?;
        positive("skater_size.y", self.skater_size.y as f64)?;
        positive("max_tilt_degrees", self.max_tilt_degrees as f64)?;
        non_negative("landing_slop", self.landing_slop as f64)?;
        non_negative("side_hit_spin", self.side_hit_spin as f64)?;
        non_negative("starting_scroll_speed", self.starting_scroll_speed as f64)?;
        non_negative("scroll_speed_increment", self.scroll_speed_increment as f64)?;
        positive("segment_size.x", self.segment_size.x as f64)?;
        positive("segment_size.y", self.segment_size.y as f64)?;
        non_negative("segment_seam", self.segment_seam as f64)?;
        non_negative("high_level_elevation", self.high_level_elevation as f64)?;
        non_negative("gap_per_scroll_speed", self.gap_per_scroll_speed as f64)?;
        positive("gem_size.x", self.gem_size.x as f64)?;
        positive("gem_size.y", self.gem_size.y as f64)?;

        if self.roll_range == 0 {
            return Err(SkaterError::InvalidTuning {
                field: "roll_range",
                value: 0.0,
                expected: "> 0",
            });
        }
        if self.gap_roll_threshold > self.roll_range {
            return Err(SkaterError::InvalidTuning {
                field: "gap_roll_threshold",
                value: self.gap_roll_threshold as f64,
                expected: "<= roll_range",
            });
        }
        if self.level_roll_threshold > self.roll_range {
            return Err(SkaterError::InvalidTuning {
                field: "level_roll_threshold",
                value: self.level_roll_threshold as f64,
                expected: "<= roll_range",
            });
        }
        Ok(())
    }

    /// Where a fresh run places the skater: a sixth of the way in, feet on a low segment
    pub fn skater_start(&self) -> Vec2 {
        Vec2::new(
            self.visible_width / 6.0,
            self.skater_size.y / 2.0 + self.segment_size.y,
        )
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SkaterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SkaterError::InvalidTuning {
            field,
            value,
            expected: "a finite value > 0",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), SkaterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SkaterError::InvalidTuning {
            field,
            value,
            expected: "a finite value >= 0",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 2.0, "visible_width": 640.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 2.0);
        assert_eq!(tuning.visible_width, 640.0);
        assert_eq!(tuning.jump_speed, JUMP_SPEED);
        assert_eq!(tuning.gem_bonus, GEM_BONUS);
    }

    #[test]
    fn test_rejects_non_positive_gravity() {
        let err = Tuning::from_json(r#"{ "gravity": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SkaterError::InvalidTuning {
                field: "gravity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_threshold_above_roll_range() {
        let tuning = Tuning {
            roll_range: 10,
            level_roll_threshold: 11,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(SkaterError::InvalidTuning {
                field: "level_roll_threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ gravity: }").unwrap_err();
        assert!(matches!(err, SkaterError::TuningParse(_)));
    }

    #[test]
    fn test_skater_start_sits_on_low_segment() {
        let tuning = Tuning::default();
        let start = tuning.skater_start();
        assert_eq!(start.x, VISIBLE_WIDTH / 6.0);
        assert_eq!(start.y - SKATER_HEIGHT / 2.0, SEGMENT_HEIGHT);
    }
}
