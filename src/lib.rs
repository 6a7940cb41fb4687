//! Skater Run - simulation core for a side-scrolling skateboarding runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, track generation, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors
//!
//! Rendering, input devices and audio live outside this crate. The presentation
//! layer drives a [`sim::GameSession`] with frame timestamps and a single action
//! button, then reads poses back through the query surface.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::SkaterError;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration; physics is expressed per normalized 60 Hz frame
    pub const REFERENCE_DT: f64 = 1.0 / 60.0;

    /// Visible window dimensions (world units)
    pub const VISIBLE_WIDTH: f32 = 960.0;
    pub const VISIBLE_HEIGHT: f32 = 540.0;

    /// Downward acceleration, units per normalized frame²
    pub const GRAVITY: f32 = 1.5;
    /// Upward velocity set by a jump, units per normalized frame
    pub const JUMP_SPEED: f32 = 20.0;
    /// Vertical speeds at or below this still count as grounded (100 units/s)
    pub const GROUNDED_SPEED_THRESHOLD: f32 = 100.0 / 60.0;

    /// Scroll speed at run start (units per normalized frame)
    pub const STARTING_SCROLL_SPEED: f32 = 5.0;
    /// Scroll speed gained per normalized frame
    pub const SCROLL_SPEED_INCREMENT: f32 = 0.01;

    /// Skater bounding box
    pub const SKATER_WIDTH: f32 = 48.0;
    pub const SKATER_HEIGHT: f32 = 64.0;

    /// Segment ("brick") bounding box, shared by every segment
    pub const SEGMENT_WIDTH: f32 = 96.0;
    pub const SEGMENT_HEIGHT: f32 = 64.0;
    /// Spacing between consecutive segments
    pub const SEGMENT_SEAM: f32 = 1.0;
    /// Elevation of the high brick level
    pub const HIGH_LEVEL_ELEVATION: f32 = 100.0;

    /// Gem bounding box
    pub const GEM_SIZE: f32 = 32.0;
    /// Bonus points per collected gem
    pub const GEM_BONUS: u64 = 50;
    /// Upper bound (exclusive) of the random height added above a gap gem
    pub const GEM_HEIGHT_JITTER: u32 = 150;

    /// Seconds between time-based score ticks
    pub const SCORE_TICK_INTERVAL: f64 = 1.0;

    /// Generation rolls are uniform in `0..ROLL_RANGE`
    pub const ROLL_RANGE: u32 = 99;
    /// Rolls below this open a gap with a gem
    pub const GAP_ROLL_THRESHOLD: u32 = 3;
    /// Rolls below this (and not a gap) toggle the brick level
    pub const LEVEL_ROLL_THRESHOLD: u32 = 5;
    /// Score that must be exceeded before gaps appear
    pub const GEM_UNLOCK_SCORE: u64 = 10;
    /// Score that must be exceeded before steps appear
    pub const LEVEL_TOGGLE_SCORE: u64 = 20;
    /// Gap width per unit of scroll speed
    pub const GAP_PER_SCROLL_SPEED: f32 = 20.0;

    /// Tilt beyond this (degrees, either direction) ends the run
    pub const MAX_TILT_DEGREES: f32 = 85.0;
    /// Penetration tolerated when deciding a contact came from above or below
    pub const LANDING_SLOP: f32 = 4.0;
    /// Backwards pitch gained per normalized frame pressed against a step face
    pub const SIDE_HIT_SPIN: f32 = 1.5;
}

/// Convert elapsed seconds into normalized 60 Hz frames.
///
/// Negative or NaN input (clock going backwards) counts as no time passing.
#[inline]
pub fn frame_scale(dt: f64, reference_dt: f64) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        return 0.0;
    }
    (dt / reference_dt) as f32
}
