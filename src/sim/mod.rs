//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `dt`, scaled to normalized 60 Hz frames
//! - Seeded RNG only, consumed by track generation
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod collision;
pub mod kinematics;
pub mod score;
pub mod session;
pub mod state;
pub mod track;

pub use aabb::Aabb;
pub use collision::{ContactReport, resolve};
pub use score::ScoreKeeper;
pub use session::{GameSession, TickInput};
pub use state::{
    BrickLevel, FrameSnapshot, GameEvent, GameOverCause, GamePhase, Gem, GemId, MenuPrompt, Pose,
    Segment, SegmentId, Skater,
};
pub use track::{SpawnPlan, TrackContext, TrackDelta, TrackGenerator, plan_spawn, support_near};
