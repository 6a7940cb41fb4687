//! Simulation entities and the types the presentation layer reads back
//!
//! Everything here is owned by a single [`GameSession`](super::GameSession);
//! the presentation layer only ever sees copies through the query surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Identifier of a live segment
pub type SegmentId = u32;
/// Identifier of a live gem
pub type GemId = u32;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the action trigger to start a run
    Menu,
    /// Active gameplay
    Running,
}

/// Elevation tier new segments spawn at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickLevel {
    #[default]
    Low,
    High,
}

impl BrickLevel {
    /// Height added to a segment's resting y
    pub fn elevation(self, high_elevation: f32) -> f32 {
        match self {
            BrickLevel::Low => 0.0,
            BrickLevel::High => high_elevation,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            BrickLevel::Low => BrickLevel::High,
            BrickLevel::High => BrickLevel::Low,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skater {
    /// Centre of the bounding box
    pub pos: Vec2,
    /// Position at the start of the last integration step
    pub prev_pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (units per normalized frame, up is positive)
    pub vel_y: f32,
    /// Tilt in degrees, counter-clockwise positive
    pub rotation: f32,
    /// Tilt rate in degrees per normalized frame
    pub spin: f32,
    pub grounded: bool,
    /// Resting height of the skater's centre at run start
    pub min_y: f32,
}

impl Skater {
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            size,
            vel_y: 0.0,
            rotation: 0.0,
            spin: 0.0,
            grounded: true,
            min_y: 0.0,
        }
    }

    /// Put the skater back at the start position, upright and at rest
    pub fn reset(&mut self, start: Vec2) {
        self.pos = start;
        self.prev_pos = start;
        self.vel_y = 0.0;
        self.rotation = 0.0;
        self.spin = 0.0;
        self.grounded = true;
        self.min_y = start.y;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }

    /// Bounds at the start of the last integration step
    pub fn prev_bounds(&self) -> Aabb {
        Aabb::from_center_size(self.prev_pos, self.size)
    }

    pub fn pose(&self) -> Pose {
        Pose {
            pos: self.pos,
            rotation: self.rotation,
        }
    }
}

/// A static platform tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub pos: Vec2,
    pub size: Vec2,
    pub level: BrickLevel,
}

impl Segment {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// A collectible bonus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gem {
    pub id: GemId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Gem {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Position and tilt of an entity, for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub pos: Vec2,
    /// Degrees, counter-clockwise positive
    pub rotation: f32,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Dropped below the bottom of the world
    FellOff,
    /// Shoved past the left edge by a step
    PushedOff,
    /// Tilted beyond the maximum angle
    TippedOver,
}

/// What the menu overlay should display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuPrompt {
    pub message: String,
    /// Final score of the run that just ended; `None` on the first menu
    pub final_score: Option<u64>,
}

impl MenuPrompt {
    pub fn initial() -> Self {
        Self {
            message: "Tap to play".to_string(),
            final_score: None,
        }
    }

    pub fn game_over(score: u64) -> Self {
        Self {
            message: "Game over!".to_string(),
            final_score: Some(score),
        }
    }
}

/// Things that happened during a transition or tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Jumped,
    /// Skater touched down from the air
    Landed,
    SegmentRemoved(SegmentId),
    GemSpawned(GemId),
    /// Gem scrolled off screen without being collected
    GemRemoved(GemId),
    GemCollected { id: GemId, points: u64 },
    ScoreTick { points: u64 },
    GameOver {
        cause: GameOverCause,
        final_score: u64,
        new_best: bool,
    },
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub skater: Pose,
    /// Resting height of the skater's centre, the baseline for shadows and
    /// landing dust
    pub skater_min_y: f32,
    pub segments: Vec<Pose>,
    pub gems: Vec<Pose>,
    pub score: u64,
    pub best_score: u64,
    pub scroll_speed: f32,
    /// Present only while in the menu
    pub menu: Option<MenuPrompt>,
}
