//! Game session: the state machine that owns a run
//!
//! A session sits in the menu until the action trigger starts a run, then
//! advances one tick per presented frame until the skater falls, is pushed
//! off the left edge, or tips over. Every tick runs the same fixed order:
//! scroll speed, track, kinematics, collisions, score, termination.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision;
use super::kinematics;
use super::score::ScoreKeeper;
use super::state::{
    FrameSnapshot, GameEvent, GameOverCause, GamePhase, Gem, MenuPrompt, Pose, Segment, Skater,
};
use super::track::{TrackContext, TrackGenerator};
use crate::error::SkaterError;
use crate::frame_scale;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (only takes effect while grounded)
    pub jump: bool,
}

/// One player's game, from menu through any number of runs
#[derive(Debug, Clone)]
pub struct GameSession<R = Pcg32> {
    tuning: Tuning,
    rng: R,
    phase: GamePhase,
    skater: Skater,
    track: TrackGenerator,
    score: ScoreKeeper,
    scroll_speed: f32,
    /// Timestamp of the previous frame in this run
    last_timestamp: Option<f64>,
    /// Jump requested since the last frame
    jump_latched: bool,
    prompt: MenuPrompt,
    /// Ticks simulated in the current run
    time_ticks: u64,
    /// Raised outside a tick, handed out with the next one
    pending: Vec<GameEvent>,
}

impl GameSession<Pcg32> {
    /// Create a session with default tuning and a seeded generator
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Create a session with custom tuning and an injected generator
    pub fn with_tuning(tuning: Tuning, rng: R) -> Result<Self, SkaterError> {
        tuning.validate()?;
        Ok(Self::build(tuning, rng))
    }

    fn build(tuning: Tuning, rng: R) -> Self {
        let mut skater = Skater::new(tuning.skater_size);
        skater.reset(tuning.skater_start());
        Self {
            scroll_speed: tuning.starting_scroll_speed,
            tuning,
            rng,
            phase: GamePhase::Menu,
            skater,
            track: TrackGenerator::new(),
            score: ScoreKeeper::new(),
            last_timestamp: None,
            jump_latched: false,
            prompt: MenuPrompt::initial(),
            time_ticks: 0,
            pending: Vec::new(),
        }
    }

    /// Begin a run. Ignored (returns false) unless in the menu.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }

        self.skater.reset(self.tuning.skater_start());
        self.track.reset();
        self.score.reset();
        self.scroll_speed = self.tuning.starting_scroll_speed;
        self.last_timestamp = None;
        self.jump_latched = false;
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        self.pending.push(GameEvent::RunStarted);

        log::info!("Run {} started (best {})", self.score.runs() + 1, self.score.best());
        true
    }

    /// The single action button: starts a run from the menu, jumps while running
    pub fn on_action_triggered(&mut self) -> bool {
        match self.phase {
            GamePhase::Menu => self.start(),
            GamePhase::Running => {
                self.jump_latched = true;
                true
            }
        }
    }

    /// Drive one presented frame. The first frame of a run has no elapsed time.
    pub fn on_frame(&mut self, timestamp: f64) -> Vec<GameEvent> {
        if self.phase != GamePhase::Running {
            return Vec::new();
        }

        let dt = self.last_timestamp.map_or(0.0, |last| timestamp - last);
        self.last_timestamp = Some(timestamp);
        let input = TickInput {
            jump: std::mem::take(&mut self.jump_latched),
        };
        self.tick(dt, &input)
    }

    /// Advance the run by `dt` seconds
    pub fn tick(&mut self, dt: f64, input: &TickInput) -> Vec<GameEvent> {
        if self.phase != GamePhase::Running {
            return Vec::new();
        }
        let mut events = std::mem::take(&mut self.pending);

        self.time_ticks += 1;
        let scale = frame_scale(dt, self.tuning.reference_dt);

        // Difficulty
        self.scroll_speed += self.tuning.scroll_speed_increment * scale;
        let scroll = self.scroll_speed * scale;

        // Track
        let ctx = TrackContext {
            tuning: &self.tuning,
            score: self.score.score(),
            scroll_speed: self.scroll_speed,
            skater_height: self.skater.size.y,
        };
        let delta = self.track.advance(scroll, &ctx, &mut self.rng);
        events.extend(delta.removed_segments.into_iter().map(GameEvent::SegmentRemoved));
        events.extend(delta.removed_gems.into_iter().map(GameEvent::GemRemoved));
        events.extend(delta.spawned_gems.into_iter().map(GameEvent::GemSpawned));

        // Kinematics
        if kinematics::integrate(&mut self.skater, scale, input.jump, &self.tuning) {
            events.push(GameEvent::Jumped);
        }

        // Collisions
        let contacts = collision::resolve(
            &self.skater,
            self.track.segments(),
            self.track.gems(),
            &self.tuning,
        );
        if contacts.apply(&mut self.skater, scale, &self.tuning) {
            events.push(GameEvent::Landed);
        }
        self.track.remove_gems(&contacts.collected);
        for id in contacts.collected {
            let points = self.score.on_gem_collected(self.tuning.gem_bonus);
            events.push(GameEvent::GemCollected { id, points });
        }

        // Score
        let points = self
            .score
            .update(dt, self.scroll_speed, self.tuning.score_tick_interval);
        if points > 0 {
            events.push(GameEvent::ScoreTick { points });
        }

        if let Some(cause) = self.termination_cause() {
            events.push(self.game_over(cause));
        }

        events
    }

    /// Why the run must end now, if it must
    pub fn termination_cause(&self) -> Option<GameOverCause> {
        if self.skater.pos.y < 0.0 {
            Some(GameOverCause::FellOff)
        } else if self.skater.pos.x < 0.0 {
            Some(GameOverCause::PushedOff)
        } else if self.skater.rotation.abs() > self.tuning.max_tilt_degrees {
            Some(GameOverCause::TippedOver)
        } else {
            None
        }
    }

    fn game_over(&mut self, cause: GameOverCause) -> GameEvent {
        let final_score = self.score.score();
        let new_best = self.score.on_game_over();
        self.phase = GamePhase::Menu;
        self.jump_latched = false;
        self.prompt = MenuPrompt::game_over(final_score);

        log::info!(
            "Game over ({:?}) after {} ticks: score {}, best {}",
            cause,
            self.time_ticks,
            final_score,
            self.score.best()
        );
        GameEvent::GameOver {
            cause,
            final_score,
            new_best,
        }
    }
}

impl<R> GameSession<R> {
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn skater(&self) -> &Skater {
        &self.skater
    }

    pub fn segments(&self) -> &[Segment] {
        self.track.segments()
    }

    pub fn gems(&self) -> &[Gem] {
        self.track.gems()
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn best_score(&self) -> u64 {
        self.score.best()
    }

    /// Completed runs this session
    pub fn runs(&self) -> u32 {
        self.score.runs()
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Menu overlay contents; `None` while running
    pub fn menu_prompt(&self) -> Option<&MenuPrompt> {
        match self.phase {
            GamePhase::Menu => Some(&self.prompt),
            GamePhase::Running => None,
        }
    }

    /// Copy out everything needed to draw the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            skater: self.skater.pose(),
            skater_min_y: self.skater.min_y,
            segments: self
                .track
                .segments()
                .iter()
                .map(|seg| Pose {
                    pos: seg.pos,
                    rotation: 0.0,
                })
                .collect(),
            gems: self
                .track
                .gems()
                .iter()
                .map(|gem| Pose {
                    pos: gem.pos,
                    rotation: 0.0,
                })
                .collect(),
            score: self.score.score(),
            best_score: self.score.best(),
            scroll_speed: self.scroll_speed,
            menu: self.menu_prompt().cloned(),
        }
    }
}
