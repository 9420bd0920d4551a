//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in `SimulationState`. Trail and
//! particles are outputs for the renderer and are never read back by physics.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::AiDifficulty;
use crate::config::SimConfig;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction pointing toward this side of the field
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        }
    }
}

/// Playfield wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
}

/// Which part of a paddle the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    /// The paddle face toward the field center
    Side,
    /// Top or bottom edge
    Edge,
    /// A corner
    Corner,
}

/// Events emitted by a tick, for audio/particle notifiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit {
        side: Side,
        contact: ContactKind,
        pos: Vec2,
    },
    WallBounce {
        wall: Wall,
        pos: Vec2,
    },
    /// `scorer` won the point
    Goal { scorer: Side },
    MatchOver { winner: Side },
    /// Ball put back in play after a goal pause
    Serve { toward: Side },
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-match countdown, physics frozen
    Countdown { ticks_left: u32 },
    /// Active gameplay
    Playing,
    /// Round pause after a goal; the ball waits where it left the field
    GoalPause { ticks_left: u32, scorer: Side },
    /// Match ended; nothing changes until reset
    MatchOver { winner: Side },
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub speed: f32,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Position at the start of the current tick (swept collision)
    pub prev_pos: Vec2,
    /// Base velocity in pixels per tick; scaled by `speed_multiplier` when moving
    pub vel: Vec2,
    pub radius: f32,
    pub speed_multiplier: f32,
    /// Trail history for rendering (oldest first)
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel,
            radius,
            speed_multiplier: 1.0,
            trail: Vec::new(),
        }
    }

    /// Displacement applied by one tick
    #[inline]
    pub fn step_delta(&self) -> Vec2 {
        self.vel * self.speed_multiplier
    }

    /// Record current position to trail (call each tick before moving)
    pub fn record_trail(&mut self, max_len: usize) {
        if max_len == 0 {
            return;
        }
        let speed = self.step_delta().length();
        self.trail.push(TrailPoint { pos: self.pos, speed });
        if self.trail.len() > max_len {
            let excess = self.trail.len() - max_len;
            self.trail.drain(..excess);
        }
    }

    /// Put the ball back at `center` heading along `vel`
    pub fn serve(&mut self, center: Vec2, vel: Vec2) {
        self.pos = center;
        self.prev_pos = center;
        self.vel = vel;
        self.speed_multiplier = 1.0;
        self.trail.clear();
    }
}

/// A player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Left edge (fixed)
    pub x: f32,
    /// Top edge, clamped to `[0, field_height - height]`
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Highlight ticks remaining after a hit
    pub flash_ticks: u32,
}

impl Paddle {
    pub fn new(side: Side, config: &SimConfig) -> Self {
        Self {
            side,
            x: config.paddle_x(side),
            y: (config.field_height - config.paddle_height) / 2.0,
            width: config.paddle_width,
            height: config.paddle_height,
            flash_ticks: 0,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// X of the vertical edge facing the field center
    #[inline]
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Left => self.x + self.width,
            Side::Right => self.x,
        }
    }

    /// Horizontal direction a ball must travel to leave this paddle
    #[inline]
    pub fn away_sign(&self) -> f32 {
        self.side.opposite().sign()
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.top()),
            Vec2::new(self.x + self.width, self.top()),
            Vec2::new(self.x, self.bottom()),
            Vec2::new(self.x + self.width, self.bottom()),
        ]
    }

    /// Move by `dir * speed` (dir: -1 up, 0 stay, 1 down), clamped to the field
    pub fn move_by(&mut self, dir: i8, speed: f32, max_y: f32) {
        if dir != 0 {
            self.y = (self.y + dir as f32 * speed).clamp(0.0, max_y);
        }
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn winner(&self, winning_score: u32) -> Option<Side> {
        if self.left >= winning_score {
            Some(Side::Left)
        } else if self.right >= winning_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Which paddle, if any, the AI currently drives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiControl {
    pub enabled: bool,
    pub side: Side,
    pub difficulty: AiDifficulty,
}

/// What spawned a particle (renderer picks the color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Paddle,
    Wall,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// 1.0 at spawn, removed at 0
    pub life: f32,
    /// Life lost per tick
    pub decay: f32,
    pub size: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
    }
}

fn effect_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

fn default_effect_rng() -> Pcg32 {
    effect_rng(0)
}

/// Complete simulation state, owned by whoever drives the tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: GamePhase,
    /// Player pause; freezes everything including effects
    pub paused: bool,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub score: Score,
    pub ai: AiControl,
    /// Simulation tick counter (unpaused ticks only)
    pub time_ticks: u64,
    /// Paddle hits since the last serve
    pub rally: u32,
    pub longest_rally: u32,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    #[serde(skip, default = "default_effect_rng")]
    pub(crate) rng: Pcg32,
}

impl SimulationState {
    /// Fresh match: paddles centered, ball at center heading toward
    /// `config.opening_serve`, scores zeroed
    pub fn new(config: &SimConfig) -> Self {
        let phase = if config.countdown_ticks > 0 {
            GamePhase::Countdown {
                ticks_left: config.countdown_ticks,
            }
        } else {
            GamePhase::Playing
        };

        let mut ball = Ball::new(
            config.center(),
            config.serve_velocity(config.opening_serve),
            config.ball_radius,
        );
        ball.speed_multiplier = config.base_multiplier();

        Self {
            phase,
            paused: false,
            ball,
            left: Paddle::new(Side::Left, config),
            right: Paddle::new(Side::Right, config),
            score: Score::new(),
            ai: AiControl {
                enabled: config.ai.enabled,
                side: config.ai.side,
                difficulty: config.ai.difficulty,
            },
            time_ticks: 0,
            rally: 0,
            longest_rally: 0,
            particles: Vec::new(),
            rng: effect_rng(config.seed),
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_match_over(&self) -> bool {
        matches!(self.phase, GamePhase::MatchOver { .. })
    }

    /// Goal banner text for renderers, while a goal pause is running
    pub fn goal_banner(&self) -> Option<String> {
        match self.phase {
            GamePhase::GoalPause { scorer, .. } => Some(format!("{} SCORES!", scorer.as_str())),
            _ => None,
        }
    }

    /// Whole seconds left on the countdown (3, 2, 1)
    pub fn countdown_seconds(&self, ticks_per_second: u32) -> Option<u32> {
        match self.phase {
            GamePhase::Countdown { ticks_left } => Some(ticks_left.div_ceil(ticks_per_second.max(1))),
            _ => None,
        }
    }
}
