//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, and only for visual effects
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use ai::{AiDifficulty, predict_intercept_y, steer};
pub use collision::{PaddleContact, PaddleEdge, detect_paddle_contact, resolve_paddle_contact};
pub use state::{
    AiControl, Ball, ContactKind, GameEvent, GamePhase, Paddle, Particle, ParticleKind, Score, Side,
    SimulationState, TrailPoint, Wall,
};
pub use tick::{BallPaddleSimulator, PaddleInput, TickInput, tick};
