//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is one
//! tick of `SIM_DT`; all speeds are in pixels per tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::ai;
use super::collision::{bounce_off_walls, detect_paddle_contact, resolve_paddle_contact, scoring_side};
use super::state::{GameEvent, GamePhase, Particle, ParticleKind, Side, SimulationState};
use crate::config::{EffectsConfig, SimConfig};

/// Held state of one player's up/down controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

impl PaddleInput {
    /// -1 up, 1 down, 0 when neither or both are held
    pub fn dir(&self) -> i8 {
        match (self.up, self.down) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: PaddleInput,
    pub right: PaddleInput,
    /// Pause toggle
    pub pause: bool,
    /// Flip the AI opponent on/off
    pub toggle_ai: bool,
}

impl TickInput {
    /// Same held controls with the one-shot toggles cleared
    pub fn held(&self) -> Self {
        Self {
            left: self.left,
            right: self.right,
            pause: false,
            toggle_ai: false,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut SimulationState, config: &SimConfig, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.is_match_over() {
        return events;
    }

    if input.pause {
        state.paused = !state.paused;
        log::debug!("Paused: {}", state.paused);
    }
    if state.paused {
        return events;
    }

    if input.toggle_ai {
        state.ai.enabled = !state.ai.enabled;
        log::info!(
            "AI {} on the {} paddle",
            if state.ai.enabled { "enabled" } else { "disabled" },
            state.ai.side.as_str()
        );
    }

    state.time_ticks += 1;
    update_effects(state);

    match state.phase {
        GamePhase::Countdown { ticks_left } => {
            let left = ticks_left.saturating_sub(1);
            state.phase = if left == 0 {
                log::debug!("Countdown finished");
                GamePhase::Playing
            } else {
                GamePhase::Countdown { ticks_left: left }
            };
        }
        GamePhase::GoalPause { ticks_left, scorer } => {
            let left = ticks_left.saturating_sub(1);
            if left == 0 {
                serve(state, config, config.serve_policy.serve_toward(scorer), &mut events);
            } else {
                state.phase = GamePhase::GoalPause {
                    ticks_left: left,
                    scorer,
                };
            }
        }
        GamePhase::Playing => play(state, config, input, &mut events),
        GamePhase::MatchOver { .. } => {}
    }

    events
}

/// One tick of live physics
fn play(state: &mut SimulationState, config: &SimConfig, input: &TickInput, events: &mut Vec<GameEvent>) {
    state.ball.prev_pos = state.ball.pos;

    move_paddles(state, config, input);

    if config.effects.enabled {
        state.ball.record_trail(config.effects.trail_length);
    }
    let delta = state.ball.step_delta();
    state.ball.pos += delta;

    for side in [Side::Left, Side::Right] {
        let paddle = match side {
            Side::Left => &mut state.left,
            Side::Right => &mut state.right,
        };

        let contact = detect_paddle_contact(&state.ball, paddle);
        let Some(kind) = resolve_paddle_contact(&mut state.ball, paddle, contact, config) else {
            continue;
        };

        paddle.flash_ticks = config.paddle_flash_ticks;
        state.rally += 1;
        state.longest_rally = state.longest_rally.max(state.rally);

        let pos = state.ball.pos;
        log::debug!(
            "{:?} hit on {} paddle at ({:.1}, {:.1}), multiplier {:.2}",
            kind,
            side.as_str(),
            pos.x,
            pos.y,
            state.ball.speed_multiplier
        );
        events.push(GameEvent::PaddleHit {
            side,
            contact: kind,
            pos,
        });
        spawn_particles(
            &mut state.particles,
            &mut state.rng,
            &config.effects,
            pos,
            ParticleKind::Paddle,
        );
    }

    if let Some(wall) = bounce_off_walls(&mut state.ball, config.field_height) {
        let pos = state.ball.pos;
        events.push(GameEvent::WallBounce { wall, pos });
        spawn_particles(
            &mut state.particles,
            &mut state.rng,
            &config.effects,
            pos,
            ParticleKind::Wall,
        );
    }

    if let Some(scorer) = scoring_side(&state.ball, config.field_width) {
        award_point(state, config, scorer, events);
    }
}

fn move_paddles(state: &mut SimulationState, config: &SimConfig, input: &TickInput) {
    let max_y = config.paddle_max_y();

    for side in [Side::Left, Side::Right] {
        let (dir, speed) = if state.ai.enabled && state.ai.side == side {
            let dir = ai::steer(&state.ball, state.paddle(side), config.ai.deadzone);
            (dir, state.ai.difficulty.speed())
        } else {
            let held = match side {
                Side::Left => input.left,
                Side::Right => input.right,
            };
            (held.dir(), config.paddle_speed)
        };
        state.paddle_mut(side).move_by(dir, speed, max_y);
    }
}

fn award_point(state: &mut SimulationState, config: &SimConfig, scorer: Side, events: &mut Vec<GameEvent>) {
    state.score.increment(scorer);
    state.ball.speed_multiplier = config.base_multiplier();
    events.push(GameEvent::Goal { scorer });
    log::info!(
        "{} scores ({} - {}), rally {}",
        scorer.as_str(),
        state.score.left,
        state.score.right,
        state.rally
    );

    if let Some(winner) = state.score.winner(config.winning_score) {
        state.phase = GamePhase::MatchOver { winner };
        events.push(GameEvent::MatchOver { winner });
        log::info!(
            "Match over: {} wins {} - {}",
            winner.as_str(),
            state.score.left,
            state.score.right
        );
    } else if config.goal_pause_ticks == 0 {
        serve(state, config, config.serve_policy.serve_toward(scorer), events);
    } else {
        state.phase = GamePhase::GoalPause {
            ticks_left: config.goal_pause_ticks,
            scorer,
        };
    }
}

fn serve(state: &mut SimulationState, config: &SimConfig, toward: Side, events: &mut Vec<GameEvent>) {
    state.ball.serve(config.center(), config.serve_velocity(toward));
    state.ball.speed_multiplier = config.base_multiplier();
    state.rally = 0;
    state.phase = GamePhase::Playing;
    events.push(GameEvent::Serve { toward });
    log::debug!("Serve toward {}", toward.as_str());
}

/// Age particles and paddle flashes
fn update_effects(state: &mut SimulationState) {
    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| p.life > 0.0);

    state.left.flash_ticks = state.left.flash_ticks.saturating_sub(1);
    state.right.flash_ticks = state.right.flash_ticks.saturating_sub(1);
}

fn spawn_particles(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    effects: &EffectsConfig,
    pos: Vec2,
    kind: ParticleKind,
) {
    if !effects.enabled || effects.max_particles == 0 {
        return;
    }

    for _ in 0..effects.particles_per_hit {
        particles.push(Particle {
            pos,
            vel: Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0)),
            kind,
            life: 1.0,
            decay: rng.random_range(0.02..0.07),
            size: rng.random_range(2.0..6.0),
        });
    }

    if particles.len() > effects.max_particles {
        let excess = particles.len() - effects.max_particles;
        particles.drain(..excess);
    }
}

/// Owns a config and the state it drives
#[derive(Debug, Clone)]
pub struct BallPaddleSimulator {
    config: SimConfig,
    state: SimulationState,
}

impl BallPaddleSimulator {
    pub fn new(config: SimConfig) -> Self {
        let state = SimulationState::new(&config);
        Self { config, state }
    }

    /// Advance one tick
    pub fn step(&mut self, input: &TickInput) -> (&SimulationState, Vec<GameEvent>) {
        let events = tick(&mut self.state, &self.config, input);
        (&self.state, events)
    }

    /// Start a fresh match with the same config
    pub fn reset(&mut self) -> &SimulationState {
        self.state = SimulationState::new(&self.config);
        log::info!("Match reset");
        &self.state
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for scripted setups (tests, replays)
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
