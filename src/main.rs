//! Arcade Pong entry point
//!
//! Native: plays a headless AI-vs-AI match through the fixed-step driver and
//! records the longest rally. Optional first argument: a JSON tuning file.
//! Web: the page drives `web::WasmSimulator`; there is nothing to run here.

#[cfg(not(target_arch = "wasm32"))]
use arcade_pong::{
    ConfigError, FixedStepDriver, HighScore, Settings, SimConfig,
    consts::SIM_HZ,
    sim::{BallPaddleSimulator, GameEvent, PaddleInput, Side, TickInput, steer},
};

/// Simulated display rate for the headless loop
#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 60.0;

/// Give up on a match after ten simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 10 * 60 * SIM_HZ as u64;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Arcade Pong (native) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), ConfigError> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => {
            let mut config = SimConfig::default();
            Settings::load().apply(&mut config);
            config
        }
    };
    // The built-in AI takes its configured side; the binary steers the other
    config.ai.enabled = true;
    let human_side = config.ai.side.opposite();

    let mut sim = BallPaddleSimulator::new(config);
    let mut driver = FixedStepDriver::new();
    let mut high_score = HighScore::load();
    let mut paddle_hits = 0u32;

    while !sim.state().is_match_over() && sim.state().time_ticks < MAX_TICKS {
        let state = sim.state();
        let dir = steer(&state.ball, state.paddle(human_side), sim.config().ai.deadzone);
        let held = PaddleInput {
            up: dir < 0,
            down: dir > 0,
        };
        let input = match human_side {
            Side::Left => TickInput {
                left: held,
                ..Default::default()
            },
            Side::Right => TickInput {
                right: held,
                ..Default::default()
            },
        };

        for event in driver.advance(&mut sim, FRAME_DT, &input) {
            if let GameEvent::PaddleHit { .. } = event {
                paddle_hits += 1;
            }
        }
    }

    let state = sim.state();
    if !state.is_match_over() {
        log::warn!("Match stopped after {} ticks without a winner", state.time_ticks);
    }
    log::info!(
        "Final score {} - {}, {} paddle hits, longest rally {}",
        state.score.left,
        state.score.right,
        paddle_hits,
        state.longest_rally
    );

    if high_score.submit(state.longest_rally) {
        log::info!("New best rally: {}", high_score.best_rally);
        if let Err(e) = high_score.save() {
            log::warn!("Could not save high score: {e}");
        }
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `web::wasm_start`
}
