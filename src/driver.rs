//! Fixed-timestep driver
//!
//! Accumulates real frame time and consumes it in whole `SIM_DT` ticks.
//! Frames longer than `MAX_FRAME_DT` are clamped and at most `MAX_SUBSTEPS`
//! ticks run per frame; any backlog beyond that is dropped.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{BallPaddleSimulator, GameEvent, TickInput};

#[derive(Debug, Clone, Default)]
pub struct FixedStepDriver {
    accumulator: f32,
    /// One-shot toggles waiting for the next tick
    pending_pause: bool,
    pending_toggle_ai: bool,
}

impl FixedStepDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many ticks as `frame_dt` seconds cover and collect their events
    pub fn advance(
        &mut self,
        sim: &mut BallPaddleSimulator,
        frame_dt: f32,
        input: &TickInput,
    ) -> Vec<GameEvent> {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;
        self.pending_pause |= input.pause;
        self.pending_toggle_ai |= input.toggle_ai;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let tick_input = TickInput {
                pause: self.pending_pause,
                toggle_ai: self.pending_toggle_ai,
                ..input.held()
            };
            // Clear one-shot inputs after processing
            self.pending_pause = false;
            self.pending_toggle_ai = false;

            let (_, tick_events) = sim.step(&tick_input);
            events.extend(tick_events);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if self.accumulator >= SIM_DT {
            log::debug!(
                "Dropping {:.1} ticks of backlog",
                self.accumulator / SIM_DT
            );
            self.accumulator %= SIM_DT;
        }

        events
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / SIM_DT).clamp(0.0, 1.0)
    }
}
