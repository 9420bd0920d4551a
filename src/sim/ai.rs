//! AI paddle controller
//!
//! Proportional tracker: aim at where the ball will cross the paddle's face
//! (straight-line extrapolation, wall bounces ignored) and move at a fixed
//! speed until the paddle center is within the deadzone.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};

/// AI difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl AiDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiDifficulty::Easy => "Easy",
            AiDifficulty::Medium => "Medium",
            AiDifficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(AiDifficulty::Easy),
            "medium" | "med" => Some(AiDifficulty::Medium),
            "hard" => Some(AiDifficulty::Hard),
            _ => None,
        }
    }

    /// Paddle speed in pixels per tick
    pub fn speed(&self) -> f32 {
        match self {
            AiDifficulty::Easy => 4.0,
            AiDifficulty::Medium => 5.0,
            AiDifficulty::Hard => 6.0,
        }
    }
}

/// Y at which the ball will reach the paddle face, or the ball's current y
/// when it is not heading toward the paddle
pub fn predict_intercept_y(ball: &Ball, paddle: &Paddle) -> f32 {
    let vx = ball.vel.x;
    if vx.abs() <= f32::EPSILON {
        return ball.pos.y;
    }

    let toward = -paddle.away_sign();
    if vx * toward <= 0.0 {
        return ball.pos.y;
    }

    ball.pos.y + (paddle.face_x() - ball.pos.x) / vx * ball.vel.y
}

/// Movement direction for the AI paddle: -1 up, 0 hold, 1 down
pub fn steer(ball: &Ball, paddle: &Paddle, deadzone: f32) -> i8 {
    let target = predict_intercept_y(ball, paddle);
    let center = paddle.center_y();

    if target < center - deadzone {
        -1
    } else if target > center + deadzone {
        1
    } else {
        0
    }
}
