//! Collision detection and response for ball vs. paddles and walls
//!
//! Paddle contacts go through a single swept resolver: the face is tested
//! first, then the top/bottom edges, then the corners, and the first match
//! wins. A paddle therefore produces at most one response per tick and no
//! velocity axis is ever inverted twice for the same contact.

use glam::Vec2;

use super::state::{Ball, ContactKind, Paddle, Side, Wall};
use crate::config::SimConfig;

/// Top or bottom edge of a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleEdge {
    Top,
    Bottom,
}

/// Result of testing one paddle against the ball's motion this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaddleContact {
    Miss,
    /// Leading edge crossed the paddle face; `hit_y` is the ball's y at the crossing
    Side { hit_y: f32 },
    /// Ball crossed the plane of a horizontal edge inside the paddle's x-span
    Edge { edge: PaddleEdge },
    /// Ball center is within one radius of a corner and closing on it
    Corner { corner: Vec2, normal: Vec2 },
}

impl PaddleContact {
    pub fn kind(&self) -> Option<ContactKind> {
        match self {
            PaddleContact::Miss => None,
            PaddleContact::Side { .. } => Some(ContactKind::Side),
            PaddleContact::Edge { .. } => Some(ContactKind::Edge),
            PaddleContact::Corner { .. } => Some(ContactKind::Corner),
        }
    }
}

/// Test the ball's motion from `prev_pos` to `pos` against a paddle
pub fn detect_paddle_contact(ball: &Ball, paddle: &Paddle) -> PaddleContact {
    if let Some(hit_y) = side_contact(ball, paddle) {
        return PaddleContact::Side { hit_y };
    }
    if let Some(edge) = edge_contact(ball, paddle) {
        return PaddleContact::Edge { edge };
    }
    if let Some((corner, normal)) = corner_contact(ball, paddle) {
        return PaddleContact::Corner { corner, normal };
    }
    PaddleContact::Miss
}

/// Swept test of the ball's leading edge against the paddle face
fn side_contact(ball: &Ball, paddle: &Paddle) -> Option<f32> {
    let r = ball.radius;
    let face = paddle.face_x();
    // Direction of travel that approaches the face
    let toward = -paddle.away_sign();
    let delta = ball.pos - ball.prev_pos;

    if delta.x * toward <= 0.0 {
        return None;
    }

    // Signed distance from the leading edge to the face, positive before contact
    let gap = |x: f32| (face - x) * toward - r;
    let gap_prev = gap(ball.prev_pos.x);
    let gap_now = gap(ball.pos.x);
    if gap_prev < 0.0 || gap_now > 0.0 {
        return None;
    }

    let t = gap_prev / (gap_prev - gap_now);
    let hit_y = ball.prev_pos.y + delta.y * t;

    if hit_y + r > paddle.top() && hit_y - r < paddle.bottom() {
        Some(hit_y)
    } else {
        None
    }
}

/// Swept test against the top and bottom edge planes
fn edge_contact(ball: &Ball, paddle: &Paddle) -> Option<PaddleEdge> {
    let r = ball.radius;
    let delta = ball.pos - ball.prev_pos;

    let (edge, gap_prev, gap_now) = if delta.y > 0.0 {
        (
            PaddleEdge::Top,
            paddle.top() - (ball.prev_pos.y + r),
            paddle.top() - (ball.pos.y + r),
        )
    } else if delta.y < 0.0 {
        (
            PaddleEdge::Bottom,
            (ball.prev_pos.y - r) - paddle.bottom(),
            (ball.pos.y - r) - paddle.bottom(),
        )
    } else {
        return None;
    };

    if gap_prev < 0.0 || gap_now > 0.0 {
        return None;
    }

    let t = gap_prev / (gap_prev - gap_now);
    let cross_x = ball.prev_pos.x + delta.x * t;
    if cross_x >= paddle.x && cross_x <= paddle.x + paddle.width {
        Some(edge)
    } else {
        None
    }
}

/// Nearest corner closer than one radius, if the ball is moving toward it
fn corner_contact(ball: &Ball, paddle: &Paddle) -> Option<(Vec2, Vec2)> {
    let r = ball.radius;
    let (corner, dist) = paddle
        .corners()
        .into_iter()
        .map(|c| (c, ball.pos.distance(c)))
        .filter(|(_, d)| *d < r)
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    let offset = ball.pos - corner;
    if dist <= f32::EPSILON {
        // Center sits on the corner; push straight out of the paddle
        return Some((corner, Vec2::new(paddle.away_sign(), 0.0)));
    }

    let normal = offset / dist;
    if ball.vel.dot(normal) >= 0.0 {
        // Already separating
        return None;
    }
    Some((corner, normal))
}

/// Apply the response for `contact`, returning the kind of hit that occurred
pub fn resolve_paddle_contact(
    ball: &mut Ball,
    paddle: &Paddle,
    contact: PaddleContact,
    config: &SimConfig,
) -> Option<ContactKind> {
    let r = ball.radius;
    let away = paddle.away_sign();

    match contact {
        PaddleContact::Miss => return None,
        PaddleContact::Side { hit_y } => {
            ball.pos.x = paddle.face_x() + away * r;
            ball.vel.x = away * ball.vel.x.abs();

            let offset = (hit_y - paddle.center_y()) / (paddle.height / 2.0);
            ball.vel.y += offset * config.deflection_gain;

            ball.speed_multiplier =
                (ball.speed_multiplier + config.speed_increment).min(config.speed_cap);
        }
        PaddleContact::Edge { edge } => {
            match edge {
                PaddleEdge::Top => {
                    ball.pos.y = paddle.top() - r;
                    ball.vel.y = -ball.vel.y.abs();
                }
                PaddleEdge::Bottom => {
                    ball.pos.y = paddle.bottom() + r;
                    ball.vel.y = ball.vel.y.abs();
                }
            }
            ball.vel.x = away * ball.vel.x.abs();
        }
        PaddleContact::Corner { corner, normal } => {
            ball.pos = corner + normal * r;
            if ball.vel.dot(normal) < 0.0 {
                ball.vel = reflect_velocity(ball.vel, normal);
            }
        }
    }

    contact.kind()
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Clamp the ball inside the top/bottom walls, sending it away from the wall it hit
pub fn bounce_off_walls(ball: &mut Ball, field_height: f32) -> Option<Wall> {
    let r = ball.radius;
    let top_gap = ball.pos.y - r;
    let bottom_gap = field_height - (ball.pos.y + r);

    if top_gap < 0.0 || (top_gap == 0.0 && ball.vel.y < 0.0) {
        ball.pos.y = r;
        ball.vel.y = ball.vel.y.abs();
        Some(Wall::Top)
    } else if bottom_gap < 0.0 || (bottom_gap == 0.0 && ball.vel.y > 0.0) {
        ball.pos.y = field_height - r;
        ball.vel.y = -ball.vel.y.abs();
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Side that scores if the ball has left the field horizontally
pub fn scoring_side(ball: &Ball, field_width: f32) -> Option<Side> {
    if ball.pos.x + ball.radius > field_width {
        Some(Side::Left)
    } else if ball.pos.x - ball.radius < 0.0 {
        Some(Side::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (SimConfig, Paddle, Paddle) {
        let config = SimConfig::new();
        let left = Paddle::new(Side::Left, &config);
        let right = Paddle::new(Side::Right, &config);
        (config, left, right)
    }

    fn moving_ball(prev: Vec2, pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos, vel, 15.0);
        ball.prev_pos = prev;
        ball
    }

    #[test]
    fn test_side_hit_left_paddle() {
        let (config, left, _) = setup();
        // Leading edge goes from x=65 to x=57, across the face at x=60
        let mut ball = moving_ball(Vec2::new(80.0, 300.0), Vec2::new(72.0, 300.0), Vec2::new(-8.0, 0.0));

        let contact = detect_paddle_contact(&ball, &left);
        assert!(matches!(contact, PaddleContact::Side { .. }));

        let kind = resolve_paddle_contact(&mut ball, &left, contact, &config);
        assert_eq!(kind, Some(ContactKind::Side));
        assert_eq!(ball.pos.x, 75.0, "Ball sits on the contact plane");
        assert!(ball.vel.x > 0.0, "Ball should bounce right after hitting left paddle");
        assert!((ball.speed_multiplier - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_side_hit_right_paddle() {
        let (config, _, right) = setup();
        let mut ball = moving_ball(Vec2::new(930.0, 300.0), Vec2::new(938.0, 300.0), Vec2::new(8.0, 0.0));

        let contact = detect_paddle_contact(&ball, &right);
        assert!(matches!(contact, PaddleContact::Side { .. }));
        resolve_paddle_contact(&mut ball, &right, contact, &config);

        assert_eq!(ball.pos.x, 935.0);
        assert!(ball.vel.x < 0.0, "Ball should bounce left after hitting right paddle");
    }

    #[test]
    fn test_fast_ball_does_not_tunnel() {
        let (config, left, _) = setup();
        // Whole ball ends up behind the paddle in a single tick
        let mut ball = moving_ball(Vec2::new(120.0, 300.0), Vec2::new(20.0, 300.0), Vec2::new(-100.0, 0.0));

        let contact = detect_paddle_contact(&ball, &left);
        assert!(matches!(contact, PaddleContact::Side { .. }));
        resolve_paddle_contact(&mut ball, &left, contact, &config);
        assert_eq!(ball.pos.x, 75.0);
    }

    #[test]
    fn test_no_hit_when_moving_away() {
        let (_, left, _) = setup();
        let ball = moving_ball(Vec2::new(75.0, 300.0), Vec2::new(80.0, 300.0), Vec2::new(5.0, 0.0));
        assert_eq!(detect_paddle_contact(&ball, &left), PaddleContact::Miss);
    }

    #[test]
    fn test_no_hit_when_vertically_clear() {
        let (_, left, _) = setup();
        // Paddle spans 260..340; ball bottom edge at 240
        let ball = moving_ball(Vec2::new(80.0, 225.0), Vec2::new(70.0, 225.0), Vec2::new(-10.0, 0.0));
        assert_eq!(detect_paddle_contact(&ball, &left), PaddleContact::Miss);
    }

    #[test]
    fn test_hit_position_sets_deflection() {
        let (config, left, _) = setup();

        let mut top = moving_ball(Vec2::new(80.0, 262.0), Vec2::new(72.0, 262.0), Vec2::new(-8.0, 0.0));
        let contact = detect_paddle_contact(&top, &left);
        resolve_paddle_contact(&mut top, &left, contact, &config);
        assert!(top.vel.y < 0.0, "Ball should deflect upward when hitting top of paddle");

        let mut bottom = moving_ball(Vec2::new(80.0, 338.0), Vec2::new(72.0, 338.0), Vec2::new(-8.0, 0.0));
        let contact = detect_paddle_contact(&bottom, &left);
        resolve_paddle_contact(&mut bottom, &left, contact, &config);
        assert!(bottom.vel.y > 0.0, "Ball should deflect downward when hitting bottom of paddle");

        let mut center = moving_ball(Vec2::new(80.0, 300.0), Vec2::new(72.0, 300.0), Vec2::new(-8.0, 0.0));
        let contact = detect_paddle_contact(&center, &left);
        resolve_paddle_contact(&mut center, &left, contact, &config);
        assert_eq!(center.vel.y, 0.0);
    }

    #[test]
    fn test_rim_hit_deflects_past_gain() {
        let (config, left, _) = setup();
        // Only the ball's lower rim overlaps the paddle top: offset is -50 / 40
        let mut ball = moving_ball(Vec2::new(80.0, 250.0), Vec2::new(72.0, 250.0), Vec2::new(-8.0, 0.0));
        let contact = detect_paddle_contact(&ball, &left);
        assert!(matches!(contact, PaddleContact::Side { .. }));
        resolve_paddle_contact(&mut ball, &left, contact, &config);
        assert_eq!(ball.vel.y, -2.5);
    }

    #[test]
    fn test_multiplier_respects_cap() {
        let (config, left, _) = setup();
        let mut ball = moving_ball(Vec2::new(80.0, 300.0), Vec2::new(72.0, 300.0), Vec2::new(-4.0, 0.0));
        ball.speed_multiplier = 1.98;
        let contact = detect_paddle_contact(&ball, &left);
        resolve_paddle_contact(&mut ball, &left, contact, &config);
        assert_eq!(ball.speed_multiplier, config.speed_cap);
    }

    #[test]
    fn test_top_edge_hit() {
        let (config, left, _) = setup();
        // Falling onto the top of the left paddle (x-span 50..60)
        let mut ball = moving_ball(Vec2::new(55.0, 240.0), Vec2::new(54.0, 250.0), Vec2::new(-1.0, 10.0));

        let contact = detect_paddle_contact(&ball, &left);
        assert_eq!(contact, PaddleContact::Edge { edge: PaddleEdge::Top });

        let kind = resolve_paddle_contact(&mut ball, &left, contact, &config);
        assert_eq!(kind, Some(ContactKind::Edge));
        assert_eq!(ball.pos.y, 245.0);
        assert!(ball.vel.y < 0.0);
        assert!(ball.vel.x > 0.0, "Edge hits send the ball back into play");
        assert_eq!(ball.speed_multiplier, 1.0, "Edge hits do not speed the ball up");
    }

    #[test]
    fn test_bottom_edge_hit() {
        let (config, _, right) = setup();
        // Rising into the bottom of the right paddle (x-span 950..960, bottom 340)
        let mut ball = moving_ball(Vec2::new(955.0, 360.0), Vec2::new(956.0, 350.0), Vec2::new(1.0, -10.0));

        let contact = detect_paddle_contact(&ball, &right);
        assert_eq!(contact, PaddleContact::Edge { edge: PaddleEdge::Bottom });
        resolve_paddle_contact(&mut ball, &right, contact, &config);
        assert_eq!(ball.pos.y, 355.0);
        assert!(ball.vel.y > 0.0);
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_side_takes_precedence_over_corner() {
        let (config, left, _) = setup();
        // Crosses the face near the top while ending within a radius of the (60, 260) corner
        let mut ball = moving_ball(Vec2::new(78.0, 244.0), Vec2::new(70.0, 254.0), Vec2::new(-8.0, 10.0));
        assert!(ball.pos.distance(Vec2::new(60.0, 260.0)) < ball.radius);

        let contact = detect_paddle_contact(&ball, &left);
        assert!(matches!(contact, PaddleContact::Side { .. }));
        resolve_paddle_contact(&mut ball, &left, contact, &config);
        assert!(ball.vel.x > 0.0);
        // Face crossed at t = 3/8, so hit_y = 247.75
        let expected = 10.0 + (247.75 - 300.0) / 40.0 * config.deflection_gain;
        assert!((ball.vel.y - expected).abs() < 1e-4, "vy only receives the deflection");
    }

    #[test]
    fn test_corner_hit() {
        let (config, left, _) = setup();
        // Top-right corner of the left paddle is (60, 260); approach diagonally
        let corner = Vec2::new(60.0, 260.0);
        let pos = corner + Vec2::new(8.0, -8.0);
        let mut ball = moving_ball(pos, pos, Vec2::new(-3.0, 3.0));

        let contact = detect_paddle_contact(&ball, &left);
        assert!(matches!(contact, PaddleContact::Corner { .. }));

        let kind = resolve_paddle_contact(&mut ball, &left, contact, &config);
        assert_eq!(kind, Some(ContactKind::Corner));
        assert!((ball.pos.distance(corner) - ball.radius).abs() < 1e-3);
        assert!(ball.vel.x > 0.0 && ball.vel.y < 0.0, "Reflected straight back");
    }

    #[test]
    fn test_corner_ignored_when_separating() {
        let (_, left, _) = setup();
        let corner = Vec2::new(60.0, 260.0);
        let pos = corner + Vec2::new(8.0, -8.0);
        let ball = moving_ball(pos, pos, Vec2::new(3.0, -3.0));
        assert_eq!(detect_paddle_contact(&ball, &left), PaddleContact::Miss);
    }

    #[test]
    fn test_reflect_velocity() {
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_wall_bounce_top_and_bottom() {
        let mut ball = Ball::new(Vec2::new(500.0, 10.0), Vec2::new(4.0, -4.0), 15.0);
        assert_eq!(bounce_off_walls(&mut ball, 600.0), Some(Wall::Top));
        assert_eq!(ball.pos.y, 15.0);
        assert_eq!(ball.vel.y, 4.0);

        let mut ball = Ball::new(Vec2::new(500.0, 590.0), Vec2::new(4.0, 4.0), 15.0);
        assert_eq!(bounce_off_walls(&mut ball, 600.0), Some(Wall::Bottom));
        assert_eq!(ball.pos.y, 585.0);
        assert_eq!(ball.vel.y, -4.0);
    }

    #[test]
    fn test_wall_bounce_never_double_inverts() {
        // Touching the wall but already moving away
        let mut ball = Ball::new(Vec2::new(500.0, 15.0), Vec2::new(4.0, 4.0), 15.0);
        assert_eq!(bounce_off_walls(&mut ball, 600.0), None);
        assert_eq!(ball.vel.y, 4.0);
    }

    #[test]
    fn test_scoring_side() {
        let ball = Ball::new(Vec2::new(990.0, 300.0), Vec2::ZERO, 15.0);
        assert_eq!(scoring_side(&ball, 1000.0), Some(Side::Left));

        let ball = Ball::new(Vec2::new(10.0, 300.0), Vec2::ZERO, 15.0);
        assert_eq!(scoring_side(&ball, 1000.0), Some(Side::Right));

        let ball = Ball::new(Vec2::new(500.0, 300.0), Vec2::ZERO, 15.0);
        assert_eq!(scoring_side(&ball, 1000.0), None);
    }
}
