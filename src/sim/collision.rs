//! Collision tests and bounce responses
//!
//! Everything here is discrete overlap testing on the current positions:
//! circle-vs-box for balls, box-vs-box for gifts and projectiles. A ball fast
//! enough to skip over a thin brick in one tick simply passes through it.

use glam::Vec2;

use super::body::Rect;

/// Check whether a circle overlaps a rectangle
///
/// Uses the closest point of the rectangle to the circle center, so corner
/// contacts are detected as well as edge contacts.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) < radius * radius
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Brick response: the vertical component always flips, whatever side was hit
#[inline]
pub fn brick_bounce(velocity: Vec2) -> Vec2 {
    reflect_velocity(velocity, Vec2::Y)
}

/// Paddle response: the contact offset steers the ball
///
/// The ball center's offset from the paddle center, normalized to [-1, 1],
/// maps linearly onto [-max_angle, max_angle] measured from straight up.
/// Speed is preserved and the result always travels upward.
pub fn paddle_bounce(ball_x: f32, velocity: Vec2, paddle: &Rect, max_angle: f32) -> Vec2 {
    let half_width = paddle.width() / 2.0;
    let offset = ((ball_x - paddle.center().x) / half_width).clamp(-1.0, 1.0);
    let angle = offset * max_angle;
    let speed = velocity.length();
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

/// Check if a ball has left the field through the bottom edge
pub fn ball_past_bottom(center: Vec2, radius: f32, field_height: f32) -> bool {
    center.y + radius > field_height
}
