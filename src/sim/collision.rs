//! Collision detection and response for circular balls
//!
//! Pair functions take the outer-loop ball as `a` and the inner-loop ball as
//! `b`. The velocity response is deliberately asymmetric: `a` bounces back
//! with restitution and `b` receives a share of `a`'s normal momentum.

use glam::Vec2;

use super::balls::Ball;
use crate::consts::{MIN_NORMAL_LENGTH, RESTITUTION};

/// Two balls touch or overlap when their centers are no further apart than
/// the sum of their radii
#[inline]
pub fn balls_collided(a: &Ball, b: &Ball) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}

/// Unit normal pointing from `a` to `b` and the center distance.
/// `None` when the centers (nearly) coincide.
fn contact_normal(a: &Ball, b: &Ball) -> Option<(Vec2, f32)> {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance < MIN_NORMAL_LENGTH {
        return None;
    }
    Some((delta / distance, distance))
}

/// Push two overlapping balls apart, half the overlap each, along the line
/// between their centers
///
/// Returns the overlap that was corrected (0.0 if nothing moved).
pub fn resolve_ball_overlap(a: &mut Ball, b: &mut Ball) -> f32 {
    let Some((normal, distance)) = contact_normal(a, b) else {
        return 0.0;
    };

    let overlap = (a.radius + b.radius) - distance;
    if overlap <= 0.0 {
        return 0.0;
    }

    let correction = normal * (overlap / 2.0);
    a.pos -= correction;
    b.pos += correction;
    overlap
}

/// Velocity response for a colliding pair
///
/// Velocities are split into normal and tangential parts along the line
/// between centers. Tangential parts are kept (frictionless contact).
/// Normal parts after contact:
/// - `a`: `-RESTITUTION * va_n`
/// - `b`: `(1 + RESTITUTION) * ma / (ma + mb) * va_n` (`b`'s own normal speed is dropped)
pub fn handle_ball_collision(a: &mut Ball, b: &mut Ball) {
    let Some((normal, _)) = contact_normal(a, b) else {
        return;
    };
    let tangent = normal.perp();

    let va_n = a.vel.dot(normal);
    let va_t = a.vel.dot(tangent);
    let vb_t = b.vel.dot(tangent);

    let va_n_after = -RESTITUTION * va_n;
    let vb_n_after = (1.0 + RESTITUTION) * (a.mass / (a.mass + b.mass)) * va_n;

    a.vel = normal * va_n_after + tangent * va_t;
    b.vel = normal * vb_n_after + tangent * vb_t;
}

/// Bounce a ball off the floor at `floor_y`
///
/// Returns true if the ball reached the floor this frame.
pub fn ball_floor_collision(ball: &mut Ball, floor_y: f32) -> bool {
    if ball.bottom() >= floor_y {
        ball.vel.y *= -RESTITUTION;
        ball.pos.y = floor_y - ball.radius;
        return true;
    }
    false
}
