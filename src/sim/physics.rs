//! Character physics
//!
//! Explicit Euler gravity with a hard floor at the ground line. The
//! character never moves horizontally; the world scrolls past it.

use super::entity::Body;

/// Apply gravity for `dt_ms`: velocity first, then position
pub fn integrate(body: &mut Body, dt_ms: f32, gravity: f32) {
    let dt = dt_ms / 1000.0;
    body.vel.y += gravity * dt;
    body.pos.y += body.vel.y * dt;
}

/// Clamp the body to the ground line. Returns true when grounded.
pub fn resolve_ground(body: &mut Body, ground_y: f32) -> bool {
    if body.pos.y + body.size.y >= ground_y {
        place_on_ground(body, ground_y);
        true
    } else {
        false
    }
}

/// Stand the body on the ground line, at rest
pub fn place_on_ground(body: &mut Body, ground_y: f32) {
    body.pos.y = ground_y - body.size.y;
    body.vel.y = 0.0;
}

/// One physics step. Returns the new on-ground state.
pub fn step(body: &mut Body, dt_ms: f32, gravity: f32, ground_y: f32) -> bool {
    integrate(body, dt_ms, gravity);
    resolve_ground(body, ground_y)
}
