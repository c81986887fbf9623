//! Collision detection and response for axis-aligned boxes
//!
//! Every entity is a box (center + size). Overlap is resolved along the
//! axis of least penetration, which also gives the surface normal used to
//! reflect the projectile.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal (pointing from the obstacle toward the mover)
    pub normal: Vec2,
    /// Penetration depth along the normal
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// True if `velocity` is moving into the surface (a bounce is due)
    pub fn is_approaching(&self, velocity: Vec2) -> bool {
        self.hit && velocity.dot(self.normal) < 0.0
    }
}

/// Check a moving box against an obstacle box
pub fn box_collision(
    mover_center: Vec2,
    mover_size: Vec2,
    obstacle_center: Vec2,
    obstacle_size: Vec2,
) -> CollisionResult {
    let delta = mover_center - obstacle_center;
    let overlap = (mover_size + obstacle_size) / 2.0 - delta.abs();

    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionResult::miss();
    }

    if overlap.x < overlap.y {
        CollisionResult {
            hit: true,
            normal: Vec2::new(delta.x.signum(), 0.0),
            penetration: overlap.x,
        }
    } else {
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, delta.y.signum()),
            penetration: overlap.y,
        }
    }
}

/// Plain overlap test (no response)
pub fn boxes_overlap(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> bool {
    box_collision(a_center, a_size, b_center, b_size).hit
}

/// Reflect velocity off a surface with given normal
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
