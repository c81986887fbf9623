//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID / slot index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod lives;
pub mod slots;
pub mod state;
pub mod strategy;
pub mod tick;

pub use collision::{CollisionResult, box_collision, boxes_overlap, reflect_velocity};
pub use entities::{
    Ball, Brick, Heart, Paddle, Tag, TurboSnapshot, TurboState, Visual, Wall,
};
pub use lives::{LivesColor, LivesTracker};
pub use slots::{SlotArena, SlotIndex};
pub use state::{GameEvent, GamePhase, GameState};
pub use strategy::{Behavior, HitEffect, StrategyFactory, StrategyKind, resolve, resolve_with};
pub use tick::{TickInput, tick};
