//! Bricker - a brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (brick behaviors, transient entities, lives)
//! - `platform`: Window/dialog seams the simulation is driven through
//! - `settings`: Grid size, seed and run length

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 700.0;
    pub const WINDOW_HEIGHT: f32 = 500.0;
    pub const WINDOW_DIMENSIONS: Vec2 = Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    /// Walls and ceiling
    pub const WALL_WIDTH: f32 = 10.0;
    pub const CEILING_HEIGHT: f32 = 10.0;

    /// Brick grid
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_GAP: f32 = 5.0;
    pub const DEFAULT_COLUMNS: u32 = 8;
    pub const DEFAULT_ROWS: u32 = 7;

    /// Primary ball
    pub const BALL_SIZE: Vec2 = Vec2::new(20.0, 20.0);
    pub const BALL_SPEED: f32 = 150.0;
    pub const BALL_START: Vec2 = Vec2::new(350.0, 250.0);

    /// Secondary projectile ("puck")
    pub const PUCK_SIZE: Vec2 = Vec2::new(15.0, 15.0);
    pub const PUCK_SPEED: f32 = 150.0;

    /// Paddles
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 15.0);
    pub const PADDLE_SPEED: f32 = 300.0;
    /// Distance from the bottom of the window to the user paddle center
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;
    /// Collisions an extra paddle absorbs before it is retired
    pub const EXTRA_PADDLE_MAX_HITS: u32 = 4;

    /// Bonus hearts
    pub const HEART_SIZE: Vec2 = Vec2::new(15.0, 15.0);
    pub const HEART_FALL_SPEED: f32 = 100.0;
    pub const HEART_SLOTS: usize = 5;

    /// Lives
    pub const INITIAL_LIVES: u32 = 3;
    pub const LIVES_HARD_CAP: u32 = 4;

    /// Turbo mode: speed multiplier and qualifying impacts before reverting
    pub const TURBO_FACTOR: f32 = 1.4;
    pub const TURBO_IMPACTS: u32 = 6;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
