//! Entity types tracked by the simulation
//!
//! Every entity is plain data: a center position, a size and (for movers) a
//! velocity. The rendering/physics collaborator mirrors them by id and tag.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::reflect_velocity;
use super::strategy::Behavior;
use crate::consts::*;

/// Identity tag compared with string-equality semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Ball,
    TurboBall,
    PuckBall,
    Brick,
    UserPaddle,
    ExtraPaddle,
    Heart,
    LeftWall,
    RightWall,
    Ceiling,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Ball => "ball",
            Tag::TurboBall => "turboBall",
            Tag::PuckBall => "puckBall",
            Tag::Brick => "brick",
            Tag::UserPaddle => "userPaddle",
            Tag::ExtraPaddle => "extraPaddle",
            Tag::Heart => "heart",
            Tag::LeftWall => "leftWall",
            Tag::RightWall => "rightWall",
            Tag::Ceiling => "ceiling",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Projectile appearance the renderer swaps on turbo entry/exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visual {
    Ball,
    TurboBall,
    Puck,
}

/// Appearance and speed captured the moment turbo mode starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurboSnapshot {
    pub visual: Visual,
    pub tag: Tag,
    pub speed: f32,
}

/// Turbo state machine: Normal -> Turbo on a turbo brick, back after
/// `TURBO_IMPACTS` qualifying impacts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TurboState {
    #[default]
    Normal,
    Turbo { impacts: u32, snapshot: TurboSnapshot },
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub tag: Tag,
    pub visual: Visual,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub turbo: TurboState,
}

impl Ball {
    pub fn primary(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            tag: Tag::Ball,
            visual: Visual::Ball,
            pos,
            size: BALL_SIZE,
            vel,
            turbo: TurboState::Normal,
        }
    }

    pub fn puck(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            tag: Tag::PuckBall,
            visual: Visual::Puck,
            pos,
            size: PUCK_SIZE,
            vel,
            turbo: TurboState::Normal,
        }
    }

    pub fn is_turbo(&self) -> bool {
        matches!(self.turbo, TurboState::Turbo { .. })
    }

    /// Qualifying impacts counted since turbo mode started (0 when normal)
    pub fn turbo_impacts(&self) -> u32 {
        match self.turbo {
            TurboState::Turbo { impacts, .. } => impacts,
            TurboState::Normal => 0,
        }
    }

    /// Switch to turbo mode. Returns false (and changes nothing) if already boosted.
    pub fn enter_turbo(&mut self) -> bool {
        if self.is_turbo() {
            return false;
        }
        let snapshot = TurboSnapshot {
            visual: self.visual,
            tag: self.tag,
            speed: self.vel.length(),
        };
        self.vel *= TURBO_FACTOR;
        self.visual = Visual::TurboBall;
        self.tag = Tag::TurboBall;
        self.turbo = TurboState::Turbo {
            impacts: 0,
            snapshot,
        };
        true
    }

    /// Bounce off `other` along `normal` and advance the turbo counter.
    ///
    /// Returns true if this impact ended turbo mode.
    pub fn on_impact(&mut self, other: Tag, normal: Vec2) -> bool {
        self.vel = reflect_velocity(self.vel, normal);

        if other == Tag::Heart {
            return false;
        }
        match &mut self.turbo {
            TurboState::Turbo { impacts, .. } => {
                *impacts += 1;
                if *impacts >= TURBO_IMPACTS {
                    self.exit_turbo();
                    return true;
                }
                false
            }
            TurboState::Normal => false,
        }
    }

    fn exit_turbo(&mut self) {
        if let TurboState::Turbo { snapshot, .. } = self.turbo {
            self.vel = self.vel.normalize_or_zero() * snapshot.speed;
            self.visual = snapshot.visual;
            self.tag = snapshot.tag;
            self.turbo = TurboState::Normal;
        }
    }
}

/// A paddle: the user's own, or the single bonus one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: u32,
    pub tag: Tag,
    pub pos: Vec2,
    pub size: Vec2,
    /// Projectile collisions absorbed (only counted for the extra paddle)
    pub hits: u32,
}

impl Paddle {
    pub fn new(id: u32, tag: Tag, pos: Vec2) -> Self {
        Self {
            id,
            tag,
            pos,
            size: PADDLE_SIZE,
            hits: 0,
        }
    }

    /// Move horizontally by `direction` (-1 left, +1 right), kept between the walls
    pub fn move_by(&mut self, direction: f32, dt: f32, window_width: f32) {
        let half = self.size.x / 2.0;
        let step = direction.clamp(-1.0, 1.0) * PADDLE_SPEED * dt;
        self.pos.x = (self.pos.x + step).clamp(WALL_WIDTH + half, window_width - WALL_WIDTH - half);
    }

    pub fn record_hit(&mut self) {
        if self.tag == Tag::ExtraPaddle {
            self.hits += 1;
        }
    }

    pub fn is_worn_out(&self) -> bool {
        self.tag == Tag::ExtraPaddle && self.hits >= EXTRA_PADDLE_MAX_HITS
    }
}

/// A destructible grid cell with its behavior fixed at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub behavior: Behavior,
}

/// A falling bonus heart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heart {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Tag of the paddle allowed to collect this heart
    pub collector: Tag,
}

impl Heart {
    pub fn new(id: u32, pos: Vec2, collector: Tag) -> Self {
        Self {
            id,
            pos,
            size: HEART_SIZE,
            vel: Vec2::new(0.0, HEART_FALL_SPEED),
            collector,
        }
    }

    /// Top edge below the bottom of the window
    pub fn is_below(&self, window_height: f32) -> bool {
        self.pos.y - self.size.y / 2.0 > window_height
    }
}

/// Static boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: u32,
    pub tag: Tag,
    pub pos: Vec2,
    pub size: Vec2,
}
