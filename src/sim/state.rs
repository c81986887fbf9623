//! Game state and the transient-entity lifecycle
//!
//! `GameState` exclusively owns every entity, the lives tracker and the
//! brick counter. Brick behaviors never touch entities directly: they
//! resolve to [`HitEffect`]s which [`GameState::on_brick_hit`] applies
//! through the create/remove API below.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Ball, Brick, Heart, Paddle, Tag, Wall};
use super::lives::LivesTracker;
use super::slots::{SlotArena, SlotIndex};
use super::strategy::{self, HitEffect, StrategyFactory};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Offset mixed into the run seed for the brick-strategy generator
const FACTORY_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every brick is gone
    Won,
    /// Out of lives
    Lost,
}

/// Lifecycle notifications for the driver, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickRemoved { id: u32, remaining: u32 },
    ProjectileSpawned { id: u32 },
    ProjectileLost { id: u32 },
    ExtraPaddleSpawned { id: u32 },
    ExtraPaddleRetired { id: u32 },
    HeartSpawned { slot: SlotIndex },
    HeartCollected { slot: SlotIndex },
    HeartDropped { slot: SlotIndex },
    TurboStarted { id: u32 },
    TurboEnded { id: u32 },
    LifeLost { remaining: u32 },
    Won,
    GameOver,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub window: Vec2,
    pub columns: u32,
    pub rows: u32,
    pub lives: LivesTracker,
    /// Primary projectile
    pub ball: Ball,
    /// Secondary projectiles spawned by bricks
    pub pucks: Vec<Ball>,
    pub paddle: Paddle,
    /// At most one bonus paddle at a time
    pub extra_paddle: Option<Paddle>,
    pub hearts: SlotArena<Heart>,
    pub bricks: Vec<Brick>,
    pub walls: Vec<Wall>,
    /// Bricks still standing; reaching zero wins the game
    pub brick_counter: u32,
    pub time_ticks: u64,
    pub events: Vec<GameEvent>,
    factory: StrategyFactory,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Build a fresh game with a `columns` x `rows` brick grid
    pub fn new(seed: u64, columns: u32, rows: u32) -> Self {
        let window = WINDOW_DIMENSIONS;
        let mut rng = Pcg32::seed_from_u64(seed);

        let horizontal = if rng.random_bool(0.5) {
            BALL_SPEED
        } else {
            -BALL_SPEED
        };
        let ball = Ball::primary(1, BALL_START, Vec2::new(horizontal, BALL_SPEED));
        let paddle = Paddle::new(
            2,
            Tag::UserPaddle,
            Vec2::new(window.x / 2.0, window.y - PADDLE_BOTTOM_OFFSET),
        );

        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            window,
            columns,
            rows,
            lives: LivesTracker::new(INITIAL_LIVES, LIVES_HARD_CAP),
            ball,
            pucks: Vec::new(),
            paddle,
            extra_paddle: None,
            hearts: SlotArena::with_capacity(HEART_SLOTS),
            bricks: Vec::new(),
            walls: Vec::new(),
            brick_counter: 0,
            time_ticks: 0,
            events: Vec::new(),
            factory: StrategyFactory::new(seed ^ FACTORY_STREAM),
            rng,
            next_id: 3,
        };

        state.build_walls();
        state.build_bricks();
        log::info!(
            "New game: seed={} grid={}x{} bricks={}",
            seed,
            columns,
            rows,
            state.brick_counter
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn build_walls(&mut self) {
        let (w, h) = (self.window.x, self.window.y);
        let layout = [
            (Tag::LeftWall, Vec2::new(WALL_WIDTH / 2.0, h / 2.0), Vec2::new(WALL_WIDTH, h)),
            (
                Tag::RightWall,
                Vec2::new(w - WALL_WIDTH / 2.0, h / 2.0),
                Vec2::new(WALL_WIDTH, h),
            ),
            (
                Tag::Ceiling,
                Vec2::new(w / 2.0, CEILING_HEIGHT / 2.0),
                Vec2::new(w, CEILING_HEIGHT),
            ),
        ];
        for (tag, pos, size) in layout {
            let id = self.next_entity_id();
            self.walls.push(Wall { id, tag, pos, size });
        }
    }

    fn build_bricks(&mut self) {
        let columns = self.columns as f32;
        let width = (self.window.x - WALL_WIDTH * 6.0 - columns) / columns;
        let size = Vec2::new(width, BRICK_HEIGHT);

        for row in 0..self.rows {
            for col in 0..self.columns {
                let x = col as f32 * (width + BRICK_GAP) + WALL_WIDTH;
                let y = row as f32 * (BRICK_HEIGHT + BRICK_GAP) + WALL_WIDTH;
                let behavior = self.factory.create_strategy();
                log::debug!("brick ({}, {}) -> {:?}", col, row, behavior.kind());
                let id = self.next_entity_id();
                self.bricks.push(Brick {
                    id,
                    pos: Vec2::new(x, y) + size / 2.0,
                    size,
                    behavior,
                });
            }
        }
        self.brick_counter = self.bricks.len() as u32;
    }

    /// Resolve a projectile (or other entity) striking a brick.
    ///
    /// A brick that is already gone is ignored, so the counter moves once per brick.
    pub fn on_brick_hit(&mut self, brick_id: u32, other_id: u32) {
        let Some(index) = self.bricks.iter().position(|b| b.id == brick_id) else {
            return;
        };
        let center = self.bricks[index].pos;
        let effects = strategy::resolve(&self.bricks[index].behavior, &mut self.factory);

        for effect in effects {
            match effect {
                HitEffect::RemoveBrick => self.remove_brick(brick_id),
                HitEffect::SpawnProjectiles => {
                    self.create_secondary_projectile(center);
                    self.create_secondary_projectile(center);
                }
                HitEffect::SpawnPaddle => {
                    self.create_extra_paddle();
                }
                HitEffect::SpawnBonusHeart => {
                    self.create_bonus_heart(center);
                }
                HitEffect::EnterTurboMode => {
                    self.enter_turbo_mode(other_id);
                }
            }
        }
    }

    /// Remove a brick if it is still standing; idempotent
    pub fn remove_brick(&mut self, brick_id: u32) {
        let before = self.bricks.len();
        self.bricks.retain(|b| b.id != brick_id);
        if self.bricks.len() < before {
            self.events.push(GameEvent::BrickRemoved {
                id: brick_id,
                remaining: self.brick_counter.saturating_sub(1),
            });
            self.decrement_brick_counter();
        }
    }

    pub fn decrement_brick_counter(&mut self) {
        self.brick_counter = self.brick_counter.saturating_sub(1);
        if self.brick_counter == 0 && self.phase == GamePhase::Playing {
            log::info!("All bricks cleared");
            self.phase = GamePhase::Won;
            self.events.push(GameEvent::Won);
        }
    }

    /// Launch a secondary projectile from `at` in a random upward-half-plane direction
    pub fn create_secondary_projectile(&mut self, at: Vec2) -> u32 {
        let angle = self.rng.random_range(0.0..=std::f32::consts::PI);
        let id = self.next_entity_id();
        self.pucks
            .push(Ball::puck(id, at, polar_to_cartesian(PUCK_SPEED, angle)));
        log::debug!("Spawned puck {} at {:?}", id, at);
        self.events.push(GameEvent::ProjectileSpawned { id });
        id
    }

    /// Spawn the bonus paddle. No-op while one is already active.
    pub fn create_extra_paddle(&mut self) -> bool {
        if self.extra_paddle.is_some() {
            log::debug!("Extra paddle already active, request ignored");
            return false;
        }
        let id = self.next_entity_id();
        let top_left = Vec2::new(
            self.window.x / 2.0 - PADDLE_SIZE.x / 2.0,
            self.window.y / 2.0,
        );
        self.extra_paddle = Some(Paddle::new(
            id,
            Tag::ExtraPaddle,
            top_left + PADDLE_SIZE / 2.0,
        ));
        self.events.push(GameEvent::ExtraPaddleSpawned { id });
        true
    }

    pub fn remove_extra_paddle(&mut self) -> Option<Paddle> {
        let paddle = self.extra_paddle.take()?;
        log::debug!("Extra paddle {} retired after {} hits", paddle.id, paddle.hits);
        self.events
            .push(GameEvent::ExtraPaddleRetired { id: paddle.id });
        Some(paddle)
    }

    /// Drop a bonus heart at `at`. Dropped silently when every slot is taken.
    pub fn create_bonus_heart(&mut self, at: Vec2) -> Option<SlotIndex> {
        let id = self.next_entity_id();
        match self.hearts.insert(Heart::new(id, at, self.paddle.tag)) {
            Ok(slot) => {
                self.events.push(GameEvent::HeartSpawned { slot });
                Some(slot)
            }
            Err(_) => {
                log::debug!("All {} heart slots occupied, heart dropped", HEART_SLOTS);
                None
            }
        }
    }

    pub fn remove_bonus_heart(&mut self, slot: SlotIndex) -> Option<Heart> {
        self.hearts.remove(slot)
    }

    /// Heart caught by its collector: grant a life and raise the ceiling
    pub fn collect_bonus_heart(&mut self, slot: SlotIndex) {
        if self.remove_bonus_heart(slot).is_some() {
            self.lives.collect_heart();
            log::info!(
                "Heart collected: lives {}/{}",
                self.lives.current(),
                self.lives.max()
            );
            self.events.push(GameEvent::HeartCollected { slot });
        }
    }

    /// Boost the colliding projectile if it carries the plain `ball` tag.
    /// Pucks, anything untracked, or a ball already boosted are ignored.
    pub fn enter_turbo_mode(&mut self, projectile_id: u32) -> bool {
        let Some(ball) = self.projectile_mut(projectile_id) else {
            return false;
        };
        if ball.tag != Tag::Ball || !ball.enter_turbo() {
            log::debug!("Turbo request for {} ignored", projectile_id);
            return false;
        }
        log::info!("Projectile {} entered turbo mode", projectile_id);
        self.events
            .push(GameEvent::TurboStarted { id: projectile_id });
        true
    }

    pub fn projectile_mut(&mut self, id: u32) -> Option<&mut Ball> {
        if self.ball.id == id {
            return Some(&mut self.ball);
        }
        self.pucks.iter_mut().find(|p| p.id == id)
    }

    pub fn projectile(&self, id: u32) -> Option<&Ball> {
        if self.ball.id == id {
            return Some(&self.ball);
        }
        self.pucks.iter().find(|p| p.id == id)
    }

    /// End-of-frame bookkeeping: off-screen eviction, paddle expiry, ball loss
    pub fn end_of_frame(&mut self) {
        let height = self.window.y;

        // Hearts that fell past the bottom vanish without a penalty
        for (slot, _) in self.hearts.drain_where(|h| h.is_below(height)) {
            self.events.push(GameEvent::HeartDropped { slot });
        }
        for (_, heart) in self.hearts.iter_mut() {
            heart.vel = Vec2::new(0.0, HEART_FALL_SPEED);
        }

        if self.extra_paddle.as_ref().is_some_and(Paddle::is_worn_out) {
            self.remove_extra_paddle();
        }

        let mut lost = Vec::new();
        self.pucks.retain(|p| {
            let gone = p.pos.y > height;
            if gone {
                lost.push(p.id);
            }
            !gone
        });
        for id in lost {
            self.events.push(GameEvent::ProjectileLost { id });
        }

        // A round decided this frame keeps its outcome
        if self.phase == GamePhase::Playing && self.ball.pos.y > height {
            self.lives.lose_life();
            self.events.push(GameEvent::LifeLost {
                remaining: self.lives.current(),
            });
            if self.lives.is_game_over() {
                log::info!("Game over");
                self.phase = GamePhase::Lost;
                self.events.push(GameEvent::GameOver);
            } else {
                log::info!("Ball lost, {} lives left", self.lives.current());
                self.ball.pos = self.window / 2.0;
            }
        }
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
