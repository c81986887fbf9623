//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically: move, collide,
//! dispatch brick hits, then run the end-of-frame bookkeeping.

use glam::Vec2;

use super::collision::{box_collision, boxes_overlap};
use super::entities::{Ball, Paddle, Tag};
use super::slots::SlotIndex;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal paddle direction (-1 left, +1 right)
    pub paddle_dir: f32,
    /// Declare the round won (debug shortcut)
    pub force_win: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Nothing moves once the round is decided
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.force_win {
        log::info!("Win forced by input");
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        input.paddle_dir = autopilot_direction(state);
    }

    state.time_ticks += 1;

    let width = state.window.x;
    state.paddle.move_by(input.paddle_dir, dt, width);
    if let Some(extra) = state.extra_paddle.as_mut() {
        extra.move_by(input.paddle_dir, dt, width);
    }

    state.ball.pos += state.ball.vel * dt;
    for puck in &mut state.pucks {
        puck.pos += puck.vel * dt;
    }
    for (_, heart) in state.hearts.iter_mut() {
        heart.pos += heart.vel * dt;
    }

    // Bounces first, brick behaviors after (deferred to avoid borrow issues)
    let mut brick_hits: Vec<(u32, u32)> = Vec::new();
    let mut turbo_ended: Vec<u32> = Vec::new();
    {
        let GameState {
            ball,
            pucks,
            walls,
            paddle,
            extra_paddle,
            bricks,
            ..
        } = &mut *state;

        for projectile in std::iter::once(ball).chain(pucks.iter_mut()) {
            for wall in walls.iter() {
                bounce(projectile, wall.tag, wall.pos, wall.size, &mut turbo_ended);
            }

            for p in std::iter::once(&mut *paddle).chain(extra_paddle.as_mut()) {
                if bounce(projectile, p.tag, p.pos, p.size, &mut turbo_ended) {
                    p.record_hit();
                }
            }

            // One brick per projectile per tick
            if let Some(brick) = bricks
                .iter()
                .find(|b| boxes_overlap(projectile.pos, projectile.size, b.pos, b.size))
            {
                bounce(projectile, Tag::Brick, brick.pos, brick.size, &mut turbo_ended);
                brick_hits.push((brick.id, projectile.id));
            }
        }
    }

    for id in turbo_ended {
        log::info!("Projectile {} left turbo mode", id);
        state.events.push(GameEvent::TurboEnded { id });
    }

    for (brick_id, projectile_id) in brick_hits {
        state.on_brick_hit(brick_id, projectile_id);
    }

    for slot in caught_hearts(state) {
        state.collect_bonus_heart(slot);
    }

    state.end_of_frame();
}

/// Reflect `projectile` off a box it is moving into. Returns true on a bounce.
fn bounce(
    projectile: &mut Ball,
    other: Tag,
    center: Vec2,
    size: Vec2,
    turbo_ended: &mut Vec<u32>,
) -> bool {
    let hit = box_collision(projectile.pos, projectile.size, center, size);
    if !hit.is_approaching(projectile.vel) {
        return false;
    }
    projectile.pos += hit.normal * hit.penetration;
    if projectile.on_impact(other, hit.normal) {
        turbo_ended.push(projectile.id);
    }
    true
}

/// Hearts touching the paddle whose tag they were created for
fn caught_hearts(state: &GameState) -> Vec<SlotIndex> {
    let paddles: Vec<&Paddle> = std::iter::once(&state.paddle)
        .chain(state.extra_paddle.as_ref())
        .collect();

    state
        .hearts
        .iter()
        .filter(|(_, heart)| {
            paddles.iter().any(|p| {
                p.tag == heart.collector && boxes_overlap(heart.pos, heart.size, p.pos, p.size)
            })
        })
        .map(|(slot, _)| slot)
        .collect()
}

/// Steer toward the lowest descending projectile (primary ball if none)
fn autopilot_direction(state: &GameState) -> f32 {
    let target = std::iter::once(&state.ball)
        .chain(state.pucks.iter())
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(&state.ball);

    ((target.pos.x - state.paddle.pos.x) / 10.0).clamp(-1.0, 1.0)
}
