//! Player lives: a current count bounded by a ceiling that bonus hearts raise

use serde::{Deserialize, Serialize};

use crate::consts::LIVES_HARD_CAP;

/// HUD color band for the numeric lives display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivesColor {
    Green,
    Yellow,
    Red,
}

/// Current/maximum life counts. `current` stays in `[0, max]`, `max` only grows,
/// up to `LIVES_HARD_CAP`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivesTracker {
    current: u32,
    max: u32,
}

impl LivesTracker {
    /// Start with `initial` lives under a ceiling of `max` (both clamped to the hard cap)
    pub fn new(initial: u32, max: u32) -> Self {
        let max = max.min(LIVES_HARD_CAP);
        Self {
            current: initial.min(max),
            max,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn lose_life(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Returns true if a life was actually added
    pub fn gain_life(&mut self) -> bool {
        if self.current < self.max {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn raise_max(&mut self) {
        if self.max < LIVES_HARD_CAP {
            self.max += 1;
        }
    }

    /// Heart pickup: grant a life, then raise the ceiling regardless
    pub fn collect_heart(&mut self) {
        self.gain_life();
        self.raise_max();
    }

    pub fn is_game_over(&self) -> bool {
        self.current == 0
    }

    pub fn hud_color(&self) -> LivesColor {
        match self.current {
            0 | 1 => LivesColor::Red,
            2 => LivesColor::Yellow,
            _ => LivesColor::Green,
        }
    }

    pub fn hud_text(&self) -> String {
        format!("Lives: {}", self.current)
    }
}
