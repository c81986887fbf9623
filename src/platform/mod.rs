//! Platform abstraction layer
//!
//! The simulation never opens windows or dialogs itself. The driver hands
//! it a [`WindowController`] when a round ends.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::WINDOW_DIMENSIONS;
use crate::sim::GamePhase;

pub const WIN_PROMPT: &str = "You win! Play again?";
pub const LOSE_PROMPT: &str = "You lose! Play again?";

/// Window and dialog primitives provided by the host
pub trait WindowController {
    fn window_dimensions(&self) -> Vec2;
    /// Ask a yes/no question; true means yes
    fn open_yes_no_dialog(&mut self, prompt: &str) -> bool;
    fn reset_game(&mut self);
    fn close_window(&mut self);
}

/// What the player chose at the end of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    Reset,
    Close,
}

/// Present the end-of-game dialog for a finished round.
///
/// Returns `None` while the round is still being played.
pub fn resolve_end_of_game(
    phase: GamePhase,
    window: &mut impl WindowController,
) -> Option<EndAction> {
    let prompt = match phase {
        GamePhase::Playing => return None,
        GamePhase::Won => WIN_PROMPT,
        GamePhase::Lost => LOSE_PROMPT,
    };

    if window.open_yes_no_dialog(prompt) {
        window.reset_game();
        Some(EndAction::Reset)
    } else {
        window.close_window();
        Some(EndAction::Close)
    }
}

/// Scripted window for the native driver and tests
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    dimensions: Vec2,
    /// Answers handed out in order; "no" once exhausted
    answers: VecDeque<bool>,
    pub prompts: Vec<String>,
    pub resets: u32,
    pub closed: bool,
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl HeadlessWindow {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            dimensions: WINDOW_DIMENSIONS,
            answers: answers.into(),
            prompts: Vec::new(),
            resets: 0,
            closed: false,
        }
    }
}

impl WindowController for HeadlessWindow {
    fn window_dimensions(&self) -> Vec2 {
        self.dimensions
    }

    fn open_yes_no_dialog(&mut self, prompt: &str) -> bool {
        log::info!("{}", prompt);
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn reset_game(&mut self) {
        self.resets += 1;
    }

    fn close_window(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_dialog_while_playing() {
        let mut window = HeadlessWindow::default();
        assert_eq!(resolve_end_of_game(GamePhase::Playing, &mut window), None);
        assert!(window.prompts.is_empty());
    }

    #[test]
    fn test_win_then_play_again() {
        let mut window = HeadlessWindow::new(vec![true]);
        assert_eq!(
            resolve_end_of_game(GamePhase::Won, &mut window),
            Some(EndAction::Reset)
        );
        assert_eq!(window.prompts, vec![WIN_PROMPT.to_string()]);
        assert_eq!(window.resets, 1);
        assert!(!window.closed);
    }

    #[test]
    fn test_loss_then_quit() {
        let mut window = HeadlessWindow::default();
        assert_eq!(
            resolve_end_of_game(GamePhase::Lost, &mut window),
            Some(EndAction::Close)
        );
        assert_eq!(window.prompts, vec![LOSE_PROMPT.to_string()]);
        assert!(window.closed);
    }
}
