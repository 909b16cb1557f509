//! Stateful driver around [`GameState::apply_move`].

use crate::outcome::Outcome;
use crate::state::{GameState, Transition};
use tracing::{info, instrument};

/// Tic-tac-toe game engine holding the current state.
#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Plays the current player's mark at `index` (0-8).
    ///
    /// Returns the outcome on the move that ends the game and `None`
    /// otherwise, including for every rejected move. A finished game
    /// therefore reports its outcome exactly once.
    #[instrument(skip(self))]
    pub fn play(&mut self, index: usize) -> Option<Outcome> {
        let Transition { state, outcome } = self.state.apply_move(index);
        self.state = state;
        outcome
    }

    /// Starts over from an empty board with X to move.
    #[instrument(skip(self), fields(status = ?self.state.status()))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        self.state = self.state.reset();
    }
}
