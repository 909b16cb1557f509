//! Game state and the move transition function.

use crate::lines::{Line, winning_line};
use crate::outcome::Outcome;
use crate::types::{Board, Cell, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Moves are accepted.
    #[default]
    Playing,
    /// A player completed a line. Terminal.
    Won,
    /// Board filled without a line. Terminal.
    Draw,
}

/// Complete game state.
///
/// Only [`GameState::new`] and [`GameState::apply_move`] construct values,
/// so the status always agrees with the board: `Won` carries a winner and a
/// uniform line, `Draw` has a full board, `Playing` has neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    board: Board,
    turn: Player,
    status: GameStatus,
    winner: Option<Player>,
    winning_line: Option<Line>,
}

/// Result of [`GameState::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the move. Equal to the input when the move was rejected.
    pub state: GameState,
    /// Set only on the move that finished the game.
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Creates the initial state: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            status: GameStatus::Playing,
            winner: None,
            winning_line: None,
        }
    }

    /// Returns the initial state regardless of `self`.
    pub fn reset(&self) -> Self {
        Self::new()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose mark the next accepted move places.
    ///
    /// After the game ends this stays on the player who moved last.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Winner, once the status is [`GameStatus::Won`].
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Completed line, once the status is [`GameStatus::Won`].
    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    /// Returns true once the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// Indices a move may currently be applied to.
    pub fn open_cells(&self) -> Vec<usize> {
        if self.is_over() {
            Vec::new()
        } else {
            self.board.open_cells()
        }
    }

    /// Applies a move for the player to move at `index` (0-8).
    ///
    /// A move on a finished game, an occupied cell, or an index off the
    /// board is rejected silently: the returned state equals `self` and no
    /// outcome is reported. An accepted move is checked for a win first,
    /// then for a draw; otherwise the turn passes to the opponent.
    #[instrument(skip(self), fields(turn = %self.turn, status = ?self.status))]
    pub fn apply_move(&self, index: usize) -> Transition {
        if self.is_over() || !self.board.is_empty(index) {
            debug!(index, "Move rejected");
            return Transition {
                state: self.clone(),
                outcome: None,
            };
        }

        let mut next = self.clone();
        next.board.set(index, Cell::Occupied(self.turn));

        if let Some((winner, line)) = winning_line(&next.board) {
            info!(%winner, ?line, "Game won");
            next.status = GameStatus::Won;
            next.winner = Some(winner);
            next.winning_line = Some(line);
            return Transition {
                state: next,
                outcome: Some(Outcome::Winner(winner)),
            };
        }

        if next.board.is_full() {
            info!("Game drawn");
            next.status = GameStatus::Draw;
            return Transition {
                state: next,
                outcome: Some(Outcome::Draw),
            };
        }

        next.turn = self.turn.opponent();
        Transition {
            state: next,
            outcome: None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
