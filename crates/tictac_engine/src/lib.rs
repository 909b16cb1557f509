//! Pure tic-tac-toe game logic.
//!
//! The engine is a value-level state machine: [`GameState::apply_move`] maps
//! a state and a board index to the next state, and reports the game's
//! [`Outcome`] exactly once, on the move that ends it. [`Game`] wraps that
//! function for callers that prefer to hold mutable state.
//!
//! # Example
//!
//! ```
//! use tictac_engine::{Game, Outcome, Player};
//!
//! let mut game = Game::new();
//! for index in [0, 4, 1, 5] {
//!     assert_eq!(game.play(index), None);
//! }
//! assert_eq!(game.play(2), Some(Outcome::Winner(Player::X)));
//! assert_eq!(game.state().winning_line(), Some([0, 1, 2]));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod lines;
mod outcome;
mod state;
mod types;

pub use game::Game;
pub use lines::{Line, WINNING_LINES, winning_line};
pub use outcome::{Outcome, ParseOutcomeError};
pub use state::{GameState, GameStatus, Transition};
pub use types::{Board, Cell, Player};
