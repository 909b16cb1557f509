//! Win detection over the eight fixed lines.

use crate::types::{Board, Cell, Player};
use tracing::instrument;

/// Three board indices that win when held by one player.
pub type Line = [usize; 3];

/// Rows, then columns, then diagonals.
///
/// The order is also the precedence when more than one line is uniform.
pub const WINNING_LINES: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first line in [`WINNING_LINES`] whose three cells hold the
/// same player, together with that player.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Player, Line)> {
    let cells = board.cells();
    WINNING_LINES.into_iter().find_map(|line @ [a, b, c]| match cells[a] {
        Cell::Occupied(player) if cells[b] == cells[a] && cells[c] == cells[a] => {
            Some((player, line))
        }
        _ => None,
    })
}
