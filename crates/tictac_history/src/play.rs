//! Terminal hot-seat game that reports finished games to the history server.

use anyhow::Result;
use tictac_engine::{Game, GameStatus, Outcome};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, instrument, warn};

use crate::client::HistoryClient;

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// Place a mark at a board index (0-8).
    Move(usize),
    /// Start a new game.
    Restart,
    /// Leave.
    Quit,
}

impl PlayCommand {
    /// Parses `1`-`9` (as shown on the board), `r`estart or `q`uit.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "restart" => Some(Self::Restart),
            "q" | "quit" | "exit" => Some(Self::Quit),
            other => match other.parse::<usize>() {
                Ok(n @ 1..=9) => Some(Self::Move(n - 1)),
                _ => None,
            },
        }
    }
}

/// Describes a finished game for the player.
pub fn outcome_message(outcome: Outcome) -> String {
    match outcome.winner() {
        Some(player) => format!("Player {} wins!", player),
        None => "It's a draw!".to_string(),
    }
}

/// Runs games read from stdin until the player quits or input ends.
///
/// Each finished game is posted through `client` when one is given; a
/// failed post is reported and play continues.
#[instrument(skip(client))]
pub async fn run_hot_seat(client: Option<HistoryClient>) -> Result<()> {
    let mut out = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut game = Game::new();

    prompt(&mut out, &game).await?;
    while let Some(line) = lines.next_line().await? {
        match PlayCommand::parse(&line) {
            Some(PlayCommand::Quit) => break,
            Some(PlayCommand::Restart) => game.reset(),
            Some(PlayCommand::Move(index)) => {
                let before = game.state().clone();
                if let Some(outcome) = game.play(index) {
                    let summary = format!(
                        "\n{}\n{}\n",
                        game.state().board().display(),
                        outcome_message(outcome)
                    );
                    out.write_all(summary.as_bytes()).await?;
                    if let Some(client) = &client {
                        match client.record(outcome).await {
                            Ok(record) => info!(id = record.id(), "Result saved to history"),
                            Err(e) => {
                                warn!(error = %e, "Could not save result");
                                out.write_all(format!("Could not save result: {e}\n").as_bytes())
                                    .await?;
                            }
                        }
                    }
                } else if game.state() == &before && before.status() == GameStatus::Playing {
                    out.write_all(b"That square is taken.\n").await?;
                }
            }
            None => out.write_all(b"Enter 1-9, r to restart or q to quit.\n").await?,
        }
        prompt(&mut out, &game).await?;
    }
    Ok(())
}

async fn prompt<W: AsyncWrite + Unpin>(out: &mut W, game: &Game) -> Result<()> {
    let state = game.state();
    let text = if state.is_over() {
        "Game over. r to play again, q to quit: ".to_string()
    } else {
        format!("\n{}\nPlayer {} to move: ", state.board().display(), state.turn())
    };
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_engine::Player;

    #[test]
    fn test_parse_moves_are_one_based() {
        assert_eq!(PlayCommand::parse("1"), Some(PlayCommand::Move(0)));
        assert_eq!(PlayCommand::parse(" 9 \n"), Some(PlayCommand::Move(8)));
        assert_eq!(PlayCommand::parse("0"), None);
        assert_eq!(PlayCommand::parse("10"), None);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(PlayCommand::parse("R"), Some(PlayCommand::Restart));
        assert_eq!(PlayCommand::parse("quit"), Some(PlayCommand::Quit));
        assert_eq!(PlayCommand::parse("x"), None);
    }

    #[test]
    fn test_outcome_message() {
        assert_eq!(outcome_message(Outcome::Winner(Player::O)), "Player O wins!");
        assert_eq!(outcome_message(Outcome::Draw), "It's a draw!");
    }
}
