use serde::{Deserialize, Serialize};

use super::types::{GameStatus, Mark, Player};
use super::win_detector::check_for_win;

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Full state of one session. The store replaces it wholesale on every
/// accepted update, so there is no cell-level mutation here apart from the
/// successor builder [`TicTacToeGame::with_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeGame {
    /// Row-major, index = row * 3 + col.
    pub grid: [Mark; CELL_COUNT],
    pub current_turn: Player,
    pub joinable: bool,
}

impl Default for TicTacToeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGame {
    pub fn new() -> Self {
        Self {
            grid: [Mark::Empty; CELL_COUNT],
            current_turn: Player::Cross,
            joinable: true,
        }
    }

    pub fn check_for_win(&self, mark: Mark) -> bool {
        check_for_win(&self.grid, mark)
    }

    pub fn is_board_full(&self) -> bool {
        self.grid.iter().all(|cell| !cell.is_empty())
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn status(&self) -> GameStatus {
        if self.check_for_win(Mark::Cross) {
            return GameStatus::CrossWon;
        }
        if self.check_for_win(Mark::Circle) {
            return GameStatus::CircleWon;
        }
        if self.is_board_full() {
            return GameStatus::Draw;
        }
        GameStatus::InProgress
    }

    /// Builds the state that follows the current player marking `cell`.
    /// `self` is left untouched; submit the result through the store.
    pub fn with_move(&self, cell: usize) -> Result<TicTacToeGame, String> {
        if self.status().is_finished() {
            return Err("Game is already over".to_string());
        }

        if cell >= CELL_COUNT {
            return Err(format!("Cell {} is out of bounds", cell));
        }

        if !self.grid[cell].is_empty() {
            return Err(format!("Cell {} is already marked", cell));
        }

        let mut next = self.clone();
        next.grid[cell] = self.current_turn.mark();
        next.current_turn = self.current_turn.opponent();
        Ok(next)
    }
}
