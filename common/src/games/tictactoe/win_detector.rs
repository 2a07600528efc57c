use super::game_state::{BOARD_SIZE, CELL_COUNT};
use super::types::Mark;

/// Rows top-to-bottom, columns left-to-right, main diagonal, anti-diagonal.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_for_win(board: &[Mark; CELL_COUNT], mark: Mark) -> bool {
    for row in 0..BOARD_SIZE {
        if check_row(board, row, mark) {
            return true;
        }
    }

    for col in 0..BOARD_SIZE {
        if check_column(board, col, mark) {
            return true;
        }
    }

    check_main_diagonal(board, mark) || check_anti_diagonal(board, mark)
}

pub fn winning_line(board: &[Mark; CELL_COUNT], mark: Mark) -> Option<[usize; 3]> {
    WINNING_LINES
        .iter()
        .find(|line| line.iter().all(|&cell| board[cell] == mark))
        .copied()
}

fn check_row(board: &[Mark; CELL_COUNT], row: usize, mark: Mark) -> bool {
    let start = row * BOARD_SIZE;
    board[start] == mark && board[start + 1] == mark && board[start + 2] == mark
}

fn check_column(board: &[Mark; CELL_COUNT], col: usize, mark: Mark) -> bool {
    board[col] == mark && board[col + BOARD_SIZE] == mark && board[col + 2 * BOARD_SIZE] == mark
}

fn check_main_diagonal(board: &[Mark; CELL_COUNT], mark: Mark) -> bool {
    board[0] == mark && board[4] == mark && board[8] == mark
}

fn check_anti_diagonal(board: &[Mark; CELL_COUNT], mark: Mark) -> bool {
    board[2] == mark && board[4] == mark && board[6] == mark
}
