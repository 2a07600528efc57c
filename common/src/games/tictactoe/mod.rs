mod game_state;
mod types;
mod win_detector;

pub use game_state::{BOARD_SIZE, CELL_COUNT, TicTacToeGame};
pub use types::{GameStatus, Mark, Player, UpdateResponse};
pub use win_detector::{check_for_win, winning_line, WINNING_LINES};
