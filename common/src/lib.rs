pub mod config;
pub mod games;
pub mod identifiers;
pub mod logger;

pub use games::tictactoe::{
    GameStatus, Mark, Player, TicTacToeGame, UpdateResponse, check_for_win, winning_line,
};
pub use identifiers::*;
