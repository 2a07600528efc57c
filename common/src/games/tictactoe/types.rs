use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    Cross,
    Circle,
}

impl Mark {
    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }
}

/// Marker whose move is expected. Unlike [`Mark`] it has no empty variant,
/// so a game can never be waiting on nobody.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[default]
    Cross,
    Circle,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::Cross => Player::Circle,
            Player::Circle => Player::Cross,
        }
    }

    pub fn mark(&self) -> Mark {
        Mark::from(*self)
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        match player {
            Player::Cross => Mark::Cross,
            Player::Circle => Mark::Circle,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Cross => write!(f, "Cross"),
            Player::Circle => write!(f, "Circle"),
        }
    }
}

/// Outcome of a turn-gated update. All three are ordinary results the
/// caller branches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateResponse {
    Updated,
    DoesNotExist,
    NotYourTurn,
}

impl fmt::Display for UpdateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateResponse::Updated => write!(f, "updated"),
            UpdateResponse::DoesNotExist => write!(f, "game does not exist"),
            UpdateResponse::NotYourTurn => write!(f, "not your turn"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    CrossWon,
    CircleWon,
    Draw,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        *self != GameStatus::InProgress
    }
}
