//! Games and their players.

use serde::{Deserialize, Serialize};

use crate::ids::{GameId, PlayerId};

/// Root aggregate scoping players, clocks, and clock groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub description: Option<String>,
}

/// A human participant in a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: Option<String>,
    pub game_id: GameId,
}
