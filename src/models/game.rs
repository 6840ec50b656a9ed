use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Board, PlacedTile, Player, Tile};

/// Fewest players a game can start with
pub const MIN_PLAYERS: usize = 2;
/// Most players a game can start with
pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    WaitingForPlayers,
    InProgress,
    Finished,
}

/// When a run of passes and exchanges ends the game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScorelessLimit {
    /// Every active player has taken `turns` scoreless turns in a row
    PerPlayer { turns: u32 },
    /// `turns` scoreless turns in a row, whoever took them
    Total { turns: u32 },
}

impl Default for ScorelessLimit {
    fn default() -> Self {
        ScorelessLimit::PerPlayer { turns: 2 }
    }
}

impl ScorelessLimit {
    pub fn is_reached(&self, streak: u32, active_players: usize) -> bool {
        let needed = match *self {
            ScorelessLimit::PerPlayer { turns } => turns.saturating_mul(active_players as u32),
            ScorelessLimit::Total { turns } => turns,
        };
        needed > 0 && streak >= needed
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRules {
    pub scoreless_limit: ScorelessLimit,
}

/// What a player submits on their turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerAction {
    Play { tiles: Vec<PlacedTile> },
    Exchange { tiles: Vec<Tile> },
    Pass,
}

/// A committed play
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Move {
    pub player_id: Uuid,
    pub placements: Vec<PlacedTile>,
    pub words: Vec<String>,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnAction {
    Play(Move),
    Exchange { count: usize },
    Pass,
}

/// One entry of the game history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnRecord {
    pub turn_number: u32,
    pub player_id: Uuid,
    pub action: TurnAction,
    pub played_at: DateTime<Utc>,
}

impl TurnRecord {
    pub fn score(&self) -> u32 {
        match &self.action {
            TurnAction::Play(mv) => mv.score,
            _ => 0,
        }
    }
}

/// Result of a successfully submitted turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub record: TurnRecord,
    pub state: GameState,
    /// Who plays next, `None` once the game is over
    pub next_player: Option<Uuid>,
}

/// End-of-game correction for one player's remaining tiles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RackAdjustment {
    pub player_id: Uuid,
    pub rack_value: u32,
    pub delta: i32,
}

/// Full state of one game. Owned by whoever serializes access to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    pub game_id: Uuid,
    pub state: GameState,
    pub board: Board,
    pub players: Vec<Player>,
    pub current_turn: usize,
    pub history: Vec<TurnRecord>,
    pub rules: GameRules,
    /// Consecutive passes and exchanges since the last play
    pub scoreless_streak: u32,
    /// Player who emptied their rack with the bag exhausted
    pub finished_by: Option<Uuid>,
    pub settled: bool,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}
