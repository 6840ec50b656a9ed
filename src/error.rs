use thiserror::Error;
use uuid::Uuid;

use crate::models::{GameState, Position, PremiumType};

/// Reasons a proposed placement is rejected.
///
/// Every variant is recoverable: nothing has been mutated when one of these
/// is returned and the same player may submit again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no tiles placed")]
    NoTilesPlaced,
    #[error("position {position} is off the board")]
    PositionInvalid { position: Position },
    #[error("position {position} is already occupied")]
    PositionOccupied { position: Position },
    #[error("tiles must lie on a single row or column")]
    InvalidLayout,
    #[error("placed tiles leave a gap in the line")]
    Disconnected,
    #[error("the first move must cover the center square")]
    MustCoverCenter,
    #[error("move must connect to tiles already on the board")]
    NotConnected,
    #[error("move does not form a word")]
    NoWordFormed,
    #[error("'{word}' is not in the dictionary")]
    InvalidWord { word: String },
    #[error("blank tile at {position} needs a letter A-Z")]
    BlankLetter { position: Position },
    #[error("rack does not hold the tiles used by this move")]
    RackMismatch,
    #[error("rack cannot hold more than 7 tiles")]
    RackOverflow,
}

/// Errors raised by the turn controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("it is not this player's turn")]
    NotPlayersTurn,
    #[error("exchange needs at least 7 tiles in the bag, {remaining} left")]
    ExchangeUnavailable { remaining: usize },
    #[error("exchange needs at least one tile")]
    EmptyExchange,
    #[error("game is not in progress (state: {state:?})")]
    NotInProgress { state: GameState },
    #[error("game has already started")]
    AlreadyStarted,
    #[error("a game needs 2 to 4 players, got {count}")]
    InvalidPlayerCount { count: usize },
    #[error("unknown player {player_id}")]
    UnknownPlayer { player_id: Uuid },
}

/// Board construction failures. These abort game setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("premium square count mismatch for {premium}: expected {expected}, got {actual}")]
    PremiumCount {
        premium: PremiumType,
        expected: usize,
        actual: usize,
    },
    #[error("center must be H8, found {position}")]
    CenterMisplaced { position: Position },
    #[error("center square must be a double word score")]
    CenterNotDoubleWord,
}

/// A rack holding tiles no bag could have dealt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RackError {
    #[error("rack holds {count} tiles, more than 7")]
    Overflow { count: usize },
    #[error("blank tile in rack carries a letter or points")]
    DirtyBlank,
    #[error("rack tile has no letter A-Z: {letter:?}")]
    BadLetter { letter: Option<char> },
    #[error("rack tile {letter} is worth {points}, expected {expected}")]
    WrongValue {
        letter: char,
        points: u32,
        expected: u32,
    },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed game snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("game snapshot has a corrupt board: {0}")]
    Layout(#[from] LayoutError),
    #[error("player {player_id} has a corrupt rack: {source}")]
    Rack { player_id: Uuid, source: RackError },
}
