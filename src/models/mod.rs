pub mod board;
pub mod game;
pub mod player;
pub mod tile;

pub use board::{Board, Direction, Position, PositionParseError, PremiumType, Square, BOARD_SIZE};
pub use game::{
    Game, GameRules, GameState, Move, PlayerAction, RackAdjustment, ScorelessLimit, TurnAction,
    TurnOutcome, TurnRecord, MAX_PLAYERS, MIN_PLAYERS,
};
pub use player::{Player, Rack, RACK_CAPACITY};
pub use tile::{PlacedTile, Tile};
