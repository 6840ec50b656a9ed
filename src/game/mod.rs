// Rules engine: validate -> extract -> dictionary -> score -> commit

pub mod bag;
pub mod controller;
pub mod extractor;
pub mod scorer;
pub mod turn;
pub mod validator;

pub use bag::{TileBag, TileSupply};
pub use extractor::{FormedWord, WordExtractor};
pub use scorer::{MoveScore, Scorer, WordScore, BINGO_BONUS};
pub use turn::{apply_move, validate_and_score_move, ScoredMove, TurnSnapshot};
pub use validator::{MoveValidator, ValidatedMove};
