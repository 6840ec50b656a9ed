//! The move pipeline as pure functions over a board and rack snapshot.
//!
//! `validate_and_score_move` only inspects its inputs; `apply_move` returns
//! new values and touches nothing but the tile supply. Callers serialize
//! access per game.

use crate::{
    dictionary::WordLookup,
    error::MoveError,
    game::{
        bag::TileSupply,
        extractor::{FormedWord, WordExtractor},
        scorer::{MoveScore, Scorer},
        validator::MoveValidator,
    },
    models::{Board, Direction, PlacedTile, Rack, Tile},
};

/// A move that passed every check, ready to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub direction: Direction,
    /// Placements sorted along `direction`
    pub placements: Vec<PlacedTile>,
    pub words: Vec<FormedWord>,
    pub score: MoveScore,
}

impl ScoredMove {
    pub fn total(&self) -> u32 {
        self.score.total
    }

    pub fn word_list(&self) -> Vec<String> {
        self.words.iter().map(|w| w.word.clone()).collect()
    }

    pub fn tiles(&self) -> Vec<Tile> {
        self.placements.iter().map(|p| p.tile.clone()).collect()
    }
}

/// Board and rack after a committed move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSnapshot {
    pub board: Board,
    pub rack: Rack,
    /// Tiles drawn to refill the rack
    pub drawn: usize,
}

/// Validate, extract, look up and score a proposed placement.
pub fn validate_and_score_move(
    board: &Board,
    rack: &Rack,
    placements: &[PlacedTile],
    is_first_move: bool,
    dictionary: &impl WordLookup,
) -> Result<ScoredMove, MoveError> {
    let validated = MoveValidator::validate(board, placements, is_first_move)?;

    let tiles: Vec<Tile> = validated.placements.iter().map(|p| p.tile.clone()).collect();
    if !rack.contains_all(&tiles) {
        return Err(MoveError::RackMismatch);
    }

    let staged = board.with_placements(&validated.placements)?;
    let words = WordExtractor::extract(&staged, &validated)?;

    if let Some(unknown) = words.iter().find(|w| !dictionary.is_word(&w.word)) {
        return Err(MoveError::InvalidWord {
            word: unknown.word.clone(),
        });
    }

    let score = Scorer::score_move(&staged, &words, validated.placements.len());

    Ok(ScoredMove {
        direction: validated.direction,
        placements: validated.placements,
        words,
        score,
    })
}

/// Commit a scored move: lay its tiles, take them from the rack and refill
/// the rack from `supply`. On error nothing has been drawn.
pub fn apply_move(
    board: &Board,
    rack: &Rack,
    scored: &ScoredMove,
    supply: &mut impl TileSupply,
) -> Result<TurnSnapshot, MoveError> {
    let board = board.with_placements(&scored.placements)?;

    let mut rack = rack.clone();
    rack.remove(&scored.tiles())?;

    let refill = supply.draw(rack.missing());
    let drawn = refill.len();
    rack.add(refill)?;

    Ok(TurnSnapshot { board, rack, drawn })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dictionary::Dictionary, game::bag::TileBag, models::Position};

    fn pos(label: &str) -> Position {
        label.parse().unwrap()
    }

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["WORD", "WORDS", "RETAINS", "CAT", "CATS", "AT", "TO", "OX"])
    }

    fn rack_of(letters: &str) -> Rack {
        Rack::from_tiles(letters.chars().map(Tile::new).collect()).unwrap()
    }

    fn spell(start: &str, direction: Direction, word: &str) -> Vec<PlacedTile> {
        let mut position = pos(start);
        let mut placed = Vec::new();
        for letter in word.chars() {
            placed.push(PlacedTile::new(position, Tile::new(letter)));
            if let Some(next) = position.step(direction, true) {
                position = next;
            }
        }
        placed
    }

    #[test]
    fn test_first_move_score() {
        let board = Board::new();
        let scored = validate_and_score_move(
            &board,
            &rack_of("WORDXYZ"),
            &spell("F8", Direction::Horizontal, "WORD"),
            true,
            &dictionary(),
        )
        .unwrap();

        assert_eq!(scored.word_list(), vec!["WORD"]);
        assert_eq!(scored.total(), 16);
        assert!(scored.words[0].positions.contains(&board.center()));
    }

    #[test]
    fn test_bingo_on_first_move() {
        // E8-K8 crosses only the center DW: 7 * 2 + 50
        let scored = validate_and_score_move(
            &Board::new(),
            &rack_of("RETAINS"),
            &spell("E8", Direction::Horizontal, "RETAINS"),
            true,
            &dictionary(),
        )
        .unwrap();
        assert_eq!(scored.score.bingo_bonus, 50);
        assert_eq!(scored.total(), 64);
    }

    #[test]
    fn test_unknown_word_rejects_whole_move() {
        let board = Board::new()
            .with_placements(&spell("G8", Direction::Horizontal, "CAT"))
            .unwrap();
        // H9 T makes AT down, I9 Q makes TQ down and TQ across: all must pass
        let mv = vec![
            PlacedTile::new(pos("H9"), Tile::new('T')),
            PlacedTile::new(pos("I9"), Tile::new('Q')),
        ];
        let result = validate_and_score_move(&board, &rack_of("TQ"), &mv, false, &dictionary());
        assert_eq!(
            result,
            Err(MoveError::InvalidWord {
                word: "TQ".to_string()
            })
        );
    }

    #[test]
    fn test_rack_must_hold_tiles() {
        let result = validate_and_score_move(
            &Board::new(),
            &rack_of("WORXYZE"),
            &spell("F8", Direction::Horizontal, "WORD"),
            true,
            &dictionary(),
        );
        assert_eq!(result, Err(MoveError::RackMismatch));
    }

    #[test]
    fn test_inflated_points_not_held() {
        let mut mv = spell("F8", Direction::Horizontal, "WORD");
        mv[0].tile.points = 1000;
        let result =
            validate_and_score_move(&Board::new(), &rack_of("WORDXYZ"), &mv, true, &dictionary());
        assert_eq!(result, Err(MoveError::RackMismatch));
    }

    #[test]
    fn test_blank_from_rack() {
        let rack = Rack::from_tiles(vec![Tile::new('O'), Tile::blank()]).unwrap();
        let mv = vec![
            PlacedTile::new(pos("H8"), Tile::new('O')),
            PlacedTile::new(pos("I8"), Tile::blank_as('X')),
        ];
        let scored =
            validate_and_score_move(&Board::new(), &rack, &mv, true, &dictionary()).unwrap();
        // O(1) on DW, blank X worth nothing
        assert_eq!(scored.total(), 2);
    }

    #[test]
    fn test_total_matches_recomputed_words() {
        let board = Board::new()
            .with_placements(&spell("G8", Direction::Horizontal, "CAT"))
            .unwrap();
        let mv = spell("H9", Direction::Horizontal, "TO");
        let scored =
            validate_and_score_move(&board, &rack_of("TO"), &mv, false, &dictionary()).unwrap();

        let final_board = board.with_placements(&scored.placements).unwrap();
        let recomputed: u32 = scored
            .words
            .iter()
            .map(|w| Scorer::score_word(&final_board, w))
            .sum();
        assert_eq!(scored.total(), recomputed);
        assert_eq!(scored.word_list(), vec!["TO", "AT", "TO"]);
    }

    #[test]
    fn test_validation_twice_is_identical() {
        let board = Board::new();
        let rack = rack_of("WORDXYZ");
        let mv = spell("F8", Direction::Horizontal, "WORD");
        let first = validate_and_score_move(&board, &rack, &mv, true, &dictionary());
        let second = validate_and_score_move(&board, &rack, &mv, true, &dictionary());
        assert_eq!(first, second);
        assert!(board.is_empty());
        assert_eq!(rack, rack_of("WORDXYZ"));
    }

    #[test]
    fn test_apply_move_refills_rack() {
        let board = Board::new();
        let rack = rack_of("WORDXYZ");
        let scored = validate_and_score_move(
            &board,
            &rack,
            &spell("F8", Direction::Horizontal, "WORD"),
            true,
            &dictionary(),
        )
        .unwrap();

        let mut bag = TileBag::from_tiles("EEEEE".chars().map(Tile::new).collect());
        let snapshot = apply_move(&board, &rack, &scored, &mut bag).unwrap();

        assert_eq!(snapshot.drawn, 4);
        assert_eq!(snapshot.rack.len(), 7);
        assert_eq!(bag.remaining(), 1);
        assert_eq!(snapshot.board.occupied_positions().len(), 4);
        assert!(board.is_empty());
    }

    #[test]
    fn test_apply_stale_move_draws_nothing() {
        let board = Board::new();
        let rack = rack_of("WORDXYZ");
        let scored = validate_and_score_move(
            &board,
            &rack,
            &spell("F8", Direction::Horizontal, "WORD"),
            true,
            &dictionary(),
        )
        .unwrap();
        let moved_on = board
            .with_placements(&[PlacedTile::new(pos("F8"), Tile::new('Z'))])
            .unwrap();

        let mut bag = TileBag::seeded(1);
        let result = apply_move(&moved_on, &rack, &scored, &mut bag);
        assert_eq!(
            result,
            Err(MoveError::PositionOccupied { position: pos("F8") })
        );
        assert_eq!(bag.remaining(), 100);
    }
}
