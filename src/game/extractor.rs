use serde::{Deserialize, Serialize};

use crate::{
    error::MoveError,
    game::validator::ValidatedMove,
    models::{Board, Direction, Position},
};

/// A word formed by a move, with the squares it covers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormedWord {
    pub word: String,
    pub positions: Vec<Position>,
    /// Parallel to `positions`: true where the tile was placed this turn
    pub newly_placed: Vec<bool>,
}

impl FormedWord {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Squares paired with their newly-placed flag
    pub fn squares(&self) -> impl Iterator<Item = (Position, bool)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.newly_placed.iter().copied())
    }
}

pub struct WordExtractor;

impl WordExtractor {
    /// Enumerate every word a validated move forms.
    ///
    /// `staged` is the board with the move's tiles already laid down. The
    /// main word comes first, followed by cross words in placement order.
    pub fn extract(staged: &Board, validated: &ValidatedMove) -> Result<Vec<FormedWord>, MoveError> {
        let Some(anchor) = validated.placements.first() else {
            return Err(MoveError::NoTilesPlaced);
        };

        let mut words = Vec::new();

        let main = Self::run_through(staged, anchor.position, validated.direction);
        if main.len() > 1 {
            words.push(Self::build_word(staged, validated, main));
        }

        let cross_direction = validated.direction.perpendicular();
        for placed in &validated.placements {
            let cross = Self::run_through(staged, placed.position, cross_direction);
            if cross.len() > 1 {
                words.push(Self::build_word(staged, validated, cross));
            }
        }

        if words.is_empty() {
            return Err(MoveError::NoWordFormed);
        }

        Ok(words)
    }

    /// Maximal run of occupied squares through `start` along `direction`
    fn run_through(board: &Board, start: Position, direction: Direction) -> Vec<Position> {
        let mut first = start;
        while let Some(prev) = first.step(direction, false).filter(|p| board.is_occupied(*p)) {
            first = prev;
        }

        let mut run = vec![first];
        let mut current = first;
        while let Some(next) = current.step(direction, true).filter(|p| board.is_occupied(*p)) {
            run.push(next);
            current = next;
        }
        run
    }

    fn build_word(board: &Board, validated: &ValidatedMove, positions: Vec<Position>) -> FormedWord {
        let word = positions
            .iter()
            .filter_map(|pos| board.tile_at(*pos))
            .filter_map(|tile| tile.letter)
            .collect();
        let newly_placed = positions.iter().map(|pos| validated.contains(*pos)).collect();

        FormedWord {
            word,
            positions,
            newly_placed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        game::validator::MoveValidator,
        models::{PlacedTile, Tile},
    };

    fn pos(label: &str) -> Position {
        label.parse().unwrap()
    }

    fn placements(tiles: &[(&str, char)]) -> Vec<PlacedTile> {
        tiles
            .iter()
            .map(|(label, letter)| PlacedTile::new(pos(label), Tile::new(*letter)))
            .collect()
    }

    fn extract(board: &Board, mv: &[PlacedTile], first: bool) -> Result<Vec<FormedWord>, MoveError> {
        let validated = MoveValidator::validate(board, mv, first)?;
        let staged = board.with_placements(&validated.placements)?;
        WordExtractor::extract(&staged, &validated)
    }

    fn board_with_cat() -> Board {
        Board::new()
            .with_placements(&placements(&[("G8", 'C'), ("H8", 'A'), ("I8", 'T')]))
            .unwrap()
    }

    #[test]
    fn test_first_move_main_word_covers_center() {
        let board = Board::new();
        let words = extract(&board, &placements(&[("G8", 'C'), ("H8", 'A'), ("I8", 'T')]), true)
            .unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "CAT");
        assert!(words[0].positions.contains(&board.center()));
        assert_eq!(words[0].newly_placed, vec![true, true, true]);
    }

    #[test]
    fn test_main_word_extends_over_existing_tiles() {
        let board = board_with_cat();
        let words = extract(&board, &placements(&[("F8", 'S'), ("J8", 'S')]), false).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "SCATS");
        assert_eq!(words[0].newly_placed, vec![true, false, false, false, true]);
    }

    #[test]
    fn test_single_tile_hook() {
        let board = board_with_cat();
        let words = extract(&board, &placements(&[("J8", 'S')]), false).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "CATS");
        assert_eq!(words[0].positions.first(), Some(&pos("G8")));
    }

    #[test]
    fn test_cross_words() {
        // TO under AT: T at H9 makes AT down H8-H9, O at I9 makes TO down I8-I9
        let board = board_with_cat();
        let words = extract(&board, &placements(&[("H9", 'T'), ("I9", 'O')]), false).unwrap();
        let found: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(found, vec!["TO", "AT", "TO"]);

        let cross = &words[1];
        assert_eq!(cross.positions, vec![pos("H8"), pos("H9")]);
        assert_eq!(cross.newly_placed, vec![false, true]);
    }

    #[test]
    fn test_vertical_single_tile_uses_column() {
        let board = board_with_cat();
        let words = extract(&board, &placements(&[("H9", 'T')]), false).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "AT");
    }

    #[test]
    fn test_lone_tile_forms_no_word() {
        let board = Board::new();
        assert_eq!(
            extract(&board, &placements(&[("H8", 'A')]), true),
            Err(MoveError::NoWordFormed)
        );
    }

    #[test]
    fn test_blank_letter_is_spelled() {
        let board = Board::new();
        let mv = vec![
            PlacedTile::new(pos("H8"), Tile::blank_as('O')),
            PlacedTile::new(pos("I8"), Tile::new('X')),
        ];
        let words = extract(&board, &mv, true).unwrap();
        assert_eq!(words[0].word, "OX");
    }
}
