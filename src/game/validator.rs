use std::collections::HashSet;

use crate::{
    error::MoveError,
    models::{Board, Direction, PlacedTile, Position},
};

/// A placement that passed the geometric rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMove {
    pub direction: Direction,
    /// Placements sorted along `direction`
    pub placements: Vec<PlacedTile>,
}

impl ValidatedMove {
    pub fn contains(&self, pos: Position) -> bool {
        self.placements.iter().any(|placed| placed.position == pos)
    }

    /// Every square from the first to the last placed tile
    pub fn span(&self) -> Vec<Position> {
        span_of(self.direction, &self.placements)
    }
}

/// Checks layout, connectivity and first-move rules. Never consults the
/// dictionary and never mutates the board.
pub struct MoveValidator;

impl MoveValidator {
    pub fn validate(
        board: &Board,
        placements: &[PlacedTile],
        is_first_move: bool,
    ) -> Result<ValidatedMove, MoveError> {
        if placements.is_empty() {
            return Err(MoveError::NoTilesPlaced);
        }

        Self::check_targets(board, placements)?;

        let direction = Self::direction(board, placements)?;
        let mut sorted = placements.to_vec();
        sorted.sort_by_key(|placed| placed.position.coord(direction));

        let span = span_of(direction, &sorted);
        let gap = span.iter().any(|pos| {
            !board.is_occupied(*pos) && !sorted.iter().any(|placed| placed.position == *pos)
        });
        if gap {
            return Err(MoveError::Disconnected);
        }

        if is_first_move {
            if !span.contains(&board.center()) {
                return Err(MoveError::MustCoverCenter);
            }
        } else if !Self::touches_existing(board, &sorted, &span) {
            return Err(MoveError::NotConnected);
        }

        Ok(ValidatedMove {
            direction,
            placements: sorted,
        })
    }

    /// Rule 1: every target is on the board, free, used once, and blanks
    /// name the letter they stand for
    fn check_targets(board: &Board, placements: &[PlacedTile]) -> Result<(), MoveError> {
        let mut seen = HashSet::new();
        for placed in placements {
            let position = placed.position;
            if !position.is_valid() {
                return Err(MoveError::PositionInvalid { position });
            }
            if board.is_occupied(position) || !seen.insert(position) {
                return Err(MoveError::PositionOccupied { position });
            }
            if placed.tile.is_blank
                && !placed.tile.letter.is_some_and(|c| c.is_ascii_uppercase())
            {
                return Err(MoveError::BlankLetter { position });
            }
        }
        Ok(())
    }

    /// Rule 2: one row or one column. A lone tile takes the axis along which
    /// it touches existing tiles, preferring horizontal.
    fn direction(board: &Board, placements: &[PlacedTile]) -> Result<Direction, MoveError> {
        let first = placements[0].position;

        if placements.len() == 1 {
            let touches = |dir: Direction| {
                [first.step(dir, false), first.step(dir, true)]
                    .into_iter()
                    .flatten()
                    .any(|pos| board.is_occupied(pos))
            };
            if !touches(Direction::Horizontal) && touches(Direction::Vertical) {
                return Ok(Direction::Vertical);
            }
            return Ok(Direction::Horizontal);
        }

        if placements.iter().all(|p| p.position.row == first.row) {
            Ok(Direction::Horizontal)
        } else if placements.iter().all(|p| p.position.col == first.col) {
            Ok(Direction::Vertical)
        } else {
            Err(MoveError::InvalidLayout)
        }
    }

    /// Rule 5: the span includes an existing tile or a placed tile borders one
    fn touches_existing(board: &Board, placements: &[PlacedTile], span: &[Position]) -> bool {
        span.iter().any(|pos| board.is_occupied(*pos))
            || placements.iter().any(|placed| {
                board
                    .neighbors(placed.position)
                    .into_iter()
                    .any(|pos| board.is_occupied(pos))
            })
    }
}

/// `placements` must be non-empty, on one line and sorted along `direction`
fn span_of(direction: Direction, placements: &[PlacedTile]) -> Vec<Position> {
    let (Some(first), Some(last)) = (placements.first(), placements.last()) else {
        return Vec::new();
    };
    let start = first.position;
    (start.coord(direction)..=last.position.coord(direction))
        .map(|coord| start.with_coord(direction, coord))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tile;

    fn pos(label: &str) -> Position {
        label.parse().unwrap()
    }

    fn placements(tiles: &[(&str, char)]) -> Vec<PlacedTile> {
        tiles
            .iter()
            .map(|(label, letter)| PlacedTile::new(pos(label), Tile::new(*letter)))
            .collect()
    }

    /// Board with CAT across G8-I8
    fn board_with_cat() -> Board {
        Board::new()
            .with_placements(&placements(&[("G8", 'C'), ("H8", 'A'), ("I8", 'T')]))
            .unwrap()
    }

    #[test]
    fn test_first_move_sorted_and_horizontal() {
        let board = Board::new();
        let mv = placements(&[("I8", 'T'), ("G8", 'C'), ("H8", 'A')]);
        let validated = MoveValidator::validate(&board, &mv, true).unwrap();

        assert_eq!(validated.direction, Direction::Horizontal);
        let order: Vec<Position> = validated.placements.iter().map(|p| p.position).collect();
        assert_eq!(order, vec![pos("G8"), pos("H8"), pos("I8")]);
        assert!(validated.span().contains(&board.center()));
    }

    #[test]
    fn test_vertical_move() {
        let board = Board::new();
        let mv = placements(&[("H7", 'A'), ("H8", 'N'), ("H9", 'D')]);
        let validated = MoveValidator::validate(&board, &mv, true).unwrap();
        assert_eq!(validated.direction, Direction::Vertical);
    }

    #[test]
    fn test_empty_move_rejected() {
        assert_eq!(
            MoveValidator::validate(&Board::new(), &[], true),
            Err(MoveError::NoTilesPlaced)
        );
    }

    #[test]
    fn test_off_board_rejected() {
        let mv = vec![PlacedTile::new(Position::new(7, 15), Tile::new('A'))];
        assert_eq!(
            MoveValidator::validate(&Board::new(), &mv, true),
            Err(MoveError::PositionInvalid {
                position: Position::new(7, 15)
            })
        );
    }

    #[test]
    fn test_occupied_and_duplicate_targets_rejected() {
        let board = board_with_cat();
        assert_eq!(
            MoveValidator::validate(&board, &placements(&[("H8", 'S')]), false),
            Err(MoveError::PositionOccupied { position: pos("H8") })
        );
        assert_eq!(
            MoveValidator::validate(&board, &placements(&[("J8", 'S'), ("J8", 'S')]), false),
            Err(MoveError::PositionOccupied { position: pos("J8") })
        );
    }

    #[test]
    fn test_unassigned_blank_rejected() {
        let mv = vec![
            PlacedTile::new(pos("H8"), Tile::blank()),
            PlacedTile::new(pos("I8"), Tile::new('A')),
        ];
        assert_eq!(
            MoveValidator::validate(&Board::new(), &mv, true),
            Err(MoveError::BlankLetter { position: pos("H8") })
        );
    }

    #[test]
    fn test_diagonal_layout_rejected() {
        let mv = placements(&[("H8", 'A'), ("I9", 'B')]);
        assert_eq!(
            MoveValidator::validate(&Board::new(), &mv, true),
            Err(MoveError::InvalidLayout)
        );
    }

    #[test]
    fn test_gap_rejected() {
        let mv = placements(&[("H8", 'A'), ("J8", 'B')]);
        assert_eq!(
            MoveValidator::validate(&Board::new(), &mv, true),
            Err(MoveError::Disconnected)
        );
    }

    #[test]
    fn test_gap_bridged_by_existing_tile() {
        // F8 and J8 around CAT form "SCATS"
        let board = board_with_cat();
        let mv = placements(&[("F8", 'S'), ("J8", 'S')]);
        let validated = MoveValidator::validate(&board, &mv, false).unwrap();
        assert_eq!(validated.span().len(), 5);
    }

    #[test]
    fn test_first_move_must_cover_center() {
        let mv = placements(&[("A1", 'A'), ("B1", 'T')]);
        assert_eq!(
            MoveValidator::validate(&Board::new(), &mv, true),
            Err(MoveError::MustCoverCenter)
        );
    }

    #[test]
    fn test_later_move_must_connect() {
        let board = board_with_cat();
        let mv = placements(&[("A1", 'A'), ("B1", 'T')]);
        assert_eq!(
            MoveValidator::validate(&board, &mv, false),
            Err(MoveError::NotConnected)
        );

        let touching = placements(&[("H9", 'T'), ("I9", 'O')]);
        assert!(MoveValidator::validate(&board, &touching, false).is_ok());
    }

    #[test]
    fn test_single_tile_takes_axis_of_neighbours() {
        let board = board_with_cat();
        let below = placements(&[("H9", 'T')]);
        let validated = MoveValidator::validate(&board, &below, false).unwrap();
        assert_eq!(validated.direction, Direction::Vertical);

        let after = placements(&[("J8", 'S')]);
        let validated = MoveValidator::validate(&board, &after, false).unwrap();
        assert_eq!(validated.direction, Direction::Horizontal);
    }

    #[test]
    fn test_validation_is_pure() {
        let board = board_with_cat();
        let before = board.clone();
        let mv = placements(&[("J8", 'S')]);
        let first = MoveValidator::validate(&board, &mv, false);
        let second = MoveValidator::validate(&board, &mv, false);
        assert_eq!(first, second);
        assert_eq!(board, before);
    }
}
