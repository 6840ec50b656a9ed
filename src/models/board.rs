use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{error::LayoutError, error::MoveError, models::{PlacedTile, Tile}};

/// Width and height of the board
pub const BOARD_SIZE: usize = 15;

/// Premium layout, listed by label
const TRIPLE_WORD_SQUARES: [&str; 8] = ["A1", "A8", "A15", "H1", "H15", "O1", "O8", "O15"];
const DOUBLE_WORD_SQUARES: [&str; 17] = [
    "B2", "C3", "D4", "E5", "H8", "K5", "L4", "M3", "N2", "B14", "C13", "D12", "E11", "K11",
    "L12", "M13", "N14",
];
const TRIPLE_LETTER_SQUARES: [&str; 12] = [
    "B6", "B10", "F2", "F6", "F10", "F14", "J2", "J6", "J10", "J14", "N6", "N10",
];
const DOUBLE_LETTER_SQUARES: [&str; 24] = [
    "A4", "A12", "C7", "C9", "D1", "D8", "D15", "G3", "G7", "G9", "G13", "H4", "H12", "I3",
    "I7", "I9", "I13", "L1", "L8", "L15", "M7", "M9", "O4", "O12",
];

/// A zero-indexed board coordinate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionParseError {
    #[error("invalid position format: {0}")]
    Format(String),
    #[error("invalid column: {0}")]
    Column(char),
    #[error("invalid row: {0}")]
    Row(String),
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// The coordinate that runs along `direction`
    pub fn coord(&self, direction: Direction) -> usize {
        match direction {
            Direction::Horizontal => self.col,
            Direction::Vertical => self.row,
        }
    }

    /// The neighbouring square one step along `direction`, backwards when
    /// `forward` is false. `None` off the edge of the board.
    pub fn step(&self, direction: Direction, forward: bool) -> Option<Position> {
        let (row, col) = match (direction, forward) {
            (Direction::Horizontal, true) => (Some(self.row), self.col.checked_add(1)),
            (Direction::Horizontal, false) => (Some(self.row), self.col.checked_sub(1)),
            (Direction::Vertical, true) => (self.row.checked_add(1), Some(self.col)),
            (Direction::Vertical, false) => (self.row.checked_sub(1), Some(self.col)),
        };
        let next = Position::new(row?, col?);
        next.is_valid().then_some(next)
    }

    /// Same line, with the coordinate along `direction` replaced
    pub fn with_coord(&self, direction: Direction, coord: usize) -> Position {
        match direction {
            Direction::Horizontal => Position::new(self.row, coord),
            Direction::Vertical => Position::new(coord, self.col),
        }
    }
}

/// Renders as the human label, e.g. `H8` for the center
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "INVALID({},{})", self.row, self.col);
        }
        let col = (b'A' + self.col as u8) as char;
        write!(f, "{}{}", col, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        let mut chars = label.chars();
        let column = chars
            .next()
            .ok_or_else(|| PositionParseError::Format(label.clone()))?;
        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 {
            return Err(PositionParseError::Format(label.clone()));
        }

        if !('A'..='O').contains(&column) {
            return Err(PositionParseError::Column(column));
        }

        let row: usize = digits
            .parse()
            .map_err(|_| PositionParseError::Row(digits.to_string()))?;
        if !(1..=BOARD_SIZE).contains(&row) || digits.starts_with('0') {
            return Err(PositionParseError::Row(digits.to_string()));
        }

        Ok(Position::new(row - 1, column as usize - 'A' as usize))
    }
}

/// Axis a move runs along
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }
}

/// Premium bonus carried by a square. Fixed once the board is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq, Default)]
pub enum PremiumType {
    #[default]
    #[serde(rename = "N")]
    Normal,
    #[serde(rename = "DL")]
    DoubleLetter,
    #[serde(rename = "TL")]
    TripleLetter,
    #[serde(rename = "DW")]
    DoubleWord,
    #[serde(rename = "TW")]
    TripleWord,
}

impl PremiumType {
    pub const ALL: [PremiumType; 5] = [
        PremiumType::Normal,
        PremiumType::DoubleLetter,
        PremiumType::TripleLetter,
        PremiumType::DoubleWord,
        PremiumType::TripleWord,
    ];

    pub fn letter_multiplier(self) -> u32 {
        match self {
            PremiumType::DoubleLetter => 2,
            PremiumType::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            PremiumType::DoubleWord => 2,
            PremiumType::TripleWord => 3,
            _ => 1,
        }
    }

    /// Number of squares of this type on a standard board
    pub fn standard_count(self) -> usize {
        match self {
            PremiumType::Normal => {
                BOARD_SIZE * BOARD_SIZE
                    - TRIPLE_WORD_SQUARES.len()
                    - DOUBLE_WORD_SQUARES.len()
                    - TRIPLE_LETTER_SQUARES.len()
                    - DOUBLE_LETTER_SQUARES.len()
            }
            PremiumType::DoubleLetter => DOUBLE_LETTER_SQUARES.len(),
            PremiumType::TripleLetter => TRIPLE_LETTER_SQUARES.len(),
            PremiumType::DoubleWord => DOUBLE_WORD_SQUARES.len(),
            PremiumType::TripleWord => TRIPLE_WORD_SQUARES.len(),
        }
    }

    fn glyph(self) -> char {
        match self {
            PremiumType::TripleWord => '*',
            PremiumType::DoubleWord => '+',
            PremiumType::TripleLetter => '^',
            PremiumType::DoubleLetter => '-',
            PremiumType::Normal => '.',
        }
    }
}

impl fmt::Display for PremiumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PremiumType::Normal => "NORMAL",
            PremiumType::DoubleLetter => "DLS",
            PremiumType::TripleLetter => "TLS",
            PremiumType::DoubleWord => "DWS",
            PremiumType::TripleWord => "TWS",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Square {
    pub tile: Option<Tile>,
    pub premium: PremiumType,
}

impl Square {
    pub fn is_empty(&self) -> bool {
        self.tile.is_none()
    }
}

/// The 15x15 playing surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    grid: [[Square; BOARD_SIZE]; BOARD_SIZE],
    center: Position,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Build an empty board with the standard premium layout
    pub fn new() -> Self {
        let mut board = Self {
            grid: Default::default(),
            center: Position::new(7, 7),
        };

        let layout: [(&[&str], PremiumType); 4] = [
            (&TRIPLE_WORD_SQUARES, PremiumType::TripleWord),
            (&DOUBLE_WORD_SQUARES, PremiumType::DoubleWord),
            (&TRIPLE_LETTER_SQUARES, PremiumType::TripleLetter),
            (&DOUBLE_LETTER_SQUARES, PremiumType::DoubleLetter),
        ];
        for (labels, premium) in layout {
            for label in labels {
                if let Ok(pos) = label.parse::<Position>() {
                    board.grid[pos.row][pos.col].premium = premium;
                }
            }
        }

        board
    }

    pub fn center(&self) -> Position {
        self.center
    }

    /// Check the premium layout against the standard square counts
    pub fn validate_layout(&self) -> Result<(), LayoutError> {
        if self.center != Position::new(7, 7) {
            return Err(LayoutError::CenterMisplaced {
                position: self.center,
            });
        }

        let counts = self.premium_counts();
        for premium in PremiumType::ALL {
            let actual = counts.get(&premium).copied().unwrap_or(0);
            let expected = premium.standard_count();
            if actual != expected {
                return Err(LayoutError::PremiumCount {
                    premium,
                    expected,
                    actual,
                });
            }
        }

        if self.premium_at(self.center) != PremiumType::DoubleWord {
            return Err(LayoutError::CenterNotDoubleWord);
        }

        Ok(())
    }

    pub fn premium_counts(&self) -> HashMap<PremiumType, usize> {
        let mut counts = HashMap::new();
        for square in self.grid.iter().flatten() {
            *counts.entry(square.premium).or_insert(0) += 1;
        }
        counts
    }

    pub fn square(&self, pos: Position) -> Option<&Square> {
        if !pos.is_valid() {
            return None;
        }
        Some(&self.grid[pos.row][pos.col])
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.square(pos).and_then(|square| square.tile.as_ref())
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some()
    }

    /// Premium of a square; off-board positions read as normal
    pub fn premium_at(&self, pos: Position) -> PremiumType {
        self.square(pos)
            .map(|square| square.premium)
            .unwrap_or_default()
    }

    /// No tile has been placed yet
    pub fn is_empty(&self) -> bool {
        self.grid.iter().flatten().all(Square::is_empty)
    }

    pub fn occupied_positions(&self) -> Vec<Position> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
            .filter(|pos| self.is_occupied(*pos))
            .collect()
    }

    /// Up, down, left and right neighbours that lie on the board
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        if !pos.is_valid() {
            return Vec::new();
        }
        [Direction::Vertical, Direction::Horizontal]
            .into_iter()
            .flat_map(|dir| [pos.step(dir, false), pos.step(dir, true)])
            .flatten()
            .collect()
    }

    pub fn place_tile(&mut self, pos: Position, tile: Tile) -> Result<(), MoveError> {
        if !pos.is_valid() {
            return Err(MoveError::PositionInvalid { position: pos });
        }

        let square = &mut self.grid[pos.row][pos.col];
        if square.tile.is_some() {
            return Err(MoveError::PositionOccupied { position: pos });
        }

        square.tile = Some(tile);
        Ok(())
    }

    /// A copy of this board with `placements` laid down. `self` is untouched.
    pub fn with_placements(&self, placements: &[PlacedTile]) -> Result<Board, MoveError> {
        let mut staged = self.clone();
        for placed in placements {
            staged.place_tile(placed.position, placed.tile.clone())?;
        }
        Ok(staged)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: String = (0..BOARD_SIZE)
            .map(|col| format!(" {} ", (b'A' + col as u8) as char))
            .collect();
        writeln!(f, "   {}", header)?;

        for (row, squares) in self.grid.iter().enumerate() {
            write!(f, "{:2} ", row + 1)?;
            for square in squares {
                let glyph = match &square.tile {
                    Some(tile) => tile.display_char(),
                    None => square.premium.glyph(),
                };
                write!(f, " {} ", glyph)?;
            }
            writeln!(f, " {}", row + 1)?;
        }

        writeln!(f, "   {}", header)
    }
}
