use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{models::Position, utils::letters::get_letter_value};

/// A single letter tile.
///
/// Blanks carry no letter while they sit in a rack or the bag; once played
/// they carry the letter they stand for, but still score nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tile {
    pub letter: Option<char>,
    pub points: u32,
    pub is_blank: bool,
}

impl Tile {
    /// A regular tile with its standard point value
    pub fn new(letter: char) -> Self {
        let letter = letter.to_ascii_uppercase();
        Self {
            letter: Some(letter),
            points: get_letter_value(letter),
            is_blank: false,
        }
    }

    /// An unassigned blank
    pub fn blank() -> Self {
        Self {
            letter: None,
            points: 0,
            is_blank: true,
        }
    }

    /// A blank standing in for `letter`
    pub fn blank_as(letter: char) -> Self {
        Self {
            letter: Some(letter.to_ascii_uppercase()),
            points: 0,
            is_blank: true,
        }
    }

    /// Face value; blanks are always worth 0
    pub fn points(&self) -> u32 {
        if self.is_blank {
            0
        } else {
            self.points
        }
    }

    /// True when `other` is interchangeable with this tile in a rack.
    /// Blanks match blanks whatever letter they were assigned; regular
    /// tiles must agree on letter and points.
    pub fn same_kind(&self, other: &Tile) -> bool {
        if self.is_blank || other.is_blank {
            return self.is_blank && other.is_blank;
        }
        self.letter == other.letter && self.points == other.points
    }

    /// Blank with any assignment cleared, as it goes back to the bag
    pub fn reset(self) -> Self {
        if self.is_blank {
            Tile::blank()
        } else {
            self
        }
    }

    /// Played blanks render in lowercase, unassigned ones as `_`
    pub fn display_char(&self) -> char {
        match (self.letter, self.is_blank) {
            (Some(letter), true) => letter.to_ascii_lowercase(),
            (Some(letter), false) => letter,
            (None, _) => '_',
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_char())
    }
}

/// A tile bound to a square, as proposed or played
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacedTile {
    pub position: Position,
    pub tile: Tile,
}

impl PlacedTile {
    pub fn new(position: Position, tile: Tile) -> Self {
        Self { position, tile }
    }
}
