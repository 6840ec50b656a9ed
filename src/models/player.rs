use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{MoveError, RackError},
    models::Tile,
    utils::letters::get_letter_value,
};

/// Maximum number of tiles a player can hold
pub const RACK_CAPACITY: usize = 7;

/// Tiles held by one player
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, MoveError> {
        let mut rack = Self::new();
        rack.add(tiles)?;
        Ok(rack)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() >= RACK_CAPACITY
    }

    /// Room left before the rack is full
    pub fn missing(&self) -> usize {
        RACK_CAPACITY.saturating_sub(self.tiles.len())
    }

    /// Add drawn tiles. Nothing is added if they would overflow the rack.
    pub fn add(&mut self, tiles: Vec<Tile>) -> Result<(), MoveError> {
        if self.tiles.len() + tiles.len() > RACK_CAPACITY {
            return Err(MoveError::RackOverflow);
        }
        self.tiles.extend(tiles.into_iter().map(Tile::reset));
        Ok(())
    }

    /// Remove one rack tile per entry of `tiles`, all or nothing.
    /// Returns the tiles as they were held.
    pub fn remove(&mut self, tiles: &[Tile]) -> Result<Vec<Tile>, MoveError> {
        let mut remaining = self.tiles.clone();
        let mut removed = Vec::with_capacity(tiles.len());

        for wanted in tiles {
            let idx = remaining
                .iter()
                .position(|held| held.same_kind(wanted))
                .ok_or(MoveError::RackMismatch)?;
            removed.push(remaining.remove(idx));
        }

        self.tiles = remaining;
        Ok(removed)
    }

    /// Whether every tile in `tiles` can be taken from this rack at once
    pub fn contains_all(&self, tiles: &[Tile]) -> bool {
        self.clone().remove(tiles).is_ok()
    }

    /// Check that every tile could have come from a standard bag. Racks
    /// restored from a snapshot bypass `add`, so this is their only gate.
    pub fn validate(&self) -> Result<(), RackError> {
        if self.tiles.len() > RACK_CAPACITY {
            return Err(RackError::Overflow {
                count: self.tiles.len(),
            });
        }

        for tile in &self.tiles {
            if tile.is_blank {
                if tile.letter.is_some() || tile.points != 0 {
                    return Err(RackError::DirtyBlank);
                }
                continue;
            }
            match tile.letter {
                Some(letter) if letter.is_ascii_uppercase() => {
                    let expected = get_letter_value(letter);
                    if tile.points != expected {
                        return Err(RackError::WrongValue {
                            letter,
                            points: tile.points,
                            expected,
                        });
                    }
                }
                letter => return Err(RackError::BadLetter { letter }),
            }
        }
        Ok(())
    }

    /// Sum of face values, used for end-of-game settlement
    pub fn value(&self) -> u32 {
        self.tiles.iter().map(Tile::points).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub player_id: Uuid,
    pub name: String,
    pub rack: Rack,
    pub score: i32,
    pub is_active: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            player_id: Uuid::new_v4(),
            name: name.into(),
            rack: Rack::new(),
            score: 0,
            is_active: true,
        }
    }
}
