use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    models::Tile,
    utils::letters::{BLANK_COUNT, LETTER_COUNTS},
};

/// Source of fresh tiles for racks.
///
/// Callers must serialize access per game; the supply only promises that a
/// tile is never duplicated or lost between `draw` and `return_tiles`.
pub trait TileSupply {
    /// Take up to `count` tiles, fewer only when the supply runs out
    fn draw(&mut self, count: usize) -> Vec<Tile>;
    /// Put tiles back, e.g. after an exchange
    fn return_tiles(&mut self, tiles: Vec<Tile>);
    fn remaining(&self) -> usize;
}

/// The bag's shuffle source is not part of its snapshot; a restored bag
/// shuffles from the thread rng until `reseed` is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileBag {
    tiles: Vec<Tile>,
    #[serde(skip)]
    rng: Option<StdRng>,
}

impl PartialEq for TileBag {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for TileBag {}

impl TileBag {
    /// A shuffled standard bag of 100 tiles
    pub fn standard() -> Self {
        let mut bag = Self::unshuffled();
        bag.shuffle();
        bag
    }

    /// A standard bag whose every shuffle, including after returns,
    /// follows `seed`
    pub fn seeded(seed: u64) -> Self {
        let mut bag = Self::unshuffled();
        bag.reseed(seed);
        bag.shuffle();
        bag
    }

    /// A bag holding exactly `tiles`. Draws come off the end.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles, rng: None }
    }

    fn unshuffled() -> Self {
        let mut tiles = Vec::with_capacity(100);
        for (letter, count) in LETTER_COUNTS.iter() {
            tiles.extend((0..*count).map(|_| Tile::new(*letter)));
        }
        tiles.extend((0..BLANK_COUNT).map(|_| Tile::blank()));
        Self::from_tiles(tiles)
    }

    /// Drive later shuffles from `seed` without reordering the bag now
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Some(StdRng::seed_from_u64(seed));
    }

    /// Take out one specific tile, for dealing fixed racks
    pub fn pick(&mut self, wanted: &Tile) -> Option<Tile> {
        let idx = self.tiles.iter().position(|t| t.same_kind(wanted))?;
        Some(self.tiles.remove(idx))
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn shuffle(&mut self) {
        match self.rng.as_mut() {
            Some(rng) => self.tiles.shuffle(rng),
            None => self.tiles.shuffle(&mut rand::rng()),
        }
    }
}

impl TileSupply for TileBag {
    fn draw(&mut self, count: usize) -> Vec<Tile> {
        let take = count.min(self.tiles.len());
        self.tiles.split_off(self.tiles.len() - take)
    }

    fn return_tiles(&mut self, tiles: Vec<Tile>) {
        self.tiles.extend(tiles.into_iter().map(Tile::reset));
        self.shuffle();
    }

    fn remaining(&self) -> usize {
        self.tiles.len()
    }
}
