use serde::{Deserialize, Serialize};

use crate::{game::extractor::FormedWord, models::{Board, RACK_CAPACITY}};

/// Flat bonus for playing a full rack in one turn
pub const BINGO_BONUS: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordScore {
    pub word: String,
    pub score: u32,
}

/// Breakdown of a move's points
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveScore {
    pub words: Vec<WordScore>,
    pub bingo_bonus: u32,
    pub total: u32,
}

pub struct Scorer;

impl Scorer {
    /// Score one word on the staged board.
    ///
    /// Scoring rules:
    /// - Each tile contributes its face value; blanks contribute 0
    /// - DL/TL multiply a letter only if that tile was placed this turn
    /// - DW/TW squares under newly placed tiles multiply the whole word,
    ///   and stack with each other (two DW = x4)
    /// - Premiums under tiles from earlier turns are ignored
    pub fn score_word(board: &Board, word: &FormedWord) -> u32 {
        let mut letter_total = 0;
        let mut word_multiplier = 1;

        for (pos, is_new) in word.squares() {
            let value = board.tile_at(pos).map(|tile| tile.points()).unwrap_or(0);
            if is_new {
                let premium = board.premium_at(pos);
                letter_total += value * premium.letter_multiplier();
                word_multiplier *= premium.word_multiplier();
            } else {
                letter_total += value;
            }
        }

        letter_total * word_multiplier
    }

    /// Score every formed word and add the bingo bonus.
    /// A tile shared by two words counts in both.
    pub fn score_move(board: &Board, words: &[FormedWord], tiles_placed: usize) -> MoveScore {
        let words: Vec<WordScore> = words
            .iter()
            .map(|word| WordScore {
                word: word.word.clone(),
                score: Self::score_word(board, word),
            })
            .collect();
        let bingo_bonus = Self::bingo_bonus(tiles_placed);
        let total = words.iter().map(|w| w.score).sum::<u32>() + bingo_bonus;

        MoveScore {
            words,
            bingo_bonus,
            total,
        }
    }

    fn bingo_bonus(tiles_placed: usize) -> u32 {
        if tiles_placed == RACK_CAPACITY {
            BINGO_BONUS
        } else {
            0
        }
    }
}
