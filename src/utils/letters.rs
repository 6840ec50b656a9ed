use std::collections::HashMap;
use once_cell::sync::Lazy;

/// Number of blank tiles in a standard bag
pub const BLANK_COUNT: usize = 2;

/// Standard tile point values
pub static LETTER_VALUES: Lazy<HashMap<char, u32>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // 1 point letters
    for ch in ['A', 'E', 'I', 'O', 'U', 'L', 'N', 'R', 'S', 'T'] {
        map.insert(ch, 1);
    }

    // 2 points
    for ch in ['D', 'G'] {
        map.insert(ch, 2);
    }

    // 3 points
    for ch in ['B', 'C', 'M', 'P'] {
        map.insert(ch, 3);
    }

    // 4 points
    for ch in ['F', 'H', 'V', 'W', 'Y'] {
        map.insert(ch, 4);
    }

    // 5 points
    map.insert('K', 5);

    // 8 points
    for ch in ['J', 'X'] {
        map.insert(ch, 8);
    }

    // 10 points
    for ch in ['Q', 'Z'] {
        map.insert(ch, 10);
    }

    map
});

/// How many copies of each letter a standard bag holds (blanks excluded)
pub static LETTER_COUNTS: Lazy<Vec<(char, usize)>> = Lazy::new(|| {
    vec![
        ('A', 9),
        ('B', 2),
        ('C', 2),
        ('D', 4),
        ('E', 12),
        ('F', 2),
        ('G', 3),
        ('H', 2),
        ('I', 9),
        ('J', 1),
        ('K', 1),
        ('L', 4),
        ('M', 2),
        ('N', 6),
        ('O', 8),
        ('P', 2),
        ('Q', 1),
        ('R', 6),
        ('S', 4),
        ('T', 6),
        ('U', 4),
        ('V', 2),
        ('W', 2),
        ('X', 1),
        ('Y', 2),
        ('Z', 1),
    ]
});

/// Get the point value for a letter. Anything outside A-Z is worth nothing.
pub fn get_letter_value(letter: char) -> u32 {
    let upper = letter.to_ascii_uppercase();
    LETTER_VALUES.get(&upper).copied().unwrap_or(0)
}

/// Total number of tiles in a standard bag, blanks included
pub fn standard_tile_count() -> usize {
    LETTER_COUNTS.iter().map(|(_, count)| count).sum::<usize>() + BLANK_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_values() {
        assert_eq!(get_letter_value('E'), 1);
        assert_eq!(get_letter_value('Q'), 10);
        assert_eq!(get_letter_value('x'), 8);
        assert_eq!(get_letter_value('D'), 2);
        assert_eq!(get_letter_value('?'), 0);
    }

    #[test]
    fn test_distribution_totals_one_hundred() {
        assert_eq!(LETTER_COUNTS.len(), 26);
        assert_eq!(standard_tile_count(), 100);
    }

    #[test]
    fn test_every_counted_letter_has_a_value() {
        for (letter, _) in LETTER_COUNTS.iter() {
            assert!(get_letter_value(*letter) > 0, "{} has no value", letter);
        }
    }
}
