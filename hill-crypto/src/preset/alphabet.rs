use lazy_static::lazy_static;
use std::collections::HashMap;

/// The 29 symbols of the cipher, in index order.
pub const ALPHABET: [char; 29] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '.', '?', ' ',
];

lazy_static! {
    /// Maps a residue (0 to 28) to its symbol: A-Z, '.', '?' and space.
    pub static ref INDEX_TO_SYMBOL_MAP: HashMap<i64, char> = ALPHABET
        .iter()
        .enumerate()
        .map(|(index, &ch)| (index as i64, ch))
        .collect();

    /// Maps a symbol back to its residue (0 to 28).
    pub static ref SYMBOL_TO_INDEX_MAP: HashMap<char, i64> = INDEX_TO_SYMBOL_MAP
        .iter()
        .map(|(&index, &ch)| (ch, index))
        .collect();
}

/// Residue of `ch`, `None` when the symbol is outside the alphabet.
pub fn symbol_index(ch: char) -> Option<i64> {
    SYMBOL_TO_INDEX_MAP.get(&ch).copied()
}

/// Symbol of an already normalized residue.
pub fn index_symbol(index: i64) -> Option<char> {
    INDEX_TO_SYMBOL_MAP.get(&index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::TestResult;
    use quickcheck::quickcheck;

    #[test]
    fn maps_are_bijective() {
        assert_eq!(INDEX_TO_SYMBOL_MAP.len(), 29);
        assert_eq!(SYMBOL_TO_INDEX_MAP.len(), 29);

        for (index, &ch) in ALPHABET.iter().enumerate() {
            assert_eq!(symbol_index(ch), Some(index as i64));
            assert_eq!(index_symbol(index as i64), Some(ch));
        }
    }

    #[test]
    fn fixed_positions() {
        assert_eq!(symbol_index('A'), Some(0));
        assert_eq!(symbol_index('Z'), Some(25));
        assert_eq!(symbol_index('.'), Some(26));
        assert_eq!(symbol_index('?'), Some(27));
        assert_eq!(symbol_index(' '), Some(28));
        assert_eq!(index_symbol(29), None);
        assert_eq!(index_symbol(-1), None);
    }

    quickcheck! {
        fn prop_symbol_lookup_matches_alphabet(ch: char) -> TestResult {
            let expected = ALPHABET.iter().position(|&c| c == ch).map(|pos| pos as i64);

            match (symbol_index(ch), expected) {
                (Some(found), Some(expected)) if found == expected => TestResult::passed(),
                (None, None) => TestResult::passed(),
                (found, expected) => TestResult::error(format!(
                    "Mismatch for char {:?}: expected {:?}, found {:?}",
                    ch, expected, found
                )),
            }
        }
    }
}
