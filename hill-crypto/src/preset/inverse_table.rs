/// Multiplicative inverses in Z_29. `Z29_INVERSES[r - 1]` is the inverse of `r`
/// for `r` in `1..=28`; 0 has no entry.
pub const Z29_INVERSES: [i64; 28] = [
    1, 15, 10, 22, 6, 5, 25, 11, 13, 3, 8, 17, 9, 27, 2, 20, 12, 21, 26, 16, 18, 4, 24, 23, 7, 19,
    14, 28,
];

/// Looks up the inverse of a residue in `1..=28`, `None` for anything else.
pub fn z29_inverse(residue: i64) -> Option<i64> {
    if !(1..=28).contains(&residue) {
        return None;
    }

    Some(Z29_INVERSES[(residue - 1) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::extended_gcd;

    #[test]
    fn table_entries_are_inverses() {
        for r in 1..=28i64 {
            let inverse = z29_inverse(r).unwrap();
            assert_eq!((r * inverse) % 29, 1, "entry for {}", r);
        }
    }

    #[test]
    fn table_agrees_with_euclid() {
        for r in 1..=28i64 {
            let (_, x, _) = extended_gcd(r, 29);
            assert_eq!(z29_inverse(r), Some(x.rem_euclid(29)));
        }
    }

    #[test]
    fn out_of_range_has_no_inverse() {
        assert_eq!(z29_inverse(0), None);
        assert_eq!(z29_inverse(29), None);
        assert_eq!(z29_inverse(-1), None);
    }
}
