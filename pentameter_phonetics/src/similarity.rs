// Phoneme similarity scores for slant-rhyme pairing.
//
// Scores for non-identical phoneme pairs from Hirjee & Brown (2010),
// "Using automated rhyme detection to characterize rhyming style in rap
// music", Tables 1 and 2. Only pairs scoring -1.0 or higher are listed;
// anything missing is treated as dissimilar. Higher is more similar.
//
// Used by the sonnet assembler's pair rule (after Ghazvininejad et al. 2016,
// "Generating Topical Poetry", §5.2) to decide whether two lines from the
// same rhyme bucket may close a rhyme together.

use crate::types::Phoneme;
use crate::types::Phoneme::*;

/// Similarity limit used by Ghazvininejad et al.; pairs must score above it.
pub const DEFAULT_SIMILARITY_LIMIT: f64 = -0.6;

/// A more conservative limit, suggested for stricter rhyming.
pub const CONSERVATIVE_SIMILARITY_LIMIT: f64 = 0.0;

/// Unordered phoneme pairs and their similarity score.
pub const SIMILARITY_SCORES: &[(Phoneme, Phoneme, f64)] = &[
    (Aa, Ah, -0.8),
    (Aa, Ao, 1.6),
    (Aa, Er, -0.6),
    (Aa, Ow, -1.0),
    (Ah, Eh, -0.6),
    (Ah, Er, -0.2),
    (Ah, Ih, -0.3),
    (Ah, Ow, -1.0),
    (Ah, Oy, -0.6),
    (Ah, Uh, -0.9),
    (Ao, Aw, -1.0),
    (Ao, Ow, -0.3),
    (Ao, Oy, -0.4),
    (Ao, Uh, 1.1),
    (Aw, Ay, -0.3),
    (Eh, Ih, 0.2),
    (Ih, Iy, -0.9),
    (Ih, Oy, 0.2),
    (Oy, Uh, 0.1),
    (Uh, Uw, -0.5),
    (B, D, 1.1),
    (B, Dh, 0.4),
    (B, G, 1.9),
    (B, Jh, 1.9),
    (B, L, -0.3),
    (B, M, -0.5),
    (B, P, 0.1),
    (B, R, -0.9),
    (B, T, -1.0),
    (B, V, 2.3),
    (B, Z, 0.3),
    (Ch, F, -0.3),
    (Ch, G, 0.2),
    (Ch, Jh, 0.4),
    (Ch, K, 1.5),
    (Ch, P, 1.1),
    (Ch, S, 0.3),
    (Ch, Sh, 0.6),
    (Ch, T, 0.9),
    (Ch, Th, 1.4),
    (D, G, 0.1),
    (D, Jh, 0.2),
    (D, R, -0.9),
    (D, T, 0.2),
    (D, Th, 0.0),
    (D, V, -0.2),
    (D, Z, 0.0),
    (Dh, K, -0.4),
    (Dh, L, -0.2),
    (Dh, T, -0.3),
    (Dh, Th, 1.3),
    (Dh, V, 2.3),
    (Dh, Z, 1.1),
    (F, K, -0.3),
    (F, P, 1.1),
    (F, S, 1.0),
    (F, Sh, 1.2),
    (F, T, -0.9),
    (F, Th, 4.0),
    (F, V, 0.6),
    (G, Jh, 1.8),
    (G, K, 0.0),
    (G, L, -0.2),
    (G, M, -1.0),
    (G, P, -0.7),
    (G, R, -0.8),
    (G, V, 0.3),
    (G, Z, -0.3),
    (Jh, M, 0.1),
    (Jh, N, -0.5),
    (Jh, P, -0.2),
    (Jh, R, -0.3),
    (Jh, S, -0.6),
    (Jh, Sh, 0.6),
    (Jh, V, 1.4),
    (Jh, Z, 1.0),
    (Jh, Zh, 4.1),
    (K, P, 1.7),
    (K, S, -0.7),
    (K, Sh, -0.6),
    (K, T, 0.9),
    (K, Th, 0.5),
    (L, R, -0.5),
    (M, N, 1.8),
    (M, Ng, 0.7),
    (M, Th, 0.4),
    (M, V, -0.6),
    (N, Ng, 1.2),
    (N, R, -1.0),
    (N, Sh, -0.7),
    (N, Th, -0.6),
    (P, Sh, -0.7),
    (P, T, 1.1),
    (P, Th, 0.9),
    (P, V, -0.5),
    (R, Sh, -0.8),
    (S, Sh, 2.4),
    (S, T, -1.0),
    (S, Th, 1.0),
    (S, Z, 0.5),
    (S, Zh, 0.0),
    (Sh, T, -0.6),
    (Sh, Z, -0.2),
    (Sh, Zh, 3.6),
    (T, Th, 1.6),
    (T, V, -0.8),
    (Th, V, 0.5),
    (V, Z, -0.4),
    (V, Zh, 1.6),
    (Z, Zh, 3.0),
];

/// Similarity score of two distinct phonemes, in either order.
///
/// `None` for identical phonemes and for pairs below the table's cutoff.
pub fn similarity(a: Phoneme, b: Phoneme) -> Option<f64> {
    SIMILARITY_SCORES
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, score)| score)
}

/// Whether two phonemes are close enough to rhyme: identical, or scoring
/// strictly above `limit`.
pub fn are_similar(a: Phoneme, b: Phoneme, limit: f64) -> bool {
    a == b || similarity(a, b).is_some_and(|score| score > limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_order_independent() {
        assert_eq!(similarity(Phoneme::F, Phoneme::Th), Some(4.0));
        assert_eq!(similarity(Phoneme::Th, Phoneme::F), Some(4.0));
    }

    #[test]
    fn test_missing_pairs_are_dissimilar() {
        assert_eq!(similarity(Phoneme::Aa, Phoneme::Iy), None);
        assert!(!are_similar(Phoneme::Aa, Phoneme::Iy, -50.0));
    }

    #[test]
    fn test_identical_always_similar() {
        assert!(are_similar(Phoneme::R, Phoneme::R, 100.0));
    }

    #[test]
    fn test_limit_is_strict() {
        // Aa/Er scores exactly -0.6, which does not clear a -0.6 limit.
        assert!(!are_similar(Phoneme::Aa, Phoneme::Er, DEFAULT_SIMILARITY_LIMIT));
        assert!(are_similar(Phoneme::Ah, Phoneme::Er, DEFAULT_SIMILARITY_LIMIT));
        assert!(are_similar(Phoneme::D, Phoneme::T, CONSERVATIVE_SIMILARITY_LIMIT));
        assert!(!are_similar(Phoneme::D, Phoneme::Z, CONSERVATIVE_SIMILARITY_LIMIT));
    }

    #[test]
    fn test_table_has_no_duplicate_pairs() {
        for (i, &(a, b, _)) in SIMILARITY_SCORES.iter().enumerate() {
            assert_ne!(a, b);
            for &(c, d, _) in &SIMILARITY_SCORES[i + 1..] {
                assert!(!((a == c && b == d) || (a == d && b == c)), "{a}/{b}");
            }
        }
    }
}
