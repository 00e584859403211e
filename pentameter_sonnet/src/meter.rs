// Meter scanner: finds every word-aligned stretch of a phoneme stream that
// scans as iambic pentameter.
//
// The scan works on the stream's vowels only. Each vowel gets a metrical
// value from its lexical stress: unstressed is weak, primary is strong, and
// secondary stress may fill either slot. One extra relaxation: when a word
// ends in stressed-unstressed-unstressed, its last vowel may also fill
// either slot (a dactylic word can close on a beat).
//
// A window of 10 vowels matches when its slots alternate weak/strong five
// times. Rather than re-testing each window, `runs[p][i]` counts how many
// consecutive vowels from `i` fit the alternation whose strong slots fall on
// vowels of parity `1 - p`. A start `s` matches iff `runs[s % 2][s] >= 10`,
// so the whole scan is linear in the number of vowels.
//
// Boundary rules, per window start `s`:
// - `s` must be the first vowel of its word.
// - Masculine ending: the window ends at the end of the stream, or the next
//   vowel begins a new word.
// - Feminine ending: the 11th vowel is unstressed and is the last vowel of
//   its word, whether that word is the 10th vowel's or the next one.
//
// The two endings are tested independently, so one start can give both a
// masculine and a feminine candidate. Every start is tried, so overlapping
// candidates beginning at different words are all reported.

use pentameter_phonetics::Stress;
use tracing::debug;

use crate::candidate::{Candidate, FEMININE_VOWELS, MASCULINE_VOWELS, Span, StressPattern};
use crate::rhyme::RhymeKeyer;
use crate::stream::{PhonemeStream, phrase_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metrical {
    Weak,
    Strong,
    Either,
}

impl Metrical {
    fn fits(self, strong_slot: bool) -> bool {
        match self {
            Metrical::Either => true,
            Metrical::Weak => !strong_slot,
            Metrical::Strong => strong_slot,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct VowelSlot {
    metrical: Metrical,
    word: usize,
    starts_word: bool,
}

/// A matched window, in vowel and word coordinates of one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterMatch {
    /// Index of the window's first vowel.
    pub start_vowel: usize,
    /// 10 (masculine) or 11 (feminine).
    pub vowels: usize,
    /// First word of the candidate.
    pub start_word: usize,
    /// One past the candidate's last word.
    pub end_word: usize,
}

fn vowel_slots(stream: &PhonemeStream) -> Vec<VowelSlot> {
    let mut slots: Vec<VowelSlot> = Vec::new();
    let mut stresses: Vec<Stress> = Vec::new();

    for (word_idx, word) in stream.words().iter().enumerate() {
        let first = slots.len();
        for stress in word.phones.iter().filter_map(|p| p.stress()) {
            slots.push(VowelSlot {
                metrical: match stress {
                    Stress::Unstressed => Metrical::Weak,
                    Stress::Primary => Metrical::Strong,
                    Stress::Secondary => Metrical::Either,
                },
                word: word_idx,
                starts_word: slots.len() == first,
            });
            stresses.push(stress);
        }

        let n = slots.len();
        if n - first >= 3
            && stresses[n - 3].is_stressed()
            && stresses[n - 2] == Stress::Unstressed
            && stresses[n - 1] == Stress::Unstressed
        {
            slots[n - 1].metrical = Metrical::Either;
        }
    }

    slots
}

/// Find all pentameter windows of a stream.
pub fn find_matches(stream: &PhonemeStream) -> Vec<MeterMatch> {
    let slots = vowel_slots(stream);
    let n = slots.len();
    if n < MASCULINE_VOWELS {
        return Vec::new();
    }

    let mut runs = [vec![0usize; n + 1], vec![0usize; n + 1]];
    for (parity, run) in runs.iter_mut().enumerate() {
        for i in (0..n).rev() {
            let strong_slot = (i + parity) % 2 == 1;
            run[i] = if slots[i].metrical.fits(strong_slot) {
                run[i + 1] + 1
            } else {
                0
            };
        }
    }

    let num_words = stream.words().len();
    let at_boundary = |v: usize| v == n || slots[v].starts_word;
    let word_at = |v: usize| if v == n { num_words } else { slots[v].word };

    let mut matches = Vec::new();
    for s in 0..=(n - MASCULINE_VOWELS) {
        if !slots[s].starts_word || runs[s % 2][s] < MASCULINE_VOWELS {
            continue;
        }
        let after = s + MASCULINE_VOWELS;

        if at_boundary(after) {
            matches.push(MeterMatch {
                start_vowel: s,
                vowels: MASCULINE_VOWELS,
                start_word: slots[s].word,
                end_word: word_at(after),
            });
        }
        if after < n && slots[after].metrical == Metrical::Weak && at_boundary(after + 1) {
            matches.push(MeterMatch {
                start_vowel: s,
                vowels: FEMININE_VOWELS,
                start_word: slots[s].word,
                end_word: word_at(after + 1),
            });
        }
    }

    matches
}

/// Scan one line's stream and build its candidates.
pub fn scan_stream(line: u32, stream: &PhonemeStream, keyer: &RhymeKeyer) -> Vec<Candidate> {
    find_matches(stream)
        .into_iter()
        .filter_map(|m| {
            let words = &stream.words()[m.start_word..m.end_word];
            let text = phrase_text(words);
            let phones: Vec<_> = words.iter().flat_map(|w| w.phones.iter().copied()).collect();
            let stress = StressPattern::from_phones(&phones);
            let Some(rhyme_key) = keyer.key(&phones) else {
                debug!(line, %text, "no stressed vowel to rhyme on; dropped");
                return None;
            };
            let span = Span::new(line, m.start_word as u32, m.end_word as u32);
            debug!(line, %span, %stress, %rhyme_key, "{text}");
            Some(Candidate::new(text, span, phones, stress, rhyme_key))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rhyme::default_keyer;
    use crate::stream::{RawAnnotation, normalize};

    fn stream(pairs: &[(&str, &str)]) -> PhonemeStream {
        normalize(&RawAnnotation::from_pairs(pairs)).unwrap()
    }

    fn scan(pairs: &[(&str, &str)]) -> Vec<Candidate> {
        scan_stream(0, &stream(pairs), &default_keyer())
    }

    const IAMBS: [(&str, &str); 6] = [
        ("alone", "AH0 L OW1 N"),
        ("again", "AH0 G EH1 N"),
        ("below", "B IH0 L OW1"),
        ("above", "AH0 B AH1 V"),
        ("between", "B IH0 T W IY1 N"),
        ("tonight", "T AH0 N AY1 T"),
    ];

    #[test]
    fn five_iambs_give_one_candidate_spanning_all_words() {
        let found = scan(&IAMBS[..5]);
        assert_eq!(found.len(), 1);
        let c = &found[0];
        assert_eq!(c.span(), Span::new(0, 0, 5));
        assert_eq!(c.text(), "alone again below above between");
        assert_eq!(c.stress().to_string(), "0101010101");
        assert_eq!(c.rhyme_key().to_string(), "IY1-M");
    }

    #[test]
    fn fewer_than_ten_vowels_give_nothing() {
        assert!(scan(&IAMBS[..4]).is_empty());
        assert!(scan(&[]).is_empty());
    }

    #[test]
    fn overlapping_windows_are_all_reported() {
        let found = scan(&IAMBS);
        let spans: Vec<Span> = found.iter().map(|c| c.span()).collect();
        assert_eq!(spans, vec![Span::new(0, 0, 5), Span::new(0, 1, 6)]);
    }

    #[test]
    fn leading_stressed_word_is_skipped() {
        let mut pairs = vec![("sun", "S AH1 N")];
        pairs.extend_from_slice(&IAMBS[..5]);
        let found = scan(&pairs);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span(), Span::new(0, 1, 6));
    }

    #[test]
    fn window_starting_mid_word_is_rejected() {
        // Vowels 1 0 1 | 0 1 x4: the only matching window starts inside "banana".
        let mut pairs = vec![("banana", "B AA1 N AH0 N AA1")];
        pairs.extend_from_slice(&IAMBS[..4]);
        assert!(scan(&pairs).is_empty());
    }

    #[test]
    fn window_ending_mid_word_is_rejected() {
        let mut pairs = IAMBS[..4].to_vec();
        pairs.push(("outright", "AW0 T R AY1 T R AY1"));
        assert!(scan(&pairs).is_empty());
    }

    #[test]
    fn feminine_ending_inside_last_word() {
        let mut pairs = IAMBS[..4].to_vec();
        pairs.push(("remember", "R IH0 M EH1 M B ER0"));
        let found = scan(&pairs);
        assert_eq!(found.len(), 1);
        assert!(found[0].stress().is_feminine());
        assert_eq!(found[0].stress().to_string(), "01010101010");
        assert_eq!(found[0].span(), Span::new(0, 0, 5));
        assert_eq!(found[0].rhyme_key().to_string(), "EH1-M-P-ER0");
    }

    #[test]
    fn one_start_gives_masculine_and_feminine_candidates() {
        let mut pairs = IAMBS[..5].to_vec();
        pairs.push(("the", "DH AH0"));
        let found = scan(&pairs);
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].span(), Span::new(0, 0, 5));
        assert_eq!(found[0].stress().to_string(), "0101010101");
        assert_eq!(found[0].text(), "alone again below above between");

        assert!(found[1].stress().is_feminine());
        assert_eq!(found[1].span(), Span::new(0, 0, 6));
        assert_eq!(found[1].stress().to_string(), "01010101010");
        assert_eq!(found[1].text(), "alone again below above between the");
        assert_eq!(found[1].rhyme_key().to_string(), "IY1-M-TH-AH0");
    }

    #[test]
    fn feminine_ending_needs_a_word_boundary_after_it() {
        // "about" continues past the 11th vowel, so the first word only
        // starts a masculine line.
        let mut pairs = IAMBS[..5].to_vec();
        pairs.push(("about", "AH0 B AW1 T"));
        let spans: Vec<Span> = scan(&pairs).iter().map(|c| c.span()).collect();
        assert_eq!(spans, vec![Span::new(0, 0, 5), Span::new(0, 1, 6)]);
    }

    #[test]
    fn secondary_stress_fills_either_slot() {
        let pairs = [
            ("untold", "AH2 N T OW1 L D"),
            ("again", "AH0 G EH1 N"),
            ("below", "B IH0 L OW2"),
            ("above", "AH0 B AH1 V"),
            ("tonight", "T AH0 N AY1 T"),
        ];
        let found = scan(&pairs);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stress().to_string(), "2101020101");
    }

    #[test]
    fn dactylic_word_can_close_on_a_beat() {
        let pairs = [
            ("alone", "AH0 L OW1 N"),
            ("the", "DH AH0"),
            ("merrily", "M EH1 R AH0 L IY0"),
            ("again", "AH0 G EH1 N"),
            ("tonight", "T AH0 N AY1 T"),
        ];
        let found = scan(&pairs);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stress().to_string(), "0101000101");
    }

    #[test]
    fn only_trailing_punctuation_is_trimmed_from_text() {
        let pairs = [
            ("alone", "AH0 L OW1 N"),
            (",", ","),
            ("again", "AH0 G EH1 N"),
            (";", ";"),
            ("below", "B IH0 L OW1"),
            ("above", "AH0 B AH1 V"),
            ("tonight", "T AH0 N AY1 T"),
            ("!", "!"),
        ];
        let found = scan(&pairs);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span(), Span::new(0, 0, 5));
        assert_eq!(found[0].text(), "alone, again; below above tonight");
    }

    #[test]
    fn find_matches_reports_word_ranges() {
        let matches = find_matches(&stream(&IAMBS));
        assert_eq!(
            matches[1],
            MeterMatch {
                start_vowel: 2,
                vowels: 10,
                start_word: 1,
                end_word: 6,
            }
        );
    }
}
