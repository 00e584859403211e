// Candidate lines: phrases found to scan as (relaxed) iambic pentameter.
//
// A `Candidate` is produced by the meter scanner (meter.rs) or read back
// from a cache (store.rs) and is never mutated afterwards. Identity is the
// pair (source span, stress pattern): the same words can yield a masculine
// and a feminine candidate, and both are kept.
//
// `Span` locates the candidate in its source line by word indices of the
// line's phoneme stream. `StressPattern` is the lexical stress of the
// candidate's vowels, 10 digits for a masculine ending and 11 for a
// feminine one.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use pentameter_phonetics::{Phone, Stress};
use smallvec::SmallVec;

use crate::rhyme::RhymeKey;

/// Vowels in a masculine pentameter line.
pub const MASCULINE_VOWELS: usize = 10;

/// Vowels in a line with a feminine ending.
pub const FEMININE_VOWELS: usize = 11;

/// Word range of a candidate within one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Index of the source line.
    pub line: u32,
    /// First word of the span.
    pub start_word: u32,
    /// One past the last word of the span.
    pub end_word: u32,
}

impl Span {
    pub fn new(line: u32, start_word: u32, end_word: u32) -> Self {
        Span {
            line,
            start_word,
            end_word,
        }
    }

    /// Whether the spans share at least one word of the same line.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.line == other.line
            && self.start_word < other.end_word
            && other.start_word < self.end_word
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.line, self.start_word, self.end_word)
    }
}

impl FromStr for Span {
    type Err = String;

    /// Parse the `line:start-end` form written by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("bad span {s:?}, expected line:start-end");
        let (line, words) = s.split_once(':').ok_or_else(bad)?;
        let (start, end) = words.split_once('-').ok_or_else(bad)?;
        let span = Span {
            line: line.parse().map_err(|_| bad())?,
            start_word: start.parse().map_err(|_| bad())?,
            end_word: end.parse().map_err(|_| bad())?,
        };
        if span.start_word >= span.end_word {
            return Err(format!("empty span {s:?}"));
        }
        Ok(span)
    }
}

/// Lexical stress of a candidate's vowels, in order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StressPattern(SmallVec<[Stress; FEMININE_VOWELS]>);

impl StressPattern {
    /// The stresses of the vowels among `phones`.
    pub fn from_phones(phones: &[Phone]) -> Self {
        StressPattern(phones.iter().filter_map(|p| p.stress()).collect())
    }

    pub fn as_slice(&self) -> &[Stress] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An eleventh, unstressed syllable follows the fifth foot.
    pub fn is_feminine(&self) -> bool {
        self.0.len() == FEMININE_VOWELS
    }
}

impl fmt::Display for StressPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stress in &self.0 {
            write!(f, "{}", stress.digit())?;
        }
        Ok(())
    }
}

impl FromStr for StressPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stresses = s
            .chars()
            .map(|c| {
                Stress::from_digit(c).ok_or_else(|| format!("bad stress digit {c:?} in {s:?}"))
            })
            .collect::<Result<SmallVec<_>, _>>()?;
        if stresses.len() != MASCULINE_VOWELS && stresses.len() != FEMININE_VOWELS {
            return Err(format!(
                "stress pattern {s:?} has {} vowels, expected {} or {}",
                stresses.len(),
                MASCULINE_VOWELS,
                FEMININE_VOWELS
            ));
        }
        Ok(StressPattern(stresses))
    }
}

/// A phrase that scans as iambic pentameter, with its rhyme key.
#[derive(Debug, Clone)]
pub struct Candidate {
    text: String,
    span: Span,
    phones: Vec<Phone>,
    stress: StressPattern,
    rhyme_key: RhymeKey,
}

impl Candidate {
    pub fn new(
        text: String,
        span: Span,
        phones: Vec<Phone>,
        stress: StressPattern,
        rhyme_key: RhymeKey,
    ) -> Self {
        Candidate {
            text,
            span,
            phones,
            stress,
            rhyme_key,
        }
    }

    /// Source words of the span, space-joined, trailing punctuation removed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn stress(&self) -> &StressPattern {
        &self.stress
    }

    pub fn rhyme_key(&self) -> &RhymeKey {
        &self.rhyme_key
    }

    /// Last word of the text, lowercased, without surrounding punctuation.
    /// The parts of a hyphenated compound count as words.
    pub fn final_word(&self) -> String {
        self.text
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|w| !w.is_empty())
            .next_back()
            .unwrap_or_default()
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
            .to_lowercase()
    }

    /// Whether both candidates would put the same wording into one sonnet:
    /// overlapping spans, or identical text from different places.
    pub fn conflicts_with(&self, other: &Candidate) -> bool {
        self.span.overlaps(&other.span) || self.text.eq_ignore_ascii_case(&other.text)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span && self.stress == other.stress
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.span.hash(state);
        self.stress.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pentameter_phonetics::parse_phones;

    fn candidate(text: &str, span: Span, phones: &str) -> Candidate {
        let phones = parse_phones(phones).unwrap();
        let stress = StressPattern::from_phones(&phones);
        let key: RhymeKey = "EY1".parse().unwrap();
        Candidate::new(text.to_string(), span, phones, stress, key)
    }

    const LINE: &str = "AH0 W EY1 AH0 W EY1 AH0 W EY1 AH0 W EY1 AH0 W EY1";

    #[test]
    fn test_span_overlap() {
        let a = Span::new(0, 0, 5);
        assert!(a.overlaps(&Span::new(0, 4, 8)));
        assert!(!a.overlaps(&Span::new(0, 5, 8)));
        assert!(!a.overlaps(&Span::new(1, 0, 5)));
    }

    #[test]
    fn test_span_text_form() {
        let span = Span::new(12, 3, 8);
        assert_eq!(span.to_string(), "12:3-8");
        assert_eq!("12:3-8".parse::<Span>().unwrap(), span);
        assert!("12:8-3".parse::<Span>().is_err());
        assert!("12-3".parse::<Span>().is_err());
        assert!("a:1-2".parse::<Span>().is_err());
    }

    #[test]
    fn test_stress_pattern_text_form() {
        let pattern: StressPattern = "01010101012".parse().unwrap();
        assert!(pattern.is_feminine());
        assert_eq!(pattern.to_string(), "01010101012");
        assert!("0101".parse::<StressPattern>().is_err());
        assert!("010101010x".parse::<StressPattern>().is_err());
    }

    #[test]
    fn test_identity_ignores_text() {
        let a = candidate("away away away away away", Span::new(0, 0, 5), LINE);
        let b = candidate("something else entirely", Span::new(0, 0, 5), LINE);
        let c = candidate("away away away away away", Span::new(1, 0, 5), LINE);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_conflicts() {
        let a = candidate("away away away away away", Span::new(0, 0, 5), LINE);
        let same_text = candidate("Away away away away away", Span::new(3, 0, 5), LINE);
        let overlapping = candidate("other words", Span::new(0, 4, 9), LINE);
        let apart = candidate("other words", Span::new(0, 5, 10), LINE);
        assert!(a.conflicts_with(&same_text));
        assert!(a.conflicts_with(&overlapping));
        assert!(!a.conflicts_with(&apart));
    }

    #[test]
    fn test_final_word() {
        let a = candidate("and then we went Away!", Span::new(0, 0, 5), LINE);
        assert_eq!(a.final_word(), "away");
        let b = candidate("alone, again; below-above-today", Span::new(1, 0, 5), LINE);
        assert_eq!(b.final_word(), "today");
    }
}
