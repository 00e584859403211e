// Pronouncing dictionary in CMUdict format.
//
// Maps lowercase words to ARPAbet phone sequences. Each line of the source
// text is `WORD  PH PH PH`; `;;;` lines are comments, a trailing `# ...` is
// a comment, and alternate pronunciations (`WORD(2)`) are ignored in favor
// of the first one listed, which keeps lookups deterministic.
//
// The sonnet crate puts this behind its pronouncer interface, so the meter
// scanner can run on real text without a stress-prediction model. Words the
// dictionary does not know are not guessed at.

use rustc_hash::FxHashMap;

use crate::error::PhoneticsError;
use crate::types::{Phone, parse_phones};

/// A word-to-phones lookup table.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    entries: FxHashMap<String, Vec<Phone>>,
}

impl PronouncingDictionary {
    /// Parse a dictionary from CMUdict-format text.
    ///
    /// Fails on the first line with a bad phone or no phones at all,
    /// reporting its 1-based line number.
    pub fn from_cmudict(text: &str) -> Result<Self, PhoneticsError> {
        let mut entries = FxHashMap::default();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split(" #").next().unwrap_or_default().trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let Some((head, rest)) = line.split_once(char::is_whitespace) else {
                return Err(PhoneticsError::Dictionary {
                    line: line_no,
                    message: format!("no pronunciation for {line:?}"),
                });
            };
            let word = match head.find('(') {
                Some(paren) if head.ends_with(')') => &head[..paren],
                _ => head,
            }
            .to_lowercase();

            let phones = parse_phones(rest).map_err(|e| PhoneticsError::Dictionary {
                line: line_no,
                message: e.to_string(),
            })?;
            if phones.is_empty() {
                return Err(PhoneticsError::Dictionary {
                    line: line_no,
                    message: format!("no pronunciation for {word:?}"),
                });
            }
            entries.entry(word).or_insert(phones);
        }

        Ok(PronouncingDictionary { entries })
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, word: &str, phones: Vec<Phone>) {
        self.entries.insert(word.to_lowercase(), phones);
    }

    /// Look up a word, case-insensitively.
    pub fn lookup(&self, word: &str) -> Option<&[Phone]> {
        self.entries.get(&word.to_lowercase()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::format_phones;

    const SAMPLE: &str = ";;; tiny sample
AGAIN  AH0 G EH1 N
AGAIN(1)  AH0 G EY1 N
TONIGHT  T AH0 N AY1 T
read R IY1 D # present tense
";

    #[test]
    fn test_parses_entries() {
        let dict = PronouncingDictionary::from_cmudict(SAMPLE).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(format_phones(dict.lookup("tonight").unwrap()), "T AH0 N AY1 T");
    }

    #[test]
    fn test_first_variant_wins() {
        let dict = PronouncingDictionary::from_cmudict(SAMPLE).unwrap();
        assert_eq!(format_phones(dict.lookup("again").unwrap()), "AH0 G EH1 N");
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_strips_comments() {
        let dict = PronouncingDictionary::from_cmudict(SAMPLE).unwrap();
        assert!(dict.lookup("Again").is_some());
        assert_eq!(format_phones(dict.lookup("READ").unwrap()), "R IY1 D");
        assert!(dict.lookup("unknown").is_none());
    }

    #[test]
    fn test_reports_bad_line_number() {
        let text = "AGAIN  AH0 G EH1 N\nBROKEN  B R XX1\n";
        match PronouncingDictionary::from_cmudict(text) {
            Err(PhoneticsError::Dictionary { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected dictionary error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_word_without_phones() {
        assert!(PronouncingDictionary::from_cmudict("LONELY\n").is_err());
    }

    #[test]
    fn test_insert_overrides() {
        let mut dict = PronouncingDictionary::default();
        assert!(dict.is_empty());
        dict.insert("Day", parse_phones("D EY1").unwrap());
        assert_eq!(format_phones(dict.lookup("day").unwrap()), "D EY1");
    }
}
