// Phoneme streams and the pronouncer boundary.
//
// A pronouncer (the external grapheme-to-phoneme collaborator) annotates one
// line of text as a list of words, each with the raw tokens it emitted for
// that word. `normalize()` turns that annotation into a `PhonemeStream`:
// punctuation placeholders are dropped without disturbing word boundaries,
// every other token must parse as an ARPAbet phone, and stress digits are
// mapped onto the three-level `Stress` scale.
//
// Punctuation-only words lose their phones (they have none) but keep their
// text: it is appended to the previous word, or prefixed to the next one when
// it opens a bracket or quote or nothing precedes it. Candidate text thus
// reads like the source ("Alone, again; below").
//
// A line with any unmappable token is rejected as a whole; the caller skips
// it (see `corpus.rs`). Nothing here guesses at a pronunciation.
//
// `PronouncingDictionary` implements `Pronouncer` so real text can be
// scanned without a prediction model. Tests use fixed synthetic streams.

use pentameter_phonetics::{Phone, PronouncingDictionary};

use crate::error::NormalizeError;

/// Token a pronouncer emits for a word it cannot pronounce.
pub const UNKNOWN_TOKEN: &str = "<unk>";

/// One word of a raw annotation, as the pronouncer emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWord {
    pub text: String,
    pub tokens: Vec<String>,
}

impl RawWord {
    /// Build from a word and its space-separated tokens, e.g. `("again", "AH0 G EH1 N")`.
    pub fn new(text: &str, tokens: &str) -> Self {
        RawWord {
            text: text.to_string(),
            tokens: tokens.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// A pronouncer's annotation of one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnnotation {
    pub words: Vec<RawWord>,
}

impl RawAnnotation {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        RawAnnotation {
            words: pairs
                .iter()
                .map(|(text, tokens)| RawWord::new(text, tokens))
                .collect(),
        }
    }
}

/// A word of a phoneme stream: its source text and its phones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamWord {
    pub text: String,
    pub phones: Vec<Phone>,
}

/// The phones of one line, grouped by source word.
///
/// Word boundaries fall between consecutive words; every word has at least
/// one phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhonemeStream {
    words: Vec<StreamWord>,
}

impl PhonemeStream {
    pub fn words(&self) -> &[StreamWord] {
        &self.words
    }

    /// Each phone with a flag for a word boundary directly after it.
    pub fn pairs(&self) -> impl Iterator<Item = (Phone, bool)> + '_ {
        self.words.iter().flat_map(|word| {
            let last = word.phones.len() - 1;
            word.phones
                .iter()
                .enumerate()
                .map(move |(i, &phone)| (phone, i == last))
        })
    }

    pub fn vowel_count(&self) -> usize {
        self.words
            .iter()
            .flat_map(|w| &w.phones)
            .filter(|p| p.is_vowel())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A token carrying no phonemic content (punctuation placeholder).
fn is_placeholder(token: &str) -> bool {
    !token.chars().any(char::is_alphanumeric)
}

fn is_opening(punct: &str) -> bool {
    punct
        .chars()
        .all(|c| matches!(c, '(' | '[' | '{' | '\u{201c}' | '\u{2018}'))
}

/// Source text of consecutive stream words, without trailing punctuation.
/// A word ending in a hyphen is joined to the next without a space.
pub fn phrase_text(words: &[StreamWord]) -> String {
    let mut text = String::new();
    for word in words {
        if !text.is_empty() && !text.ends_with('-') {
            text.push(' ');
        }
        text.push_str(&word.text);
    }
    text.trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '\'').to_string()
}

/// Turn a raw annotation into a phoneme stream, or reject the line.
pub fn normalize(raw: &RawAnnotation) -> Result<PhonemeStream, NormalizeError> {
    let mut words: Vec<StreamWord> = Vec::with_capacity(raw.words.len());
    // Punctuation waiting for the next pronounced word.
    let mut leading = String::new();

    for raw_word in &raw.words {
        let text = raw_word.text.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut phones = Vec::with_capacity(raw_word.tokens.len());
        for token in &raw_word.tokens {
            if is_placeholder(token) {
                continue;
            }
            let phone = Phone::parse(token).map_err(|_| NormalizeError::UnmappableToken {
                word: text.clone(),
                token: token.clone(),
            })?;
            phones.push(phone);
        }

        if phones.is_empty() {
            if text.chars().any(char::is_alphanumeric) {
                return Err(NormalizeError::Unpronounced { word: text });
            }
            // Pure punctuation: no word, no boundary of its own.
            match words.last_mut() {
                Some(prev) if leading.is_empty() && !is_opening(&text) => {
                    prev.text.push_str(&text)
                }
                _ => leading.push_str(&text),
            }
            continue;
        }
        let text = if leading.is_empty() {
            text
        } else {
            std::mem::take(&mut leading) + &text
        };
        words.push(StreamWord { text, phones });
    }

    if let Some(last) = words.last_mut() {
        last.text.push_str(&leading);
    }
    Ok(PhonemeStream { words })
}

/// The pronunciation collaborator: text in, phoneme stream out.
pub trait Pronouncer {
    /// Raw per-word tokens for one line.
    fn annotate(&self, line: &str) -> RawAnnotation;

    /// The normalized phoneme stream of one line.
    fn predict(&self, line: &str) -> Result<PhonemeStream, NormalizeError> {
        normalize(&self.annotate(line))
    }
}

/// Split a line into word and punctuation tokens.
///
/// Hyphens always stand alone, which keeps compounds like "well-known"
/// pronounceable word by word. Apostrophes stay inside words.
pub fn tokenize(line: &str) -> Vec<String> {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '\'';
    let mut tokens = Vec::new();

    for chunk in line.split_whitespace() {
        for (i, piece) in chunk.split('-').enumerate() {
            if i > 0 {
                tokens.push("-".to_string());
            }
            let core_start = piece.find(is_word_char);
            let Some(start) = core_start else {
                if !piece.is_empty() {
                    tokens.push(piece.to_string());
                }
                continue;
            };
            let end = piece
                .rfind(is_word_char)
                .map(|i| i + piece[i..].chars().next().map_or(1, char::len_utf8))
                .unwrap_or(piece.len());
            if start > 0 {
                tokens.push(piece[..start].to_string());
            }
            tokens.push(piece[start..end].to_string());
            if end < piece.len() {
                tokens.push(piece[end..].to_string());
            }
        }
    }

    tokens
}

impl Pronouncer for PronouncingDictionary {
    fn annotate(&self, line: &str) -> RawAnnotation {
        let words = tokenize(line)
            .into_iter()
            .map(|token| {
                let tokens = if is_placeholder(&token) {
                    vec![token.clone()]
                } else {
                    match self.lookup(&token) {
                        Some(phones) => phones.iter().map(ToString::to_string).collect(),
                        None => vec![UNKNOWN_TOKEN.to_string()],
                    }
                };
                RawWord {
                    text: token,
                    tokens,
                }
            })
            .collect();
        RawAnnotation { words }
    }
}
