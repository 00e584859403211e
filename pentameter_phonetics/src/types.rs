// Core phonetic types: the ARPAbet phoneme alphabet, lexical stress, phones.
//
// These types are shared by every stage of the sonnet pipeline. The
// pronouncing dictionary produces them, the normalizer validates them, and
// the meter scanner and rhyme key extractor read them.
//
// The type hierarchy is:
// - `Phoneme`: one of the 39 CMUdict ARPAbet symbols, vowel or consonant
// - `Stress`: lexical stress of a vowel (unstressed, secondary, primary)
// - `Phone`: a phoneme with its stress (present iff the phoneme is a vowel)
//
// Text forms follow the ARPAbet convention: `AH0`, `EY1`, `IH2`, `T`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PhoneticsError;

/// An ARPAbet phoneme as used by CMUdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phoneme {
    // Vowels.
    Aa,
    Ae,
    Ah,
    Ao,
    Aw,
    Ay,
    Eh,
    Er,
    Ey,
    Ih,
    Iy,
    Ow,
    Oy,
    Uh,
    Uw,
    // Consonants.
    B,
    Ch,
    D,
    Dh,
    F,
    G,
    Hh,
    Jh,
    K,
    L,
    M,
    N,
    Ng,
    P,
    R,
    S,
    Sh,
    T,
    Th,
    V,
    W,
    Y,
    Z,
    Zh,
}

impl Phoneme {
    /// Number of symbols in the alphabet.
    pub const COUNT: usize = 39;

    /// Every phoneme, vowels first, in declaration order.
    pub const ALL: [Phoneme; Phoneme::COUNT] = [
        Phoneme::Aa,
        Phoneme::Ae,
        Phoneme::Ah,
        Phoneme::Ao,
        Phoneme::Aw,
        Phoneme::Ay,
        Phoneme::Eh,
        Phoneme::Er,
        Phoneme::Ey,
        Phoneme::Ih,
        Phoneme::Iy,
        Phoneme::Ow,
        Phoneme::Oy,
        Phoneme::Uh,
        Phoneme::Uw,
        Phoneme::B,
        Phoneme::Ch,
        Phoneme::D,
        Phoneme::Dh,
        Phoneme::F,
        Phoneme::G,
        Phoneme::Hh,
        Phoneme::Jh,
        Phoneme::K,
        Phoneme::L,
        Phoneme::M,
        Phoneme::N,
        Phoneme::Ng,
        Phoneme::P,
        Phoneme::R,
        Phoneme::S,
        Phoneme::Sh,
        Phoneme::T,
        Phoneme::Th,
        Phoneme::V,
        Phoneme::W,
        Phoneme::Y,
        Phoneme::Z,
        Phoneme::Zh,
    ];

    /// Whether this phoneme is a vowel (and therefore carries stress).
    pub fn is_vowel(self) -> bool {
        (self as usize) < 15
    }

    /// Position in `Phoneme::ALL`, for table lookups.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The ARPAbet symbol, without a stress digit.
    pub fn symbol(self) -> &'static str {
        match self {
            Phoneme::Aa => "AA",
            Phoneme::Ae => "AE",
            Phoneme::Ah => "AH",
            Phoneme::Ao => "AO",
            Phoneme::Aw => "AW",
            Phoneme::Ay => "AY",
            Phoneme::Eh => "EH",
            Phoneme::Er => "ER",
            Phoneme::Ey => "EY",
            Phoneme::Ih => "IH",
            Phoneme::Iy => "IY",
            Phoneme::Ow => "OW",
            Phoneme::Oy => "OY",
            Phoneme::Uh => "UH",
            Phoneme::Uw => "UW",
            Phoneme::B => "B",
            Phoneme::Ch => "CH",
            Phoneme::D => "D",
            Phoneme::Dh => "DH",
            Phoneme::F => "F",
            Phoneme::G => "G",
            Phoneme::Hh => "HH",
            Phoneme::Jh => "JH",
            Phoneme::K => "K",
            Phoneme::L => "L",
            Phoneme::M => "M",
            Phoneme::N => "N",
            Phoneme::Ng => "NG",
            Phoneme::P => "P",
            Phoneme::R => "R",
            Phoneme::S => "S",
            Phoneme::Sh => "SH",
            Phoneme::T => "T",
            Phoneme::Th => "TH",
            Phoneme::V => "V",
            Phoneme::W => "W",
            Phoneme::Y => "Y",
            Phoneme::Z => "Z",
            Phoneme::Zh => "ZH",
        }
    }

    /// Look up a phoneme by its symbol, case-insensitively.
    pub fn from_symbol(symbol: &str) -> Option<Phoneme> {
        Phoneme::ALL
            .iter()
            .copied()
            .find(|p| p.symbol().eq_ignore_ascii_case(symbol))
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Lexical stress of a vowel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stress {
    Unstressed,
    Secondary,
    Primary,
}

impl Stress {
    /// ARPAbet stress digit: 0 unstressed, 1 primary, 2 secondary.
    pub fn digit(self) -> char {
        match self {
            Stress::Unstressed => '0',
            Stress::Primary => '1',
            Stress::Secondary => '2',
        }
    }

    pub fn from_digit(digit: char) -> Option<Stress> {
        match digit {
            '0' => Some(Stress::Unstressed),
            '1' => Some(Stress::Primary),
            '2' => Some(Stress::Secondary),
            _ => None,
        }
    }

    /// Primary or secondary.
    pub fn is_stressed(self) -> bool {
        self != Stress::Unstressed
    }
}

/// A phoneme together with its stress.
///
/// Construct through `Phone::vowel`, `Phone::consonant` or parsing; the
/// stress is `Some` exactly when the phoneme is a vowel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Phone {
    phoneme: Phoneme,
    stress: Option<Stress>,
}

impl Phone {
    /// A vowel phone. Returns `None` if `phoneme` is a consonant.
    pub fn vowel(phoneme: Phoneme, stress: Stress) -> Option<Phone> {
        phoneme.is_vowel().then_some(Phone {
            phoneme,
            stress: Some(stress),
        })
    }

    /// A consonant phone. Returns `None` if `phoneme` is a vowel.
    pub fn consonant(phoneme: Phoneme) -> Option<Phone> {
        (!phoneme.is_vowel()).then_some(Phone {
            phoneme,
            stress: None,
        })
    }

    pub fn phoneme(self) -> Phoneme {
        self.phoneme
    }

    /// Stress of a vowel; `None` for consonants.
    pub fn stress(self) -> Option<Stress> {
        self.stress
    }

    pub fn is_vowel(self) -> bool {
        self.stress.is_some()
    }

    /// Parse an ARPAbet token such as `AH0`, `ey1` or `T`.
    ///
    /// A vowel without a stress digit is read as unstressed. A consonant
    /// carrying a digit is rejected, as is any unknown symbol.
    pub fn parse(token: &str) -> Result<Phone, PhoneticsError> {
        let unknown = || PhoneticsError::UnknownPhoneme(token.to_string());
        let trimmed = token.trim();
        let (symbol, stress) = match trimmed.chars().last() {
            Some(last) if last.is_ascii_digit() => {
                let stress = Stress::from_digit(last).ok_or_else(unknown)?;
                (&trimmed[..trimmed.len() - 1], Some(stress))
            }
            Some(_) => (trimmed, None),
            None => return Err(unknown()),
        };
        let phoneme = Phoneme::from_symbol(symbol).ok_or_else(unknown)?;
        if phoneme.is_vowel() {
            Ok(Phone {
                phoneme,
                stress: Some(stress.unwrap_or(Stress::Unstressed)),
            })
        } else if stress.is_some() {
            Err(unknown())
        } else {
            Ok(Phone {
                phoneme,
                stress: None,
            })
        }
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stress {
            Some(stress) => write!(f, "{}{}", self.phoneme, stress.digit()),
            None => write!(f, "{}", self.phoneme),
        }
    }
}

impl FromStr for Phone {
    type Err = PhoneticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phone::parse(s)
    }
}

/// Parse a whitespace-separated ARPAbet transcription, e.g. `"AH0 G EH1 N"`.
pub fn parse_phones(text: &str) -> Result<Vec<Phone>, PhoneticsError> {
    text.split_whitespace().map(Phone::parse).collect()
}

/// Render phones as a space-separated ARPAbet transcription.
pub fn format_phones(phones: &[Phone]) -> String {
    phones
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_consonant_split() {
        let vowels = Phoneme::ALL.iter().filter(|p| p.is_vowel()).count();
        assert_eq!(vowels, 15);
        assert_eq!(Phoneme::COUNT - vowels, 24);
        assert!(Phoneme::Uw.is_vowel());
        assert!(!Phoneme::B.is_vowel());
    }

    #[test]
    fn test_all_is_in_index_order() {
        for (i, p) in Phoneme::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn test_symbol_lookup_roundtrip() {
        for p in Phoneme::ALL {
            assert_eq!(Phoneme::from_symbol(p.symbol()), Some(p));
        }
        assert_eq!(Phoneme::from_symbol("ng"), Some(Phoneme::Ng));
        assert_eq!(Phoneme::from_symbol("XX"), None);
    }

    #[test]
    fn test_phoneme_serde_uses_symbols() {
        let json = serde_json::to_string(&Phoneme::Ch).unwrap();
        assert_eq!(json, "\"CH\"");
        let parsed: Phoneme = serde_json::from_str("\"ZH\"").unwrap();
        assert_eq!(parsed, Phoneme::Zh);
    }

    #[test]
    fn test_parse_vowel_with_stress() {
        let phone = Phone::parse("EY1").unwrap();
        assert_eq!(phone.phoneme(), Phoneme::Ey);
        assert_eq!(phone.stress(), Some(Stress::Primary));
        assert_eq!(Phone::parse("ih2").unwrap().stress(), Some(Stress::Secondary));
    }

    #[test]
    fn test_parse_vowel_without_digit_is_unstressed() {
        let phone = Phone::parse("AH").unwrap();
        assert_eq!(phone.stress(), Some(Stress::Unstressed));
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert!(Phone::parse("T1").is_err());
        assert!(Phone::parse("AH3").is_err());
        assert!(Phone::parse("<unk>").is_err());
        assert!(Phone::parse("").is_err());
        assert!(Phone::parse("Q").is_err());
    }

    #[test]
    fn test_phone_display() {
        assert_eq!(Phone::parse("aw1").unwrap().to_string(), "AW1");
        assert_eq!(Phone::parse("ng").unwrap().to_string(), "NG");
    }

    #[test]
    fn test_constructors_enforce_stress_invariant() {
        assert!(Phone::vowel(Phoneme::T, Stress::Primary).is_none());
        assert!(Phone::consonant(Phoneme::Aa).is_none());
        assert!(Phone::vowel(Phoneme::Aa, Stress::Primary).unwrap().is_vowel());
        assert!(!Phone::consonant(Phoneme::T).unwrap().is_vowel());
    }

    #[test]
    fn test_parse_and_format_phones() {
        let phones = parse_phones("AH0  G EH1 N").unwrap();
        assert_eq!(phones.len(), 4);
        assert_eq!(format_phones(&phones), "AH0 G EH1 N");
    }
}
