// Rhyme keys: comparable slant-rhyme signatures of a line's ending.
//
// The key of a phone sequence starts at its final primary-stressed vowel
// (falling back to the final secondary-stressed vowel when there is no
// primary stress) and runs to the end. Vowels are kept exactly, stress digit
// included. Consonants are replaced by the representative of their
// equivalence class (see `pentameter_phonetics::classes`), which is what
// lets "made" and "fate" or "days" and "grace" land in the same bucket.
//
// Every phone after the stressed vowel contributes one key part, so a
// feminine ending ("nation" → `EY1-SH-AH0-M`, N filed under the nasal class
// M) only matches other feminine endings with the same unstressed vowel.
//
// Keys have a text form (`EY1-T`) used as the first column of the candidate
// cache; `Display` and `FromStr` round-trip it exactly.

use std::fmt;
use std::str::FromStr;

use pentameter_phonetics::{ConsonantClasses, Phone, Phoneme, Stress, default_classes};
use smallvec::SmallVec;

/// One element of a rhyme key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyPart {
    Vowel(Phoneme, Stress),
    /// A consonant class, named by its representative.
    Consonant(Phoneme),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Vowel(p, stress) => write!(f, "{p}{}", stress.digit()),
            KeyPart::Consonant(p) => write!(f, "{p}"),
        }
    }
}

/// A slant-rhyme signature. Candidates rhyme iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RhymeKey(SmallVec<[KeyPart; 8]>);

impl RhymeKey {
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// Number of vowels in the key (1 for a masculine ending).
    pub fn syllables(&self) -> usize {
        self.0
            .iter()
            .filter(|part| matches!(part, KeyPart::Vowel(..)))
            .count()
    }

    /// Whether some class table could key `phones` to this key: one part per
    /// phone of the rhyme tail, with the same vowels and stresses and a
    /// consonant wherever the tail has one.
    pub fn fits_phones(&self, phones: &[Phone]) -> bool {
        let tail = rhyme_tail(phones);
        tail.len() == self.0.len()
            && tail.iter().zip(&self.0).all(|(phone, part)| match (phone.stress(), part) {
                (Some(stress), KeyPart::Vowel(vowel, key_stress)) => {
                    phone.phoneme() == *vowel && stress == *key_stress
                }
                (None, KeyPart::Consonant(_)) => true,
                _ => false,
            })
    }
}

impl fmt::Display for RhymeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl FromStr for RhymeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = SmallVec::new();
        for token in s.split('-') {
            let phone = Phone::parse(token).map_err(|e| format!("rhyme key {s:?}: {e}"))?;
            let part = match phone.stress() {
                Some(_) if !token.ends_with(|c: char| c.is_ascii_digit()) => {
                    return Err(format!("rhyme key {s:?}: vowel {token:?} lacks a stress digit"));
                }
                Some(stress) => KeyPart::Vowel(phone.phoneme(), stress),
                None => KeyPart::Consonant(phone.phoneme()),
            };
            parts.push(part);
        }
        match parts.first() {
            Some(KeyPart::Vowel(_, stress)) if stress.is_stressed() => Ok(RhymeKey(parts)),
            _ => Err(format!("rhyme key {s:?} must start with a stressed vowel")),
        }
    }
}

/// Index of the vowel a rhyme starts on: the last primary-stressed vowel,
/// else the last secondary-stressed one.
pub fn rhyme_start(phones: &[Phone]) -> Option<usize> {
    let last_with = |wanted: Stress| phones.iter().rposition(|p| p.stress() == Some(wanted));
    last_with(Stress::Primary).or_else(|| last_with(Stress::Secondary))
}

/// The exact phones from the rhyme's stressed vowel to the end.
pub fn rhyme_tail(phones: &[Phone]) -> &[Phone] {
    match rhyme_start(phones) {
        Some(start) => &phones[start..],
        None => &[],
    }
}

/// Computes rhyme keys under a fixed consonant class table.
#[derive(Debug, Clone, Default)]
pub struct RhymeKeyer {
    classes: ConsonantClasses,
}

impl RhymeKeyer {
    pub fn new(classes: ConsonantClasses) -> Self {
        RhymeKeyer { classes }
    }

    /// A keyer with the identity table: only exact rhymes share keys.
    pub fn strict() -> Self {
        RhymeKeyer::new(ConsonantClasses::identity())
    }

    pub fn classes(&self) -> &ConsonantClasses {
        &self.classes
    }

    /// Key of a phone sequence; `None` if it has no stressed vowel.
    pub fn key(&self, phones: &[Phone]) -> Option<RhymeKey> {
        let start = rhyme_start(phones)?;
        let parts = phones[start..]
            .iter()
            .map(|phone| match phone.stress() {
                Some(stress) => KeyPart::Vowel(phone.phoneme(), stress),
                None => KeyPart::Consonant(self.classes.canonical(phone.phoneme())),
            })
            .collect();
        Some(RhymeKey(parts))
    }
}

/// A keyer over the embedded default class table.
pub fn default_keyer() -> RhymeKeyer {
    RhymeKeyer::new(default_classes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pentameter_phonetics::parse_phones;

    fn key(phones: &str) -> Option<RhymeKey> {
        default_keyer().key(&parse_phones(phones).unwrap())
    }

    #[test]
    fn test_key_starts_at_last_primary_vowel() {
        // "and walked along the shore to find the fate"
        let k = key("AH0 N D F AY1 N D DH AH0 F EY1 T").unwrap();
        assert_eq!(k.to_string(), "EY1-T");
        assert_eq!(k.syllables(), 1);
    }

    #[test]
    fn test_voicing_pairs_share_a_key() {
        assert_eq!(key("F EY1 T"), key("M EY1 D"));
        assert_eq!(key("G R EY1 S"), key("D EY1 Z"));
        assert_ne!(key("F EY1 T"), key("F EY1 S"));
    }

    #[test]
    fn test_strict_keyer_keeps_voicing() {
        let strict = RhymeKeyer::strict();
        let a = strict.key(&parse_phones("F EY1 T").unwrap());
        let b = strict.key(&parse_phones("M EY1 D").unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn test_feminine_and_masculine_keys_differ() {
        let fem = key("N EY1 SH AH0 N").unwrap();
        assert_eq!(fem.to_string(), "EY1-SH-AH0-M");
        assert_eq!(fem.syllables(), 2);
        assert_ne!(Some(fem), key("N EY1 SH"));
    }

    #[test]
    fn test_secondary_stress_fallback() {
        let k = key("AH0 N D ER2 S T AH0 N D").unwrap();
        assert_eq!(k.to_string(), "ER2-S-T-AH0-M-T");
        // A later secondary stress does not displace the last primary.
        let k = key("B UH1 K K EY2 S").unwrap();
        assert_eq!(k.to_string(), "UH1-K-K-EY2-S");
    }

    #[test]
    fn test_no_stressed_vowel_has_no_key() {
        assert!(key("S T").is_none());
        assert!(key("DH AH0").is_none());
        assert!(rhyme_tail(&parse_phones("DH AH0").unwrap()).is_empty());
    }

    #[test]
    fn test_key_is_pure() {
        let phones = parse_phones("T AH0 N AY1 T").unwrap();
        let keyer = default_keyer();
        assert_eq!(keyer.key(&phones), keyer.key(&phones.clone()));
    }

    #[test]
    fn test_text_form_roundtrip() {
        let k = key("P R OW0 F AW1 N D").unwrap();
        let text = k.to_string();
        assert_eq!(text, "AW1-M-T");
        assert_eq!(text.parse::<RhymeKey>().unwrap(), k);
    }

    #[test]
    fn test_key_fits_its_own_phones() {
        let phones = parse_phones("T AH0 N AY1 T").unwrap();
        let own = default_keyer().key(&phones).unwrap();
        assert!(own.fits_phones(&phones));
        // Another table's consonant class still fits.
        assert!("AY1-D".parse::<RhymeKey>().unwrap().fits_phones(&phones));
        for other in ["EY1", "AY1", "AY1-T-T", "AY2-T", "AY1-AH0"] {
            assert!(!other.parse::<RhymeKey>().unwrap().fits_phones(&phones), "{other}");
        }
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        assert!("".parse::<RhymeKey>().is_err());
        assert!("T-EY1".parse::<RhymeKey>().is_err());
        assert!("AH0-T".parse::<RhymeKey>().is_err());
        assert!("EY-T".parse::<RhymeKey>().is_err());
        assert!("EY1-Q".parse::<RhymeKey>().is_err());
    }
}
