// Consonant equivalence classes for slant rhyme.
//
// A slant rhyme tolerates swapping a consonant for a close relative (most
// often its voiced/voiceless partner at the same place of articulation:
// "fate"/"made", "grace"/"days"). This module holds the table of such
// classes. The rhyme key extractor replaces every consonant by its class
// representative, so two rhyme tails that differ only within classes get
// equal keys.
//
// The table is data, not code: `ConsonantClasses::from_json()` parses it
// (JSON string in, typed struct out) and `default_classes()` embeds
// `data/rhyme_classes.json` at compile time. A table is a partition of the
// consonants: every consonant belongs to exactly one class, and consonants
// the table does not mention form singleton classes. Because it is a
// partition, the induced equivalence is reflexive, symmetric and transitive
// by construction.

use serde::{Deserialize, Serialize};

use crate::error::PhoneticsError;
use crate::types::Phoneme;

/// One class as stored in the JSON table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDef {
    /// Human-readable name (e.g. "alveolar stop"); informational only.
    pub label: String,
    /// Members of the class. The first member is the representative.
    pub members: Vec<Phoneme>,
}

/// The top-level JSON structure for a class table file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassFile {
    classes: Vec<ClassDef>,
}

/// A validated consonant partition.
#[derive(Debug, Clone)]
pub struct ConsonantClasses {
    defs: Vec<ClassDef>,
    /// Representative for every phoneme, indexed by `Phoneme::index()`.
    /// Vowels map to themselves.
    representative: [Phoneme; Phoneme::COUNT],
}

impl ConsonantClasses {
    /// The identity partition: every consonant is its own class (strict rhyme).
    pub fn identity() -> Self {
        ConsonantClasses {
            defs: Vec::new(),
            representative: Phoneme::ALL,
        }
    }

    /// Build a partition from class definitions.
    ///
    /// Fails if a class is empty, contains a vowel, or shares a consonant
    /// with another class.
    pub fn from_defs(defs: Vec<ClassDef>) -> Result<Self, PhoneticsError> {
        let mut representative = Phoneme::ALL;
        let mut assigned = [false; Phoneme::COUNT];

        for def in &defs {
            let Some(&head) = def.members.first() else {
                return Err(PhoneticsError::InvalidClassTable(format!(
                    "class {:?} has no members",
                    def.label
                )));
            };
            for &member in &def.members {
                if member.is_vowel() {
                    return Err(PhoneticsError::InvalidClassTable(format!(
                        "class {:?} contains vowel {member}",
                        def.label
                    )));
                }
                if assigned[member.index()] {
                    return Err(PhoneticsError::InvalidClassTable(format!(
                        "{member} appears in more than one class"
                    )));
                }
                assigned[member.index()] = true;
                representative[member.index()] = head;
            }
        }

        Ok(ConsonantClasses {
            defs,
            representative,
        })
    }

    /// Parse and validate a class table from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, PhoneticsError> {
        let file: ClassFile = serde_json::from_str(json)?;
        Self::from_defs(file.classes)
    }

    /// The class definitions, in file order.
    pub fn defs(&self) -> &[ClassDef] {
        &self.defs
    }

    /// Representative of the class containing `phoneme`.
    pub fn canonical(&self, phoneme: Phoneme) -> Phoneme {
        self.representative[phoneme.index()]
    }

    /// Whether two phonemes fall in the same class.
    pub fn equivalent(&self, a: Phoneme, b: Phoneme) -> bool {
        self.canonical(a) == self.canonical(b)
    }
}

impl Default for ConsonantClasses {
    fn default() -> Self {
        default_classes()
    }
}

/// Load the default class table embedded at compile time.
///
/// Panics if the embedded JSON is malformed (should never happen in a
/// released build).
pub fn default_classes() -> ConsonantClasses {
    let json = include_str!("../../data/rhyme_classes.json");
    ConsonantClasses::from_json(json).expect("embedded rhyme_classes.json is malformed")
}
