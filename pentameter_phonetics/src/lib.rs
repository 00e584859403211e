// Shared English phonetics for the pentameter sonnet finder.
//
// Provides the phonetic vocabulary every pipeline stage speaks, with no
// dependency on how pronunciations are produced.
//
// Architecture:
// - `types.rs`: Core types: `Phoneme` (ARPAbet), `Stress`, `Phone`
// - `classes.rs`: Consonant equivalence classes for slant rhyme, loaded from JSON
// - `similarity.rs`: Hirjee & Brown phoneme similarity scores for rhyme pairing
// - `dictionary.rs`: CMUdict-format pronouncing dictionary
// - `error.rs`: `PhoneticsError`
//
// The class table is loaded from `data/rhyme_classes.json` via
// `ConsonantClasses::from_json()`; `default_classes()` embeds the default
// table at compile time with `include_str!`.
//
// Determinism constraint: nothing here may depend on iteration order of a
// hash map or on any source of randomness. Dictionary lookups are by key
// only.

pub mod classes;
pub mod dictionary;
pub mod error;
pub mod similarity;
pub mod types;

// Re-export key types at crate root for convenience.
pub use classes::{ClassDef, ConsonantClasses, default_classes};
pub use dictionary::PronouncingDictionary;
pub use error::PhoneticsError;
pub use types::{Phone, Phoneme, Stress, format_phones, parse_phones};
