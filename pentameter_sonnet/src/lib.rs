// Pentameter sonnet finder.
//
// Finds phrases in ordinary prose that happen to scan as iambic pentameter,
// groups them by slant rhyme, and assembles Shakespearean sonnets
// (ABAB CDCD EFEF GG) from them.
//
// Architecture (pipeline order):
// - stream.rs: The `Pronouncer` boundary and normalization of its raw
//   per-word tokens into a `PhonemeStream`
// - meter.rs: Linear scan for every word-aligned pentameter window,
//   masculine and feminine endings, with secondary-stress and dactyl
//   relaxations
// - candidate.rs: `Candidate`, `Span`, `StressPattern`
// - rhyme.rs: Rhyme keys under a consonant class table
// - store.rs: `CandidateStore` (rhyme buckets) and its TSV cache format
// - pairing.rs: Which two lines of a bucket may rhyme (similarity scores)
// - assemble.rs: Seeded selection of seven rhyme pairs into a `Sonnet`
// - corpus.rs: Line-by-line driver with prose filter, sequential or rayon
// - config.rs: `FinderConfig`, loaded from JSON
// - error.rs: Error enums and the crate `Result`
//
// Phonetic vocabulary (phonemes, class tables, similarity scores, CMUdict)
// lives in `pentameter_phonetics`; randomness comes only from a caller-owned
// `pentameter_prng::SeededRng`, so a seed fixes the sonnet.

pub mod assemble;
pub mod candidate;
pub mod config;
pub mod corpus;
pub mod error;
pub mod meter;
pub mod pairing;
pub mod rhyme;
pub mod store;
pub mod stream;

pub use assemble::{Assembler, Role, SCHEME, Sonnet, SonnetLine};
pub use candidate::{Candidate, Span, StressPattern};
pub use config::FinderConfig;
pub use corpus::{collect_candidates, collect_candidates_parallel, is_natural_language, scan_line};
pub use error::{AssemblyError, NormalizeError, RecordError, Result, SonnetError};
pub use meter::{MeterMatch, find_matches, scan_stream};
pub use pairing::PairRule;
pub use rhyme::{RhymeKey, RhymeKeyer, default_keyer};
pub use store::CandidateStore;
pub use stream::{PhonemeStream, Pronouncer, RawAnnotation, RawWord, normalize};
