use pentameter_phonetics::PhoneticsError;
use thiserror::Error;

/// A line's annotation could not be turned into a phoneme stream.
///
/// Recovered locally: the line is skipped and yields no candidates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("word {word:?}: unmappable token {token:?}")]
    UnmappableToken { word: String, token: String },
    #[error("word {word:?} has no phonemic tokens")]
    Unpronounced { word: String },
}

/// A cached candidate record could not be read.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("record {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("record {line}: duplicate of an earlier candidate")]
    Duplicate { line: usize },
    #[error("reading records: {0}")]
    Io(#[from] std::io::Error),
}

/// The store cannot supply a full, non-repeating sonnet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("not enough rhyming material found ({filled} of {needed} rhyme pairs)")]
    InsufficientMaterial { filled: usize, needed: usize },
}

#[derive(Error, Debug)]
pub enum SonnetError {
    #[error(transparent)]
    Phonetics(#[from] PhoneticsError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SonnetError>;
