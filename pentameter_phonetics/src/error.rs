use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhoneticsError {
    #[error("unknown phoneme token: {0:?}")]
    UnknownPhoneme(String),
    #[error("invalid rhyme class table: {0}")]
    InvalidClassTable(String),
    #[error("class table JSON: {0}")]
    ClassTableJson(#[from] serde_json::Error),
    #[error("dictionary line {line}: {message}")]
    Dictionary { line: usize, message: String },
}
