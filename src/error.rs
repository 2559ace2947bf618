use strum_macros::Display;
use thiserror::Error;

/// Why an insertion into a key was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MappingConflict {
    #[strum(to_string = "origin already mapped")]
    OriginTaken,
    #[strum(to_string = "destination already mapped to by another origin")]
    DestinationTaken,
    #[strum(to_string = "symbol outside the cipher alphabet")]
    OutsideAlphabet,
}

#[derive(Error, Debug)]
pub enum CipherError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Mapping ({origin} -> {destination}): {conflict}")]
    InvalidMapping {
        origin: char,
        destination: char,
        conflict: MappingConflict,
    },

    #[error("Incomplete Key: expected 26 mappings, found {len}")]
    IncompleteKey { len: usize },

    #[error("Format Error on line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type CfResult<T> = Result<T, CipherError>;
