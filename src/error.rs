// File: src/error.rs
//! Failure taxonomy for command handling and record decoding.
//!
//! `CommandError` covers everything a user can get wrong at the prompt; the
//! session turns these into response text, never panics. `DecodeError` covers
//! persisted lines that no longer match a known record shape; the loader
//! skips those per line.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A required field (description, date, argument) is missing or blank.
    #[error("{0}")]
    Empty(String),
    /// Input is present but semantically wrong: unknown command, unparseable
    /// date, end-before-start range, forbidden characters.
    #[error("{0}")]
    Invalid(String),
    /// A position token does not resolve to an existing task.
    #[error("{0}")]
    Index(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown record tag `{0}`")]
    UnknownTag(String),
    #[error("record has {found} fields, expected at least {expected}")]
    MissingFields { expected: usize, found: usize },
    #[error("record has an empty {0} field")]
    EmptyField(&'static str),
    #[error("`{0}` is not a valid yyyy-mm-dd date")]
    InvalidDate(String),
    #[error("`{0}` is not a `<from> to <to>` range")]
    InvalidRange(String),
}
