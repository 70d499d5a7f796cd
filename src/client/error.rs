// src/client/error.rs
use thiserror::Error;

use crate::types::SchemaError;

/// Why a submission failed. Every variant is terminal for that submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("response body is not JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Shape(#[from] SchemaError),
    #[error("invalid form field {field}: {reason}")]
    Form { field: String, reason: String },
    #[error("submission task aborted: {0}")]
    Aborted(String),
}

/// The page is missing an element the handler depends on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("element #{0} not found on page")]
    MissingElement(String),
    #[error("element #{id} is not a {expected}")]
    WrongElement { id: String, expected: &'static str },
}
