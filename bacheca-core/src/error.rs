use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Corpo d'errore esposto sul wire: `{ "code": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Campo obbligatorio di un messaggio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Text,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Text => "text",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;

/// Errori del dominio bacheca.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("field \"{0}\" is missing")]
    MissingField(Field),

    #[error("message was not found")]
    NotFound,

    #[error("user is not authorized to access this resource")]
    Unauthorized,

    #[error("{0}")]
    InvalidJson(String),

    /// Errore opaco dello storage, propagato così com'è.
    #[error("{0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BoardError {
    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        BoardError::Storage(err.into())
    }

    pub fn code(&self) -> String {
        match self {
            BoardError::MissingField(field) => format!("missing_{field}"),
            BoardError::NotFound => "not_found".to_string(),
            BoardError::Unauthorized => "unauthorized".to_string(),
            BoardError::InvalidJson(_) => "invalid_json".to_string(),
            BoardError::Storage(_) => "unknown_error".to_string(),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(self.code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_code_names_the_field() {
        let err = BoardError::MissingField(Field::Email);
        assert_eq!(err.code(), "missing_email");
        assert_eq!(err.to_string(), r#"field "email" is missing"#);
    }

    #[test]
    fn storage_errors_are_unknown_and_keep_their_text() {
        let err = BoardError::storage("connection reset");
        let body = err.body();
        assert_eq!(body.code, "unknown_error");
        assert_eq!(body.message, "connection reset");
    }

    #[test]
    fn not_found_body() {
        assert_eq!(
            BoardError::NotFound.body(),
            ErrorBody::new("not_found", "message was not found")
        );
    }
}
