use thiserror::Error;

/// Errors a translation run can surface.
///
/// Anything else the input does wrong is passed through untouched: the
/// translator mirrors source it has no rule for, it does not validate PHP.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The lexer could not form a token at all.
    #[error("Lex error at line {line}, column {column}: {message}")]
    Lex {
        message: String,
        line: usize,
        column: usize,
    },

    /// A construct with no JavaScript counterpart, rejected outright.
    #[error("Forbidden construct '{construct}' at line {line}, column {column}")]
    Forbidden {
        construct: &'static str,
        line: usize,
        column: usize,
    },

    /// A construct the translator handles structurally, but whose shape it
    /// could not make sense of (unterminated call, foreach without `as`, ...).
    #[error("Malformed construct: {0}")]
    Malformed(String),

    /// A named translation unit could not be resolved to source text.
    #[error("Lookup failed: {0}")]
    Lookup(String),
}

pub type Result<T> = std::result::Result<T, TranslateError>;
