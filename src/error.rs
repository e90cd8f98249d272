//! Centralised error hierarchy for the **Rox interpreter**.
//!
//! Every pipeline stage (scanner, parser, resolver, runtime) converts its
//! failure modes into one of the variants defined here. Static stages collect
//! many of them and keep going; the runtime stops at the first.
//!
//! The module **does not** print diagnostics itself.

use std::io;
use thiserror::Error;

use log::info;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error. `location` is either ` at 'lexeme'` or ` at end`.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        location: String,
        line: usize,
    },

    /// Static‑analysis failure found by the resolver.
    #[error("[line {line}] Error{location}: {message}")]
    Resolve {
        message: String,
        location: String,
        line: usize,
    },

    /// Runtime evaluation error. Fatal to the run.
    #[error("{message}\n[line {line}]")]
    Runtime {
        message: String,

        /// Lexeme of the operator, name or `)` the error is blamed on.
        lexeme: String,
        line: usize,
    },

    /// Wrapper around `std::io::Error`.
    ///
    /// Stored as text rather than `#[from] io::Error`: `Outcome` and the
    /// static stages compare and clone diagnostics, and `io::Error` is
    /// neither `Clone` nor `PartialEq`. The `From` impl below stands in for
    /// `#[from]`.
    #[error("I/O error: {0}")]
    Io(String),

    /// UTF‑8 decoding failure when ingesting external text. Text for the
    /// same reason as `Io`.
    #[error("invalid UTF-8 in source: {0}")]
    Utf8(String),
}

impl From<io::Error> for LoxError {
    fn from(err: io::Error) -> Self {
        LoxError::Io(err.to_string())
    }
}

impl From<std::str::Utf8Error> for LoxError {
    fn from(err: std::str::Utf8Error) -> Self {
        LoxError::Utf8(err.to_string())
    }
}

/// ` at end` for the EOF sentinel, ` at 'lexeme'` otherwise.
fn location_of(token: &Token<'_>) -> String {
    if token.token_type == TokenType::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**, located at `token`.
    pub fn parse<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", token.line, message);

        LoxError::Parse {
            message,
            location: location_of(token),
            line: token.line,
        }
    }

    /// Helper constructor for the **resolver**, located at `token`.
    pub fn resolve<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Resolve error: line={}, msg={}", token.line, message);

        LoxError::Resolve {
            message,
            location: location_of(token),
            line: token.line,
        }
    }

    /// Helper constructor for the **interpreter**, blamed on `token`.
    pub fn runtime<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Runtime error: line={}, msg={}", token.line, message);

        LoxError::Runtime {
            message,
            lexeme: token.lexeme.to_string(),
            line: token.line,
        }
    }

    /// Source line the diagnostic points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoxError::Lex { line, .. }
            | LoxError::Parse { line, .. }
            | LoxError::Resolve { line, .. }
            | LoxError::Runtime { line, .. } => Some(*line),
            LoxError::Io(_) | LoxError::Utf8(_) => None,
        }
    }

    /// The lexeme a runtime error was blamed on.
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            LoxError::Runtime { lexeme, .. } => Some(lexeme),
            _ => None,
        }
    }

    /// The bare message without location decoration.
    pub fn message(&self) -> &str {
        match self {
            LoxError::Lex { message, .. }
            | LoxError::Parse { message, .. }
            | LoxError::Resolve { message, .. }
            | LoxError::Runtime { message, .. } => message,
            LoxError::Io(message) | LoxError::Utf8(message) => message,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_points_at_lexeme_or_end() {
        let semi = Token::new(TokenType::SEMICOLON, ";", 3);
        let eof = Token::new(TokenType::EOF, "", 7);

        assert_eq!(
            LoxError::parse(&semi, "Expect expression.").to_string(),
            "[line 3] Error at ';': Expect expression."
        );
        assert_eq!(
            LoxError::parse(&eof, "Expect ';' after value.").to_string(),
            "[line 7] Error at end: Expect ';' after value."
        );
    }

    #[test]
    fn runtime_error_renders_message_then_line() {
        let plus = Token::new(TokenType::PLUS, "+", 2);
        let err = LoxError::runtime(&plus, "Operands must be two numbers or two strings.");

        assert_eq!(
            err.to_string(),
            "Operands must be two numbers or two strings.\n[line 2]"
        );
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.lexeme(), Some("+"));
    }

    #[test]
    fn static_errors_have_no_blamed_lexeme() {
        let semi = Token::new(TokenType::SEMICOLON, ";", 1);

        assert_eq!(LoxError::parse(&semi, "Expect expression.").lexeme(), None);
        assert_eq!(LoxError::lex(1, "Unterminated string.").lexeme(), None);
    }

    #[test]
    fn io_and_utf8_failures_convert_and_stay_cloneable() {
        let io_err = LoxError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(io_err.clone(), io_err);
        assert_eq!(io_err.to_string(), "I/O error: gone");
        assert_eq!(io_err.line(), None);

        let bytes: &[u8] = &[b'a', 0xff];
        let utf8_err = LoxError::from(std::str::from_utf8(bytes).unwrap_err());
        assert!(matches!(utf8_err, LoxError::Utf8(_)));
        assert!(utf8_err.to_string().starts_with("invalid UTF-8 in source: "));
    }
}
