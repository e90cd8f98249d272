//! Rox: a tree‑walking interpreter for a small dynamically‑typed scripting
//! language.
//!
//! The pipeline runs each stage to completion before the next starts:
//! [`scanner`] → [`parser`] → [`resolver`] → [`interpreter`]. Any static
//! diagnostic (lexical, syntax or resolution) stops the pipeline before
//! evaluation; a runtime error stops evaluation where it happens.

pub mod ast;
pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod token;
pub mod value;

use std::io::Write;

use log::info;

use error::LoxError;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// What happened to a program handed to [`run_source`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Ran to completion.
    Ok,

    /// One or more lex/parse/resolve diagnostics; nothing was executed.
    StaticErrors(Vec<LoxError>),

    /// Execution stopped at this error; earlier output was already written.
    RuntimeError(LoxError),
}

impl Outcome {
    /// Conventional process exit code: 0, 65 (data error) or 70 (software error).
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Ok => 0,
            Outcome::StaticErrors(_) => 65,
            Outcome::RuntimeError(_) => 70,
        }
    }
}

/// Decodes raw source bytes, rejecting anything that is not UTF‑8.
pub fn source_text(bytes: &[u8]) -> error::Result<&str> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text)
}

/// Lex, parse, resolve and run `source`, printing to `out`.
pub fn run_source<W: Write>(source: &str, out: W) -> Outcome {
    let (tokens, mut errors) = Scanner::new(source).scan_all();

    let (statements, parse_errors) = Parser::new(&tokens).parse();
    errors.extend(parse_errors);

    if !errors.is_empty() {
        info!("Skipping resolve: {} static error(s)", errors.len());
        return Outcome::StaticErrors(errors);
    }

    let locals = match Resolver::new().resolve(&statements) {
        Ok(locals) => locals,
        Err(resolve_errors) => return Outcome::StaticErrors(resolve_errors),
    };

    let mut interpreter = Interpreter::with_output(out);

    match interpreter.interpret(&statements, locals) {
        Ok(()) => Outcome::Ok,
        Err(e) => Outcome::RuntimeError(e),
    }
}
