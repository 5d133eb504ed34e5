//! Error types for stylex compilation.

use thiserror::Error;

use crate::validate::Diagnostic;

/// Errors that abort compilation of a unit.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Syntax error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{}", describe_diagnostics(.0))]
    Diagnostics(Vec<Diagnostic>),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Diagnostics carried by this error, if it is a validation failure.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Diagnostics(list) => list,
            _ => &[],
        }
    }
}

fn describe_diagnostics(list: &[Diagnostic]) -> String {
    list.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, Error>;
