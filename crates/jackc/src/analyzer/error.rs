//! A jack analysis error

use jack_files::StructuralError;
use jack_syntax::parser::SyntaxError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// An error occurred while analyzing jack source units
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error("could not read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path:?} is not a valid jack class")]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },
}

impl AnalyzerError {
    /// The syntax error that stopped the analysis, if that is what happened
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match self {
            AnalyzerError::Syntax { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A type alias for general results in jackc
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
