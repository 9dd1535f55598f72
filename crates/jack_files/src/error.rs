use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The arguments do not describe a usable set of source units
#[derive(Debug, Error)]
pub enum StructuralError {
    #[error("{0:?} does not exist")]
    NotFound(PathBuf),
    #[error("{path:?} is not a .{extension} file", extension = crate::SOURCE_EXTENSION)]
    WrongExtension { path: PathBuf },
    #[error("directory {0:?} contains no .{extension} files", extension = crate::SOURCE_EXTENSION)]
    NoSourceUnits(PathBuf),
    #[error("no source files or directories given")]
    NoInputs,
    #[error("could not read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
