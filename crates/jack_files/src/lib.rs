//! Discovery of jack source units from file and directory arguments.
//!
//! A file argument must carry the `.jack` extension. A directory argument contributes every
//! `.jack` file directly inside it, without descending into subdirectories.

mod error;
mod source_units;

pub use error::StructuralError;
pub use source_units::SourceUnits;

use std::path::Path;

/// The extension every source unit carries
pub const SOURCE_EXTENSION: &str = "jack";

/// Checks whether `path` names a jack source unit by its extension alone
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == SOURCE_EXTENSION)
}

/// Resolves a set of file and directory arguments into source units
pub fn source_units<I, P>(paths: I) -> Result<SourceUnits, StructuralError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut units = SourceUnits::default();
    for path in paths {
        units.add(path.as_ref())?;
    }
    if units.is_empty() {
        return Err(StructuralError::NoInputs);
    }
    Ok(units)
}
