//! The sorted, de-duplicated set of source units to analyze

use crate::{is_source_file, StructuralError};
use std::collections::btree_map::{self, BTreeMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Source unit paths in processing order.
///
/// Units are keyed by their canonical path, so one file named two different ways is only
/// analyzed once. The path it was first given by is the one kept.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceUnits {
    paths: BTreeMap<PathBuf, PathBuf>,
}

impl SourceUnits {
    /// Adds a single file, or the source units directly inside a directory
    pub fn add(&mut self, path: &Path) -> Result<(), StructuralError> {
        if path.is_dir() {
            let found = directory_units(path)?;
            if found.is_empty() {
                return Err(StructuralError::NoSourceUnits(path.to_path_buf()));
            }
            debug!("found {} source units in {path:?}", found.len());
            for unit in found {
                self.insert(unit)?;
            }
        } else if path.is_file() {
            if !is_source_file(path) {
                return Err(StructuralError::WrongExtension {
                    path: path.to_path_buf(),
                });
            }
            trace!("adding source unit {path:?}");
            self.insert(path.to_path_buf())?;
        } else {
            return Err(StructuralError::NotFound(path.to_path_buf()));
        }
        Ok(())
    }

    fn insert(&mut self, path: PathBuf) -> Result<(), StructuralError> {
        let canonical = path.canonicalize().map_err(|source| StructuralError::Io {
            path: path.clone(),
            source,
        })?;
        match self.paths.entry(canonical) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(path);
            }
            btree_map::Entry::Occupied(entry) => {
                trace!("{path:?} is already added as {:?}", entry.get());
            }
        }
        Ok(())
    }

    /// Iterates the source units in sorted path order
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.values().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Gets the only source unit, if there is exactly one
    pub fn get_single_file(&self) -> Option<&Path> {
        if self.paths.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }
}

impl IntoIterator for SourceUnits {
    type Item = PathBuf;
    type IntoIter = btree_map::IntoValues<PathBuf, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_values()
    }
}

impl<'a> IntoIterator for &'a SourceUnits {
    type Item = &'a PathBuf;
    type IntoIter = btree_map::Values<'a, PathBuf, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.values()
    }
}

/// The source units directly inside `dir`
fn directory_units(dir: &Path) -> Result<Vec<PathBuf>, StructuralError> {
    let io_error = |source| StructuralError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut units = vec![];
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && is_source_file(&path) {
            units.push(path);
        }
    }
    units.sort();
    Ok(units)
}
