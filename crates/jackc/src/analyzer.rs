//! Responsible with analyzing jack source units into their XML renderings

use jack_files::SourceUnits;
use jack_syntax::lexer::TokenStream;
use jack_syntax::parser::{parse_class, ErrorKind, SyntaxError, SyntaxResult};
use jack_syntax::xml::{tokens_to_xml, tree_to_xml};
use jack_tokens::Token;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;
use tracing::{debug, error_span, info, trace, warn};

pub mod error;

pub use error::{AnalyzerError, AnalyzerResult};

/// Which renderings are produced for each source unit
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum AnalysisMode {
    /// Only the token sequence, `FooT.xml`
    Tokens,
    /// Only the parse tree, `Foo.xml`
    Syntax,
    /// Both renderings
    #[default]
    Both,
}

impl AnalysisMode {
    pub fn tokens(&self) -> bool {
        matches!(self, AnalysisMode::Tokens | AnalysisMode::Both)
    }

    pub fn syntax(&self) -> bool {
        matches!(self, AnalysisMode::Syntax | AnalysisMode::Both)
    }
}

/// The in-memory result of analyzing one source unit
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// The rendered token sequence, if requested
    pub tokens: Option<String>,
    /// The rendered parse tree, if requested
    pub syntax: Option<String>,
}

/// Where the renderings of one source unit are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub tokens: PathBuf,
    pub syntax: PathBuf,
}

impl OutputPaths {
    /// `Foo.jack` becomes `FooT.xml` and `Foo.xml` inside `directory`
    pub fn new(source: &Path, directory: &Path) -> Self {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            tokens: directory.join(format!("{stem}T.xml")),
            syntax: directory.join(format!("{stem}.xml")),
        }
    }
}

/// Responsible with analyzing jack source units.
///
/// Must be configured using a [JackAnalyzerBuilder].
#[derive(Debug)]
pub struct JackAnalyzer {
    mode: AnalysisMode,
    output_directory: Option<PathBuf>,
}

impl JackAnalyzer {
    /// Creates the default JackAnalyzerBuilder
    #[inline]
    pub fn builder() -> JackAnalyzerBuilder {
        JackAnalyzerBuilder::new()
    }

    /// The renderings this analyzer produces
    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Analyzes source text without touching the file system
    pub fn analyze_source(&self, src: &str) -> SyntaxResult<Analysis> {
        let mut analysis = Analysis::default();
        if self.mode.tokens() {
            let tokens = TokenStream::from_source(src).collect::<Result<Vec<Token>, _>>()?;
            if tokens.is_empty() {
                return Err(SyntaxError::new(ErrorKind::EmptyUnit, None, None));
            }
            trace!("rendering {} tokens", tokens.len());
            analysis.tokens = Some(tokens_to_xml(tokens.iter().map(Token::kind)));
        }
        if self.mode.syntax() {
            let class = parse_class(&mut TokenStream::from_source(src))?;
            analysis.syntax = Some(tree_to_xml(&class));
        }
        Ok(analysis)
    }

    /// The output locations for `source`
    pub fn output_paths(&self, source: &Path) -> OutputPaths {
        let directory = match &self.output_directory {
            Some(directory) => directory.as_path(),
            None => source.parent().unwrap_or_else(|| Path::new(".")),
        };
        OutputPaths::new(source, directory)
    }

    /// Analyzes a single source unit, returning the files written.
    ///
    /// Nothing is written unless the whole unit analyzes successfully.
    pub fn analyze(&self, path: &Path) -> AnalyzerResult<Vec<PathBuf>> {
        let _span = error_span!("analyze", path = ?path).entered();
        let src = fs::read_to_string(path).map_err(|source| AnalyzerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let analysis = self
            .analyze_source(&src)
            .map_err(|source| AnalyzerError::Syntax {
                path: path.to_path_buf(),
                source,
            })?;

        let outputs = self.output_paths(path);
        let mut written = vec![];
        for (output, rendered) in [
            (outputs.tokens, analysis.tokens),
            (outputs.syntax, analysis.syntax),
        ] {
            let Some(rendered) = rendered else {
                continue;
            };
            if let Err(e) = write_output(&output, &rendered) {
                remove_outputs(&written);
                return Err(e);
            }
            written.push(output);
        }
        for output in &written {
            info!("wrote {output:?}");
        }
        debug!("analyzed {path:?}");
        Ok(written)
    }

    /// Analyzes every source unit named by `paths`, in sorted order.
    ///
    /// Stops at the first unit that fails. Files written for earlier units are kept.
    pub fn analyze_all<I, P>(&self, paths: I) -> AnalyzerResult<Vec<PathBuf>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let units = jack_files::source_units(paths)?;
        self.analyze_units(&units)
    }

    /// Analyzes already discovered source units, in order
    pub fn analyze_units(&self, units: &SourceUnits) -> AnalyzerResult<Vec<PathBuf>> {
        debug!("analyzing {} source units in {} mode", units.len(), self.mode);
        let mut written = vec![];
        for unit in units.iter() {
            written.extend(self.analyze(unit)?);
        }
        Ok(written)
    }
}

fn write_output(path: &Path, rendered: &str) -> AnalyzerResult<()> {
    fs::write(path, rendered).map_err(|source| AnalyzerError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Undoes the writes of a unit that failed part way through
fn remove_outputs(written: &[PathBuf]) {
    for output in written {
        if let Err(e) = fs::remove_file(output) {
            warn!("could not remove {output:?}: {e}");
        }
    }
}

/// Builder for creating a [JackAnalyzer] instance.
#[derive(Debug, Default)]
pub struct JackAnalyzerBuilder {
    pub mode: AnalysisMode,
    pub output_directory: Option<PathBuf>,
}

impl JackAnalyzerBuilder {
    /// Creates a JackAnalyzerBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets which renderings are produced
    pub fn mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the directory all output files are written to, instead of next to each source unit
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds a [JackAnalyzer] instance from this builder
    pub fn build(self) -> Result<JackAnalyzer, BuildAnalyzerError> {
        if let Some(output_directory) = &self.output_directory {
            let meta = fs::metadata(output_directory).map_err(|e| {
                BuildAnalyzerError::OutputDirectoryDoesNotExist(output_directory.clone(), e)
            })?;
            if !meta.is_dir() {
                return Err(BuildAnalyzerError::OutputDirectoryIsNotADirectory(
                    output_directory.clone(),
                ));
            }
        }
        Ok(JackAnalyzer {
            mode: self.mode,
            output_directory: self.output_directory,
        })
    }
}

/// An error occurred while building a [JackAnalyzer] instance
#[derive(Debug, Error)]
pub enum BuildAnalyzerError {
    #[error("{0:?} does not exist: {1}")]
    OutputDirectoryDoesNotExist(PathBuf, io::Error),
    #[error("{0:?} is not a directory")]
    OutputDirectoryIsNotADirectory(PathBuf),
}
