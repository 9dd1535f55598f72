//! the args for running jack-analyzer

use jack_cli_common::LoggingArgs;
use jackc::AnalysisMode;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(
    author,
    version,
    about = "Tokenizes and parses jack source files into XML"
)]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// The .jack files, or directories of them, to analyze
    #[clap(required = true, value_name = "source", value_hint = clap::ValueHint::AnyPath)]
    pub sources: Vec<PathBuf>,
    /// Specify where to place the generated XML files, next to each source by default
    #[clap(short = 'd', long = "output-dir", value_hint = clap::ValueHint::DirPath)]
    pub output_directory: Option<PathBuf>,
    /// Which renderings to produce: tokens, syntax or both
    #[clap(short = 'm', long, default_value_t = AnalysisMode::Both)]
    pub mode: AnalysisMode,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let test = "jack-analyzer Main.jack";
        let args = Args::try_parse_from(test.split(' ')).expect("could not parse test string");
        assert_eq!(args.sources[0], Path::new("Main.jack"));
        assert_eq!(args.mode, AnalysisMode::Both);
        assert_eq!(args.output_directory, None);
    }

    #[test]
    fn test_mode_and_output_directory() {
        let test = "jack-analyzer -m tokens -d out src Extra.jack";
        let args = Args::try_parse_from(test.split(' ')).expect("could not parse test string");
        assert_eq!(args.mode, AnalysisMode::Tokens);
        assert_eq!(args.output_directory.as_deref(), Some(Path::new("out")));
        assert_eq!(args.sources.len(), 2);
    }

    #[test]
    fn test_sources_are_required() {
        assert!(Args::try_parse_from(["jack-analyzer"]).is_err());
        assert!(Args::try_parse_from(["jack-analyzer", "-m", "vm", "Main.jack"]).is_err());
    }
}
