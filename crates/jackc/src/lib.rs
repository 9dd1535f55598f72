//! Batch syntax analysis of jack source units.
//!
//! Each source unit `Foo.jack` is analyzed on its own and produces `FooT.xml`, its token
//! sequence, and `Foo.xml`, its parse tree, depending on the configured [AnalysisMode].
//!
//! ```no_run
//! # use jackc::{AnalysisMode, JackAnalyzer};
//! let analyzer = JackAnalyzer::builder()
//!     .output_directory("out")
//!     .mode(AnalysisMode::Both)
//!     .build()?;
//! let written = analyzer.analyze_all(["Square"])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod analyzer;

pub use analyzer::*;
