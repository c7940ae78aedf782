//! Summary report
//!
//! Section builders turn snapshots into Markdown fragments on a
//! `ReportAccumulator`; `ReportEmitter` substitutes them into the summary
//! template once every section has text.

mod accumulator;
mod emitter;
mod placeholder;
pub mod sections;
mod template;

pub use accumulator::{
    ERROR_MARKER, ErrorLog, NO_ERRORS, PlaceholderMap, ReportAccumulator, WARNING_MARKER,
};
pub use emitter::ReportEmitter;
pub use placeholder::Placeholder;
pub use template::SUMMARY_TEMPLATE;

use std::path::PathBuf;

/// Report contract violations and summary write failures
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Value for key '{0}' not set in summary")]
    MissingSection(Placeholder),

    #[error("Summary template has no '{}' token", .0.token())]
    TemplateMissing(Placeholder),

    #[error("Summary template has unknown token '{0}'")]
    UnknownToken(String),

    #[error("Failed to write summary {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
