/// Failures that abort a run.
///
/// A line missing a field, or carrying a non-numeric value for one, is NOT
/// an error: the field surfaces as absent and the line still counts.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("there is no log file at {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("failed to read log source")]
    Io(#[from] io::Error),
}
