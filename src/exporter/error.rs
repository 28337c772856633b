//! Exporter error types

use crate::codegen::GenerateError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for exporter operations
pub type ExportResult<T> = Result<T, ExportError>;

/// An error raised while selecting or running an exporter
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ExportError {
    /// Generation was aborted
    #[error(transparent)]
    #[diagnostic(transparent)]
    Generate(#[from] GenerateError),

    /// No exporter is registered under the given type name
    #[error("unknown exporter type: `{0}`")]
    #[diagnostic(
        code(qtexport::unknown_exporter),
        help("supported exporter types: QT_CREATOR")
    )]
    UnknownExporter(String),
}
