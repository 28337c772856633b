//! Generation error types

use crate::tree::PathRoot;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for build file generation
pub type GenerateResult<T> = Result<T, GenerateError>;

/// An error that aborts build file generation
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GenerateError {
    /// A listed file is not relative to the build target folder
    #[error("{kind} file `{path}` is relative to the {root}, expected the build target folder")]
    #[diagnostic(
        code(qtexport::foreign_root),
        help("file lists must be produced by walking the project against the export target folder")
    )]
    ForeignRoot {
        /// Which listing the path came from
        kind: &'static str,
        /// The offending path
        path: String,
        /// The folder it is actually relative to
        root: PathRoot,
    },
}
