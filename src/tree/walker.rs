//! Project tree walker
//!
//! Flattens a project tree depth-first, in insertion order, into the list of
//! files to compile and the list of headers. Each call builds and returns its
//! own list; results from sibling items are concatenated by the caller.

use super::{Leaf, ProjectItem, RelativePath};
use std::path::PathBuf;

/// Recognized header file extensions, compared case-insensitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderExtensions {
    extensions: Vec<String>,
}

impl HeaderExtensions {
    /// Build a set from extensions, with or without a leading dot
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
            if !ext.is_empty() && !result.contains(&ext) {
                result.push(ext);
            }
        }
        Self { extensions: result }
    }

    /// Check whether a file extension is a header extension
    #[must_use]
    pub fn matches(&self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        self.extensions.iter().any(|ext| *ext == extension)
    }

}

impl Default for HeaderExtensions {
    fn default() -> Self {
        Self::new(["h", "hpp", "hxx", "hh", "inl"])
    }
}

/// Walks project trees on behalf of one build target folder
///
/// Leaf paths and the target folder are both resolved against the project
/// folder before rebasing. A leaf that cannot be expressed relative to the
/// target comes back rooted at [`PathRoot::Unknown`](super::PathRoot::Unknown).
#[derive(Debug, Clone)]
pub struct Walker {
    project_folder: PathBuf,
    target_folder: PathBuf,
    headers: HeaderExtensions,
}

impl Walker {
    /// Create a walker producing paths relative to `target_folder`
    #[must_use]
    pub fn new(target_folder: impl Into<PathBuf>) -> Self {
        Self {
            project_folder: PathBuf::new(),
            target_folder: target_folder.into(),
            headers: HeaderExtensions::default(),
        }
    }

    /// Folder that leaf paths and a relative target folder are relative to
    #[must_use]
    pub fn with_project_folder(mut self, project_folder: impl Into<PathBuf>) -> Self {
        self.project_folder = project_folder.into();
        self
    }

    /// Use a custom header extension set
    #[must_use]
    pub fn with_header_extensions(mut self, headers: HeaderExtensions) -> Self {
        self.headers = headers;
        self
    }

    /// Collect every file that should be compiled
    #[must_use]
    pub fn collect_sources(&self, item: &ProjectItem) -> Vec<RelativePath> {
        match item {
            ProjectItem::Group(group) => group
                .children
                .iter()
                .flat_map(|child| self.collect_sources(child))
                .collect(),
            ProjectItem::Leaf(leaf) if self.is_source(leaf) => vec![self.relative(leaf)],
            ProjectItem::Leaf(_) => Vec::new(),
        }
    }

    /// Collect every header file
    #[must_use]
    pub fn collect_headers(&self, item: &ProjectItem) -> Vec<RelativePath> {
        match item {
            ProjectItem::Group(group) => group
                .children
                .iter()
                .flat_map(|child| self.collect_headers(child))
                .collect(),
            ProjectItem::Leaf(leaf) if self.is_header(leaf) => vec![self.relative(leaf)],
            ProjectItem::Leaf(_) => Vec::new(),
        }
    }

    /// Compiled leaves are sources, whatever their extension
    #[must_use]
    pub fn is_source(&self, leaf: &Leaf) -> bool {
        leaf.should_be_compiled()
    }

    /// A leaf that is not compiled and carries a header extension
    #[must_use]
    pub fn is_header(&self, leaf: &Leaf) -> bool {
        !leaf.should_be_compiled() && leaf.extension().is_some_and(|ext| self.headers.matches(ext))
    }

    fn relative(&self, leaf: &Leaf) -> RelativePath {
        RelativePath::rebased(
            &self.project_folder.join(&leaf.path),
            &self.project_folder.join(&self.target_folder),
        )
    }
}
