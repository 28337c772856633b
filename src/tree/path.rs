//! Paths tagged with the folder they are relative to

use std::fmt;
use std::path::Path;

/// The folder a `RelativePath` is expressed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRoot {
    /// The folder containing the project manifest
    ProjectFolder,
    /// The folder the generated build file is written to
    BuildTargetFolder,
    /// Origin not known
    Unknown,
}

impl fmt::Display for PathRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProjectFolder => "project folder",
            Self::BuildTargetFolder => "build target folder",
            Self::Unknown => "unknown folder",
        };
        f.write_str(name)
    }
}

/// A file path plus the root it is relative to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath {
    path: String,
    root: PathRoot,
}

impl RelativePath {
    /// Wrap a path that is already relative to `root`
    #[must_use]
    pub fn new(path: impl Into<String>, root: PathRoot) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }

    /// Re-express `file` relative to `target_folder`
    ///
    /// Both paths are treated lexically: `.` segments are dropped and `..`
    /// segments collapse into their parent. A correct relative path exists
    /// only when both share a prefix (relative, `/`, or the same drive) and
    /// the part of the target below the common base names no parent folder.
    /// Otherwise the file path is returned rooted at [`PathRoot::Unknown`].
    #[must_use]
    pub fn rebased(file: &Path, target_folder: &Path) -> Self {
        let file = Segments::parse(&file.to_string_lossy());
        let target = Segments::parse(&target_folder.to_string_lossy());

        if file.prefix != target.prefix {
            return Self::new(file.to_string(), PathRoot::Unknown);
        }

        let common = file
            .parts
            .iter()
            .zip(&target.parts)
            .take_while(|(a, b)| a == b)
            .count();

        // `..` below the common base climbs into a folder whose name is unknown
        if target.parts[common..].iter().any(|part| part == "..") {
            return Self::new(file.to_string(), PathRoot::Unknown);
        }

        let mut parts: Vec<&str> = vec![".."; target.parts.len() - common];
        parts.extend(file.parts[common..].iter().map(String::as_str));

        let path = if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        };

        Self::new(path, PathRoot::BuildTargetFolder)
    }

    /// The folder this path is relative to
    #[must_use]
    pub const fn root(&self) -> PathRoot {
        self.root
    }

    /// The raw path text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// The path with every backslash turned into a forward slash
    #[must_use]
    pub fn to_unix_style(&self) -> String {
        unix_style_path(&self.path)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Convert a path string of either style to forward slashes
#[must_use]
pub fn unix_style_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalized path segments
struct Segments {
    prefix: String,
    parts: Vec<String>,
}

impl Segments {
    fn parse(raw: &str) -> Self {
        let unix = unix_style_path(raw);
        let (prefix, rest) = split_prefix(&unix);
        let absolute = !prefix.is_empty();

        let mut parts: Vec<String> = Vec::new();
        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if parts.last().is_some_and(|last| last != "..") {
                        parts.pop();
                    } else if !absolute {
                        parts.push("..".to_string());
                    }
                }
                other => parts.push(other.to_string()),
            }
        }

        Self {
            prefix: prefix.to_string(),
            parts,
        }
    }
}

impl fmt::Display for Segments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.parts.join("/"))
    }
}

/// Split off `/` or a drive prefix such as `C:/`
fn split_prefix(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        path.split_at(3)
    } else if path.starts_with('/') {
        path.split_at(1)
    } else {
        ("", path)
    }
}
