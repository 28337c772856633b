//! Project tree model
//!
//! A project is an ordered hierarchy of groups and file leaves:
//!
//! - `ProjectItem`: a node, either a `Group` or a `Leaf`
//! - `RelativePath`: a file path tagged with the folder it is relative to
//! - `Walker`: flattens a tree into compiled-source and header lists

mod path;
mod walker;

pub use path::{unix_style_path, PathRoot, RelativePath};
pub use walker::{HeaderExtensions, Walker};

use smol_str::SmolStr;
use std::path::{Path, PathBuf};

/// Extensions compiled by default when a leaf does not say otherwise
const COMPILED_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "c++", "m", "mm", "s", "asm"];

/// A node in the project tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectItem {
    /// A named container of child items
    Group(Group),
    /// A single file
    Leaf(Leaf),
}

impl ProjectItem {
    /// Create an empty group
    #[must_use]
    pub fn group(name: impl Into<SmolStr>) -> Self {
        Self::Group(Group::new(name))
    }

    /// Create a leaf whose compile flag is derived from its extension
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::Leaf(Leaf::new(path))
    }

    /// Check if this item is a group
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Display name: the group name, or the file name of a leaf
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Group(group) => &group.name,
            Self::Leaf(leaf) => leaf
                .path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or_default(),
        }
    }

    /// Number of leaves in this subtree
    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            Self::Group(group) => group.children.iter().map(Self::file_count).sum(),
            Self::Leaf(_) => 1,
        }
    }
}

impl From<Group> for ProjectItem {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<Leaf> for ProjectItem {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

/// A named group; children keep their insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// Display name
    pub name: SmolStr,
    /// Child items, in insertion order
    pub children: Vec<ProjectItem>,
}

impl Group {
    /// Create an empty group
    #[must_use]
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child, builder style
    #[must_use]
    pub fn with(mut self, child: impl Into<ProjectItem>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child
    pub fn push(&mut self, child: impl Into<ProjectItem>) {
        self.children.push(child.into());
    }
}

/// A file in the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Path relative to the project folder
    pub path: PathBuf,
    compile: bool,
}

impl Leaf {
    /// Create a leaf; files with a compilable extension are compiled
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let compile = extension_of(&path).is_some_and(|ext| {
            COMPILED_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        });
        Self { path, compile }
    }

    /// Override whether the file should be compiled
    #[must_use]
    pub const fn with_compile(mut self, compile: bool) -> Self {
        self.compile = compile;
        self
    }

    /// Whether the file is passed to the compiler
    #[must_use]
    pub const fn should_be_compiled(&self) -> bool {
        self.compile
    }

    /// File extension without the leading dot
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        extension_of(&self.path)
    }
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_compile_defaults() {
        assert!(Leaf::new("src/main.cpp").should_be_compiled());
        assert!(Leaf::new("src/legacy.C").should_be_compiled());
        assert!(Leaf::new("src/view.mm").should_be_compiled());
        assert!(!Leaf::new("src/main.h").should_be_compiled());
        assert!(!Leaf::new("Resources/icon.png").should_be_compiled());
        assert!(!Leaf::new("Makefile").should_be_compiled());
    }

    #[test]
    fn test_leaf_compile_override() {
        let leaf = Leaf::new("src/generated.cpp").with_compile(false);
        assert!(!leaf.should_be_compiled());
        assert_eq!(leaf.extension(), Some("cpp"));
    }

    #[test]
    fn test_group_preserves_insertion_order() {
        let group = Group::new("src")
            .with(Leaf::new("src/b.cpp"))
            .with(Group::new("nested"))
            .with(Leaf::new("src/a.cpp"));

        let names: Vec<_> = group.children.iter().map(ProjectItem::name).collect();
        assert_eq!(names, vec!["b.cpp", "nested", "a.cpp"]);
    }

    #[test]
    fn test_file_count() {
        let root: ProjectItem = Group::new("root")
            .with(Leaf::new("a.cpp"))
            .with(Group::new("inner").with(Leaf::new("b.h")).with(Leaf::new("c.txt")))
            .into();

        assert_eq!(root.file_count(), 3);
        assert!(root.is_group());
    }
}
