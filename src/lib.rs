//! qtexport: a qmake project file exporter
//!
//! Given a hierarchical description of a C/C++ project (groups of files,
//! build configurations, search paths, defines and libraries), qtexport
//! deterministically emits a qmake `.pro` file.
//!
//! # Pipeline
//!
//! - **Walker** (`tree`): flattens the project tree into compiled sources and
//!   headers, each relative to the build target folder
//! - **Configurations** (`config`): ordered debug/release variants with
//!   defines, search paths and flag templates
//! - **Generator** (`codegen`): emits the `.pro` text section by section
//!
//! # Example
//!
//! ```
//! use qtexport::config::BuildConfiguration;
//! use qtexport::exporter::{ExportProject, Exporter, QtCreatorExporter};
//! use qtexport::tree::{Group, Leaf};
//!
//! let mut project = ExportProject::new("app", ".");
//! project.root = Group::new("app")
//!     .with(Group::new("src").with(Leaf::new("src/main.cpp")).with(Leaf::new("src/main.h")))
//!     .into();
//! project
//!     .configurations
//!     .push(BuildConfiguration::new("Debug", true).with_target_name("app"));
//!
//! let text = QtCreatorExporter.generate(&project).unwrap();
//! assert!(text.contains("\t\"src/main.cpp\" \\\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod codegen;
pub mod config;
pub mod exporter;
pub mod project;
pub mod tree;
