//! CLI commands implementation

use super::writer::{write_if_changed, WriteOutcome};
use crate::exporter::ExportError;
use crate::project::{
    ConfigurationConfig, ItemConfig, Loader, Manifest, Project, MANIFEST_FILE,
};
use crate::tree::Walker;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// qmake project exporter CLI
#[derive(Parser, Debug)]
#[command(name = "qtexport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new project
    Init {
        /// Project name
        name: String,
        /// Directory to create the project in (defaults to project name)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Load a project and summarize what would be exported
    Check {
        /// Path to manifest or project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the generated build file to stdout
    Print {
        /// Path to manifest or project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Write the generated build file, only if its content changed
    Export {
        /// Path to manifest or project directory
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Target folder, relative to the project folder unless absolute
        /// (overrides manifest setting)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI with the given arguments
///
/// # Errors
///
/// Returns an error if the command fails.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Init { name, path } => cmd_init(&name, path.as_deref()),
        Commands::Check { path } => cmd_check(&path),
        Commands::Print { path } => cmd_print(&path),
        Commands::Export { path, output } => cmd_export(&path, output.as_deref()),
    }
}

fn cmd_init(name: &str, path: Option<&Path>) -> Result<(), CliError> {
    let project_dir = path.map_or_else(|| PathBuf::from(name), Path::to_path_buf);

    if project_dir.exists() {
        let is_empty = project_dir
            .read_dir()
            .map(|mut d| d.next().is_none())
            .unwrap_or(false);

        if !is_empty {
            return Err(CliError::DirectoryNotEmpty(project_dir));
        }
    }

    let src_dir = project_dir.join("src");
    fs::create_dir_all(&src_dir).map_err(|e| CliError::Io {
        path: src_dir.clone(),
        source: e,
    })?;

    let manifest = sample_manifest(name);
    let manifest_path = project_dir.join(MANIFEST_FILE);
    manifest
        .save(&manifest_path)
        .map_err(|e| CliError::Manifest(e.to_string()))?;

    let header = format!("#pragma once\n\n// {name}\n");
    let main = "#include \"main.h\"\n\nint main (int argc, char* argv[])\n{\n    return 0;\n}\n";
    for (file, content) in [("main.h", header.as_str()), ("main.cpp", main)] {
        let file_path = src_dir.join(file);
        fs::write(&file_path, content).map_err(|e| CliError::Io {
            path: file_path,
            source: e,
        })?;
    }

    let gitignore = "# Generated files\nBuilds/\n";
    let gitignore_path = project_dir.join(".gitignore");
    fs::write(&gitignore_path, gitignore).map_err(|e| CliError::Io {
        path: gitignore_path,
        source: e,
    })?;

    info!(project = name, dir = %project_dir.display(), "initialized project");

    println!("Created new project: {name}");
    println!("  {}", manifest_path.display());
    println!("  {}/main.cpp", src_dir.display());
    println!("\nTo get started:");
    println!("  cd {}", project_dir.display());
    println!("  qtexport check");
    println!("  qtexport export");

    Ok(())
}

fn sample_manifest(name: &str) -> Manifest {
    let mut manifest = Manifest::new(name);
    manifest.exporter.unix_libraries = vec!["pthread".to_string(), "dl".to_string()];

    let mut debug = ConfigurationConfig::new("Debug", true);
    debug.optimisation = Some(0);
    let mut release = ConfigurationConfig::new("Release", false);
    release.optimisation = Some(3);
    manifest.configurations = vec![debug, release];

    manifest.items = vec![ItemConfig::Group {
        group: "Source".to_string(),
        items: vec![
            ItemConfig::File {
                file: PathBuf::from("src/main.cpp"),
                compile: None,
            },
            ItemConfig::File {
                file: PathBuf::from("src/main.h"),
                compile: None,
            },
        ],
    }];

    manifest
}

fn cmd_check(path: &Path) -> Result<(), CliError> {
    let project = load_project(path)?;
    let exporter = project.exporter();

    println!("Checking {}...", project.name());

    let walker = Walker::new(&project.export.target_folder)
        .with_project_folder(&project.export.project_folder)
        .with_header_extensions(project.export.header_extensions.clone());
    let sources = walker.collect_sources(&project.export.root);
    let headers = walker.collect_headers(&project.export.root);

    println!("  exporter: {}", exporter.name());
    println!("  output: {}", project.output_path().display());
    println!("  {} source file(s)", sources.len());
    println!("  {} header file(s)", headers.len());
    println!(
        "  {} configuration(s)",
        project.export.configurations.len()
    );
    for config in &project.export.configurations {
        println!(
            "    {} ({}, -O{}, target {})",
            config.name,
            config.gate(),
            config.optimisation,
            config.target_name
        );
    }

    Ok(())
}

fn cmd_print(path: &Path) -> Result<(), CliError> {
    let project = load_project(path)?;
    let text = project.exporter().generate(&project.export)?;
    print!("{text}");
    Ok(())
}

fn cmd_export(path: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let mut project = load_project(path)?;

    if let Some(output) = output {
        project.export.target_folder = output.to_path_buf();
    }

    println!("Exporting {}...", project.name());

    let text = project.exporter().generate(&project.export)?;
    let output_file = project.output_path();

    let outcome = write_if_changed(&output_file, &text).map_err(|e| CliError::Io {
        path: output_file.clone(),
        source: e,
    })?;

    match outcome {
        WriteOutcome::Written => {
            info!(file = %output_file.display(), "wrote build file");
            println!("  Generated: {}", output_file.display());
        }
        WriteOutcome::Unchanged => {
            info!(file = %output_file.display(), "build file unchanged");
            println!("  Unchanged: {}", output_file.display());
        }
    }

    Ok(())
}

fn load_project(path: &Path) -> Result<Project, CliError> {
    if path.is_file() {
        return Loader::load_project(path).map_err(|e| CliError::Load(e.to_string()));
    }

    let manifest_path = path.join(MANIFEST_FILE);
    if manifest_path.exists() {
        return Loader::load_project(&manifest_path).map_err(|e| CliError::Load(e.to_string()));
    }

    if let Ok(manifest_path) = Manifest::find(path) {
        return Loader::load_project(&manifest_path).map_err(|e| CliError::Load(e.to_string()));
    }

    Err(CliError::NoProject(path.to_path_buf()))
}

/// CLI errors
#[derive(Debug)]
pub enum CliError {
    /// IO error
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Manifest error
    Manifest(String),
    /// Load error
    Load(String),
    /// Export aborted
    Export(ExportError),
    /// No project found
    NoProject(PathBuf),
    /// Directory not empty
    DirectoryNotEmpty(PathBuf),
}

impl From<ExportError> for CliError {
    fn from(error: ExportError) -> Self {
        CliError::Export(error)
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io { path, source } => {
                write!(f, "IO error at {}: {}", path.display(), source)
            }
            CliError::Manifest(e) => write!(f, "Manifest error: {e}"),
            CliError::Load(e) => write!(f, "Load error: {e}"),
            CliError::Export(e) => write!(f, "Export failed: {e}"),
            CliError::NoProject(path) => {
                write!(
                    f,
                    "No project found at {}. Run 'qtexport init' to create one.",
                    path.display()
                )
            }
            CliError::DirectoryNotEmpty(path) => {
                write!(f, "Directory {} is not empty", path.display())
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io { source, .. } => Some(source),
            CliError::Export(e) => Some(e),
            _ => None,
        }
    }
}
