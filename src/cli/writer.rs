//! Writes generated files, leaving identical files untouched

use std::fs;
use std::io;
use std::path::Path;

/// What happened to the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or its content replaced
    Written,
    /// The file already had the same content
    Unchanged,
}

/// Write `content` to `path` unless the file already holds exactly that
///
/// Parent directories are created as needed. The new content is written to a
/// sibling temporary file and renamed over the target.
///
/// # Errors
///
/// Returns any IO error from reading, writing or renaming.
pub fn write_if_changed(path: &Path, content: &str) -> io::Result<WriteOutcome> {
    match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => return Ok(WriteOutcome::Unchanged),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    replace_via(Path::new(&staging), path, content)?;

    Ok(WriteOutcome::Written)
}

/// Write `content` to `staging` and rename it onto `path`
///
/// The staging file is removed again if either step fails.
fn replace_via(staging: &Path, path: &Path, content: &str) -> io::Result<()> {
    let result = fs::write(staging, content).and_then(|()| fs::rename(staging, path));
    if result.is_err() {
        let _ = fs::remove_file(staging);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Builds/QtCreator/demo.pro");

        let outcome = write_if_changed(&path, "TEMPLATE = app\n").unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "TEMPLATE = app\n");
        assert!(!dir.path().join("Builds/QtCreator/demo.pro.tmp").exists());
    }

    #[test]
    fn test_unchanged_file_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demo.pro");
        fs::write(&path, "same\n").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let outcome = write_if_changed(&path, "same\n").unwrap();

        assert_eq!(outcome, WriteOutcome::Unchanged);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_changed_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demo.pro");
        fs::write(&path, "old\n").unwrap();

        let outcome = write_if_changed(&path, "new\n").unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_failed_rename_removes_staging_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demo.pro");
        let staging = dir.path().join("demo.pro.tmp");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "x").unwrap();

        assert!(replace_via(&staging, &path, "TEMPLATE = app\n").is_err());

        assert!(!staging.exists());
        assert!(path.join("keep.txt").exists());
    }
}
