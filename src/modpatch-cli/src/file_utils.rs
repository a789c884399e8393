//! File system utilities for common traversal patterns

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Files directly inside `path` whose extension matches, sorted by path
///
/// Extension should not include the dot (e.g., "jar" not ".jar").
pub fn collect_files_with_extension(path: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to read {}", path.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);

        if matches {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_jars_sorted_and_shallow() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("b.jar"), b"").unwrap();
        fs::write(root.join("a.JAR"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();
        fs::create_dir(root.join("old")).unwrap();
        fs::write(root.join("old/c.jar"), b"").unwrap();

        let files = collect_files_with_extension(root, &["jar"]).unwrap();
        assert_eq!(files, vec![root.join("a.JAR"), root.join("b.jar")]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(collect_files_with_extension(&temp_dir.path().join("absent"), &["jar"]).is_err());
    }
}
