//! The extracted jar contents and the file edits rule sets make on them.
//!
//! An [`ExtractedTree`] owns its work directory. Dropping it removes the
//! directory, so every exit path of a patch run (including errors and panics
//! unwinding through the pipeline) cleans up after itself.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tempfile::TempDir;

use crate::archive;
use crate::error::{PatchError, Result};
use crate::lang::LangFile;

const JSON_INDENT: &[u8] = b"    ";

/// Which files of a directory to delete
#[derive(Debug, Clone, Copy)]
pub enum Retain<'a> {
    /// Delete everything except these file names
    Keep(&'a [&'a str]),
    /// Delete exactly these file names
    Delete(&'a [&'a str]),
}

/// Work directory name for a jar: first 16 hex chars of SHA-256 of its path
pub fn work_dir_code(jar_path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(jar_path.to_string_lossy().as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

#[derive(Debug)]
pub struct ExtractedTree {
    dir: TempDir,
}

impl ExtractedTree {
    /// Extract `jar` into a fresh work directory below `cache_dir`
    pub fn extract(jar: &Path, cache_dir: &Path) -> Result<Self> {
        fs::create_dir_all(cache_dir).map_err(|e| PatchError::io(cache_dir, e))?;

        let dir = tempfile::Builder::new()
            .prefix(&format!("{}-", work_dir_code(jar)))
            .tempdir_in(cache_dir)
            .map_err(|e| PatchError::io(cache_dir, e))?;

        let tree = ExtractedTree { dir };
        let count = archive::extract(jar, tree.root())?;
        tracing::info!("Extracted {} files to {}", count, tree.root().display());
        Ok(tree)
    }

    /// Wrap an already-populated directory (used by tests)
    #[cfg(test)]
    pub(crate) fn from_dir(dir: TempDir) -> Self {
        ExtractedTree { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a tree-relative path
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root().join(rel)
    }

    pub fn exists(&self, rel: impl AsRef<Path>) -> bool {
        self.path(rel).exists()
    }

    /// Repack the tree into a jar at `out`, see [`archive::repack`]
    pub fn repack(&self, out: &Path, template: Option<&Path>) -> Result<usize> {
        archive::repack(self.root(), out, template)
    }

    pub fn read_string(&self, rel: impl AsRef<Path>) -> Result<String> {
        let path = self.path(rel);
        if !path.is_file() {
            return Err(PatchError::MissingFile { path });
        }
        fs::read_to_string(&path).map_err(|e| PatchError::io(&path, e))
    }

    pub fn write_string(&self, rel: impl AsRef<Path>, contents: &str) -> Result<()> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PatchError::io(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| PatchError::io(&path, e))
    }

    pub fn read_json(&self, rel: impl AsRef<Path>) -> Result<Value> {
        let rel = rel.as_ref();
        let contents = self.read_string(rel)?;
        serde_json::from_str(&contents).map_err(|source| PatchError::Json {
            path: self.path(rel),
            source,
        })
    }

    /// Write JSON with 4-space indentation and non-ASCII text kept verbatim
    pub fn write_json(&self, rel: impl AsRef<Path>, value: &Value) -> Result<()> {
        let rel = rel.as_ref();
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value
            .serialize(&mut serializer)
            .map_err(|source| PatchError::Json {
                path: self.path(rel),
                source,
            })?;

        let path = self.path(rel);
        fs::write(&path, buf).map_err(|e| PatchError::io(&path, e))?;
        tracing::debug!("Wrote {}", rel.display());
        Ok(())
    }

    pub fn read_toml(&self, rel: impl AsRef<Path>) -> Result<toml::Table> {
        let rel = rel.as_ref();
        let contents = self.read_string(rel)?;
        contents
            .parse::<toml::Table>()
            .map_err(|source| PatchError::TomlParse {
                path: self.path(rel),
                source,
            })
    }

    pub fn write_toml(&self, rel: impl AsRef<Path>, table: &toml::Table) -> Result<()> {
        let contents = toml::to_string(table)?;
        self.write_string(rel, &contents)
    }

    pub fn read_lang(&self, rel: impl AsRef<Path>) -> Result<LangFile> {
        Ok(LangFile::parse(&self.read_string(rel)?))
    }

    pub fn write_lang(&self, rel: impl AsRef<Path>, lang: &LangFile) -> Result<()> {
        self.write_string(rel, &lang.to_string())
    }

    /// Delete regular files directly inside `dir` according to `retain`
    ///
    /// Names are matched against file names only. Subdirectories are left
    /// alone. Returns how many files were deleted.
    pub fn remove_files(&self, dir: impl AsRef<Path>, retain: Retain<'_>) -> Result<usize> {
        let dir_path = self.path(dir);
        if !dir_path.is_dir() {
            return Err(PatchError::NotADirectory { path: dir_path });
        }

        let (names, keep) = match retain {
            Retain::Keep(names) => (names, true),
            Retain::Delete(names) => (names, false),
        };
        let names: HashSet<&str> = names.iter().copied().collect();

        let mut removed = 0;
        for entry in fs::read_dir(&dir_path).map_err(|e| PatchError::io(&dir_path, e))? {
            let entry = entry.map_err(|e| PatchError::io(&dir_path, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let listed = names.contains(file_name.to_string_lossy().as_ref());
            if listed != keep {
                fs::remove_file(&path).map_err(|e| PatchError::io(&path, e))?;
                removed += 1;
            }
        }

        tracing::debug!("Removed {} files from {}", removed, dir_path.display());
        Ok(removed)
    }

    /// Recursively delete a directory; absent directories are not an error
    pub fn remove_dir(&self, dir: impl AsRef<Path>) -> Result<bool> {
        let dir_path = self.path(dir);
        if !dir_path.is_dir() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir_path).map_err(|e| PatchError::io(&dir_path, e))?;
        Ok(true)
    }

    /// Copy an external file into the tree, replacing any existing file
    pub fn copy_in(&self, src: &Path, rel: impl AsRef<Path>) -> Result<()> {
        if !src.is_file() {
            return Err(PatchError::MissingFile {
                path: src.to_path_buf(),
            });
        }
        let dest = self.path(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| PatchError::io(parent, e))?;
        }
        fs::copy(src, &dest).map_err(|e| PatchError::io(&dest, e))?;
        Ok(())
    }
}
