//! One patch run: check, extract, edit, repack.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PatchError, Result};
use crate::mods::PatchOptions;
use crate::registry::ModId;
use crate::tree::ExtractedTree;
use crate::validate;

/// A single jar to patch
#[derive(Debug, Clone)]
pub struct JarRequest {
    pub mod_id: ModId,
    pub jar_path: PathBuf,
    /// `None` overwrites the input; a `.jar` path is the output file; anything
    /// else is a directory receiving a jar with the input's name
    pub output: Option<PathBuf>,
    /// Require the jar's MD5 to match the official release
    pub validate: bool,
}

impl JarRequest {
    /// Build a request from a user-supplied mod name
    pub fn new(
        mod_name: &str,
        jar_path: impl Into<PathBuf>,
        output: Option<PathBuf>,
        validate: bool,
    ) -> Result<Self> {
        Ok(JarRequest {
            mod_id: mod_name.parse()?,
            jar_path: jar_path.into(),
            output,
            validate,
        })
    }
}

/// Where the patched jar for `jar` goes
///
/// Nothing is created here; [`apply`] creates the parent directory only once
/// the jar has been patched.
pub fn resolve_output(jar: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let Some(output) = output else {
        return Ok(jar.to_path_buf());
    };

    let is_jar = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jar"));
    if is_jar {
        return Ok(output.to_path_buf());
    }

    let file_name = jar.file_name().ok_or_else(|| PatchError::MissingFile {
        path: jar.to_path_buf(),
    })?;
    Ok(output.join(file_name))
}

/// Patch one jar and return the path of the patched output
///
/// The work directory lives under `cache_dir` and is removed on every exit
/// path. Nothing is written to the output location unless every edit
/// succeeded.
pub fn apply(request: &JarRequest, options: &PatchOptions, cache_dir: &Path) -> Result<PathBuf> {
    let jar = &request.jar_path;
    if !jar.is_file() {
        return Err(PatchError::MissingFile { path: jar.clone() });
    }

    let file_name = jar
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let known = request.mod_id.lookup(&file_name)?;

    if request.validate {
        validate::verify(jar, known)?;
        tracing::info!("Verified {} against the official release", file_name);
    } else {
        tracing::warn!("Skipping MD5 validation for {}", file_name);
    }

    let output = resolve_output(jar, request.output.as_deref())?;
    let absolute = fs::canonicalize(jar).map_err(|e| PatchError::io(jar, e))?;

    tracing::info!("Patching {} with rule set {}", file_name, known.patch.name());
    let tree = ExtractedTree::extract(&absolute, cache_dir)?;
    known.patch.run(&tree, options)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PatchError::io(parent, e))?;
    }
    let count = tree.repack(&output, Some(jar.as_path()))?;
    tracing::info!("Wrote {} ({} files)", output.display(), count);
    Ok(output)
}
