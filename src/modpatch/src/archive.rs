//! Jar extraction and repacking.
//!
//! Repacked output is first written to a temporary file beside the destination
//! and renamed over it only once the archive is complete, so a failed run never
//! leaves a truncated jar behind (and never clobbers the input when patching in
//! place).

use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::Path;

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{PatchError, Result};

/// Extract every entry of `jar` below `dest`
///
/// Entries whose names would escape `dest` are skipped. Returns the number of
/// files written.
pub fn extract(jar: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(jar).map_err(|e| PatchError::io(jar, e))?;
    let mut archive = ZipArchive::new(file)?;

    let mut count = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let Some(entry_path) = entry.enclosed_name() else {
            tracing::warn!("Skipping unsafe entry name: {}", entry.name());
            continue;
        };
        let output_path = dest.join(entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path).map_err(|e| PatchError::io(&output_path, e))?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| PatchError::io(parent, e))?;
        }
        let mut outfile =
            File::create(&output_path).map_err(|e| PatchError::io(&output_path, e))?;
        io::copy(&mut entry, &mut outfile).map_err(|e| PatchError::io(&output_path, e))?;
        count += 1;
    }

    tracing::debug!("Extracted {} files from {}", count, jar.display());
    Ok(count)
}

/// Write every regular file below `root` into a new jar at `out`
///
/// Returns the number of entries written. `out` is replaced atomically and
/// takes the permissions of the file it replaces, or else those of
/// `template`.
pub fn repack(root: &Path, out: &Path, template: Option<&Path>) -> Result<usize> {
    let parent = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".modpatch-").suffix(".jar.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let staged = builder
        .tempfile_in(parent)
        .map_err(|e| PatchError::io(parent, e))?;

    let count = write_archive(root, staged.as_file())?;

    let mode_source = Some(out).filter(|p| p.is_file()).or(template);
    if let Some(source) = mode_source {
        let permissions = fs::metadata(source)
            .map_err(|e| PatchError::io(source, e))?
            .permissions();
        fs::set_permissions(staged.path(), permissions)
            .map_err(|e| PatchError::io(staged.path(), e))?;
    }

    staged
        .persist(out)
        .map_err(|e| PatchError::io(out, e.error))?;

    tracing::debug!("Repacked {} files into {}", count, out.display());
    Ok(count)
}

/// Zip the contents of `root` into `writer`, Deflate-compressed, in file name order
fn write_archive<W: Write + Seek>(root: &Path, writer: W) -> Result<usize> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            PatchError::io(path, io::Error::other(e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(root, entry.path())?;
        let data = fs::read(entry.path()).map_err(|e| PatchError::io(entry.path(), e))?;

        zip.start_file(name, options)?;
        zip.write_all(&data)
            .map_err(|e| PatchError::io(entry.path(), e))?;
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}

/// Archive entry name for a file: its path relative to `root`, `/`-separated
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| PatchError::structure(path, "file is outside the extracted tree"))?;

    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
