//! Source authenticity checks for input jars.
//!
//! Official releases downloaded from CurseForge or Modrinth have a fixed MD5.
//! A jar whose digest differs was rebuilt, repacked, or tampered with, and the
//! hard-coded edits of a rule set may not apply to it cleanly.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{PatchError, Result};
use crate::registry::KnownJar;

/// Compute the MD5 of a file as lowercase hex
pub fn md5_hex(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| PatchError::io(path, e))?;
    let mut context = md5::Context::new();
    let mut buf = [0u8; 64 * 1024];

    loop {
        let n = file.read(&mut buf).map_err(|e| PatchError::io(path, e))?;
        if n == 0 {
            break;
        }
        context.consume(&buf[..n]);
    }

    Ok(format!("{:x}", context.compute()))
}

/// Check that a jar is the pristine release described by `known`
pub fn verify(path: &Path, known: &KnownJar) -> Result<()> {
    let actual = md5_hex(path)?;
    if !actual.eq_ignore_ascii_case(known.md5) {
        return Err(PatchError::ChecksumMismatch {
            expected: known.md5.to_string(),
            actual,
        });
    }
    tracing::debug!("MD5 verified for {}: {}", known.file_name, actual);
    Ok(())
}
