//! Error type shared by every stage of the patch pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML in {}: {source}", path.display())]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Image error in {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported mod: {name} (supported: {supported})")]
    UnsupportedMod { name: String, supported: String },

    #[error("Unknown jar for {mod_name}: {file_name} is not a recognised release")]
    UnknownJar { mod_name: String, file_name: String },

    #[error("MD5 mismatch: expected {expected}, got {actual} (not an official CurseForge/Modrinth release?)")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Missing file: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Recipe key {key} is both updated and removed in {}", path.display())]
    RecipeKeyConflict { path: PathBuf, key: char },

    #[error("Recipe pattern does not match its keys in {}", path.display())]
    RecipePatternMismatch { path: PathBuf },

    #[error("Unexpected structure in {}: {detail}", path.display())]
    Structure { path: PathBuf, detail: String },

    #[error("Unknown palette: {name} (available: {available})")]
    UnknownPalette { name: String, available: String },
}

impl PatchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PatchError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn structure(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        PatchError::Structure {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
