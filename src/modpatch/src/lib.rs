//! # modpatch
//!
//! Minecraft mod jar patching library - validation, extraction, rule sets, repacking.
//!
//! This library provides functionality to:
//! - Recognise official mod releases by file name and MD5
//! - Extract a jar into a self-cleaning work directory
//! - Apply a mod's rule set (recipe, loot table, translation, EMC and texture edits)
//! - Repack the result without ever leaving a half-written jar behind
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = modpatch::JarRequest::new(
//!     "projecte",
//!     "ProjectE-1.20.1-PE1.0.1.jar",
//!     Some("out".into()),
//!     true,
//! )?;
//!
//! let options = modpatch::PatchOptions::default();
//! let output = modpatch::apply(&request, &options, Path::new("/tmp/modpatch"))?;
//! println!("Patched jar written to {}", output.display());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod error;
pub mod lang;
pub mod mods;
pub mod paint;
pub mod pipeline;
pub mod recipe;
pub mod registry;
pub mod tree;
pub mod validate;

// Re-export commonly used items
#[doc(inline)]
pub use error::{PatchError, Result};
#[doc(inline)]
pub use mods::{ModPatch, PatchOptions};
#[doc(inline)]
pub use pipeline::{apply, resolve_output, JarRequest};
#[doc(inline)]
pub use registry::{supported_names, KnownJar, ModId};
#[doc(inline)]
pub use tree::{ExtractedTree, Retain};

// Texture palettes
#[doc(inline)]
pub use paint::{palette, Palette, DEFAULT_PALETTE, PALETTES};
