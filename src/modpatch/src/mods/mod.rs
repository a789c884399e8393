//! Per-mod rule sets.
//!
//! Each rule set is a fixed sequence of edits against the known layout of one
//! family of releases. Rule sets share nothing but the [`ExtractedTree`]
//! helpers and the user's [`PatchOptions`].

pub mod immersive_aircraft;
pub mod projecte;

use std::path::PathBuf;

use crate::error::Result;
use crate::paint::DEFAULT_PALETTE;
use crate::tree::ExtractedTree;

/// User-tunable inputs to the rule sets
#[derive(Debug, Clone)]
pub struct PatchOptions {
    /// Word shown in place of "EMC" in translations
    pub currency_name: String,
    /// Directory holding optional extra assets (GUI textures, translation overlays)
    pub assets_dir: Option<PathBuf>,
    /// Texture palette name (see [`crate::paint::PALETTES`])
    pub palette: String,
}

impl Default for PatchOptions {
    fn default() -> Self {
        PatchOptions {
            currency_name: "Coins".to_string(),
            assets_dir: None,
            palette: DEFAULT_PALETTE.to_string(),
        }
    }
}

impl PatchOptions {
    /// Path of an optional asset `<assets_dir>/<mod>/<name>`, if it exists
    pub fn asset(&self, mod_name: &str, name: &str) -> Option<PathBuf> {
        let path = self.assets_dir.as_ref()?.join(mod_name).join(name);
        path.is_file().then_some(path)
    }
}

/// A rule set for one family of releases
pub trait ModPatch: Sync {
    /// Short identifier, e.g. `projecte-1.20`
    fn name(&self) -> &'static str;

    /// Apply every edit to the extracted jar contents
    fn run(&self, tree: &ExtractedTree, options: &PatchOptions) -> Result<()>;
}
