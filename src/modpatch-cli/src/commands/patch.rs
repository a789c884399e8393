//! Single-jar patch command

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::PatchArgs;
use crate::config::Config;

/// Handle the patch command (also used when no subcommand is given)
pub fn handle(args: &PatchArgs, config: &Config) -> Result<PathBuf> {
    let jar_path = args.jar_path.clone().context("--jar_path is required")?;
    let mod_name = args.mod_name.as_deref().context("--mod_name is required")?;

    let request = modpatch::JarRequest::new(
        mod_name,
        jar_path.clone(),
        args.output_path.clone(),
        args.validate_jar,
    )?;
    let options = config.patch_options(&args.options);
    let cache_dir = config.cache_dir(&args.options)?;

    let output = modpatch::apply(&request, &options, &cache_dir)
        .with_context(|| format!("Failed to patch {}", jar_path.display()))?;

    println!("Patched {} -> {}", jar_path.display(), output.display());
    Ok(output)
}
