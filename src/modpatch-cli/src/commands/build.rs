//! Batch build command
//!
//! Patches every jar in `<src_dir>/<mod_name>/` into `<out_dir>/<mod_name>/`.
//! Jars that are not a known release of the mod are skipped, not failed.

use anyhow::{bail, Context, Result};
use modpatch::{JarRequest, ModId};
use std::path::{Path, PathBuf};

use crate::cli::BuildArgs;
use crate::config::Config;
use crate::file_utils::collect_files_with_extension;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
}

/// Handle the build command; errors when any jar failed or none succeeded
pub fn handle(args: &BuildArgs, config: &Config) -> Result<()> {
    let summary = run(args, config)?;

    println!();
    println!("Results:");
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Skipped:   {} (not a known release)", summary.skipped);
    println!("  Failed:    {}", summary.failed);
    println!("  Output:    {}", summary.output_dir.display());

    if summary.failed > 0 {
        bail!("{} jar(s) failed to patch", summary.failed);
    }
    if summary.succeeded == 0 {
        bail!("No jars were patched");
    }
    Ok(())
}

/// Patch every jar for the mod and tally the outcomes
pub fn run(args: &BuildArgs, config: &Config) -> Result<BuildSummary> {
    let mod_id: ModId = args.mod_name.parse()?;
    let src_dir = args.src_dir.join(mod_id.as_str());
    let output_dir = args.out_dir.join(mod_id.as_str());

    println!("Building {}", mod_id);
    println!("MD5 validation: {}", if args.validate_jar { "enabled" } else { "disabled" });

    if !src_dir.is_dir() {
        bail!("Source directory does not exist: {}", src_dir.display());
    }
    let jars = collect_files_with_extension(&src_dir, &["jar"])?;
    if jars.is_empty() {
        bail!("No jar files found in {}", src_dir.display());
    }
    println!("Found {} jar file(s)", jars.len());

    let options = config.patch_options(&args.options);
    let cache_dir = config.cache_dir(&args.options)?;

    let mut summary = BuildSummary {
        output_dir: output_dir.clone(),
        ..Default::default()
    };

    for jar in &jars {
        let file_name = file_name(jar);

        if mod_id.lookup(&file_name).is_err() {
            println!("  Skipped {}: no rule set for this release", file_name);
            summary.skipped += 1;
            continue;
        }

        let request = JarRequest {
            mod_id,
            jar_path: jar.clone(),
            output: Some(output_dir.clone()),
            validate: args.validate_jar,
        };
        match modpatch::apply(&request, &options, &cache_dir)
            .with_context(|| format!("Failed to patch {}", file_name))
        {
            Ok(output) => {
                println!("  Patched {} -> {}", file_name, output.display());
                summary.succeeded += 1;
            }
            Err(e) => {
                eprintln!("  {:#}", e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
