//! Core CLI definitions

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Running without a subcommand patches a single jar, exactly like `patch`.
#[derive(Parser, Debug)]
#[command(name = "modpatch")]
#[command(about = "Minecraft Mod Patcher", long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(flatten)]
    pub patch: PatchArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Patch a single jar
    #[command(visible_alias = "p")]
    Patch(PatchArgs),

    /// Patch every jar in <src_dir>/<mod_name>/ into <out_dir>/<mod_name>/
    #[command(visible_alias = "b")]
    Build(BuildArgs),

    /// List supported mods and their known releases
    #[command(visible_alias = "l")]
    List,

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        #[command(flatten)]
        settings: OptionArgs,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PatchArgs {
    /// Path to the mod jar
    #[arg(long = "jar_path", visible_alias = "jar-path", required = true)]
    pub jar_path: Option<PathBuf>,

    /// Output jar or directory (overwrites the input if not provided)
    #[arg(long = "output_path", visible_alias = "output-path")]
    pub output_path: Option<PathBuf>,

    /// Mod name (projecte, immersive_aircraft)
    #[arg(long = "mod_name", visible_alias = "mod-name", required = true)]
    pub mod_name: Option<String>,

    /// Check the jar's MD5 against the official CurseForge/Modrinth release
    #[arg(
        long = "validate_jar",
        visible_alias = "validate-jar",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "true",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    pub validate_jar: bool,

    #[command(flatten)]
    pub options: OptionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Mod name (projecte, immersive_aircraft)
    #[arg(long = "mod_name", visible_alias = "mod-name")]
    pub mod_name: String,

    /// Directory holding one folder of source jars per mod
    #[arg(long = "src_dir", visible_alias = "src-dir", default_value = "src")]
    pub src_dir: PathBuf,

    /// Directory receiving one folder of patched jars per mod
    #[arg(long = "out_dir", visible_alias = "out-dir", default_value = "out")]
    pub out_dir: PathBuf,

    /// Check each jar's MD5 against the official CurseForge/Modrinth release
    #[arg(
        long = "validate_jar",
        visible_alias = "validate-jar",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "true",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    pub validate_jar: bool,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Settings that can live in the config file; flags take precedence
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Word shown in place of "EMC" in translations
    #[arg(long)]
    pub currency_name: Option<String>,

    /// Directory with extra assets (<mod>/transmute.png, <mod>/remain_i18n.json)
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Texture palette (v2 - v7)
    #[arg(long)]
    pub palette: Option<String>,

    /// Where temporary work directories are created
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}
