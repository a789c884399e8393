//! CLI argument definitions for modpatch
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;

pub use core::{BuildArgs, Cli, Commands, OptionArgs, PatchArgs};
