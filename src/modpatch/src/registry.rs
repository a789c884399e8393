//! Supported mods and the known releases of each.
//!
//! A release is identified by its exact jar file name as published on
//! CurseForge/Modrinth; the file name picks the rule set, the MD5 proves the
//! file is the unmodified upload.

use std::fmt;
use std::str::FromStr;

use crate::error::PatchError;
use crate::mods::immersive_aircraft::ImmersiveAircraft1201;
use crate::mods::projecte::{ProjectE1122, ProjectE1201, ProjectE1211};
use crate::mods::ModPatch;

/// Mods with rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModId {
    ProjectE,
    ImmersiveAircraft,
}

impl ModId {
    pub const ALL: [ModId; 2] = [ModId::ProjectE, ModId::ImmersiveAircraft];

    pub fn as_str(self) -> &'static str {
        match self {
            ModId::ProjectE => "projecte",
            ModId::ImmersiveAircraft => "immersive_aircraft",
        }
    }

    /// Every release of this mod that has a rule set
    pub fn known_jars(self) -> &'static [KnownJar] {
        match self {
            ModId::ProjectE => PROJECTE_JARS,
            ModId::ImmersiveAircraft => IMMERSIVE_AIRCRAFT_JARS,
        }
    }

    /// The release with this exact jar file name
    pub fn lookup(self, file_name: &str) -> Result<&'static KnownJar, PatchError> {
        self.known_jars()
            .iter()
            .find(|jar| jar.file_name == file_name)
            .ok_or_else(|| PatchError::UnknownJar {
                mod_name: self.to_string(),
                file_name: file_name.to_string(),
            })
    }
}

impl fmt::Display for ModId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModId {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ModId::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| PatchError::UnsupportedMod {
                name: s.to_string(),
                supported: supported_names(),
            })
    }
}

/// Comma-separated list of supported mod names
pub fn supported_names() -> String {
    ModId::ALL
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One official release of a mod
pub struct KnownJar {
    pub file_name: &'static str,
    /// Lowercase hex MD5 of the file as distributed
    pub md5: &'static str,
    pub patch: &'static dyn ModPatch,
}

impl fmt::Debug for KnownJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnownJar")
            .field("file_name", &self.file_name)
            .field("md5", &self.md5)
            .field("patch", &self.patch.name())
            .finish()
    }
}

static PROJECTE_JARS: &[KnownJar] = &[
    KnownJar {
        file_name: "ProjectE-1.21.1-PE1.1.0.jar",
        md5: "a0f0f11aea6c636b2652ea42f773c0b2",
        patch: &ProjectE1211,
    },
    KnownJar {
        file_name: "ProjectE-1.20.1-PE1.0.1.jar",
        md5: "1d62009c904dbd367820ceeadaabefac",
        patch: &ProjectE1201,
    },
    KnownJar {
        file_name: "ProjectE-1.19.2-PE1.1.0.jar",
        md5: "ae09bb6b2345da071204a790360609b1",
        patch: &ProjectE1201,
    },
    KnownJar {
        file_name: "ProjectE-1.18.2-PE1.0.2.jar",
        md5: "3a73ae740ee7cf05bd38872c12baa2c1",
        patch: &ProjectE1201,
    },
    KnownJar {
        file_name: "ProjectE-1.16.5-PE1.0.2.jar",
        md5: "848dc3a796f9723c49e14bf374b2ba58",
        patch: &ProjectE1201,
    },
    KnownJar {
        file_name: "ProjectE-1.12.2-PE1.4.1.jar",
        md5: "4601ba2741f192bcd01d132aa3e219b5",
        patch: &ProjectE1122,
    },
];

static IMMERSIVE_AIRCRAFT_JARS: &[KnownJar] = &[KnownJar {
    file_name: "immersive_aircraft-1.4.0+1.20.1-forge.jar",
    md5: "f49ff767f611a95f9bd29a0e9977d9d5",
    patch: &ImmersiveAircraft1201,
}];
