//! Platform identification and release asset selection.
//!
//! Release archives are published with Go-style platform identifiers
//! (`linux`/`darwin`/`windows`, `amd64`/`arm64`/`386`), so the Rust target
//! names reported by [`std::env::consts`] are translated before building the
//! expected asset name.

use std::fmt;

use super::release::ReleaseAsset;
use crate::constants::ARCHIVE_EXTENSION;

/// Operating system and CPU architecture identifiers used in asset names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    os: String,
    arch: String,
}

impl Platform {
    /// Create a platform from explicit identifiers.
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        let little_endian = cfg!(target_endian = "little");
        Self::new(
            go_os(std::env::consts::OS),
            go_arch(std::env::consts::ARCH, little_endian),
        )
    }

    /// Operating system identifier (e.g. `linux`, `darwin`).
    pub fn os(&self) -> &str {
        &self.os
    }

    /// Architecture identifier (e.g. `amd64`, `arm64`).
    pub fn arch(&self) -> &str {
        &self.arch
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

fn go_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch(arch: &str, little_endian: bool) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc64" if little_endian => "ppc64le",
        "powerpc64" => "ppc64",
        "mips" if little_endian => "mipsle",
        "mips64" if little_endian => "mips64le",
        "wasm32" => "wasm",
        other => other,
    }
}

/// Name of the release asset built for `platform`.
///
/// Pure and deterministic: `{app}-{tag}-{os}-{arch}.tar.gz`.
///
/// # Examples
///
/// ```rust
/// use update_cli::upgrade::platform::{Platform, expected_asset_name};
///
/// let name = expected_asset_name("update", "v1.2.0", &Platform::new("linux", "amd64"));
/// assert_eq!(name, "update-v1.2.0-linux-amd64.tar.gz");
/// ```
pub fn expected_asset_name(app_name: &str, tag: &str, platform: &Platform) -> String {
    format!(
        "{}-{}-{}-{}.{}",
        app_name,
        tag,
        platform.os(),
        platform.arch(),
        ARCHIVE_EXTENSION
    )
}

/// First asset whose name equals `expected` exactly.
pub fn select_asset<'a>(assets: &'a [ReleaseAsset], expected: &str) -> Option<&'a ReleaseAsset> {
    assets.iter().find(|asset| asset.name == expected)
}
