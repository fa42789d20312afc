//! Type-safe configuration enums
//!
//! Uses strum for string parsing/display so config values round-trip
//! without hand-written match arms.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Profile preset selected for the rehearsal.
///
/// Profile metadata only: every preset walks the same phase table, matching
/// the fixed package lists it displays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InstallType {
    /// Base system only
    Minimal,
    /// Base system plus desktop environment
    #[default]
    Full,
    /// Full plus build and IDE tooling
    Developer,
    /// Full plus wireless/security tooling
    Hacker,
    /// User-chosen package set
    Custom,
}

/// Root filesystem shown in the rehearsal profile.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Filesystem {
    #[default]
    Ext4,
    Btrfs,
    Xfs,
    F2fs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_install_type_roundtrip() {
        for variant in InstallType::iter() {
            let s = variant.to_string();
            let parsed: InstallType = s.parse().expect("should parse");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn test_filesystem_roundtrip() {
        for variant in Filesystem::iter() {
            let s = variant.to_string();
            let parsed: Filesystem = s.parse().expect("should parse");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(InstallType::default(), InstallType::Full);
        assert_eq!(Filesystem::default(), Filesystem::Ext4);
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(InstallType::Developer.to_string(), "developer");
        assert_eq!(Filesystem::Btrfs.to_string(), "btrfs");
    }
}
