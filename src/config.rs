//! Rehearsal configuration handling
//!
//! The config describes the machine profile the rehearsal pretends to
//! install: identity, locale, target disk, filesystem choices, and the
//! playback speed. It can be saved to and loaded from JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::{Filesystem, InstallType};

/// Rehearsal profile that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    // Identity
    pub hostname: String,
    pub username: String,

    // Locale & time
    pub locale: String,
    pub timezone: String,
    pub keymap: String,

    // Disk & storage
    pub install_disk: String,
    pub root_filesystem: Filesystem,
    pub swap: bool,
    pub swap_size: String, // Size like "4GiB" - flexible format

    // Profile
    pub install_type: InstallType,

    /// Delay multiplier for the rehearsal (1.0 = real pacing, 0 = instant)
    pub speed: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            hostname: "archinstallus".to_string(),
            username: "archuser".to_string(),
            locale: "en_US.UTF-8".to_string(),
            timezone: "UTC".to_string(),
            keymap: "us".to_string(),
            install_disk: "/dev/nvme0n1".to_string(),
            root_filesystem: Filesystem::Ext4,
            swap: true,
            swap_size: "4GiB".to_string(),
            install_type: InstallType::Full,
            speed: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with the stock defaults
    #[allow(dead_code)] // API: Constructor for external consumers
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate disk path
        if self.install_disk.trim().is_empty() {
            anyhow::bail!("Install disk must be specified");
        }

        validate_name("Hostname", &self.hostname)?;
        validate_name("Username", &self.username)?;

        if self.locale.trim().is_empty() {
            anyhow::bail!("Locale must be specified");
        }
        if self.timezone.trim().is_empty() {
            anyhow::bail!("Timezone must be specified");
        }
        if self.keymap.trim().is_empty() {
            anyhow::bail!("Keymap must be specified");
        }

        if self.swap && self.swap_size.trim().is_empty() {
            anyhow::bail!("Swap size must be specified when swap is enabled");
        }

        if !self.speed.is_finite() || self.speed < 0.0 {
            anyhow::bail!("Speed must be a non-negative number");
        }

        Ok(())
    }
}

/// Shared rules for hostname and username
/// (3-32 chars, start with letter, alphanumeric + underscore)
fn validate_name(what: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("{} must be specified", what);
    }
    if value.len() < 3 || value.len() > 32 {
        anyhow::bail!("{} must be 3-32 characters long", what);
    }
    if let Some(first_char) = value.chars().next() {
        if !first_char.is_ascii_alphabetic() {
            anyhow::bail!("{} must start with a letter", what);
        }
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        anyhow::bail!("{} can only contain letters, numbers, and underscores", what);
    }
    Ok(())
}
