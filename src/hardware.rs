//! Canned hardware inventory
//!
//! The rehearsal "detects" a fixed machine: the values below are literal
//! constants, never derived from the host. Detection timing lives in the
//! phase table; this module only supplies the facts the UI displays.

#![allow(dead_code)]

use std::fmt;

/// Firmware mode of the rehearsal machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirmwareMode {
    /// UEFI firmware, supports GPT and an EFI System Partition
    Uefi,
    /// Legacy BIOS firmware
    Bios,
}

impl FirmwareMode {
    /// Returns true for UEFI firmware.
    pub fn is_uefi(self) -> bool {
        matches!(self, Self::Uefi)
    }

    /// Returns true for legacy BIOS firmware.
    pub fn is_bios(self) -> bool {
        matches!(self, Self::Bios)
    }
}

impl fmt::Display for FirmwareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uefi => write!(f, "UEFI"),
            Self::Bios => write!(f, "BIOS"),
        }
    }
}

/// Fixed hardware facts shown on the idle screen and in detection output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareInfo {
    pub cpu_model: &'static str,
    pub cpu_cores: u32,
    pub cpu_threads: u32,
    pub memory_total: u64,
    pub memory_available: u64,
    pub firmware: FirmwareMode,
    pub secure_boot: bool,
    pub interfaces: &'static [&'static str],
}

impl HardwareInfo {
    /// Return the rehearsal machine's inventory.
    pub fn probe() -> Self {
        Self {
            cpu_model: "Intel Core i7-11700K",
            cpu_cores: 8,
            cpu_threads: 16,
            memory_total: 16_777_216_000,
            memory_available: 8_589_934_592,
            firmware: FirmwareMode::Uefi,
            secure_boot: false,
            interfaces: &["eth0", "wlan0"],
        }
    }
}

impl fmt::Display for HardwareInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}c/{}t), {} RAM, {}",
            self.cpu_model,
            self.cpu_cores,
            self.cpu_threads,
            format_size(self.memory_total),
            self.firmware
        )
    }
}

/// Fixed facts about one rehearsal disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskInfo {
    pub device: &'static str,
    pub model: &'static str,
    pub size_bytes: u64,
    pub is_ssd: bool,
    pub partitions: u32,
}

impl fmt::Display for DiskInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.device,
            self.model,
            format_size(self.size_bytes)
        )
    }
}

/// Return the rehearsal machine's disk inventory (always one NVMe drive).
pub fn detect_disks() -> Vec<DiskInfo> {
    vec![DiskInfo {
        device: "/dev/nvme0n1",
        model: "Samsung SSD 980 PRO",
        size_bytes: 1_000_204_886_016,
        is_ssd: true,
        partitions: 0,
    }]
}

/// Human-readable binary size (KiB/MiB/GiB/TiB).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
