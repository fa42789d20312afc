//! Installation phase table
//!
//! This module is the single source of truth for the rehearsal sequence:
//! which phases exist, in what order, what each one reports while it runs,
//! and how long each sub-step takes. Everything here is fixed data: the
//! rehearsal never varies its behavior based on the host system.
//!
//! # Phase Flow
//!
//! ```text
//! Idle
//!     ↓
//! DetectHardware → DetectDisks → DetectNetwork
//!     ↓
//! Partition → Format → Mount
//!     ↓
//! Download → Install → Configure → Bootloader
//!     ↓
//! NetworkSetup → UserSetup → Services → Optimize → Cleanup
//!     ↓
//! Complete
//!
//! (Any non-terminal phase can transition to Failed)
//! ```

// Library API - some accessors are exported for external use but not yet consumed by the binary
#![allow(dead_code)]

use std::fmt;
use std::time::Duration;

/// Rehearsal phases in sequential order.
///
/// Phases are ordered and only progress forward (except for the failure
/// transition). Each active phase owns a fixed sub-step table and a
/// cumulative progress milestone reached when the phase completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InstallPhase {
    /// Waiting for the user to start a run
    Idle = 0,

    /// Probe CPU, memory, firmware, and network interfaces
    DetectHardware = 1,

    /// Scan block devices
    DetectDisks = 2,

    /// Check connectivity to the mirror network
    DetectNetwork = 3,

    /// Write the GPT partition layout
    Partition = 4,

    /// Create filesystems on the new partitions
    Format = 5,

    /// Mount the target tree under /mnt
    Mount = 6,

    /// Fetch the base package set
    Download = 7,

    /// Install the base system
    Install = 8,

    /// Configure the installed system
    Configure = 9,

    /// Install and configure GRUB
    Bootloader = 10,

    /// Bring up networking on the target
    NetworkSetup = 11,

    /// Create user accounts
    UserSetup = 12,

    /// Enable system services
    Services = 13,

    /// Apply performance tuning
    Optimize = 14,

    /// Unmount and tidy up
    Cleanup = 15,

    /// Run finished successfully (terminal state)
    Complete = 16,

    /// Run failed (terminal state)
    Failed = 255,
}

// Sub-step tables. The labels are the fixed strings the rehearsal walks
// through; none of them are ever executed.

const DETECT_HARDWARE_STEPS: &[&str] = &[
    "Probing CPU model and topology",
    "Reading memory map",
    "Querying storage controllers",
    "Checking UEFI firmware support",
    "Enumerating network interfaces",
];

const DETECT_DISK_STEPS: &[&str] = &[
    "Scanning block devices",
    "Reading /dev/nvme0n1 identity data",
];

const DETECT_NETWORK_STEPS: &[&str] = &[
    "Bringing up network interfaces",
    "Checking mirror reachability",
];

const PARTITION_STEPS: &[&str] = &[
    "sgdisk --zap-all /dev/nvme0n1",
    "sgdisk --new=1:0:+512M /dev/nvme0n1",
    "sgdisk --new=2:0:+4G /dev/nvme0n1",
    "sgdisk --new=3:0:+128G /dev/nvme0n1",
    "sgdisk --new=4:0:0 /dev/nvme0n1",
    "sgdisk --typecode=1:ef00 /dev/nvme0n1",
    "sgdisk --typecode=2:8200 /dev/nvme0n1",
    "sgdisk --typecode=3:8300 /dev/nvme0n1",
    "sgdisk --typecode=4:8300 /dev/nvme0n1",
];

const FORMAT_STEPS: &[&str] = &[
    "mkfs.vfat -F32 -n EFI /dev/nvme0n1p1",
    "mkswap /dev/nvme0n1p2",
    "mkfs.ext4 -L ROOT /dev/nvme0n1p3",
    "mkfs.ext4 -L HOME /dev/nvme0n1p4",
];

const MOUNT_STEPS: &[&str] = &[
    "mount /dev/nvme0n1p3 /mnt",
    "mkdir -p /mnt/boot/efi",
    "mount /dev/nvme0n1p1 /mnt/boot/efi",
    "mkdir -p /mnt/home",
    "mount /dev/nvme0n1p4 /mnt/home",
    "swapon /dev/nvme0n1p2",
];

const DOWNLOAD_STEPS: &[&str] = &[
    "base",
    "base-devel",
    "linux",
    "linux-firmware",
    "linux-headers",
    "networkmanager",
    "dhcpcd",
    "wpa_supplicant",
    "systemd",
    "systemd-sysvcompat",
    "grub",
    "efibootmgr",
    "sudo",
    "bash-completion",
    "curl",
    "wget",
    "git",
    "vim",
    "nano",
];

const INSTALL_STEPS: &[&str] = &[
    "Installing base system",
    "Configuring locales",
    "Setting up timezone",
    "Configuring hostname",
    "Creating users",
    "Setting up services",
    "Installing bootloader",
    "Configuring network",
    "Setting up security",
    "Installing desktop environment",
];

const CONFIGURE_STEPS: &[&str] = &[
    "Configuring /etc/fstab",
    "Setting up locale settings",
    "Configuring timezone",
    "Setting hostname",
    "Configuring network",
    "Setting up user accounts",
    "Configuring sudo access",
    "Setting up firewall",
    "Configuring services",
    "Installing additional packages",
];

const BOOTLOADER_STEPS: &[&str] = &[
    "Installing GRUB",
    "Configuring GRUB",
    "Installing to EFI",
    "Creating boot entries",
    "Testing boot configuration",
];

const NETWORK_SETUP_STEPS: &[&str] = &[
    "Starting NetworkManager",
    "Configuring WiFi",
    "Setting up ethernet",
    "Configuring firewall",
    "Setting up VPN",
];

const USER_SETUP_STEPS: &[&str] = &[
    "Creating user account",
    "Setting user permissions",
    "Configuring user groups",
    "Setting up home directory",
    "Configuring shell",
];

const SERVICE_STEPS: &[&str] = &[
    "Starting systemd services",
    "Configuring SSH",
    "Setting up firewall services",
    "Configuring printer services",
    "Setting up backup services",
];

const OPTIMIZE_STEPS: &[&str] = &[
    "Optimizing SSD performance",
    "Tuning kernel parameters",
    "Configuring systemd-analyze",
    "Setting up performance governor",
    "Optimizing memory management",
    "Configuring I/O scheduler",
    "Setting up CPU frequency scaling",
    "Optimizing network parameters",
];

const CLEANUP_STEPS: &[&str] = &[
    "Unmounting temporary directories",
    "Removing temporary files",
    "Updating package databases",
    "Generating initramfs",
    "Updating system database",
];

/// The active phases a run walks through, in order.
const SEQUENCE: &[InstallPhase] = &[
    InstallPhase::DetectHardware,
    InstallPhase::DetectDisks,
    InstallPhase::DetectNetwork,
    InstallPhase::Partition,
    InstallPhase::Format,
    InstallPhase::Mount,
    InstallPhase::Download,
    InstallPhase::Install,
    InstallPhase::Configure,
    InstallPhase::Bootloader,
    InstallPhase::NetworkSetup,
    InstallPhase::UserSetup,
    InstallPhase::Services,
    InstallPhase::Optimize,
    InstallPhase::Cleanup,
];

impl InstallPhase {
    /// Returns the numeric order of this phase (0-16, 255 for Failed)
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Returns true if this is a terminal state (Complete or Failed)
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    /// Returns true if this phase does work during a run
    /// (everything except Idle and the terminal states)
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle | Self::Complete | Self::Failed)
    }

    /// Returns the next phase in the sequence, or None at a terminal state
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::DetectHardware),
            Self::DetectHardware => Some(Self::DetectDisks),
            Self::DetectDisks => Some(Self::DetectNetwork),
            Self::DetectNetwork => Some(Self::Partition),
            Self::Partition => Some(Self::Format),
            Self::Format => Some(Self::Mount),
            Self::Mount => Some(Self::Download),
            Self::Download => Some(Self::Install),
            Self::Install => Some(Self::Configure),
            Self::Configure => Some(Self::Bootloader),
            Self::Bootloader => Some(Self::NetworkSetup),
            Self::NetworkSetup => Some(Self::UserSetup),
            Self::UserSetup => Some(Self::Services),
            Self::Services => Some(Self::Optimize),
            Self::Optimize => Some(Self::Cleanup),
            Self::Cleanup => Some(Self::Complete),
            Self::Complete | Self::Failed => None,
        }
    }

    /// Returns the previous phase in the sequence, or None at Idle or Failed
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::DetectHardware => Some(Self::Idle),
            Self::DetectDisks => Some(Self::DetectHardware),
            Self::DetectNetwork => Some(Self::DetectDisks),
            Self::Partition => Some(Self::DetectNetwork),
            Self::Format => Some(Self::Partition),
            Self::Mount => Some(Self::Format),
            Self::Download => Some(Self::Mount),
            Self::Install => Some(Self::Download),
            Self::Configure => Some(Self::Install),
            Self::Bootloader => Some(Self::Configure),
            Self::NetworkSetup => Some(Self::Bootloader),
            Self::UserSetup => Some(Self::NetworkSetup),
            Self::Services => Some(Self::UserSetup),
            Self::Optimize => Some(Self::Services),
            Self::Cleanup => Some(Self::Optimize),
            Self::Complete => Some(Self::Cleanup),
            Self::Idle | Self::Failed => None,
        }
    }

    /// Short human-readable label for phase lists
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::DetectHardware => "Detect hardware",
            Self::DetectDisks => "Detect disks",
            Self::DetectNetwork => "Detect network",
            Self::Partition => "Partition disk",
            Self::Format => "Format partitions",
            Self::Mount => "Mount filesystems",
            Self::Download => "Download packages",
            Self::Install => "Install system",
            Self::Configure => "Configure system",
            Self::Bootloader => "Install bootloader",
            Self::NetworkSetup => "Set up network",
            Self::UserSetup => "Set up users",
            Self::Services => "Configure services",
            Self::Optimize => "Optimize system",
            Self::Cleanup => "Clean up",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Status line announced when the phase begins
    pub const fn status_text(self) -> &'static str {
        match self {
            Self::Idle => "Ready - press Enter to begin",
            Self::DetectHardware => "Detecting hardware...",
            Self::DetectDisks => "Scanning disk drives...",
            Self::DetectNetwork => "Testing network connectivity...",
            Self::Partition => "Creating partitions...",
            Self::Format => "Formatting partitions...",
            Self::Mount => "Mounting filesystems...",
            Self::Download => "Downloading Arch Linux...",
            Self::Install => "Installing system packages...",
            Self::Configure => "Configuring system...",
            Self::Bootloader => "Installing bootloader...",
            Self::NetworkSetup => "Configuring network...",
            Self::UserSetup => "Setting up users...",
            Self::Services => "Configuring services...",
            Self::Optimize => "Optimizing system...",
            Self::Cleanup => "Cleaning up...",
            Self::Complete => "Installation complete!",
            Self::Failed => "ERROR: Check logs",
        }
    }

    /// Fixed sub-step labels for this phase (empty outside the active range)
    pub const fn steps(self) -> &'static [&'static str] {
        match self {
            Self::DetectHardware => DETECT_HARDWARE_STEPS,
            Self::DetectDisks => DETECT_DISK_STEPS,
            Self::DetectNetwork => DETECT_NETWORK_STEPS,
            Self::Partition => PARTITION_STEPS,
            Self::Format => FORMAT_STEPS,
            Self::Mount => MOUNT_STEPS,
            Self::Download => DOWNLOAD_STEPS,
            Self::Install => INSTALL_STEPS,
            Self::Configure => CONFIGURE_STEPS,
            Self::Bootloader => BOOTLOADER_STEPS,
            Self::NetworkSetup => NETWORK_SETUP_STEPS,
            Self::UserSetup => USER_SETUP_STEPS,
            Self::Services => SERVICE_STEPS,
            Self::Optimize => OPTIMIZE_STEPS,
            Self::Cleanup => CLEANUP_STEPS,
            Self::Idle | Self::Complete | Self::Failed => &[],
        }
    }

    /// Base delay between sub-steps of this phase
    pub const fn step_delay(self) -> Duration {
        let ms: u64 = match self {
            Self::DetectHardware => 700,
            Self::DetectDisks => 500,
            Self::DetectNetwork => 1500,
            Self::Partition => 500,
            Self::Format => 800,
            Self::Mount => 600,
            Self::Download => 200,
            Self::Install => 800,
            Self::Configure => 600,
            Self::Bootloader => 700,
            Self::NetworkSetup => 500,
            Self::UserSetup => 400,
            Self::Services => 500,
            Self::Optimize => 600,
            Self::Cleanup => 400,
            Self::Idle | Self::Complete | Self::Failed => 0,
        };
        Duration::from_millis(ms)
    }

    /// Cumulative overall progress reached when this phase completes
    pub const fn milestone(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::DetectHardware => 5,
            Self::DetectDisks => 10,
            Self::DetectNetwork => 15,
            Self::Partition => 30,
            Self::Format => 40,
            Self::Mount => 50,
            Self::Download => 65,
            Self::Install => 75,
            Self::Configure => 80,
            Self::Bootloader => 82,
            Self::NetworkSetup => 84,
            Self::UserSetup => 86,
            Self::Services => 88,
            Self::Optimize => 95,
            Self::Cleanup => 100,
            Self::Complete => 100,
            // Progress is meaningless for the failed state
            Self::Failed => 0,
        }
    }

    /// The (start, end) overall-progress span this phase covers
    pub fn progress_span(self) -> (u8, u8) {
        let start = self.previous().map_or(0, Self::milestone);
        (start, self.milestone())
    }

    /// Overall progress after completing the given 0-based sub-step.
    ///
    /// Interpolates linearly inside the phase's milestone span, so progress
    /// is monotonically non-decreasing across a full run.
    pub fn progress_at(self, step_index: usize) -> u8 {
        let steps = self.steps();
        if steps.is_empty() {
            return self.milestone();
        }
        let (start, end) = self.progress_span();
        let done = (step_index + 1).min(steps.len()) as u32;
        let span = u32::from(end - start);
        start + (span * done / steps.len() as u32) as u8
    }

    /// The active phases a run walks through, in order
    pub const fn sequence() -> &'static [Self] {
        SEQUENCE
    }

    /// Total number of sub-steps in a full run
    pub fn total_steps() -> usize {
        SEQUENCE.iter().map(|p| p.steps().len()).sum()
    }
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
