// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Build-time configuration for the CSE layer
//!
//! All configuration is compile-time. Boards override the defaults by
//! constructing their own `CseConfig` constant.

use crate::constants::{
    FPF_STATUS_FMAP, FUSE_LOCK_FILE, P2SB_BAR, PCH_DEV_CSE, PCIE_ECAM_BASE, PSF3_BASE_ADDRESS,
};
use crate::log::LogLevel;

/// Top-level configuration
#[derive(Debug, Clone, Copy)]
pub struct CseConfig {
    /// Console configuration
    pub console: ConsoleConfig,
    /// FPF fuse cache configuration
    pub fpf: FpfConfig,
    /// Platform register layout
    pub platform: PlatformConfig,
}

impl CseConfig {
    /// Default configuration (serial console enabled, Apollo Lake layout)
    pub const DEFAULT: Self = Self {
        console: ConsoleConfig::DEFAULT,
        fpf: FpfConfig::DEFAULT,
        platform: PlatformConfig::DEFAULT,
    };

    /// Production configuration: no serial console, errors only
    pub const QUIET: Self = Self {
        console: ConsoleConfig::QUIET,
        fpf: FpfConfig::DEFAULT,
        platform: PlatformConfig::DEFAULT,
    };

    /// Check if verbose diagnostics (the version query) should run
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.console.serial_enabled
    }
}

impl Default for CseConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Console configuration
#[derive(Debug, Clone, Copy)]
pub struct ConsoleConfig {
    /// Serial console is wired up; enables costly diagnostic queries
    pub serial_enabled: bool,
    /// Minimum level recorded in the log buffer
    pub min_level: LogLevel,
}

impl ConsoleConfig {
    /// Default console configuration
    pub const DEFAULT: Self = Self {
        serial_enabled: true,
        min_level: LogLevel::Debug,
    };

    /// Console disabled
    pub const QUIET: Self = Self {
        serial_enabled: false,
        min_level: LogLevel::Error,
    };
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// FPF (field programmable fuse) cache configuration
#[derive(Debug, Clone, Copy)]
pub struct FpfConfig {
    /// FMAP area holding the cached fuse byte
    pub region_name: &'static str,
    /// CSE filesystem path of the fuse lock file
    pub lock_file: &'static str,
}

impl FpfConfig {
    /// Default FPF configuration
    pub const DEFAULT: Self = Self {
        region_name: FPF_STATUS_FMAP,
        lock_file: FUSE_LOCK_FILE,
    };
}

impl Default for FpfConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// PCI location of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PciDevFn {
    /// Bus number
    pub bus: u8,
    /// Device number (0-31)
    pub device: u8,
    /// Function number (0-7)
    pub function: u8,
}

impl PciDevFn {
    /// Create a new bus/device/function triple
    #[must_use]
    pub const fn new(bus: u8, device: u8, function: u8) -> Self {
        Self {
            bus,
            device,
            function,
        }
    }

    /// Offset of this function's 4 KiB config space within ECAM
    #[must_use]
    pub const fn ecam_offset(&self) -> u32 {
        ((self.bus as u32) << 20)
            | (((self.device & 0x1F) as u32) << 15)
            | (((self.function & 0x07) as u32) << 12)
    }
}

/// Platform register layout
#[derive(Debug, Clone, Copy)]
pub struct PlatformConfig {
    /// PCIe ECAM (MMCONF) base address
    pub ecam_base: u32,
    /// P2SB sideband (PCR) base address
    pub p2sb_bar: u32,
    /// PSF3 register block offset for the HECI1 shadow registers
    pub psf3_base: u16,
    /// PCI location of the CSE (HECI1) function
    pub cse_dev: PciDevFn,
}

impl PlatformConfig {
    /// Apollo Lake register layout
    pub const DEFAULT: Self = Self {
        ecam_base: PCIE_ECAM_BASE,
        p2sb_bar: P2SB_BAR,
        psf3_base: PSF3_BASE_ADDRESS,
        cse_dev: PCH_DEV_CSE,
    };
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
