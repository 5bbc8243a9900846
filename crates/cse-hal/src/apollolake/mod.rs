// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Apollo Lake register access
//!
//! Memory-mapped access to the two register spaces the CSE layer touches:
//!
//! - PCI configuration space through the ECAM window (CSE status registers)
//! - Private configuration registers through the P2SB sideband window
//!   (PSF3 function disable for HECI1)
//!
//! # Safety
//!
//! Both windows are fixed by the platform memory map and mapped uncached by
//! the time ramstage runs. Accesses are 32-bit, aligned and volatile.

use core::ptr::{read_volatile, write_volatile};
use core::sync::atomic::{compiler_fence, Ordering};

use cse_common::config::{PciDevFn, PlatformConfig};

use crate::error::{HalError, HalResult};
use crate::traits::{PciConfigInterface, SidebandInterface};

/// Size of one function's config space
const PCI_CONFIG_SPACE_SIZE: u16 = 0x1000;

/// Apollo Lake register backend
pub struct ApollolakeRegisters {
    config: PlatformConfig,
}

impl ApollolakeRegisters {
    /// Create a backend for the given register layout
    #[must_use]
    pub const fn new(config: PlatformConfig) -> Self {
        Self { config }
    }

    /// Address of a PCI config register
    #[must_use]
    pub const fn config_address(&self, dev: PciDevFn, offset: u16) -> u32 {
        self.config.ecam_base + dev.ecam_offset() + offset as u32
    }

    /// Address of a sideband register
    #[must_use]
    pub const fn pcr_address(&self, pid: u8, offset: u16) -> u32 {
        self.config.p2sb_bar | ((pid as u32) << 16) | offset as u32
    }

    fn check_config_offset(offset: u16) -> HalResult<()> {
        if offset % 4 != 0 || offset >= PCI_CONFIG_SPACE_SIZE {
            return Err(HalError::InvalidParameter);
        }
        Ok(())
    }

    fn check_pcr_offset(offset: u16) -> HalResult<()> {
        // Every u16 offset fits the 64 KiB port window
        if offset % 4 != 0 {
            return Err(HalError::InvalidParameter);
        }
        Ok(())
    }
}

impl Default for ApollolakeRegisters {
    fn default() -> Self {
        Self::new(PlatformConfig::DEFAULT)
    }
}

impl PciConfigInterface for ApollolakeRegisters {
    fn read_config32(&self, dev: PciDevFn, offset: u16) -> HalResult<u32> {
        Self::check_config_offset(offset)?;
        let addr = self.config_address(dev, offset);
        // SAFETY: `addr` lies within the ECAM window configured in
        // PlatformConfig and is dword aligned (checked above). Config reads
        // have no side effects on the CSE status registers.
        let value = unsafe { read_volatile(addr as *const u32) };
        Ok(value)
    }
}

impl SidebandInterface for ApollolakeRegisters {
    fn read32(&self, pid: u8, offset: u16) -> HalResult<u32> {
        Self::check_pcr_offset(offset)?;
        let addr = self.pcr_address(pid, offset);
        // SAFETY: `addr` lies within the P2SB private config window for port
        // `pid`, dword aligned (checked above).
        let value = unsafe { read_volatile(addr as *const u32) };
        Ok(value)
    }

    fn write32(&mut self, pid: u8, offset: u16, value: u32) -> HalResult<()> {
        Self::check_pcr_offset(offset)?;
        let addr = self.pcr_address(pid, offset);
        // SAFETY: as in read32; the caller holds `&mut self`, so no other
        // write through this backend is in flight.
        unsafe { write_volatile(addr as *mut u32, value) };
        compiler_fence(Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cse_common::constants::{
        PCH_DEV_CSE, PCI_ME_HFSTS1, PCR_PSFX_T0_SHDW_PCIEN, PID_PSF3, PSF3_BASE_ADDRESS,
    };

    #[test]
    fn test_hfsts1_address() {
        let regs = ApollolakeRegisters::default();
        assert_eq!(regs.config_address(PCH_DEV_CSE, PCI_ME_HFSTS1), 0xE007_8040);
    }

    #[test]
    fn test_psf3_fundis_address() {
        let regs = ApollolakeRegisters::default();
        assert_eq!(
            regs.pcr_address(PID_PSF3, PSF3_BASE_ADDRESS + PCR_PSFX_T0_SHDW_PCIEN),
            0xD0C6_101C
        );
    }

    #[test]
    fn test_unaligned_offsets_rejected() {
        assert_eq!(
            ApollolakeRegisters::check_config_offset(0x41),
            Err(HalError::InvalidParameter)
        );
        assert_eq!(
            ApollolakeRegisters::check_config_offset(0x1000),
            Err(HalError::InvalidParameter)
        );
        assert_eq!(
            ApollolakeRegisters::check_pcr_offset(0x1E),
            Err(HalError::InvalidParameter)
        );
        assert!(ApollolakeRegisters::check_pcr_offset(0x101C).is_ok());
    }
}
