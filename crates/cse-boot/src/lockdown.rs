// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! HECI lockdown
//!
//! Before handing off, firmware dumps the CSE status registers and hides the
//! HECI1 PCI function by setting FUNDIS in its PSF3 shadow register. After
//! that the CSE cannot be reached for the rest of the boot session.
//!
//! The status registers are read through PCI config space, not MKHI, so the
//! dump works even when the CSE no longer answers messages.

use cse_common::constants::{
    HFSTS1_MFG_MODE, PCI_ME_HFSTS, PCR_PSFX_T0_SHDW_PCIEN, PCR_PSFX_T0_SHDW_PCIEN_FUNDIS, PID_PSF3,
};
use cse_common::{log_crit, log_debug, log_error, log_info, Error};
use cse_hal::{HeciInterface, PciConfigInterface, RegionStoreInterface, SidebandInterface};

use crate::context::CseContext;
use crate::fuse::FuseState;

const MODULE: &str = "cse";

/// Number of host firmware status registers
pub const HFSTS_COUNT: usize = PCI_ME_HFSTS.len();

/// Decoded CSE status captured at lockdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CseStatusReport {
    /// HFSTS1..HFSTS6; a register that could not be read reads as 0
    pub hfsts: [u32; HFSTS_COUNT],
    /// HFSTS1 bit 4
    pub manufacturing_mode: bool,
    /// Fuse state at the time of the dump
    pub fuse_state: FuseState,
}

impl<H, S, R> CseContext<H, S, R>
where
    H: HeciInterface,
    S: RegionStoreInterface,
    R: PciConfigInterface + SidebandInterface,
{
    /// Read and log the CSE status registers
    pub fn dump_cse_state(&mut self) -> CseStatusReport {
        let dev = self.config.platform.cse_dev;
        let mut hfsts = [0u32; HFSTS_COUNT];

        for (index, (&offset, slot)) in PCI_ME_HFSTS.iter().zip(hfsts.iter_mut()).enumerate() {
            match self.regs.read_config32(dev, offset) {
                Ok(value) => {
                    *slot = value;
                    log_debug!(self.log, MODULE, "CSE FWSTS{}: 0x{:08x}", index + 1, value);
                }
                Err(e) => {
                    log_error!(self.log, MODULE, "CSE FWSTS{}: read failed: {}", index + 1, e);
                }
            }
        }

        let manufacturing_mode = hfsts[0] & HFSTS1_MFG_MODE != 0;
        log_debug!(
            self.log,
            MODULE,
            "ME: Manufacturing Mode      : {}",
            if manufacturing_mode { "YES" } else { "NO" }
        );
        log_debug!(self.log, MODULE, "ME: FPF status              : {}", self.fuse_state);

        CseStatusReport {
            hfsts,
            manufacturing_mode,
            fuse_state: self.fuse_state,
        }
    }

    /// Dump CSE state, then disable HECI1
    ///
    /// Runs once per boot session. A second call fails with
    /// [`Error::InvalidState`] and touches no registers. The channel is
    /// disabled even when the FUNDIS write fails.
    pub fn lockdown(&mut self) -> Result<CseStatusReport, Error> {
        if self.locked_down {
            log_error!(self.log, MODULE, "lockdown already done");
            return Err(Error::InvalidState);
        }
        self.locked_down = true;

        let report = self.dump_cse_state();

        let pcien = self.config.platform.psf3_base + PCR_PSFX_T0_SHDW_PCIEN;
        let result = self
            .regs
            .or32(PID_PSF3, pcien, PCR_PSFX_T0_SHDW_PCIEN_FUNDIS);
        self.channel.disable();

        match result {
            Ok(()) => {
                log_info!(self.log, MODULE, "HECI1 disabled");
                Ok(report)
            }
            Err(e) => {
                log_crit!(self.log, MODULE, "failed to disable HECI1: {}", e);
                Err(e.into())
            }
        }
    }
}
