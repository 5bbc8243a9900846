// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Boot-state hooks
//!
//! The platform's boot sequencer walks a fixed list of states, each with an
//! entry and an exit phase. The CSE registers two hooks:
//!
//! | State      | Phase | Hook                          |
//! |------------|-------|-------------------------------|
//! | `DevInit`  | entry | resolve the FPF fuse state    |
//! | `DevInit`  | exit  | log the CSE firmware version  |
//!
//! Lockdown is not a boot-state hook; the platform calls
//! [`CseContext::lockdown`] itself when it finalizes.

use cse_common::{log_debug, log_error, Version};
use cse_hal::{HeciInterface, PciConfigInterface, RegionStoreInterface, SidebandInterface};

use crate::context::CseContext;
use crate::fuse::FuseState;

const MODULE: &str = "cse";

// ============================================================================
// Boot States
// ============================================================================

/// Boot sequencer states, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum BootStateId {
    /// Before device tree construction
    PreDevice = 0,
    /// Device enumeration
    DevEnumerate = 1,
    /// Resource allocation
    DevResources = 2,
    /// Device enable
    DevEnable = 3,
    /// Device initialization
    DevInit = 4,
    /// After device initialization
    PostDevice = 5,
    /// S3 resume check
    OsResumeCheck = 6,
    /// S3 resume
    OsResume = 7,
    /// Table generation
    WriteTables = 8,
    /// Payload load
    PayloadLoad = 9,
    /// Payload boot
    PayloadBoot = 10,
}

/// Phase within a boot state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    /// Before the state runs
    OnEntry,
    /// After the state runs
    OnExit,
}

// ============================================================================
// Hook Table
// ============================================================================

/// Operations a boot hook may perform on the CSE context
pub trait CseBootOps {
    /// Resolve and cache the FPF fuse state
    fn resolve_fuse_state(&mut self) -> FuseState;

    /// Query and log the CSE firmware version
    fn dump_cse_version(&mut self) -> Option<Version>;
}

/// A hook bound to a boot state and phase
#[derive(Clone, Copy)]
pub struct BootStateHook {
    /// State the hook is bound to
    pub state: BootStateId,
    /// Phase the hook is bound to
    pub phase: BootPhase,
    /// Hook name for diagnostics
    pub name: &'static str,
    /// Hook body
    pub run: fn(&mut dyn CseBootOps),
}

impl core::fmt::Debug for BootStateHook {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BootStateHook")
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("name", &self.name)
            .finish()
    }
}

fn fpf_blown(ctx: &mut dyn CseBootOps) {
    ctx.resolve_fuse_state();
}

fn dump_cse_version(ctx: &mut dyn CseBootOps) {
    ctx.dump_cse_version();
}

/// CSE hooks, in registration order
pub static CSE_BOOT_HOOKS: [BootStateHook; 2] = [
    BootStateHook {
        state: BootStateId::DevInit,
        phase: BootPhase::OnEntry,
        name: "fpf_blown",
        run: fpf_blown,
    },
    BootStateHook {
        state: BootStateId::DevInit,
        phase: BootPhase::OnExit,
        name: "dump_cse_version",
        run: dump_cse_version,
    },
];

/// Run every CSE hook bound to `state`/`phase`, in table order
///
/// Returns the number of hooks run.
pub fn run_boot_state(ctx: &mut dyn CseBootOps, state: BootStateId, phase: BootPhase) -> usize {
    let mut ran = 0;
    for hook in CSE_BOOT_HOOKS
        .iter()
        .filter(|h| h.state == state && h.phase == phase)
    {
        (hook.run)(ctx);
        ran += 1;
    }
    ran
}

// ============================================================================
// Version Dump
// ============================================================================

impl<H, S, R> CseContext<H, S, R>
where
    H: HeciInterface,
    S: RegionStoreInterface,
    R: PciConfigInterface + SidebandInterface,
{
    /// Query the CSE firmware version and log it
    ///
    /// Talking to the CSE here costs noticeable boot time, so the query only
    /// runs when the serial console is enabled. Failures are logged and
    /// otherwise ignored.
    pub fn dump_cse_version(&mut self) -> Option<Version> {
        if !self.config.verbose() {
            return None;
        }

        match self.channel.fw_version() {
            Ok(resp) => {
                log_debug!(self.log, MODULE, "ME: Version: {}", resp.code);
                Some(resp.code)
            }
            Err(e) => {
                log_error!(self.log, MODULE, "failed to get ME version: {}", e);
                None
            }
        }
    }
}

impl<H, S, R> CseBootOps for CseContext<H, S, R>
where
    H: HeciInterface,
    S: RegionStoreInterface,
    R: PciConfigInterface + SidebandInterface,
{
    fn resolve_fuse_state(&mut self) -> FuseState {
        CseContext::resolve_fuse_state(self)
    }

    fn dump_cse_version(&mut self) -> Option<Version> {
        CseContext::dump_cse_version(self)
    }
}
