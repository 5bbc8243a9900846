// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Boot-session state for the CSE hooks
//!
//! One `CseContext` is owned by the boot orchestrator for the whole boot
//! session. Hooks borrow it mutably, so there is no shared global state.

use cse_common::{CseConfig, LogBuffer};
use cse_hal::{HeciInterface, PciConfigInterface, RegionStoreInterface, SidebandInterface};
use cse_mkhi::HeciChannel;

use crate::fuse::FuseState;

/// CSE state and hardware handles for one boot session
pub struct CseContext<H, S, R>
where
    H: HeciInterface,
    S: RegionStoreInterface,
    R: PciConfigInterface + SidebandInterface,
{
    pub(crate) channel: HeciChannel<H>,
    pub(crate) store: S,
    pub(crate) regs: R,
    pub(crate) config: CseConfig,
    pub(crate) fuse_state: FuseState,
    pub(crate) locked_down: bool,
    pub(crate) log: LogBuffer,
}

impl<H, S, R> CseContext<H, S, R>
where
    H: HeciInterface,
    S: RegionStoreInterface,
    R: PciConfigInterface + SidebandInterface,
{
    /// Create a context; fuse state starts unknown and the channel enabled
    pub fn new(heci: H, store: S, regs: R, config: CseConfig) -> Self {
        Self {
            channel: HeciChannel::new(heci),
            store,
            regs,
            config,
            fuse_state: FuseState::Unknown,
            locked_down: false,
            log: LogBuffer::with_min_level(config.console.min_level),
        }
    }

    /// Fuse state as last resolved
    pub const fn fuse_state(&self) -> FuseState {
        self.fuse_state
    }

    /// Check if lockdown has run
    pub const fn is_locked_down(&self) -> bool {
        self.locked_down
    }

    /// Configuration
    pub const fn config(&self) -> &CseConfig {
        &self.config
    }

    /// MKHI channel
    pub const fn channel(&self) -> &HeciChannel<H> {
        &self.channel
    }

    /// MKHI channel, mutably
    pub fn channel_mut(&mut self) -> &mut HeciChannel<H> {
        &mut self.channel
    }

    /// Region store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Register backend
    pub const fn regs(&self) -> &R {
        &self.regs
    }

    /// Diagnostic log
    pub const fn log(&self) -> &LogBuffer {
        &self.log
    }

    /// Diagnostic log, mutably
    pub fn log_mut(&mut self) -> &mut LogBuffer {
        &mut self.log
    }
}
