// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Field-programmable fuse (FPF) state cache
//!
//! Whether the SoC configuration lock fuse is blown is asked of the CSE once
//! and remembered in a one-byte flash region so later boots skip the query.
//!
//! # Cache Encoding
//!
//! ```text
//! 0xff  unknown (erased flash)
//! 0xfe  unfused
//! 0xfc  fused
//! ```
//!
//! Leaving `0xff` only clears bits, so the result is programmed without an
//! erase. Any other byte is treated as a miss.
//!
//! # Resolution
//!
//! 1. Locate the cache region; a missing region only disables caching.
//! 2. A cached fused/unfused byte is returned without talking to the CSE.
//! 3. Otherwise READ_FILE the lock fuse (1 byte, hardware value).
//!    A failed query leaves the state unknown and writes nothing.
//! 4. Store the answer; a failed write is logged, never fatal.

use core::fmt;

use cse_common::{log_crit, log_debug, log_error, log_info, log_warn};
use cse_hal::{HeciInterface, PciConfigInterface, Region, RegionStoreInterface, SidebandInterface};
use cse_mkhi::{MkhiError, ReadFileFlags};

use crate::context::CseContext;

const MODULE: &str = "fpf";

// ============================================================================
// Fuse State
// ============================================================================

/// Cached state of the SoC configuration lock fuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FuseState {
    /// Fuse blown
    Fused = 0xFC,
    /// Fuse intact
    Unfused = 0xFE,
    /// Not yet determined
    #[default]
    Unknown = 0xFF,
}

impl FuseState {
    /// Decode a cache byte; unrecognized values yield `None`
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0xFC => Some(Self::Fused),
            0xFE => Some(Self::Unfused),
            0xFF => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Cache byte
    #[must_use]
    pub const fn as_raw(&self) -> u8 {
        *self as u8
    }

    /// Interpret the byte the CSE returns for the lock fuse file
    #[must_use]
    pub const fn from_lock_byte(byte: u8) -> Self {
        if byte == 1 {
            Self::Fused
        } else {
            Self::Unfused
        }
    }

    /// Check if the state has been determined
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get the state name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fused => "fused",
            Self::Unfused => "unfused",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FuseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Resolution
// ============================================================================

impl<H, S, R> CseContext<H, S, R>
where
    H: HeciInterface,
    S: RegionStoreInterface,
    R: PciConfigInterface + SidebandInterface,
{
    /// Determine the fuse state, from the cache when possible
    ///
    /// Never fails: an undeterminable state is reported as
    /// [`FuseState::Unknown`]. Once known, the state is kept in the context
    /// and returned directly on later calls.
    pub fn resolve_fuse_state(&mut self) -> FuseState {
        if self.fuse_state.is_known() {
            return self.fuse_state;
        }

        let region_name = self.config.fpf.region_name;
        let region = match self.store.locate(region_name) {
            Ok(region) => Some(region),
            Err(e) => {
                log_warn!(self.log, MODULE, "{} not available, not caching: {}", region_name, e);
                None
            }
        };

        if let Some(region) = region {
            if let Some(state) = self.load_cached(&region) {
                log_debug!(self.log, MODULE, "cached FPF state: {}", state);
                self.fuse_state = state;
                return state;
            }
        }

        let state = match self.query_fuse_lock() {
            Ok(state) => state,
            Err(e) => {
                log_error!(self.log, MODULE, "failed to read {}: {}", self.config.fpf.lock_file, e);
                return FuseState::Unknown;
            }
        };
        log_info!(self.log, MODULE, "FPF state from CSE: {}", state);
        self.fuse_state = state;

        if let Some(region) = region {
            self.save_cached(&region, state);
        }

        state
    }

    fn load_cached(&mut self, region: &Region) -> Option<FuseState> {
        let mut buf = [0u8; 1];
        match self.store.read_at(region, 0, &mut buf) {
            Ok(1) => {}
            Ok(n) => {
                log_warn!(self.log, MODULE, "failed to load cached FPF value: short read ({})", n);
                return None;
            }
            Err(e) => {
                log_warn!(self.log, MODULE, "failed to load cached FPF value: {}", e);
                return None;
            }
        }

        match FuseState::from_raw(buf[0]) {
            Some(FuseState::Unknown) => None,
            Some(state) => Some(state),
            None => {
                log_warn!(self.log, MODULE, "ignoring cached FPF value 0x{:02x}", buf[0]);
                None
            }
        }
    }

    fn query_fuse_lock(&mut self) -> Result<FuseState, MkhiError> {
        let mut fuse = [0u8; 1];
        let n = self
            .channel
            .read_file(self.config.fpf.lock_file, 0, &mut fuse, ReadFileFlags::HW)?;
        if n == 0 {
            return Err(MkhiError::Truncated {
                expected: 1,
                received: 0,
            });
        }
        Ok(FuseState::from_lock_byte(fuse[0]))
    }

    fn save_cached(&mut self, region: &Region, state: FuseState) {
        match self.store.write_at(region, 0, &[state.as_raw()]) {
            Ok(1) => {}
            Ok(n) => log_crit!(self.log, MODULE, "failed to save FPF state: short write ({})", n),
            Err(e) => log_crit!(self.log, MODULE, "failed to save FPF state: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values() {
        assert_eq!(FuseState::Fused.as_raw(), 0xFC);
        assert_eq!(FuseState::Unfused.as_raw(), 0xFE);
        assert_eq!(FuseState::Unknown.as_raw(), 0xFF);
        assert_eq!(FuseState::default(), FuseState::Unknown);
    }

    #[test]
    fn test_leaving_unknown_only_clears_bits() {
        for s in [FuseState::Fused, FuseState::Unfused] {
            assert_eq!(s.as_raw() & FuseState::Unknown.as_raw(), s.as_raw());
        }
    }

    #[test]
    fn test_from_raw() {
        for s in [FuseState::Fused, FuseState::Unfused, FuseState::Unknown] {
            assert_eq!(FuseState::from_raw(s.as_raw()), Some(s));
        }
        assert_eq!(FuseState::from_raw(0x00), None);
        assert_eq!(FuseState::from_raw(0xFD), None);
    }

    #[test]
    fn test_lock_byte() {
        assert_eq!(FuseState::from_lock_byte(1), FuseState::Fused);
        assert_eq!(FuseState::from_lock_byte(0), FuseState::Unfused);
        assert_eq!(FuseState::from_lock_byte(0xFF), FuseState::Unfused);
    }
}
