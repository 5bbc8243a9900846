// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! HAL error types

use core::fmt;

/// HAL error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// HECI host or CSE side not ready
    HeciNotReady,
    /// HECI send failed
    HeciSendFailed,
    /// HECI receive failed
    HeciReceiveFailed,
    /// HECI exchange timed out
    HeciTimeout,
    /// Flash read failed
    FlashReadFailed,
    /// Flash write failed
    FlashWriteFailed,
    /// Programmed data did not read back
    FlashVerifyFailed,
    /// Flash address out of bounds
    FlashOutOfBounds,
    /// Flash is write protected
    FlashLocked,
    /// Named region not present in the flash map
    RegionNotFound,
    /// Access outside a region
    RegionOutOfBounds,
    /// Region table has no free slot
    RegionTableFull,
    /// Register access failed
    RegisterAccessFailed,
    /// Invalid parameter
    InvalidParameter,
    /// Operation timeout
    Timeout,
    /// Operation not supported
    NotSupported,
}

impl HalError {
    /// Get error code
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::HeciNotReady => 0x0810,
            Self::HeciSendFailed => 0x0811,
            Self::HeciReceiveFailed => 0x0812,
            Self::HeciTimeout => 0x0813,
            Self::FlashReadFailed => 0x0820,
            Self::FlashWriteFailed => 0x0821,
            Self::FlashVerifyFailed => 0x0822,
            Self::FlashOutOfBounds => 0x0823,
            Self::FlashLocked => 0x0824,
            Self::RegionNotFound => 0x0830,
            Self::RegionOutOfBounds => 0x0831,
            Self::RegionTableFull => 0x0832,
            Self::RegisterAccessFailed => 0x0840,
            Self::InvalidParameter => 0x08F0,
            Self::Timeout => 0x08F1,
            Self::NotSupported => 0x08FF,
        }
    }

    /// Get error description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::HeciNotReady => "HECI not ready",
            Self::HeciSendFailed => "HECI send failed",
            Self::HeciReceiveFailed => "HECI receive failed",
            Self::HeciTimeout => "HECI timeout",
            Self::FlashReadFailed => "flash read failed",
            Self::FlashWriteFailed => "flash write failed",
            Self::FlashVerifyFailed => "flash readback mismatch",
            Self::FlashOutOfBounds => "flash address out of bounds",
            Self::FlashLocked => "flash locked",
            Self::RegionNotFound => "region not found",
            Self::RegionOutOfBounds => "region access out of bounds",
            Self::RegionTableFull => "region table full",
            Self::RegisterAccessFailed => "register access failed",
            Self::InvalidParameter => "invalid parameter",
            Self::Timeout => "timeout",
            Self::NotSupported => "not supported",
        }
    }
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x{:04X}] {}", self.code(), self.description())
    }
}

impl From<HalError> for cse_common::Error {
    fn from(e: HalError) -> Self {
        match e {
            HalError::HeciNotReady | HalError::HeciSendFailed => Self::SendFailed,
            HalError::HeciReceiveFailed => Self::ReceiveFailed,
            HalError::HeciTimeout | HalError::Timeout => Self::TransportTimeout,
            HalError::FlashReadFailed => Self::RegionReadFailed,
            HalError::FlashWriteFailed | HalError::FlashVerifyFailed | HalError::FlashLocked => {
                Self::RegionWriteFailed
            }
            HalError::FlashOutOfBounds | HalError::RegionOutOfBounds => Self::RegionOutOfBounds,
            HalError::RegionNotFound => Self::RegionNotFound,
            HalError::RegionTableFull => Self::BufferTooSmall,
            HalError::RegisterAccessFailed => Self::RegisterAccessFailed,
            HalError::InvalidParameter => Self::InvalidParameter,
            HalError::NotSupported => Self::NotImplemented,
        }
    }
}

/// HAL Result type
pub type HalResult<T> = Result<T, HalError>;
