// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! MKHI result codes
//!
//! The CSE reports the outcome of every command in the result byte of the
//! reply header. Zero is success; the named values below are the ones seen
//! in the field. Unlisted codes are kept verbatim.

use core::fmt;

/// MKHI result code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MkhiStatus {
    /// Command succeeded
    Success,
    /// CSE is in the wrong state for this command
    InvalidState,
    /// Message was skipped
    MessageSkipped,
    /// Request or reply size mismatch
    SizeError,
    /// Access denied
    InvalidAccess,
    /// Invalid parameters
    InvalidParams,
    /// CSE not ready
    NotReady,
    /// Command not supported
    NotSupported,
    /// Invalid address
    InvalidAddress,
    /// Invalid command
    InvalidCommand,
    /// Generic failure
    Failure,
    /// Invalid resource (e.g. unknown file)
    InvalidResource,
    /// Resource in use
    ResourceInUse,
    /// No resource
    NoResource,
    /// General error
    GeneralError,
    /// Any other code
    Other(u8),
}

impl MkhiStatus {
    /// Decode a raw result byte
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x00 => Self::Success,
            0x01 => Self::InvalidState,
            0x02 => Self::MessageSkipped,
            0x05 => Self::SizeError,
            0x84 => Self::InvalidAccess,
            0x85 => Self::InvalidParams,
            0x88 => Self::NotReady,
            0x89 => Self::NotSupported,
            0x8C => Self::InvalidAddress,
            0x8D => Self::InvalidCommand,
            0x9E => Self::Failure,
            0xE4 => Self::InvalidResource,
            0xE5 => Self::ResourceInUse,
            0xE6 => Self::NoResource,
            0xFF => Self::GeneralError,
            other => Self::Other(other),
        }
    }

    /// Raw result byte
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Success => 0x00,
            Self::InvalidState => 0x01,
            Self::MessageSkipped => 0x02,
            Self::SizeError => 0x05,
            Self::InvalidAccess => 0x84,
            Self::InvalidParams => 0x85,
            Self::NotReady => 0x88,
            Self::NotSupported => 0x89,
            Self::InvalidAddress => 0x8C,
            Self::InvalidCommand => 0x8D,
            Self::Failure => 0x9E,
            Self::InvalidResource => 0xE4,
            Self::ResourceInUse => 0xE5,
            Self::NoResource => 0xE6,
            Self::GeneralError => 0xFF,
            Self::Other(v) => *v,
        }
    }

    /// Check for success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Short description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InvalidState => "invalid state",
            Self::MessageSkipped => "message skipped",
            Self::SizeError => "size error",
            Self::InvalidAccess => "invalid access",
            Self::InvalidParams => "invalid params",
            Self::NotReady => "not ready",
            Self::NotSupported => "not supported",
            Self::InvalidAddress => "invalid address",
            Self::InvalidCommand => "invalid command",
            Self::Failure => "failure",
            Self::InvalidResource => "invalid resource",
            Self::ResourceInUse => "resource in use",
            Self::NoResource => "no resource",
            Self::GeneralError => "general error",
            Self::Other(_) => "unknown status",
        }
    }
}

impl From<u8> for MkhiStatus {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl fmt::Display for MkhiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x} ({})", self.as_u8(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_byte_round_trips() {
        for b in 0..=u8::MAX {
            assert_eq!(MkhiStatus::from_u8(b).as_u8(), b);
        }
    }

    #[test]
    fn test_known_codes() {
        assert!(MkhiStatus::from_u8(0).is_success());
        assert_eq!(MkhiStatus::from_u8(0x89), MkhiStatus::NotSupported);
        assert_eq!(MkhiStatus::from_u8(0x42), MkhiStatus::Other(0x42));
        assert!(!MkhiStatus::from_u8(0x42).is_success());
    }
}
