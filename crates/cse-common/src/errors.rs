// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Error types for the CSE communication layer
//!
//! This module defines the unified error type used throughout the workspace.
//! All errors are no_std compatible and carry no heap data. Every variant
//! belongs to one [`ErrorCategory`] so diagnostics can tell "the CSE refused"
//! apart from "the CSE was unreachable".

use core::fmt;

/// Result type alias for CSE operations
pub type Result<T> = core::result::Result<T, Error>;

/// Broad error class, used for diagnostics and log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller input violates a fixed-size field; nothing was sent
    Encoding,
    /// The HECI channel failed to carry the message
    Transport,
    /// The CSE answered, but the answer is a refusal or malformed
    Protocol,
    /// The persistent region is unavailable or could not be written
    Persistence,
    /// Platform register access failed
    Platform,
    /// Anything else
    General,
}

impl ErrorCategory {
    /// Get the category name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Encoding => "encoding",
            Self::Transport => "transport",
            Self::Protocol => "protocol",
            Self::Persistence => "persistence",
            Self::Platform => "platform",
            Self::General => "general",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Encoding Errors (0x01xx)
    // =========================================================================
    /// File path does not fit the fixed-size path field
    PathTooLong,
    /// File path contains an embedded NUL byte
    InvalidPath,
    /// Requested size exceeds the response buffer capacity
    RequestTooLarge,
    /// A header field does not fit its bit width
    FieldOutOfRange,

    // =========================================================================
    // Transport Errors (0x02xx)
    // =========================================================================
    /// HECI send failed
    SendFailed,
    /// HECI receive failed
    ReceiveFailed,
    /// Transport reported more bytes than the receive buffer holds
    ReplyOverflow,
    /// HECI channel has been disabled by lockdown
    ChannelDisabled,
    /// Transport timed out
    TransportTimeout,

    // =========================================================================
    // Protocol Errors (0x03xx)
    // =========================================================================
    /// CSE returned a non-zero MKHI result code
    CommandFailed,
    /// Reply is not flagged as a response
    NotAResponse,
    /// Reply group/command does not match the request
    UnexpectedReply,
    /// Reply is shorter than its declared layout
    TruncatedReply,
    /// Declared data size exceeds the response buffer capacity
    DataExceedsCapacity,
    /// Declared data size exceeds the requested size
    DataExceedsRequest,

    // =========================================================================
    // Persistence Errors (0x04xx)
    // =========================================================================
    /// Named region not present in the flash map
    RegionNotFound,
    /// Region read failed
    RegionReadFailed,
    /// Region write failed
    RegionWriteFailed,
    /// Access outside the region bounds
    RegionOutOfBounds,

    // =========================================================================
    // Platform Errors (0x05xx)
    // =========================================================================
    /// Register access failed
    RegisterAccessFailed,

    // =========================================================================
    // General Errors (0xFFxx)
    // =========================================================================
    /// Buffer is too small for operation
    BufferTooSmall,
    /// Invalid parameter provided
    InvalidParameter,
    /// Invalid state for the operation
    InvalidState,
    /// Feature not implemented
    NotImplemented,
}

impl Error {
    /// Get the error code for this error
    ///
    /// Error codes are organized by category:
    /// - 0x01xx: Encoding errors
    /// - 0x02xx: Transport errors
    /// - 0x03xx: Protocol errors
    /// - 0x04xx: Persistence errors
    /// - 0x05xx: Platform errors
    /// - 0xFFxx: General errors
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::PathTooLong => 0x0101,
            Self::InvalidPath => 0x0102,
            Self::RequestTooLarge => 0x0103,
            Self::FieldOutOfRange => 0x0104,

            Self::SendFailed => 0x0201,
            Self::ReceiveFailed => 0x0202,
            Self::ReplyOverflow => 0x0203,
            Self::ChannelDisabled => 0x0204,
            Self::TransportTimeout => 0x0205,

            Self::CommandFailed => 0x0301,
            Self::NotAResponse => 0x0302,
            Self::UnexpectedReply => 0x0303,
            Self::TruncatedReply => 0x0304,
            Self::DataExceedsCapacity => 0x0305,
            Self::DataExceedsRequest => 0x0306,

            Self::RegionNotFound => 0x0401,
            Self::RegionReadFailed => 0x0402,
            Self::RegionWriteFailed => 0x0403,
            Self::RegionOutOfBounds => 0x0404,

            Self::RegisterAccessFailed => 0x0502,

            Self::BufferTooSmall => 0xFF01,
            Self::InvalidParameter => 0xFF02,
            Self::InvalidState => 0xFF03,
            Self::NotImplemented => 0xFF04,
        }
    }

    /// Get the category this error belongs to
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.code() >> 8 {
            0x01 => ErrorCategory::Encoding,
            0x02 => ErrorCategory::Transport,
            0x03 => ErrorCategory::Protocol,
            0x04 => ErrorCategory::Persistence,
            0x05 => ErrorCategory::Platform,
            _ => ErrorCategory::General,
        }
    }

    /// Get a short description of the error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PathTooLong => "path too big for file name field",
            Self::InvalidPath => "path contains NUL",
            Self::RequestTooLarge => "internal buffer is too small",
            Self::FieldOutOfRange => "header field out of range",
            Self::SendFailed => "failed to send HECI message",
            Self::ReceiveFailed => "failed to receive HECI reply",
            Self::ReplyOverflow => "HECI reply overflows buffer",
            Self::ChannelDisabled => "HECI channel disabled",
            Self::TransportTimeout => "HECI timeout",
            Self::CommandFailed => "CSE command failed",
            Self::NotAResponse => "reply is not a response",
            Self::UnexpectedReply => "unexpected reply",
            Self::TruncatedReply => "reply truncated",
            Self::DataExceedsCapacity => "reply is too large",
            Self::DataExceedsRequest => "reply exceeds requested size",
            Self::RegionNotFound => "region not found",
            Self::RegionReadFailed => "region read failed",
            Self::RegionWriteFailed => "region write failed",
            Self::RegionOutOfBounds => "region access out of bounds",
            Self::RegisterAccessFailed => "register access failed",
            Self::BufferTooSmall => "buffer too small",
            Self::InvalidParameter => "invalid parameter",
            Self::InvalidState => "invalid state",
            Self::NotImplemented => "not implemented",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x{:04X}] {}", self.code(), self.description())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "[0x{:04X}] {}", self.code(), self.description());
    }
}
