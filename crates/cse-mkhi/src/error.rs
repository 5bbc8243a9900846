// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! MKHI error type

use core::fmt;

use cse_common::ErrorCategory;
use cse_hal::HalError;

use crate::status::MkhiStatus;

/// Errors raised while building, exchanging or parsing MKHI messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MkhiError {
    // Encoding: rejected before anything is sent
    /// Path (plus terminator) does not fit the path field
    PathTooLong {
        /// Path length in bytes, terminator excluded
        len: usize,
    },
    /// Path contains an embedded NUL
    InvalidPath,
    /// Requested size exceeds the reply buffer capacity
    RequestTooLarge {
        /// Requested bytes
        requested: usize,
        /// Reply buffer capacity
        capacity: usize,
    },
    /// Header field does not fit its bit width
    FieldOutOfRange,

    // Transport
    /// HECI send failed
    Send(HalError),
    /// HECI receive failed
    Receive(HalError),
    /// Transport reported more bytes than the buffer it was given
    ReplyOverflow {
        /// Bytes the transport claims to have received
        received: usize,
        /// Capacity offered to the transport
        capacity: usize,
    },
    /// Channel disabled by lockdown
    ChannelDisabled,

    // Protocol: the CSE answered
    /// Non-zero result code
    Status(MkhiStatus),
    /// Reply lacks the is-response flag
    NotAResponse,
    /// Reply group/command does not echo the request
    UnexpectedReply {
        /// Group id in the reply
        group_id: u8,
        /// Command in the reply
        command: u8,
    },
    /// Reply shorter than its layout requires
    Truncated {
        /// Bytes required
        expected: usize,
        /// Bytes received
        received: usize,
    },
    /// Declared data size exceeds the reply buffer capacity
    DataExceedsCapacity {
        /// Declared data size
        declared: u32,
    },
    /// Declared data size exceeds what was requested
    DataExceedsRequest {
        /// Declared data size
        declared: u32,
        /// Requested size
        requested: usize,
    },
}

impl MkhiError {
    /// Error category
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::PathTooLong { .. }
            | Self::InvalidPath
            | Self::RequestTooLarge { .. }
            | Self::FieldOutOfRange => ErrorCategory::Encoding,
            Self::Send(_)
            | Self::Receive(_)
            | Self::ReplyOverflow { .. }
            | Self::ChannelDisabled => ErrorCategory::Transport,
            Self::Status(_)
            | Self::NotAResponse
            | Self::UnexpectedReply { .. }
            | Self::Truncated { .. }
            | Self::DataExceedsCapacity { .. }
            | Self::DataExceedsRequest { .. } => ErrorCategory::Protocol,
        }
    }
}

impl fmt::Display for MkhiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathTooLong { len } => write!(f, "path too big for file name field ({len} bytes)"),
            Self::InvalidPath => f.write_str("path contains NUL"),
            Self::RequestTooLarge {
                requested,
                capacity,
            } => write!(f, "internal buffer is too small ({requested} > {capacity})"),
            Self::FieldOutOfRange => f.write_str("header field out of range"),
            Self::Send(e) => write!(f, "failed to send HECI message: {e}"),
            Self::Receive(e) => write!(f, "failed to receive HECI reply: {e}"),
            Self::ReplyOverflow { received, capacity } => {
                write!(f, "HECI reply overflows buffer ({received} > {capacity})")
            }
            Self::ChannelDisabled => f.write_str("HECI channel disabled"),
            Self::Status(s) => write!(f, "CSE returned status {s}"),
            Self::NotAResponse => f.write_str("reply is not a response"),
            Self::UnexpectedReply { group_id, command } => {
                write!(f, "unexpected reply group 0x{group_id:02x} command 0x{command:02x}")
            }
            Self::Truncated { expected, received } => {
                write!(f, "reply truncated ({received} < {expected})")
            }
            Self::DataExceedsCapacity { declared } => {
                write!(f, "reply is too large ({declared} bytes)")
            }
            Self::DataExceedsRequest {
                declared,
                requested,
            } => write!(f, "reply is too large ({declared} > {requested} requested)"),
        }
    }
}

impl From<MkhiError> for cse_common::Error {
    fn from(e: MkhiError) -> Self {
        match e {
            MkhiError::PathTooLong { .. } => Self::PathTooLong,
            MkhiError::InvalidPath => Self::InvalidPath,
            MkhiError::RequestTooLarge { .. } => Self::RequestTooLarge,
            MkhiError::FieldOutOfRange => Self::FieldOutOfRange,
            MkhiError::Send(HalError::HeciTimeout | HalError::Timeout)
            | MkhiError::Receive(HalError::HeciTimeout | HalError::Timeout) => {
                Self::TransportTimeout
            }
            MkhiError::Send(_) => Self::SendFailed,
            MkhiError::Receive(_) => Self::ReceiveFailed,
            MkhiError::ReplyOverflow { .. } => Self::ReplyOverflow,
            MkhiError::ChannelDisabled => Self::ChannelDisabled,
            MkhiError::Status(_) => Self::CommandFailed,
            MkhiError::NotAResponse => Self::NotAResponse,
            MkhiError::UnexpectedReply { .. } => Self::UnexpectedReply,
            MkhiError::Truncated { .. } => Self::TruncatedReply,
            MkhiError::DataExceedsCapacity { .. } => Self::DataExceedsCapacity,
            MkhiError::DataExceedsRequest { .. } => Self::DataExceedsRequest,
        }
    }
}

/// MKHI Result type
pub type MkhiResult<T> = Result<T, MkhiError>;
