// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! MKHI message header
//!
//! Every request and reply starts with one little-endian 32-bit word:
//!
//! ```text
//! bits  0..=7   group id
//! bits  8..=14  command
//! bit   15      is-response
//! bits 16..=23  reserved
//! bits 24..=31  result
//! ```
//!
//! Packing is done with explicit shifts and masks on a `u32`, never through
//! struct layout.

use cse_common::constants::MKHI_HEADER_SIZE;

use crate::error::{MkhiError, MkhiResult};
use crate::status::MkhiStatus;

const GROUP_SHIFT: u32 = 0;
const GROUP_MASK: u32 = 0xFF;
const COMMAND_SHIFT: u32 = 8;
const COMMAND_MASK: u32 = 0x7F;
const RESPONSE_BIT: u32 = 1 << 15;
const RESERVED_SHIFT: u32 = 16;
const RESERVED_MASK: u32 = 0xFF;
const RESULT_SHIFT: u32 = 24;
const RESULT_MASK: u32 = 0xFF;

/// Largest command value the 7-bit field holds
pub const MAX_COMMAND: u8 = COMMAND_MASK as u8;

/// MKHI header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MkhiHeader {
    group_id: u8,
    command: u8,
    is_response: bool,
    reserved: u8,
    result: u8,
}

impl MkhiHeader {
    /// Build a request header (is-response clear, result zero)
    pub const fn request(group_id: u8, command: u8) -> MkhiResult<Self> {
        if command > MAX_COMMAND {
            return Err(MkhiError::FieldOutOfRange);
        }
        Ok(Self {
            group_id,
            command,
            is_response: false,
            reserved: 0,
            result: 0,
        })
    }

    /// Build a reply header for a request
    #[must_use]
    pub const fn reply_to(request: &Self, result: u8) -> Self {
        Self {
            group_id: request.group_id,
            command: request.command,
            is_response: true,
            reserved: 0,
            result,
        }
    }

    /// Group id
    #[must_use]
    pub const fn group_id(&self) -> u8 {
        self.group_id
    }

    /// Command
    #[must_use]
    pub const fn command(&self) -> u8 {
        self.command
    }

    /// Is-response flag
    #[must_use]
    pub const fn is_response(&self) -> bool {
        self.is_response
    }

    /// Reserved byte
    #[must_use]
    pub const fn reserved(&self) -> u8 {
        self.reserved
    }

    /// Raw result byte
    #[must_use]
    pub const fn result(&self) -> u8 {
        self.result
    }

    /// Decoded result
    #[must_use]
    pub const fn status(&self) -> MkhiStatus {
        MkhiStatus::from_u8(self.result)
    }

    /// Pack into a `u32`
    #[must_use]
    pub const fn to_raw(&self) -> u32 {
        let mut raw = ((self.group_id as u32) & GROUP_MASK) << GROUP_SHIFT;
        raw |= ((self.command as u32) & COMMAND_MASK) << COMMAND_SHIFT;
        if self.is_response {
            raw |= RESPONSE_BIT;
        }
        raw |= ((self.reserved as u32) & RESERVED_MASK) << RESERVED_SHIFT;
        raw |= ((self.result as u32) & RESULT_MASK) << RESULT_SHIFT;
        raw
    }

    /// Unpack from a `u32`
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            group_id: ((raw >> GROUP_SHIFT) & GROUP_MASK) as u8,
            command: ((raw >> COMMAND_SHIFT) & COMMAND_MASK) as u8,
            is_response: raw & RESPONSE_BIT != 0,
            reserved: ((raw >> RESERVED_SHIFT) & RESERVED_MASK) as u8,
            result: ((raw >> RESULT_SHIFT) & RESULT_MASK) as u8,
        }
    }

    /// Serialize to wire bytes
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; MKHI_HEADER_SIZE] {
        self.to_raw().to_le_bytes()
    }

    /// Parse from the start of a buffer
    pub fn from_bytes(bytes: &[u8]) -> MkhiResult<Self> {
        let word: [u8; MKHI_HEADER_SIZE] = bytes
            .get(..MKHI_HEADER_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(MkhiError::Truncated {
                expected: MKHI_HEADER_SIZE,
                received: bytes.len(),
            })?;
        Ok(Self::from_raw(u32::from_le_bytes(word)))
    }

    /// Validate a reply against the request it answers
    ///
    /// Checks, in order: the is-response flag, the group/command echo, and
    /// the result code.
    pub fn check_reply(&self, group_id: u8, command: u8) -> MkhiResult<()> {
        if !self.is_response {
            return Err(MkhiError::NotAResponse);
        }
        if self.group_id != group_id || self.command != command {
            return Err(MkhiError::UnexpectedReply {
                group_id: self.group_id,
                command: self.command,
            });
        }
        let status = self.status();
        if !status.is_success() {
            return Err(MkhiError::Status(status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_layout() {
        let hdr = MkhiHeader::request(0x0A, 0x02).unwrap();
        assert_eq!(hdr.to_raw(), 0x0000_020A);
        assert_eq!(hdr.to_bytes(), [0x0A, 0x02, 0x00, 0x00]);

        let reply = MkhiHeader::reply_to(&hdr, 0x89);
        assert_eq!(reply.to_raw(), 0x8900_820A);
        assert_eq!(reply.to_bytes(), [0x0A, 0x82, 0x00, 0x89]);
    }

    #[test]
    fn test_raw_round_trip_is_lossless() {
        for raw in [0u32, 0xFFFF_FFFF, 0x1234_5678, 0x8000_8000, 0x00FF_7F00] {
            assert_eq!(MkhiHeader::from_raw(raw).to_raw(), raw);
        }
    }

    #[test]
    fn test_command_wider_than_seven_bits_rejected() {
        assert_eq!(MkhiHeader::request(0xFF, 0x80), Err(MkhiError::FieldOutOfRange));
        assert!(MkhiHeader::request(0xFF, MAX_COMMAND).is_ok());
    }

    #[test]
    fn test_short_header_rejected() {
        assert_eq!(
            MkhiHeader::from_bytes(&[0x0A, 0x82]),
            Err(MkhiError::Truncated {
                expected: 4,
                received: 2
            })
        );
    }

    #[test]
    fn test_check_reply() {
        let req = MkhiHeader::request(0xFF, 0x02).unwrap();
        assert_eq!(req.check_reply(0xFF, 0x02), Err(MkhiError::NotAResponse));

        let ok = MkhiHeader::reply_to(&req, 0);
        assert!(ok.check_reply(0xFF, 0x02).is_ok());
        assert_eq!(
            ok.check_reply(0x0A, 0x02),
            Err(MkhiError::UnexpectedReply {
                group_id: 0xFF,
                command: 0x02
            })
        );

        let refused = MkhiHeader::reply_to(&req, 0x9E);
        assert_eq!(
            refused.check_reply(0xFF, 0x02),
            Err(MkhiError::Status(MkhiStatus::Failure))
        );
    }
}
