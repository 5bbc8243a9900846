// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! GEN GET_FW_VERSION
//!
//! The request is a bare header. The reply carries three version records
//! (code, NFTP, FITC) after the header, 28 bytes in total.

use cse_common::constants::{
    FW_VERSION_RECORD_SIZE, FW_VERSION_RESPONSE_SIZE, GEN_GET_FW_VERSION, MKHI_GROUP_ID_GEN,
    MKHI_HEADER_SIZE,
};
use cse_common::Version;

use crate::error::{MkhiError, MkhiResult};
use crate::header::MkhiHeader;

const REQUEST_HEADER: MkhiHeader =
    match MkhiHeader::request(MKHI_GROUP_ID_GEN, GEN_GET_FW_VERSION) {
        Ok(h) => h,
        Err(_) => panic!("GET_FW_VERSION command out of range"),
    };

/// GET_FW_VERSION request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FwVersionRequest;

impl FwVersionRequest {
    /// Serialize to wire bytes
    #[must_use]
    pub const fn encode(&self) -> [u8; MKHI_HEADER_SIZE] {
        REQUEST_HEADER.to_bytes()
    }
}

/// GET_FW_VERSION reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FwVersionResponse {
    /// Running firmware
    pub code: Version,
    /// NFTP partition
    pub nftp: Version,
    /// FITC partition
    pub fitc: Version,
}

impl FwVersionResponse {
    /// Parse and validate a reply
    pub fn decode(reply: &[u8]) -> MkhiResult<Self> {
        let header = MkhiHeader::from_bytes(reply)?;
        header.check_reply(MKHI_GROUP_ID_GEN, GEN_GET_FW_VERSION)?;

        if reply.len() < FW_VERSION_RESPONSE_SIZE {
            return Err(MkhiError::Truncated {
                expected: FW_VERSION_RESPONSE_SIZE,
                received: reply.len(),
            });
        }

        let record = |n: usize| {
            let at = MKHI_HEADER_SIZE + n * FW_VERSION_RECORD_SIZE;
            Version::from_bytes(&reply[at..]).ok_or(MkhiError::Truncated {
                expected: FW_VERSION_RESPONSE_SIZE,
                received: reply.len(),
            })
        };

        Ok(Self {
            code: record(0)?,
            nftp: record(1)?,
            fitc: record(2)?,
        })
    }

    /// Serialize as a successful reply
    #[must_use]
    pub fn encode(&self) -> [u8; FW_VERSION_RESPONSE_SIZE] {
        let mut buf = [0u8; FW_VERSION_RESPONSE_SIZE];
        buf[..MKHI_HEADER_SIZE].copy_from_slice(&MkhiHeader::reply_to(&REQUEST_HEADER, 0).to_bytes());
        for (n, v) in [self.code, self.nftp, self.fitc].iter().enumerate() {
            let at = MKHI_HEADER_SIZE + n * FW_VERSION_RECORD_SIZE;
            buf[at..at + FW_VERSION_RECORD_SIZE].copy_from_slice(&v.to_bytes());
        }
        buf
    }
}
