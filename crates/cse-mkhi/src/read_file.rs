// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! MCA READ_FILE
//!
//! Reads up to 128 bytes of a named CSE file.
//!
//! Request layout (77 bytes):
//! ```text
//! [0..4]    MKHI header (group 0x0a, command 0x02)
//! [4..68]   file path, NUL-terminated, zero padded
//! [68..72]  offset (LE)
//! [72..76]  size to read (LE)
//! [76]      flags
//! ```
//!
//! Reply layout:
//! ```text
//! [0..4]    MKHI header (is-response set)
//! [4..8]    data size (LE)
//! [8..]     data, at most 128 bytes
//! ```

use core::ops::BitOr;

use heapless::{String, Vec};

use cse_common::constants::{
    MCA_MAX_DATA_SIZE, MCA_MAX_FILE_PATH_SIZE, MCA_READ_FILE, MKHI_GROUP_ID_MCA,
    MKHI_HEADER_SIZE, READ_FILE_REQUEST_SIZE, READ_FILE_RESPONSE_HEADER_SIZE,
    READ_FILE_RESPONSE_SIZE,
};

use crate::error::{MkhiError, MkhiResult};
use crate::header::MkhiHeader;

/// Longest path accepted, terminator excluded
pub const MAX_PATH_LEN: usize = MCA_MAX_FILE_PATH_SIZE - 1;

const PATH_OFFSET: usize = MKHI_HEADER_SIZE;
const OFFSET_OFFSET: usize = PATH_OFFSET + MCA_MAX_FILE_PATH_SIZE;
const SIZE_OFFSET: usize = OFFSET_OFFSET + 4;
const FLAGS_OFFSET: usize = SIZE_OFFSET + 4;

const REQUEST_HEADER: MkhiHeader = match MkhiHeader::request(MKHI_GROUP_ID_MCA, MCA_READ_FILE) {
    Ok(h) => h,
    Err(_) => panic!("READ_FILE command out of range"),
};

/// READ_FILE flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadFileFlags(u8);

impl ReadFileFlags {
    /// Read the default copy of the file
    pub const DEFAULT: Self = Self(1 << 0);
    /// Read the file hash
    pub const HASH: Self = Self(1 << 1);
    /// Read the emulated value
    pub const EMULATED: Self = Self(1 << 2);
    /// Read the value from hardware
    pub const HW: Self = Self(1 << 3);

    /// Wrap raw flag bits
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw flag bits
    #[must_use]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Check whether all bits of `other` are set
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ReadFileFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// READ_FILE request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFileRequest {
    path: String<MAX_PATH_LEN>,
    offset: u32,
    size: u32,
    flags: ReadFileFlags,
}

impl ReadFileRequest {
    /// Build a request
    ///
    /// Fails with `PathTooLong` when the path leaves no room for its
    /// terminator, `InvalidPath` when it contains NUL, and `RequestTooLarge`
    /// when `size` exceeds the 128-byte reply data field.
    pub fn new(path: &str, offset: u32, size: usize, flags: ReadFileFlags) -> MkhiResult<Self> {
        if path.len() > MAX_PATH_LEN {
            return Err(MkhiError::PathTooLong { len: path.len() });
        }
        if path.bytes().any(|b| b == 0) {
            return Err(MkhiError::InvalidPath);
        }
        if size > MCA_MAX_DATA_SIZE {
            return Err(MkhiError::RequestTooLarge {
                requested: size,
                capacity: MCA_MAX_DATA_SIZE,
            });
        }

        let mut stored = String::new();
        stored
            .push_str(path)
            .map_err(|()| MkhiError::PathTooLong { len: path.len() })?;

        Ok(Self {
            path: stored,
            offset,
            // size <= 128 was checked above
            size: size as u32,
            flags,
        })
    }

    /// File path
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Byte offset within the file
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of bytes requested
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Request flags
    #[must_use]
    pub const fn flags(&self) -> ReadFileFlags {
        self.flags
    }

    /// Serialize to wire bytes
    #[must_use]
    pub fn encode(&self) -> [u8; READ_FILE_REQUEST_SIZE] {
        let mut buf = [0u8; READ_FILE_REQUEST_SIZE];
        buf[..MKHI_HEADER_SIZE].copy_from_slice(&REQUEST_HEADER.to_bytes());

        // Path is zero padded, so the terminator is already in place
        let path = self.path.as_bytes();
        buf[PATH_OFFSET..PATH_OFFSET + path.len()].copy_from_slice(path);

        buf[OFFSET_OFFSET..SIZE_OFFSET].copy_from_slice(&self.offset.to_le_bytes());
        buf[SIZE_OFFSET..FLAGS_OFFSET].copy_from_slice(&self.size.to_le_bytes());
        buf[FLAGS_OFFSET] = self.flags.bits();
        buf
    }

    /// Parse wire bytes
    pub fn decode(bytes: &[u8]) -> MkhiResult<Self> {
        if bytes.len() < READ_FILE_REQUEST_SIZE {
            return Err(MkhiError::Truncated {
                expected: READ_FILE_REQUEST_SIZE,
                received: bytes.len(),
            });
        }

        let header = MkhiHeader::from_bytes(bytes)?;
        if header.is_response()
            || header.group_id() != MKHI_GROUP_ID_MCA
            || header.command() != MCA_READ_FILE
        {
            return Err(MkhiError::UnexpectedReply {
                group_id: header.group_id(),
                command: header.command(),
            });
        }

        let field = &bytes[PATH_OFFSET..OFFSET_OFFSET];
        let len = field
            .iter()
            .position(|&b| b == 0)
            .ok_or(MkhiError::PathTooLong {
                len: MCA_MAX_FILE_PATH_SIZE,
            })?;
        let path = core::str::from_utf8(&field[..len]).map_err(|_| MkhiError::InvalidPath)?;

        let offset = read_u32(bytes, OFFSET_OFFSET)?;
        let size = read_u32(bytes, SIZE_OFFSET)?;
        let flags = ReadFileFlags::from_bits(bytes[FLAGS_OFFSET]);

        let size = usize::try_from(size).map_err(|_| MkhiError::RequestTooLarge {
            requested: usize::MAX,
            capacity: MCA_MAX_DATA_SIZE,
        })?;
        Self::new(path, offset, size, flags)
    }
}

/// READ_FILE reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFileResponse {
    header: MkhiHeader,
    data: Vec<u8, MCA_MAX_DATA_SIZE>,
}

impl ReadFileResponse {
    /// Build a successful reply carrying `data`
    pub fn new(data: &[u8]) -> MkhiResult<Self> {
        let data = Vec::from_slice(data).map_err(|()| MkhiError::DataExceedsCapacity {
            declared: u32::try_from(data.len()).unwrap_or(u32::MAX),
        })?;
        Ok(Self {
            header: MkhiHeader::reply_to(&REQUEST_HEADER, 0),
            data,
        })
    }

    /// Reply header
    #[must_use]
    pub const fn header(&self) -> &MkhiHeader {
        &self.header
    }

    /// File data
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Serialize to wire bytes
    pub fn encode(&self) -> MkhiResult<Vec<u8, READ_FILE_RESPONSE_SIZE>> {
        let mut buf = Vec::new();
        let overflow = |_| MkhiError::DataExceedsCapacity {
            declared: self.data.len() as u32,
        };

        buf.extend_from_slice(&self.header.to_bytes())
            .map_err(overflow)?;
        buf.extend_from_slice(&(self.data.len() as u32).to_le_bytes())
            .map_err(overflow)?;
        buf.extend_from_slice(&self.data).map_err(overflow)?;

        Ok(buf)
    }

    /// Parse and validate a reply to a request for `requested` bytes
    ///
    /// The declared data size is checked against the 128-byte data field,
    /// against `requested`, and against the number of bytes in `reply`.
    /// Nothing is copied until all three hold.
    pub fn decode(reply: &[u8], requested: usize) -> MkhiResult<Self> {
        let header = MkhiHeader::from_bytes(reply)?;
        header.check_reply(MKHI_GROUP_ID_MCA, MCA_READ_FILE)?;

        let declared = read_u32(reply, MKHI_HEADER_SIZE)?;
        if declared > MCA_MAX_DATA_SIZE as u32 {
            return Err(MkhiError::DataExceedsCapacity { declared });
        }
        let len = declared as usize;
        if len > requested {
            return Err(MkhiError::DataExceedsRequest {
                declared,
                requested,
            });
        }

        let end = READ_FILE_RESPONSE_HEADER_SIZE + len;
        let payload = reply
            .get(READ_FILE_RESPONSE_HEADER_SIZE..end)
            .ok_or(MkhiError::Truncated {
                expected: end,
                received: reply.len(),
            })?;
        let data =
            Vec::from_slice(payload).map_err(|()| MkhiError::DataExceedsCapacity { declared })?;

        Ok(Self { header, data })
    }
}

fn read_u32(bytes: &[u8], at: usize) -> MkhiResult<u32> {
    let word: [u8; 4] = bytes
        .get(at..at + 4)
        .and_then(|b| b.try_into().ok())
        .ok_or(MkhiError::Truncated {
            expected: at + 4,
            received: bytes.len(),
        })?;
    Ok(u32::from_le_bytes(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::MkhiStatus;

    #[test]
    fn test_request_layout() {
        let req = ReadFileRequest::new("/fpf/intel/SocCfgLock", 0, 1, ReadFileFlags::HW).unwrap();
        let bytes = req.encode();

        assert_eq!(bytes.len(), 77);
        assert_eq!(&bytes[..4], &[0x0A, 0x02, 0x00, 0x00]);
        assert_eq!(&bytes[4..25], b"/fpf/intel/SocCfgLock");
        assert!(bytes[25..68].iter().all(|&b| b == 0));
        assert_eq!(&bytes[68..72], &[0, 0, 0, 0]);
        assert_eq!(&bytes[72..76], &[1, 0, 0, 0]);
        assert_eq!(bytes[76], 0x08);
    }

    #[test]
    fn test_path_boundary() {
        let long = [b'a'; 64];
        let max = core::str::from_utf8(&long[..63]).unwrap();
        assert!(ReadFileRequest::new(max, 0, 1, ReadFileFlags::HW).is_ok());

        let too_long = core::str::from_utf8(&long).unwrap();
        assert_eq!(
            ReadFileRequest::new(too_long, 0, 1, ReadFileFlags::HW),
            Err(MkhiError::PathTooLong { len: 64 })
        );
    }

    #[test]
    fn test_embedded_nul_rejected() {
        assert_eq!(
            ReadFileRequest::new("/fpf\0/x", 0, 1, ReadFileFlags::HW),
            Err(MkhiError::InvalidPath)
        );
    }

    #[test]
    fn test_size_above_capacity_rejected() {
        assert!(ReadFileRequest::new("/f", 0, 128, ReadFileFlags::DEFAULT).is_ok());
        assert_eq!(
            ReadFileRequest::new("/f", 0, 129, ReadFileFlags::DEFAULT),
            Err(MkhiError::RequestTooLarge {
                requested: 129,
                capacity: 128
            })
        );
    }

    #[test]
    fn test_flags_combine() {
        let f = ReadFileFlags::HW | ReadFileFlags::HASH;
        assert_eq!(f.bits(), 0x0A);
        assert!(f.contains(ReadFileFlags::HW));
        assert!(!f.contains(ReadFileFlags::EMULATED));
    }

    #[test]
    fn test_response_decode() {
        let wire = ReadFileResponse::new(&[0x01]).unwrap().encode().unwrap();
        assert_eq!(&wire[..], &[0x0A, 0x82, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01]);

        let resp = ReadFileResponse::decode(&wire, 1).unwrap();
        assert_eq!(resp.data(), &[0x01]);
    }

    #[test]
    fn test_response_status_surfaces() {
        let wire = [0x0A, 0x82, 0x00, 0xE4, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(
            ReadFileResponse::decode(&wire, 1),
            Err(MkhiError::Status(MkhiStatus::InvalidResource))
        );
    }

    #[test]
    fn test_response_size_checks() {
        // declares 4 bytes, only 1 requested
        let wire = ReadFileResponse::new(&[1, 2, 3, 4]).unwrap().encode().unwrap();
        assert_eq!(
            ReadFileResponse::decode(&wire, 1),
            Err(MkhiError::DataExceedsRequest {
                declared: 4,
                requested: 1
            })
        );

        // declares 4 bytes, carries 2
        assert_eq!(
            ReadFileResponse::decode(&wire[..10], 4),
            Err(MkhiError::Truncated {
                expected: 12,
                received: 10
            })
        );

        // declares more than the data field holds
        let mut big = [0u8; 8];
        big[..4].copy_from_slice(&[0x0A, 0x82, 0x00, 0x00]);
        big[4..].copy_from_slice(&129u32.to_le_bytes());
        assert_eq!(
            ReadFileResponse::decode(&big, 128),
            Err(MkhiError::DataExceedsCapacity { declared: 129 })
        );
    }
}
