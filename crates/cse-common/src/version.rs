// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! CSE firmware version records

use core::cmp::Ordering;
use core::fmt;

use crate::constants::FW_VERSION_RECORD_SIZE;

/// Firmware version as reported by the CSE
///
/// The comparison order is: major > minor > hotfix > build
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version {
    /// Major version
    pub major: u16,
    /// Minor version
    pub minor: u16,
    /// Hotfix number
    pub hotfix: u16,
    /// Build number
    pub build: u16,
}

impl Version {
    /// Create a new version
    #[must_use]
    pub const fn new(major: u16, minor: u16, hotfix: u16, build: u16) -> Self {
        Self {
            major,
            minor,
            hotfix,
            build,
        }
    }

    /// Version 0.0.0.0
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Parse from the wire layout
    ///
    /// The CSE orders the fields minor, major, build, hotfix, each a
    /// little-endian u16.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < FW_VERSION_RECORD_SIZE {
            return None;
        }
        Some(Self {
            minor: u16::from_le_bytes([bytes[0], bytes[1]]),
            major: u16::from_le_bytes([bytes[2], bytes[3]]),
            build: u16::from_le_bytes([bytes[4], bytes[5]]),
            hotfix: u16::from_le_bytes([bytes[6], bytes[7]]),
        })
    }

    /// Serialize to the wire layout
    #[must_use]
    pub fn to_bytes(&self) -> [u8; FW_VERSION_RECORD_SIZE] {
        let mut bytes = [0u8; FW_VERSION_RECORD_SIZE];
        bytes[0..2].copy_from_slice(&self.minor.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.major.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.build.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.hotfix.to_le_bytes());
        bytes
    }

    /// Check if every field is zero (record not populated)
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.hotfix == 0 && self.build == 0
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.hotfix.cmp(&other.hotfix))
            .then(self.build.cmp(&other.build))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({self})")
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.hotfix, self.build)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::format;

    #[test]
    fn test_wire_field_order() {
        let bytes = [0x02, 0x00, 0x03, 0x00, 0xE8, 0x03, 0x01, 0x00];
        let v = Version::from_bytes(&bytes).unwrap();
        assert_eq!(v, Version::new(3, 2, 1, 1000));
        assert_eq!(v.to_bytes(), bytes);
    }

    #[test]
    fn test_short_record_rejected() {
        assert!(Version::from_bytes(&[0u8; 7]).is_none());
    }

    #[test]
    fn test_ordering() {
        assert!(Version::new(3, 1, 0, 0) > Version::new(3, 0, 9, 9));
        assert!(Version::new(3, 1, 2, 0) > Version::new(3, 1, 1, 500));
        assert!(Version::new(3, 1, 2, 7) > Version::new(3, 1, 2, 6));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Version::new(3, 1, 50, 2222)), "3.1.50.2222");
    }
}
