// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! HAL trait definitions
//!
//! Platform-agnostic interfaces the CSE layer depends on. The message
//! transport, the flash region store and raw register access are provided by
//! the platform; the protocol core only sees these traits.

use crate::error::HalResult;
use cse_common::config::PciDevFn;

/// HECI (host embedded controller interface) message transport
///
/// One call moves one complete message. Implementations own timeouts; a
/// timed-out exchange is reported like any other failure.
pub trait HeciInterface {
    /// Send a message to a CSE client
    ///
    /// # Arguments
    /// * `msg` - Complete message, header included
    /// * `host_addr` - Host client address
    /// * `client_addr` - CSE client address
    fn send(&mut self, msg: &[u8], host_addr: u8, client_addr: u8) -> HalResult<()>;

    /// Receive one reply
    ///
    /// `buffer.len()` is the capacity offered to the transport. Returns the
    /// number of bytes the transport reports as received.
    fn receive(&mut self, buffer: &mut [u8]) -> HalResult<usize>;
}

/// SPI flash interface
pub trait FlashInterface {
    /// Total flash size in bytes
    const TOTAL_SIZE: usize;

    /// Read data from flash
    ///
    /// # Arguments
    /// * `offset` - Offset from the start of the flash device
    /// * `buffer` - Buffer to read into
    fn read(&self, offset: u32, buffer: &mut [u8]) -> HalResult<()>;

    /// Program data into flash
    ///
    /// # Notes
    /// Programming can only clear bits. A cell that needs a bit set keeps
    /// its old value.
    fn write(&mut self, offset: u32, data: &[u8]) -> HalResult<()>;
}

/// Location of a named area inside the flash map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Offset from the start of flash
    pub offset: u32,
    /// Size in bytes
    pub size: u32,
}

impl Region {
    /// Check that `len` bytes at `offset` lie inside the region
    #[must_use]
    pub const fn contains(&self, offset: usize, len: usize) -> bool {
        match offset.checked_add(len) {
            Some(end) => end <= self.size as usize,
            None => false,
        }
    }
}

/// Persistent region store (named areas of the boot flash)
pub trait RegionStoreInterface {
    /// Look up a named region
    fn locate(&self, name: &str) -> HalResult<Region>;

    /// Read from a region
    ///
    /// Returns the number of bytes read.
    fn read_at(&self, region: &Region, offset: usize, buffer: &mut [u8]) -> HalResult<usize>;

    /// Write to a region
    ///
    /// Returns the number of bytes written.
    fn write_at(&mut self, region: &Region, offset: usize, data: &[u8]) -> HalResult<usize>;
}

/// PCI configuration space access
pub trait PciConfigInterface {
    /// Read a 32-bit config register
    ///
    /// `offset` must be dword aligned.
    fn read_config32(&self, dev: PciDevFn, offset: u16) -> HalResult<u32>;
}

/// Private configuration register (sideband) access
pub trait SidebandInterface {
    /// Read a 32-bit register of a sideband port
    fn read32(&self, pid: u8, offset: u16) -> HalResult<u32>;

    /// Write a 32-bit register of a sideband port
    fn write32(&mut self, pid: u8, offset: u16, value: u32) -> HalResult<()>;

    /// Set bits in a 32-bit register (read-modify-write)
    fn or32(&mut self, pid: u8, offset: u16, bits: u32) -> HalResult<()> {
        let value = self.read32(pid, offset)?;
        self.write32(pid, offset, value | bits)
    }
}
