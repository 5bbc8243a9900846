// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Flash map backed region store
//!
//! Maps named areas (FMAP) onto a [`FlashInterface`] device and exposes them
//! through [`RegionStoreInterface`]. All accesses are bounds-checked against
//! the area; an area is never allowed to leave the device.
//!
//! Writes are plain programs without an erase cycle, read back afterwards.
//! A write that needs a bit set fails with `FlashVerifyFailed`, so callers
//! keeping status bytes here must only ever clear bits.

use heapless::Vec;

use crate::error::{HalError, HalResult};
use crate::traits::{FlashInterface, Region, RegionStoreInterface};

/// Maximum number of areas in one map
pub const MAX_FMAP_AREAS: usize = 16;

/// Readback scratch size
const READBACK_CHUNK: usize = 16;

/// A named flash area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmapArea {
    /// Area name
    pub name: &'static str,
    /// Offset from the start of flash
    pub offset: u32,
    /// Size in bytes
    pub size: u32,
}

impl FmapArea {
    /// Create a new area
    #[must_use]
    pub const fn new(name: &'static str, offset: u32, size: u32) -> Self {
        Self { name, offset, size }
    }

    const fn end(&self) -> u64 {
        self.offset as u64 + self.size as u64
    }

    const fn overlaps(&self, other: &Self) -> bool {
        (self.offset as u64) < other.end() && (other.offset as u64) < self.end()
    }
}

/// Region store over a flash device
pub struct FmapStore<F: FlashInterface> {
    flash: F,
    areas: Vec<FmapArea, MAX_FMAP_AREAS>,
}

impl<F: FlashInterface> FmapStore<F> {
    /// Create a store with an empty map
    pub fn new(flash: F) -> Self {
        Self {
            flash,
            areas: Vec::new(),
        }
    }

    /// Create a store from an area table
    pub fn with_areas(flash: F, areas: &[FmapArea]) -> HalResult<Self> {
        let mut store = Self::new(flash);
        for area in areas {
            store.add_area(*area)?;
        }
        Ok(store)
    }

    /// Register an area
    ///
    /// Rejects empty areas, areas past the end of the device, duplicates and
    /// overlaps.
    pub fn add_area(&mut self, area: FmapArea) -> HalResult<()> {
        if area.size == 0 || area.name.is_empty() {
            return Err(HalError::InvalidParameter);
        }
        if area.end() > F::TOTAL_SIZE as u64 {
            return Err(HalError::FlashOutOfBounds);
        }
        if self
            .areas
            .iter()
            .any(|a| a.name == area.name || a.overlaps(&area))
        {
            return Err(HalError::InvalidParameter);
        }
        self.areas.push(area).map_err(|_| HalError::RegionTableFull)
    }

    /// Registered areas
    pub fn areas(&self) -> &[FmapArea] {
        &self.areas
    }

    /// Access the underlying flash
    pub fn flash(&self) -> &F {
        &self.flash
    }

    /// Mutable access to the underlying flash
    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    /// Release the flash device
    pub fn into_inner(self) -> F {
        self.flash
    }

    fn absolute(region: &Region, offset: usize, len: usize) -> HalResult<u32> {
        if !region.contains(offset, len) {
            return Err(HalError::RegionOutOfBounds);
        }
        // contains() bounds offset and len by region.size, which is a u32.
        // A caller-built region may still sit too close to the top of the
        // address space.
        region
            .offset
            .checked_add(offset as u32)
            .filter(|addr| addr.checked_add(len as u32).is_some())
            .ok_or(HalError::RegionOutOfBounds)
    }

    /// Check that flash at `addr` holds `expected`
    fn holds(&self, addr: u32, expected: &[u8]) -> HalResult<bool> {
        let mut scratch = [0u8; READBACK_CHUNK];
        let mut at = addr;
        for want in expected.chunks(READBACK_CHUNK) {
            let got = &mut scratch[..want.len()];
            self.flash.read(at, got)?;
            if got != want {
                return Ok(false);
            }
            at += want.len() as u32;
        }
        Ok(true)
    }
}

impl<F: FlashInterface> RegionStoreInterface for FmapStore<F> {
    fn locate(&self, name: &str) -> HalResult<Region> {
        self.areas
            .iter()
            .find(|a| a.name == name)
            .map(|a| Region {
                offset: a.offset,
                size: a.size,
            })
            .ok_or(HalError::RegionNotFound)
    }

    fn read_at(&self, region: &Region, offset: usize, buffer: &mut [u8]) -> HalResult<usize> {
        let addr = Self::absolute(region, offset, buffer.len())?;
        self.flash.read(addr, buffer)?;
        Ok(buffer.len())
    }

    fn write_at(&mut self, region: &Region, offset: usize, data: &[u8]) -> HalResult<usize> {
        let addr = Self::absolute(region, offset, data.len())?;
        self.flash.write(addr, data)?;
        if !self.holds(addr, data)? {
            return Err(HalError::FlashVerifyFailed);
        }
        Ok(data.len())
    }
}
