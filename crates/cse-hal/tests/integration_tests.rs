// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Integration tests for cse-hal
//!
//! Tests for error conversion, the flash-map region store, the sideband
//! default method and the Apollo Lake register layout. Real MMIO cannot be
//! exercised on the host; an in-memory NOR flash and register file stand in
//! for hardware.

use cse_hal::{FlashInterface, HalError, HalResult};

/// In-memory NOR flash: programming only clears bits
struct MemFlash {
    data: Vec<u8>,
    /// Drop programs on the floor, like a write-protected part
    ignore_writes: bool,
}

impl MemFlash {
    fn new() -> Self {
        Self {
            data: vec![0xFF; Self::TOTAL_SIZE],
            ignore_writes: false,
        }
    }

    fn check(offset: u32, len: usize) -> HalResult<usize> {
        let start = offset as usize;
        if start + len > Self::TOTAL_SIZE {
            return Err(HalError::FlashOutOfBounds);
        }
        Ok(start)
    }
}

impl FlashInterface for MemFlash {
    const TOTAL_SIZE: usize = 64 * 1024;

    fn read(&self, offset: u32, buffer: &mut [u8]) -> HalResult<()> {
        let start = Self::check(offset, buffer.len())?;
        buffer.copy_from_slice(&self.data[start..start + buffer.len()]);
        Ok(())
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> HalResult<()> {
        let start = Self::check(offset, data.len())?;
        if self.ignore_writes {
            return Ok(());
        }
        for (cell, byte) in self.data[start..start + data.len()].iter_mut().zip(data) {
            *cell &= *byte;
        }
        Ok(())
    }
}

mod error_tests {
    use cse_common::Error;
    use cse_hal::HalError;
    use std::collections::HashSet;

    fn all_hal_errors() -> Vec<HalError> {
        vec![
            HalError::HeciNotReady,
            HalError::HeciSendFailed,
            HalError::HeciReceiveFailed,
            HalError::HeciTimeout,
            HalError::FlashReadFailed,
            HalError::FlashWriteFailed,
            HalError::FlashVerifyFailed,
            HalError::FlashOutOfBounds,
            HalError::FlashLocked,
            HalError::RegionNotFound,
            HalError::RegionOutOfBounds,
            HalError::RegionTableFull,
            HalError::RegisterAccessFailed,
            HalError::InvalidParameter,
            HalError::Timeout,
            HalError::NotSupported,
        ]
    }

    #[test]
    fn test_codes_unique_and_in_hal_range() {
        let mut seen = HashSet::new();
        for e in all_hal_errors() {
            assert!(seen.insert(e.code()), "duplicate code for {:?}", e);
            assert_eq!(e.code() >> 8, 0x08, "{:?} outside HAL range", e);
        }
    }

    #[test]
    fn test_heci_errors_map_to_transport() {
        assert_eq!(Error::from(HalError::HeciSendFailed), Error::SendFailed);
        assert_eq!(Error::from(HalError::HeciReceiveFailed), Error::ReceiveFailed);
        assert_eq!(Error::from(HalError::HeciTimeout), Error::TransportTimeout);
        for e in [HalError::HeciNotReady, HalError::HeciSendFailed, HalError::HeciTimeout] {
            assert_eq!(Error::from(e).category(), cse_common::ErrorCategory::Transport);
        }
    }

    #[test]
    fn test_flash_errors_map_to_persistence() {
        use cse_common::ErrorCategory;
        for e in [
            HalError::FlashReadFailed,
            HalError::FlashWriteFailed,
            HalError::FlashVerifyFailed,
            HalError::FlashLocked,
            HalError::RegionNotFound,
            HalError::RegionOutOfBounds,
        ] {
            assert_eq!(Error::from(e).category(), ErrorCategory::Persistence, "{:?}", e);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", HalError::RegionNotFound), "[0x0830] region not found");
    }
}

mod fmap_tests {
    use super::MemFlash;
    use cse_hal::{FmapArea, FmapStore, HalError, Region, RegionStoreInterface};

    const LAYOUT: [FmapArea; 3] = [
        FmapArea::new("RO_SECTION", 0x0000, 0x8000),
        FmapArea::new("RW_MRC_CACHE", 0x8000, 0x1000),
        FmapArea::new("FPF_STATUS", 0x9000, 0x1000),
    ];

    fn store() -> FmapStore<MemFlash> {
        FmapStore::with_areas(MemFlash::new(), &LAYOUT).unwrap()
    }

    #[test]
    fn test_locate_known_and_unknown() {
        let s = store();
        assert_eq!(
            s.locate("FPF_STATUS"),
            Ok(Region {
                offset: 0x9000,
                size: 0x1000
            })
        );
        assert_eq!(s.locate("SMMSTORE"), Err(HalError::RegionNotFound));
    }

    #[test]
    fn test_erased_region_reads_ff() {
        let s = store();
        let r = s.locate("FPF_STATUS").unwrap();
        let mut b = [0u8; 1];
        assert_eq!(s.read_at(&r, 0, &mut b), Ok(1));
        assert_eq!(b[0], 0xFF);
    }

    #[test]
    fn test_write_lands_at_area_offset() {
        let mut s = store();
        let r = s.locate("FPF_STATUS").unwrap();
        assert_eq!(s.write_at(&r, 0, &[0xFC]), Ok(1));

        let mut raw = [0u8; 1];
        cse_hal::FlashInterface::read(s.flash(), 0x9000, &mut raw).unwrap();
        assert_eq!(raw[0], 0xFC);
    }

    #[test]
    fn test_out_of_bounds_access_rejected() {
        let mut s = store();
        let r = s.locate("FPF_STATUS").unwrap();
        let mut b = [0u8; 2];
        assert_eq!(s.read_at(&r, 0xFFF, &mut b), Err(HalError::RegionOutOfBounds));
        assert_eq!(s.write_at(&r, 0x1000, &[0]), Err(HalError::RegionOutOfBounds));
        assert_eq!(
            s.write_at(&r, usize::MAX, &[0]),
            Err(HalError::RegionOutOfBounds)
        );
    }

    #[test]
    fn test_region_near_address_space_top_rejected() {
        let mut s = store();
        let r = Region {
            offset: u32::MAX - 4,
            size: 0x100,
        };
        let mut b = [0u8; 1];
        assert_eq!(s.read_at(&r, 8, &mut b), Err(HalError::RegionOutOfBounds));
        assert_eq!(s.write_at(&r, 2, &[0; 4]), Err(HalError::RegionOutOfBounds));
    }

    #[test]
    fn test_write_needing_set_bits_fails_readback() {
        let mut s = store();
        let r = s.locate("FPF_STATUS").unwrap();
        assert_eq!(s.write_at(&r, 0, &[0x00]), Ok(1));
        assert_eq!(s.write_at(&r, 0, &[0xFE]), Err(HalError::FlashVerifyFailed));

        let mut b = [0u8; 1];
        s.read_at(&r, 0, &mut b).unwrap();
        assert_eq!(b[0], 0x00);
    }

    #[test]
    fn test_clearing_bits_passes_readback() {
        let mut s = store();
        let r = s.locate("FPF_STATUS").unwrap();
        assert_eq!(s.write_at(&r, 0, &[0xFE]), Ok(1));
        assert_eq!(s.write_at(&r, 0, &[0xFC]), Ok(1));
    }

    #[test]
    fn test_dropped_write_detected_across_chunks() {
        let mut s = store();
        s.flash_mut().ignore_writes = true;
        let r = s.locate("RW_MRC_CACHE").unwrap();
        let mut data = vec![0xFFu8; 40];
        data[37] = 0x5A;
        assert_eq!(s.write_at(&r, 0, &data), Err(HalError::FlashVerifyFailed));
    }

    #[test]
    fn test_overlapping_or_duplicate_areas_rejected() {
        let mut s = store();
        assert_eq!(
            s.add_area(FmapArea::new("OTHER", 0x8800, 0x1000)),
            Err(HalError::InvalidParameter)
        );
        assert_eq!(
            s.add_area(FmapArea::new("FPF_STATUS", 0xA000, 0x10)),
            Err(HalError::InvalidParameter)
        );
        assert_eq!(
            s.add_area(FmapArea::new("PAST_END", 0xF000, 0x2000)),
            Err(HalError::FlashOutOfBounds)
        );
        assert_eq!(
            s.add_area(FmapArea::new("EMPTY", 0xA000, 0)),
            Err(HalError::InvalidParameter)
        );
        assert!(s.add_area(FmapArea::new("SMMSTORE", 0xA000, 0x1000)).is_ok());
        assert_eq!(s.areas().len(), 4);
    }

    #[test]
    fn test_region_contains() {
        let r = Region {
            offset: 0,
            size: 16,
        };
        assert!(r.contains(0, 16));
        assert!(r.contains(15, 1));
        assert!(!r.contains(16, 1));
        assert!(!r.contains(usize::MAX, 2));
    }
}

mod sideband_trait_tests {
    use cse_hal::{HalResult, SidebandInterface};
    use std::collections::HashMap;

    #[derive(Default)]
    struct RegFile {
        regs: HashMap<(u8, u16), u32>,
    }

    impl SidebandInterface for RegFile {
        fn read32(&self, pid: u8, offset: u16) -> HalResult<u32> {
            Ok(*self.regs.get(&(pid, offset)).unwrap_or(&0))
        }

        fn write32(&mut self, pid: u8, offset: u16, value: u32) -> HalResult<()> {
            self.regs.insert((pid, offset), value);
            Ok(())
        }
    }

    #[test]
    fn test_or32_preserves_other_bits() {
        let mut rf = RegFile::default();
        rf.write32(0xC6, 0x101C, 0x0000_0003).unwrap();
        rf.or32(0xC6, 0x101C, 1 << 8).unwrap();
        assert_eq!(rf.read32(0xC6, 0x101C).unwrap(), 0x0000_0103);
    }
}

#[cfg(feature = "apollolake")]
mod apollolake_tests {
    use cse_common::config::PlatformConfig;
    use cse_common::constants::{PCH_DEV_CSE, PCI_ME_HFSTS1, PID_PSF3};
    use cse_hal::ApollolakeRegisters;

    #[test]
    fn test_default_backend_follows_platform_layout() {
        let layout = PlatformConfig::DEFAULT;
        let regs = ApollolakeRegisters::default();
        assert_eq!(
            regs.config_address(PCH_DEV_CSE, PCI_ME_HFSTS1),
            layout.ecam_base + PCH_DEV_CSE.ecam_offset() + 0x40
        );
        assert_eq!(regs.pcr_address(PID_PSF3, 0), layout.p2sb_bar | 0x00C6_0000);
    }

    #[test]
    fn test_relocated_windows() {
        let layout = PlatformConfig {
            ecam_base: 0xF000_0000,
            p2sb_bar: 0xFD00_0000,
            ..PlatformConfig::DEFAULT
        };
        let regs = ApollolakeRegisters::new(layout);
        assert_eq!(regs.config_address(PCH_DEV_CSE, PCI_ME_HFSTS1), 0xF007_8040);
        assert_eq!(regs.pcr_address(PID_PSF3, 0x101C), 0xFDC6_101C);
    }
}
