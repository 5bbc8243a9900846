// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Protocol and platform constants
//!
//! These values are fixed by the CSE firmware interface and the Apollo Lake
//! register map.

use crate::config::PciDevFn;

// ============================================================================
// HECI Addressing
// ============================================================================

/// HECI host (BIOS) client address
pub const BIOS_HOST_ADDR: u8 = 0x00;

/// HECI MKHI client address on the CSE side
pub const HECI_MKHI_ADDR: u8 = 0x07;

// ============================================================================
// MKHI Groups and Commands
// ============================================================================

/// MCA group (sometimes called "FPF")
pub const MKHI_GROUP_ID_MCA: u8 = 0x0A;

/// Generic group
pub const MKHI_GROUP_ID_GEN: u8 = 0xFF;

/// MCA: read a file from the CSE filesystem
pub const MCA_READ_FILE: u8 = 0x02;

/// GEN: get firmware version
pub const GEN_GET_FW_VERSION: u8 = 0x02;

/// Size of the MKHI header on the wire
pub const MKHI_HEADER_SIZE: usize = 4;

// ============================================================================
// MCA READ_FILE Layout
// ============================================================================

/// Fixed width of the file path field, terminator included
pub const MCA_MAX_FILE_PATH_SIZE: usize = 64;

/// Capacity of the READ_FILE response data buffer
pub const MCA_MAX_DATA_SIZE: usize = 128;

/// READ_FILE request size: header + path + offset + size + flags
pub const READ_FILE_REQUEST_SIZE: usize = MKHI_HEADER_SIZE + MCA_MAX_FILE_PATH_SIZE + 4 + 4 + 1;

/// READ_FILE response fixed part: header + data size
pub const READ_FILE_RESPONSE_HEADER_SIZE: usize = MKHI_HEADER_SIZE + 4;

/// READ_FILE response maximum size
pub const READ_FILE_RESPONSE_SIZE: usize = READ_FILE_RESPONSE_HEADER_SIZE + MCA_MAX_DATA_SIZE;

/// Firmware version record size (four u16 fields)
pub const FW_VERSION_RECORD_SIZE: usize = 8;

/// GET_FW_VERSION response size: header + code + NFTP + FITC
pub const FW_VERSION_RESPONSE_SIZE: usize = MKHI_HEADER_SIZE + 3 * FW_VERSION_RECORD_SIZE;

// ============================================================================
// FPF Status Cache
// ============================================================================

/// FMAP area holding the cached fuse state byte
pub const FPF_STATUS_FMAP: &str = "FPF_STATUS";

/// CSE file exposing the SoC configuration lock fuse
pub const FUSE_LOCK_FILE: &str = "/fpf/intel/SocCfgLock";

// ============================================================================
// CSE PCI Configuration Space
// ============================================================================

/// Host firmware status register 1
pub const PCI_ME_HFSTS1: u16 = 0x40;
/// Host firmware status register 2
pub const PCI_ME_HFSTS2: u16 = 0x48;
/// Host firmware status register 3
pub const PCI_ME_HFSTS3: u16 = 0x60;
/// Host firmware status register 4
pub const PCI_ME_HFSTS4: u16 = 0x64;
/// Host firmware status register 5
pub const PCI_ME_HFSTS5: u16 = 0x68;
/// Host firmware status register 6
pub const PCI_ME_HFSTS6: u16 = 0x6C;

/// All status registers in dump order
pub const PCI_ME_HFSTS: [u16; 6] = [
    PCI_ME_HFSTS1,
    PCI_ME_HFSTS2,
    PCI_ME_HFSTS3,
    PCI_ME_HFSTS4,
    PCI_ME_HFSTS5,
    PCI_ME_HFSTS6,
];

/// HFSTS1: manufacturing mode
pub const HFSTS1_MFG_MODE: u32 = 1 << 4;

// ============================================================================
// Apollo Lake Platform Layout
// ============================================================================

/// PCIe ECAM base
pub const PCIE_ECAM_BASE: u32 = 0xE000_0000;

/// P2SB private config register window
pub const P2SB_BAR: u32 = 0xD000_0000;

/// CSE (HECI1) at 00:0f.0
pub const PCH_DEV_CSE: PciDevFn = PciDevFn::new(0, 0x0F, 0);

/// Sideband port id of PSF3
pub const PID_PSF3: u8 = 0xC6;

/// HECI1 register block within PSF3
pub const PSF3_BASE_ADDRESS: u16 = 0x1000;

/// PSF shadow PCI enable register offset
pub const PCR_PSFX_T0_SHDW_PCIEN: u16 = 0x1C;

/// Function disable bit in the shadow PCI enable register
pub const PCR_PSFX_T0_SHDW_PCIEN_FUNDIS: u32 = 1 << 8;
