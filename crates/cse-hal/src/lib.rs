// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Hardware Abstraction Layer for the CSE communication layer
//!
//! The protocol core talks to hardware only through the traits defined here:
//!
//! - **HECI**: message transport to the CSE (`HeciInterface`)
//! - **Flash / regions**: named persistent areas (`FlashInterface`,
//!   `RegionStoreInterface`, [`fmap::FmapStore`])
//! - **Registers**: PCI config space and sideband registers
//!   (`PciConfigInterface`, `SidebandInterface`)
//!
//! # Platforms
//!
//! - **Apollo Lake**: MMIO register backend (feature `apollolake`)
//! - Host builds carry no backend; all hardware comes from the caller

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod traits;
pub mod error;
pub mod fmap;

cfg_if::cfg_if! {
    if #[cfg(feature = "apollolake")] {
        pub mod apollolake;
        pub use apollolake::ApollolakeRegisters;
    }
}

// Re-export main traits
pub use traits::*;
pub use error::{HalError, HalResult};
pub use fmap::{FmapArea, FmapStore};
