// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! CSE Common Library
//!
//! Types shared by every crate of the CSE communication layer: the unified
//! error type, the console log buffer, build-time configuration, protocol
//! constants and firmware version records.
//!
//! # Features
//!
//! - `std`: Enable standard library support (disabled by default for firmware)
//! - `defmt`: Enable defmt formatting for errors
//!
//! No heap allocations are performed; all buffers are fixed-size arrays or
//! heapless collections.

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "std")]
extern crate std;

pub mod errors;
pub mod config;
pub mod log;
pub mod constants;
pub mod version;

// Re-export commonly used items
pub use errors::{Error, ErrorCategory, Result};
pub use config::CseConfig;
pub use log::{LogBuffer, LogLevel};
pub use version::Version;
