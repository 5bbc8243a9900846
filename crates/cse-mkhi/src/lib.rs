// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! MKHI protocol for the Converged Security Engine
//!
//! Provides the message codec and the HECI channel used by firmware to talk
//! to the CSE:
//!
//! - **Header**: 32-bit MKHI header packing ([`MkhiHeader`])
//! - **READ_FILE**: MCA file reads ([`ReadFileRequest`], [`ReadFileResponse`])
//! - **GET_FW_VERSION**: firmware version query ([`FwVersionResponse`])
//! - **Channel**: addressing, reply-size checks and lockdown state
//!   ([`HeciChannel`])
//!
//! # Example
//!
//! ```rust,ignore
//! use cse_mkhi::{HeciChannel, ReadFileFlags};
//!
//! let mut channel = HeciChannel::new(heci);
//! let mut fuse = [0u8; 1];
//! channel.read_file("/fpf/intel/SocCfgLock", 0, &mut fuse, ReadFileFlags::HW)?;
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channel;
pub mod error;
pub mod fw_version;
pub mod header;
pub mod read_file;
pub mod status;

pub use channel::{ChannelState, HeciChannel};
pub use error::{MkhiError, MkhiResult};
pub use fw_version::{FwVersionRequest, FwVersionResponse};
pub use header::MkhiHeader;
pub use read_file::{ReadFileFlags, ReadFileRequest, ReadFileResponse};
pub use status::MkhiStatus;
