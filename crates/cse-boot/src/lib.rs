// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Boot-stage CSE support
//!
//! This crate provides what firmware does with the CSE during boot:
//!
//! - **Fuse**: FPF fuse-state resolution with a flash-backed cache
//! - **Hooks**: device-init boot-state hooks and their dispatcher
//! - **Lockdown**: status register dump and HECI1 function disable
//! - **Context**: the per-boot state the above operate on

#![no_std]
#![warn(missing_docs)]

pub mod context;
pub mod fuse;
pub mod hooks;
pub mod lockdown;

pub use context::CseContext;
pub use fuse::FuseState;
pub use hooks::{run_boot_state, BootPhase, BootStateHook, BootStateId, CseBootOps, CSE_BOOT_HOOKS};
pub use lockdown::{CseStatusReport, HFSTS_COUNT};
