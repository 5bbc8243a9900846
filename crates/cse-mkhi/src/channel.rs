// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! HECI transport adapter
//!
//! Wraps a [`HeciInterface`] with the MKHI addressing, reply-size
//! enforcement and the one-way Enabled → Disabled state entered at lockdown.
//! Every exchange is attempted once; there are no retries.

use cse_common::constants::{
    BIOS_HOST_ADDR, FW_VERSION_RESPONSE_SIZE, HECI_MKHI_ADDR, MCA_MAX_DATA_SIZE,
    READ_FILE_RESPONSE_SIZE,
};
use cse_hal::HeciInterface;

use crate::error::{MkhiError, MkhiResult};
use crate::fw_version::{FwVersionRequest, FwVersionResponse};
use crate::read_file::{ReadFileFlags, ReadFileRequest, ReadFileResponse};

/// Channel state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Messages may be exchanged
    Enabled,
    /// HECI function hidden; terminal
    Disabled,
}

/// MKHI channel over a HECI transport
pub struct HeciChannel<H: HeciInterface> {
    heci: H,
    state: ChannelState,
}

impl<H: HeciInterface> HeciChannel<H> {
    /// Wrap a transport; the channel starts enabled
    pub const fn new(heci: H) -> Self {
        Self {
            heci,
            state: ChannelState::Enabled,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> ChannelState {
        self.state
    }

    /// Check if messages may still be exchanged
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self.state, ChannelState::Enabled)
    }

    /// Mark the channel disabled. There is no way back.
    pub fn disable(&mut self) {
        self.state = ChannelState::Disabled;
    }

    /// Borrow the transport
    pub const fn heci(&self) -> &H {
        &self.heci
    }

    /// Consume the channel and return the transport
    pub fn into_inner(self) -> H {
        self.heci
    }

    fn ensure_enabled(&self) -> MkhiResult<()> {
        match self.state {
            ChannelState::Enabled => Ok(()),
            ChannelState::Disabled => Err(MkhiError::ChannelDisabled),
        }
    }

    /// Send one message to the MKHI client
    pub fn send(&mut self, msg: &[u8]) -> MkhiResult<()> {
        self.ensure_enabled()?;
        self.heci
            .send(msg, BIOS_HOST_ADDR, HECI_MKHI_ADDR)
            .map_err(MkhiError::Send)
    }

    /// Receive one reply into `buf`
    ///
    /// The capacity offered is `buf.len()`. A reported size above it is
    /// rejected whatever the transport claims.
    pub fn receive(&mut self, buf: &mut [u8]) -> MkhiResult<usize> {
        self.ensure_enabled()?;
        let capacity = buf.len();
        let received = self.heci.receive(buf).map_err(MkhiError::Receive)?;
        if received > capacity {
            return Err(MkhiError::ReplyOverflow { received, capacity });
        }
        Ok(received)
    }

    /// Send a request and receive its reply
    pub fn exchange(&mut self, request: &[u8], reply: &mut [u8]) -> MkhiResult<usize> {
        self.send(request)?;
        self.receive(reply)
    }

    /// Read `buf.len()` bytes of a CSE file at `offset`
    ///
    /// Returns the number of bytes the CSE delivered, which may be less than
    /// requested. The buffer may not exceed the 128-byte reply data field.
    pub fn read_file(
        &mut self,
        path: &str,
        offset: u32,
        buf: &mut [u8],
        flags: ReadFileFlags,
    ) -> MkhiResult<usize> {
        self.ensure_enabled()?;
        if buf.len() > MCA_MAX_DATA_SIZE {
            return Err(MkhiError::RequestTooLarge {
                requested: buf.len(),
                capacity: MCA_MAX_DATA_SIZE,
            });
        }

        let request = ReadFileRequest::new(path, offset, buf.len(), flags)?;
        let mut reply = [0u8; READ_FILE_RESPONSE_SIZE];
        let len = self.exchange(&request.encode(), &mut reply)?;

        let response = ReadFileResponse::decode(&reply[..len], buf.len())?;
        let data = response.data();
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    /// Query the firmware version
    pub fn fw_version(&mut self) -> MkhiResult<FwVersionResponse> {
        let mut reply = [0u8; FW_VERSION_RESPONSE_SIZE];
        let len = self.exchange(&FwVersionRequest.encode(), &mut reply)?;
        FwVersionResponse::decode(&reply[..len])
    }
}
