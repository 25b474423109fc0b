//! Host-side software loopback backend.
//!
//! [`SoftLoopback`] implements the driver contract entirely in host memory:
//! allocation hands out plain byte regions and the coupled transfer copies
//! the transmit bytes straight into the receive region. Useful for demos
//! and for exercising the coordinator on machines without a DMA engine.
//!
//! Requires the `loopback` feature (host only).

#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::Cell;
use std::vec::Vec;

use crate::hal::{ChannelId, DmaDriver};

/// A loopback region: plain host memory standing in for DMA-capable memory.
#[derive(Debug)]
pub struct LoopbackRegion {
    bytes: Vec<u8>,
}

impl AsRef<[u8]> for LoopbackRegion {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsMut<[u8]> for LoopbackRegion {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// Software loopback driver.
///
/// Reports configurable channel lists and routes every transmit straight
/// back to the paired receive, so `rx[i] == tx[i]` for all transferred
/// bytes.
///
/// # Example
///
/// ```ignore
/// let report = run_transfer(
///     || Some(SoftLoopback::new()),
///     &TransferDescriptor::new(payload.len()),
///     &payload,
///     &mut reply,
/// )?;
/// assert_eq!(reply, payload);
/// ```
#[derive(Debug)]
pub struct SoftLoopback {
    tx_channels: Vec<ChannelId>,
    rx_channels: Vec<ChannelId>,
    /// Regions currently out with callers; drops back to zero when every
    /// buffer has been returned.
    live_regions: Cell<usize>,
}

impl SoftLoopback {
    /// Create a loopback device with one transmit channel (0) and one
    /// receive channel (1).
    pub fn new() -> Self {
        Self::with_channels(&[0], &[1])
    }

    /// Create a loopback device reporting the given channel lists.
    pub fn with_channels(tx_channels: &[ChannelId], rx_channels: &[ChannelId]) -> Self {
        Self {
            tx_channels: tx_channels.to_vec(),
            rx_channels: rx_channels.to_vec(),
            live_regions: Cell::new(0),
        }
    }

    /// Number of regions currently held by callers.
    pub fn live_regions(&self) -> usize {
        self.live_regions.get()
    }
}

impl Default for SoftLoopback {
    fn default() -> Self {
        Self::new()
    }
}

impl DmaDriver for SoftLoopback {
    type Region = LoopbackRegion;

    fn transmit_channels(&self) -> &[ChannelId] {
        &self.tx_channels
    }

    fn receive_channels(&self) -> &[ChannelId] {
        &self.rx_channels
    }

    fn alloc_region(&self, size: usize) -> Option<LoopbackRegion> {
        self.live_regions.set(self.live_regions.get() + 1);
        Some(LoopbackRegion {
            bytes: std::vec![0u8; size],
        })
    }

    fn free_region(&self, region: LoopbackRegion, _size: usize) {
        self.live_regions.set(self.live_regions.get() - 1);
        drop(region);
    }

    fn two_way_transfer(
        &self,
        _tx_channel: ChannelId,
        tx_region: &LoopbackRegion,
        tx_len: usize,
        _rx_channel: ChannelId,
        rx_region: &mut LoopbackRegion,
        rx_len: usize,
        _wait: bool,
    ) -> core::result::Result<(), i32> {
        // Completes synchronously; `wait` has nothing left to wait for.
        let n = tx_len.min(rx_len).min(tx_region.bytes.len());
        let n = n.min(rx_region.bytes.len());
        rx_region.bytes[..n].copy_from_slice(&tx_region.bytes[..n]);
        Ok(())
    }

    fn destroy(self) {}
}

// =============================================================================
// Unit Tests
// =============================================================================
