//! Testing utilities and mock implementations
//!
//! This module provides a mock DMA driver for testing the coordinator on
//! the host without hardware access. The mock records every driver call in
//! a shared log so tests can assert acquisition/release pairing, ordering,
//! and teardown counts, and it can be scripted to fail allocation or the
//! transfer primitive.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use crate::hal::{ChannelId, DmaDriver};

// =============================================================================
// Call Log
// =============================================================================

/// One recorded invocation of the coupled transfer primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferCall {
    pub tx_channel: ChannelId,
    pub tx_len: usize,
    pub rx_channel: ChannelId,
    pub rx_len: usize,
    pub wait: bool,
}

/// Everything the mock driver was asked to do, in order.
#[derive(Debug, Default)]
pub struct DriverLog {
    /// Successful allocations: (region id, size)
    pub allocs: Vec<(u64, usize)>,
    /// Releases: (region id, size)
    pub frees: Vec<(u64, usize)>,
    /// Transfer primitive invocations
    pub transfers: Vec<TransferCall>,
    /// Number of `destroy` calls
    pub destroys: usize,
}

/// Log handle that outlives the driver (the session consumes the driver,
/// tests keep the log).
pub type SharedLog = Rc<RefCell<DriverLog>>;

// =============================================================================
// Mock Region
// =============================================================================

/// A mock DMA region: plain host memory plus an identity for the log.
#[derive(Debug)]
pub struct MockRegion {
    id: u64,
    bytes: Vec<u8>,
}

impl AsRef<[u8]> for MockRegion {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsMut<[u8]> for MockRegion {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

// =============================================================================
// Mock Driver
// =============================================================================

/// Mock DMA driver with scripted failures and a shared call log.
///
/// By default every allocation succeeds and the transfer primitive copies
/// `min(tx_len, rx_len)` bytes from the transmit region into the receive
/// region, so loopback identity holds end to end.
///
/// # Example
///
/// ```ignore
/// let driver = MockDriver::new(&[2, 5], &[3, 7]);
/// let log = driver.clone_log();
/// run_transfer(|| Some(driver), &desc, &payload, &mut reply).unwrap();
/// assert_eq!(log.borrow().destroys, 1);
/// ```
pub struct MockDriver {
    tx_channels: Vec<ChannelId>,
    rx_channels: Vec<ChannelId>,
    log: SharedLog,
    next_region_id: Cell<u64>,
    /// Remaining successful allocations before the allocator refuses;
    /// `None` means unlimited.
    alloc_budget: Cell<Option<usize>>,
    /// Scripted transfer status; `Some(code)` makes every transfer fail.
    transfer_status: Cell<Option<i32>>,
}

impl MockDriver {
    /// Create a mock reporting the given channel lists.
    pub fn new(tx_channels: &[ChannelId], rx_channels: &[ChannelId]) -> Self {
        Self {
            tx_channels: tx_channels.to_vec(),
            rx_channels: rx_channels.to_vec(),
            log: Rc::new(RefCell::new(DriverLog::default())),
            next_region_id: Cell::new(1),
            alloc_budget: Cell::new(None),
            transfer_status: Cell::new(None),
        }
    }

    /// Get a handle on the call log that survives the driver.
    pub fn clone_log(&self) -> SharedLog {
        Rc::clone(&self.log)
    }

    /// Allow `n` more successful allocations, then refuse.
    pub fn fail_allocs_after(&self, n: usize) {
        self.alloc_budget.set(Some(n));
    }

    /// Make every transfer report the given driver status.
    pub fn fail_transfer_with(&self, status: i32) {
        self.transfer_status.set(Some(status));
    }
}

impl DmaDriver for MockDriver {
    type Region = MockRegion;

    fn transmit_channels(&self) -> &[ChannelId] {
        &self.tx_channels
    }

    fn receive_channels(&self) -> &[ChannelId] {
        &self.rx_channels
    }

    fn alloc_region(&self, size: usize) -> Option<MockRegion> {
        if let Some(budget) = self.alloc_budget.get() {
            if budget == 0 {
                return None;
            }
            self.alloc_budget.set(Some(budget - 1));
        }

        let id = self.next_region_id.get();
        self.next_region_id.set(id + 1);
        self.log.borrow_mut().allocs.push((id, size));

        Some(MockRegion {
            id,
            bytes: std::vec![0u8; size],
        })
    }

    fn free_region(&self, region: MockRegion, size: usize) {
        self.log.borrow_mut().frees.push((region.id, size));
    }

    fn two_way_transfer(
        &self,
        tx_channel: ChannelId,
        tx_region: &MockRegion,
        tx_len: usize,
        rx_channel: ChannelId,
        rx_region: &mut MockRegion,
        rx_len: usize,
        wait: bool,
    ) -> core::result::Result<(), i32> {
        self.log.borrow_mut().transfers.push(TransferCall {
            tx_channel,
            tx_len,
            rx_channel,
            rx_len,
            wait,
        });

        if let Some(status) = self.transfer_status.get() {
            return Err(status);
        }

        // Hardware loopback: whatever goes out on tx comes back on rx.
        let n = tx_len.min(rx_len);
        rx_region.bytes[..n].copy_from_slice(&tx_region.bytes[..n]);
        Ok(())
    }

    fn destroy(self) {
        self.log.borrow_mut().destroys += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_reports_configured_channels() {
        let driver = MockDriver::new(&[2, 5], &[3, 7]);
        assert_eq!(driver.transmit_channels(), &[2, 5]);
        assert_eq!(driver.receive_channels(), &[3, 7]);
    }

    #[test]
    fn mock_alloc_logs_and_zeroes() {
        let driver = MockDriver::new(&[0], &[1]);
        let region = driver.alloc_region(8).unwrap();
        assert_eq!(region.as_ref(), &[0u8; 8]);
        assert_eq!(driver.clone_log().borrow().allocs.len(), 1);
    }

    #[test]
    fn mock_alloc_budget_refuses_after_limit() {
        let driver = MockDriver::new(&[0], &[1]);
        driver.fail_allocs_after(1);
        assert!(driver.alloc_region(8).is_some());
        assert!(driver.alloc_region(8).is_none());
    }

    #[test]
    fn mock_transfer_copies_minimum_length() {
        let driver = MockDriver::new(&[0], &[1]);
        let mut tx = driver.alloc_region(4).unwrap();
        let mut rx = driver.alloc_region(2).unwrap();
        tx.as_mut().copy_from_slice(&[1, 2, 3, 4]);

        driver
            .two_way_transfer(0, &tx, 4, 1, &mut rx, 2, true)
            .unwrap();

        assert_eq!(rx.as_ref(), &[1, 2]);
    }

    #[test]
    fn mock_scripted_transfer_failure_surfaces_status() {
        let driver = MockDriver::new(&[0], &[1]);
        driver.fail_transfer_with(-71);
        let tx = driver.alloc_region(1).unwrap();
        let mut rx = driver.alloc_region(1).unwrap();

        let status = driver.two_way_transfer(0, &tx, 1, 1, &mut rx, 1, true);
        assert_eq!(status, Err(-71));
    }

    #[test]
    fn mock_destroy_counts_in_log() {
        let driver = MockDriver::new(&[0], &[1]);
        let log = driver.clone_log();
        driver.destroy();
        assert_eq!(log.borrow().destroys, 1);
    }
}
