//! The coupled two-way transfer invocation.
//!
//! One call, one attempt: the driver primitive overlaps the outbound and
//! inbound DMA streams in hardware and, with `wait` set, blocks the calling
//! thread until both directions complete or either fails. Retry policy, if
//! any, belongs to the caller.

use crate::buffer::DmaBuffer;
use crate::channel::ChannelPair;
use crate::error::{Error, Result};
use crate::hal::DmaDriver;

/// Run one coupled send/receive transaction over the given channel pair.
///
/// Transmits the full `tx` buffer and receives up to the full `rx` buffer.
/// Both buffers must have been acquired from `driver`; the guards carry
/// their driver reference, so a mismatch is a construction bug upstream.
///
/// # Errors
///
/// `TransferFailed` when the driver reports an error status. The receive
/// buffer contents are undefined in that case and must not be read.
pub fn two_way<D: DmaDriver>(
    driver: &D,
    channels: ChannelPair,
    tx: &DmaBuffer<'_, D>,
    rx: &mut DmaBuffer<'_, D>,
    wait: bool,
) -> Result<()> {
    debug_assert!(core::ptr::eq(driver, tx.driver()));
    debug_assert!(core::ptr::eq(driver, rx.driver()));

    let tx_len = tx.size();
    let rx_len = rx.size();

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "two-way transfer: tx channel {} ({} bytes), rx channel {} ({} bytes)",
        channels.tx,
        tx_len,
        channels.rx,
        rx_len
    );

    match driver.two_way_transfer(
        channels.tx,
        tx.region_ref(),
        tx_len,
        channels.rx,
        rx.region_mut(),
        rx_len,
        wait,
    ) {
        Ok(()) => Ok(()),
        Err(_status) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("two-way transfer failed with driver status {}", _status);
            Err(Error::TransferFailed)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
