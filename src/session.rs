//! End-to-end transfer sessions.
//!
//! A [`TransferSession`] composes the full sequence around one device
//! handle:
//!
//! 1. Device acquisition ([`TransferSession::open`])
//! 2. Channel resolution
//! 3. Transmit, then receive buffer acquisition
//! 4. The coupled two-way transfer
//! 5. Teardown in reverse order: buffers, then the device
//! 6. Outcome reporting
//!
//! Teardown never depends on how steps 2-4 ended: buffer release is driven
//! by scope exit inside [`execute`](TransferSession::execute), and device
//! release by dropping (or [`close`](TransferSession::close)-ing) the
//! session. The orchestration is strictly single-threaded; the only
//! blocking point is the driver's own transfer primitive.

use crate::buffer::DmaBuffer;
use crate::config::{SessionState, TransferDescriptor};
use crate::engine;
use crate::error::{Error, Result};
use crate::hal::{ChannelId, DmaDriver};

// =============================================================================
// Device Handle
// =============================================================================

/// Owner of one probed driver handle.
///
/// Exactly one live handle exists per session, and the driver's `destroy`
/// runs exactly once, when this owner is dropped.
pub struct Device<D: DmaDriver> {
    /// Vacated only by `Drop`.
    driver: Option<D>,
}

impl<D: DmaDriver> Device<D> {
    /// Probe the device and take ownership of the resulting handle.
    ///
    /// # Errors
    ///
    /// `DeviceInitFailed` when the probe returns `None`. This is fatal for
    /// the session; nothing was acquired, so there is nothing to roll back.
    pub fn open(probe: impl FnOnce() -> Option<D>) -> Result<Self> {
        match probe() {
            Some(driver) => Ok(Self {
                driver: Some(driver),
            }),
            None => Err(Error::DeviceInitFailed),
        }
    }

    /// Access the underlying driver handle.
    pub fn driver(&self) -> &D {
        match &self.driver {
            Some(driver) => driver,
            // The handle is only vacated when the owner is dropped.
            None => unreachable!(),
        }
    }

    /// Destroy the device handle.
    ///
    /// Equivalent to dropping the owner; provided so teardown can be
    /// spelled out at the end of a sequence.
    pub fn close(self) {}
}

impl<D: DmaDriver> Drop for Device<D> {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.destroy();
        }
    }
}

// =============================================================================
// Transfer Report
// =============================================================================

/// Outcome of a successful transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferReport {
    /// Channel the payload went out on
    pub tx_channel: ChannelId,
    /// Channel the reply came in on
    pub rx_channel: ChannelId,
    /// Bytes handed to the transmit stream
    pub bytes_sent: usize,
    /// Bytes copied out of the receive buffer into the caller's reply slice
    pub bytes_received: usize,
}

// =============================================================================
// Transfer Session
// =============================================================================

/// One end-to-end bidirectional transfer against one device.
///
/// # Example
///
/// ```ignore
/// let mut session = TransferSession::open(|| SomeDriver::probe("uio0"))?;
/// let desc = TransferDescriptor::new(payload.len());
/// let report = session.execute(&desc, &payload, &mut reply)?;
/// session.close();
/// ```
pub struct TransferSession<D: DmaDriver> {
    device: Device<D>,
    state: SessionState,
}

impl<D: DmaDriver> TransferSession<D> {
    /// Open a session by probing the device.
    ///
    /// # Errors
    ///
    /// `DeviceInitFailed` when the probe returns no handle.
    pub fn open(probe: impl FnOnce() -> Option<D>) -> Result<Self> {
        let device = Device::open(probe)?;

        #[cfg(feature = "defmt")]
        defmt::info!("DMA device initialized");

        Ok(Self {
            device,
            state: SessionState::DeviceReady,
        })
    }

    /// Current lifecycle state.
    #[inline(always)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The device this session owns.
    #[inline(always)]
    pub fn device(&self) -> &Device<D> {
        &self.device
    }

    /// Run one coupled transfer: push `payload` out and pull the reply in.
    ///
    /// `desc.payload_size` bytes go out (`payload` must cover them) and up
    /// to `desc.reply_size()` bytes come back; the received bytes are
    /// copied into `reply`, truncated to its length. Buffers are acquired
    /// transmit-first and released in reverse order before this method
    /// returns, whether it succeeds or fails. The device stays open, so a
    /// caller may run further transfers or [`close`](Self::close) the
    /// session.
    ///
    /// # Errors
    ///
    /// - `NoDevice` - auto-selection found an empty channel list
    /// - `OutOfMemory` - a buffer acquisition failed (any buffer already
    ///   acquired is released before the error propagates)
    /// - `TransferFailed` - the driver reported a transfer error; no
    ///   received data is exposed
    pub fn execute(
        &mut self,
        desc: &TransferDescriptor,
        payload: &[u8],
        reply: &mut [u8],
    ) -> Result<TransferReport> {
        let outcome = self.run_steps(desc, payload, reply);
        if outcome.is_err() {
            // Buffers are already gone; only the device survives a failed
            // attempt.
            self.state = SessionState::DeviceReady;
        }
        outcome
    }

    fn run_steps(
        &mut self,
        desc: &TransferDescriptor,
        payload: &[u8],
        reply: &mut [u8],
    ) -> Result<TransferReport> {
        let driver = self.device.driver();

        // Step 2: resolve the channel pair. Queries only; nothing to roll
        // back on failure.
        let channels = desc.channels.resolve(driver)?;
        self.state = SessionState::ChannelsResolved;

        let tx_size = desc.payload_size;
        let rx_size = desc.reply_size();
        debug_assert!(payload.len() >= tx_size);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "transfer: tx channel {}, rx channel {}, {} bytes out, {} bytes back",
            channels.tx,
            channels.rx,
            tx_size,
            rx_size
        );

        // Step 3: transmit buffer first, then receive. If the second
        // acquisition fails, the first guard drops on the way out.
        let driver = self.device.driver();
        let mut tx_buf = DmaBuffer::alloc(driver, tx_size)?;
        let n_in = tx_size.min(payload.len());
        tx_buf.as_mut_slice()[..n_in].copy_from_slice(&payload[..n_in]);

        let mut rx_buf = DmaBuffer::alloc(driver, rx_size)?;
        self.state = SessionState::BuffersReady;

        // Step 4: one attempt, blocking until both directions settle.
        engine::two_way(driver, channels, &tx_buf, &mut rx_buf, true)?;
        self.state = SessionState::TransferComplete;

        // Step 6 data: copy the reply out while the buffer is still live.
        let n_out = rx_size.min(reply.len());
        reply[..n_out].copy_from_slice(&rx_buf.as_slice()[..n_out]);

        // Step 5: reverse-of-acquisition release, spelled out.
        rx_buf.free();
        tx_buf.free();

        Ok(TransferReport {
            tx_channel: channels.tx,
            rx_channel: channels.rx,
            bytes_sent: tx_size,
            bytes_received: n_out,
        })
    }

    /// Tear the session down: the device handle is destroyed.
    ///
    /// Dropping the session has the same effect; `close` marks the
    /// teardown point explicitly.
    pub fn close(mut self) {
        self.state = SessionState::TornDown;

        #[cfg(feature = "defmt")]
        defmt::info!("DMA session torn down");
    }
}

// =============================================================================
// One-Shot Entry Point
// =============================================================================

/// Run one complete session: probe, transfer, tear down, report.
///
/// The device is destroyed before the outcome is returned, on success and
/// on every failure past probing.
///
/// # Errors
///
/// The first error encountered in the sequence; see [`Error`] for the
/// step-to-variant mapping.
pub fn run_transfer<D, P>(
    probe: P,
    desc: &TransferDescriptor,
    payload: &[u8],
    reply: &mut [u8],
) -> Result<TransferReport>
where
    D: DmaDriver,
    P: FnOnce() -> Option<D>,
{
    let mut session = TransferSession::open(probe)?;
    let outcome = session.execute(desc, payload, reply);
    session.close();
    outcome
}

// =============================================================================
// Unit Tests
// =============================================================================
