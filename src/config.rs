//! Configuration types for the transfer coordinator

use crate::channel::ChannelSpec;
use crate::hal::ChannelId;

/// Description of one coupled transfer, immutable once resolved.
///
/// The payload size is the number of bytes pushed out on the transmit
/// channel; the reply size is the number of bytes expected back on the
/// receive channel and defaults to the payload size when unset.
///
/// # Example
///
/// ```ignore
/// let desc = TransferDescriptor::new(input.len())
///     .with_channels(2, 3)
///     .with_reply_size(4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferDescriptor {
    /// Channel selection (auto or an explicit pair)
    pub channels: ChannelSpec,
    /// Number of bytes to transmit
    pub payload_size: usize,
    /// Number of bytes to receive; `None` means "same as `payload_size`"
    pub reply_size: Option<usize>,
}

impl TransferDescriptor {
    /// Create a descriptor for a payload of `payload_size` bytes with
    /// auto-selected channels and a matching reply size.
    #[must_use]
    pub const fn new(payload_size: usize) -> Self {
        Self {
            channels: ChannelSpec::Auto,
            payload_size,
            reply_size: None,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Use exactly this transmit/receive channel pair.
    #[must_use]
    pub const fn with_channels(mut self, tx: ChannelId, rx: ChannelId) -> Self {
        self.channels = ChannelSpec::Explicit { tx, rx };
        self
    }

    /// Set the channel selection directly.
    #[must_use]
    pub const fn with_channel_spec(mut self, channels: ChannelSpec) -> Self {
        self.channels = channels;
        self
    }

    /// Expect `size` bytes back on the receive channel.
    #[must_use]
    pub const fn with_reply_size(mut self, size: usize) -> Self {
        self.reply_size = Some(size);
        self
    }

    /// The effective reply size: the configured value, or the payload size
    /// when none was set.
    #[must_use]
    pub const fn reply_size(&self) -> usize {
        match self.reply_size {
            Some(size) => size,
            None => self.payload_size,
        }
    }
}

/// Lifecycle of a transfer session.
///
/// The sequence runs `Created` through `TornDown` in order on success. A
/// failed transfer step unwinds back to `DeviceReady` with the device still
/// open; closing the session reaches `TornDown`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// No resources acquired yet
    #[default]
    Created,
    /// Device handle acquired
    DeviceReady,
    /// Transmit/receive channel pair resolved
    ChannelsResolved,
    /// Both DMA buffers acquired
    BuffersReady,
    /// The coupled transfer completed successfully
    TransferComplete,
    /// All resources released; terminal
    TornDown,
}

// =============================================================================
// Unit Tests
// =============================================================================
