//! Driver contract for the underlying DMA engine.
//!
//! [`DmaDriver`] transcribes the surface of a userspace AXI-DMA-style driver
//! library: channel enumeration, a paired DMA-capable allocator, and a
//! coupled two-way transfer primitive. The coordinator never touches
//! hardware; every operation below is implemented by the driver crate
//! (or by a software backend such as the `loopback` feature's driver).

/// Identifier of a directional, independently schedulable DMA channel.
pub type ChannelId = u32;

/// Contract of the underlying DMA engine driver, as consumed by the
/// coordinator.
///
/// Probing is driver-specific (device files, uio names, PCI addresses) and
/// therefore lives outside this trait: the session accepts a probe closure
/// returning `Option<Self>`, where `None` means the device could not be
/// initialized.
///
/// # Contract
///
/// - [`transmit_channels`](Self::transmit_channels) and
///   [`receive_channels`](Self::receive_channels) are pure queries; the two
///   lists are disjoint.
/// - [`free_region`](Self::free_region) must only be called with a region
///   obtained from [`alloc_region`](Self::alloc_region) on the same driver
///   instance, with the size it was allocated at. The coordinator's buffer
///   guards enforce this pairing.
/// - [`destroy`](Self::destroy) consumes the handle, so a driver instance
///   can be torn down at most once.
pub trait DmaDriver {
    /// A DMA-capable memory region handed out by the driver allocator.
    ///
    /// Regions expose their bytes; the coordinator bounds every view by the
    /// size the region was allocated at.
    type Region: AsRef<[u8]> + AsMut<[u8]>;

    /// Transmit-capable channel identifiers reported by the device.
    fn transmit_channels(&self) -> &[ChannelId];

    /// Receive-capable channel identifiers reported by the device.
    fn receive_channels(&self) -> &[ChannelId];

    /// Allocate a DMA-capable region of `size` bytes.
    ///
    /// Returns `None` when the allocator cannot satisfy the request.
    fn alloc_region(&self, size: usize) -> Option<Self::Region>;

    /// Return a region to the driver allocator.
    ///
    /// `size` must be the size the region was allocated at.
    fn free_region(&self, region: Self::Region, size: usize);

    /// Start a coupled send/receive transaction: `tx_len` bytes out of
    /// `tx_region` on `tx_channel`, and up to `rx_len` bytes into
    /// `rx_region` on `rx_channel`.
    ///
    /// With `wait` set, the call blocks until both directions complete or
    /// either fails. `Err` carries the driver's raw (negative) status code;
    /// the receive region contents are undefined in that case.
    fn two_way_transfer(
        &self,
        tx_channel: ChannelId,
        tx_region: &Self::Region,
        tx_len: usize,
        rx_channel: ChannelId,
        rx_region: &mut Self::Region,
        rx_len: usize,
        wait: bool,
    ) -> core::result::Result<(), i32>;

    /// Release the device handle.
    ///
    /// Called exactly once per successfully probed handle; not expected to
    /// fail.
    fn destroy(self)
    where
        Self: Sized;
}
