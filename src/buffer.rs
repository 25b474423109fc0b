//! Scoped ownership of driver-allocated DMA buffers.
//!
//! [`DmaBuffer`] pairs a driver region with the size it was allocated at
//! and hands it back to the same driver exactly once, when the guard goes
//! out of scope. Release ordering therefore follows Rust drop order: the
//! last buffer acquired in a scope is the first one released, on the
//! success path and on every early return alike. Double release and
//! use-after-release cannot be expressed against this type.

use crate::error::{Error, Result};
use crate::hal::DmaDriver;

/// RAII guard over one DMA-capable region.
///
/// Slice access is bounded by the allocation size; the region itself never
/// escapes the guard.
pub struct DmaBuffer<'d, D: DmaDriver> {
    driver: &'d D,
    /// Vacated only by `free`/`Drop`, both of which end the guard.
    region: Option<D::Region>,
    size: usize,
}

impl<'d, D: DmaDriver> DmaBuffer<'d, D> {
    /// Acquire a DMA-capable buffer of `size` bytes from the driver.
    ///
    /// # Errors
    ///
    /// `OutOfMemory` when the driver allocator refuses the request. No
    /// guard exists in that case, so there is nothing to release.
    pub fn alloc(driver: &'d D, size: usize) -> Result<Self> {
        match driver.alloc_region(size) {
            Some(region) => Ok(Self {
                driver,
                region: Some(region),
                size,
            }),
            None => Err(Error::OutOfMemory),
        }
    }

    /// The size this buffer was allocated at.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// View the buffer contents, bounded by the allocation size.
    pub fn as_slice(&self) -> &[u8] {
        let bytes = self.region_ref().as_ref();
        &bytes[..self.size.min(bytes.len())]
    }

    /// Mutably view the buffer contents, bounded by the allocation size.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let size = self.size;
        let bytes = self.region_mut().as_mut();
        let len = size.min(bytes.len());
        &mut bytes[..len]
    }

    /// Release the buffer back to the driver.
    ///
    /// Equivalent to dropping the guard; provided for call sites that want
    /// the release order spelled out.
    pub fn free(mut self) {
        self.release();
    }

    pub(crate) fn driver(&self) -> &'d D {
        self.driver
    }

    pub(crate) fn region_ref(&self) -> &D::Region {
        match &self.region {
            Some(region) => region,
            // The region is only vacated when the guard is consumed.
            None => unreachable!(),
        }
    }

    pub(crate) fn region_mut(&mut self) -> &mut D::Region {
        match &mut self.region {
            Some(region) => region,
            None => unreachable!(),
        }
    }

    fn release(&mut self) {
        if let Some(region) = self.region.take() {
            self.driver.free_region(region, self.size);
        }
    }
}

impl<D: DmaDriver> Drop for DmaBuffer<'_, D> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<D: DmaDriver> core::fmt::Debug for DmaBuffer<'_, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DmaBuffer")
            .field("size", &self.size)
            .field("held", &self.region.is_some())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
