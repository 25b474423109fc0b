//! Error types for the transfer coordinator
//!
//! Every session terminates with at most one error, and each variant maps to
//! exactly one step of the transfer sequence, so callers can always tell
//! which stage failed:
//!
//! - [`Error::InvalidArgument`]: channel pair validation
//! - [`Error::DeviceInitFailed`]: device probing
//! - [`Error::NoDevice`]: channel auto-selection
//! - [`Error::OutOfMemory`]: buffer acquisition
//! - [`Error::TransferFailed`]: the coupled transfer primitive

/// Terminal errors reported by a transfer session.
///
/// The coordinator performs no silent recovery or retry; the first error
/// encountered is surfaced to the caller after cleanup has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Exactly one side of the channel pair was specified; channels must be
    /// given both-or-neither
    InvalidArgument,
    /// The driver failed to produce a device handle; nothing was acquired
    DeviceInitFailed,
    /// The device reported no usable transmit or receive channels
    NoDevice,
    /// The driver allocator could not satisfy a buffer request
    OutOfMemory,
    /// The driver reported an error status for the coupled transfer; the
    /// receive buffer contents are undefined
    TransferFailed,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::InvalidArgument => {
                "both transmit and receive channels must be specified, or neither"
            }
            Error::DeviceInitFailed => "failed to initialize the DMA device",
            Error::NoDevice => "no transmit or receive channels were found",
            Error::OutOfMemory => "failed to allocate a DMA buffer",
            Error::TransferFailed => "DMA read/write transaction failed",
        }
    }
}

/// Result type alias for transfer operations
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn error_as_str_non_empty() {
        let variants = [
            Error::InvalidArgument,
            Error::DeviceInitFailed,
            Error::NoDevice,
            Error::OutOfMemory,
            Error::TransferFailed,
        ];

        for variant in variants {
            let s = variant.as_str();
            assert!(!s.is_empty(), "Error::{:?} has empty string", variant);
        }
    }

    #[test]
    fn error_display() {
        let display = format!("{}", Error::OutOfMemory);
        assert_eq!(display, "failed to allocate a DMA buffer");
    }

    #[test]
    fn error_display_transfer() {
        let display = format!("{}", Error::TransferFailed);
        assert!(display.contains("transaction failed"));
    }

    #[test]
    fn error_equality() {
        assert_eq!(Error::NoDevice, Error::NoDevice);
        assert_ne!(Error::NoDevice, Error::DeviceInitFailed);
    }

    #[test]
    fn error_clone() {
        let err = Error::InvalidArgument;
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }

    #[test]
    fn result_type_works() {
        fn test_fn() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(test_fn().unwrap(), 42);
    }

    #[test]
    fn result_propagates_with_question_mark() {
        fn inner() -> Result<()> {
            Err(Error::TransferFailed)
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert_eq!(outer(), Err(Error::TransferFailed));
    }
}
