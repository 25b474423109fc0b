//! Channel selection for the coupled transfer.
//!
//! A transfer needs one transmit and one receive channel. Callers either
//! name both explicitly or name neither and let the coordinator pick the
//! lowest-numbered channel of each direction reported by the device.
//! Naming exactly one side is always an error; [`ChannelSpec`] makes the
//! half-specified state unrepresentable once constructed.

use crate::error::{Error, Result};
use crate::hal::{ChannelId, DmaDriver};

/// How the transmit/receive channel pair is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelSpec {
    /// Use the lowest-numbered transmit and receive channels the device
    /// reports
    #[default]
    Auto,
    /// Use exactly these channels
    Explicit {
        /// Transmit channel identifier
        tx: ChannelId,
        /// Receive channel identifier
        rx: ChannelId,
    },
}

/// A resolved transmit/receive channel pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelPair {
    /// Transmit channel identifier
    pub tx: ChannelId,
    /// Receive channel identifier
    pub rx: ChannelId,
}

impl ChannelSpec {
    /// Build a spec from optional user-supplied channels.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if exactly one of the pair is supplied. The missing
    /// side is never inferred.
    pub fn from_options(tx: Option<ChannelId>, rx: Option<ChannelId>) -> Result<Self> {
        match (tx, rx) {
            (None, None) => Ok(ChannelSpec::Auto),
            (Some(tx), Some(rx)) => Ok(ChannelSpec::Explicit { tx, rx }),
            _ => Err(Error::InvalidArgument),
        }
    }

    /// Resolve the spec against the device's reported channel lists.
    ///
    /// In `Auto` mode the numerically lowest identifier of each direction
    /// wins, regardless of the order the driver reports them in. Explicit
    /// pairs are passed through unchanged and are not checked for
    /// membership in the reported lists; the driver rejects unknown
    /// channels itself.
    ///
    /// # Errors
    ///
    /// `NoDevice` if auto-selection finds an empty transmit or receive
    /// channel list.
    pub fn resolve<D: DmaDriver>(&self, driver: &D) -> Result<ChannelPair> {
        match *self {
            ChannelSpec::Explicit { tx, rx } => Ok(ChannelPair { tx, rx }),
            ChannelSpec::Auto => {
                let tx = driver
                    .transmit_channels()
                    .iter()
                    .copied()
                    .min()
                    .ok_or(Error::NoDevice)?;
                let rx = driver
                    .receive_channels()
                    .iter()
                    .copied()
                    .min()
                    .ok_or(Error::NoDevice)?;
                Ok(ChannelPair { tx, rx })
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
