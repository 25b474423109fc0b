//! Hardware Abstraction Layer
//!
//! This module defines the contract the coordinator consumes from an
//! underlying DMA engine driver. The driver owns everything register-level:
//! device bring-up, channel discovery, DMA-capable memory, and the coupled
//! transfer primitive itself. The coordinator only sequences calls against
//! this contract.
//!
//! # Modules
//!
//! - [`driver`]: The [`DmaDriver`] trait and channel identifier type

pub mod driver;

// Re-export commonly used types
pub use driver::{ChannelId, DmaDriver};
