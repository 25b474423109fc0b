//! AXI DMA Transfer Coordinator
//!
//! A `no_std` coordinator for one coupled, bidirectional transfer through a
//! DMA engine: a payload is pushed out on a transmit channel while the
//! result is pulled in on a receive channel, using driver-managed
//! DMA-capable buffers.
//!
//! # Architecture
//!
//! The crate is organized around four pieces:
//!
//! 1. **Driver contract** ([`hal`]): the [`DmaDriver`] trait the underlying
//!    engine driver implements: channel enumeration, the paired DMA
//!    allocator, and the coupled transfer primitive
//! 2. **Channel selection** ([`channel`]): explicit pairs or
//!    lowest-numbered auto-selection, with the both-or-neither rule
//!    enforced by type
//! 3. **Buffer ownership** ([`buffer`]): RAII guards over driver regions,
//!    released in reverse acquisition order on every exit path
//! 4. **Session orchestration** ([`session`]): device acquisition through
//!    transfer to unconditional, ordered teardown
//!
//! Everything register-level (descriptor rings, interrupts, the actual
//! wait for completion) lives behind the driver contract and is out of
//! scope here.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and step logging
//! - `critical-section`: Enable the [`sync::SharedSession`] exclusive-access wrapper
//! - `loopback`: Host-side software loopback backend (used by the demos)
//!
//! # Example
//!
//! ```ignore
//! use ph_axidma::{TransferDescriptor, run_transfer};
//!
//! let payload = [0x55u8; 800];
//! let mut reply = [0u8; 800];
//!
//! // Auto-select the lowest-numbered channel pair and loop the payload
//! // through the engine.
//! let report = run_transfer(
//!     || MyAxiDma::probe("/dev/axidma0"),
//!     &TransferDescriptor::new(payload.len()),
//!     &payload,
//!     &mut reply,
//! )?;
//!
//! assert_eq!(report.bytes_received, 800);
//! ```
//!
//! The orchestration is strictly single-threaded. "Simultaneous" refers to
//! the hardware-level overlap of the two DMA streams inside the driver's
//! blocking primitive, never to concurrency in this crate; once the
//! transfer starts, the session commits to waiting for its terminal
//! outcome.

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod buffer;
pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod hal;
pub mod session;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

#[cfg(feature = "loopback")]
#[cfg_attr(docsrs, doc(cfg(feature = "loopback")))]
pub mod loopback;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use buffer::DmaBuffer;
pub use channel::{ChannelPair, ChannelSpec};
pub use config::{SessionState, TransferDescriptor};
pub use error::{Error, Result};
pub use hal::{ChannelId, DmaDriver};
pub use session::{Device, TransferReport, TransferSession, run_transfer};

// Re-export the loopback backend when enabled
#[cfg(feature = "loopback")]
pub use loopback::SoftLoopback;

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedSession;
