//! In-memory loopback check: push a known ramp through the engine and
//! verify the identical ramp comes back on the receive side.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example loopback_data --features loopback
//! ```

use ph_axidma::{SoftLoopback, TransferDescriptor, run_transfer};

/// Size of both DMA buffers in bytes.
const MAX_LEN: usize = 800;
/// First word of the test ramp.
const VALUE: u32 = 788;
/// Number of ramp words to check.
const LEN: usize = 10;

fn main() -> Result<(), ph_axidma::Error> {
    let mut payload = [0u8; MAX_LEN];
    for i in 0..LEN {
        let word = (VALUE + i as u32).to_le_bytes();
        payload[i * 4..i * 4 + 4].copy_from_slice(&word);
    }

    let mut reply = [0u8; MAX_LEN];
    let report = run_transfer(
        || Some(SoftLoopback::new()),
        &TransferDescriptor::new(MAX_LEN),
        &payload,
        &mut reply,
    )?;

    println!(
        "transferred {} bytes out on channel {}, {} bytes back on channel {}",
        report.bytes_sent, report.tx_channel, report.bytes_received, report.rx_channel
    );

    println!("start the loopback test");
    let mut mismatches = 0;
    for index in 0..LEN {
        let mut word = [0u8; 4];
        word.copy_from_slice(&reply[index * 4..index * 4 + 4]);
        let received = u32::from_le_bytes(word);
        let expected = VALUE + index as u32;
        println!("ps:{expected} == pl:{received}");
        if received != expected {
            mismatches += 1;
        }
    }

    if mismatches == 0 {
        println!("loopback test passed");
        Ok(())
    } else {
        eprintln!("loopback test failed: {mismatches} mismatched words");
        Err(ph_axidma::Error::TransferFailed)
    }
}
