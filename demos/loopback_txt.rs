//! File loopback: read a payload file, push it through the engine, and
//! write whatever comes back on the receive side to an output file.
//!
//! File I/O stays in the demo; the coordinator itself only ever sees byte
//! slices.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example loopback_txt --features loopback -- tx.txt rx.txt
//! ```

use std::env;
use std::fs;
use std::process::ExitCode;

use ph_axidma::{SoftLoopback, TransferDescriptor, run_transfer};

fn byte_to_mb(bytes: usize) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let input_path = args.get(1).map_or("tx.txt", String::as_str);
    let output_path = args.get(2).map_or("rx.txt", String::as_str);

    let payload = match fs::read(input_path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Error opening input file `{input_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let desc = TransferDescriptor::new(payload.len());
    let mut reply = vec![0u8; desc.reply_size()];

    println!("DMA File Transfer Info:");
    println!("\tInput File Size: {:.2} MiB", byte_to_mb(payload.len()));
    println!("\tOutput File Size: {:.2} MiB", byte_to_mb(reply.len()));

    let report = match run_transfer(|| Some(SoftLoopback::new()), &desc, &payload, &mut reply) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("\tTransmit Channel: {}", report.tx_channel);
    println!("\tReceive Channel: {}", report.rx_channel);

    println!("Writing output data to `{output_path}`.");
    if let Err(err) = fs::write(output_path, &reply[..report.bytes_received]) {
        eprintln!("Error writing output file `{output_path}`: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
