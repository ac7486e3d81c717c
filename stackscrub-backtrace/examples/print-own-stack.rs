//! Captures the current call stack and prints the cleaned frames, first as
//! renderer lines, then as the JSON a log pipeline would ingest.
//!
//! Run with `RUST_LOG=debug` to watch the pipeline's own logging:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example print-own-stack
//! ```

use stackscrub::{export, Frame, ScrubOptions};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let frames = checkout_pipeline();
    for frame in &frames {
        println!("{frame}");
    }

    println!("--- as JSON ---");
    export::write_json(&frames, std::io::stdout().lock())?;
    println!();
    Ok(())
}

fn checkout_pipeline() -> Vec<Frame> {
    validate_order()
}

#[inline(never)]
fn validate_order() -> Vec<Frame> {
    stackscrub_backtrace::capture().parse(&ScrubOptions::default())
}
