//! Extract a red seal from a single scanned image.
//!
//! Usage:
//! ```sh
//! cargo run --example extract_seal -- scan.jpg seal.png
//! ```

use std::env;
use std::process;

use seal_extraction::{ExtractionParams, SealExtractor};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input> <output.png>", args[0]);
        process::exit(1);
    }

    let input = &args[1];
    let output = &args[2];

    let extractor = SealExtractor::new(ExtractionParams::default()).expect("valid params");
    let result = extractor.process_file(input.as_ref(), output.as_ref());

    if result.success {
        println!("Done: {}", result.message);
    } else {
        eprintln!("Error: {}", result.message);
        process::exit(1);
    }
}
