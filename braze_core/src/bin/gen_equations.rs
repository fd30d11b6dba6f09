//! Render the equation catalog to markdown.
//!
//! ```bash
//! cargo run --bin gen-equations [output-path]
//! ```
//!
//! Without an argument the reference lands next to the catalog source, at
//! `braze_core/src/equations/EQUATIONS.md` (paths are relative to the
//! workspace root).

use std::env;
use std::path::PathBuf;

use braze_core::equations::{generate_equations_markdown, ALL_EQUATIONS};
use braze_core::file_io::write_atomic;

const DEFAULT_OUTPUT: &str = "braze_core/src/equations/EQUATIONS.md";

fn main() {
    let output_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let markdown = generate_equations_markdown();

    if let Err(e) = write_atomic(&output_path, markdown.as_bytes()) {
        eprintln!("Could not write equations reference: {}", e);
        std::process::exit(1);
    }

    println!(
        "Equations reference: {} equations -> {}",
        ALL_EQUATIONS.len(),
        output_path.display()
    );
}
