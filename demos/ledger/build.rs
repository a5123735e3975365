//! Runs the doctag pipeline over `src/events.rs` and writes the generated
//! units into `OUT_DIR`, where `src/events.rs` includes them. The wrapper
//! test units run with the crate's unit tests.

use doctag::{GenerateOptions, Pipeline, PipelineOptions};
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/events.rs");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let options = PipelineOptions::default()
        .with_generate(GenerateOptions::default().with_wrapper_tests(true));
    let pipeline = Pipeline::new(options);

    let written = pipeline.write(Path::new("src/events.rs"), &out_dir)?;
    for path in &written {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    Ok(())
}
