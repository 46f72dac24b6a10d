//! Command line entry point: builds one bracket preset and exports it.

use anyhow::Result;
use bracket_builder::{show, write_outputs, BracketBuilder, Variant};
use clap::Parser;
use config::constants::{Tessellation, DEFAULT_FILLET_SEGMENTS, DEFAULT_OUTPUT_DIR, DEFAULT_SEGMENTS};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate a 3D-printable bed-rail bracket as STL.
#[derive(Parser, Debug)]
#[clap(version)]
struct Opts {
    /// Bracket design to build.
    #[clap(long, value_enum, default_value_t = Variant::default())]
    variant: Variant,

    /// Directory the STL is written to.
    #[clap(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Segments around the body circle.
    #[clap(long, default_value_t = DEFAULT_SEGMENTS)]
    segments: u32,

    /// Segments per quarter circle of fillet arcs.
    #[clap(long, default_value_t = DEFAULT_FILLET_SEGMENTS)]
    fillet_segments: u32,

    /// Open the exported file in the system viewer.
    #[clap(long)]
    show: bool,

    /// Print the build report as JSON.
    #[clap(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let tess = Tessellation::new(opts.segments, opts.fillet_segments)?;

    let bracket = BracketBuilder::new(opts.variant.params())
        .with_tessellation(tess)
        .build()?;
    let path = write_outputs(&bracket.solid, &opts.output_dir, opts.variant.output_stem())?;

    if opts.json {
        let json = serde_json::json!({
            "variant": opts.variant,
            "path": path,
            "report": bracket.report,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("Model saved to {}", path.display());
        println!("{}", bracket.report);
    }

    if opts.show {
        show(&path);
    }

    Ok(())
}
