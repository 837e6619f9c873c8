//! Text Tetris demo binary.
//!
//! Prints a banner, plays the scripted opening (spawn, fall, rotate) on a
//! fresh board and dumps the grid to stdout. Logs go to stderr.

use std::io;

use anyhow::Result;
use tracing::Level;

use text_tetris::demo::{parse_demo_args, run_demo};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_demo_args(&args)?;

    let level = if options.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    println!("tetris!");
    run_demo(&options, io::stdout().lock())?;
    Ok(())
}
