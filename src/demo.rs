//! Scripted demo session: spawn, fall one row, rotate, dump the grid.

use std::io::Write;

use anyhow::{anyhow, Result};

use crate::core::{Board, BoardConfig, BoardSnapshot};
use crate::term::TextRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DemoOptions {
    pub config: BoardConfig,
    /// Hard-drop the piece before dumping the grid
    pub slam: bool,
    /// Log at debug level instead of warn
    pub verbose: bool,
}

pub fn parse_demo_args(args: &[String]) -> Result<DemoOptions> {
    let mut options = DemoOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                options.config.width = parse_value(args.get(i), "--width")?;
            }
            "--height" => {
                i += 1;
                options.config.height = parse_value(args.get(i), "--height")?;
            }
            "--seed" => {
                i += 1;
                options.config.seed = Some(parse_value(args.get(i), "--seed")?);
            }
            "--slam" => options.slam = true,
            "--verbose" | "-v" => options.verbose = true,
            other => {
                return Err(anyhow!("demo: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    options.config.validate()?;
    Ok(options)
}

fn parse_value<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> Result<T> {
    let v = value.ok_or_else(|| anyhow!("demo: missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("demo: invalid {} value: {}", flag, v))
}

/// Run tick, tick, rotate(1) (and optionally slam) on a fresh board and
/// write the resulting grid to `out`.
pub fn run_demo<W: Write>(options: &DemoOptions, out: W) -> Result<BoardSnapshot> {
    let mut board = Board::from_config(&options.config)?;
    let mut renderer = TextRenderer::new(out);

    board.tick();
    board.tick();
    board.rotate(1);
    if options.slam {
        board.slam();
    }

    let snapshot = board.snapshot();
    renderer.draw(&snapshot)?;
    Ok(snapshot)
}
