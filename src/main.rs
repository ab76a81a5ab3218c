//! CLI entry point for the wavetile solver

use clap::Parser;
use wavetile::io::cli::{Cli, Runner};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    let runner = Runner::new(cli);
    runner.run()?;
    Ok(())
}
