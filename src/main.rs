//! CLI entry point for wave function collapse tilemap generation

use clap::Parser;
use wavetile::io::cli::{Cli, Generator};
use wavetile::io::telemetry::init_tracing;

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let generator = Generator::new(cli);
    generator.run()?;
    Ok(())
}
