use anyhow::{Context, Result};
use clap::Parser;
use linx_hist::{init_tracing, HistArgs};

fn main() -> Result<()> {
    // Parse command-line arguments and handle errors if they occur.
    let args = HistArgs::parse();

    init_tracing(args.verbose);

    args.run().context("Error replaying instruction traces")?;

    Ok(())
}
