//! `linx-hist` replays recorded Linx instruction traces through the instruction histogram and
//! writes the ranked report, standing in for the emulator host.

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use linx_core::EncodingTable;
use linx_insn_hist::{
    insn_trace::{read_trace, replay_parallel},
    HistOptions, InsnHist, DEFAULT_TOP_N,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub const LINX_HIST_VERSION_MESSAGE: &str = env!("CARGO_PKG_VERSION");

/// Installs the global tracing subscriber.  `RUST_LOG` takes precedence over `verbose`.
pub fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Linx instruction histogram options
#[derive(Parser, Debug, Clone)]
#[command(version = LINX_HIST_VERSION_MESSAGE, about, long_about = None)]
#[command(propagate_version = true)]
pub struct HistArgs {
    /// Instruction trace files, one executed instruction per line as hex bytes
    #[clap(value_name = "TRACE", required = true)]
    pub traces: Vec<PathBuf>,
    /// Sets the report output file path.  No report is written if empty or missing
    #[clap(short, long, value_name = "OUT_FILE")]
    pub out: Option<String>,
    /// Sets the number of mnemonics of the ranked report.  Invalid values fall back to 50
    #[clap(
        short,
        long,
        value_name = "TOP_N",
        allow_hyphen_values = true,
        default_value_t = DEFAULT_TOP_N.to_string()
    )]
    pub top: String,
    /// Sets the number of worker threads recording executions.  0 uses one per core
    #[clap(short, long, value_name = "JOBS", default_value = "0")]
    pub jobs: usize,
    /// Prints the ranked report to the console
    #[clap(short, long, default_value = "false")]
    pub print: bool,
    /// Loads the encoding table from an ISA JSON description instead of the built-in one
    #[clap(long, value_name = "ISA_JSON")]
    pub table: Option<PathBuf>,
    /// Sets the verbose mode
    #[clap(short, long, default_value = "false")]
    pub verbose: bool,
}

impl HistArgs {
    pub fn hist_options(&self) -> HistOptions {
        let mut options = HistOptions::default();
        if let Some(out) = &self.out {
            options.set_out(out);
        }
        options.set_top(&self.top);
        options
    }

    fn encoding_table(&self) -> Result<EncodingTable> {
        let Some(path) = &self.table else {
            return Ok(EncodingTable::linx());
        };
        let file = File::open(path)
            .with_context(|| format!("Failed to open encoding table {}", path.display()))?;
        EncodingTable::from_json(BufReader::new(file))
            .with_context(|| format!("Failed to load encoding table {}", path.display()))
    }

    pub fn run(&self) -> Result<()> {
        let options = self.hist_options();
        if self.verbose {
            print!("{options}");
        }

        let table = self.encoding_table()?;
        info!("linx-hist: classifying with {} instruction forms", table.len());
        let hist = InsnHist::with_table(table, options);

        for path in &self.traces {
            let insns = read_trace(path)?;
            let sites = replay_parallel(&hist, &insns, self.jobs)?;
            info!(
                "linx-hist: replayed {} instructions ({} distinct) from {}",
                insns.len(),
                sites,
                path.display()
            );
        }

        if self.print {
            print!("{}", hist.report().to_text());
        }
        hist.shutdown();

        Ok(())
    }
}
