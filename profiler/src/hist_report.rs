//! Ranked instruction histogram report
//!
//! The report is built once the host has stopped executing instructions.  Mnemonics that were
//! translated but never executed are left out, and the rest are ranked by execution count, then
//! by mnemonic, so that the same final counts always give the same report.
//!
//! ```text
//! {
//!   "total_insns": 200,
//!   "top_n": 2,
//!   "top": [
//!     { "mnemonic": "A", "count": 100, "pct": 50.0 },
//!     { "mnemonic": "B", "count": 50, "pct": 25.0 }
//!   ],
//!   "all": { "A": 100, "B": 50, "C": 50 }
//! }
//! ```

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::Serialize;

use crate::{CounterRegistry, HistError, RegistrySnapshot, StatsReport};

/// One ranked entry of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistEntry {
    pub mnemonic: String,
    pub count: u64,
    /// Share of all executed instructions, in percent
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistReport {
    pub total_insns: u64,
    pub top_n: usize,
    /// First `top_n` ranked entries
    pub top: Vec<HistEntry>,
    /// Every executed mnemonic, in rank order
    pub all: IndexMap<String, u64>,
}

/// Percentage of `count` over `total`, 0 if nothing was executed
fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

impl HistReport {
    pub fn build(registry: &CounterRegistry, top_n: usize) -> HistReport {
        Self::from_snapshot(registry.snapshot(), top_n)
    }

    pub fn from_snapshot(snapshot: RegistrySnapshot, top_n: usize) -> HistReport {
        let mut ranked: Vec<(String, u64)> = snapshot
            .counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(mnemonic, count)| (mnemonic.to_string(), count))
            .collect();
        ranked.sort_by(|(ma, ca), (mb, cb)| cb.cmp(ca).then_with(|| ma.cmp(mb)));

        let top = ranked
            .iter()
            .take(top_n)
            .map(|(mnemonic, count)| HistEntry {
                mnemonic: mnemonic.clone(),
                count: *count,
                pct: percentage(*count, snapshot.total),
            })
            .collect();

        HistReport { total_insns: snapshot.total, top_n, top, all: ranked.into_iter().collect() }
    }

    /// Serializes the report as pretty printed JSON, ending with a new line
    pub fn to_json(&self) -> Result<String, HistError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), HistError> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|source| HistError::ReportIo { path: path.to_path_buf(), source })
    }

    /// Renders the report as a plain text table
    pub fn to_text(&self) -> String {
        let mut report = StatsReport::new();
        report.set_label_width(24);
        report.title("Instruction histogram");
        report.add_count("Total instructions", self.total_insns);
        report.add_count("Executed mnemonics", self.all.len() as u64);
        report.title_top_count_perc(&format!("Top {} mnemonics", self.top_n));
        report.add_separator();
        for entry in &self.top {
            report.add_top_count_perc(&entry.mnemonic, entry.count, entry.pct);
        }
        report.output
    }
}
