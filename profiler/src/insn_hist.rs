//! Instruction histogram context
//!
//! Bundles the encoding table, the counter registry and the options.  The host creates one
//! context at startup and shares it by reference with every translation and execution callback:
//!
//! ```text
//! translate block:  for each insn  translate(bytes, len) --> CounterHandle (stored by the host)
//! execute insn:     record(&handle)
//! exit:             shutdown() --> report file
//! ```

use linx_core::{mnemonic_from_disassembly, EncodingTable, ILLEGAL_MNEMONIC};
use tracing::{info, warn};

use crate::{CounterHandle, CounterRegistry, HistOptions, HistReport};

#[derive(Debug, Default)]
pub struct InsnHist {
    table: EncodingTable,
    registry: CounterRegistry,
    options: HistOptions,
}

impl InsnHist {
    /// Creates a context classifying with the compiled-in Linx table
    pub fn new(options: HistOptions) -> Self {
        Self::with_table(EncodingTable::linx(), options)
    }

    pub fn with_table(table: EncodingTable, options: HistOptions) -> Self {
        Self { table, registry: CounterRegistry::new(), options }
    }

    pub fn table(&self) -> &EncodingTable {
        &self.table
    }

    pub fn registry(&self) -> &CounterRegistry {
        &self.registry
    }

    pub fn options(&self) -> &HistOptions {
        &self.options
    }

    #[inline]
    pub fn classify(&self, bytes: &[u8], length: usize) -> &str {
        self.table.classify(bytes, length)
    }

    pub fn resolve(&self, mnemonic: &str) -> CounterHandle {
        self.registry.resolve(mnemonic)
    }

    #[inline(always)]
    pub fn record(&self, handle: &CounterHandle) {
        self.registry.record(handle);
    }

    /// Classifies one static instruction site and returns the handle to record its executions
    pub fn translate(&self, bytes: &[u8], length: usize) -> CounterHandle {
        self.registry.resolve(self.table.classify(bytes, length))
    }

    /// Same as [`InsnHist::translate`], keyed by the first token of the host's disassembly
    pub fn translate_disassembly(&self, disassembly: &str) -> CounterHandle {
        self.registry.resolve(mnemonic_from_disassembly(disassembly).unwrap_or(ILLEGAL_MNEMONIC))
    }

    pub fn report(&self) -> HistReport {
        HistReport::build(&self.registry, self.options.top_n)
    }

    /// Writes the report to the configured path, if any.  A failure to write is logged and
    /// otherwise ignored.  Returns true if the report was written.
    pub fn shutdown(&self) -> bool {
        let Some(path) = &self.options.out else {
            return false;
        };
        let report = self.report();
        match report.write_to(path) {
            Ok(()) => {
                info!(
                    "InsnHist::shutdown() wrote {} mnemonics, {} instructions to {}",
                    report.all.len(),
                    report.total_insns,
                    path.display()
                );
                true
            }
            Err(e) => {
                warn!("InsnHist::shutdown() report skipped: {e}");
                false
            }
        }
    }
}
