//! Dynamic instruction histogram of Linx programs.
//!
//! The host emulator classifies every translated instruction and records every executed one;
//! at exit the counts are written as a ranked report.
//!
//! ```text
//! insn bytes --> classify (linx-core) --> resolve --> CounterHandle   \
//!                                                                     |
//! executions -------------------------------------> record(&handle)   > CounterRegistry
//!                                                                     |
//! HistOptions (out, top) ------------------------------------------- /
//!                                                   shutdown --> HistReport --> JSON file
//! ```

mod counter_registry;
mod hist_errors;
mod hist_options;
mod hist_report;
mod insn_hist;
pub mod insn_trace;
mod stats_report;

pub use counter_registry::*;
pub use hist_errors::*;
pub use hist_options::*;
pub use hist_report::*;
pub use insn_hist::*;
pub use stats_report::*;
