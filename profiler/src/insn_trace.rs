//! Recorded instruction traces
//!
//! A trace is a text file with one executed instruction per line, written as its bytes in
//! memory order:
//!
//! ```text
//! # bstart.call, then a hot add
//! 63 10 00 00
//! 05000000
//! 05 00 00 00
//! ```
//!
//! Replaying a trace drives an [`InsnHist`] the way an emulator would: every distinct
//! instruction is translated once, then every line is recorded as one execution.

use std::{collections::HashMap, fs, path::Path};

use linx_core::MAX_INST_BYTES;
use rayon::prelude::*;

use crate::{CounterHandle, HistError, InsnHist};

/// Parses one trace line, returning None for blank and comment lines
pub fn parse_trace_line(line: &str) -> Result<Option<Vec<u8>>, String> {
    let content = line.split('#').next().unwrap_or_default();
    let digits: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return Ok(None);
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digits '{}'", content.trim()));
    }
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits '{}'", content.trim()));
    }
    if digits.len() / 2 > MAX_INST_BYTES {
        return Err(format!("instruction longer than {MAX_INST_BYTES} bytes"));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|e| e.to_string()))
        .collect::<Result<Vec<u8>, String>>()
        .map(Some)
}

/// Parses the content of a trace file; `path` is only used in error messages
pub fn parse_trace(path: &Path, text: &str) -> Result<Vec<Vec<u8>>, HistError> {
    let mut insns = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match parse_trace_line(line) {
            Ok(Some(insn)) => insns.push(insn),
            Ok(None) => {}
            Err(reason) => {
                return Err(HistError::Trace { path: path.to_path_buf(), line: i + 1, reason })
            }
        }
    }
    Ok(insns)
}

pub fn read_trace(path: &Path) -> Result<Vec<Vec<u8>>, HistError> {
    let text = fs::read_to_string(path)
        .map_err(|source| HistError::Read { path: path.to_path_buf(), source })?;
    parse_trace(path, &text)
}

/// Replays a trace on the current rayon pool.  Returns the number of distinct instructions.
pub fn replay(hist: &InsnHist, insns: &[Vec<u8>]) -> usize {
    // Translation, once per distinct instruction
    let mut site_index: HashMap<&[u8], usize> = HashMap::new();
    let mut sites: Vec<CounterHandle> = Vec::new();
    let executions: Vec<usize> = insns
        .iter()
        .map(|insn| {
            *site_index.entry(insn.as_slice()).or_insert_with(|| {
                sites.push(hist.translate(insn, insn.len()));
                sites.len() - 1
            })
        })
        .collect();

    // Execution
    executions.par_iter().for_each(|site| hist.record(&sites[*site]));

    sites.len()
}

/// Replays a trace on a dedicated pool of `jobs` threads (0 lets rayon decide)
pub fn replay_parallel(hist: &InsnHist, insns: &[Vec<u8>], jobs: usize) -> Result<usize, HistError> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    Ok(pool.install(|| replay(hist, insns)))
}
