//! Instruction histogram options

use std::{fmt, path::PathBuf};

use crate::HistError;

/// Number of entries of the ranked report when no valid value is configured
pub const DEFAULT_TOP_N: usize = 50;

/// Parses a top-N value; any non-positive or unparsable value falls back to [`DEFAULT_TOP_N`]
pub fn parse_top_n(value: &str) -> usize {
    match value.trim().parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).unwrap_or(DEFAULT_TOP_N),
        _ => DEFAULT_TOP_N,
    }
}

/// Instruction histogram options structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistOptions {
    /// Report output path.  None disables the report
    pub out: Option<PathBuf>,
    /// Number of entries of the ranked part of the report
    pub top_n: usize,
}

/// Default constructor for HistOptions structure
impl Default for HistOptions {
    fn default() -> Self {
        Self { out: None, top_n: DEFAULT_TOP_N }
    }
}

impl fmt::Display for HistOptions {
    /// Formats a string with the configuration information
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OUT: {:?}", self.out)?;
        writeln!(f, "TOP_N: {}", self.top_n)?;
        Ok(())
    }
}

impl HistOptions {
    /// Parses host plugin arguments of the form `key=value`.  Supported keys are `out` and
    /// `top`; a key without `=` has an empty value.
    pub fn from_plugin_args<I, S>(args: I) -> Result<HistOptions, HistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = HistOptions::default();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg.split_once('=').unwrap_or((arg, ""));
            match key {
                "out" => options.set_out(value),
                "top" => options.set_top(value),
                _ => return Err(HistError::UnknownOption(arg.to_string())),
            }
        }
        Ok(options)
    }

    /// Sets the report path; an empty path disables the report
    pub fn set_out(&mut self, path: &str) {
        self.out = if path.is_empty() { None } else { Some(PathBuf::from(path)) };
    }

    pub fn set_top(&mut self, value: &str) {
        self.top_n = parse_top_n(value);
    }

    /// Returns true if a report has to be written at shutdown
    pub fn report_enabled(&self) -> bool {
        self.out.is_some()
    }
}
