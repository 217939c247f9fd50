use thiserror::Error;

/// Errors raised while building an encoding table
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Form with an empty mnemonic")]
    EmptyMnemonic,
    #[error("{mnemonic}: unsupported instruction length of {length_bits} bits")]
    UnsupportedLength { mnemonic: String, length_bits: u32 },
    #[error("{mnemonic}: {field} {value:#x} has bits outside its {length_bits}-bit width")]
    OutsideWidth { mnemonic: String, field: &'static str, value: u64, length_bits: u32 },
    #[error("{mnemonic}: match {match_bits:#x} sets bits not covered by mask {mask:#x}")]
    MatchOutsideMask { mnemonic: String, mask: u64, match_bits: u64 },
    #[error("{mnemonic}: pattern '{pattern}' disagrees with mask/match")]
    PatternMismatch { mnemonic: String, pattern: String },
    #[error("{mnemonic}: invalid hex value '{value}'")]
    InvalidHex { mnemonic: String, value: String },
    #[error("{mnemonic}: instruction has no encoding parts")]
    NoParts { mnemonic: String },
    #[error("Failed to parse encoding table")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read encoding table")]
    Io(#[from] std::io::Error),
}
