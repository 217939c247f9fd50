//! Linx instruction form definition
//!
//! An instruction form describes one encoding of the Linx ISA by the bits it fixes: `mask` has a
//! one for every fixed bit and `match_bits` gives the required value of those bits.  All other
//! bits are free (operands, immediates).
//!
//! ```text
//!  pattern  1000_....._....._00
//!  mask     1111 00000 00000 11   = 0xf003
//!  match    1000 00000 00000 00   = 0x8000
//! ```

use std::{borrow::Cow, fmt};

use crate::EncodingError;

/// Instruction lengths of the Linx ISA, in bits
pub const LINX_INST_LENGTHS: [u32; 4] = [16, 32, 48, 64];

/// Maximum size of an encoded instruction, in bytes
pub const MAX_INST_BYTES: usize = 8;

/// Returns a mask with the `bits` lowest bits set
#[inline(always)]
pub const fn width_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Parses a MSB-first pattern of `0`, `1` and `.` (don't care) into (length in bits, mask,
/// match). `_` is accepted as a field separator.  Panics, at compile time when used in a
/// constant context, if the pattern is malformed.
const fn parse_pattern(pattern: &str) -> (u32, u64, u64) {
    let bytes = pattern.as_bytes();

    let mut bits: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'0' | b'1' | b'.' => bits += 1,
            b'_' => {}
            _ => panic!("invalid character in instruction pattern"),
        }
        i += 1;
    }
    assert!(
        bits == 16 || bits == 32 || bits == 48 || bits == 64,
        "instruction pattern must be 16, 32, 48 or 64 bits long"
    );

    let mut mask: u64 = 0;
    let mut match_bits: u64 = 0;
    let mut bit = bits;
    i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        i += 1;
        if c == b'_' {
            continue;
        }
        bit -= 1;
        if c != b'.' {
            mask |= 1 << bit;
        }
        if c == b'1' {
            match_bits |= 1 << bit;
        }
    }
    (bits, mask, match_bits)
}

/// One entry of an encoding table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstForm {
    /// Instruction length class, in bits
    pub length_bits: u32,
    /// Fixed bits
    pub mask: u64,
    /// Required value of the fixed bits
    pub match_bits: u64,
    /// Mnemonic assigned to instructions of this form
    pub mnemonic: Cow<'static, str>,
}

impl InstForm {
    pub fn new<M>(length_bits: u32, mask: u64, match_bits: u64, mnemonic: M) -> InstForm
    where
        M: Into<Cow<'static, str>>,
    {
        InstForm { length_bits, mask, match_bits, mnemonic: mnemonic.into() }
    }

    /// Builds a form from its bit pattern, see [`parse_pattern`]
    pub const fn from_pattern(pattern: &'static str, mnemonic: &'static str) -> InstForm {
        let (length_bits, mask, match_bits) = parse_pattern(pattern);
        InstForm { length_bits, mask, match_bits, mnemonic: Cow::Borrowed(mnemonic) }
    }

    /// Number of fixed bits, used to pick the most specific of several matching forms
    #[inline(always)]
    pub const fn fixed_bits(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Instruction length, in bytes
    #[inline(always)]
    pub const fn length_bytes(&self) -> usize {
        (self.length_bits / 8) as usize
    }

    #[inline(always)]
    pub const fn matches(&self, value: u64) -> bool {
        (value & self.mask) == self.match_bits
    }

    /// Returns true if some value of this length is matched by both forms
    pub const fn overlaps(&self, other: &InstForm) -> bool {
        self.length_bits == other.length_bits &&
            ((self.match_bits ^ other.match_bits) & self.mask & other.mask) == 0
    }

    /// Checks the form invariants: a byte-sized length of at most 64 bits, mask and match inside
    /// that width, match bits inside the mask and a non-empty mnemonic
    pub fn validate(&self) -> Result<(), EncodingError> {
        let mnemonic = self.mnemonic.trim();
        if mnemonic.is_empty() {
            return Err(EncodingError::EmptyMnemonic);
        }
        if self.length_bits == 0 || self.length_bits > 64 || self.length_bits % 8 != 0 {
            return Err(EncodingError::UnsupportedLength {
                mnemonic: mnemonic.to_string(),
                length_bits: self.length_bits,
            });
        }
        let width = width_mask(self.length_bits);
        for (field, value) in [("mask", self.mask), ("match", self.match_bits)] {
            if value & !width != 0 {
                return Err(EncodingError::OutsideWidth {
                    mnemonic: mnemonic.to_string(),
                    field,
                    value,
                    length_bits: self.length_bits,
                });
            }
        }
        if self.match_bits & !self.mask != 0 {
            return Err(EncodingError::MatchOutsideMask {
                mnemonic: mnemonic.to_string(),
                mask: self.mask,
                match_bits: self.match_bits,
            });
        }
        Ok(())
    }

    /// Renders the form back as a MSB-first pattern (without separators)
    pub fn pattern(&self) -> String {
        (0..self.length_bits)
            .rev()
            .map(|bit| {
                if self.mask & (1 << bit) == 0 {
                    '.'
                } else if self.match_bits & (1 << bit) == 0 {
                    '0'
                } else {
                    '1'
                }
            })
            .collect()
    }
}

impl fmt::Display for InstForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mnemonic, self.pattern())
    }
}
