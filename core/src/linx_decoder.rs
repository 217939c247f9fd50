//! Mnemonic classification of raw Linx instructions
//!
//! The decoder only assigns a mnemonic; operands are never extracted.  Instruction bytes are
//! read as a little-endian value of `length * 8` bits and compared against every form of that
//! length.  When several forms match, the one with most fixed bits wins, and among forms with
//! the same number of fixed bits the first one in table order wins.

use crate::{InstForm, MAX_INST_BYTES};

/// Mnemonic assigned to instructions that cannot be classified
pub const ILLEGAL_MNEMONIC: &str = "ILLEGAL";

/// Builds the little-endian value of an instruction, or None if its size is not supported
#[inline]
pub fn inst_value(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > MAX_INST_BYTES {
        return None;
    }
    Some(bytes.iter().enumerate().fold(0u64, |value, (i, b)| value | ((*b as u64) << (8 * i))))
}

/// Returns the most specific form of `length_bits` bits matching `value`
pub fn best_form(forms: &[InstForm], length_bits: u32, value: u64) -> Option<&InstForm> {
    let mut best: Option<&InstForm> = None;
    for form in forms {
        if form.length_bits != length_bits || !form.matches(value) {
            continue;
        }
        // Ties keep the earliest form
        match best {
            Some(b) if form.fixed_bits() <= b.fixed_bits() => {}
            _ => best = Some(form),
        }
    }
    best
}

/// Classifies the first `length` bytes of `bytes` into a mnemonic.
///
/// If fewer than `length` bytes are available, only the available ones are used.
pub fn classify<'a>(forms: &'a [InstForm], bytes: &[u8], length: usize) -> &'a str {
    let size = length.min(bytes.len());
    let Some(value) = inst_value(&bytes[..size]) else {
        return ILLEGAL_MNEMONIC;
    };
    match best_form(forms, (size * 8) as u32, value) {
        Some(form) if !form.mnemonic.is_empty() => &*form.mnemonic,
        _ => ILLEGAL_MNEMONIC,
    }
}

/// Extracts the mnemonic token of a disassembly line, e.g. `"add"` from `"  add a0, a1 ->a2"`
pub fn mnemonic_from_disassembly(disassembly: &str) -> Option<&str> {
    let text = disassembly.trim_start_matches([' ', '\t']);
    let end = text.find([' ', '\t', ',', '\n']).unwrap_or(text.len());
    let token = text[..end].trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_forms() -> Vec<InstForm> {
        vec![InstForm::new(8, 0xFF, 0x12, "X"), InstForm::new(8, 0xFF, 0x13, "Y")]
    }

    #[test]
    fn test_inst_value_is_little_endian() {
        assert_eq!(inst_value(&[0x63, 0xf0, 0x00, 0x00]), Some(0xf063));
        assert_eq!(inst_value(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]), Some(0x060504030201));
        assert_eq!(inst_value(&[0xff; 8]), Some(u64::MAX));
        assert_eq!(inst_value(&[]), None);
        assert_eq!(inst_value(&[0; 9]), None);
    }

    #[test]
    fn test_classify_exact_forms() {
        let forms = scenario_forms();
        assert_eq!(classify(&forms, &[0x12], 1), "X");
        assert_eq!(classify(&forms, &[0x13], 1), "Y");
        assert_eq!(classify(&forms, &[0x99], 1), ILLEGAL_MNEMONIC);
    }

    #[test]
    fn test_classify_unsupported_lengths() {
        let forms = scenario_forms();
        assert_eq!(classify(&forms, &[], 1), ILLEGAL_MNEMONIC);
        assert_eq!(classify(&forms, &[0x12], 0), ILLEGAL_MNEMONIC);
        assert_eq!(classify(&forms, &[0x12, 0x00], 2), ILLEGAL_MNEMONIC);
        assert_eq!(classify(&forms, &[0x12; 9], 9), ILLEGAL_MNEMONIC);
    }

    #[test]
    fn test_classify_uses_available_bytes() {
        let forms = scenario_forms();
        // The host may report a length larger than the bytes it could fetch
        assert_eq!(classify(&forms, &[0x12], 4), "X");
        // Extra bytes beyond length are ignored
        assert_eq!(classify(&forms, &[0x13, 0xAA, 0xBB], 1), "Y");
    }

    #[test]
    fn test_most_specific_form_wins() {
        let forms = vec![
            InstForm::new(16, 0x000F, 0x0001, "GENERIC"),
            InstForm::new(16, 0x0FFF, 0x0A01, "SPECIFIC"),
        ];
        assert_eq!(classify(&forms, &[0x01, 0x0A], 2), "SPECIFIC");
        assert_eq!(classify(&forms, &[0x01, 0x0B], 2), "GENERIC");

        // Table order does not matter when fixed-bit counts differ
        let reversed: Vec<InstForm> = forms.into_iter().rev().collect();
        assert_eq!(classify(&reversed, &[0x01, 0x0A], 2), "SPECIFIC");
    }

    #[test]
    fn test_equal_specificity_keeps_first_form() {
        let forms = vec![
            InstForm::new(16, 0x00FF, 0x0001, "FIRST"),
            InstForm::new(16, 0xFF00, 0x0A00, "SECOND"),
        ];
        assert_eq!(classify(&forms, &[0x01, 0x0A], 2), "FIRST");
        assert_eq!(best_form(&forms, 16, 0x0A01).map(|f| f.mnemonic.as_ref()), Some("FIRST"));
    }

    #[test]
    fn test_empty_mnemonic_is_illegal() {
        let forms = vec![InstForm::new(8, 0xFF, 0x12, "")];
        assert_eq!(classify(&forms, &[0x12], 1), ILLEGAL_MNEMONIC);
    }

    #[test]
    fn test_mnemonic_from_disassembly() {
        assert_eq!(mnemonic_from_disassembly("add a0, a1 ->a2"), Some("add"));
        assert_eq!(mnemonic_from_disassembly(" \tlw.pcr 0x0, ->a2"), Some("lw.pcr"));
        assert_eq!(mnemonic_from_disassembly("C.BSTART\tCOND, 0x168a"), Some("C.BSTART"));
        assert_eq!(mnemonic_from_disassembly("ebreak\n"), Some("ebreak"));
        assert_eq!(mnemonic_from_disassembly("ret,"), Some("ret"));
        assert_eq!(mnemonic_from_disassembly("   "), None);
        assert_eq!(mnemonic_from_disassembly(""), None);
        assert_eq!(mnemonic_from_disassembly(", a0"), None);
    }
}
