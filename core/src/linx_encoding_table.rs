//! Linx encoding table
//!
//! The table is an immutable list of [`InstForm`]s.  By default it is the compiled-in Linx
//! table, but it can also be built from a list of forms or loaded from the generated ISA JSON
//! description:
//!
//! ```text
//! { "instructions": [ { "mnemonic": "add",
//!                       "encoding": { "parts": [ { "width_bits": 32,
//!                                                  "mask": "0xfe00707f",
//!                                                  "match": "0x5",
//!                                                  "pattern": "0000000..........000.....0000101" } ] } } ] }
//! ```
//!
//! Instructions made of several parts are concatenated, the first part in the lowest bits.

use std::{borrow::Cow, io::Read};

use serde::Deserialize;

use crate::{classify, width_mask, EncodingError, InstForm, ILLEGAL_MNEMONIC, LINX_INST_FORMS};

#[derive(Deserialize)]
struct IsaSpec {
    #[serde(default)]
    instructions: Vec<IsaInstruction>,
}

#[derive(Deserialize)]
struct IsaInstruction {
    #[serde(default)]
    mnemonic: String,
    #[serde(default)]
    encoding: IsaEncoding,
}

#[derive(Deserialize, Default)]
struct IsaEncoding {
    #[serde(default)]
    parts: Vec<IsaEncodingPart>,
}

#[derive(Deserialize)]
struct IsaEncodingPart {
    width_bits: u32,
    mask: String,
    #[serde(rename = "match")]
    match_bits: String,
    #[serde(default)]
    pattern: Option<String>,
}

fn parse_hex(mnemonic: &str, text: &str) -> Result<u64, EncodingError> {
    let text = text.trim().to_ascii_lowercase();
    text.strip_prefix("0x")
        .and_then(|digits| u64::from_str_radix(digits, 16).ok())
        .ok_or_else(|| EncodingError::InvalidHex {
            mnemonic: mnemonic.to_string(),
            value: text.clone(),
        })
}

/// Runtime counterpart of the compiled-in pattern parser, returning (mask, match)
fn pattern_to_mask_match(pattern: &str) -> Option<(u64, u64)> {
    let width = pattern.len();
    if width > 64 {
        return None;
    }
    let mut mask = 0u64;
    let mut match_bits = 0u64;
    for (i, c) in pattern.bytes().enumerate() {
        let bit = width - 1 - i;
        match c {
            b'.' => {}
            b'0' => mask |= 1 << bit,
            b'1' => {
                mask |= 1 << bit;
                match_bits |= 1 << bit;
            }
            _ => return None,
        }
    }
    Some((mask, match_bits))
}

impl IsaInstruction {
    fn to_form(&self) -> Result<InstForm, EncodingError> {
        // Encodings without a name are kept, so they still shadow the forms they refine
        let mut mnemonic = self.mnemonic.trim().to_ascii_uppercase();
        if mnemonic.is_empty() {
            mnemonic = ILLEGAL_MNEMONIC.to_string();
        }
        if self.encoding.parts.is_empty() {
            return Err(EncodingError::NoParts { mnemonic });
        }

        let mut length_bits: u32 = 0;
        let mut mask: u64 = 0;
        let mut match_bits: u64 = 0;
        for part in &self.encoding.parts {
            let part_mask = parse_hex(&mnemonic, &part.mask)?;
            let part_match = parse_hex(&mnemonic, &part.match_bits)?;
            for (field, value) in [("mask", part_mask), ("match", part_match)] {
                if value & !width_mask(part.width_bits) != 0 {
                    return Err(EncodingError::OutsideWidth {
                        mnemonic,
                        field,
                        value,
                        length_bits: part.width_bits,
                    });
                }
            }
            if let Some(pattern) = &part.pattern {
                let agrees = pattern.len() == part.width_bits as usize &&
                    pattern_to_mask_match(pattern) == Some((part_mask, part_match));
                if !agrees {
                    return Err(EncodingError::PatternMismatch { mnemonic, pattern: pattern.clone() });
                }
            }
            if part.width_bits == 0 {
                continue;
            }
            if length_bits.saturating_add(part.width_bits) > 64 {
                return Err(EncodingError::UnsupportedLength {
                    mnemonic,
                    length_bits: length_bits.saturating_add(part.width_bits),
                });
            }
            mask |= part_mask << length_bits;
            match_bits |= part_match << length_bits;
            length_bits += part.width_bits;
        }

        let form = InstForm::new(length_bits, mask, match_bits, mnemonic);
        form.validate()?;
        Ok(form)
    }
}

/// Immutable list of instruction forms used to classify instructions
#[derive(Debug, Clone)]
pub struct EncodingTable {
    forms: Cow<'static, [InstForm]>,
}

/// Default constructor for EncodingTable structure, returning the Linx table
impl Default for EncodingTable {
    fn default() -> Self {
        Self::linx()
    }
}

impl EncodingTable {
    /// Returns the compiled-in Linx table
    pub fn linx() -> EncodingTable {
        EncodingTable { forms: Cow::Borrowed(LINX_INST_FORMS) }
    }

    /// Builds a table from a list of forms, checking every form
    pub fn new(forms: Vec<InstForm>) -> Result<EncodingTable, EncodingError> {
        for form in &forms {
            form.validate()?;
        }
        Ok(EncodingTable { forms: Cow::Owned(forms) })
    }

    /// Loads a table from the generated ISA JSON description
    pub fn from_json<R: Read>(reader: R) -> Result<EncodingTable, EncodingError> {
        let spec: IsaSpec = serde_json::from_reader(reader)?;
        let forms =
            spec.instructions.iter().map(IsaInstruction::to_form).collect::<Result<Vec<_>, _>>()?;
        Ok(EncodingTable { forms: Cow::Owned(forms) })
    }

    pub fn from_json_str(json: &str) -> Result<EncodingTable, EncodingError> {
        Self::from_json(json.as_bytes())
    }

    pub fn forms(&self) -> &[InstForm] {
        &self.forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Classifies an instruction, see [`classify`]
    #[inline]
    pub fn classify(&self, bytes: &[u8], length: usize) -> &str {
        classify(&self.forms, bytes, length)
    }

    /// Returns the index pairs of forms that have the same length and the same number of fixed
    /// bits, and that can both match one value.  For such pairs the classification depends on
    /// table order.
    pub fn ambiguous_overlaps(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.forms.iter().enumerate() {
            for (j, b) in self.forms.iter().enumerate().skip(i + 1) {
                if a.fixed_bits() == b.fixed_bits() && a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISA_JSON: &str = r#"{
        "instructions": [
            { "id": "add", "mnemonic": "add",
              "encoding": { "parts": [ { "width_bits": 32, "mask": "0xfe00707f", "match": "0x5",
                                         "pattern": "0000000..........000.....0000101" } ] } },
            { "mnemonic": " hl.lui ",
              "encoding": { "parts": [ { "width_bits": 16, "mask": "0x7ff", "match": "0x1f" },
                                       { "width_bits": 32, "mask": "0x0", "match": "0x0" } ] } }
        ]
    }"#;

    #[test]
    fn test_linx_table_is_valid() {
        let table = EncodingTable::linx();
        assert!(!table.is_empty());
        for form in table.forms() {
            assert!(form.validate().is_ok(), "invalid form {form}");
            assert!([16, 32, 48, 64].contains(&form.length_bits), "bad length for {form}");
        }
    }

    #[test]
    fn test_linx_mnemonics_are_unique() {
        let table = EncodingTable::linx();
        let mut mnemonics: Vec<&str> = table.forms().iter().map(|f| f.mnemonic.as_ref()).collect();
        mnemonics.sort_unstable();
        let before = mnemonics.len();
        mnemonics.dedup();
        assert_eq!(before, mnemonics.len());
    }

    #[test]
    fn test_linx_table_has_no_ambiguous_overlaps() {
        let table = EncodingTable::linx();
        let pairs = table.ambiguous_overlaps();
        let names: Vec<String> = pairs
            .iter()
            .map(|(i, j)| format!("{} / {}", table.forms()[*i], table.forms()[*j]))
            .collect();
        assert!(pairs.is_empty(), "ambiguous forms: {names:?}");
    }

    #[test]
    fn test_ambiguous_overlaps_reports_ties() {
        let table = EncodingTable::new(vec![
            InstForm::new(16, 0x00FF, 0x0001, "FIRST"),
            InstForm::new(16, 0xFF00, 0x0A00, "SECOND"),
            InstForm::new(16, 0xFFFF, 0x0A01, "THIRD"),
        ])
        .unwrap();
        assert_eq!(table.ambiguous_overlaps(), vec![(0, 1)]);
    }

    #[test]
    fn test_new_rejects_invalid_forms() {
        let result = EncodingTable::new(vec![InstForm::new(8, 0x0F, 0xF0, "BAD")]);
        assert!(matches!(result, Err(EncodingError::MatchOutsideMask { .. })));
    }

    #[test]
    fn test_from_json() {
        let table = EncodingTable::from_json_str(ISA_JSON).unwrap();
        assert_eq!(table.len(), 2);

        let add = &table.forms()[0];
        assert_eq!(add.mnemonic, "ADD");
        assert_eq!(add.length_bits, 32);
        assert_eq!(add.mask, 0xfe00707f);

        let hl_lui = &table.forms()[1];
        assert_eq!(hl_lui.mnemonic, "HL.LUI");
        assert_eq!(hl_lui.length_bits, 48);
        assert_eq!(hl_lui.mask, 0x7ff);
        assert_eq!(hl_lui.match_bits, 0x1f);

        assert_eq!(table.classify(&[0x05, 0x00, 0x00, 0x00], 4), "ADD");
        assert_eq!(table.classify(&[0x1f, 0x00, 0x12, 0x34, 0x56, 0x78], 6), "HL.LUI");
        assert_eq!(table.classify(&[0x1f, 0x01, 0x00, 0x00, 0x00, 0x00], 6), ILLEGAL_MNEMONIC);
    }

    #[test]
    fn test_from_json_normalizes_mnemonics() {
        let json = r#"{"instructions":[{"mnemonic":"  c.add\t","encoding":{"parts":[
            {"width_bits":16,"mask":"0xF003","match":"0x1"}]}}]}"#;
        let table = EncodingTable::from_json_str(json).unwrap();
        assert_eq!(table.forms()[0].mnemonic, "C.ADD");
        assert_eq!(table.classify(&[0x41, 0x02], 2), "C.ADD");
    }

    #[test]
    fn test_from_json_skips_zero_width_parts() {
        let json = r#"{"instructions":[{"mnemonic":"c.mov","encoding":{"parts":[
            {"width_bits":16,"mask":"0xf003","match":"0x5001"},
            {"width_bits":0,"mask":"0x0","match":"0x0"}]}}]}"#;
        let table = EncodingTable::from_json_str(json).unwrap();
        let form = &table.forms()[0];
        assert_eq!(form.length_bits, 16);
        assert_eq!(form.mask, 0xf003);
        assert_eq!(form.match_bits, 0x5001);
        assert_eq!(table.classify(&[0x01, 0x50], 2), "C.MOV");
    }

    #[test]
    fn test_from_json_keeps_unnamed_encodings_as_illegal() {
        let json = r#"{"instructions":[
            {"mnemonic":"c.bstart","encoding":{"parts":[
                {"width_bits":16,"mask":"0xf003","match":"0x8000"}]}},
            {"mnemonic":" ","encoding":{"parts":[
                {"width_bits":16,"mask":"0xffff","match":"0x8ffc"}]}}]}"#;
        let table = EncodingTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.forms()[1].mnemonic, ILLEGAL_MNEMONIC);
        assert_eq!(table.classify(&[0x04, 0x8f], 2), "C.BSTART");
        assert_eq!(table.classify(&[0xfc, 0x8f], 2), ILLEGAL_MNEMONIC);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        let bad_hex = r#"{"instructions":[{"mnemonic":"x","encoding":{"parts":[
            {"width_bits":16,"mask":"ff","match":"0x0"}]}}]}"#;
        assert!(matches!(
            EncodingTable::from_json_str(bad_hex),
            Err(EncodingError::InvalidHex { .. })
        ));

        let bad_pattern = r#"{"instructions":[{"mnemonic":"x","encoding":{"parts":[
            {"width_bits":16,"mask":"0xff","match":"0x1","pattern":"0000000011111111"}]}}]}"#;
        assert!(matches!(
            EncodingTable::from_json_str(bad_pattern),
            Err(EncodingError::PatternMismatch { .. })
        ));

        // Same mask/match as an 8-bit pattern, but the part is 16 bits wide
        let short_pattern = r#"{"instructions":[{"mnemonic":"x","encoding":{"parts":[
            {"width_bits":16,"mask":"0xff","match":"0x1","pattern":"00000001"}]}}]}"#;
        assert!(matches!(
            EncodingTable::from_json_str(short_pattern),
            Err(EncodingError::PatternMismatch { .. })
        ));

        let no_parts = r#"{"instructions":[{"mnemonic":"x"}]}"#;
        assert!(matches!(
            EncodingTable::from_json_str(no_parts),
            Err(EncodingError::NoParts { .. })
        ));

        let too_long = r#"{"instructions":[{"mnemonic":"x","encoding":{"parts":[
            {"width_bits":64,"mask":"0x0","match":"0x0"},
            {"width_bits":16,"mask":"0x0","match":"0x0"}]}}]}"#;
        assert!(matches!(
            EncodingTable::from_json_str(too_long),
            Err(EncodingError::UnsupportedLength { length_bits: 80, .. })
        ));

        assert!(matches!(EncodingTable::from_json_str("{"), Err(EncodingError::Json(_))));
    }
}
