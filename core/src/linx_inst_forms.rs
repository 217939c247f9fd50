//! Compiled-in Linx instruction forms
//!
//! Every form is written as its bit pattern, MSB first: `0` and `1` are fixed bits, `.` is a
//! don't-care bit and `_` only separates fields.  The pattern length gives the instruction
//! length class.
//!
//! ```text
//!  16-bit |funct4 |   rd    |   rs    |op|
//!  32-bit | funct7 |  rs2  |  rs1  |f3 |  rd   | opcode |
//!  48-bit |            imm32             |  rd   |f3 | opcode8 |
//!  64-bit |                payload48                |funct8|opcode8|
//! ```
//!
//! Generic forms may be shadowed by more specific ones (e.g. `C.BSTOP` inside `C.BSTART`,
//! `RET` inside `BSTART.IND`); the decoder resolves them by fixed-bit count.

use crate::InstForm;

/// Internal macro used to declare a form from its pattern
macro_rules! form {
    ($pattern:expr, $mnemonic:expr) => {
        InstForm::from_pattern($pattern, $mnemonic)
    };
}

/// Linx instruction forms, in table order
pub static LINX_INST_FORMS: &[InstForm] = &[
    // 16-bit compressed, op=01: register/register and short immediates
    form!("0000_....._....._01", "C.ADD"),
    form!("0001_....._....._01", "C.SUB"),
    form!("0010_....._....._01", "C.AND"),
    form!("0011_....._....._01", "C.OR"),
    form!("0100_....._....._01", "C.XOR"),
    form!("0101_....._....._01", "C.MOV"),
    form!("0110_....._....._01", "C.ADDI"),
    form!("0111_....._....._01", "C.MOVI"),
    // 16-bit compressed, op=10: stack relative memory
    form!("0000_....._....._10", "C.LWI"),
    form!("0001_....._....._10", "C.SWI"),
    form!("0010_....._....._10", "C.LDI"),
    form!("0011_....._....._10", "C.SDI"),
    // 16-bit compressed, op=00: block control
    form!("1000_....._....._00", "C.BSTART"),
    form!("1000_11111_11111_00", "C.BSTOP"),
    form!("1001_....._....._00", "C.SETRET"),
    form!("1111_11111_11111_00", "C.EBREAK"),
    // 32-bit register/register
    form!("0000000_....._....._000_....._0000101", "ADD"),
    form!("0100000_....._....._000_....._0000101", "SUB"),
    form!("0000000_....._....._001_....._0000101", "SLL"),
    form!("0000000_....._....._100_....._0000101", "XOR"),
    form!("0000000_....._....._101_....._0000101", "SRL"),
    form!("0100000_....._....._101_....._0000101", "SRA"),
    form!("0000000_....._....._110_....._0000101", "OR"),
    form!("0000000_....._....._111_....._0000101", "AND"),
    form!("0000001_....._....._000_....._0000101", "MUL"),
    form!("0000001_....._....._100_....._0000101", "DIV"),
    form!("0000001_....._....._101_....._0000101", "DIVU"),
    form!("0000001_....._....._110_....._0000101", "REM"),
    form!("0000001_....._....._111_....._0000101", "REMU"),
    // 32-bit register/immediate
    form!("......._....._....._000_....._0010101", "ADDI"),
    form!("......._....._....._100_....._0010101", "XORI"),
    form!("......._....._....._110_....._0010101", "ORI"),
    form!("......._....._....._111_....._0010101", "ANDI"),
    form!("0000000_....._....._001_....._0010101", "SLLI"),
    form!("0000000_....._....._101_....._0010101", "SRLI"),
    form!("0100000_....._....._101_....._0010101", "SRAI"),
    form!("......._....._....._..._....._0110111", "LUI"),
    form!("......._....._....._..._....._0010111", "AUIPC"),
    // 32-bit compare and select
    form!("......._....._....._000_....._0110011", "CSEL"),
    form!("0000101_....._....._100_....._0110011", "MIN"),
    form!("0000101_....._....._101_....._0110011", "MINU"),
    form!("0000101_....._....._110_....._0110011", "MAX"),
    form!("0000101_....._....._111_....._0110011", "MAXU"),
    // 32-bit loads and stores
    form!("......._....._....._000_....._0000011", "LB"),
    form!("......._....._....._001_....._0000011", "LH"),
    form!("......._....._....._010_....._0000011", "LW"),
    form!("......._....._....._011_....._0000011", "LD"),
    form!("......._....._....._100_....._0000011", "LBU"),
    form!("......._....._....._101_....._0000011", "LHU"),
    form!("......._....._....._110_....._0000011", "LWU"),
    form!("......._....._....._000_....._0100011", "SB"),
    form!("......._....._....._001_....._0100011", "SH"),
    form!("......._....._....._010_....._0100011", "SW"),
    form!("......._....._....._011_....._0100011", "SD"),
    form!("......._....._....._010_....._0000111", "LW.PCR"),
    form!("......._....._....._010_....._0100111", "SW.PCR"),
    // 32-bit atomics
    form!("00010.._00000_....._010_....._0101111", "LR.W"),
    form!("00011.._....._....._010_....._0101111", "SC.W"),
    form!("00000.._....._....._010_....._0101111", "AMOADD.W"),
    form!("00001.._....._....._010_....._0101111", "AMOSWAP.W"),
    form!("00010.._00000_....._011_....._0101111", "LR.D"),
    form!("00011.._....._....._011_....._0101111", "SC.D"),
    form!("00000.._....._....._011_....._0101111", "AMOADD.D"),
    form!("00001.._....._....._011_....._0101111", "AMOSWAP.D"),
    // 32-bit floating point
    form!("......._....._....._011_....._0000111", "FLD"),
    form!("......._....._....._011_....._0100111", "FSD"),
    form!("0000001_....._....._..._....._1010011", "FADD.D"),
    form!("0000101_....._....._..._....._1010011", "FSUB.D"),
    form!("0001001_....._....._..._....._1010011", "FMUL.D"),
    form!("0001101_....._....._..._....._1010011", "FDIV.D"),
    // 32-bit block control
    form!("......._....._....._000_....._1100011", "BSTART"),
    form!("......._....._....._001_....._1100011", "BSTART.CALL"),
    form!("......._....._....._010_....._1100011", "BSTART.COND"),
    form!("......._....._....._111_....._1100011", "BSTART.IND"),
    form!("0000000_00000_00001_111_00000_1100011", "RET"),
    // 32-bit system
    form!("0000000_00000_00000_000_00000_1110011", "ECALL"),
    form!("0000000_00001_00000_000_00000_1110011", "EBREAK"),
    form!("......._....._....._001_....._1110011", "SSRSET"),
    form!("......._....._....._010_....._1110011", "SSRGET"),
    form!("......._....._....._011_....._1110011", "SSRSWAP"),
    form!("......._....._....._100_....._1110011", "ACRC"),
    form!("......._....._....._101_....._1110011", "ACRE"),
    // 48-bit long immediates
    form!("................................_....._000_00011111", "HL.LUI"),
    form!("................................_....._001_00011111", "HL.ADDI"),
    form!("................................_....._010_00011111", "HL.SSRGET"),
    form!("................................_....._011_00011111", "HL.SSRSET"),
    form!("................................_....._100_00011111", "HL.LW.PCR"),
    form!("................................_....._101_00011111", "HL.SW.PCR"),
    form!("................................_....._110_00011111", "HL.BSTART.CALL"),
    // 64-bit vector and tile
    form!("................................................_00000000_00111111", "BSTART.VPAR"),
    form!("................................................_00000001_00111111", "BSTART.VSEQ"),
    form!("................................................_00010000_00111111", "V.ADD"),
    form!("................................................_00010001_00111111", "V.MUL"),
    form!("................................................_00100000_00111111", "V.LD"),
    form!("................................................_00100001_00111111", "V.ST"),
    form!("................................................_00110000_00111111", "TMATMUL"),
    form!("................................................_00110001_00111111", "TLOAD"),
    form!("................................................_00110010_00111111", "TSTORE"),
];
