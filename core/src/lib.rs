//! Linx encoding table and instruction classifier.
//!
//! ```text
//! LINX_INST_FORMS (compiled in) \
//!                                > EncodingTable --> classify(bytes, length) --> mnemonic
//! ISA JSON description -------- /
//! ```
//!
//! Classification is a pure function of the instruction bytes and the table, so it can be called
//! from any number of threads.

mod encoding_errors;
mod linx_decoder;
mod linx_encoding_table;
mod linx_inst_form;
mod linx_inst_forms;

pub use encoding_errors::*;
pub use linx_decoder::*;
pub use linx_encoding_table::*;
pub use linx_inst_form::*;
pub use linx_inst_forms::*;
