//! The Advanced-SIMD decode table.
//!
//! Keyed on A32-format words; Thumb encodings are rewritten into this format
//! before lookup. Handlers route to the interpreter.

use std::sync::OnceLock;

use crate::decoder::{build_table, Matcher};
use crate::error::DecodeError;

#[rustfmt::skip]
fn rows() -> Result<Vec<Matcher>, DecodeError> {
    let mut table = Vec::new();
    macro_rules! inst {
        ($name:literal, $pattern:literal) => {
            table.push(Matcher::compile($name, $pattern, |v, _| v.coprocessor_instruction())?)
        };
    }

    // Three registers of the same length
    inst!("VAND (reg)",     "111100100D00nnnndddd0001NQM1mmmm");
    inst!("VADD (vec)",     "111100100Dzznnnndddd1000NQM0mmmm");

    // Two registers and a shift amount
    inst!("VSHR",           "1111001U1Diiiiiidddd0000LQM1mmmm");

    // Load/store multiple structures
    inst!("VST (multiple)", "111101000D00nnnnddddttttzzaammmm");
    inst!("VLD (multiple)", "111101000D10nnnnddddttttzzaammmm");

    Ok(table)
}

fn build() -> Result<Vec<Matcher>, DecodeError> {
    build_table(rows()?, &[])
}

static TABLE: OnceLock<Result<Vec<Matcher>, DecodeError>> = OnceLock::new();

/// The sorted Advanced-SIMD decode table.
pub fn table() -> Result<&'static [Matcher], DecodeError> {
    match TABLE.get_or_init(build) {
        Ok(table) => Ok(table),
        Err(err) => Err(err.clone()),
    }
}

/// The first matcher claiming `word`, if any.
pub fn decode(word: u32) -> Result<Option<&'static Matcher>, DecodeError> {
    Ok(table()?.iter().find(|m| m.matches(word)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_builds() {
        assert!(table().is_ok());
    }

    #[test]
    fn representative_encodings_decode() {
        // VAND Q0, Q0, Q1 in A32 format.
        assert_eq!(decode(0xF200_0152).unwrap().unwrap().name(), "VAND (reg)");
        assert_eq!(decode(0xF400_0A0F).unwrap().unwrap().name(), "VST (multiple)");
        assert_eq!(decode(0xF420_0A0F).unwrap().unwrap().name(), "VLD (multiple)");
    }
}
