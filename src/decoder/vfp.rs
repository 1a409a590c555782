//! The VFP decode table.
//!
//! Shared between the A32 and Thumb-32 instruction sets; in Thumb mode the
//! condition field always reads `1110`. Handlers route to the interpreter,
//! so this table's job is claiming the right words in the right order.

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

    // Three-register data processing
    inst!("VADD",        "cccc11100D11nnnndddd101zN0M0mmmm");
    inst!("VSUB",        "cccc11100D11nnnndddd101zN1M0mmmm");
    inst!("VMUL",        "cccc11100D10nnnndddd101zN0M0mmmm");
    inst!("VDIV",        "cccc11101D00nnnndddd101zN0M0mmmm");

    // Two-register data processing
    inst!("VMOV (reg)",  "cccc11101D110000dddd101z01M0mmmm");
    inst!("VABS",        "cccc11101D110000dddd101z11M0mmmm");

    // Extension register load/store
    inst!("VLDR",        "cccc1101uD01nnnndddd101zvvvvvvvv");
    inst!("VSTR",        "cccc1101uD00nnnndddd101zvvvvvvvv");

    Ok(table)
}

fn build() -> Result<Vec<Matcher>, DecodeError> {
    build_table(rows()?, &[])
}

static TABLE: OnceLock<Result<Vec<Matcher>, DecodeError>> = OnceLock::new();

/// The sorted VFP decode table.
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
        // VADD.F32 S0, S1, S2 in Thumb mode (cond = 1110).
        assert_eq!(decode(0xEE30_0A81).unwrap().unwrap().name(), "VADD");
        assert_eq!(decode(0xEE30_0AC1).unwrap().unwrap().name(), "VSUB");
        assert_eq!(decode(0xED90_0A01).unwrap().unwrap().name(), "VLDR");
        // VMOV (reg) shadows the wider VDIV-space encoding it sits inside.
        assert_eq!(decode(0xEEB0_0A41).unwrap().unwrap().name(), "VMOV (reg)");
    }
}
