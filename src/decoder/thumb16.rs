//! The Thumb-16 decode table.

use std::sync::OnceLock;

use crate::decoder::{build_table, Matcher};
use crate::error::DecodeError;

#[rustfmt::skip]
fn rows() -> Result<Vec<Matcher>, DecodeError> {
    let mut table = Vec::new();
    macro_rules! inst {
        ($name:literal, $pattern:literal, $handler:expr) => {
            table.push(Matcher::compile($name, $pattern, $handler)?)
        };
    }

    // Shift (immediate), add, subtract, move and compare
    inst!("LSL (imm)",            "00000vvvvvmmmddd", |v, f| v.thumb16_lsl_imm(f.imm(0), f.reg(1), f.reg(2)));
    inst!("LSR (imm)",            "00001vvvvvmmmddd", |v, f| v.thumb16_lsr_imm(f.imm(0), f.reg(1), f.reg(2)));
    inst!("ASR (imm)",            "00010vvvvvmmmddd", |v, f| v.thumb16_asr_imm(f.imm(0), f.reg(1), f.reg(2)));
    inst!("ADD (reg, T1)",        "0001100mmmnnnddd", |v, f| v.thumb16_add_reg_t1(f.reg(0), f.reg(1), f.reg(2)));
    inst!("SUB (reg)",            "0001101mmmnnnddd", |v, f| v.thumb16_sub_reg(f.reg(0), f.reg(1), f.reg(2)));
    inst!("ADD (imm, T1)",        "0001110vvvnnnddd", |v, f| v.thumb16_add_imm_t1(f.imm(0), f.reg(1), f.reg(2)));
    inst!("SUB (imm, T1)",        "0001111vvvnnnddd", |v, f| v.thumb16_sub_imm_t1(f.imm(0), f.reg(1), f.reg(2)));
    inst!("MOV (imm)",            "00100dddvvvvvvvv", |v, f| v.thumb16_mov_imm(f.reg(0), f.imm(1)));
    inst!("CMP (imm)",            "00101nnnvvvvvvvv", |v, f| v.thumb16_cmp_imm(f.reg(0), f.imm(1)));
    inst!("ADD (imm, T2)",        "00110dddvvvvvvvv", |v, f| v.thumb16_add_imm_t2(f.reg(0), f.imm(1)));
    inst!("SUB (imm, T2)",        "00111dddvvvvvvvv", |v, f| v.thumb16_sub_imm_t2(f.reg(0), f.imm(1)));

    // Data processing
    inst!("AND (reg)",            "0100000000mmmddd", |v, f| v.thumb16_and_reg(f.reg(0), f.reg(1)));
    inst!("EOR (reg)",            "0100000001mmmddd", |v, f| v.thumb16_eor_reg(f.reg(0), f.reg(1)));
    inst!("LSL (reg)",            "0100000010mmmddd", |v, f| v.thumb16_lsl_reg(f.reg(0), f.reg(1)));
    inst!("LSR (reg)",            "0100000011mmmddd", |v, f| v.thumb16_lsr_reg(f.reg(0), f.reg(1)));
    inst!("ASR (reg)",            "0100000100mmmddd", |v, f| v.thumb16_asr_reg(f.reg(0), f.reg(1)));
    inst!("ADC (reg)",            "0100000101mmmddd", |v, f| v.thumb16_adc_reg(f.reg(0), f.reg(1)));
    inst!("SBC (reg)",            "0100000110mmmddd", |v, f| v.thumb16_sbc_reg(f.reg(0), f.reg(1)));
    inst!("ROR (reg)",            "0100000111mmmddd", |v, f| v.thumb16_ror_reg(f.reg(0), f.reg(1)));
    inst!("TST (reg)",            "0100001000mmmnnn", |v, f| v.thumb16_tst_reg(f.reg(0), f.reg(1)));
    inst!("RSB (imm)",            "0100001001nnnddd", |v, f| v.thumb16_rsb_imm(f.reg(0), f.reg(1)));
    inst!("CMP (reg, T1)",        "0100001010mmmnnn", |v, f| v.thumb16_cmp_reg_t1(f.reg(0), f.reg(1)));
    inst!("CMN (reg)",            "0100001011mmmnnn", |v, f| v.thumb16_cmn_reg(f.reg(0), f.reg(1)));
    inst!("ORR (reg)",            "0100001100mmmddd", |v, f| v.thumb16_orr_reg(f.reg(0), f.reg(1)));
    inst!("MUL (reg)",            "0100001101nnnddd", |v, f| v.thumb16_mul_reg(f.reg(0), f.reg(1)));
    inst!("BIC (reg)",            "0100001110mmmddd", |v, f| v.thumb16_bic_reg(f.reg(0), f.reg(1)));
    inst!("MVN (reg)",            "0100001111mmmddd", |v, f| v.thumb16_mvn_reg(f.reg(0), f.reg(1)));

    // Special data instructions and branch and exchange
    inst!("ADD (reg, T2)",        "01000100Dmmmmddd", |v, f| v.thumb16_add_reg_t2(f.flag(0), f.reg(1), f.reg(2)));
    inst!("CMP (reg, T2)",        "01000101Nmmmmnnn", |v, f| v.thumb16_cmp_reg_t2(f.flag(0), f.reg(1), f.reg(2)));
    inst!("MOV (reg)",            "01000110Dmmmmddd", |v, f| v.thumb16_mov_reg(f.flag(0), f.reg(1), f.reg(2)));
    inst!("BX",                   "010001110mmmm000", |v, f| v.thumb16_bx(f.reg(0)));
    inst!("BLX (reg)",            "010001111mmmm000", |v, f| v.thumb16_blx_reg(f.reg(0)));

    // Load/store single data item
    inst!("LDR (literal)",        "01001tttvvvvvvvv", |v, f| v.thumb16_ldr_literal(f.reg(0), f.imm(1)));
    inst!("STR (reg)",            "0101000mmmnnnttt", |v, f| v.thumb16_str_reg(f.reg(0), f.reg(1), f.reg(2)));
    inst!("STRH (reg)",           "0101001mmmnnnttt", |v, f| v.thumb16_strh_reg(f.reg(0), f.reg(1), f.reg(2)));
    inst!("STRB (reg)",           "0101010mmmnnnttt", |v, f| v.thumb16_strb_reg(f.reg(0), f.reg(1), f.reg(2)));
    inst!("LDRSB (reg)",          "0101011mmmnnnttt", |v, f| v.thumb16_ldrsb_reg(f.reg(0), f.reg(1), f.reg(2)));
    inst!("LDR (reg)",            "0101100mmmnnnttt", |v, f| v.thumb16_ldr_reg(f.reg(0), f.reg(1), f.reg(2)));
    inst!("LDRH (reg)",           "0101101mmmnnnttt", |v, f| v.thumb16_ldrh_reg(f.reg(0), f.reg(1), f.reg(2)));
    inst!("LDRB (reg)",           "0101110mmmnnnttt", |v, f| v.thumb16_ldrb_reg(f.reg(0), f.reg(1), f.reg(2)));
    inst!("LDRSH (reg)",          "0101111mmmnnnttt", |v, f| v.thumb16_ldrsh_reg(f.reg(0), f.reg(1), f.reg(2)));
    inst!("STR (imm, T1)",        "01100vvvvvnnnttt", |v, f| v.thumb16_str_imm_t1(f.imm(0), f.reg(1), f.reg(2)));
    inst!("LDR (imm, T1)",        "01101vvvvvnnnttt", |v, f| v.thumb16_ldr_imm_t1(f.imm(0), f.reg(1), f.reg(2)));
    inst!("STRB (imm)",           "01110vvvvvnnnttt", |v, f| v.thumb16_strb_imm(f.imm(0), f.reg(1), f.reg(2)));
    inst!("LDRB (imm)",           "01111vvvvvnnnttt", |v, f| v.thumb16_ldrb_imm(f.imm(0), f.reg(1), f.reg(2)));
    inst!("STRH (imm)",           "10000vvvvvnnnttt", |v, f| v.thumb16_strh_imm(f.imm(0), f.reg(1), f.reg(2)));
    inst!("LDRH (imm)",           "10001vvvvvnnnttt", |v, f| v.thumb16_ldrh_imm(f.imm(0), f.reg(1), f.reg(2)));
    inst!("STR (imm, T2)",        "10010tttvvvvvvvv", |v, f| v.thumb16_str_imm_t2(f.reg(0), f.imm(1)));
    inst!("LDR (imm, T2)",        "10011tttvvvvvvvv", |v, f| v.thumb16_ldr_imm_t2(f.reg(0), f.imm(1)));

    // Generate relative address
    inst!("ADR",                  "10100dddvvvvvvvv", |v, f| v.thumb16_adr(f.reg(0), f.imm(1)));
    inst!("ADD (SP plus imm, T1)", "10101dddvvvvvvvv", |v, f| v.thumb16_add_sp_t1(f.reg(0), f.imm(1)));

    // Miscellaneous 16-bit instructions
    inst!("ADD (SP plus imm, T2)", "101100000vvvvvvv", |v, f| v.thumb16_add_sp_t2(f.imm(0)));
    inst!("SUB (SP minus imm)",   "101100001vvvvvvv", |v, f| v.thumb16_sub_sp(f.imm(0)));
    inst!("SXTH",                 "1011001000mmmddd", |v, f| v.thumb16_sxth(f.reg(0), f.reg(1)));
    inst!("SXTB",                 "1011001001mmmddd", |v, f| v.thumb16_sxtb(f.reg(0), f.reg(1)));
    inst!("UXTH",                 "1011001010mmmddd", |v, f| v.thumb16_uxth(f.reg(0), f.reg(1)));
    inst!("UXTB",                 "1011001011mmmddd", |v, f| v.thumb16_uxtb(f.reg(0), f.reg(1)));
    inst!("PUSH",                 "1011010Mrrrrrrrr", |v, f| v.thumb16_push(f.flag(0), f.reg_list(1)));
    inst!("POP",                  "1011110Prrrrrrrr", |v, f| v.thumb16_pop(f.flag(0), f.reg_list(1)));
    inst!("REV",                  "1011101000mmmddd", |v, f| v.thumb16_rev(f.reg(0), f.reg(1)));
    inst!("REV16",                "1011101001mmmddd", |v, f| v.thumb16_rev16(f.reg(0), f.reg(1)));
    inst!("REVSH",                "1011101011mmmddd", |v, f| v.thumb16_revsh(f.reg(0), f.reg(1)));
    inst!("BKPT",                 "10111110vvvvvvvv", |v, f| v.thumb16_bkpt(f.imm(0)));
    inst!("STMIA",                "11000nnnrrrrrrrr", |v, f| v.thumb16_stmia(f.reg(0), f.reg_list(1)));
    inst!("LDMIA",                "11001nnnrrrrrrrr", |v, f| v.thumb16_ldmia(f.reg(0), f.reg_list(1)));
    inst!("CBZ/CBNZ",             "1011o0i1vvvvvnnn", |v, f| v.thumb16_cbz_cbnz(f.flag(0), f.imm(1), f.imm(2), f.reg(3)));
    inst!("UDF",                  "11011110--------", |v, _| v.thumb16_udf());
    inst!("SVC",                  "11011111vvvvvvvv", |v, f| v.thumb16_svc(f.imm(0)));
    inst!("B (T1)",               "1101ccccvvvvvvvv", |v, f| v.thumb16_b_t1(f.cond(0), f.imm(1)));
    inst!("B (T2)",               "11100vvvvvvvvvvv", |v, f| v.thumb16_b_t2(f.imm(0)));
    inst!("IT",                   "10111111ccccmmmm", |v, f| v.thumb16_it(f.cond(0), f.imm(1)));

    // Hints
    inst!("NOP",                  "1011111100000000", |v, _| v.thumb16_nop());
    inst!("YIELD",                "1011111100010000", |v, _| v.thumb16_yield());
    inst!("WFE",                  "1011111100100000", |v, _| v.thumb16_wfe());
    inst!("WFI",                  "1011111100110000", |v, _| v.thumb16_wfi());
    inst!("SEV",                  "1011111101000000", |v, _| v.thumb16_sev());
    inst!("SEVL",                 "1011111101010000", |v, _| v.thumb16_sevl());

    Ok(table)
}

fn build() -> Result<Vec<Matcher>, DecodeError> {
    build_table(rows()?, &[])
}

static TABLE: OnceLock<Result<Vec<Matcher>, DecodeError>> = OnceLock::new();

/// The sorted Thumb-16 decode table.
pub fn table() -> Result<&'static [Matcher], DecodeError> {
    match TABLE.get_or_init(build) {
        Ok(table) => Ok(table),
        Err(err) => Err(err.clone()),
    }
}

/// The first matcher claiming `word`, if any.
pub fn decode(word: u16) -> Result<Option<&'static Matcher>, DecodeError> {
    Ok(table()?.iter().find(|m| m.matches(u32::from(word))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_builds() {
        assert!(table().is_ok());
    }

    #[test]
    fn specific_encodings_shadow_general_ones() {
        assert_eq!(decode(0xBF00).unwrap().unwrap().name(), "NOP");
        assert_eq!(decode(0xBF08).unwrap().unwrap().name(), "IT");
        assert_eq!(decode(0xDE00).unwrap().unwrap().name(), "UDF");
        assert_eq!(decode(0xDF2A).unwrap().unwrap().name(), "SVC");
        assert_eq!(decode(0xD003).unwrap().unwrap().name(), "B (T1)");
    }

    #[test]
    fn representative_encodings_decode() {
        assert_eq!(decode(0x1888).unwrap().unwrap().name(), "ADD (reg, T1)");
        assert_eq!(decode(0x4770).unwrap().unwrap().name(), "BX");
        assert_eq!(decode(0xBD01).unwrap().unwrap().name(), "POP");
        assert_eq!(decode(0xB508).unwrap().unwrap().name(), "PUSH");
        assert_eq!(decode(0xC903).unwrap().unwrap().name(), "LDMIA");
    }
}
