//! The Thumb-32 decode table.

use std::sync::OnceLock;

use crate::decoder::{build_table, Matcher};
use crate::error::DecodeError;

/// Encodings the specificity heuristic cannot order: `LDR (lit)` shares
/// words with the higher-popcount register-offset form and must win.
const COMES_FIRST: &[&str] = &["LDR (lit)"];

#[rustfmt::skip]
fn rows() -> Result<Vec<Matcher>, DecodeError> {
    let mut table = Vec::new();
    macro_rules! inst {
        ($name:literal, $pattern:literal, $handler:expr) => {
            table.push(Matcher::compile($name, $pattern, $handler)?)
        };
    }

    // Load/store multiple
    inst!("STMIA",        "1110100010W0nnnn0rrrrrrrrrrrrrrr", |v, f| v.thumb32_stmia(f.flag(0), f.reg(1), f.reg_list(2)));
    inst!("LDMIA",        "1110100010W1nnnnrrrrrrrrrrrrrrrr", |v, f| v.thumb32_ldmia(f.flag(0), f.reg(1), f.reg_list(2)));
    inst!("STMDB",        "1110100100W0nnnn0rrrrrrrrrrrrrrr", |v, f| v.thumb32_stmdb(f.flag(0), f.reg(1), f.reg_list(2)));
    inst!("LDMDB",        "1110100100W1nnnnrrrrrrrrrrrrrrrr", |v, f| v.thumb32_ldmdb(f.flag(0), f.reg(1), f.reg_list(2)));
    inst!("PUSH",         "11101001001011010rrrrrrrrrrrrrrr", |v, f| v.thumb32_push(f.reg_list(0)));
    inst!("POP",          "1110100010111101rrrrrrrrrrrrrrrr", |v, f| v.thumb32_pop(f.reg_list(0)));

    // Data processing (shifted register)
    inst!("TST (reg)",    "111010100001nnnn0iii1111vvttmmmm", |v, f| v.thumb32_tst_reg(f.reg(0), f.imm(1), f.imm(2), f.imm(3), f.reg(4)));
    inst!("AND (reg)",    "11101010000Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_and_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));
    inst!("BIC (reg)",    "11101010001Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_bic_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));
    inst!("LSL (imm)",    "11101010010S11110iiiddddvv00mmmm", |v, f| v.thumb32_lsl_imm(f.flag(0), f.imm(1), f.reg(2), f.imm(3), f.reg(4)));
    inst!("LSR (imm)",    "11101010010S11110iiiddddvv01mmmm", |v, f| v.thumb32_lsr_imm(f.flag(0), f.imm(1), f.reg(2), f.imm(3), f.reg(4)));
    inst!("ASR (imm)",    "11101010010S11110iiiddddvv10mmmm", |v, f| v.thumb32_asr_imm(f.flag(0), f.imm(1), f.reg(2), f.imm(3), f.reg(4)));
    inst!("RRX",          "11101010010S11110000dddd0011mmmm", |v, f| v.thumb32_rrx(f.flag(0), f.reg(1), f.reg(2)));
    inst!("ROR (imm)",    "11101010010S11110iiiddddvv11mmmm", |v, f| v.thumb32_ror_imm(f.flag(0), f.imm(1), f.reg(2), f.imm(3), f.reg(4)));
    inst!("ORR (reg)",    "11101010010Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_orr_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));
    inst!("MVN (reg)",    "11101010011S11110iiiddddvvttmmmm", |v, f| v.thumb32_mvn_reg(f.flag(0), f.imm(1), f.reg(2), f.imm(3), f.imm(4), f.reg(5)));
    inst!("ORN (reg)",    "11101010011Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_orn_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));
    inst!("TEQ (reg)",    "111010101001nnnn0iii1111vvttmmmm", |v, f| v.thumb32_teq_reg(f.reg(0), f.imm(1), f.imm(2), f.imm(3), f.reg(4)));
    inst!("EOR (reg)",    "11101010100Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_eor_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));
    inst!("CMN (reg)",    "111010110001nnnn0iii1111vvttmmmm", |v, f| v.thumb32_cmn_reg(f.reg(0), f.imm(1), f.imm(2), f.imm(3), f.reg(4)));
    inst!("ADD (reg)",    "11101011000Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_add_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));
    inst!("ADC (reg)",    "11101011010Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_adc_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));
    inst!("SBC (reg)",    "11101011011Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_sbc_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));
    inst!("CMP (reg)",    "111010111011nnnn0iii1111vvttmmmm", |v, f| v.thumb32_cmp_reg(f.reg(0), f.imm(1), f.imm(2), f.imm(3), f.reg(4)));
    inst!("SUB (reg)",    "11101011101Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_sub_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));
    inst!("RSB (reg)",    "11101011110Snnnn0iiiddddvvttmmmm", |v, f| v.thumb32_rsb_reg(f.flag(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4), f.imm(5), f.reg(6)));

    // Data processing (modified immediate)
    inst!("TST (imm)",    "11110i000001nnnn0vvv1111wwwwwwww", |v, f| v.thumb32_tst_imm(f.imm(0), f.reg(1), f.imm(2), f.imm(3)));
    inst!("AND (imm)",    "11110i00000Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_and_imm(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));
    inst!("BIC (imm)",    "11110i00001Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_bic_imm(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));
    inst!("MOV (imm)",    "11110i00010S11110vvvddddwwwwwwww", |v, f| v.thumb32_mov_imm(f.imm(0), f.flag(1), f.imm(2), f.reg(3), f.imm(4)));
    inst!("ORR (imm)",    "11110i00010Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_orr_imm(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));
    inst!("MVN (imm)",    "11110i00011S11110vvvddddwwwwwwww", |v, f| v.thumb32_mvn_imm(f.imm(0), f.flag(1), f.imm(2), f.reg(3), f.imm(4)));
    inst!("ORN (imm)",    "11110i00011Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_orn_imm(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));
    inst!("TEQ (imm)",    "11110i001001nnnn0vvv1111wwwwwwww", |v, f| v.thumb32_teq_imm(f.imm(0), f.reg(1), f.imm(2), f.imm(3)));
    inst!("EOR (imm)",    "11110i00100Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_eor_imm(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));
    inst!("CMN (imm)",    "11110i010001nnnn0vvv1111wwwwwwww", |v, f| v.thumb32_cmn_imm(f.imm(0), f.reg(1), f.imm(2), f.imm(3)));
    inst!("ADD (imm)",    "11110i01000Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_add_imm_1(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));
    inst!("ADC (imm)",    "11110i01010Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_adc_imm(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));
    inst!("SBC (imm)",    "11110i01011Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_sbc_imm(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));
    inst!("CMP (imm)",    "11110i011011nnnn0vvv1111wwwwwwww", |v, f| v.thumb32_cmp_imm(f.imm(0), f.reg(1), f.imm(2), f.imm(3)));
    inst!("SUB (imm)",    "11110i01101Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_sub_imm_1(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));
    inst!("RSB (imm)",    "11110i01110Snnnn0vvvddddwwwwwwww", |v, f| v.thumb32_rsb_imm(f.imm(0), f.flag(1), f.reg(2), f.imm(3), f.reg(4), f.imm(5)));

    // Data processing (plain binary immediate)
    inst!("ADR (T3)",     "11110i10000011110vvvddddwwwwwwww", |v, f| v.thumb32_adr_after(f.imm(0), f.imm(1), f.reg(2), f.imm(3)));
    inst!("ADDW",         "11110i100000nnnn0vvvddddwwwwwwww", |v, f| v.thumb32_add_imm_2(f.imm(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4)));
    inst!("MOVW (imm)",   "11110i100100jjjj0vvvddddwwwwwwww", |v, f| v.thumb32_movw_imm(f.imm(0), f.imm(1), f.imm(2), f.reg(3), f.imm(4)));
    inst!("ADR (T2)",     "11110i10101011110vvvddddwwwwwwww", |v, f| v.thumb32_adr_before(f.imm(0), f.imm(1), f.reg(2), f.imm(3)));
    inst!("SUBW",         "11110i101010nnnn0vvvddddwwwwwwww", |v, f| v.thumb32_sub_imm_2(f.imm(0), f.reg(1), f.imm(2), f.reg(3), f.imm(4)));
    inst!("MOVT",         "11110i101100jjjj0vvvddddwwwwwwww", |v, f| v.thumb32_movt(f.imm(0), f.imm(1), f.imm(2), f.reg(3), f.imm(4)));
    inst!("SBFX",         "111100110100nnnn0iiiddddvv0wwwww", |v, f| v.thumb32_sbfx(f.reg(0), f.imm(1), f.reg(2), f.imm(3), f.imm(4)));
    inst!("BFC",          "11110011011011110iiiddddvv0wwwww", |v, f| v.thumb32_bfc(f.imm(0), f.reg(1), f.imm(2), f.imm(3)));
    inst!("BFI",          "111100110110nnnn0iiiddddvv0wwwww", |v, f| v.thumb32_bfi(f.reg(0), f.imm(1), f.reg(2), f.imm(3), f.imm(4)));
    inst!("UBFX",         "111100111100nnnn0iiiddddvv0wwwww", |v, f| v.thumb32_ubfx(f.reg(0), f.imm(1), f.reg(2), f.imm(3), f.imm(4)));

    // Branches
    inst!("B (cond)",     "11110Scccciiiiii10J0Kvvvvvvvvvvv", |v, f| v.thumb32_b_cond(f.imm(0), f.cond(1), f.imm(2), f.imm(3), f.imm(4), f.imm(5)));
    inst!("B",            "11110Svvvvvvvvvv10J1Kwwwwwwwwwww", |v, f| v.thumb32_b(f.flag(0), f.imm(1), f.flag(2), f.flag(3), f.imm(4)));
    inst!("BL (imm)",     "11110Svvvvvvvvvv11J1Kwwwwwwwwwww", |v, f| v.thumb32_bl_imm(f.flag(0), f.imm(1), f.flag(2), f.flag(3), f.imm(4)));
    inst!("BLX (imm)",    "11110Svvvvvvvvvv11J0Kwwwwwwwwww0", |v, f| v.thumb32_blx_imm(f.flag(0), f.imm(1), f.flag(2), f.flag(3), f.imm(4)));

    // Store single data item
    inst!("STRB (imm8)",  "111110000000nnnntttt1puwvvvvvvvv", |v, f| v.thumb32_strb_imm_1(f.reg(0), f.reg(1), f.flag(2), f.flag(3), f.flag(4), f.imm(5)));
    inst!("STRB (imm12)", "111110001000nnnnttttvvvvvvvvvvvv", |v, f| v.thumb32_strb_imm_2(f.reg(0), f.reg(1), f.imm(2)));
    inst!("STRB (reg)",   "111110000000nnnntttt000000vvmmmm", |v, f| v.thumb32_strb_reg(f.reg(0), f.reg(1), f.imm(2), f.reg(3)));
    inst!("STRH (imm8)",  "111110000010nnnntttt1puwvvvvvvvv", |v, f| v.thumb32_strh_imm_1(f.reg(0), f.reg(1), f.flag(2), f.flag(3), f.flag(4), f.imm(5)));
    inst!("STRH (imm12)", "111110001010nnnnttttvvvvvvvvvvvv", |v, f| v.thumb32_strh_imm_2(f.reg(0), f.reg(1), f.imm(2)));
    inst!("STRH (reg)",   "111110000010nnnntttt000000vvmmmm", |v, f| v.thumb32_strh_reg(f.reg(0), f.reg(1), f.imm(2), f.reg(3)));
    inst!("STR (imm8)",   "111110000100nnnntttt1puwvvvvvvvv", |v, f| v.thumb32_str_imm_1(f.reg(0), f.reg(1), f.flag(2), f.flag(3), f.flag(4), f.imm(5)));
    inst!("STR (imm12)",  "111110001100nnnnttttvvvvvvvvvvvv", |v, f| v.thumb32_str_imm_2(f.reg(0), f.reg(1), f.imm(2)));
    inst!("STR (reg)",    "111110000100nnnntttt000000vvmmmm", |v, f| v.thumb32_str_reg(f.reg(0), f.reg(1), f.imm(2), f.reg(3)));

    // Load byte and memory hints
    inst!("LDRB (lit)",   "11111000u0011111ttttvvvvvvvvvvvv", |v, f| v.thumb32_ldrb_lit(f.flag(0), f.reg(1), f.imm(2)));
    inst!("LDRB (imm8)",  "111110000001nnnntttt1puwvvvvvvvv", |v, f| v.thumb32_ldrb_imm8(f.reg(0), f.reg(1), f.flag(2), f.flag(3), f.flag(4), f.imm(5)));
    inst!("LDRB (imm12)", "111110001001nnnnttttvvvvvvvvvvvv", |v, f| v.thumb32_ldrb_imm12(f.reg(0), f.reg(1), f.imm(2)));
    inst!("LDRB (reg)",   "111110000001nnnntttt000000vvmmmm", |v, f| v.thumb32_ldrb_reg(f.reg(0), f.reg(1), f.imm(2), f.reg(3)));
    inst!("LDRSB (lit)",  "11111001u0011111ttttvvvvvvvvvvvv", |v, f| v.thumb32_ldrsb_lit(f.flag(0), f.reg(1), f.imm(2)));
    inst!("LDRSB (imm8)", "111110010001nnnntttt1puwvvvvvvvv", |v, f| v.thumb32_ldrsb_imm8(f.reg(0), f.reg(1), f.flag(2), f.flag(3), f.flag(4), f.imm(5)));
    inst!("LDRSB (imm12)", "111110011001nnnnttttvvvvvvvvvvvv", |v, f| v.thumb32_ldrsb_imm12(f.reg(0), f.reg(1), f.imm(2)));
    inst!("LDRSB (reg)",  "111110010001nnnntttt000000vvmmmm", |v, f| v.thumb32_ldrsb_reg(f.reg(0), f.reg(1), f.imm(2), f.reg(3)));

    // Load halfword and memory hints
    inst!("LDRH (lit)",   "11111000u0111111ttttvvvvvvvvvvvv", |v, f| v.thumb32_ldrh_lit(f.flag(0), f.reg(1), f.imm(2)));
    inst!("LDRH (imm8)",  "111110000011nnnntttt1puwvvvvvvvv", |v, f| v.thumb32_ldrh_imm8(f.reg(0), f.reg(1), f.flag(2), f.flag(3), f.flag(4), f.imm(5)));
    inst!("LDRH (imm12)", "111110001011nnnnttttvvvvvvvvvvvv", |v, f| v.thumb32_ldrh_imm12(f.reg(0), f.reg(1), f.imm(2)));
    inst!("LDRH (reg)",   "111110000011nnnntttt000000vvmmmm", |v, f| v.thumb32_ldrh_reg(f.reg(0), f.reg(1), f.imm(2), f.reg(3)));
    inst!("LDRSH (lit)",  "11111001u0111111ttttvvvvvvvvvvvv", |v, f| v.thumb32_ldrsh_lit(f.flag(0), f.reg(1), f.imm(2)));
    inst!("LDRSH (imm8)", "111110010011nnnntttt1puwvvvvvvvv", |v, f| v.thumb32_ldrsh_imm8(f.reg(0), f.reg(1), f.flag(2), f.flag(3), f.flag(4), f.imm(5)));
    inst!("LDRSH (imm12)", "111110011011nnnnttttvvvvvvvvvvvv", |v, f| v.thumb32_ldrsh_imm12(f.reg(0), f.reg(1), f.imm(2)));
    inst!("LDRSH (reg)",  "111110010011nnnntttt000000vvmmmm", |v, f| v.thumb32_ldrsh_reg(f.reg(0), f.reg(1), f.imm(2), f.reg(3)));

    // Load word
    inst!("LDR (lit)",    "11111000u1011111ttttvvvvvvvvvvvv", |v, f| v.thumb32_ldr_lit(f.flag(0), f.reg(1), f.imm(2)));
    inst!("LDR (imm8)",   "111110000101nnnntttt1puwvvvvvvvv", |v, f| v.thumb32_ldr_imm8(f.reg(0), f.reg(1), f.flag(2), f.flag(3), f.flag(4), f.imm(5)));
    inst!("LDR (imm12)",  "111110001101nnnnttttvvvvvvvvvvvv", |v, f| v.thumb32_ldr_imm12(f.reg(0), f.reg(1), f.imm(2)));
    inst!("LDR (reg)",    "111110000101nnnntttt000000vvmmmm", |v, f| v.thumb32_ldr_reg(f.reg(0), f.reg(1), f.imm(2), f.reg(3)));

    // Data processing (register)
    inst!("LSL (reg)",    "11111010000Snnnn1111dddd0000mmmm", |v, f| v.thumb32_lsl_reg(f.flag(0), f.reg(1), f.reg(2), f.reg(3)));
    inst!("LSR (reg)",    "11111010001Snnnn1111dddd0000mmmm", |v, f| v.thumb32_lsr_reg(f.flag(0), f.reg(1), f.reg(2), f.reg(3)));
    inst!("ASR (reg)",    "11111010010Snnnn1111dddd0000mmmm", |v, f| v.thumb32_asr_reg(f.flag(0), f.reg(1), f.reg(2), f.reg(3)));
    inst!("ROR (reg)",    "11111010011Snnnn1111dddd0000mmmm", |v, f| v.thumb32_ror_reg(f.flag(0), f.reg(1), f.reg(2), f.reg(3)));
    inst!("SXTH",         "11111010000011111111dddd10rrmmmm", |v, f| v.thumb32_sxth(f.reg(0), f.imm(1), f.reg(2)));
    inst!("UXTH",         "11111010000111111111dddd10rrmmmm", |v, f| v.thumb32_uxth(f.reg(0), f.imm(1), f.reg(2)));
    inst!("SXTB",         "11111010010011111111dddd10rrmmmm", |v, f| v.thumb32_sxtb(f.reg(0), f.imm(1), f.reg(2)));
    inst!("UXTB",         "11111010010111111111dddd10rrmmmm", |v, f| v.thumb32_uxtb(f.reg(0), f.imm(1), f.reg(2)));

    // Miscellaneous operations
    inst!("CLZ",          "111110101011nnnn1111dddd1000mmmm", |v, f| v.thumb32_clz(f.reg(0), f.reg(1), f.reg(2)));
    inst!("RBIT",         "111110101001nnnn1111dddd1010mmmm", |v, f| v.thumb32_rbit(f.reg(0), f.reg(1), f.reg(2)));
    inst!("REV",          "111110101001nnnn1111dddd1000mmmm", |v, f| v.thumb32_rev(f.reg(0), f.reg(1), f.reg(2)));
    inst!("REV16",        "111110101001nnnn1111dddd1001mmmm", |v, f| v.thumb32_rev16(f.reg(0), f.reg(1), f.reg(2)));
    inst!("REVSH",        "111110101001nnnn1111dddd1011mmmm", |v, f| v.thumb32_revsh(f.reg(0), f.reg(1), f.reg(2)));

    // Multiply
    inst!("MUL",          "111110110000nnnn1111dddd0000mmmm", |v, f| v.thumb32_mul(f.reg(0), f.reg(1), f.reg(2)));
    inst!("MLA",          "111110110000nnnnaaaadddd0000mmmm", |v, f| v.thumb32_mla(f.reg(0), f.reg(1), f.reg(2), f.reg(3)));
    inst!("MLS",          "111110110000nnnnaaaadddd0001mmmm", |v, f| v.thumb32_mls(f.reg(0), f.reg(1), f.reg(2), f.reg(3)));

    // Permanently undefined
    inst!("UDF",          "111101111111----1010------------", |v, _| v.thumb32_udf());

    Ok(table)
}

fn build() -> Result<Vec<Matcher>, DecodeError> {
    build_table(rows()?, COMES_FIRST)
}

static TABLE: OnceLock<Result<Vec<Matcher>, DecodeError>> = OnceLock::new();

/// The sorted Thumb-32 decode table.
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
    fn ldr_literal_overrides_the_register_form() {
        assert_eq!(table().unwrap()[0].name(), "LDR (lit)");
        // LDR R0, [PC, #-0] has the register-offset form's fixed bits.
        assert_eq!(decode(0xF85F_0000).unwrap().unwrap().name(), "LDR (lit)");
    }

    #[test]
    fn specific_encodings_shadow_general_ones() {
        // PUSH {R4, LR} is also a valid STMDB SP! encoding.
        assert_eq!(decode(0xE92D_4010).unwrap().unwrap().name(), "PUSH");
        // MOV.W R0, #1 sits in the ORR (imm) space with Rn = 1111.
        assert_eq!(decode(0xF04F_0001).unwrap().unwrap().name(), "MOV (imm)");
        // RRX is ROR (imm) with a zero shift amount.
        assert_eq!(decode(0xEA4F_0032).unwrap().unwrap().name(), "RRX");
        assert_eq!(decode(0xEA4F_0072).unwrap().unwrap().name(), "ROR (imm)");
        // MUL is MLA with Ra = 1111.
        assert_eq!(decode(0xFB00_F102).unwrap().unwrap().name(), "MUL");
        assert_eq!(decode(0xFB00_1102).unwrap().unwrap().name(), "MLA");
    }

    #[test]
    fn representative_encodings_decode() {
        assert_eq!(decode(0xE8BD_8001).unwrap().unwrap().name(), "POP");
        assert_eq!(decode(0xEB01_0042).unwrap().unwrap().name(), "ADD (reg)");
        assert_eq!(decode(0xF8D1_2004).unwrap().unwrap().name(), "LDR (imm12)");
        assert_eq!(decode(0xF7F0_A000).unwrap().unwrap().name(), "UDF");
        assert_eq!(decode(0xF000_B801).unwrap().unwrap().name(), "B");
    }
}
