//! Decode-table invariants and a byte oracle for representative encodings.

use a32_lift::decoder::{asimd, thumb16, thumb32, vfp, Matcher};
use test_case::test_case;

/// Encoding oracle: guest bytes (little-endian halfwords, as stored in
/// memory) and the name of the matcher that must claim them.
const THUMB16_ORACLE: &[(&str, &str)] = &[
    ("8818", "ADD (reg, T1)"),
    ("881a", "SUB (reg)"),
    ("0120", "MOV (imm)"),
    ("0129", "CMP (imm)"),
    ("8840", "LSL (reg)"),
    ("4841", "ADC (reg)"),
    ("4142", "RSB (imm)"),
    ("6843", "MUL (reg)"),
    ("0847", "BX"),
    ("8847", "BLX (reg)"),
    ("0148", "LDR (literal)"),
    ("8850", "STR (reg)"),
    ("4868", "LDR (imm, T1)"),
    ("0170", "STRB (imm)"),
    ("0188", "LDRH (imm)"),
    ("0190", "STR (imm, T2)"),
    ("01a0", "ADR"),
    ("01a8", "ADD (SP plus imm, T1)"),
    ("82b0", "SUB (SP minus imm)"),
    ("c0b2", "UXTB"),
    ("10b5", "PUSH"),
    ("10bd", "POP"),
    ("18ba", "REV"),
    ("01be", "BKPT"),
    ("18bf", "IT"),
    ("00bf", "NOP"),
    ("07c4", "STMIA"),
    ("07cb", "LDMIA"),
    ("0bb1", "CBZ/CBNZ"),
    ("01d1", "B (T1)"),
    ("05e0", "B (T2)"),
    ("00de", "UDF"),
    ("01df", "SVC"),
];

const THUMB32_ORACLE: &[(&str, &str)] = &[
    ("bde80180", "POP"),
    ("2de91040", "PUSH"),
    ("a1e80c00", "STMIA"),
    ("21e90c00", "STMDB"),
    ("b1e80c00", "LDMIA"),
    ("31e90c00", "LDMDB"),
    ("01ea0203", "AND (reg)"),
    ("41ea0203", "ORR (reg)"),
    ("4fea0201", "LSL (imm)"),
    ("4fea3201", "RRX"),
    ("01ebc200", "ADD (reg)"),
    ("a1eb0200", "SUB (reg)"),
    ("41f00100", "ORR (imm)"),
    ("4ff00100", "MOV (imm)"),
    ("a1f10100", "SUB (imm)"),
    ("41f23420", "MOVW (imm)"),
    ("c0f20000", "MOVT"),
    ("6ff30700", "BFC"),
    ("c0f30700", "UBFX"),
    ("51f80400", "LDR (reg)"),
    ("d1f80420", "LDR (imm12)"),
    ("5ff80400", "LDR (lit)"),
    ("91f80420", "LDRB (imm12)"),
    ("b1f90420", "LDRSH (imm12)"),
    ("a1f80420", "STRH (imm12)"),
    ("01fa02f1", "LSL (reg)"),
    ("1ffa82f0", "UXTH"),
    ("b3fa83f0", "CLZ"),
    ("01fb02f0", "MUL"),
    ("01fb0230", "MLA"),
    ("f0f700a0", "UDF"),
    ("00f001b8", "B"),
    ("3ff0feaf", "B (cond)"),
];

fn halfword(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

fn thumb16_word(encoding: &str) -> u16 {
    let bytes = hex::decode(encoding).expect("valid hex");
    assert_eq!(bytes.len(), 2);
    halfword(&bytes)
}

fn thumb32_word(encoding: &str) -> u32 {
    let bytes = hex::decode(encoding).expect("valid hex");
    assert_eq!(bytes.len(), 4);
    u32::from(halfword(&bytes[..2])) << 16 | u32::from(halfword(&bytes[2..]))
}

#[test]
fn thumb16_oracle() {
    for (encoding, expected) in THUMB16_ORACLE {
        let word = thumb16_word(encoding);
        let matcher = thumb16::decode(word)
            .expect("table builds")
            .unwrap_or_else(|| panic!("{encoding} must decode"));
        assert_eq!(matcher.name(), *expected, "for encoding {encoding}");
    }
}

#[test]
fn thumb32_oracle() {
    for (encoding, expected) in THUMB32_ORACLE {
        let word = thumb32_word(encoding);
        let matcher = thumb32::decode(word)
            .expect("table builds")
            .unwrap_or_else(|| panic!("{encoding} must decode"));
        assert_eq!(matcher.name(), *expected, "for encoding {encoding}");
    }
}

#[test]
fn extraction_then_synthesis_is_identity_on_the_oracle() {
    for (encoding, _) in THUMB16_ORACLE {
        let word = u32::from(thumb16_word(encoding));
        let matcher = thumb16::decode(word as u16).unwrap().unwrap();
        if matcher.pattern().contains('-') {
            continue; // don't-care bits are unrecoverable
        }
        assert_eq!(matcher.synthesize(&matcher.extract(word)), word);
    }
    for (encoding, _) in THUMB32_ORACLE {
        let word = thumb32_word(encoding);
        let matcher = thumb32::decode(word).unwrap().unwrap();
        if matcher.pattern().contains('-') {
            continue;
        }
        assert_eq!(matcher.synthesize(&matcher.extract(word)), word);
    }
}

#[test_case(0xBF00, "NOP")]
#[test_case(0xBF10, "YIELD")]
#[test_case(0xBF20, "WFE")]
#[test_case(0xBF30, "WFI")]
#[test_case(0xBF40, "SEV")]
#[test_case(0xBF50, "SEVL")]
#[test_case(0xBF08, "IT"; "an it block is not a hint")]
#[test_case(0xBFE8, "IT"; "it al is still an it")]
fn the_hint_space_shadows_the_it_pattern(word: u16, expected: &str) {
    assert_eq!(thumb16::decode(word).unwrap().unwrap().name(), expected);
}

fn overlap(a: &Matcher, b: &Matcher) -> bool {
    (a.value() ^ b.value()) & (a.mask() & b.mask()) == 0
}

fn assert_equal_specificity_overlaps_are_ordered(table: &[Matcher], comes_first: &[&str]) {
    for (i, a) in table.iter().enumerate() {
        for b in &table[i + 1..] {
            if overlap(a, b) && a.specificity() == b.specificity() {
                assert!(
                    comes_first.contains(&a.name()) || comes_first.contains(&b.name()),
                    "{} and {} overlap at equal specificity",
                    a.name(),
                    b.name()
                );
            }
        }
    }
}

#[test]
fn at_most_one_matcher_wins_each_word() {
    assert_equal_specificity_overlaps_are_ordered(thumb16::table().unwrap(), &[]);
    assert_equal_specificity_overlaps_are_ordered(thumb32::table().unwrap(), &["LDR (lit)"]);
    assert_equal_specificity_overlaps_are_ordered(vfp::table().unwrap(), &[]);
    assert_equal_specificity_overlaps_are_ordered(asimd::table().unwrap(), &[]);
}

#[test]
fn tables_are_sorted_by_specificity_after_the_override_prefix() {
    let table = thumb32::table().unwrap();
    let body = table.iter().skip_while(|m| m.name() == "LDR (lit)");
    let mut previous = u32::MAX;
    for matcher in body {
        assert!(
            matcher.specificity() <= previous,
            "{} is out of order",
            matcher.name()
        );
        previous = matcher.specificity();
    }
}
