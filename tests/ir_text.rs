//! Round-trip law for the textual IR form.

use a32_lift::ir::parse_instructions;
use a32_lift::prelude::*;

fn memory(halfwords: Vec<u16>) -> impl FnMut(u32) -> Result<u32, PageFault> {
    move |vaddr| {
        let index = (vaddr / 2) as usize;
        match halfwords.get(index) {
            Some(lo) => {
                let hi = halfwords.get(index + 1).copied().unwrap_or(0);
                Ok(u32::from(*lo) | u32::from(hi) << 16)
            }
            None => Err(PageFault { vaddr }),
        }
    }
}

fn round_trip(halfwords: Vec<u16>) {
    let block = translate(
        LocationDescriptor::thumb(0),
        memory(halfwords),
        &TranslationOptions::new(),
    )
    .expect("translation succeeds");

    let text = block.to_string();
    let parsed = parse_instructions(&text).expect("dump parses");
    assert_eq!(parsed, block.instructions(), "dump:\n{text}");
}

#[test]
fn printer_and_parser_agree_on_translated_blocks() {
    // ADDS R0, R1, R2; BEQ.
    round_trip(vec![0x1888, 0xD003]);
    // LDMIA R13!, {R0, PC}.
    round_trip(vec![0xE8BD, 0x8001]);
    // ADD.W R0, R1, R2, LSL #3; BEQ.
    round_trip(vec![0xEB01, 0x00C2, 0xD003]);
    // ORRS.W R0, R1, #0xFF000000; BEQ.
    round_trip(vec![0xF051, 0x407F, 0xD003]);
    // PUSH {R4, LR}; BL; POP {R4, PC}.
    round_trip(vec![0xB510, 0xF000, 0xF802, 0xBD10]);
    // An undefined encoding, for the exception path.
    round_trip(vec![0xDE00]);
}

#[test]
fn instruction_lines_carry_their_index_and_operands() {
    let block = translate(
        LocationDescriptor::thumb(0),
        memory(vec![0x1888, 0xD003]),
        &TranslationOptions::new(),
    )
    .expect("translation succeeds");

    let text = block.to_string();
    assert!(text.contains("%0 = GetRegister R1"));
    assert!(text.contains("%1 = GetRegister R2"));
    assert!(text.contains("%2 = Add %0, %1, #0"));
    assert!(text.contains("%3 = SetRegister R0, %2"));
}

#[test]
fn parser_accepts_a_handwritten_listing() {
    let parsed = parse_instructions(
        "%0 = GetRegister R5\n\
         %1 = Add %0, #4, #0\n\
         %2 = ReadMemory32 %1\n\
         %3 = SetRegister R6, %2\n",
    )
    .expect("listing parses");
    assert_eq!(parsed.len(), 4);
    assert_eq!(parsed[1].opcode(), Opcode::Add);
    assert_eq!(parsed[1].args()[1], Value::ImmU32(4));
}
