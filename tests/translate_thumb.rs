//! End-to-end block-shape tests for the Thumb translator.

use a32_lift::prelude::*;

/// Serves `halfwords` as guest code starting at address 0.
fn memory(halfwords: Vec<u16>) -> impl FnMut(u32) -> Result<u32, PageFault> {
    move |vaddr| {
        assert_eq!(vaddr & 3, 0, "code reads are 4-byte aligned");
        let index = (vaddr / 2) as usize;
        let lo = halfwords.get(index).copied();
        let hi = halfwords.get(index + 1).copied();
        match (lo, hi) {
            (Some(lo), hi) => Ok(u32::from(lo) | u32::from(hi.unwrap_or(0)) << 16),
            (None, _) => Err(PageFault { vaddr }),
        }
    }
}

fn lift(halfwords: Vec<u16>) -> Block {
    translate(
        LocationDescriptor::thumb(0),
        memory(halfwords),
        &TranslationOptions::new(),
    )
    .expect("translation succeeds")
}

fn opcodes(block: &Block) -> Vec<Opcode> {
    block.instructions().iter().map(Inst::opcode).collect()
}

#[test]
fn linear_block_unconditional() {
    // ADDS R0, R1, R2 followed by a conditional branch that forces the block
    // to end before it.
    let block = lift(vec![0x1888, 0xD003]);

    assert_eq!(block.condition(), Cond::AL);
    assert_eq!(block.cycle_count(), 1);
    assert_eq!(
        opcodes(&block),
        vec![
            Opcode::GetRegister,
            Opcode::GetRegister,
            Opcode::Add,
            Opcode::SetRegister,
            Opcode::GetNZCVFromOp,
            Opcode::SetCpsrNZCV,
        ]
    );
    assert!(block.has_terminal());
    assert_eq!(
        block.terminal(),
        Some(&Terminal::LinkBlockFast(LocationDescriptor::thumb(2)))
    );
    assert_eq!(block.end_location(), Some(LocationDescriptor::thumb(2)));
}

#[test]
fn conditional_branch_sets_block_condition() {
    // BEQ #+6 (imm8 = 3).
    let block = lift(vec![0xD003]);

    assert_eq!(block.condition(), Cond::EQ);
    assert_eq!(
        block.condition_failed_location(),
        Some(LocationDescriptor::thumb(2))
    );
    assert_ne!(block.condition_failed_location(), Some(block.location()));
    assert_eq!(block.condition_failed_cycle_count(), 1);
    // Branch target: PC (= 4) + 2 * 3.
    assert_eq!(
        block.terminal(),
        Some(&Terminal::LinkBlock(LocationDescriptor::thumb(10)))
    );
    assert!(!block.instructions().iter().any(Inst::writes_cpsr));
}

#[test]
fn it_updates_the_successor_descriptor_and_predicates_the_next_block() {
    // IT EQ.
    let block = lift(vec![0xBF08]);
    assert!(block.instructions().is_empty());
    let successor = LocationDescriptor::thumb(2).with_it(ItState::new(0x08));
    assert_eq!(block.terminal(), Some(&Terminal::LinkBlock(successor)));

    // MOVEQ R0, #1 inside the block the IT opened, then an unconditional
    // MOVS R1, #2 that lands in trailing state and writes flags.
    let block = translate(
        successor,
        memory(vec![0xBF08, 0x2001, 0x2102, 0xD003]),
        &TranslationOptions::new(),
    )
    .expect("translation succeeds");

    assert_eq!(block.condition(), Cond::EQ);
    // The predicated MOV must not touch the CPSR; the trailing MOVS does,
    // which ends the block right after it.
    assert_eq!(
        block.condition_failed_location(),
        Some(LocationDescriptor::thumb(4))
    );
    assert_eq!(block.cycle_count(), 2);
    assert_eq!(
        block.terminal(),
        Some(&Terminal::LinkBlockFast(LocationDescriptor::thumb(6)))
    );
    let flag_writes: Vec<_> = block
        .instructions()
        .iter()
        .filter(|inst| inst.writes_cpsr())
        .collect();
    assert_eq!(flag_writes.len(), 1, "only the trailing MOVS writes flags");
}

#[test]
fn ldmia_with_pc_pops_through_the_return_stack() {
    // LDMIA R13!, {R0, PC}
    let block = lift(vec![0xE8BD, 0x8001]);

    let reads = opcodes(&block)
        .iter()
        .filter(|op| **op == Opcode::ReadMemory32)
        .count();
    assert_eq!(reads, 2);

    // The PC is written from the second loaded value.
    let pc_write = block
        .instructions()
        .iter()
        .position(|inst| inst.opcode() == Opcode::BXWritePC)
        .expect("PC write present");
    let last_read = block
        .instructions()
        .iter()
        .rposition(|inst| inst.opcode() == Opcode::ReadMemory32)
        .expect("memory read present");
    match block.instructions()[pc_write].args()[0] {
        Value::Inst(id) => assert_eq!(id.index(), last_read),
        other => panic!("PC written from {other:?}, expected a loaded value"),
    }

    assert_eq!(block.terminal(), Some(&Terminal::PopRsbHint));
}

#[test]
fn shifted_register_add_lifts_without_flag_writes() {
    // ADD.W R0, R1, R2, LSL #3 followed by the block-ending branch.
    let block = lift(vec![0xEB01, 0x00C2, 0xD003]);

    assert_eq!(
        opcodes(&block),
        vec![
            Opcode::GetRegister,
            Opcode::GetCFlag,
            Opcode::LogicalShiftLeft,
            Opcode::GetRegister,
            Opcode::Add,
            Opcode::SetRegister,
        ]
    );
    assert!(!block.instructions().iter().any(Inst::writes_cpsr));

    // The shift takes the register, the literal amount and the carry-in.
    let shift = &block.instructions()[2];
    assert_eq!(shift.args()[1], Value::ImmU8(3));
}

#[test]
fn modified_immediate_carry_is_bit_31_of_the_expansion() {
    // ORRS.W R0, R1, #0xFF000000 (rotate form).
    let block = lift(vec![0xF051, 0x407F, 0xD003]);

    let or = block
        .instructions()
        .iter()
        .find(|inst| inst.opcode() == Opcode::Or)
        .expect("ORR lifts to Or");
    assert!(or.args().contains(&Value::ImmU32(0xFF00_0000)));

    let nzc = block
        .instructions()
        .iter()
        .find(|inst| inst.opcode() == Opcode::SetCpsrNZC)
        .expect("ORRS updates N/Z/C");
    assert_eq!(nzc.args()[1], Value::ImmU1(true));
}

#[test]
fn single_step_translates_exactly_one_instruction() {
    let descriptor = LocationDescriptor::thumb(0).with_single_stepping(true);
    let block = translate(
        descriptor,
        memory(vec![0x1888, 0x1888]),
        &TranslationOptions::new(),
    )
    .expect("translation succeeds");

    assert_eq!(block.cycle_count(), 1);
    assert_eq!(
        block.terminal(),
        Some(&Terminal::LinkBlock(
            LocationDescriptor::thumb(2).with_single_stepping(true)
        ))
    );
}

#[test]
fn decode_miss_lifts_an_undefined_instruction_exception() {
    // LDREX R0, [R1] sits in an unimplemented family.
    let block = lift(vec![0xE851, 0x0F00]);

    let raised = block
        .instructions()
        .iter()
        .find(|inst| inst.opcode() == Opcode::ExceptionRaised)
        .expect("exception lifted");
    assert_eq!(
        raised.args()[0],
        Value::ImmU8(Exception::UndefinedInstruction.code())
    );
    assert_eq!(block.terminal(), Some(&Terminal::ReturnToDispatch));
}

#[test]
fn short_ldm_register_list_is_unpredictable() {
    // LDMIA R1!, {R0}: fewer than two registers.
    let block = lift(vec![0xE8B1, 0x0001]);
    let raised = block
        .instructions()
        .iter()
        .find(|inst| inst.opcode() == Opcode::ExceptionRaised)
        .expect("exception lifted");
    assert_eq!(
        raised.args()[0],
        Value::ImmU8(Exception::UnpredictableInstruction.code())
    );
    assert!(!opcodes(&block).contains(&Opcode::ReadMemory32));
}

#[test]
fn defined_unpredictable_behaviour_continues_the_block() {
    let options = TranslationOptions::new().with_define_unpredictable_behaviour(true);
    let block = translate(
        LocationDescriptor::thumb(0),
        memory(vec![0xE8B1, 0x0001, 0xD003]),
        &options,
    )
    .expect("translation succeeds");
    assert!(!opcodes(&block).contains(&Opcode::ExceptionRaised));
    // The defined behavior is a no-op, so the branch still joins the block.
    assert_eq!(block.cycle_count(), 2);
}

#[test]
fn hooked_hints_raise_their_events() {
    let options = TranslationOptions::new().with_hook_hint_instructions(true);
    // WFE.
    let block = translate(LocationDescriptor::thumb(0), memory(vec![0xBF20]), &options)
        .expect("translation succeeds");
    let raised = block
        .instructions()
        .iter()
        .find(|inst| inst.opcode() == Opcode::ExceptionRaised)
        .expect("hooked hint raises");
    assert_eq!(raised.args()[0], Value::ImmU8(Exception::WaitForEvent.code()));

    // Unhooked, the same word is a no-op and the block keeps going.
    let block = lift(vec![0xBF20, 0xD003]);
    assert!(block.instructions().is_empty());
}

#[test]
fn vfp_instructions_route_to_the_interpreter() {
    // VADD.F32 S0, S2, S2.
    let block = lift(vec![0xEE30, 0x0A81]);
    assert_eq!(
        block.terminal(),
        Some(&Terminal::Interpret(LocationDescriptor::thumb(0)))
    );
}

#[test]
fn thumb_asimd_encodings_reach_the_asimd_table_via_the_rewrite() {
    // VAND Q0, Q0, Q1, Thumb encoding (0xEF...).
    let block = lift(vec![0xEF00, 0x0152]);
    assert_eq!(
        block.terminal(),
        Some(&Terminal::Interpret(LocationDescriptor::thumb(0)))
    );
}

#[test]
fn bl_records_a_return_stack_entry() {
    // BL #+4.
    let block = lift(vec![0xF000, 0xF802]);
    assert!(opcodes(&block).contains(&Opcode::PushRsb));
    let lr_write = block
        .instructions()
        .iter()
        .find(|inst| inst.opcode() == Opcode::SetRegister)
        .expect("LR written");
    assert_eq!(lr_write.args()[0], Value::Reg(Reg::LR));
    assert_eq!(lr_write.args()[1], Value::ImmU32(4 | 1));
    assert_eq!(
        block.terminal(),
        Some(&Terminal::LinkBlock(LocationDescriptor::thumb(8)))
    );
}

#[test]
fn cbz_branches_on_the_check_bit() {
    // CBZ R3, #+8 (i = 0, imm5 = 4).
    let block = lift(vec![0xB123]);
    assert!(opcodes(&block).contains(&Opcode::SetCheckBit));
    match block.terminal() {
        Some(Terminal::CheckBit { then_, else_ }) => {
            assert_eq!(**then_, Terminal::LinkBlock(LocationDescriptor::thumb(12)));
            assert_eq!(**else_, Terminal::LinkBlock(LocationDescriptor::thumb(2)));
        }
        other => panic!("expected CheckBit terminal, got {other:?}"),
    }
}

#[test]
fn page_faults_abort_translation() {
    // ADDS R0, R1, R2 with nothing mapped after it.
    let result = translate(
        LocationDescriptor::thumb(0),
        memory(vec![0x1888]),
        &TranslationOptions::new(),
    );
    assert_eq!(
        result,
        Err(TranslateError::Memory(PageFault { vaddr: 4 }))
    );
}

#[test]
fn arm_mode_descriptors_are_rejected() {
    let result = translate(
        LocationDescriptor::arm(0),
        memory(vec![0x1888]),
        &TranslationOptions::new(),
    );
    assert_eq!(result, Err(TranslateError::UnsupportedInstructionSet));
}

#[test]
fn translate_single_lifts_one_prefetched_instruction() {
    let mut block = Block::new(LocationDescriptor::thumb(0));
    let should_continue = translate_single_thumb(
        &mut block,
        LocationDescriptor::thumb(0),
        0x1888,
        &TranslationOptions::new(),
    )
    .expect("translation succeeds");
    assert!(should_continue);
    assert_eq!(block.cycle_count(), 1);
    assert_eq!(block.end_location(), Some(LocationDescriptor::thumb(2)));
    assert!(!block.has_terminal());

    // A 32-bit word arrives with its first halfword in the low 16 bits.
    let mut block = Block::new(LocationDescriptor::thumb(0));
    let should_continue = translate_single_thumb(
        &mut block,
        LocationDescriptor::thumb(0),
        0x8001_E8BD,
        &TranslationOptions::new(),
    )
    .expect("translation succeeds");
    assert!(!should_continue);
    assert_eq!(block.terminal(), Some(&Terminal::PopRsbHint));
    assert_eq!(block.end_location(), Some(LocationDescriptor::thumb(4)));
}

#[test]
fn bkpt_is_lifted_even_inside_an_it_block() {
    // Block opened by IT EQ, first slot is BKPT #0.
    let descriptor = LocationDescriptor::thumb(2).with_it(ItState::new(0x08));
    let block = translate(
        descriptor,
        memory(vec![0xBF08, 0xBE00]),
        &TranslationOptions::new(),
    )
    .expect("translation succeeds");

    let raised = block
        .instructions()
        .iter()
        .find(|inst| inst.opcode() == Opcode::ExceptionRaised)
        .expect("breakpoint raised");
    assert_eq!(raised.args()[0], Value::ImmU8(Exception::Breakpoint.code()));
    // The block stays unconditional: BKPT bypasses the predication check.
    assert_eq!(block.condition(), Cond::AL);
}
