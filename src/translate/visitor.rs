use a32_asm::bit;
use a32_asm::{Cond, Imm, LocationDescriptor, Reg};

use crate::exception::Exception;
use crate::ir::{Block, IrEmitter, ResultAndCarry, Terminal, U1, U32};
use crate::options::TranslationOptions;
use crate::translate::ConditionalState;

/// The translation context handlers operate on: the IR emitter, the options,
/// and the conditional-execution state machine.
pub struct TranslatorVisitor<'a> {
    pub(crate) ir: IrEmitter<'a>,
    pub(crate) options: TranslationOptions,
    pub(crate) cond_state: ConditionalState,
    pub(crate) current_instruction_size: u32,
}

impl<'a> TranslatorVisitor<'a> {
    pub(crate) fn new(
        block: &'a mut Block,
        descriptor: LocationDescriptor,
        options: TranslationOptions,
    ) -> Self {
        TranslatorVisitor {
            ir: IrEmitter::new(block, descriptor, options.arch_version),
            options,
            cond_state: ConditionalState::None,
            current_instruction_size: 2,
        }
    }

    /// The location one instruction past the one being lifted.
    pub(crate) fn next_location(&self) -> LocationDescriptor {
        self.ir
            .current_location
            .advance_pc(self.current_instruction_size as i32)
            .advance_it()
    }

    /// Runs `cond` through the conditional-execution state machine.
    ///
    /// Returns whether the instruction should be lifted. On a condition
    /// change the block is terminated here and the handler never runs.
    pub(crate) fn condition_passed(&mut self, cond: Cond) -> bool {
        debug_assert!(self.cond_state != ConditionalState::Break);

        if cond == Cond::NV {
            // Obsolete "never" condition.
            self.cond_state = ConditionalState::Break;
            return self.raise_exception(Exception::UnpredictableInstruction);
        }

        if self.cond_state == ConditionalState::Translating {
            if self.ir.block.condition_failed_location() != Some(self.ir.current_location)
                || cond == Cond::AL
            {
                self.cond_state = ConditionalState::Trailing;
            } else if cond == self.ir.block.condition() {
                let next = self.next_location();
                self.ir.block.set_condition_failed_location(next);
                let cycles = self.ir.block.condition_failed_cycle_count();
                self.ir.block.set_condition_failed_cycle_count(cycles + 1);
                return true;
            } else {
                // The condition changed; a new block picks up from here.
                self.cond_state = ConditionalState::Break;
                let here = self.ir.current_location;
                self.ir.set_terminal(Terminal::LinkBlockFast(here));
                return false;
            }
        }

        if cond == Cond::AL {
            return true;
        }

        if !self.ir.block.is_empty() {
            // Unconditional instructions precede this one; quit and let the
            // dispatcher form a fresh block with the condition at its entry.
            self.cond_state = ConditionalState::Break;
            let here = self.ir.current_location;
            self.ir.set_terminal(Terminal::LinkBlockFast(here));
            return false;
        }

        self.cond_state = ConditionalState::Translating;
        self.ir.block.set_condition(cond);
        let next = self.next_location();
        self.ir.block.set_condition_failed_location(next);
        let cycles = self.ir.block.cycle_count();
        self.ir.block.set_condition_failed_cycle_count(cycles + 1);
        true
    }

    /// The condition check run before dispatch: inside an IT block the
    /// block's condition applies, otherwise the instruction is unconditional.
    pub(crate) fn thumb_condition_passed(&mut self) -> bool {
        let it = self.ir.current_location.it();
        let cond = if it.is_in_it_block() { it.cond() } else { Cond::AL };
        self.condition_passed(cond)
    }

    /// Whether we are inside an IT block with further slots after this one.
    /// PC-writing loads are unpredictable in that position.
    pub(crate) fn is_mid_it_block(&self) -> bool {
        let it = self.ir.current_location.it();
        it.is_in_it_block() && !it.is_last_in_it_block()
    }

    /// Lifts an exceptional event and terminates the block.
    pub(crate) fn raise_exception(&mut self, exception: Exception) -> bool {
        self.ir.update_upper_location_descriptor();
        let next_pc = self
            .ir
            .current_location
            .pc()
            .wrapping_add(self.current_instruction_size);
        let next_pc = self.ir.imm32(next_pc);
        self.ir.branch_write_pc(next_pc);
        self.ir.exception_raised(exception);
        self.ir.set_terminal(Terminal::ReturnToDispatch);
        false
    }

    /// A reserved or unallocated encoding.
    pub(crate) fn undefined_instruction(&mut self) -> bool {
        self.raise_exception(Exception::UndefinedInstruction)
    }

    /// An encoding-specific architectural constraint was violated.
    pub(crate) fn unpredictable_instruction(&mut self) -> bool {
        if self.options.define_unpredictable_behaviour {
            return true;
        }
        self.raise_exception(Exception::UnpredictableInstruction)
    }

    /// Routes a decoded-but-not-lifted instruction to the interpreter.
    pub(crate) fn interpret_current(&mut self) -> bool {
        self.ir.update_upper_location_descriptor();
        let here = self.ir.current_location;
        self.ir.set_terminal(Terminal::Interpret(here));
        false
    }

    /// Expands a Thumb modified immediate to its 32-bit value.
    pub(crate) fn thumb_expand_imm(i: Imm<1>, imm3: Imm<3>, imm8: Imm<8>) -> u32 {
        let imm12 = i.zero_extend() << 11 | imm3.zero_extend() << 8 | imm8.zero_extend();
        if bit::bits(imm12, 10, 2) == 0 {
            let bytes = imm12 & 0xFF;
            return match bit::bits(imm12, 8, 2) {
                0b00 => bytes,
                0b01 => bytes << 16 | bytes,
                0b10 => bytes << 24 | bytes << 8,
                _ => bit::replicate_byte(bytes),
            };
        }
        let rotate = bit::bits(imm12, 7, 5);
        (0x80 | (imm12 & 0x7F)).rotate_right(rotate)
    }

    /// Modified-immediate expansion with its carry-out: bit 31 of the result
    /// for the rotate form, the carry-in otherwise.
    pub(crate) fn thumb_expand_imm_c(
        &mut self,
        i: Imm<1>,
        imm3: Imm<3>,
        imm8: Imm<8>,
    ) -> (u32, U1) {
        let imm32 = Self::thumb_expand_imm(i, imm3, imm8);
        let carry = if imm3.bit(2) || i.bit(0) {
            self.ir.imm1(bit::bit(imm32, 31))
        } else {
            self.ir.get_c_flag()
        };
        (imm32, carry)
    }

    /// Shifted-register operand without its carry-out.
    pub(crate) fn decode_shifted_reg(
        &mut self,
        m: Reg,
        imm3: Imm<3>,
        imm2: Imm<2>,
        t: Imm<2>,
    ) -> U32 {
        self.shifted_reg(m, imm3, imm2, t, false).result
    }

    /// Shifted-register operand together with its carry-out.
    pub(crate) fn decode_shifted_reg_carry(
        &mut self,
        m: Reg,
        imm3: Imm<3>,
        imm2: Imm<2>,
        t: Imm<2>,
    ) -> ResultAndCarry {
        self.shifted_reg(m, imm3, imm2, t, true)
    }

    fn shifted_reg(
        &mut self,
        m: Reg,
        imm3: Imm<3>,
        imm2: Imm<2>,
        t: Imm<2>,
        with_carry: bool,
    ) -> ResultAndCarry {
        let reg = self.ir.get_register(m);
        let carry_in = self.ir.get_c_flag();
        let mut amount = (imm3.zero_extend() << 2 | imm2.zero_extend()) as u8;
        match t.zero_extend() {
            0b00 => {
                let shift = self.ir.imm8(amount);
                if with_carry {
                    self.ir.logical_shift_left_carry(reg, shift, carry_in)
                } else {
                    let result = self.ir.logical_shift_left(reg, shift, carry_in);
                    ResultAndCarry { result, carry: carry_in }
                }
            }
            0b01 => {
                if amount == 0 {
                    amount = 32;
                }
                let shift = self.ir.imm8(amount);
                if with_carry {
                    self.ir.logical_shift_right_carry(reg, shift, carry_in)
                } else {
                    let result = self.ir.logical_shift_right(reg, shift, carry_in);
                    ResultAndCarry { result, carry: carry_in }
                }
            }
            0b10 => {
                if amount == 0 {
                    amount = 32;
                }
                let shift = self.ir.imm8(amount);
                if with_carry {
                    self.ir.arithmetic_shift_right_carry(reg, shift, carry_in)
                } else {
                    let result = self.ir.arithmetic_shift_right(reg, shift, carry_in);
                    ResultAndCarry { result, carry: carry_in }
                }
            }
            _ => {
                if amount == 0 {
                    if with_carry {
                        self.ir.rotate_right_extended_carry(reg, carry_in)
                    } else {
                        let result = self.ir.rotate_right_extended(reg, carry_in);
                        ResultAndCarry { result, carry: carry_in }
                    }
                } else {
                    let shift = self.ir.imm8(amount);
                    if with_carry {
                        self.ir.rotate_right_carry(reg, shift, carry_in)
                    } else {
                        let result = self.ir.rotate_right(reg, shift, carry_in);
                        ResultAndCarry { result, carry: carry_in }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Opcode, Value};
    use crate::options::TranslationOptions;
    use quickcheck::quickcheck;

    fn expand(imm12: u32) -> u32 {
        TranslatorVisitor::thumb_expand_imm(
            Imm::new(imm12 >> 11 & 1),
            Imm::new(imm12 >> 8 & 0b111),
            Imm::new(imm12 & 0xFF),
        )
    }

    #[test]
    fn byte_forms_replicate() {
        assert_eq!(expand(0x0AB), 0x0000_00AB);
        assert_eq!(expand(0x1AB), 0x00AB_00AB);
        assert_eq!(expand(0x2AB), 0xAB00_AB00);
        assert_eq!(expand(0x3AB), 0xABAB_ABAB);
    }

    #[test]
    fn rotate_form_rotates_a_set_top_bit() {
        assert_eq!(expand(0x47F), 0xFF00_0000);
        assert_eq!(expand(0x400), 0x8000_0000);
        assert_eq!(expand(0xFFF), 0x0000_01FE);
    }

    quickcheck! {
        fn rotate_form_preserves_the_eight_set_bits(imm12: u16) -> bool {
            let imm12 = u32::from(imm12) & 0xFFF;
            let result = expand(imm12);
            if imm12 >> 10 == 0 {
                // Byte-replication forms handled above.
                true
            } else {
                result.count_ones() == (0x80 | imm12 & 0x7F).count_ones()
            }
        }
    }

    #[test]
    fn expansion_carry_is_bit_31_for_rotate_forms_only() {
        let mut block = Block::new(LocationDescriptor::thumb(0));
        let mut v = TranslatorVisitor::new(
            &mut block,
            LocationDescriptor::thumb(0),
            TranslationOptions::new(),
        );

        let (imm, carry) = v.thumb_expand_imm_c(Imm::new(0), Imm::new(0b100), Imm::new(0x7F));
        assert_eq!(imm, 0xFF00_0000);
        assert_eq!(carry.value(), Value::ImmU1(true));

        // The non-rotate form forwards the current C flag.
        let (imm, carry) = v.thumb_expand_imm_c(Imm::new(0), Imm::new(0), Imm::new(0x12));
        assert_eq!(imm, 0x12);
        assert!(matches!(carry.value(), Value::Inst(_)));
    }

    #[test]
    fn shift_amount_zero_means_32_for_lsr_and_asr_and_rrx_for_ror() {
        let mut block = Block::new(LocationDescriptor::thumb(0));
        let mut v = TranslatorVisitor::new(
            &mut block,
            LocationDescriptor::thumb(0),
            TranslationOptions::new(),
        );

        v.decode_shifted_reg(Reg::R1, Imm::new(0), Imm::new(0), Imm::new(0b01));
        v.decode_shifted_reg(Reg::R1, Imm::new(0), Imm::new(0), Imm::new(0b10));
        v.decode_shifted_reg(Reg::R1, Imm::new(0), Imm::new(0), Imm::new(0b11));

        let shifts: Vec<_> = block
            .instructions()
            .iter()
            .filter(|inst| {
                matches!(
                    inst.opcode(),
                    Opcode::LogicalShiftRight
                        | Opcode::ArithmeticShiftRight
                        | Opcode::RotateRightExtended
                )
            })
            .collect();
        assert_eq!(shifts.len(), 3);
        assert_eq!(shifts[0].opcode(), Opcode::LogicalShiftRight);
        assert_eq!(shifts[0].args()[1], Value::ImmU8(32));
        assert_eq!(shifts[1].opcode(), Opcode::ArithmeticShiftRight);
        assert_eq!(shifts[1].args()[1], Value::ImmU8(32));
        assert_eq!(shifts[2].opcode(), Opcode::RotateRightExtended);
    }
}

