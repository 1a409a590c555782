//! Thumb-32 data processing (register): register-counted shifts and extends.

use a32_asm::{Imm, Reg};

use crate::translate::TranslatorVisitor;

impl TranslatorVisitor<'_> {
    fn shift_by_register(
        &mut self,
        s: bool,
        n: Reg,
        d: Reg,
        m: Reg,
        t: Imm<2>,
    ) -> bool {
        if d == Reg::PC || n == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let amount = self.ir.least_significant_byte(reg_m);
        let carry_in = self.ir.get_c_flag();
        if s {
            let shifted = match t.zero_extend() {
                0b00 => self.ir.logical_shift_left_carry(reg_n, amount, carry_in),
                0b01 => self.ir.logical_shift_right_carry(reg_n, amount, carry_in),
                0b10 => self.ir.arithmetic_shift_right_carry(reg_n, amount, carry_in),
                _ => self.ir.rotate_right_carry(reg_n, amount, carry_in),
            };
            self.ir.set_register(d, shifted.result);
            let nz = self.ir.nz_from(shifted.result);
            self.ir.set_cpsr_nzc(nz, shifted.carry);
        } else {
            let result = match t.zero_extend() {
                0b00 => self.ir.logical_shift_left(reg_n, amount, carry_in),
                0b01 => self.ir.logical_shift_right(reg_n, amount, carry_in),
                0b10 => self.ir.arithmetic_shift_right(reg_n, amount, carry_in),
                _ => self.ir.rotate_right(reg_n, amount, carry_in),
            };
            self.ir.set_register(d, result);
        }
        true
    }

    pub(crate) fn thumb32_lsl_reg(&mut self, s: bool, n: Reg, d: Reg, m: Reg) -> bool {
        self.shift_by_register(s, n, d, m, Imm::new(0b00))
    }

    pub(crate) fn thumb32_lsr_reg(&mut self, s: bool, n: Reg, d: Reg, m: Reg) -> bool {
        self.shift_by_register(s, n, d, m, Imm::new(0b01))
    }

    pub(crate) fn thumb32_asr_reg(&mut self, s: bool, n: Reg, d: Reg, m: Reg) -> bool {
        self.shift_by_register(s, n, d, m, Imm::new(0b10))
    }

    pub(crate) fn thumb32_ror_reg(&mut self, s: bool, n: Reg, d: Reg, m: Reg) -> bool {
        self.shift_by_register(s, n, d, m, Imm::new(0b11))
    }

    fn rotated_operand(&mut self, m: Reg, rotate: Imm<2>) -> crate::ir::U32 {
        let reg_m = self.ir.get_register(m);
        let amount = self.ir.imm8((rotate.zero_extend() * 8) as u8);
        let carry = self.ir.imm1(false);
        self.ir.rotate_right(reg_m, amount, carry)
    }

    pub(crate) fn thumb32_sxth(&mut self, d: Reg, rotate: Imm<2>, m: Reg) -> bool {
        if d == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let rotated = self.rotated_operand(m, rotate);
        let half = self.ir.least_significant_half(rotated);
        let result = self.ir.sign_extend_half_to_word(half);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_uxth(&mut self, d: Reg, rotate: Imm<2>, m: Reg) -> bool {
        if d == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let rotated = self.rotated_operand(m, rotate);
        let half = self.ir.least_significant_half(rotated);
        let result = self.ir.zero_extend_half_to_word(half);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_sxtb(&mut self, d: Reg, rotate: Imm<2>, m: Reg) -> bool {
        if d == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let rotated = self.rotated_operand(m, rotate);
        let byte = self.ir.least_significant_byte(rotated);
        let result = self.ir.sign_extend_byte_to_word(byte);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_uxtb(&mut self, d: Reg, rotate: Imm<2>, m: Reg) -> bool {
        if d == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let rotated = self.rotated_operand(m, rotate);
        let byte = self.ir.least_significant_byte(rotated);
        let result = self.ir.zero_extend_byte_to_word(byte);
        self.ir.set_register(d, result);
        true
    }
}
