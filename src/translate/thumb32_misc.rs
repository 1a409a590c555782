//! Thumb-32 miscellaneous operations.

use a32_asm::Reg;

use crate::translate::TranslatorVisitor;

impl TranslatorVisitor<'_> {
    fn misc_operand(&mut self, n: Reg, d: Reg, m: Reg) -> Option<crate::ir::U32> {
        // These encodings duplicate the source register in Rn and Rm.
        if m != n || d == Reg::PC || m == Reg::PC {
            return None;
        }
        Some(self.ir.get_register(m))
    }

    pub(crate) fn thumb32_clz(&mut self, n: Reg, d: Reg, m: Reg) -> bool {
        let Some(operand) = self.misc_operand(n, d, m) else {
            return self.unpredictable_instruction();
        };
        let result = self.ir.count_leading_zeros(operand);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_rbit(&mut self, n: Reg, d: Reg, m: Reg) -> bool {
        let Some(operand) = self.misc_operand(n, d, m) else {
            return self.unpredictable_instruction();
        };
        let result = self.ir.reverse_bits(operand);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_rev(&mut self, n: Reg, d: Reg, m: Reg) -> bool {
        let Some(operand) = self.misc_operand(n, d, m) else {
            return self.unpredictable_instruction();
        };
        let result = self.ir.byte_reverse_word(operand);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_rev16(&mut self, n: Reg, d: Reg, m: Reg) -> bool {
        let Some(operand) = self.misc_operand(n, d, m) else {
            return self.unpredictable_instruction();
        };
        let reversed = self.ir.byte_reverse_word(operand);
        let sixteen = self.ir.imm8(16);
        let carry = self.ir.imm1(false);
        let result = self.ir.rotate_right(reversed, sixteen, carry);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_revsh(&mut self, n: Reg, d: Reg, m: Reg) -> bool {
        let Some(operand) = self.misc_operand(n, d, m) else {
            return self.unpredictable_instruction();
        };
        let half = self.ir.least_significant_half(operand);
        let reversed = self.ir.byte_reverse_half(half);
        let result = self.ir.sign_extend_half_to_word(reversed);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_udf(&mut self) -> bool {
        self.undefined_instruction()
    }
}
