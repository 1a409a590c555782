//! Thumb-32 data processing (plain binary immediate).

use a32_asm::{Imm, Reg};

use crate::translate::TranslatorVisitor;

fn ones(width: u32) -> u32 {
    if width == 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

impl TranslatorVisitor<'_> {
    pub(crate) fn thumb32_adr_after(&mut self, i: Imm<1>, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC {
            return self.unpredictable_instruction();
        }
        let imm32 = i.zero_extend() << 11 | imm3.zero_extend() << 8 | imm8.zero_extend();
        let result = self.ir.align_pc(4).wrapping_add(imm32);
        let result = self.ir.imm32(result);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_adr_before(&mut self, i: Imm<1>, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC {
            return self.unpredictable_instruction();
        }
        let imm32 = i.zero_extend() << 11 | imm3.zero_extend() << 8 | imm8.zero_extend();
        let result = self.ir.align_pc(4).wrapping_sub(imm32);
        let result = self.ir.imm32(result);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_add_imm_2(&mut self, i: Imm<1>, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC {
            return self.unpredictable_instruction();
        }
        let imm32 = i.zero_extend() << 11 | imm3.zero_extend() << 8 | imm8.zero_extend();
        let imm = self.ir.imm32(imm32);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.add(reg_n, imm);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_sub_imm_2(&mut self, i: Imm<1>, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC {
            return self.unpredictable_instruction();
        }
        let imm32 = i.zero_extend() << 11 | imm3.zero_extend() << 8 | imm8.zero_extend();
        let imm = self.ir.imm32(imm32);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.sub(reg_n, imm);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_movw_imm(&mut self, i: Imm<1>, imm4: Imm<4>, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC {
            return self.unpredictable_instruction();
        }
        let imm16 = imm4.zero_extend() << 12
            | i.zero_extend() << 11
            | imm3.zero_extend() << 8
            | imm8.zero_extend();
        let result = self.ir.imm32(imm16);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_movt(&mut self, i: Imm<1>, imm4: Imm<4>, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC {
            return self.unpredictable_instruction();
        }
        let imm16 = imm4.zero_extend() << 12
            | i.zero_extend() << 11
            | imm3.zero_extend() << 8
            | imm8.zero_extend();
        let reg_d = self.ir.get_register(d);
        let low_mask = self.ir.imm32(0xFFFF);
        let low = self.ir.and(reg_d, low_mask);
        let high = self.ir.imm32(imm16 << 16);
        let result = self.ir.or(low, high);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_sbfx(&mut self, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, widthm1: Imm<5>) -> bool {
        if d == Reg::PC || n == Reg::PC {
            return self.unpredictable_instruction();
        }
        let lsb = imm3.zero_extend() << 2 | imm2.zero_extend();
        let msb = lsb + widthm1.zero_extend();
        if msb > 31 {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let carry = self.ir.imm1(false);
        let left = self.ir.imm8((31 - msb) as u8);
        let shifted = self.ir.logical_shift_left(reg_n, left, carry);
        let right = self.ir.imm8((31 - widthm1.zero_extend()) as u8);
        let result = self.ir.arithmetic_shift_right(shifted, right, carry);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_ubfx(&mut self, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, widthm1: Imm<5>) -> bool {
        if d == Reg::PC || n == Reg::PC {
            return self.unpredictable_instruction();
        }
        let lsb = imm3.zero_extend() << 2 | imm2.zero_extend();
        let msb = lsb + widthm1.zero_extend();
        if msb > 31 {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let carry = self.ir.imm1(false);
        let amount = self.ir.imm8(lsb as u8);
        let shifted = self.ir.logical_shift_right(reg_n, amount, carry);
        let mask = self.ir.imm32(ones(widthm1.zero_extend() + 1));
        let result = self.ir.and(shifted, mask);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_bfc(&mut self, imm3: Imm<3>, d: Reg, imm2: Imm<2>, msb: Imm<5>) -> bool {
        if d == Reg::PC {
            return self.unpredictable_instruction();
        }
        let lsb = imm3.zero_extend() << 2 | imm2.zero_extend();
        let msb = msb.zero_extend();
        if msb < lsb {
            return self.unpredictable_instruction();
        }
        let mask = ones(msb - lsb + 1) << lsb;
        let reg_d = self.ir.get_register(d);
        let keep = self.ir.imm32(!mask);
        let result = self.ir.and(reg_d, keep);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_bfi(&mut self, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, msb: Imm<5>) -> bool {
        if d == Reg::PC || n == Reg::PC {
            return self.unpredictable_instruction();
        }
        let lsb = imm3.zero_extend() << 2 | imm2.zero_extend();
        let msb = msb.zero_extend();
        if msb < lsb {
            return self.unpredictable_instruction();
        }
        let mask = ones(msb - lsb + 1) << lsb;
        let reg_d = self.ir.get_register(d);
        let keep = self.ir.imm32(!mask);
        let kept = self.ir.and(reg_d, keep);
        let reg_n = self.ir.get_register(n);
        let carry = self.ir.imm1(false);
        let amount = self.ir.imm8(lsb as u8);
        let moved = self.ir.logical_shift_left(reg_n, amount, carry);
        let take = self.ir.imm32(mask);
        let inserted = self.ir.and(moved, take);
        let result = self.ir.or(kept, inserted);
        self.ir.set_register(d, result);
        true
    }
}
