//! Thumb-32 branch instructions.

use a32_asm::bit;
use a32_asm::{Cond, Imm, Reg};

use crate::ir::Terminal;
use crate::translate::TranslatorVisitor;

/// `imm32 = SignExtend(S:I1:I2:hi:lo:'0')` with `I1 = NOT(J1 EOR S)`,
/// `I2 = NOT(J2 EOR S)`.
fn branch_offset_t4(s: bool, hi: Imm<10>, j1: bool, j2: bool, lo: Imm<11>) -> i32 {
    let i1 = !(j1 ^ s);
    let i2 = !(j2 ^ s);
    let imm = u32::from(s) << 24
        | u32::from(i1) << 23
        | u32::from(i2) << 22
        | hi.zero_extend() << 12
        | lo.zero_extend() << 1;
    bit::sign_extend(imm, 25) as i32
}

impl TranslatorVisitor<'_> {
    pub(crate) fn thumb32_b_cond(
        &mut self,
        s: Imm<1>,
        cond: Cond,
        imm6: Imm<6>,
        j1: Imm<1>,
        j2: Imm<1>,
        imm11: Imm<11>,
    ) -> bool {
        if cond == Cond::AL || cond == Cond::NV {
            // Those condition fields encode the miscellaneous-control space.
            return self.undefined_instruction();
        }
        if self.ir.current_location.it().is_in_it_block() {
            return self.unpredictable_instruction();
        }
        if !self.condition_passed(cond) {
            return false;
        }
        let imm = s.zero_extend() << 20
            | j2.zero_extend() << 19
            | j1.zero_extend() << 18
            | imm6.zero_extend() << 12
            | imm11.zero_extend() << 1;
        let imm32 = bit::sign_extend(imm, 21) as i32 + 4;
        let target = self.ir.current_location.advance_pc(imm32).advance_it();
        self.ir.set_terminal(Terminal::LinkBlock(target));
        false
    }

    pub(crate) fn thumb32_b(
        &mut self,
        s: bool,
        imm10: Imm<10>,
        j1: bool,
        j2: bool,
        imm11: Imm<11>,
    ) -> bool {
        if self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        let imm32 = branch_offset_t4(s, imm10, j1, j2, imm11) + 4;
        let target = self.ir.current_location.advance_pc(imm32).advance_it();
        self.ir.set_terminal(Terminal::LinkBlock(target));
        false
    }

    pub(crate) fn thumb32_bl_imm(
        &mut self,
        s: bool,
        imm10: Imm<10>,
        j1: bool,
        j2: bool,
        imm11: Imm<11>,
    ) -> bool {
        if self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        self.ir.push_rsb(self.next_location());
        let lr = self.ir.imm32(self.ir.current_location.pc().wrapping_add(4) | 1);
        self.ir.set_register(Reg::LR, lr);
        let imm32 = branch_offset_t4(s, imm10, j1, j2, imm11) + 4;
        let target = self.ir.current_location.advance_pc(imm32).advance_it();
        self.ir.set_terminal(Terminal::LinkBlock(target));
        false
    }

    pub(crate) fn thumb32_blx_imm(
        &mut self,
        s: bool,
        imm10h: Imm<10>,
        j1: bool,
        j2: bool,
        imm10l: Imm<10>,
    ) -> bool {
        if self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        self.ir.push_rsb(self.next_location());
        let lr = self.ir.imm32(self.ir.current_location.pc().wrapping_add(4) | 1);
        self.ir.set_register(Reg::LR, lr);
        let s_bit = u32::from(s);
        let i1 = u32::from(!(j1 ^ s));
        let i2 = u32::from(!(j2 ^ s));
        let imm = s_bit << 24 | i1 << 23 | i2 << 22 | imm10h.zero_extend() << 12
            | imm10l.zero_extend() << 2;
        let imm32 = bit::sign_extend(imm, 25);
        let target_pc = (self.ir.align_pc(4)).wrapping_add(imm32);
        let target = self
            .ir
            .current_location
            .advance_it()
            .with_pc(target_pc)
            .with_t_flag(false);
        self.ir.set_terminal(Terminal::LinkBlock(target));
        false
    }
}
