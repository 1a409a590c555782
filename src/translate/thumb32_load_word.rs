//! Thumb-32 word loads.

use a32_asm::{Imm, Reg};

use crate::ir::{Terminal, U32};
use crate::translate::TranslatorVisitor;

fn load_word(v: &mut TranslatorVisitor<'_>, t: Reg, address: U32) -> bool {
    let data = v.ir.read_memory_32(address);
    if t == Reg::PC {
        v.ir.update_upper_location_descriptor();
        v.ir.load_write_pc(data);
        v.ir.set_terminal(Terminal::FastDispatchHint);
        return false;
    }
    v.ir.set_register(t, data);
    true
}

impl TranslatorVisitor<'_> {
    pub(crate) fn thumb32_ldr_lit(&mut self, u: bool, t: Reg, imm12: Imm<12>) -> bool {
        if t == Reg::PC && self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        let imm32 = imm12.zero_extend();
        let base = self.ir.align_pc(4);
        let address = if u {
            base.wrapping_add(imm32)
        } else {
            base.wrapping_sub(imm32)
        };
        let address = self.ir.imm32(address);
        load_word(self, t, address)
    }

    pub(crate) fn thumb32_ldr_reg(&mut self, n: Reg, t: Reg, imm2: Imm<2>, m: Reg) -> bool {
        if m == Reg::PC {
            return self.unpredictable_instruction();
        }
        if t == Reg::PC && self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let carry = self.ir.imm1(false);
        let amount = self.ir.imm8(imm2.zero_extend() as u8);
        let offset = self.ir.logical_shift_left(reg_m, amount, carry);
        let address = self.ir.add(reg_n, offset);
        load_word(self, t, address)
    }

    pub(crate) fn thumb32_ldr_imm8(&mut self, n: Reg, t: Reg, p: bool, u: bool, w: bool, imm8: Imm<8>) -> bool {
        if !p && !w {
            return self.undefined_instruction();
        }
        if w && n == t {
            return self.unpredictable_instruction();
        }
        if t == Reg::PC && self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        let imm32 = imm8.zero_extend();
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm32);
        let offset_address = if u {
            self.ir.add(reg_n, offset)
        } else {
            self.ir.sub(reg_n, offset)
        };
        let address = if p { offset_address } else { reg_n };
        if w {
            self.ir.set_register(n, offset_address);
        }
        load_word(self, t, address)
    }

    pub(crate) fn thumb32_ldr_imm12(&mut self, n: Reg, t: Reg, imm12: Imm<12>) -> bool {
        if t == Reg::PC && self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm12.zero_extend());
        let address = self.ir.add(reg_n, offset);
        load_word(self, t, address)
    }
}
