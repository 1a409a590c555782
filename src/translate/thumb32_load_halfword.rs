//! Thumb-32 halfword loads.

use a32_asm::{Imm, Reg};

use crate::ir::{IrEmitter, U16, U32};
use crate::translate::TranslatorVisitor;

type ExtensionFn<'v> = fn(&mut IrEmitter<'v>, U16) -> U32;

fn load_half_literal<'v>(
    v: &mut TranslatorVisitor<'v>,
    u: bool,
    t: Reg,
    imm12: Imm<12>,
    ext: ExtensionFn<'v>,
) -> bool {
    if t == Reg::PC {
        // Rt == PC encodes memory hints here.
        return v.undefined_instruction();
    }
    let imm32 = imm12.zero_extend();
    let base = v.ir.align_pc(4);
    let address = if u {
        base.wrapping_add(imm32)
    } else {
        base.wrapping_sub(imm32)
    };
    let address = v.ir.imm32(address);
    let half = v.ir.read_memory_16(address);
    let data = ext(&mut v.ir, half);
    v.ir.set_register(t, data);
    true
}

fn load_half_register<'v>(
    v: &mut TranslatorVisitor<'v>,
    n: Reg,
    t: Reg,
    imm2: Imm<2>,
    m: Reg,
    ext: ExtensionFn<'v>,
) -> bool {
    if m == Reg::PC {
        return v.unpredictable_instruction();
    }
    if t == Reg::PC {
        return v.undefined_instruction();
    }
    let reg_m = v.ir.get_register(m);
    let reg_n = v.ir.get_register(n);
    let carry = v.ir.imm1(false);
    let amount = v.ir.imm8(imm2.zero_extend() as u8);
    let offset = v.ir.logical_shift_left(reg_m, amount, carry);
    let address = v.ir.add(reg_n, offset);
    let half = v.ir.read_memory_16(address);
    let data = ext(&mut v.ir, half);
    v.ir.set_register(t, data);
    true
}

fn load_half_immediate<'v>(
    v: &mut TranslatorVisitor<'v>,
    n: Reg,
    t: Reg,
    p: bool,
    u: bool,
    w: bool,
    imm12: Imm<12>,
    ext: ExtensionFn<'v>,
) -> bool {
    let imm32 = imm12.zero_extend();
    let reg_n = v.ir.get_register(n);
    let offset = v.ir.imm32(imm32);
    let offset_address = if u {
        v.ir.add(reg_n, offset)
    } else {
        v.ir.sub(reg_n, offset)
    };
    let address = if p { offset_address } else { reg_n };
    let half = v.ir.read_memory_16(address);
    let data = ext(&mut v.ir, half);

    if w {
        v.ir.set_register(n, offset_address);
    }
    v.ir.set_register(t, data);
    true
}

impl TranslatorVisitor<'_> {
    pub(crate) fn thumb32_ldrh_lit(&mut self, u: bool, t: Reg, imm12: Imm<12>) -> bool {
        load_half_literal(self, u, t, imm12, IrEmitter::zero_extend_half_to_word)
    }

    pub(crate) fn thumb32_ldrh_reg(&mut self, n: Reg, t: Reg, imm2: Imm<2>, m: Reg) -> bool {
        load_half_register(self, n, t, imm2, m, IrEmitter::zero_extend_half_to_word)
    }

    pub(crate) fn thumb32_ldrh_imm8(&mut self, n: Reg, t: Reg, p: bool, u: bool, w: bool, imm8: Imm<8>) -> bool {
        if !p && !w {
            return self.undefined_instruction();
        }
        if t == Reg::PC {
            return self.undefined_instruction();
        }
        if w && n == t {
            return self.unpredictable_instruction();
        }
        let imm12 = Imm::new(imm8.zero_extend());
        load_half_immediate(self, n, t, p, u, w, imm12, IrEmitter::zero_extend_half_to_word)
    }

    pub(crate) fn thumb32_ldrh_imm12(&mut self, n: Reg, t: Reg, imm12: Imm<12>) -> bool {
        if t == Reg::PC {
            return self.undefined_instruction();
        }
        load_half_immediate(self, n, t, true, true, false, imm12, IrEmitter::zero_extend_half_to_word)
    }

    pub(crate) fn thumb32_ldrsh_lit(&mut self, u: bool, t: Reg, imm12: Imm<12>) -> bool {
        load_half_literal(self, u, t, imm12, IrEmitter::sign_extend_half_to_word)
    }

    pub(crate) fn thumb32_ldrsh_reg(&mut self, n: Reg, t: Reg, imm2: Imm<2>, m: Reg) -> bool {
        load_half_register(self, n, t, imm2, m, IrEmitter::sign_extend_half_to_word)
    }

    pub(crate) fn thumb32_ldrsh_imm8(&mut self, n: Reg, t: Reg, p: bool, u: bool, w: bool, imm8: Imm<8>) -> bool {
        if !p && !w {
            return self.undefined_instruction();
        }
        if t == Reg::PC {
            return self.undefined_instruction();
        }
        if w && n == t {
            return self.unpredictable_instruction();
        }
        let imm12 = Imm::new(imm8.zero_extend());
        load_half_immediate(self, n, t, p, u, w, imm12, IrEmitter::sign_extend_half_to_word)
    }

    pub(crate) fn thumb32_ldrsh_imm12(&mut self, n: Reg, t: Reg, imm12: Imm<12>) -> bool {
        if t == Reg::PC {
            return self.undefined_instruction();
        }
        load_half_immediate(self, n, t, true, true, false, imm12, IrEmitter::sign_extend_half_to_word)
    }
}
