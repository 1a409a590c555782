//! Thumb-32 byte loads.

use a32_asm::{Imm, Reg};

use crate::ir::{IrEmitter, U32, U8};
use crate::translate::TranslatorVisitor;

type ExtensionFn<'v> = fn(&mut IrEmitter<'v>, U8) -> U32;

fn load_byte_literal<'v>(
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
    let byte = v.ir.read_memory_8(address);
    let data = ext(&mut v.ir, byte);
    v.ir.set_register(t, data);
    true
}

fn load_byte_register<'v>(
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
    let byte = v.ir.read_memory_8(address);
    let data = ext(&mut v.ir, byte);
    v.ir.set_register(t, data);
    true
}

fn load_byte_immediate<'v>(
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
    let byte = v.ir.read_memory_8(address);
    let data = ext(&mut v.ir, byte);

    if w {
        v.ir.set_register(n, offset_address);
    }
    v.ir.set_register(t, data);
    true
}

impl TranslatorVisitor<'_> {
    pub(crate) fn thumb32_ldrb_lit(&mut self, u: bool, t: Reg, imm12: Imm<12>) -> bool {
        load_byte_literal(self, u, t, imm12, IrEmitter::zero_extend_byte_to_word)
    }

    pub(crate) fn thumb32_ldrb_reg(&mut self, n: Reg, t: Reg, imm2: Imm<2>, m: Reg) -> bool {
        load_byte_register(self, n, t, imm2, m, IrEmitter::zero_extend_byte_to_word)
    }

    pub(crate) fn thumb32_ldrb_imm8(&mut self, n: Reg, t: Reg, p: bool, u: bool, w: bool, imm8: Imm<8>) -> bool {
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
        load_byte_immediate(self, n, t, p, u, w, imm12, IrEmitter::zero_extend_byte_to_word)
    }

    pub(crate) fn thumb32_ldrb_imm12(&mut self, n: Reg, t: Reg, imm12: Imm<12>) -> bool {
        if t == Reg::PC {
            return self.undefined_instruction();
        }
        load_byte_immediate(self, n, t, true, true, false, imm12, IrEmitter::zero_extend_byte_to_word)
    }

    pub(crate) fn thumb32_ldrsb_lit(&mut self, u: bool, t: Reg, imm12: Imm<12>) -> bool {
        load_byte_literal(self, u, t, imm12, IrEmitter::sign_extend_byte_to_word)
    }

    pub(crate) fn thumb32_ldrsb_reg(&mut self, n: Reg, t: Reg, imm2: Imm<2>, m: Reg) -> bool {
        load_byte_register(self, n, t, imm2, m, IrEmitter::sign_extend_byte_to_word)
    }

    pub(crate) fn thumb32_ldrsb_imm8(&mut self, n: Reg, t: Reg, p: bool, u: bool, w: bool, imm8: Imm<8>) -> bool {
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
        load_byte_immediate(self, n, t, p, u, w, imm12, IrEmitter::sign_extend_byte_to_word)
    }

    pub(crate) fn thumb32_ldrsb_imm12(&mut self, n: Reg, t: Reg, imm12: Imm<12>) -> bool {
        if t == Reg::PC {
            return self.undefined_instruction();
        }
        load_byte_immediate(self, n, t, true, true, false, imm12, IrEmitter::sign_extend_byte_to_word)
    }
}
