//! Thumb-32 data processing (modified immediate).

use a32_asm::{Imm, Reg};

use crate::ir::{IrEmitter, U32};
use crate::translate::TranslatorVisitor;

type ImmFields = (Imm<1>, Imm<3>, Imm<8>);

fn logical_imm<'v>(
    v: &mut TranslatorVisitor<'v>,
    s: bool,
    n: Reg,
    d: Reg,
    (i, imm3, imm8): ImmFields,
    op: fn(&mut IrEmitter<'v>, U32, u32) -> U32,
) -> bool {
    if d == Reg::PC || n == Reg::PC {
        return v.unpredictable_instruction();
    }
    if s {
        let (imm32, carry) = v.thumb_expand_imm_c(i, imm3, imm8);
        let reg_n = v.ir.get_register(n);
        let result = op(&mut v.ir, reg_n, imm32);
        v.ir.set_register(d, result);
        let nz = v.ir.nz_from(result);
        v.ir.set_cpsr_nzc(nz, carry);
    } else {
        let imm32 = TranslatorVisitor::thumb_expand_imm(i, imm3, imm8);
        let reg_n = v.ir.get_register(n);
        let result = op(&mut v.ir, reg_n, imm32);
        v.ir.set_register(d, result);
    }
    true
}

fn arithmetic_imm<'v>(
    v: &mut TranslatorVisitor<'v>,
    s: bool,
    n: Reg,
    d: Reg,
    (i, imm3, imm8): ImmFields,
    op: fn(&mut IrEmitter<'v>, U32, U32) -> U32,
) -> bool {
    if d == Reg::PC || n == Reg::PC {
        return v.unpredictable_instruction();
    }
    let imm32 = TranslatorVisitor::thumb_expand_imm(i, imm3, imm8);
    let imm = v.ir.imm32(imm32);
    let reg_n = v.ir.get_register(n);
    let result = op(&mut v.ir, reg_n, imm);
    v.ir.set_register(d, result);
    if s {
        let nzcv = v.ir.nzcv_from(result);
        v.ir.set_cpsr_nzcv(nzcv);
    }
    true
}

impl TranslatorVisitor<'_> {
    pub(crate) fn thumb32_tst_imm(&mut self, i: Imm<1>, n: Reg, imm3: Imm<3>, imm8: Imm<8>) -> bool {
        if n == Reg::PC {
            return self.unpredictable_instruction();
        }
        let (imm32, carry) = self.thumb_expand_imm_c(i, imm3, imm8);
        let imm = self.ir.imm32(imm32);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.and(reg_n, imm);
        let nz = self.ir.nz_from(result);
        self.ir.set_cpsr_nzc(nz, carry);
        true
    }

    pub(crate) fn thumb32_and_imm(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC && s {
            return self.thumb32_tst_imm(i, n, imm3, imm8);
        }
        logical_imm(self, s, n, d, (i, imm3, imm8), |ir, a, imm| {
            let imm = ir.imm32(imm);
            ir.and(a, imm)
        })
    }

    pub(crate) fn thumb32_bic_imm(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        logical_imm(self, s, n, d, (i, imm3, imm8), |ir, a, imm| {
            let imm = ir.imm32(!imm);
            ir.and(a, imm)
        })
    }

    pub(crate) fn thumb32_orr_imm(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        logical_imm(self, s, n, d, (i, imm3, imm8), |ir, a, imm| {
            let imm = ir.imm32(imm);
            ir.or(a, imm)
        })
    }

    pub(crate) fn thumb32_orn_imm(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        logical_imm(self, s, n, d, (i, imm3, imm8), |ir, a, imm| {
            let imm = ir.imm32(!imm);
            ir.or(a, imm)
        })
    }

    pub(crate) fn thumb32_eor_imm(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC && s {
            return self.thumb32_teq_imm(i, n, imm3, imm8);
        }
        logical_imm(self, s, n, d, (i, imm3, imm8), |ir, a, imm| {
            let imm = ir.imm32(imm);
            ir.eor(a, imm)
        })
    }

    pub(crate) fn thumb32_teq_imm(&mut self, i: Imm<1>, n: Reg, imm3: Imm<3>, imm8: Imm<8>) -> bool {
        if n == Reg::PC {
            return self.unpredictable_instruction();
        }
        let (imm32, carry) = self.thumb_expand_imm_c(i, imm3, imm8);
        let imm = self.ir.imm32(imm32);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.eor(reg_n, imm);
        let nz = self.ir.nz_from(result);
        self.ir.set_cpsr_nzc(nz, carry);
        true
    }

    pub(crate) fn thumb32_mov_imm(&mut self, i: Imm<1>, s: bool, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC {
            return self.unpredictable_instruction();
        }
        if s {
            let (imm32, carry) = self.thumb_expand_imm_c(i, imm3, imm8);
            let result = self.ir.imm32(imm32);
            self.ir.set_register(d, result);
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nzc(nz, carry);
        } else {
            let imm32 = Self::thumb_expand_imm(i, imm3, imm8);
            let result = self.ir.imm32(imm32);
            self.ir.set_register(d, result);
        }
        true
    }

    pub(crate) fn thumb32_mvn_imm(&mut self, i: Imm<1>, s: bool, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC {
            return self.unpredictable_instruction();
        }
        if s {
            let (imm32, carry) = self.thumb_expand_imm_c(i, imm3, imm8);
            let result = self.ir.imm32(!imm32);
            self.ir.set_register(d, result);
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nzc(nz, carry);
        } else {
            let imm32 = Self::thumb_expand_imm(i, imm3, imm8);
            let result = self.ir.imm32(!imm32);
            self.ir.set_register(d, result);
        }
        true
    }

    pub(crate) fn thumb32_cmn_imm(&mut self, i: Imm<1>, n: Reg, imm3: Imm<3>, imm8: Imm<8>) -> bool {
        if n == Reg::PC {
            return self.unpredictable_instruction();
        }
        let imm32 = Self::thumb_expand_imm(i, imm3, imm8);
        let imm = self.ir.imm32(imm32);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.add(reg_n, imm);
        let nzcv = self.ir.nzcv_from(result);
        self.ir.set_cpsr_nzcv(nzcv);
        true
    }

    pub(crate) fn thumb32_cmp_imm(&mut self, i: Imm<1>, n: Reg, imm3: Imm<3>, imm8: Imm<8>) -> bool {
        if n == Reg::PC {
            return self.unpredictable_instruction();
        }
        let imm32 = Self::thumb_expand_imm(i, imm3, imm8);
        let imm = self.ir.imm32(imm32);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.sub(reg_n, imm);
        let nzcv = self.ir.nzcv_from(result);
        self.ir.set_cpsr_nzcv(nzcv);
        true
    }

    pub(crate) fn thumb32_add_imm_1(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC && s {
            return self.thumb32_cmn_imm(i, n, imm3, imm8);
        }
        arithmetic_imm(self, s, n, d, (i, imm3, imm8), IrEmitter::add)
    }

    pub(crate) fn thumb32_adc_imm(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        arithmetic_imm(self, s, n, d, (i, imm3, imm8), |ir, a, b| {
            let carry = ir.get_c_flag();
            ir.add_with_carry(a, b, carry)
        })
    }

    pub(crate) fn thumb32_sbc_imm(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        arithmetic_imm(self, s, n, d, (i, imm3, imm8), |ir, a, b| {
            let carry = ir.get_c_flag();
            ir.sub_with_carry(a, b, carry)
        })
    }

    pub(crate) fn thumb32_sub_imm_1(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        if d == Reg::PC && s {
            return self.thumb32_cmp_imm(i, n, imm3, imm8);
        }
        arithmetic_imm(self, s, n, d, (i, imm3, imm8), IrEmitter::sub)
    }

    pub(crate) fn thumb32_rsb_imm(&mut self, i: Imm<1>, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm8: Imm<8>) -> bool {
        arithmetic_imm(self, s, n, d, (i, imm3, imm8), |ir, a, b| ir.sub(b, a))
    }
}
