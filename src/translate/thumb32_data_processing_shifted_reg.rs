//! Thumb-32 data processing (shifted register).

use a32_asm::{Imm, Reg};

use crate::ir::{IrEmitter, U32};
use crate::translate::TranslatorVisitor;

type ShiftFields = (Imm<3>, Imm<2>, Imm<2>);

fn logical_op<'v>(
    v: &mut TranslatorVisitor<'v>,
    s: bool,
    n: Reg,
    d: Reg,
    (imm3, imm2, t): ShiftFields,
    m: Reg,
    op: fn(&mut IrEmitter<'v>, U32, U32) -> U32,
) -> bool {
    if d == Reg::PC || n == Reg::PC || m == Reg::PC {
        return v.unpredictable_instruction();
    }
    if s {
        let shifted = v.decode_shifted_reg_carry(m, imm3, imm2, t);
        let reg_n = v.ir.get_register(n);
        let result = op(&mut v.ir, reg_n, shifted.result);
        v.ir.set_register(d, result);
        let nz = v.ir.nz_from(result);
        v.ir.set_cpsr_nzc(nz, shifted.carry);
    } else {
        let shifted = v.decode_shifted_reg(m, imm3, imm2, t);
        let reg_n = v.ir.get_register(n);
        let result = op(&mut v.ir, reg_n, shifted);
        v.ir.set_register(d, result);
    }
    true
}

fn arithmetic_op<'v>(
    v: &mut TranslatorVisitor<'v>,
    s: bool,
    n: Reg,
    d: Reg,
    (imm3, imm2, t): ShiftFields,
    m: Reg,
    op: fn(&mut IrEmitter<'v>, U32, U32) -> U32,
) -> bool {
    if d == Reg::PC || n == Reg::PC || m == Reg::PC {
        return v.unpredictable_instruction();
    }
    let shifted = v.decode_shifted_reg(m, imm3, imm2, t);
    let reg_n = v.ir.get_register(n);
    let result = op(&mut v.ir, reg_n, shifted);
    v.ir.set_register(d, result);
    if s {
        let nzcv = v.ir.nzcv_from(result);
        v.ir.set_cpsr_nzcv(nzcv);
    }
    true
}

fn shift_move(
    v: &mut TranslatorVisitor<'_>,
    s: bool,
    d: Reg,
    (imm3, imm2, t): ShiftFields,
    m: Reg,
) -> bool {
    if d == Reg::PC || m == Reg::PC {
        return v.unpredictable_instruction();
    }
    if s {
        let shifted = v.decode_shifted_reg_carry(m, imm3, imm2, t);
        v.ir.set_register(d, shifted.result);
        let nz = v.ir.nz_from(shifted.result);
        v.ir.set_cpsr_nzc(nz, shifted.carry);
    } else {
        let result = v.decode_shifted_reg(m, imm3, imm2, t);
        v.ir.set_register(d, result);
    }
    true
}

impl TranslatorVisitor<'_> {
    pub(crate) fn thumb32_tst_reg(&mut self, n: Reg, imm3: Imm<3>, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        if n == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let shifted = self.decode_shifted_reg_carry(m, imm3, imm2, t);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.and(reg_n, shifted.result);
        let nz = self.ir.nz_from(result);
        self.ir.set_cpsr_nzc(nz, shifted.carry);
        true
    }

    pub(crate) fn thumb32_and_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        if d == Reg::PC && s {
            return self.thumb32_tst_reg(n, imm3, imm2, t, m);
        }
        logical_op(self, s, n, d, (imm3, imm2, t), m, IrEmitter::and)
    }

    pub(crate) fn thumb32_bic_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        logical_op(self, s, n, d, (imm3, imm2, t), m, |ir, a, b| {
            let inverted = ir.not(b);
            ir.and(a, inverted)
        })
    }

    pub(crate) fn thumb32_orr_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        logical_op(self, s, n, d, (imm3, imm2, t), m, IrEmitter::or)
    }

    pub(crate) fn thumb32_orn_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        logical_op(self, s, n, d, (imm3, imm2, t), m, |ir, a, b| {
            let inverted = ir.not(b);
            ir.or(a, inverted)
        })
    }

    pub(crate) fn thumb32_eor_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        if d == Reg::PC && s {
            return self.thumb32_teq_reg(n, imm3, imm2, t, m);
        }
        logical_op(self, s, n, d, (imm3, imm2, t), m, IrEmitter::eor)
    }

    pub(crate) fn thumb32_teq_reg(&mut self, n: Reg, imm3: Imm<3>, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        if n == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let shifted = self.decode_shifted_reg_carry(m, imm3, imm2, t);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.eor(reg_n, shifted.result);
        let nz = self.ir.nz_from(result);
        self.ir.set_cpsr_nzc(nz, shifted.carry);
        true
    }

    pub(crate) fn thumb32_mvn_reg(&mut self, s: bool, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        if d == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        if s {
            let shifted = self.decode_shifted_reg_carry(m, imm3, imm2, t);
            let result = self.ir.not(shifted.result);
            self.ir.set_register(d, result);
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nzc(nz, shifted.carry);
        } else {
            let shifted = self.decode_shifted_reg(m, imm3, imm2, t);
            let result = self.ir.not(shifted);
            self.ir.set_register(d, result);
        }
        true
    }

    pub(crate) fn thumb32_lsl_imm(&mut self, s: bool, imm3: Imm<3>, d: Reg, imm2: Imm<2>, m: Reg) -> bool {
        shift_move(self, s, d, (imm3, imm2, Imm::new(0b00)), m)
    }

    pub(crate) fn thumb32_lsr_imm(&mut self, s: bool, imm3: Imm<3>, d: Reg, imm2: Imm<2>, m: Reg) -> bool {
        shift_move(self, s, d, (imm3, imm2, Imm::new(0b01)), m)
    }

    pub(crate) fn thumb32_asr_imm(&mut self, s: bool, imm3: Imm<3>, d: Reg, imm2: Imm<2>, m: Reg) -> bool {
        shift_move(self, s, d, (imm3, imm2, Imm::new(0b10)), m)
    }

    pub(crate) fn thumb32_rrx(&mut self, s: bool, d: Reg, m: Reg) -> bool {
        shift_move(self, s, d, (Imm::new(0), Imm::new(0), Imm::new(0b11)), m)
    }

    pub(crate) fn thumb32_ror_imm(&mut self, s: bool, imm3: Imm<3>, d: Reg, imm2: Imm<2>, m: Reg) -> bool {
        shift_move(self, s, d, (imm3, imm2, Imm::new(0b11)), m)
    }

    pub(crate) fn thumb32_cmn_reg(&mut self, n: Reg, imm3: Imm<3>, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        if n == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let shifted = self.decode_shifted_reg(m, imm3, imm2, t);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.add(reg_n, shifted);
        let nzcv = self.ir.nzcv_from(result);
        self.ir.set_cpsr_nzcv(nzcv);
        true
    }

    pub(crate) fn thumb32_cmp_reg(&mut self, n: Reg, imm3: Imm<3>, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        if n == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let shifted = self.decode_shifted_reg(m, imm3, imm2, t);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.sub(reg_n, shifted);
        let nzcv = self.ir.nzcv_from(result);
        self.ir.set_cpsr_nzcv(nzcv);
        true
    }

    pub(crate) fn thumb32_add_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        if d == Reg::PC && s {
            return self.thumb32_cmn_reg(n, imm3, imm2, t, m);
        }
        arithmetic_op(self, s, n, d, (imm3, imm2, t), m, IrEmitter::add)
    }

    pub(crate) fn thumb32_adc_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        arithmetic_op(self, s, n, d, (imm3, imm2, t), m, |ir, a, b| {
            let carry = ir.get_c_flag();
            ir.add_with_carry(a, b, carry)
        })
    }

    pub(crate) fn thumb32_sbc_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        arithmetic_op(self, s, n, d, (imm3, imm2, t), m, |ir, a, b| {
            let carry = ir.get_c_flag();
            ir.sub_with_carry(a, b, carry)
        })
    }

    pub(crate) fn thumb32_sub_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        if d == Reg::PC && s {
            return self.thumb32_cmp_reg(n, imm3, imm2, t, m);
        }
        arithmetic_op(self, s, n, d, (imm3, imm2, t), m, IrEmitter::sub)
    }

    pub(crate) fn thumb32_rsb_reg(&mut self, s: bool, n: Reg, imm3: Imm<3>, d: Reg, imm2: Imm<2>, t: Imm<2>, m: Reg) -> bool {
        arithmetic_op(self, s, n, d, (imm3, imm2, t), m, |ir, a, b| ir.sub(b, a))
    }
}
