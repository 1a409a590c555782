//! Thumb-32 multiply and multiply-accumulate.

use a32_asm::Reg;

use crate::translate::TranslatorVisitor;

impl TranslatorVisitor<'_> {
    pub(crate) fn thumb32_mul(&mut self, n: Reg, d: Reg, m: Reg) -> bool {
        if d == Reg::PC || n == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.mul(reg_n, reg_m);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_mla(&mut self, n: Reg, a: Reg, d: Reg, m: Reg) -> bool {
        if d == Reg::PC || n == Reg::PC || m == Reg::PC || a == Reg::PC {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let product = self.ir.mul(reg_n, reg_m);
        let reg_a = self.ir.get_register(a);
        let result = self.ir.add(product, reg_a);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb32_mls(&mut self, n: Reg, a: Reg, d: Reg, m: Reg) -> bool {
        if d == Reg::PC || n == Reg::PC || m == Reg::PC || a == Reg::PC {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let product = self.ir.mul(reg_n, reg_m);
        let reg_a = self.ir.get_register(a);
        let result = self.ir.sub(reg_a, product);
        self.ir.set_register(d, result);
        true
    }
}
