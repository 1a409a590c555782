//! Thumb-32 store single data item.

use a32_asm::{Imm, Reg};

use crate::ir::U32;
use crate::translate::TranslatorVisitor;

#[derive(Debug, Clone, Copy)]
enum StoreSize {
    Byte,
    Half,
    Word,
}

impl TranslatorVisitor<'_> {
    fn store(&mut self, size: StoreSize, address: U32, t: Reg) {
        let reg_t = self.ir.get_register(t);
        match size {
            StoreSize::Byte => {
                let data = self.ir.least_significant_byte(reg_t);
                self.ir.write_memory_8(address, data);
            }
            StoreSize::Half => {
                let data = self.ir.least_significant_half(reg_t);
                self.ir.write_memory_16(address, data);
            }
            StoreSize::Word => {
                self.ir.write_memory_32(address, reg_t);
            }
        }
    }

    fn store_immediate_8(
        &mut self,
        size: StoreSize,
        n: Reg,
        t: Reg,
        p: bool,
        u: bool,
        w: bool,
        imm8: Imm<8>,
    ) -> bool {
        if n == Reg::PC {
            return self.undefined_instruction();
        }
        if !p && !w {
            return self.undefined_instruction();
        }
        if t == Reg::PC {
            return self.unpredictable_instruction();
        }
        if w && n == t {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm8.zero_extend());
        let offset_address = if u {
            self.ir.add(reg_n, offset)
        } else {
            self.ir.sub(reg_n, offset)
        };
        let address = if p { offset_address } else { reg_n };
        self.store(size, address, t);
        if w {
            self.ir.set_register(n, offset_address);
        }
        true
    }

    fn store_immediate_12(&mut self, size: StoreSize, n: Reg, t: Reg, imm12: Imm<12>) -> bool {
        if n == Reg::PC {
            return self.undefined_instruction();
        }
        if t == Reg::PC {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm12.zero_extend());
        let address = self.ir.add(reg_n, offset);
        self.store(size, address, t);
        true
    }

    fn store_register(&mut self, size: StoreSize, n: Reg, t: Reg, imm2: Imm<2>, m: Reg) -> bool {
        if n == Reg::PC {
            return self.undefined_instruction();
        }
        if t == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let carry = self.ir.imm1(false);
        let amount = self.ir.imm8(imm2.zero_extend() as u8);
        let offset = self.ir.logical_shift_left(reg_m, amount, carry);
        let address = self.ir.add(reg_n, offset);
        self.store(size, address, t);
        true
    }

    pub(crate) fn thumb32_strb_imm_1(&mut self, n: Reg, t: Reg, p: bool, u: bool, w: bool, imm8: Imm<8>) -> bool {
        self.store_immediate_8(StoreSize::Byte, n, t, p, u, w, imm8)
    }

    pub(crate) fn thumb32_strb_imm_2(&mut self, n: Reg, t: Reg, imm12: Imm<12>) -> bool {
        self.store_immediate_12(StoreSize::Byte, n, t, imm12)
    }

    pub(crate) fn thumb32_strb_reg(&mut self, n: Reg, t: Reg, imm2: Imm<2>, m: Reg) -> bool {
        self.store_register(StoreSize::Byte, n, t, imm2, m)
    }

    pub(crate) fn thumb32_strh_imm_1(&mut self, n: Reg, t: Reg, p: bool, u: bool, w: bool, imm8: Imm<8>) -> bool {
        self.store_immediate_8(StoreSize::Half, n, t, p, u, w, imm8)
    }

    pub(crate) fn thumb32_strh_imm_2(&mut self, n: Reg, t: Reg, imm12: Imm<12>) -> bool {
        self.store_immediate_12(StoreSize::Half, n, t, imm12)
    }

    pub(crate) fn thumb32_strh_reg(&mut self, n: Reg, t: Reg, imm2: Imm<2>, m: Reg) -> bool {
        self.store_register(StoreSize::Half, n, t, imm2, m)
    }

    pub(crate) fn thumb32_str_imm_1(&mut self, n: Reg, t: Reg, p: bool, u: bool, w: bool, imm8: Imm<8>) -> bool {
        self.store_immediate_8(StoreSize::Word, n, t, p, u, w, imm8)
    }

    pub(crate) fn thumb32_str_imm_2(&mut self, n: Reg, t: Reg, imm12: Imm<12>) -> bool {
        self.store_immediate_12(StoreSize::Word, n, t, imm12)
    }

    pub(crate) fn thumb32_str_reg(&mut self, n: Reg, t: Reg, imm2: Imm<2>, m: Reg) -> bool {
        self.store_register(StoreSize::Word, n, t, imm2, m)
    }
}
