//! Thumb-16 instruction handlers.

use a32_asm::{Cond, Imm, ItState, Reg, RegList};

use crate::exception::Exception;
use crate::ir::Terminal;
use crate::translate::TranslatorVisitor;

/// Thumb-16 ALU instructions only update the flags outside IT blocks.
fn sets_flags(v: &TranslatorVisitor<'_>) -> bool {
    !v.ir.current_location.it().is_in_it_block()
}

fn high_low_reg(hi: bool, lo: Reg) -> Reg {
    if hi {
        Reg::from_num(lo.num() + 8)
    } else {
        lo
    }
}

impl TranslatorVisitor<'_> {
    // --- Shift (immediate), add, subtract, move and compare ---------------

    pub(crate) fn thumb16_lsl_imm(&mut self, imm5: Imm<5>, m: Reg, d: Reg) -> bool {
        let reg_m = self.ir.get_register(m);
        let carry_in = self.ir.get_c_flag();
        let shift = self.ir.imm8(imm5.zero_extend() as u8);
        if sets_flags(self) {
            let shifted = self.ir.logical_shift_left_carry(reg_m, shift, carry_in);
            self.ir.set_register(d, shifted.result);
            let nz = self.ir.nz_from(shifted.result);
            self.ir.set_cpsr_nzc(nz, shifted.carry);
        } else {
            let result = self.ir.logical_shift_left(reg_m, shift, carry_in);
            self.ir.set_register(d, result);
        }
        true
    }

    pub(crate) fn thumb16_lsr_imm(&mut self, imm5: Imm<5>, m: Reg, d: Reg) -> bool {
        let amount = if imm5 == 0 { 32 } else { imm5.zero_extend() as u8 };
        let reg_m = self.ir.get_register(m);
        let carry_in = self.ir.get_c_flag();
        let shift = self.ir.imm8(amount);
        if sets_flags(self) {
            let shifted = self.ir.logical_shift_right_carry(reg_m, shift, carry_in);
            self.ir.set_register(d, shifted.result);
            let nz = self.ir.nz_from(shifted.result);
            self.ir.set_cpsr_nzc(nz, shifted.carry);
        } else {
            let result = self.ir.logical_shift_right(reg_m, shift, carry_in);
            self.ir.set_register(d, result);
        }
        true
    }

    pub(crate) fn thumb16_asr_imm(&mut self, imm5: Imm<5>, m: Reg, d: Reg) -> bool {
        let amount = if imm5 == 0 { 32 } else { imm5.zero_extend() as u8 };
        let reg_m = self.ir.get_register(m);
        let carry_in = self.ir.get_c_flag();
        let shift = self.ir.imm8(amount);
        if sets_flags(self) {
            let shifted = self.ir.arithmetic_shift_right_carry(reg_m, shift, carry_in);
            self.ir.set_register(d, shifted.result);
            let nz = self.ir.nz_from(shifted.result);
            self.ir.set_cpsr_nzc(nz, shifted.carry);
        } else {
            let result = self.ir.arithmetic_shift_right(reg_m, shift, carry_in);
            self.ir.set_register(d, result);
        }
        true
    }

    pub(crate) fn thumb16_add_reg_t1(&mut self, m: Reg, n: Reg, d: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.add(reg_n, reg_m);
        self.ir.set_register(d, result);
        if sets_flags(self) {
            let nzcv = self.ir.nzcv_from(result);
            self.ir.set_cpsr_nzcv(nzcv);
        }
        true
    }

    pub(crate) fn thumb16_sub_reg(&mut self, m: Reg, n: Reg, d: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.sub(reg_n, reg_m);
        self.ir.set_register(d, result);
        if sets_flags(self) {
            let nzcv = self.ir.nzcv_from(result);
            self.ir.set_cpsr_nzcv(nzcv);
        }
        true
    }

    pub(crate) fn thumb16_add_imm_t1(&mut self, imm3: Imm<3>, n: Reg, d: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let imm = self.ir.imm32(imm3.zero_extend());
        let result = self.ir.add(reg_n, imm);
        self.ir.set_register(d, result);
        if sets_flags(self) {
            let nzcv = self.ir.nzcv_from(result);
            self.ir.set_cpsr_nzcv(nzcv);
        }
        true
    }

    pub(crate) fn thumb16_sub_imm_t1(&mut self, imm3: Imm<3>, n: Reg, d: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let imm = self.ir.imm32(imm3.zero_extend());
        let result = self.ir.sub(reg_n, imm);
        self.ir.set_register(d, result);
        if sets_flags(self) {
            let nzcv = self.ir.nzcv_from(result);
            self.ir.set_cpsr_nzcv(nzcv);
        }
        true
    }

    pub(crate) fn thumb16_mov_imm(&mut self, d: Reg, imm8: Imm<8>) -> bool {
        let result = self.ir.imm32(imm8.zero_extend());
        self.ir.set_register(d, result);
        if sets_flags(self) {
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nz(nz);
        }
        true
    }

    pub(crate) fn thumb16_cmp_imm(&mut self, n: Reg, imm8: Imm<8>) -> bool {
        let reg_n = self.ir.get_register(n);
        let imm = self.ir.imm32(imm8.zero_extend());
        let result = self.ir.sub(reg_n, imm);
        let nzcv = self.ir.nzcv_from(result);
        self.ir.set_cpsr_nzcv(nzcv);
        true
    }

    pub(crate) fn thumb16_add_imm_t2(&mut self, d_n: Reg, imm8: Imm<8>) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let imm = self.ir.imm32(imm8.zero_extend());
        let result = self.ir.add(reg_n, imm);
        self.ir.set_register(d_n, result);
        if sets_flags(self) {
            let nzcv = self.ir.nzcv_from(result);
            self.ir.set_cpsr_nzcv(nzcv);
        }
        true
    }

    pub(crate) fn thumb16_sub_imm_t2(&mut self, d_n: Reg, imm8: Imm<8>) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let imm = self.ir.imm32(imm8.zero_extend());
        let result = self.ir.sub(reg_n, imm);
        self.ir.set_register(d_n, result);
        if sets_flags(self) {
            let nzcv = self.ir.nzcv_from(result);
            self.ir.set_cpsr_nzcv(nzcv);
        }
        true
    }

    // --- Data processing (registers) --------------------------------------

    pub(crate) fn thumb16_and_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.and(reg_n, reg_m);
        self.ir.set_register(d_n, result);
        if sets_flags(self) {
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nz(nz);
        }
        true
    }

    pub(crate) fn thumb16_eor_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.eor(reg_n, reg_m);
        self.ir.set_register(d_n, result);
        if sets_flags(self) {
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nz(nz);
        }
        true
    }

    pub(crate) fn thumb16_lsl_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let amount = self.ir.least_significant_byte(reg_m);
        let carry_in = self.ir.get_c_flag();
        if sets_flags(self) {
            let shifted = self.ir.logical_shift_left_carry(reg_n, amount, carry_in);
            self.ir.set_register(d_n, shifted.result);
            let nz = self.ir.nz_from(shifted.result);
            self.ir.set_cpsr_nzc(nz, shifted.carry);
        } else {
            let result = self.ir.logical_shift_left(reg_n, amount, carry_in);
            self.ir.set_register(d_n, result);
        }
        true
    }

    pub(crate) fn thumb16_lsr_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let amount = self.ir.least_significant_byte(reg_m);
        let carry_in = self.ir.get_c_flag();
        if sets_flags(self) {
            let shifted = self.ir.logical_shift_right_carry(reg_n, amount, carry_in);
            self.ir.set_register(d_n, shifted.result);
            let nz = self.ir.nz_from(shifted.result);
            self.ir.set_cpsr_nzc(nz, shifted.carry);
        } else {
            let result = self.ir.logical_shift_right(reg_n, amount, carry_in);
            self.ir.set_register(d_n, result);
        }
        true
    }

    pub(crate) fn thumb16_asr_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let amount = self.ir.least_significant_byte(reg_m);
        let carry_in = self.ir.get_c_flag();
        if sets_flags(self) {
            let shifted = self.ir.arithmetic_shift_right_carry(reg_n, amount, carry_in);
            self.ir.set_register(d_n, shifted.result);
            let nz = self.ir.nz_from(shifted.result);
            self.ir.set_cpsr_nzc(nz, shifted.carry);
        } else {
            let result = self.ir.arithmetic_shift_right(reg_n, amount, carry_in);
            self.ir.set_register(d_n, result);
        }
        true
    }

    pub(crate) fn thumb16_adc_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let carry = self.ir.get_c_flag();
        let result = self.ir.add_with_carry(reg_n, reg_m, carry);
        self.ir.set_register(d_n, result);
        if sets_flags(self) {
            let nzcv = self.ir.nzcv_from(result);
            self.ir.set_cpsr_nzcv(nzcv);
        }
        true
    }

    pub(crate) fn thumb16_sbc_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let carry = self.ir.get_c_flag();
        let result = self.ir.sub_with_carry(reg_n, reg_m, carry);
        self.ir.set_register(d_n, result);
        if sets_flags(self) {
            let nzcv = self.ir.nzcv_from(result);
            self.ir.set_cpsr_nzcv(nzcv);
        }
        true
    }

    pub(crate) fn thumb16_ror_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let amount = self.ir.least_significant_byte(reg_m);
        let carry_in = self.ir.get_c_flag();
        if sets_flags(self) {
            let shifted = self.ir.rotate_right_carry(reg_n, amount, carry_in);
            self.ir.set_register(d_n, shifted.result);
            let nz = self.ir.nz_from(shifted.result);
            self.ir.set_cpsr_nzc(nz, shifted.carry);
        } else {
            let result = self.ir.rotate_right(reg_n, amount, carry_in);
            self.ir.set_register(d_n, result);
        }
        true
    }

    pub(crate) fn thumb16_tst_reg(&mut self, m: Reg, n: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.and(reg_n, reg_m);
        let nz = self.ir.nz_from(result);
        self.ir.set_cpsr_nz(nz);
        true
    }

    pub(crate) fn thumb16_rsb_imm(&mut self, n: Reg, d: Reg) -> bool {
        let zero = self.ir.imm32(0);
        let reg_n = self.ir.get_register(n);
        let result = self.ir.sub(zero, reg_n);
        self.ir.set_register(d, result);
        if sets_flags(self) {
            let nzcv = self.ir.nzcv_from(result);
            self.ir.set_cpsr_nzcv(nzcv);
        }
        true
    }

    pub(crate) fn thumb16_cmp_reg_t1(&mut self, m: Reg, n: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.sub(reg_n, reg_m);
        let nzcv = self.ir.nzcv_from(result);
        self.ir.set_cpsr_nzcv(nzcv);
        true
    }

    pub(crate) fn thumb16_cmn_reg(&mut self, m: Reg, n: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.add(reg_n, reg_m);
        let nzcv = self.ir.nzcv_from(result);
        self.ir.set_cpsr_nzcv(nzcv);
        true
    }

    pub(crate) fn thumb16_orr_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.or(reg_n, reg_m);
        self.ir.set_register(d_n, result);
        if sets_flags(self) {
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nz(nz);
        }
        true
    }

    pub(crate) fn thumb16_mul_reg(&mut self, n: Reg, d_m: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(d_m);
        let result = self.ir.mul(reg_n, reg_m);
        self.ir.set_register(d_m, result);
        if sets_flags(self) {
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nz(nz);
        }
        true
    }

    pub(crate) fn thumb16_bic_reg(&mut self, m: Reg, d_n: Reg) -> bool {
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let inverted = self.ir.not(reg_m);
        let result = self.ir.and(reg_n, inverted);
        self.ir.set_register(d_n, result);
        if sets_flags(self) {
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nz(nz);
        }
        true
    }

    pub(crate) fn thumb16_mvn_reg(&mut self, m: Reg, d: Reg) -> bool {
        let reg_m = self.ir.get_register(m);
        let result = self.ir.not(reg_m);
        self.ir.set_register(d, result);
        if sets_flags(self) {
            let nz = self.ir.nz_from(result);
            self.ir.set_cpsr_nz(nz);
        }
        true
    }

    // --- Special data instructions and branch/exchange --------------------

    pub(crate) fn thumb16_add_reg_t2(&mut self, d_n_hi: bool, m: Reg, d_n_lo: Reg) -> bool {
        let d_n = high_low_reg(d_n_hi, d_n_lo);
        if d_n == Reg::PC && m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(d_n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.add(reg_n, reg_m);
        if d_n == Reg::PC {
            self.ir.update_upper_location_descriptor();
            self.ir.branch_write_pc(result);
            self.ir.set_terminal(Terminal::FastDispatchHint);
            return false;
        }
        self.ir.set_register(d_n, result);
        true
    }

    pub(crate) fn thumb16_cmp_reg_t2(&mut self, n_hi: bool, m: Reg, n_lo: Reg) -> bool {
        let n = high_low_reg(n_hi, n_lo);
        if n.num() < 8 && m.num() < 8 {
            return self.unpredictable_instruction();
        }
        if n == Reg::PC || m == Reg::PC {
            return self.unpredictable_instruction();
        }
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let result = self.ir.sub(reg_n, reg_m);
        let nzcv = self.ir.nzcv_from(result);
        self.ir.set_cpsr_nzcv(nzcv);
        true
    }

    pub(crate) fn thumb16_mov_reg(&mut self, d_hi: bool, m: Reg, d_lo: Reg) -> bool {
        let d = high_low_reg(d_hi, d_lo);
        let result = self.ir.get_register(m);
        if d == Reg::PC {
            self.ir.update_upper_location_descriptor();
            self.ir.branch_write_pc(result);
            self.ir.set_terminal(Terminal::FastDispatchHint);
            return false;
        }
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb16_bx(&mut self, m: Reg) -> bool {
        if self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        self.ir.update_upper_location_descriptor();
        let reg_m = self.ir.get_register(m);
        self.ir.bx_write_pc(reg_m);
        if m == Reg::LR {
            self.ir.set_terminal(Terminal::PopRsbHint);
        } else {
            self.ir.set_terminal(Terminal::FastDispatchHint);
        }
        false
    }

    pub(crate) fn thumb16_blx_reg(&mut self, m: Reg) -> bool {
        if m == Reg::PC {
            return self.unpredictable_instruction();
        }
        if self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        self.ir.push_rsb(self.next_location());
        self.ir.update_upper_location_descriptor();
        let reg_m = self.ir.get_register(m);
        self.ir.bx_write_pc(reg_m);
        let lr = self.ir.imm32(self.ir.current_location.pc().wrapping_add(2) | 1);
        self.ir.set_register(Reg::LR, lr);
        self.ir.set_terminal(Terminal::FastDispatchHint);
        false
    }

    // --- Load/store single data item --------------------------------------

    pub(crate) fn thumb16_ldr_literal(&mut self, t: Reg, imm8: Imm<8>) -> bool {
        let address = self.ir.align_pc(4).wrapping_add(imm8.zero_extend() * 4);
        let address = self.ir.imm32(address);
        let data = self.ir.read_memory_32(address);
        self.ir.set_register(t, data);
        true
    }

    pub(crate) fn thumb16_str_reg(&mut self, m: Reg, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let address = self.ir.add(reg_n, reg_m);
        let data = self.ir.get_register(t);
        self.ir.write_memory_32(address, data);
        true
    }

    pub(crate) fn thumb16_strh_reg(&mut self, m: Reg, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let address = self.ir.add(reg_n, reg_m);
        let reg_t = self.ir.get_register(t);
        let data = self.ir.least_significant_half(reg_t);
        self.ir.write_memory_16(address, data);
        true
    }

    pub(crate) fn thumb16_strb_reg(&mut self, m: Reg, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let address = self.ir.add(reg_n, reg_m);
        let reg_t = self.ir.get_register(t);
        let data = self.ir.least_significant_byte(reg_t);
        self.ir.write_memory_8(address, data);
        true
    }

    pub(crate) fn thumb16_ldrsb_reg(&mut self, m: Reg, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let address = self.ir.add(reg_n, reg_m);
        let byte = self.ir.read_memory_8(address);
        let data = self.ir.sign_extend_byte_to_word(byte);
        self.ir.set_register(t, data);
        true
    }

    pub(crate) fn thumb16_ldr_reg(&mut self, m: Reg, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let address = self.ir.add(reg_n, reg_m);
        let data = self.ir.read_memory_32(address);
        self.ir.set_register(t, data);
        true
    }

    pub(crate) fn thumb16_ldrh_reg(&mut self, m: Reg, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let address = self.ir.add(reg_n, reg_m);
        let half = self.ir.read_memory_16(address);
        let data = self.ir.zero_extend_half_to_word(half);
        self.ir.set_register(t, data);
        true
    }

    pub(crate) fn thumb16_ldrb_reg(&mut self, m: Reg, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let address = self.ir.add(reg_n, reg_m);
        let byte = self.ir.read_memory_8(address);
        let data = self.ir.zero_extend_byte_to_word(byte);
        self.ir.set_register(t, data);
        true
    }

    pub(crate) fn thumb16_ldrsh_reg(&mut self, m: Reg, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let reg_m = self.ir.get_register(m);
        let address = self.ir.add(reg_n, reg_m);
        let half = self.ir.read_memory_16(address);
        let data = self.ir.sign_extend_half_to_word(half);
        self.ir.set_register(t, data);
        true
    }

    pub(crate) fn thumb16_str_imm_t1(&mut self, imm5: Imm<5>, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm5.zero_extend() * 4);
        let address = self.ir.add(reg_n, offset);
        let data = self.ir.get_register(t);
        self.ir.write_memory_32(address, data);
        true
    }

    pub(crate) fn thumb16_ldr_imm_t1(&mut self, imm5: Imm<5>, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm5.zero_extend() * 4);
        let address = self.ir.add(reg_n, offset);
        let data = self.ir.read_memory_32(address);
        self.ir.set_register(t, data);
        true
    }

    pub(crate) fn thumb16_strb_imm(&mut self, imm5: Imm<5>, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm5.zero_extend());
        let address = self.ir.add(reg_n, offset);
        let reg_t = self.ir.get_register(t);
        let data = self.ir.least_significant_byte(reg_t);
        self.ir.write_memory_8(address, data);
        true
    }

    pub(crate) fn thumb16_ldrb_imm(&mut self, imm5: Imm<5>, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm5.zero_extend());
        let address = self.ir.add(reg_n, offset);
        let byte = self.ir.read_memory_8(address);
        let data = self.ir.zero_extend_byte_to_word(byte);
        self.ir.set_register(t, data);
        true
    }

    pub(crate) fn thumb16_strh_imm(&mut self, imm5: Imm<5>, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm5.zero_extend() * 2);
        let address = self.ir.add(reg_n, offset);
        let reg_t = self.ir.get_register(t);
        let data = self.ir.least_significant_half(reg_t);
        self.ir.write_memory_16(address, data);
        true
    }

    pub(crate) fn thumb16_ldrh_imm(&mut self, imm5: Imm<5>, n: Reg, t: Reg) -> bool {
        let reg_n = self.ir.get_register(n);
        let offset = self.ir.imm32(imm5.zero_extend() * 2);
        let address = self.ir.add(reg_n, offset);
        let half = self.ir.read_memory_16(address);
        let data = self.ir.zero_extend_half_to_word(half);
        self.ir.set_register(t, data);
        true
    }

    pub(crate) fn thumb16_str_imm_t2(&mut self, t: Reg, imm8: Imm<8>) -> bool {
        let sp = self.ir.get_register(Reg::SP);
        let offset = self.ir.imm32(imm8.zero_extend() * 4);
        let address = self.ir.add(sp, offset);
        let data = self.ir.get_register(t);
        self.ir.write_memory_32(address, data);
        true
    }

    pub(crate) fn thumb16_ldr_imm_t2(&mut self, t: Reg, imm8: Imm<8>) -> bool {
        let sp = self.ir.get_register(Reg::SP);
        let offset = self.ir.imm32(imm8.zero_extend() * 4);
        let address = self.ir.add(sp, offset);
        let data = self.ir.read_memory_32(address);
        self.ir.set_register(t, data);
        true
    }

    // --- Relative addressing and SP arithmetic ----------------------------

    pub(crate) fn thumb16_adr(&mut self, d: Reg, imm8: Imm<8>) -> bool {
        let result = self.ir.align_pc(4).wrapping_add(imm8.zero_extend() * 4);
        let result = self.ir.imm32(result);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb16_add_sp_t1(&mut self, d: Reg, imm8: Imm<8>) -> bool {
        let sp = self.ir.get_register(Reg::SP);
        let offset = self.ir.imm32(imm8.zero_extend() * 4);
        let result = self.ir.add(sp, offset);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb16_add_sp_t2(&mut self, imm7: Imm<7>) -> bool {
        let sp = self.ir.get_register(Reg::SP);
        let offset = self.ir.imm32(imm7.zero_extend() * 4);
        let result = self.ir.add(sp, offset);
        self.ir.set_register(Reg::SP, result);
        true
    }

    pub(crate) fn thumb16_sub_sp(&mut self, imm7: Imm<7>) -> bool {
        let sp = self.ir.get_register(Reg::SP);
        let offset = self.ir.imm32(imm7.zero_extend() * 4);
        let result = self.ir.sub(sp, offset);
        self.ir.set_register(Reg::SP, result);
        true
    }

    // --- Extension --------------------------------------------------------

    pub(crate) fn thumb16_sxth(&mut self, m: Reg, d: Reg) -> bool {
        let reg_m = self.ir.get_register(m);
        let half = self.ir.least_significant_half(reg_m);
        let result = self.ir.sign_extend_half_to_word(half);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb16_sxtb(&mut self, m: Reg, d: Reg) -> bool {
        let reg_m = self.ir.get_register(m);
        let byte = self.ir.least_significant_byte(reg_m);
        let result = self.ir.sign_extend_byte_to_word(byte);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb16_uxth(&mut self, m: Reg, d: Reg) -> bool {
        let reg_m = self.ir.get_register(m);
        let half = self.ir.least_significant_half(reg_m);
        let result = self.ir.zero_extend_half_to_word(half);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb16_uxtb(&mut self, m: Reg, d: Reg) -> bool {
        let reg_m = self.ir.get_register(m);
        let byte = self.ir.least_significant_byte(reg_m);
        let result = self.ir.zero_extend_byte_to_word(byte);
        self.ir.set_register(d, result);
        true
    }

    // --- Push/pop and load/store multiple ---------------------------------

    pub(crate) fn thumb16_push(&mut self, m: bool, reg_list: RegList) -> bool {
        let reg_list = RegList(reg_list.bits() | u16::from(m) << 14);
        if reg_list.count() < 1 {
            return self.unpredictable_instruction();
        }
        let sp = self.ir.get_register(Reg::SP);
        let byte_count = self.ir.imm32(4 * reg_list.count());
        let final_address = self.ir.sub(sp, byte_count);
        let mut address = final_address;
        for reg in reg_list.iter() {
            let data = self.ir.get_register(reg);
            self.ir.write_memory_32(address, data);
            let four = self.ir.imm32(4);
            address = self.ir.add(address, four);
        }
        self.ir.set_register(Reg::SP, final_address);
        true
    }

    pub(crate) fn thumb16_pop(&mut self, p: bool, reg_list: RegList) -> bool {
        let reg_list = RegList(reg_list.bits() | u16::from(p) << 15);
        if reg_list.count() < 1 {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(Reg::PC) && self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        let mut address = self.ir.get_register(Reg::SP);
        for reg in reg_list.iter().filter(|reg| *reg != Reg::PC) {
            let data = self.ir.read_memory_32(address);
            self.ir.set_register(reg, data);
            let four = self.ir.imm32(4);
            address = self.ir.add(address, four);
        }
        if reg_list.contains(Reg::PC) {
            self.ir.update_upper_location_descriptor();
            let data = self.ir.read_memory_32(address);
            self.ir.load_write_pc(data);
            let four = self.ir.imm32(4);
            address = self.ir.add(address, four);
            self.ir.set_register(Reg::SP, address);
            self.ir.set_terminal(Terminal::PopRsbHint);
            return false;
        }
        self.ir.set_register(Reg::SP, address);
        true
    }

    pub(crate) fn thumb16_stmia(&mut self, n: Reg, reg_list: RegList) -> bool {
        if reg_list.count() < 1 {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(n) && Some(n) != reg_list.lowest() {
            return self.unpredictable_instruction();
        }
        let mut address = self.ir.get_register(n);
        for reg in reg_list.iter() {
            let data = self.ir.get_register(reg);
            self.ir.write_memory_32(address, data);
            let four = self.ir.imm32(4);
            address = self.ir.add(address, four);
        }
        self.ir.set_register(n, address);
        true
    }

    pub(crate) fn thumb16_ldmia(&mut self, n: Reg, reg_list: RegList) -> bool {
        if reg_list.count() < 1 {
            return self.unpredictable_instruction();
        }
        let writeback = !reg_list.contains(n);
        let mut address = self.ir.get_register(n);
        for reg in reg_list.iter() {
            let data = self.ir.read_memory_32(address);
            self.ir.set_register(reg, data);
            let four = self.ir.imm32(4);
            address = self.ir.add(address, four);
        }
        if writeback {
            self.ir.set_register(n, address);
        }
        true
    }

    // --- Byte reversal ----------------------------------------------------

    pub(crate) fn thumb16_rev(&mut self, m: Reg, d: Reg) -> bool {
        let reg_m = self.ir.get_register(m);
        let result = self.ir.byte_reverse_word(reg_m);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb16_rev16(&mut self, m: Reg, d: Reg) -> bool {
        let reg_m = self.ir.get_register(m);
        let reversed = self.ir.byte_reverse_word(reg_m);
        let sixteen = self.ir.imm8(16);
        let carry = self.ir.imm1(false);
        let result = self.ir.rotate_right(reversed, sixteen, carry);
        self.ir.set_register(d, result);
        true
    }

    pub(crate) fn thumb16_revsh(&mut self, m: Reg, d: Reg) -> bool {
        let reg_m = self.ir.get_register(m);
        let half = self.ir.least_significant_half(reg_m);
        let reversed = self.ir.byte_reverse_half(half);
        let result = self.ir.sign_extend_half_to_word(reversed);
        self.ir.set_register(d, result);
        true
    }

    // --- Compare-and-branch, IT, hints and exceptions ---------------------

    pub(crate) fn thumb16_cbz_cbnz(&mut self, nonzero: bool, i: Imm<1>, imm5: Imm<5>, n: Reg) -> bool {
        if self.ir.current_location.it().is_in_it_block() {
            return self.unpredictable_instruction();
        }
        let imm = i.zero_extend() << 6 | imm5.zero_extend() << 1;
        let reg_n = self.ir.get_register(n);
        let zero = self.ir.is_zero(reg_n);
        self.ir.set_check_bit(zero);
        let taken = self
            .ir
            .current_location
            .advance_pc(imm as i32 + 4);
        let not_taken = self.next_location();
        let (then_, else_) = if nonzero {
            (not_taken, taken)
        } else {
            (taken, not_taken)
        };
        self.ir.set_terminal(Terminal::CheckBit {
            then_: Box::new(Terminal::LinkBlock(then_)),
            else_: Box::new(Terminal::LinkBlock(else_)),
        });
        false
    }

    pub(crate) fn thumb16_it(&mut self, firstcond: Cond, mask: Imm<4>) -> bool {
        if mask == 0 {
            // Unallocated hint space.
            return self.undefined_instruction();
        }
        if firstcond == Cond::NV {
            return self.unpredictable_instruction();
        }
        if firstcond == Cond::AL && mask.zero_extend().count_ones() != 1 {
            return self.unpredictable_instruction();
        }
        if self.ir.current_location.it().is_in_it_block() {
            return self.unpredictable_instruction();
        }
        let it = ItState::new((firstcond.bits() << 4 | mask.zero_extend()) as u8);
        let next = self
            .ir
            .current_location
            .advance_pc(2)
            .with_it(it);
        self.ir.set_terminal(Terminal::LinkBlock(next));
        false
    }

    pub(crate) fn thumb16_nop(&mut self) -> bool {
        true
    }

    pub(crate) fn thumb16_yield(&mut self) -> bool {
        if self.options.hook_hint_instructions {
            return self.raise_exception(Exception::Yield);
        }
        true
    }

    pub(crate) fn thumb16_wfe(&mut self) -> bool {
        if self.options.hook_hint_instructions {
            return self.raise_exception(Exception::WaitForEvent);
        }
        true
    }

    pub(crate) fn thumb16_wfi(&mut self) -> bool {
        if self.options.hook_hint_instructions {
            return self.raise_exception(Exception::WaitForInterrupt);
        }
        true
    }

    pub(crate) fn thumb16_sev(&mut self) -> bool {
        if self.options.hook_hint_instructions {
            return self.raise_exception(Exception::SendEvent);
        }
        true
    }

    pub(crate) fn thumb16_sevl(&mut self) -> bool {
        if self.options.hook_hint_instructions {
            return self.raise_exception(Exception::SendEventLocal);
        }
        true
    }

    pub(crate) fn thumb16_bkpt(&mut self, _imm8: Imm<8>) -> bool {
        self.raise_exception(Exception::Breakpoint)
    }

    pub(crate) fn thumb16_udf(&mut self) -> bool {
        self.undefined_instruction()
    }

    pub(crate) fn thumb16_svc(&mut self, imm8: Imm<8>) -> bool {
        self.ir.push_rsb(self.next_location());
        let return_pc = self.ir.imm32(self.ir.current_location.pc().wrapping_add(2));
        self.ir.branch_write_pc(return_pc);
        let imm = self.ir.imm32(imm8.zero_extend());
        self.ir.call_supervisor(imm);
        self.ir.set_terminal(Terminal::PopRsbHint);
        false
    }

    pub(crate) fn thumb16_b_t1(&mut self, cond: Cond, imm8: Imm<8>) -> bool {
        if self.ir.current_location.it().is_in_it_block() {
            return self.unpredictable_instruction();
        }
        if cond == Cond::AL {
            return self.thumb16_udf();
        }
        if !self.condition_passed(cond) {
            return false;
        }
        let imm32 = (imm8.sign_extend() << 1).wrapping_add(4) as i32;
        let target = self.ir.current_location.advance_pc(imm32).advance_it();
        self.ir.set_terminal(Terminal::LinkBlock(target));
        false
    }

    pub(crate) fn thumb16_b_t2(&mut self, imm11: Imm<11>) -> bool {
        if self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }
        let imm32 = (imm11.sign_extend() << 1).wrapping_add(4) as i32;
        let target = self.ir.current_location.advance_pc(imm32).advance_it();
        self.ir.set_terminal(Terminal::LinkBlock(target));
        false
    }
}
