//! Thumb-32 load/store multiple.

use a32_asm::{Reg, RegList};

use crate::ir::{Terminal, U32};
use crate::translate::TranslatorVisitor;

fn ldm_helper(
    v: &mut TranslatorVisitor<'_>,
    writeback: bool,
    n: Reg,
    reg_list: RegList,
    start_address: U32,
    writeback_address: U32,
) -> bool {
    let mut address = start_address;
    for reg in reg_list.iter().filter(|reg| *reg != Reg::PC) {
        let data = v.ir.read_memory_32(address);
        v.ir.set_register(reg, data);
        let four = v.ir.imm32(4);
        address = v.ir.add(address, four);
    }
    if writeback && !reg_list.contains(n) {
        v.ir.set_register(n, writeback_address);
    }
    if reg_list.contains(Reg::PC) {
        v.ir.update_upper_location_descriptor();
        let data = v.ir.read_memory_32(address);
        v.ir.load_write_pc(data);
        if n == Reg::SP {
            v.ir.set_terminal(Terminal::PopRsbHint);
        } else {
            v.ir.set_terminal(Terminal::FastDispatchHint);
        }
        return false;
    }
    true
}

fn stm_helper(
    v: &mut TranslatorVisitor<'_>,
    writeback: bool,
    n: Reg,
    reg_list: RegList,
    start_address: U32,
    writeback_address: U32,
) -> bool {
    let mut address = start_address;
    for reg in reg_list.iter() {
        let data = v.ir.get_register(reg);
        v.ir.write_memory_32(address, data);
        let four = v.ir.imm32(4);
        address = v.ir.add(address, four);
    }
    if writeback {
        v.ir.set_register(n, writeback_address);
    }
    true
}

impl TranslatorVisitor<'_> {
    pub(crate) fn thumb32_ldmia(&mut self, w: bool, n: Reg, reg_list: RegList) -> bool {
        if n == Reg::PC || reg_list.count() < 2 {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(Reg::PC) && reg_list.contains(Reg::LR) {
            return self.unpredictable_instruction();
        }
        if w && reg_list.contains(n) {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(Reg::SP) {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(Reg::PC) && self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }

        let start_address = self.ir.get_register(n);
        let byte_count = self.ir.imm32(4 * reg_list.count());
        let writeback_address = self.ir.add(start_address, byte_count);
        ldm_helper(self, w, n, reg_list, start_address, writeback_address)
    }

    pub(crate) fn thumb32_ldmdb(&mut self, w: bool, n: Reg, reg_list: RegList) -> bool {
        if n == Reg::PC || reg_list.count() < 2 {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(Reg::PC) && reg_list.contains(Reg::LR) {
            return self.unpredictable_instruction();
        }
        if w && reg_list.contains(n) {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(Reg::SP) {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(Reg::PC) && self.is_mid_it_block() {
            return self.unpredictable_instruction();
        }

        // The start address doubles as the writeback address.
        let reg_n = self.ir.get_register(n);
        let byte_count = self.ir.imm32(4 * reg_list.count());
        let start_address = self.ir.sub(reg_n, byte_count);
        ldm_helper(self, w, n, reg_list, start_address, start_address)
    }

    pub(crate) fn thumb32_pop(&mut self, reg_list: RegList) -> bool {
        self.thumb32_ldmia(true, Reg::SP, reg_list)
    }

    pub(crate) fn thumb32_push(&mut self, reg_list: RegList) -> bool {
        self.thumb32_stmdb(true, Reg::SP, reg_list)
    }

    pub(crate) fn thumb32_stmia(&mut self, w: bool, n: Reg, reg_list: RegList) -> bool {
        if n == Reg::PC || reg_list.count() < 2 {
            return self.unpredictable_instruction();
        }
        if w && reg_list.contains(n) {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(Reg::SP) {
            return self.unpredictable_instruction();
        }

        let start_address = self.ir.get_register(n);
        let byte_count = self.ir.imm32(4 * reg_list.count());
        let writeback_address = self.ir.add(start_address, byte_count);
        stm_helper(self, w, n, reg_list, start_address, writeback_address)
    }

    pub(crate) fn thumb32_stmdb(&mut self, w: bool, n: Reg, reg_list: RegList) -> bool {
        if n == Reg::PC || reg_list.count() < 2 {
            return self.unpredictable_instruction();
        }
        if w && reg_list.contains(n) {
            return self.unpredictable_instruction();
        }
        if reg_list.contains(Reg::SP) {
            return self.unpredictable_instruction();
        }

        // The start address doubles as the writeback address.
        let reg_n = self.ir.get_register(n);
        let byte_count = self.ir.imm32(4 * reg_list.count());
        let start_address = self.ir.sub(reg_n, byte_count);
        stm_helper(self, w, n, reg_list, start_address, start_address)
    }
}
