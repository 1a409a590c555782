use a32_asm::{LocationDescriptor, Reg};

use crate::exception::Exception;
use crate::ir::{Block, Nzcv, Opcode, Terminal, Value, U1, U16, U32, U64, U8};
use crate::options::ArchVersion;

/// A shift or rotate result together with its carry-out.
#[derive(Debug, Clone, Copy)]
pub struct ResultAndCarry {
    /// The shifted value.
    pub result: U32,
    /// The carry-out of the shift.
    pub carry: U1,
}

/// Typed constructors over a block's instruction arena.
///
/// The emitter is the only way handlers touch the block. It tracks the
/// location of the instruction currently being lifted so PC-relative values
/// fold to constants.
#[derive(Debug)]
pub struct IrEmitter<'a> {
    pub(crate) block: &'a mut Block,
    pub(crate) current_location: LocationDescriptor,
    arch_version: ArchVersion,
}

impl<'a> IrEmitter<'a> {
    pub(crate) fn new(
        block: &'a mut Block,
        location: LocationDescriptor,
        arch_version: ArchVersion,
    ) -> Self {
        IrEmitter {
            block,
            current_location: location,
            arch_version,
        }
    }

    fn push(&mut self, opcode: Opcode, args: Vec<Value>) -> Value {
        Value::Inst(self.block.push(opcode, args))
    }

    // --- Immediates ------------------------------------------------------

    pub fn imm1(&self, value: bool) -> U1 {
        U1(Value::ImmU1(value))
    }

    pub fn imm8(&self, value: u8) -> U8 {
        U8(Value::ImmU8(value))
    }

    pub fn imm16(&self, value: u16) -> U16 {
        U16(Value::ImmU16(value))
    }

    pub fn imm32(&self, value: u32) -> U32 {
        U32(Value::ImmU32(value))
    }

    pub fn imm64(&self, value: u64) -> U64 {
        U64(Value::ImmU64(value))
    }

    // --- Guest state -----------------------------------------------------

    /// The PC value an instruction at the current location observes.
    pub fn pc(&self) -> u32 {
        let offset = if self.current_location.t_flag() { 4 } else { 8 };
        self.current_location.pc().wrapping_add(offset)
    }

    /// The observed PC rounded down to `align` bytes.
    pub fn align_pc(&self, align: u32) -> u32 {
        self.pc() & !(align - 1)
    }

    pub fn get_register(&mut self, reg: Reg) -> U32 {
        if reg == Reg::PC {
            return self.imm32(self.pc());
        }
        U32(self.push(Opcode::GetRegister, vec![Value::Reg(reg)]))
    }

    pub fn set_register(&mut self, reg: Reg, value: U32) {
        assert!(reg != Reg::PC, "the PC is written through *WritePC");
        self.push(Opcode::SetRegister, vec![Value::Reg(reg), value.into()]);
    }

    pub fn get_c_flag(&mut self) -> U1 {
        U1(self.push(Opcode::GetCFlag, vec![]))
    }

    pub fn set_cpsr_nzcv(&mut self, nzcv: Nzcv) {
        self.push(Opcode::SetCpsrNZCV, vec![nzcv.into()]);
    }

    pub fn set_cpsr_nzc(&mut self, nz: Nzcv, carry: U1) {
        self.push(Opcode::SetCpsrNZC, vec![nz.into(), carry.into()]);
    }

    pub fn set_cpsr_nz(&mut self, nz: Nzcv) {
        self.push(Opcode::SetCpsrNZ, vec![nz.into()]);
    }

    pub fn set_c_flag(&mut self, carry: U1) {
        self.push(Opcode::SetCFlag, vec![carry.into()]);
    }

    pub fn nzcv_from(&mut self, op: U32) -> Nzcv {
        Nzcv(self.push(Opcode::GetNZCVFromOp, vec![op.into()]))
    }

    pub fn nz_from(&mut self, value: U32) -> Nzcv {
        Nzcv(self.push(Opcode::GetNZFromOp, vec![value.into()]))
    }

    pub fn get_carry_from_op(&mut self, op: U32) -> U1 {
        U1(self.push(Opcode::GetCarryFromOp, vec![op.into()]))
    }

    pub fn get_overflow_from_op(&mut self, op: U32) -> U1 {
        U1(self.push(Opcode::GetOverflowFromOp, vec![op.into()]))
    }

    // --- Arithmetic and logic --------------------------------------------

    pub fn add(&mut self, a: U32, b: U32) -> U32 {
        let carry = self.imm1(false);
        self.add_with_carry(a, b, carry)
    }

    pub fn add_with_carry(&mut self, a: U32, b: U32, carry: U1) -> U32 {
        U32(self.push(Opcode::Add, vec![a.into(), b.into(), carry.into()]))
    }

    pub fn sub(&mut self, a: U32, b: U32) -> U32 {
        let carry = self.imm1(true);
        self.sub_with_carry(a, b, carry)
    }

    pub fn sub_with_carry(&mut self, a: U32, b: U32, carry: U1) -> U32 {
        U32(self.push(Opcode::Sub, vec![a.into(), b.into(), carry.into()]))
    }

    pub fn mul(&mut self, a: U32, b: U32) -> U32 {
        U32(self.push(Opcode::Mul, vec![a.into(), b.into()]))
    }

    pub fn and(&mut self, a: U32, b: U32) -> U32 {
        U32(self.push(Opcode::And, vec![a.into(), b.into()]))
    }

    pub fn or(&mut self, a: U32, b: U32) -> U32 {
        U32(self.push(Opcode::Or, vec![a.into(), b.into()]))
    }

    pub fn eor(&mut self, a: U32, b: U32) -> U32 {
        U32(self.push(Opcode::Eor, vec![a.into(), b.into()]))
    }

    pub fn not(&mut self, a: U32) -> U32 {
        U32(self.push(Opcode::Not, vec![a.into()]))
    }

    // --- Shifts ----------------------------------------------------------

    pub fn logical_shift_left(&mut self, a: U32, shift: U8, carry_in: U1) -> U32 {
        U32(self.push(Opcode::LogicalShiftLeft, vec![a.into(), shift.into(), carry_in.into()]))
    }

    pub fn logical_shift_left_carry(&mut self, a: U32, shift: U8, carry_in: U1) -> ResultAndCarry {
        let result = self.logical_shift_left(a, shift, carry_in);
        let carry = self.get_carry_from_op(result);
        ResultAndCarry { result, carry }
    }

    pub fn logical_shift_right(&mut self, a: U32, shift: U8, carry_in: U1) -> U32 {
        U32(self.push(Opcode::LogicalShiftRight, vec![a.into(), shift.into(), carry_in.into()]))
    }

    pub fn logical_shift_right_carry(&mut self, a: U32, shift: U8, carry_in: U1) -> ResultAndCarry {
        let result = self.logical_shift_right(a, shift, carry_in);
        let carry = self.get_carry_from_op(result);
        ResultAndCarry { result, carry }
    }

    pub fn arithmetic_shift_right(&mut self, a: U32, shift: U8, carry_in: U1) -> U32 {
        U32(self.push(Opcode::ArithmeticShiftRight, vec![a.into(), shift.into(), carry_in.into()]))
    }

    pub fn arithmetic_shift_right_carry(&mut self, a: U32, shift: U8, carry_in: U1) -> ResultAndCarry {
        let result = self.arithmetic_shift_right(a, shift, carry_in);
        let carry = self.get_carry_from_op(result);
        ResultAndCarry { result, carry }
    }

    pub fn rotate_right(&mut self, a: U32, shift: U8, carry_in: U1) -> U32 {
        U32(self.push(Opcode::RotateRight, vec![a.into(), shift.into(), carry_in.into()]))
    }

    pub fn rotate_right_carry(&mut self, a: U32, shift: U8, carry_in: U1) -> ResultAndCarry {
        let result = self.rotate_right(a, shift, carry_in);
        let carry = self.get_carry_from_op(result);
        ResultAndCarry { result, carry }
    }

    pub fn rotate_right_extended(&mut self, a: U32, carry_in: U1) -> U32 {
        U32(self.push(Opcode::RotateRightExtended, vec![a.into(), carry_in.into()]))
    }

    pub fn rotate_right_extended_carry(&mut self, a: U32, carry_in: U1) -> ResultAndCarry {
        let result = self.rotate_right_extended(a, carry_in);
        let carry = self.get_carry_from_op(result);
        ResultAndCarry { result, carry }
    }

    // --- Extension and truncation ----------------------------------------

    pub fn sign_extend_byte_to_word(&mut self, a: U8) -> U32 {
        U32(self.push(Opcode::SignExtendByteToWord, vec![a.into()]))
    }

    pub fn sign_extend_half_to_word(&mut self, a: U16) -> U32 {
        U32(self.push(Opcode::SignExtendHalfToWord, vec![a.into()]))
    }

    pub fn zero_extend_byte_to_word(&mut self, a: U8) -> U32 {
        U32(self.push(Opcode::ZeroExtendByteToWord, vec![a.into()]))
    }

    pub fn zero_extend_half_to_word(&mut self, a: U16) -> U32 {
        U32(self.push(Opcode::ZeroExtendHalfToWord, vec![a.into()]))
    }

    pub fn least_significant_byte(&mut self, a: U32) -> U8 {
        U8(self.push(Opcode::LeastSignificantByte, vec![a.into()]))
    }

    pub fn least_significant_half(&mut self, a: U32) -> U16 {
        U16(self.push(Opcode::LeastSignificantHalf, vec![a.into()]))
    }

    // --- Miscellaneous values --------------------------------------------

    pub fn is_zero(&mut self, a: U32) -> U1 {
        U1(self.push(Opcode::IsZero, vec![a.into()]))
    }

    pub fn count_leading_zeros(&mut self, a: U32) -> U32 {
        U32(self.push(Opcode::CountLeadingZeros, vec![a.into()]))
    }

    pub fn reverse_bits(&mut self, a: U32) -> U32 {
        U32(self.push(Opcode::ReverseBits, vec![a.into()]))
    }

    pub fn byte_reverse_word(&mut self, a: U32) -> U32 {
        U32(self.push(Opcode::ByteReverseWord, vec![a.into()]))
    }

    pub fn byte_reverse_half(&mut self, a: U16) -> U16 {
        U16(self.push(Opcode::ByteReverseHalf, vec![a.into()]))
    }

    // --- Memory ----------------------------------------------------------

    pub fn read_memory_8(&mut self, address: U32) -> U8 {
        U8(self.push(Opcode::ReadMemory8, vec![address.into()]))
    }

    pub fn read_memory_16(&mut self, address: U32) -> U16 {
        U16(self.push(Opcode::ReadMemory16, vec![address.into()]))
    }

    pub fn read_memory_32(&mut self, address: U32) -> U32 {
        U32(self.push(Opcode::ReadMemory32, vec![address.into()]))
    }

    pub fn write_memory_8(&mut self, address: U32, value: U8) {
        self.push(Opcode::WriteMemory8, vec![address.into(), value.into()]);
    }

    pub fn write_memory_16(&mut self, address: U32, value: U16) {
        self.push(Opcode::WriteMemory16, vec![address.into(), value.into()]);
    }

    pub fn write_memory_32(&mut self, address: U32, value: U32) {
        self.push(Opcode::WriteMemory32, vec![address.into(), value.into()]);
    }

    // --- Control flow ----------------------------------------------------

    pub fn set_check_bit(&mut self, bit: U1) {
        self.push(Opcode::SetCheckBit, vec![bit.into()]);
    }

    pub fn branch_write_pc(&mut self, value: U32) {
        self.push(Opcode::BranchWritePC, vec![value.into()]);
    }

    pub fn bx_write_pc(&mut self, value: U32) {
        self.push(Opcode::BXWritePC, vec![value.into()]);
    }

    /// PC write for a value loaded from memory: interworking on v5 and
    /// later, a plain branch before that.
    pub fn load_write_pc(&mut self, value: U32) {
        if self.arch_version.load_write_pc_interworks() {
            self.bx_write_pc(value);
        } else {
            self.branch_write_pc(value);
        }
    }

    pub fn call_supervisor(&mut self, imm: U32) {
        self.push(Opcode::CallSupervisor, vec![imm.into()]);
    }

    pub fn push_rsb(&mut self, return_location: LocationDescriptor) {
        let key = self.imm64(return_location.unique_key());
        self.push(Opcode::PushRsb, vec![key.into()]);
    }

    pub fn update_upper_location_descriptor(&mut self) {
        let upper = self.imm32(self.current_location.upper_half());
        self.push(Opcode::UpdateUpperLocationDescriptor, vec![upper.into()]);
    }

    pub fn exception_raised(&mut self, exception: Exception) {
        let code = self.imm8(exception.code());
        self.push(Opcode::ExceptionRaised, vec![code.into()]);
    }

    pub fn set_terminal(&mut self, terminal: Terminal) {
        self.block.set_terminal(terminal);
    }
}
