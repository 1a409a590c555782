use crate::ir::Type;

macro_rules! opcodes {
    ($( $(#[$doc:meta])* $name:ident ( $($arg:ident),* ) -> $result:ident; )*) => {
        /// An IR operation.
        ///
        /// Every opcode declares its result type and operand types; the block
        /// arena re-checks them on append, so a type mismatch is a translator
        /// bug caught at construction, never a malformed block.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Opcode {
            $( $(#[$doc])* $name, )*
        }

        impl Opcode {
            /// The type of the value this operation produces.
            pub const fn result_type(self) -> Type {
                match self {
                    $( Opcode::$name => Type::$result, )*
                }
            }

            /// The declared operand types, in order.
            pub fn arg_types(self) -> &'static [Type] {
                match self {
                    $( Opcode::$name => &[ $(Type::$arg),* ], )*
                }
            }
        }
    };
}

opcodes! {
    /// Read a guest register. PC reads never reach the IR; the emitter folds
    /// them to constants.
    GetRegister(Reg) -> U32;
    /// Write a guest register other than the PC.
    SetRegister(Reg, U32) -> Void;
    /// Read the CPSR carry flag.
    GetCFlag() -> U1;
    /// Replace all four CPSR condition flags.
    SetCpsrNZCV(Nzcv) -> Void;
    /// Replace N/Z from a flag bundle and C from a separate carry value.
    SetCpsrNZC(Nzcv, U1) -> Void;
    /// Replace N/Z alone.
    SetCpsrNZ(Nzcv) -> Void;
    /// Replace the carry flag alone.
    SetCFlag(U1) -> Void;
    /// All four flags as computed by the referenced operation.
    GetNZCVFromOp(U32) -> Nzcv;
    /// N and Z of the referenced value; C and V slots are unset.
    GetNZFromOp(U32) -> Nzcv;
    /// The carry-out of the referenced shift or arithmetic operation.
    GetCarryFromOp(U32) -> U1;
    /// The overflow-out of the referenced arithmetic operation.
    GetOverflowFromOp(U32) -> U1;
    /// `a + b + carry`.
    Add(U32, U32, U1) -> U32;
    /// `a - b - !carry` (pass carry 1 for a plain subtract).
    Sub(U32, U32, U1) -> U32;
    /// Low 32 bits of `a * b`.
    Mul(U32, U32) -> U32;
    /// Bitwise AND.
    And(U32, U32) -> U32;
    /// Bitwise OR.
    Or(U32, U32) -> U32;
    /// Bitwise exclusive OR.
    Eor(U32, U32) -> U32;
    /// Bitwise complement.
    Not(U32) -> U32;
    /// Shift left; amount 0 is the identity and preserves the carry-in.
    LogicalShiftLeft(U32, U8, U1) -> U32;
    /// Logical shift right.
    LogicalShiftRight(U32, U8, U1) -> U32;
    /// Arithmetic shift right.
    ArithmeticShiftRight(U32, U8, U1) -> U32;
    /// Rotate right.
    RotateRight(U32, U8, U1) -> U32;
    /// Rotate right one bit through the carry.
    RotateRightExtended(U32, U1) -> U32;
    /// Sign-extend a byte to a word.
    SignExtendByteToWord(U8) -> U32;
    /// Sign-extend a halfword to a word.
    SignExtendHalfToWord(U16) -> U32;
    /// Zero-extend a byte to a word.
    ZeroExtendByteToWord(U8) -> U32;
    /// Zero-extend a halfword to a word.
    ZeroExtendHalfToWord(U16) -> U32;
    /// Truncate a word to its low byte.
    LeastSignificantByte(U32) -> U8;
    /// Truncate a word to its low halfword.
    LeastSignificantHalf(U32) -> U16;
    /// Whether the value is zero.
    IsZero(U32) -> U1;
    /// Count leading zero bits.
    CountLeadingZeros(U32) -> U32;
    /// Reverse the bit order of a word.
    ReverseBits(U32) -> U32;
    /// Reverse the four bytes of a word.
    ByteReverseWord(U32) -> U32;
    /// Reverse the two bytes of a halfword.
    ByteReverseHalf(U16) -> U16;
    /// Read one byte of guest memory.
    ReadMemory8(U32) -> U8;
    /// Read a halfword of guest memory.
    ReadMemory16(U32) -> U16;
    /// Read a word of guest memory.
    ReadMemory32(U32) -> U32;
    /// Write one byte of guest memory.
    WriteMemory8(U32, U8) -> Void;
    /// Write a halfword of guest memory.
    WriteMemory16(U32, U16) -> Void;
    /// Write a word of guest memory.
    WriteMemory32(U32, U32) -> Void;
    /// Latch the value tested by a `CheckBit` terminal.
    SetCheckBit(U1) -> Void;
    /// Write the PC without interworking.
    BranchWritePC(U32) -> Void;
    /// Write the PC, switching instruction set by bit 0.
    BXWritePC(U32) -> Void;
    /// Invoke the supervisor call handler with the given immediate.
    CallSupervisor(U32) -> Void;
    /// Push a predicted return location onto the return-stack buffer.
    PushRsb(U64) -> Void;
    /// Publish the non-PC half of the location descriptor before an indirect
    /// PC write.
    UpdateUpperLocationDescriptor(U32) -> Void;
    /// Deliver an exceptional event to the runtime.
    ExceptionRaised(U8) -> Void;
}

impl Opcode {
    /// Whether executing this operation changes the CPSR condition flags.
    ///
    /// Predication relies on this: a block translated under a stored
    /// condition may not grow past an instruction that writes the flags.
    pub const fn writes_cpsr(self) -> bool {
        matches!(
            self,
            Opcode::SetCpsrNZCV | Opcode::SetCpsrNZC | Opcode::SetCpsrNZ | Opcode::SetCFlag
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip() {
        for opcode in Opcode::iter() {
            assert_eq!(Opcode::from_str(&opcode.to_string()), Ok(opcode));
        }
    }

    #[test]
    fn flag_writers_are_marked() {
        assert!(Opcode::SetCpsrNZCV.writes_cpsr());
        assert!(Opcode::SetCFlag.writes_cpsr());
        assert!(!Opcode::GetCFlag.writes_cpsr());
        assert!(!Opcode::SetRegister.writes_cpsr());
    }

    #[test]
    fn signatures_are_consistent() {
        assert_eq!(Opcode::Add.arg_types(), &[Type::U32, Type::U32, Type::U1]);
        assert_eq!(Opcode::Add.result_type(), Type::U32);
        assert_eq!(Opcode::SetRegister.result_type(), Type::Void);
        assert_eq!(Opcode::GetNZCVFromOp.result_type(), Type::Nzcv);
    }
}
