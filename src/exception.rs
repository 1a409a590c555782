//! Guest-visible exceptional events.

/// An exceptional event lifted into the IR.
///
/// Raised exceptions become [`ExceptionRaised`](crate::ir::Opcode::ExceptionRaised)
/// instructions carrying the event code; the runtime decides what the guest
/// sees when the block executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Exception {
    /// No matcher claimed the encoding, or a handler found a reserved one.
    UndefinedInstruction = 0,
    /// An encoding-specific architectural constraint was violated.
    UnpredictableInstruction = 1,
    /// A `BKPT` instruction.
    Breakpoint = 2,
    /// A hooked `WFI` hint.
    WaitForInterrupt = 3,
    /// A hooked `WFE` hint.
    WaitForEvent = 4,
    /// A hooked `SEV` hint.
    SendEvent = 5,
    /// A hooked `SEVL` hint.
    SendEventLocal = 6,
    /// A hooked `YIELD` hint.
    Yield = 7,
}

impl Exception {
    /// The code stored in the IR immediate operand.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        use strum::IntoEnumIterator;
        for exception in Exception::iter() {
            assert_eq!(Exception::from_repr(exception.code()), Some(exception));
        }
    }
}
