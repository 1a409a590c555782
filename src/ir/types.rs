/// The declared type of an IR value or operand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// No value; the instruction is executed for its effect.
    Void,
    /// A single bit (flags, carries).
    U1,
    /// An 8-bit value.
    U8,
    /// A 16-bit value.
    U16,
    /// A 32-bit value.
    U32,
    /// A 64-bit value.
    U64,
    /// A packed N/Z/C/V flag bundle.
    Nzcv,
    /// A guest register reference.
    Reg,
}
