use core::fmt;

use a32_asm::Reg;

use crate::ir::Type;

/// Index of an instruction within its owning block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstId(pub(crate) u32);

impl InstId {
    /// Position in the block's instruction list.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// An operand: an immediate, a register reference, or the value produced by
/// an earlier instruction in the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// The value produced by an earlier instruction.
    Inst(InstId),
    /// A 1-bit immediate.
    ImmU1(bool),
    /// An 8-bit immediate.
    ImmU8(u8),
    /// A 16-bit immediate.
    ImmU16(u16),
    /// A 32-bit immediate.
    ImmU32(u32),
    /// A 64-bit immediate.
    ImmU64(u64),
    /// A guest register reference.
    Reg(Reg),
}

impl Value {
    /// The type of the operand, when it is knowable without the owning block
    /// (i.e. for everything but instruction references).
    pub fn immediate_type(self) -> Option<Type> {
        match self {
            Value::Inst(_) => None,
            Value::ImmU1(_) => Some(Type::U1),
            Value::ImmU8(_) => Some(Type::U8),
            Value::ImmU16(_) => Some(Type::U16),
            Value::ImmU32(_) => Some(Type::U32),
            Value::ImmU64(_) => Some(Type::U64),
            Value::Reg(_) => Some(Type::Reg),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Inst(id) => write!(f, "{id}"),
            Value::ImmU1(v) => write!(f, "#{}", u8::from(*v)),
            Value::ImmU8(v) => write!(f, "#{v}"),
            Value::ImmU16(v) => write!(f, "#{v}"),
            Value::ImmU32(v) => write!(f, "#{v}"),
            Value::ImmU64(v) => write!(f, "#{v}"),
            Value::Reg(r) => write!(f, "{r}"),
        }
    }
}

macro_rules! typed_handles {
    ($($(#[$doc:meta])* $name:ident => $ty:ident;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $name(pub(crate) Value);

            impl $name {
                /// The underlying operand.
                pub const fn value(self) -> Value {
                    self.0
                }

                /// The declared type of this handle.
                pub const fn ty() -> Type {
                    Type::$ty
                }
            }

            impl From<$name> for Value {
                fn from(handle: $name) -> Value {
                    handle.0
                }
            }
        )*
    };
}

typed_handles! {
    /// A 1-bit IR value handle.
    U1 => U1;
    /// An 8-bit IR value handle.
    U8 => U8;
    /// A 16-bit IR value handle.
    U16 => U16;
    /// A 32-bit IR value handle.
    U32 => U32;
    /// A 64-bit IR value handle.
    U64 => U64;
    /// A packed N/Z/C/V flag bundle handle.
    Nzcv => Nzcv;
}
