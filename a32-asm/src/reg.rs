use core::fmt;

/// A general-purpose A32 register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Reg {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
    R8 = 8,
    R9 = 9,
    R10 = 10,
    R11 = 11,
    R12 = 12,
    R13 = 13,
    R14 = 14,
    R15 = 15,
}

impl Reg {
    /// The stack pointer.
    pub const SP: Reg = Reg::R13;
    /// The link register.
    pub const LR: Reg = Reg::R14;
    /// The program counter.
    pub const PC: Reg = Reg::R15;

    /// Maps a register number in `0..16` to its register.
    ///
    /// # Panics
    ///
    /// Panics if `num` is out of range; decoder field extraction guarantees
    /// the range for 3- and 4-bit register fields.
    pub fn from_num(num: u32) -> Self {
        match num {
            0 => Reg::R0,
            1 => Reg::R1,
            2 => Reg::R2,
            3 => Reg::R3,
            4 => Reg::R4,
            5 => Reg::R5,
            6 => Reg::R6,
            7 => Reg::R7,
            8 => Reg::R8,
            9 => Reg::R9,
            10 => Reg::R10,
            11 => Reg::R11,
            12 => Reg::R12,
            13 => Reg::R13,
            14 => Reg::R14,
            15 => Reg::R15,
            _ => panic!("register number out of range: {num}"),
        }
    }

    /// The register number in `0..16`.
    pub const fn num(self) -> u32 {
        self as u32
    }
}

/// A set of registers, as encoded by load/store-multiple register lists.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegList(pub u16);

impl RegList {
    /// Whether `reg` is in the list.
    pub const fn contains(self, reg: Reg) -> bool {
        self.0 >> reg.num() & 1 != 0
    }

    /// Number of registers in the list.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// The lowest-numbered register in the list, if any.
    pub fn lowest(self) -> Option<Reg> {
        if self.0 == 0 {
            None
        } else {
            Some(Reg::from_num(self.0.trailing_zeros()))
        }
    }

    /// The raw 16-bit encoding.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Iterates the listed registers in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Reg> {
        (0..16).filter(move |i| self.0 >> i & 1 != 0).map(Reg::from_num)
    }
}

impl fmt::Display for RegList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, reg) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{reg}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_high_registers() {
        assert_eq!(Reg::SP, Reg::R13);
        assert_eq!(Reg::LR.num(), 14);
        assert_eq!(Reg::PC.num(), 15);
    }

    #[test]
    fn display_round_trips() {
        use core::str::FromStr;
        for n in 0..16 {
            let reg = Reg::from_num(n);
            assert_eq!(Reg::from_str(&reg.to_string()), Ok(reg));
        }
    }

    #[test]
    fn reg_list_iterates_in_order() {
        let list = RegList(0b1000_0000_0000_0101);
        assert_eq!(list.count(), 3);
        assert_eq!(list.lowest(), Some(Reg::R0));
        assert!(list.contains(Reg::PC));
        let regs: Vec<_> = list.iter().collect();
        assert_eq!(regs, vec![Reg::R0, Reg::R2, Reg::PC]);
    }
}
