/// An A32 condition code, as tested against the CPSR N/Z/C/V flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Cond {
    EQ = 0b0000,
    NE = 0b0001,
    CS = 0b0010,
    CC = 0b0011,
    MI = 0b0100,
    PL = 0b0101,
    VS = 0b0110,
    VC = 0b0111,
    HI = 0b1000,
    LS = 0b1001,
    GE = 0b1010,
    LT = 0b1011,
    GT = 0b1100,
    LE = 0b1101,
    AL = 0b1110,
    /// The deprecated "never" encoding. Lifting it is an unpredictable
    /// instruction; it never reaches a block condition.
    NV = 0b1111,
}

impl Cond {
    /// Maps a 4-bit condition field to its condition code.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is out of range; decoder field extraction guarantees
    /// the range for condition fields.
    pub fn from_bits(bits: u32) -> Self {
        match bits {
            0b0000 => Cond::EQ,
            0b0001 => Cond::NE,
            0b0010 => Cond::CS,
            0b0011 => Cond::CC,
            0b0100 => Cond::MI,
            0b0101 => Cond::PL,
            0b0110 => Cond::VS,
            0b0111 => Cond::VC,
            0b1000 => Cond::HI,
            0b1001 => Cond::LS,
            0b1010 => Cond::GE,
            0b1011 => Cond::LT,
            0b1100 => Cond::GT,
            0b1101 => Cond::LE,
            0b1110 => Cond::AL,
            0b1111 => Cond::NV,
            _ => panic!("condition field out of range: {bits}"),
        }
    }

    /// The 4-bit encoding of this condition.
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip() {
        for bits in 0..16 {
            assert_eq!(Cond::from_bits(bits).bits(), bits);
        }
    }

    #[test]
    fn displays_mnemonics() {
        assert_eq!(Cond::EQ.to_string(), "EQ");
        assert_eq!(Cond::AL.to_string(), "AL");
    }
}
