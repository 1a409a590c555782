use core::fmt;

use crate::ItState;

/// The unique key of a translated basic block.
///
/// Identifies a guest program point together with every piece of execution
/// state that changes how code at that point must be lifted: the Thumb flag,
/// the IT-block state, the single-step request and the FPSCR mode bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationDescriptor {
    pc: u32,
    t_flag: bool,
    it: ItState,
    single_stepping: bool,
    fpscr_mode: u32,
}

impl LocationDescriptor {
    /// The FPSCR bits that participate in the block key.
    pub const FPSCR_MODE_MASK: u32 = 0x07F7_0000;

    /// A descriptor for Thumb code at `pc` with empty IT state.
    pub const fn thumb(pc: u32) -> Self {
        LocationDescriptor {
            pc,
            t_flag: true,
            it: ItState::new(0),
            single_stepping: false,
            fpscr_mode: 0,
        }
    }

    /// A descriptor for ARM-mode code at `pc`.
    pub const fn arm(pc: u32) -> Self {
        LocationDescriptor {
            pc,
            t_flag: false,
            it: ItState::new(0),
            single_stepping: false,
            fpscr_mode: 0,
        }
    }

    /// The guest program counter.
    pub const fn pc(self) -> u32 {
        self.pc
    }

    /// Whether the descriptor addresses Thumb code.
    pub const fn t_flag(self) -> bool {
        self.t_flag
    }

    /// The IT-block state in effect at this location.
    pub const fn it(self) -> ItState {
        self.it
    }

    /// Whether translation must stop after a single instruction.
    pub const fn single_stepping(self) -> bool {
        self.single_stepping
    }

    /// The FPSCR mode bits in effect at this location.
    pub const fn fpscr_mode(self) -> u32 {
        self.fpscr_mode
    }

    /// The same location with a different program counter.
    pub const fn with_pc(self, pc: u32) -> Self {
        LocationDescriptor { pc, ..self }
    }

    /// The same location with a different IT state.
    pub const fn with_it(self, it: ItState) -> Self {
        LocationDescriptor { it, ..self }
    }

    /// The same location with a different Thumb flag.
    pub const fn with_t_flag(self, t_flag: bool) -> Self {
        LocationDescriptor { t_flag, ..self }
    }

    /// The same location with a different single-step request.
    pub const fn with_single_stepping(self, single_stepping: bool) -> Self {
        LocationDescriptor { single_stepping, ..self }
    }

    /// The same location with different FPSCR mode bits (masked).
    pub const fn with_fpscr_mode(self, fpscr: u32) -> Self {
        LocationDescriptor {
            fpscr_mode: fpscr & Self::FPSCR_MODE_MASK,
            ..self
        }
    }

    /// The location `offset` bytes further on, wrapping at the address-space
    /// boundary like the guest PC does.
    pub const fn advance_pc(self, offset: i32) -> Self {
        LocationDescriptor {
            pc: self.pc.wrapping_add(offset as u32),
            ..self
        }
    }

    /// The location after one instruction of an IT block.
    pub const fn advance_it(self) -> Self {
        LocationDescriptor {
            it: self.it.advance(),
            ..self
        }
    }

    /// A packed form suitable as a map key or a trace label.
    pub const fn unique_key(self) -> u64 {
        self.pc as u64
            | (self.it.value() as u64) << 32
            | (self.t_flag as u64) << 40
            | (self.single_stepping as u64) << 41
            | ((self.fpscr_mode >> 16) as u64) << 42
    }

    /// The non-PC half of the key, written back by the lifted code before an
    /// indirect PC write publishes a successor location.
    pub const fn upper_half(self) -> u32 {
        (self.unique_key() >> 32) as u32
    }
}

impl fmt::Display for LocationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}:{:02x}:{}{}",
            self.pc,
            self.it.value(),
            if self.t_flag { 'T' } else { 'A' },
            if self.single_stepping { "!" } else { "" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_pc_wraps() {
        let loc = LocationDescriptor::thumb(0xFFFF_FFFE);
        assert_eq!(loc.advance_pc(4).pc(), 2);
        assert_eq!(loc.advance_pc(-2).pc(), 0xFFFF_FFFC);
    }

    #[test]
    fn keys_differ_by_execution_state() {
        let base = LocationDescriptor::thumb(0x1000);
        assert_ne!(base.unique_key(), base.with_it(ItState::new(0x08)).unique_key());
        assert_ne!(base.unique_key(), base.with_single_stepping(true).unique_key());
        assert_ne!(base.unique_key(), LocationDescriptor::arm(0x1000).unique_key());
    }

    #[test]
    fn fpscr_mode_is_masked() {
        let loc = LocationDescriptor::thumb(0).with_fpscr_mode(0xFFFF_FFFF);
        assert_eq!(loc.fpscr_mode(), LocationDescriptor::FPSCR_MODE_MASK);
    }
}
