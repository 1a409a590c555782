//! Translation error channel.
//!
//! Encoding-level problems (undefined or unpredictable instructions) are not
//! errors: they lift to [`ExceptionRaised`](crate::ir::Opcode::ExceptionRaised)
//! instructions and the guest observes them when the block runs. The types
//! here cover the structural failures where no block can be produced at all.

use thiserror::Error;

/// The code-read callback had no mapping for an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no guest code mapped at {vaddr:#010x}")]
pub struct PageFault {
    /// The faulting guest virtual address.
    pub vaddr: u32,
}

/// An internal decoder-table inconsistency. Never caused by guest input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A bit-pattern template failed to compile.
    #[error("bad bit pattern {pattern:?} for {name:?}: {reason}")]
    BadPattern {
        /// Matcher name of the offending row.
        name: &'static str,
        /// The textual template.
        pattern: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// Two matchers of equal specificity admit a common word and no priority
    /// override orders them.
    #[error("ambiguous decode table: {first:?} and {second:?} overlap at equal specificity")]
    AmbiguousTable {
        /// Name of the earlier matcher.
        first: &'static str,
        /// Name of the later matcher.
        second: &'static str,
    },
}

/// Failure to produce a block. No partial block is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The code-read callback faulted; the host owns the fallout.
    #[error(transparent)]
    Memory(#[from] PageFault),
    /// The decoder tables failed their build-time validation.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The location descriptor does not address Thumb code.
    #[error("location descriptor does not address Thumb code")]
    UnsupportedInstructionSet,
}
