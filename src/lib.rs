//! A32/Thumb dynamic binary translator frontend.
//!
//! Lifts guest Thumb machine code into an SSA-style intermediate
//! representation, one basic block at a time. The caller provides a code-read
//! callback and a [`LocationDescriptor`](a32_asm::LocationDescriptor) naming
//! the entry point; [`translate`](crate::translate::translate) walks the guest
//! program counter, decodes each instruction against prioritized mask/value
//! tables and emits IR until the block must end (control flow, a predication
//! change, or a single-step request).
//!
//! Execution of the produced IR, optimization passes and machine-code emission
//! belong to downstream consumers; this crate only guarantees the block shape:
//! a finalized [`ir::Block`] always carries a terminal, its cycle counts and
//! the descriptor of the instruction after the last lifted one.

pub mod decoder;
pub mod error;
pub mod exception;
pub mod ir;
pub mod options;
pub mod translate;

pub mod prelude {
    //! Convenience re-exports for embedders.

    pub use a32_asm::{Cond, Imm, ItState, LocationDescriptor, Reg, RegList};

    pub use crate::error::{DecodeError, PageFault, TranslateError};
    pub use crate::exception::Exception;
    pub use crate::ir::{Block, Inst, InstId, Opcode, Terminal, Type, Value};
    pub use crate::options::{ArchVersion, TranslationOptions};
    pub use crate::translate::{translate, translate_single_thumb};
}
