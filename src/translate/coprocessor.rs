//! VFP and Advanced-SIMD routing.
//!
//! The frontend decodes these families so that dispatch order and the
//! Thumb-to-A32 rewrite stay observable, but it does not lift their
//! semantics: a hit hands the instruction back to the host interpreter.

use crate::translate::TranslatorVisitor;

impl TranslatorVisitor<'_> {
    pub(crate) fn coprocessor_instruction(&mut self) -> bool {
        self.interpret_current()
    }
}
