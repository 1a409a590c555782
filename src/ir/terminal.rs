use a32_asm::LocationDescriptor;

/// How control leaves a finalized block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terminal {
    /// Return to the runtime dispatcher unconditionally.
    ReturnToDispatch,
    /// Link to the block at the given location, honoring single-step and
    /// halt requests.
    LinkBlock(LocationDescriptor),
    /// Link directly to the block at the given location.
    LinkBlockFast(LocationDescriptor),
    /// The PC was loaded from the stack; consult the return-stack buffer.
    PopRsbHint,
    /// The PC was written indirectly; consult the fast dispatch cache.
    FastDispatchHint,
    /// Branch on the value latched by `SetCheckBit`.
    CheckBit {
        /// Taken when the latched bit is set.
        then_: Box<Terminal>,
        /// Taken when the latched bit is clear.
        else_: Box<Terminal>,
    },
    /// Fall back to interpreting the instruction at the given location; used
    /// for instruction families the frontend decodes but does not lift.
    Interpret(LocationDescriptor),
}
