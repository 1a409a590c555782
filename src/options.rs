//! Per-translation configuration.

/// Guest architecture generation, where encodings or PC-write semantics
/// differ between versions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArchVersion {
    /// ARMv4T.
    V4T,
    /// ARMv5TE.
    V5TE,
    /// ARMv6K.
    V6K,
    /// ARMv7-A.
    V7,
    /// ARMv8 AArch32.
    #[default]
    V8,
}

impl ArchVersion {
    /// Whether loads into the PC interwork (`BX`-style) on this version.
    pub fn load_write_pc_interworks(self) -> bool {
        self >= ArchVersion::V5TE
    }
}

/// The recognized translation options. Every field is a known key; anything
/// else a host wants to configure has no business reaching the translator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TranslationOptions {
    /// Give unpredictable encodings a defined behavior instead of raising
    /// [`Exception::UnpredictableInstruction`](crate::exception::Exception).
    pub define_unpredictable_behaviour: bool,
    /// Lift hint instructions (`WFE`, `WFI`, `SEV`, `SEVL`, `YIELD`) to
    /// raised exceptions so the host can observe them.
    pub hook_hint_instructions: bool,
    /// The guest architecture generation.
    pub arch_version: ArchVersion,
}

impl TranslationOptions {
    /// Options with all hooks off, targeting the newest architecture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`Self::define_unpredictable_behaviour`].
    pub fn with_define_unpredictable_behaviour(mut self, value: bool) -> Self {
        self.define_unpredictable_behaviour = value;
        self
    }

    /// Sets [`Self::hook_hint_instructions`].
    pub fn with_hook_hint_instructions(mut self, value: bool) -> Self {
        self.hook_hint_instructions = value;
        self
    }

    /// Sets [`Self::arch_version`].
    pub fn with_arch_version(mut self, version: ArchVersion) -> Self {
        self.arch_version = version;
        self
    }
}
