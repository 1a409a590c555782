use a32_asm::{Cond, LocationDescriptor};

use crate::ir::{Inst, InstId, Opcode, Terminal, Type, Value};

/// A basic block of lifted guest code.
///
/// Owns its instruction arena exclusively. Grows append-only during
/// translation and becomes valid once a terminal is set; the block condition
/// defaults to `AL` and, when it is anything else, the condition-failed
/// location names the successor taken when the condition check fails at
/// entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    location: LocationDescriptor,
    end_location: Option<LocationDescriptor>,
    condition: Cond,
    condition_failed_location: Option<LocationDescriptor>,
    condition_failed_cycle_count: u64,
    instructions: Vec<Inst>,
    terminal: Option<Terminal>,
    cycle_count: u64,
}

impl Block {
    /// An empty block starting at `location`.
    pub fn new(location: LocationDescriptor) -> Self {
        Block {
            location,
            end_location: None,
            condition: Cond::AL,
            condition_failed_location: None,
            condition_failed_cycle_count: 0,
            instructions: Vec::new(),
            terminal: None,
            cycle_count: 0,
        }
    }

    /// The descriptor this block was translated from.
    pub fn location(&self) -> LocationDescriptor {
        self.location
    }

    /// The descriptor of the instruction after the last lifted one.
    pub fn end_location(&self) -> Option<LocationDescriptor> {
        self.end_location
    }

    pub(crate) fn set_end_location(&mut self, location: LocationDescriptor) {
        self.end_location = Some(location);
    }

    /// The block-entry condition.
    pub fn condition(&self) -> Cond {
        self.condition
    }

    pub(crate) fn set_condition(&mut self, condition: Cond) {
        self.condition = condition;
    }

    /// Where execution resumes when the block-entry condition fails.
    pub fn condition_failed_location(&self) -> Option<LocationDescriptor> {
        self.condition_failed_location
    }

    pub(crate) fn set_condition_failed_location(&mut self, location: LocationDescriptor) {
        self.condition_failed_location = Some(location);
    }

    /// Guest cycles charged when the block-entry condition fails.
    pub fn condition_failed_cycle_count(&self) -> u64 {
        self.condition_failed_cycle_count
    }

    pub(crate) fn set_condition_failed_cycle_count(&mut self, cycles: u64) {
        self.condition_failed_cycle_count = cycles;
    }

    /// Guest cycles consumed by the lifted instructions.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub(crate) fn bump_cycle_count(&mut self) {
        self.cycle_count += 1;
    }

    /// The instruction arena.
    pub fn instructions(&self) -> &[Inst] {
        &self.instructions
    }

    /// Looks up an instruction by its arena index.
    pub fn inst(&self, id: InstId) -> &Inst {
        &self.instructions[id.index()]
    }

    /// Whether no instruction has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Whether the block has been finalized with a terminal.
    pub fn has_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// The terminal, once set.
    pub fn terminal(&self) -> Option<&Terminal> {
        self.terminal.as_ref()
    }

    pub(crate) fn set_terminal(&mut self, terminal: Terminal) {
        assert!(self.terminal.is_none(), "block terminal set twice");
        self.terminal = Some(terminal);
    }

    /// Whether any instruction in the block writes the CPSR flags.
    pub fn writes_cpsr(&self) -> bool {
        self.instructions.iter().any(Inst::writes_cpsr)
    }

    /// The type of an operand in the context of this block.
    pub fn value_type(&self, value: Value) -> Type {
        match value {
            Value::Inst(id) => self.inst(id).opcode().result_type(),
            other => other
                .immediate_type()
                .expect("non-inst operands always carry their type"),
        }
    }

    /// Appends an instruction, checking the operands against the opcode
    /// signature. An arity or type mismatch is a translator bug.
    pub(crate) fn push(&mut self, opcode: Opcode, args: Vec<Value>) -> InstId {
        let expected = opcode.arg_types();
        assert!(
            args.len() == expected.len(),
            "{opcode} expects {} operands, got {}",
            expected.len(),
            args.len()
        );
        for (arg, ty) in args.iter().zip(expected) {
            assert!(
                self.value_type(*arg) == *ty,
                "{opcode} operand {arg:?} is not a {ty}"
            );
        }
        let id = InstId(self.instructions.len() as u32);
        self.instructions.push(Inst::new(opcode, args));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Block {
        Block::new(LocationDescriptor::thumb(0x1000))
    }

    #[test]
    fn push_assigns_sequential_ids() {
        let mut block = block();
        let a = block.push(Opcode::GetRegister, vec![Value::Reg(a32_asm::Reg::R0)]);
        let b = block.push(Opcode::GetRegister, vec![Value::Reg(a32_asm::Reg::R1)]);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(block.value_type(Value::Inst(a)), Type::U32);
    }

    #[test]
    #[should_panic(expected = "operand")]
    fn push_rejects_type_mismatch() {
        let mut block = block();
        block.push(Opcode::SetRegister, vec![Value::Reg(a32_asm::Reg::R0), Value::ImmU8(1)]);
    }

    #[test]
    #[should_panic(expected = "terminal set twice")]
    fn terminal_is_set_once() {
        let mut block = block();
        block.set_terminal(Terminal::ReturnToDispatch);
        block.set_terminal(Terminal::ReturnToDispatch);
    }
}
