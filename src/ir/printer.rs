//! Textual form of a block, for debugging and test oracles.
//!
//! Each instruction renders as `%<index> = <Opcode> <operand>, …` with
//! `#<immediate>`, `%<index>` and `R<n>` operands. The parser recovers the
//! operand kinds from the opcode signature, so printing and re-parsing a
//! block's instruction listing is the identity.

use core::fmt;
use core::str::FromStr;

use a32_asm::{Cond, Reg};
use thiserror::Error;

use crate::ir::{Block, Inst, InstId, Type, Value};
use crate::ir::Opcode;

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block: location={}", self.location())?;
        writeln!(f, "cycles={}", self.cycle_count())?;
        if self.condition() != Cond::AL {
            write!(f, "condition={}", self.condition())?;
            if let Some(failed) = self.condition_failed_location() {
                write!(
                    f,
                    " failed={failed} failed-cycles={}",
                    self.condition_failed_cycle_count()
                )?;
            }
            writeln!(f)?;
        }
        for (index, inst) in self.instructions().iter().enumerate() {
            write!(f, "%{index} = {}", inst.opcode())?;
            for (i, arg) in inst.args().iter().enumerate() {
                if i == 0 {
                    write!(f, " {arg}")?;
                } else {
                    write!(f, ", {arg}")?;
                }
            }
            writeln!(f)?;
        }
        if let Some(terminal) = self.terminal() {
            writeln!(f, "terminal={terminal:?}")?;
        }
        if let Some(end) = self.end_location() {
            writeln!(f, "end={end}")?;
        }
        Ok(())
    }
}

/// Failure to parse an IR instruction listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrParseError {
    /// A line is not of the form `%<index> = <Opcode> <operands>`.
    #[error("malformed IR line {0:?}")]
    Line(String),
    /// The opcode name is unknown.
    #[error("unknown opcode {0:?}")]
    UnknownOpcode(String),
    /// An operand token does not fit the slot declared by the opcode.
    #[error("operand {operand:?} does not fit a {expected} slot")]
    Operand {
        /// The offending token.
        operand: String,
        /// The declared slot type.
        expected: Type,
    },
}

fn parse_operand(token: &str, expected: Type, parsed: &[Inst]) -> Result<Value, IrParseError> {
    let err = || IrParseError::Operand {
        operand: token.to_owned(),
        expected,
    };
    if let Some(index) = token.strip_prefix('%') {
        let index: usize = index.parse().map_err(|_| err())?;
        let inst = parsed.get(index).ok_or_else(err)?;
        if inst.opcode().result_type() != expected {
            return Err(err());
        }
        return Ok(Value::Inst(InstId(index as u32)));
    }
    if let Some(imm) = token.strip_prefix('#') {
        let imm: u64 = imm.parse().map_err(|_| err())?;
        return match expected {
            Type::U1 if imm <= 1 => Ok(Value::ImmU1(imm != 0)),
            Type::U8 => u8::try_from(imm).map(Value::ImmU8).map_err(|_| err()),
            Type::U16 => u16::try_from(imm).map(Value::ImmU16).map_err(|_| err()),
            Type::U32 => u32::try_from(imm).map(Value::ImmU32).map_err(|_| err()),
            Type::U64 => Ok(Value::ImmU64(imm)),
            _ => Err(err()),
        };
    }
    if expected == Type::Reg {
        return Reg::from_str(token).map(Value::Reg).map_err(|_| err());
    }
    Err(err())
}

/// Parses the `%<index> = …` lines of a block dump back into instructions.
///
/// Lines that are not instruction lines (the block header, the terminal) are
/// skipped, so the output of [`Block`]'s `Display` is accepted verbatim.
pub fn parse_instructions(text: &str) -> Result<Vec<Inst>, IrParseError> {
    let mut insts = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| l.starts_with('%')) {
        let bad = || IrParseError::Line(line.to_owned());
        let (index, rest) = line.split_once(" = ").ok_or_else(bad)?;
        let index: usize = index.strip_prefix('%').ok_or_else(bad)?.parse().map_err(|_| bad())?;
        if index != insts.len() {
            return Err(bad());
        }
        let (name, args) = match rest.split_once(' ') {
            Some((name, args)) => (name, args),
            None => (rest, ""),
        };
        let opcode =
            Opcode::from_str(name).map_err(|_| IrParseError::UnknownOpcode(name.to_owned()))?;
        let expected = opcode.arg_types();
        let tokens: Vec<&str> = if args.is_empty() {
            Vec::new()
        } else {
            args.split(", ").collect()
        };
        if tokens.len() != expected.len() {
            return Err(bad());
        }
        let args = tokens
            .iter()
            .zip(expected)
            .map(|(token, ty)| parse_operand(token, *ty, &insts))
            .collect::<Result<Vec<_>, _>>()?;
        insts.push(Inst::new(opcode, args));
    }
    Ok(insts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use a32_asm::LocationDescriptor;

    #[test]
    fn print_parse_is_identity() {
        let mut block = Block::new(LocationDescriptor::thumb(0x100));
        let a = block.push(Opcode::GetRegister, vec![Value::Reg(Reg::R1)]);
        let b = block.push(Opcode::GetRegister, vec![Value::Reg(Reg::R2)]);
        let sum = block.push(
            Opcode::Add,
            vec![Value::Inst(a), Value::Inst(b), Value::ImmU1(false)],
        );
        block.push(Opcode::SetRegister, vec![Value::Reg(Reg::R0), Value::Inst(sum)]);

        let text = block.to_string();
        let parsed = parse_instructions(&text).expect("dump must parse");
        assert_eq!(parsed, block.instructions());
    }

    #[test]
    fn rejects_forward_references() {
        assert!(parse_instructions("%0 = SetRegister R0, %1").is_err());
    }

    #[test]
    fn rejects_oversized_immediates() {
        assert!(parse_instructions("%0 = ExceptionRaised #300").is_err());
    }
}
