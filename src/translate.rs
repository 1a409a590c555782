//! The basic-block translator.
//!
//! Walks the guest PC from a starting [`LocationDescriptor`], fetches code
//! through the host callback, decodes each instruction against the tables in
//! [`crate::decoder`] and drives the handlers that emit IR, until the block
//! must end.

mod conditional_state;
mod coprocessor;
mod thumb16;
mod thumb32_branch;
mod thumb32_data_processing_modified_imm;
mod thumb32_data_processing_plain_imm;
mod thumb32_data_processing_reg;
mod thumb32_data_processing_shifted_reg;
mod thumb32_load_byte;
mod thumb32_load_halfword;
mod thumb32_load_store_multiple;
mod thumb32_load_word;
mod thumb32_misc;
mod thumb32_multiply;
mod thumb32_store_single;
mod visitor;

pub use conditional_state::ConditionalState;
pub(crate) use conditional_state::cond_can_continue;
pub use visitor::TranslatorVisitor;

use a32_asm::LocationDescriptor;

use crate::decoder;
use crate::error::{PageFault, TranslateError};
use crate::ir::{Block, Terminal};
use crate::options::TranslationOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThumbInstSize {
    Thumb16,
    Thumb32,
}

/// A halfword starts a 32-bit Thumb instruction iff its top five bits are
/// `0b11101`, `0b11110` or `0b11111`.
fn is_thumb16(first_half: u16) -> bool {
    first_half & 0xF800 < 0xE800
}

/// `BKPT` and `HLT` execute regardless of IT-block predication.
fn is_unconditional_instruction(is_thumb_16: bool, instruction: u32) -> bool {
    if !is_thumb_16 {
        return false;
    }
    if instruction & 0xFF00 == 0xBE00 {
        // BKPT
        return true;
    }
    if instruction & 0xFFC0 == 0xBA80 {
        // HLT
        return true;
    }
    false
}

/// Fetches one Thumb instruction at `arm_pc` through the host callback.
///
/// Reads are 4-byte aligned; the addressed halfword is selected by `pc & 2`
/// and a 32-bit encoding carries its first halfword in the high 16 bits.
fn read_thumb_instruction<F>(
    arm_pc: u32,
    read_code: &mut F,
) -> Result<(u32, ThumbInstSize), PageFault>
where
    F: FnMut(u32) -> Result<u32, PageFault>,
{
    let mut first_part = read_code(arm_pc & 0xFFFF_FFFC)?;
    if arm_pc & 0x2 != 0 {
        first_part >>= 16;
    }
    first_part &= 0xFFFF;

    if is_thumb16(first_part as u16) {
        return Ok((first_part, ThumbInstSize::Thumb16));
    }

    let second_pc = arm_pc.wrapping_add(2);
    let mut second_part = read_code(second_pc & 0xFFFF_FFFC)?;
    if second_pc & 0x2 != 0 {
        second_part >>= 16;
    }
    second_part &= 0xFFFF;

    Ok((first_part << 16 | second_part, ThumbInstSize::Thumb32))
}

/// Rewrites a Thumb Advanced-SIMD encoding into its A32 equivalent, so one
/// table serves both instruction sets.
fn convert_asimd_instruction(thumb_instruction: u32) -> u32 {
    if thumb_instruction & 0xEF00_0000 == 0xEF00_0000 {
        let u = thumb_instruction >> 28 & 1;
        return 0xF200_0000 | u << 24 | (thumb_instruction & 0x00FF_FFFF);
    }
    if thumb_instruction & 0xFF00_0000 == 0xF900_0000 {
        return 0xF400_0000 | (thumb_instruction & 0x00FF_FFFF);
    }
    0xF7F0_A000 // UDF
}

/// Whether a 32-bit word sits in the coprocessor encoding space where VFP
/// and Advanced-SIMD instructions live.
fn maybe_vfp_or_asimd_instruction(instruction: u32) -> bool {
    instruction & 0xEC00_0000 == 0xEC00_0000 || instruction & 0xFF10_0000 == 0xF900_0000
}

/// Decodes one fetched word against the tables in dispatch order and runs
/// the matched handler; a miss lifts `UDF`.
fn dispatch_thumb(
    visitor: &mut TranslatorVisitor<'_>,
    instruction: u32,
    is_thumb_16: bool,
) -> Result<bool, TranslateError> {
    if is_thumb_16 {
        return Ok(match decoder::thumb16::decode(instruction as u16)? {
            Some(matcher) => {
                tracing::trace!(name = matcher.name(), "thumb16");
                matcher.dispatch(visitor, instruction)
            }
            None => {
                tracing::debug!(word = format_args!("{instruction:#06x}"), "undefined thumb16 encoding");
                visitor.undefined_instruction()
            }
        });
    }

    if maybe_vfp_or_asimd_instruction(instruction) {
        if let Some(matcher) = decoder::vfp::decode(instruction)? {
            tracing::trace!(name = matcher.name(), "vfp");
            return Ok(matcher.dispatch(visitor, instruction));
        }
        let asimd_word = convert_asimd_instruction(instruction);
        if let Some(matcher) = decoder::asimd::decode(asimd_word)? {
            tracing::trace!(name = matcher.name(), "asimd");
            return Ok(matcher.dispatch(visitor, asimd_word));
        }
    }

    Ok(match decoder::thumb32::decode(instruction)? {
        Some(matcher) => {
            tracing::trace!(name = matcher.name(), "thumb32");
            matcher.dispatch(visitor, instruction)
        }
        None => {
            tracing::debug!(word = format_args!("{instruction:#010x}"), "undefined thumb32 encoding");
            visitor.undefined_instruction()
        }
    })
}

/// Translates one basic block of Thumb code starting at `descriptor`.
///
/// `read_code` reads four bytes of guest code from an aligned address; a
/// [`PageFault`] aborts translation and no block is returned. The returned
/// block always has a terminal and an end location.
#[tracing::instrument(level = "debug", skip_all, fields(location = %descriptor))]
pub fn translate<F>(
    descriptor: LocationDescriptor,
    mut read_code: F,
    options: &TranslationOptions,
) -> Result<Block, TranslateError>
where
    F: FnMut(u32) -> Result<u32, PageFault>,
{
    if !descriptor.t_flag() {
        return Err(TranslateError::UnsupportedInstructionSet);
    }
    let single_step = descriptor.single_stepping();

    let mut block = Block::new(descriptor);
    let mut visitor = TranslatorVisitor::new(&mut block, descriptor, *options);

    let mut should_continue = true;
    loop {
        let arm_pc = visitor.ir.current_location.pc();
        let (instruction, inst_size) = read_thumb_instruction(arm_pc, &mut read_code)?;
        let is_thumb_16 = inst_size == ThumbInstSize::Thumb16;
        visitor.current_instruction_size = if is_thumb_16 { 2 } else { 4 };

        if is_unconditional_instruction(is_thumb_16, instruction)
            || visitor.thumb_condition_passed()
        {
            should_continue = dispatch_thumb(&mut visitor, instruction, is_thumb_16)?;
        }

        if visitor.cond_state == ConditionalState::Break {
            break;
        }

        visitor.ir.current_location = visitor
            .ir
            .current_location
            .advance_pc(if is_thumb_16 { 2 } else { 4 })
            .advance_it();
        visitor.ir.block.bump_cycle_count();

        if !(should_continue
            && cond_can_continue(visitor.cond_state, visitor.ir.block)
            && !single_step)
        {
            break;
        }
    }

    let reached_end = matches!(
        visitor.cond_state,
        ConditionalState::Translating | ConditionalState::Trailing
    ) || single_step;
    if reached_end && should_continue && !visitor.ir.block.has_terminal() {
        let next = visitor.ir.current_location;
        visitor.ir.set_terminal(if single_step {
            Terminal::LinkBlock(next)
        } else {
            Terminal::LinkBlockFast(next)
        });
    }
    let end_location = visitor.ir.current_location;

    debug_assert!(block.has_terminal(), "translated block lacks a terminal");
    block.set_end_location(end_location);
    Ok(block)
}

/// Translates exactly one pre-fetched Thumb instruction into `block`.
///
/// A 32-bit encoding is given with its first halfword in the low 16 bits,
/// as read linearly from guest memory. Returns whether a following
/// instruction could have joined the block.
pub fn translate_single_thumb(
    block: &mut Block,
    descriptor: LocationDescriptor,
    instruction: u32,
    options: &TranslationOptions,
) -> Result<bool, TranslateError> {
    if !descriptor.t_flag() {
        return Err(TranslateError::UnsupportedInstructionSet);
    }

    let mut visitor = TranslatorVisitor::new(block, descriptor, *options);

    let is_thumb_16 = is_thumb16(instruction as u16);
    visitor.current_instruction_size = if is_thumb_16 { 2 } else { 4 };
    let instruction = if is_thumb_16 {
        instruction & 0xFFFF
    } else {
        instruction.rotate_left(16)
    };

    let should_continue = dispatch_thumb(&mut visitor, instruction, is_thumb_16)?;

    let advance = if is_thumb_16 { 2 } else { 4 };
    visitor.ir.current_location = visitor.ir.current_location.advance_pc(advance);
    visitor.ir.block.bump_cycle_count();
    let end_location = visitor.ir.current_location;

    block.set_end_location(end_location);
    Ok(should_continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb16_thumb32_discrimination_is_exact() {
        assert!(is_thumb16(0xE7FF));
        assert!(!is_thumb16(0xE800));
        assert!(!is_thumb16(0xF000));
        assert!(!is_thumb16(0xFFFF));
        assert!(is_thumb16(0x0000));
    }

    #[test]
    fn asimd_rewrite_maps_both_encoding_spaces() {
        // 0xEF... data processing: U bit moves into bit 24 of 0xF2...
        assert_eq!(convert_asimd_instruction(0xEF12_3456), 0xF212_3456);
        assert_eq!(convert_asimd_instruction(0xFF12_3456), 0xF312_3456);
        // 0xF9... load/store maps onto 0xF4...
        assert_eq!(convert_asimd_instruction(0xF912_3456), 0xF412_3456);
        // Anything else rewrites to the permanently-undefined encoding.
        assert_eq!(convert_asimd_instruction(0xE812_3456), 0xF7F0_A000);
    }

    #[test]
    fn coprocessor_space_mask() {
        assert!(maybe_vfp_or_asimd_instruction(0xEE10_0A10)); // VFP
        assert!(maybe_vfp_or_asimd_instruction(0xEC10_0A10));
        assert!(maybe_vfp_or_asimd_instruction(0xF900_0000)); // ASIMD load/store
        assert!(!maybe_vfp_or_asimd_instruction(0xE850_0000)); // LDREX space
        assert!(!maybe_vfp_or_asimd_instruction(0xF8D0_0000)); // LDR imm12
    }

    #[test]
    fn fetch_concatenates_halfwords_high_first() {
        let mut memory = |addr: u32| -> Result<u32, PageFault> {
            match addr {
                // Little-endian words: halfword at 0x0 is 0xE8BD, at 0x2 is 0x8001.
                0x0 => Ok(0x8001_E8BD),
                0x4 => Ok(0x0000_1888),
                other => Err(PageFault { vaddr: other }),
            }
        };
        let (word, size) = read_thumb_instruction(0, &mut memory).unwrap();
        assert_eq!(size, ThumbInstSize::Thumb32);
        assert_eq!(word, 0xE8BD_8001);

        let (word, size) = read_thumb_instruction(4, &mut memory).unwrap();
        assert_eq!(size, ThumbInstSize::Thumb16);
        assert_eq!(word, 0x1888);

        assert!(read_thumb_instruction(8, &mut memory).is_err());
    }
}
