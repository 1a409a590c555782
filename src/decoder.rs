//! Bit-pattern decoder tables.
//!
//! One table per instruction-set variant. Each table is an ordered list of
//! [`Matcher`]s: the first matcher whose mask/value pair claims a word wins.
//! Tables are built once per process, sorted so that more-specific encodings
//! come first, with a small per-table priority-override set for the cases the
//! specificity heuristic cannot order.

pub mod asimd;
mod matcher;
pub mod thumb16;
pub mod thumb32;
pub mod vfp;

use core::cmp;

use itertools::Itertools;

pub use matcher::{Fields, Handler, Matcher};

use crate::error::DecodeError;

/// Sorts rows into decode order and validates the result.
///
/// Stable-sorts by descending specificity, then stable-partitions the
/// `comes_first` names to the front (preserving their relative order).
pub(crate) fn build_table(
    mut table: Vec<Matcher>,
    comes_first: &[&str],
) -> Result<Vec<Matcher>, DecodeError> {
    table.sort_by_key(|m| cmp::Reverse(m.specificity()));
    table.sort_by_key(|m| !comes_first.contains(&m.name()));
    validate_table(&table, comes_first)?;
    Ok(table)
}

/// The table-build post-condition.
///
/// Two matchers overlap when some word satisfies both. Overlaps between
/// matchers of unequal specificity are resolved deterministically by the
/// sort; overlaps at equal specificity have no defined order and must be
/// named in the priority-override set.
fn validate_table(table: &[Matcher], comes_first: &[&str]) -> Result<(), DecodeError> {
    for (a, b) in table.iter().tuple_combinations() {
        let overlap = (a.value() ^ b.value()) & (a.mask() & b.mask()) == 0;
        let ordered = a.specificity() != b.specificity()
            || comes_first.contains(&a.name())
            || comes_first.contains(&b.name());
        if overlap && !ordered {
            return Err(DecodeError::AmbiguousTable {
                first: a.name(),
                second: b.name(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::TranslatorVisitor;

    fn nop_handler(_: &mut TranslatorVisitor<'_>, _: &Fields) -> bool {
        true
    }

    fn matcher(name: &'static str, pattern: &'static str) -> Matcher {
        Matcher::compile(name, pattern, nop_handler).expect("test pattern compiles")
    }

    #[test]
    fn more_specific_rows_sort_first() {
        let table = build_table(
            vec![
                matcher("wide", "1011------------"),
                matcher("narrow", "1011111100000000"),
            ],
            &[],
        )
        .expect("table builds");
        assert_eq!(table[0].name(), "narrow");
    }

    #[test]
    fn priority_overrides_float_to_front() {
        let table = build_table(
            vec![
                matcher("specific", "10110000vvvvvvvv"),
                matcher("floated", "1011vvvvvvvvvvvv"),
            ],
            &["floated"],
        )
        .expect("table builds");
        assert_eq!(table[0].name(), "floated");
    }

    #[test]
    fn equal_specificity_overlap_is_rejected() {
        let err = build_table(
            vec![
                matcher("a", "1011vvvvvvvv0000"),
                matcher("b", "10110000vvvvvvvv"),
            ],
            &[],
        )
        .expect_err("ambiguous table must not build");
        assert!(matches!(err, DecodeError::AmbiguousTable { .. }));
    }
}
