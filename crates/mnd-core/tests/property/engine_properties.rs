use mnd_core::{
    is_magic, ConstantTracker, FileId, IgnoreConfig, IgnoreRules, LiteralKind, SourcePos,
};
use proptest::prelude::*;

fn rules_ignoring(numbers: Vec<String>) -> IgnoreRules {
    IgnoreRules::compile(&IgnoreConfig {
        numbers,
        ..IgnoreConfig::default()
    })
    .unwrap()
}

fn pos(file: usize, line: usize, column: usize) -> SourcePos {
    SourcePos {
        file: FileId(file),
        line,
        column,
    }
}

proptest! {
    #[test]
    fn integers_above_one_are_magic_by_default(n in 2u64..10_000_000) {
        let policy = IgnoreRules::default();
        prop_assert!(is_magic(LiteralKind::Int, &n.to_string(), &policy));
    }

    #[test]
    fn listed_integers_are_never_magic(n in 0u64..1_000_000) {
        let policy = rules_ignoring(vec![n.to_string()]);
        prop_assert!(!is_magic(LiteralKind::Int, &n.to_string(), &policy));
    }

    #[test]
    fn digit_separators_do_not_bypass_ignore_list(n in 1_000u64..1_000_000) {
        let plain = n.to_string();
        let (head, tail) = plain.split_at(plain.len() - 3);
        let separated = format!("{head}_{tail}");
        let policy = rules_ignoring(vec![plain]);
        prop_assert!(!is_magic(LiteralKind::Int, &separated, &policy));
    }

    #[test]
    fn non_numeric_kinds_are_never_magic(s in "[0-9]{1,8}") {
        let policy = rules_ignoring(Vec::new());
        for kind in [LiteralKind::String, LiteralKind::Rune, LiteralKind::Imaginary] {
            prop_assert!(!is_magic(kind, &s, &policy));
        }
    }

    #[test]
    fn classification_is_stable(n in 0u64..1_000, frac in 0u32..100) {
        let policy = IgnoreRules::default();
        let text = format!("{n}.{frac}");
        let first = is_magic(LiteralKind::Float, &text, &policy);
        prop_assert_eq!(first, is_magic(LiteralKind::Float, &text, &policy));
    }

    #[test]
    fn tracker_lookup_ignores_column(
        file in 0usize..8,
        line in 1usize..5_000,
        recorded_col in 1usize..200,
        queried_col in 1usize..200,
    ) {
        let tracker = ConstantTracker::new();
        tracker.record_declaration(pos(file, line, recorded_col));
        let queried = pos(file, line, queried_col);
        prop_assert!(tracker.is_declaration_line(queried));
    }

    #[test]
    fn tracker_marks_do_not_leak_across_files_or_lines(
        file in 0usize..8,
        line in 2usize..5_000,
    ) {
        let tracker = ConstantTracker::new();
        tracker.record_declaration(pos(file, line, 1));
        let other_file = pos(file + 1, line, 1);
        let line_above = pos(file, line - 1, 1);
        let line_below = pos(file, line + 1, 1);
        prop_assert!(!tracker.is_declaration_line(other_file));
        prop_assert!(!tracker.is_declaration_line(line_above));
        prop_assert!(!tracker.is_declaration_line(line_below));
    }
}
