//! 构建期一致性检查
//!
//! 在冻结之前对完整的条目序列运行一次，收集所有违规后一并报告：
//!
//! - 名称唯一（包括占位名与退役前的名称）
//! - 序数稠密，与追加顺序一致
//! - 错误号唯一，且等于 `ordinal - sentinel_offset`
//! - 退役槽位保留原序数
//! - 恰好前 `sentinel_offset` 个条目为哨兵

use hashbrown::HashMap;
use indexmap::IndexMap;

use super::error::{ValidationError, Violation};
use super::kind::{is_valid_name, placeholder_name, DiagnosticKind, Ordinal};
use super::numbering::{ErrorNumber, Numbering};

/// 检查条目序列；任何违规都是致命的
pub fn validate(
    entries: &[DiagnosticKind],
    numbering: Numbering,
) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    check_names(entries, &mut violations);
    check_ordinals(entries, &mut violations);
    check_error_numbers(entries, numbering, &mut violations);
    check_sentinels(entries, numbering, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        tracing::error!("catalog validation found {} violation(s)", violations.len());
        Err(ValidationError { violations })
    }
}

fn check_names(
    entries: &[DiagnosticKind],
    violations: &mut Vec<Violation>,
) {
    let mut seen: IndexMap<&str, Ordinal> = IndexMap::with_capacity(entries.len());

    for entry in entries {
        if entry.retired {
            if entry.name != placeholder_name(entry.ordinal) {
                violations.push(Violation::MovedPlaceholder {
                    name: entry.name.to_string(),
                    ordinal: entry.ordinal,
                });
            }
        } else if !is_valid_name(&entry.name) {
            violations.push(Violation::InvalidName {
                name: entry.name.to_string(),
                ordinal: entry.ordinal,
            });
        }

        let names = std::iter::once(entry.name()).chain(entry.former_name());
        for name in names {
            if let Some(&first) = seen.get(name) {
                violations.push(Violation::DuplicateName {
                    name: name.to_string(),
                    first,
                    second: entry.ordinal,
                });
            } else {
                seen.insert(name, entry.ordinal);
            }
        }
    }
}

fn check_ordinals(
    entries: &[DiagnosticKind],
    violations: &mut Vec<Violation>,
) {
    for (position, entry) in entries.iter().enumerate() {
        if entry.ordinal.index() != position {
            violations.push(Violation::OrdinalGap {
                position,
                found: entry.ordinal,
            });
        }
    }
}

fn check_error_numbers(
    entries: &[DiagnosticKind],
    numbering: Numbering,
    violations: &mut Vec<Violation>,
) {
    let mut seen: HashMap<ErrorNumber, Ordinal> = HashMap::with_capacity(entries.len());

    for entry in entries {
        let expected = numbering.error_number(entry.ordinal);
        if entry.error_number != expected {
            violations.push(Violation::WrongErrorNumber {
                ordinal: entry.ordinal,
                expected,
                found: entry.error_number,
            });
        }

        if let Some(&first) = seen.get(&entry.error_number) {
            violations.push(Violation::DuplicateErrorNumber {
                number: entry.error_number,
                first,
                second: entry.ordinal,
            });
        } else {
            seen.insert(entry.error_number, entry.ordinal);
        }
    }
}

fn check_sentinels(
    entries: &[DiagnosticKind],
    numbering: Numbering,
    violations: &mut Vec<Violation>,
) {
    let offset = numbering.sentinel_offset() as usize;

    if entries.len() < offset {
        // 哨兵槽位不满，缺的那几个同样算违规
        for position in entries.len()..offset {
            violations.push(Violation::SentinelMismatch {
                name: String::from("<missing>"),
                ordinal: Ordinal::new(position as u32),
                expected: true,
            });
        }
    }

    for (position, entry) in entries.iter().enumerate() {
        let expected = position < offset;
        if entry.is_sentinel() != expected {
            violations.push(Violation::SentinelMismatch {
                name: entry.name.to_string(),
                ordinal: entry.ordinal,
                expected,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::kind::KindClass;
    use std::borrow::Cow;

    fn entry(
        name: &'static str,
        ordinal: u32,
        class: KindClass,
    ) -> DiagnosticKind {
        let ordinal = Ordinal::new(ordinal);
        DiagnosticKind::new(
            Cow::Borrowed(name),
            ordinal,
            Numbering::REFERENCE.error_number(ordinal),
            class,
        )
    }

    fn sample() -> Vec<DiagnosticKind> {
        vec![
            entry("LazyError", 0, KindClass::Sentinel),
            entry("NoExplanation", 1, KindClass::Sentinel),
            entry("EmptyCatchOrFinallyBlock", 2, KindClass::Diagnostic),
            entry("EmptyCatchBlock", 3, KindClass::Diagnostic),
        ]
    }

    #[test]
    fn test_consistent_entries_pass() {
        assert!(validate(&sample(), Numbering::REFERENCE).is_ok());
    }

    #[test]
    fn test_duplicate_error_number_fails() {
        let mut entries = sample();
        entries[3].error_number = entries[2].error_number;

        let err = validate(&entries, Numbering::REFERENCE).unwrap_err();
        assert!(err.violations.contains(&Violation::DuplicateErrorNumber {
            number: ErrorNumber::new(0),
            first: Ordinal::new(2),
            second: Ordinal::new(3),
        }));
    }

    #[test]
    fn test_duplicate_name_fails() {
        let mut entries = sample();
        entries[3].name = Cow::Borrowed("EmptyCatchOrFinallyBlock");

        let err = validate(&entries, Numbering::REFERENCE).unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::DuplicateName {
                name: "EmptyCatchOrFinallyBlock".to_string(),
                first: Ordinal::new(2),
                second: Ordinal::new(3),
            }]
        );
    }

    #[test]
    fn test_former_name_counts_as_taken() {
        let mut entries = sample();
        entries[2].retired = true;
        entries[2].former_name = Some(Cow::Borrowed("EmptyCatchBlock"));
        entries[2].name = Cow::Owned(placeholder_name(Ordinal::new(2)));

        let err = validate(&entries, Numbering::REFERENCE).unwrap_err();
        assert!(matches!(
            err.violations.as_slice(),
            [Violation::DuplicateName { .. }]
        ));
    }

    #[test]
    fn test_reordered_entries_fail() {
        let mut entries = sample();
        entries.swap(2, 3);

        let err = validate(&entries, Numbering::REFERENCE).unwrap_err();
        assert!(err
            .violations
            .iter()
            .any(|v| matches!(v, Violation::OrdinalGap { position: 2, .. })));
    }

    #[test]
    fn test_moved_placeholder_fails() {
        let mut entries = sample();
        entries[3].retired = true;
        entries[3].name = Cow::Owned(placeholder_name(Ordinal::new(2)));

        let err = validate(&entries, Numbering::REFERENCE).unwrap_err();
        assert!(err
            .violations
            .iter()
            .any(|v| matches!(v, Violation::MovedPlaceholder { .. })));
    }

    #[test]
    fn test_sentinel_count_must_match_offset() {
        let err = validate(&sample(), Numbering::new(3)).unwrap_err();
        assert!(err.violations.iter().any(|v| matches!(
            v,
            Violation::SentinelMismatch { expected: true, .. }
        )));
    }

    #[test]
    fn test_error_message_lists_violations() {
        let mut entries = sample();
        entries[3].error_number = ErrorNumber::new(0);
        let message = validate(&entries, Numbering::REFERENCE)
            .unwrap_err()
            .to_string();
        assert!(message.starts_with("diagnostic catalog failed validation with 2 violation(s)"));
        assert!(message.contains("error number E000 used by ordinals #2 and #3"));
    }
}
