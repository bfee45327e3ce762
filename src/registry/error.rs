//! 注册表错误
//!
//! 所有错误都发生在构建（初始化）阶段；冻结后的查找只会返回“未找到”。

use thiserror::Error;

use super::kind::Ordinal;
use super::numbering::ErrorNumber;

/// 注册表操作错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("diagnostic kind '{name}' is already registered at ordinal {ordinal}")]
    DuplicateName { name: String, ordinal: Ordinal },

    #[error("unknown diagnostic kind '{0}'")]
    UnknownName(String),

    #[error("no diagnostic kind at ordinal {0}")]
    UnknownOrdinal(Ordinal),

    #[error("no diagnostic kind with error number {0}")]
    UnknownErrorNumber(ErrorNumber),

    #[error("'{0}' is not a valid diagnostic kind name")]
    InvalidName(String),

    #[error("sentinel kind '{0}' cannot be retired")]
    RetiredSentinel(String),

    #[error("diagnostic kind '{0}' is already retired")]
    AlreadyRetired(String),

    #[error("diagnostic registry is full ({0} kinds)")]
    Exhausted(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// 构建后一致性检查失败。致命：目录不得发布
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("diagnostic catalog failed validation with {} violation(s): {}", .violations.len(), render_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn sentinel_verb(expected: &bool) -> &'static str {
    if *expected {
        "be"
    } else {
        "not be"
    }
}

/// 单条一致性违规
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("name '{name}' used by ordinals {first} and {second}")]
    DuplicateName {
        name: String,
        first: Ordinal,
        second: Ordinal,
    },

    #[error("entry at position {position} carries ordinal {found}")]
    OrdinalGap { position: usize, found: Ordinal },

    #[error("error number {number} used by ordinals {first} and {second}")]
    DuplicateErrorNumber {
        number: ErrorNumber,
        first: Ordinal,
        second: Ordinal,
    },

    #[error("ordinal {ordinal} has error number {found}, expected {expected}")]
    WrongErrorNumber {
        ordinal: Ordinal,
        expected: ErrorNumber,
        found: ErrorNumber,
    },

    #[error("retired slot '{name}' does not hold placeholder for ordinal {ordinal}")]
    MovedPlaceholder { name: String, ordinal: Ordinal },

    #[error("ordinal {ordinal} ('{name}') should {} a sentinel", sentinel_verb(.expected))]
    SentinelMismatch {
        name: String,
        ordinal: Ordinal,
        expected: bool,
    },

    #[error("invalid name '{name}' at ordinal {ordinal}")]
    InvalidName { name: String, ordinal: Ordinal },
}
