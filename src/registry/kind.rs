//! 诊断种类条目

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::numbering::ErrorNumber;

/// 注册表中的位置（从 0 开始，按追加顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ordinal(u32);

impl Ordinal {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Ordinal {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 种类类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindClass {
    /// 保留的非实质种类，占据最低序数，错误号为负
    Sentinel,
    /// 真正的诊断
    Diagnostic,
}

/// 一个诊断种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticKind {
    pub(crate) name: Cow<'static, str>,
    pub(crate) ordinal: Ordinal,
    pub(crate) error_number: ErrorNumber,
    pub(crate) class: KindClass,
    pub(crate) retired: bool,
    pub(crate) former_name: Option<Cow<'static, str>>,
}

impl DiagnosticKind {
    pub(crate) fn new(
        name: Cow<'static, str>,
        ordinal: Ordinal,
        error_number: ErrorNumber,
        class: KindClass,
    ) -> Self {
        Self {
            name,
            ordinal,
            error_number,
            class,
            retired: false,
            former_name: None,
        }
    }

    /// 当前名称；退役槽位为占位名 `<unused-N>`
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ordinal(&self) -> Ordinal {
        self.ordinal
    }

    #[inline]
    pub fn error_number(&self) -> ErrorNumber {
        self.error_number
    }

    #[inline]
    pub fn class(&self) -> KindClass {
        self.class
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.class == KindClass::Sentinel
    }

    #[inline]
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// 退役前的名称
    #[inline]
    pub fn former_name(&self) -> Option<&str> {
        self.former_name.as_deref()
    }

    /// 对外发布的错误码（如 `E007`）；哨兵与退役槽位没有
    pub fn code(&self) -> Option<String> {
        if self.retired {
            None
        } else {
            self.error_number.code()
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_number, self.name)
    }
}

/// 退役槽位的占位名。包含 `<`、`-`，不是合法标识符，因此不会与以后的注册冲突
pub fn placeholder_name(ordinal: Ordinal) -> String {
    format!("<unused-{}>", ordinal.get())
}

/// 种类名称必须是标识符：XID_Start 或 `_` 开头，其后为 XID_Continue。
/// 形如错误码的名称（`E042`）会遮蔽按错误码的查找，同样不合法
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let identifier = match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    };
    identifier && !looks_like_code(name)
}

fn looks_like_code(name: &str) -> bool {
    name.strip_prefix(['E', 'e'])
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
