//! 序数与错误号之间的换算
//!
//! 错误号 = 序数 - 哨兵偏移。前 `sentinel_offset` 个槽位保留给哨兵种类
//! （延迟错误、无解释），它们得到负数错误号，不对外发布；
//! 真正的诊断从 0 开始编号。

use serde::{Deserialize, Serialize};

use super::kind::Ordinal;

/// 参考目录中的哨兵数量：`LazyError` 与 `NoExplanation`
pub const REFERENCE_SENTINEL_OFFSET: u32 = 2;

/// 对外发布的错误号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorNumber(i32);

impl ErrorNumber {
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// 哨兵种类的错误号为负
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 < 0
    }

    /// 发布用的错误码，如 `E007`；哨兵没有错误码
    pub fn code(self) -> Option<String> {
        if self.is_sentinel() {
            None
        } else {
            Some(format!("E{:03}", self.0))
        }
    }

    /// 解析 `E042`、`e42` 或 `42` 形式的错误码
    pub fn parse_code(text: &str) -> Option<Self> {
        let text = text.trim();
        let digits = text
            .strip_prefix('E')
            .or_else(|| text.strip_prefix('e'))
            .unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self)
    }
}

impl std::fmt::Display for ErrorNumber {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "{}", self.0),
        }
    }
}

/// 编号函数：纯函数，无状态，对所有合法序数全定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbering {
    sentinel_offset: u32,
}

impl Numbering {
    /// 参考目录使用的编号
    pub const REFERENCE: Numbering = Numbering::new(REFERENCE_SENTINEL_OFFSET);

    /// 错误号必须放得进 `i32`，序数与哨兵偏移都以此为上限
    pub const MAX_ORDINAL: u32 = i32::MAX as u32;

    pub const fn new(sentinel_offset: u32) -> Self {
        debug_assert!(sentinel_offset <= Self::MAX_ORDINAL, "sentinel offset out of range");
        Self { sentinel_offset }
    }

    #[inline]
    pub const fn sentinel_offset(&self) -> u32 {
        self.sentinel_offset
    }

    /// `ordinal - sentinel_offset`
    #[inline]
    pub const fn error_number(
        &self,
        ordinal: Ordinal,
    ) -> ErrorNumber {
        debug_assert!(ordinal.get() <= Self::MAX_ORDINAL, "ordinal out of range");
        ErrorNumber(ordinal.get() as i32 - self.sentinel_offset as i32)
    }

    /// `number + sentinel_offset`；结果为负时不是合法序数
    #[inline]
    pub const fn ordinal_from_error_number(
        &self,
        number: ErrorNumber,
    ) -> Option<Ordinal> {
        let ordinal = number.0 as i64 + self.sentinel_offset as i64;
        if ordinal < 0 || ordinal > u32::MAX as i64 {
            None
        } else {
            Some(Ordinal::new(ordinal as u32))
        }
    }
}

impl Default for Numbering {
    fn default() -> Self {
        Self::REFERENCE
    }
}
