//! 诊断种类注册表
//!
//! 两个阶段：
//!
//! - 构建阶段：[`RegistryBuilder`] 按固定顺序追加（[`RegistryBuilder::register`]）
//!   或原地退役（[`RegistryBuilder::retire`]），只由一个初始化者顺序调用
//! - 冻结阶段：[`RegistryBuilder::finish`] 运行一致性检查后得到只读的 [`Registry`]，
//!   查找无锁、无分配，可被任意多个线程共享
//!
//! # 示例
//!
//! ```
//! use errid::registry::{Numbering, RegistryBuilder};
//!
//! let mut builder = RegistryBuilder::new(Numbering::REFERENCE);
//! builder.register_sentinel("LazyError").unwrap();
//! builder.register_sentinel("NoExplanation").unwrap();
//! builder.register("TypeMismatch").unwrap();
//! let registry = builder.finish().unwrap();
//!
//! let kind = registry.lookup_by_name("TypeMismatch").unwrap();
//! assert_eq!(kind.error_number().get(), 0);
//! ```

pub mod error;
pub mod kind;
pub mod numbering;
pub mod validate;

pub use error::{RegistryError, ValidationError, Violation};
pub use kind::{is_valid_name, placeholder_name, DiagnosticKind, KindClass, Ordinal};
pub use numbering::{ErrorNumber, Numbering, REFERENCE_SENTINEL_OFFSET};

use std::borrow::Cow;

use hashbrown::HashMap;
use tracing::{debug, info};

/// 构建阶段的注册表（仅追加）
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    numbering: Numbering,
    entries: Vec<DiagnosticKind>,
    by_name: HashMap<Cow<'static, str>, Ordinal>,
    /// 退役前的名称及其槽位，禁止再次注册
    retired_names: HashMap<Cow<'static, str>, Ordinal>,
}

impl RegistryBuilder {
    pub fn new(numbering: Numbering) -> Self {
        Self {
            numbering,
            entries: Vec::new(),
            by_name: HashMap::new(),
            retired_names: HashMap::new(),
        }
    }

    pub fn with_capacity(
        numbering: Numbering,
        capacity: usize,
    ) -> Self {
        Self {
            numbering,
            entries: Vec::with_capacity(capacity),
            by_name: HashMap::with_capacity(capacity),
            retired_names: HashMap::new(),
        }
    }

    #[inline]
    pub fn numbering(&self) -> Numbering {
        self.numbering
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 追加一个诊断种类，序数 = 当前长度
    pub fn register(
        &mut self,
        name: impl Into<Cow<'static, str>>,
    ) -> Result<&DiagnosticKind, RegistryError> {
        self.push(name.into(), KindClass::Diagnostic)
    }

    /// 追加一个哨兵种类
    pub fn register_sentinel(
        &mut self,
        name: impl Into<Cow<'static, str>>,
    ) -> Result<&DiagnosticKind, RegistryError> {
        self.push(name.into(), KindClass::Sentinel)
    }

    fn push(
        &mut self,
        name: Cow<'static, str>,
        class: KindClass,
    ) -> Result<&DiagnosticKind, RegistryError> {
        // 所有检查都在修改之前完成，失败时注册表保持不变
        if !is_valid_name(&name) {
            return Err(RegistryError::InvalidName(name.into_owned()));
        }
        if let Some(&ordinal) = self.by_name.get(&*name) {
            return Err(RegistryError::DuplicateName {
                name: name.into_owned(),
                ordinal,
            });
        }
        if let Some(&ordinal) = self.retired_names.get(&*name) {
            return Err(RegistryError::DuplicateName {
                name: name.into_owned(),
                ordinal,
            });
        }

        let ordinal = u32::try_from(self.entries.len())
            .ok()
            .filter(|&n| n <= Numbering::MAX_ORDINAL)
            .map(Ordinal::new)
            .ok_or(RegistryError::Exhausted(self.entries.len()))?;
        let error_number = self.numbering.error_number(ordinal);
        debug!("register {} at ordinal {} ({})", name, ordinal, error_number);

        self.by_name.insert(name.clone(), ordinal);
        self.entries
            .push(DiagnosticKind::new(name, ordinal, error_number, class));
        Ok(&self.entries[ordinal.index()])
    }

    /// 原地退役：保留序数，改名为不可能被再次注册的占位名
    pub fn retire(
        &mut self,
        name: &str,
    ) -> Result<&DiagnosticKind, RegistryError> {
        let ordinal = match self.by_name.get(name) {
            Some(&ordinal) => ordinal,
            None if self.retired_names.contains_key(name) => {
                return Err(RegistryError::AlreadyRetired(name.to_string()))
            }
            None => return Err(RegistryError::UnknownName(name.to_string())),
        };

        let entry = &self.entries[ordinal.index()];
        if entry.is_sentinel() {
            return Err(RegistryError::RetiredSentinel(name.to_string()));
        }
        if entry.is_retired() {
            return Err(RegistryError::AlreadyRetired(name.to_string()));
        }

        let (former, _) = self
            .by_name
            .remove_entry(name)
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))?;
        let placeholder: Cow<'static, str> = Cow::Owned(placeholder_name(ordinal));
        debug!("retire {} at ordinal {} as {}", former, ordinal, placeholder);

        self.by_name.insert(placeholder.clone(), ordinal);
        self.retired_names.insert(former.clone(), ordinal);

        let entry = &mut self.entries[ordinal.index()];
        entry.retired = true;
        entry.former_name = Some(former);
        entry.name = placeholder;
        Ok(entry)
    }

    /// 运行一致性检查并冻结
    pub fn finish(self) -> Result<Registry, RegistryError> {
        validate::validate(&self.entries, self.numbering)?;

        let by_number = self
            .entries
            .iter()
            .map(|e| (e.error_number, e.ordinal))
            .collect();
        info!(
            "diagnostic registry frozen with {} kind(s), {} retired",
            self.entries.len(),
            self.entries.iter().filter(|e| e.is_retired()).count()
        );

        Ok(Registry {
            numbering: self.numbering,
            entries: self.entries,
            by_name: self.by_name,
            by_number,
        })
    }
}

/// 冻结后的只读注册表
#[derive(Debug, Clone)]
pub struct Registry {
    numbering: Numbering,
    entries: Vec<DiagnosticKind>,
    by_name: HashMap<Cow<'static, str>, Ordinal>,
    by_number: HashMap<ErrorNumber, Ordinal>,
}

impl Registry {
    #[inline]
    pub fn numbering(&self) -> Numbering {
        self.numbering
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按序数排列的全部条目（含哨兵与退役槽位）
    #[inline]
    pub fn entries(&self) -> &[DiagnosticKind] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticKind> {
        self.entries.iter()
    }

    /// 未退役的真正诊断
    pub fn active(&self) -> impl Iterator<Item = &DiagnosticKind> {
        self.entries
            .iter()
            .filter(|e| !e.is_retired() && !e.is_sentinel())
    }

    pub fn lookup_by_name(
        &self,
        name: &str,
    ) -> Option<&DiagnosticKind> {
        self.by_name
            .get(name)
            .map(|ordinal| &self.entries[ordinal.index()])
    }

    pub fn lookup_by_ordinal(
        &self,
        ordinal: Ordinal,
    ) -> Option<&DiagnosticKind> {
        self.entries.get(ordinal.index())
    }

    pub fn lookup_by_error_number(
        &self,
        number: ErrorNumber,
    ) -> Option<&DiagnosticKind> {
        self.by_number
            .get(&number)
            .map(|ordinal| &self.entries[ordinal.index()])
    }

    pub fn resolve_name(
        &self,
        name: &str,
    ) -> Result<&DiagnosticKind, RegistryError> {
        self.lookup_by_name(name)
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))
    }

    pub fn resolve_ordinal(
        &self,
        ordinal: Ordinal,
    ) -> Result<&DiagnosticKind, RegistryError> {
        self.lookup_by_ordinal(ordinal)
            .ok_or(RegistryError::UnknownOrdinal(ordinal))
    }

    pub fn resolve_error_number(
        &self,
        number: ErrorNumber,
    ) -> Result<&DiagnosticKind, RegistryError> {
        self.lookup_by_error_number(number)
            .ok_or(RegistryError::UnknownErrorNumber(number))
    }

    /// 按名称、错误码（`E042`）或错误号（`42`、`-1`）查找
    pub fn resolve(
        &self,
        query: &str,
    ) -> Result<&DiagnosticKind, RegistryError> {
        let query = query.trim();
        if let Some(kind) = self.lookup_by_name(query) {
            return Ok(kind);
        }
        if let Some(number) = ErrorNumber::parse_code(query) {
            return self.resolve_error_number(number);
        }
        if let Ok(number) = query.parse::<i32>() {
            return self.resolve_error_number(ErrorNumber::new(number));
        }
        Err(RegistryError::UnknownName(query.to_string()))
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a DiagnosticKind;
    type IntoIter = std::slice::Iter<'a, DiagnosticKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
