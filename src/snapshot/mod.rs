//! 已发布目录的快照与演进检查
//!
//! 每次发布都把目录写成 JSON 快照并纳入版本控制。之后的目录必须与快照
//! 逐个序数比对：只允许在末尾追加新种类，或把活跃种类原地退役。
//! 删除、改名、重排、复活退役槽位、修改哨兵偏移都会被拒绝。

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::registry::{DiagnosticKind, ErrorNumber, Ordinal, Registry};

/// 当前快照格式版本
pub const SNAPSHOT_FORMAT: u32 = 1;

/// 默认快照位置（相对仓库根目录）
pub const DEFAULT_SNAPSHOT_PATH: &str = "catalog/error_message_ids.json";

/// 目录快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub format: u32,
    pub sentinel_offset: u32,
    pub entries: Vec<SnapshotEntry>,
}

/// 快照中的一个槽位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub ordinal: Ordinal,
    pub error_number: ErrorNumber,
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub sentinel: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub retired: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub former_name: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<&DiagnosticKind> for SnapshotEntry {
    fn from(kind: &DiagnosticKind) -> Self {
        Self {
            ordinal: kind.ordinal(),
            error_number: kind.error_number(),
            name: kind.name().to_string(),
            sentinel: kind.is_sentinel(),
            retired: kind.is_retired(),
            former_name: kind.former_name().map(str::to_string),
        }
    }
}

/// 快照读写错误
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot format {found} (expected {})", SNAPSHOT_FORMAT)]
    UnsupportedFormat { found: u32 },
}

impl CatalogSnapshot {
    /// 记录冻结后注册表的当前状态
    pub fn capture(registry: &Registry) -> Self {
        Self {
            format: SNAPSHOT_FORMAT,
            sentinel_offset: registry.numbering().sentinel_offset(),
            entries: registry.iter().map(SnapshotEntry::from).collect(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(text)?;
        if snapshot.format != SNAPSHOT_FORMAT {
            return Err(SnapshotError::UnsupportedFormat {
                found: snapshot.format,
            });
        }
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn save(
        &self,
        path: &Path,
    ) -> Result<(), SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(path, self.to_json()?).map_err(io_err)?;
        info!("wrote catalog snapshot with {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 两个目录版本之间允许的变化
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvolutionReport {
    /// 新追加的槽位
    pub appended: Vec<SnapshotEntry>,
    /// 本次退役的槽位
    pub retired: Vec<SnapshotEntry>,
}

impl EvolutionReport {
    pub fn is_unchanged(&self) -> bool {
        self.appended.is_empty() && self.retired.is_empty()
    }
}

/// 演进检查失败
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("diagnostic catalog breaks published numbering ({} violation(s))", .violations.len())]
pub struct EvolutionError {
    pub violations: Vec<EvolutionViolation>,
}

/// 违反演进规则的一处变化
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvolutionViolation {
    #[error("sentinel offset changed from {previous} to {current}")]
    SentinelOffsetChanged { previous: u32, current: u32 },

    #[error("published slot {ordinal} ('{name}') was removed")]
    Removed { ordinal: Ordinal, name: String },

    #[error("slot {ordinal} was renamed from '{previous}' to '{current}'")]
    Renamed {
        ordinal: Ordinal,
        previous: String,
        current: String,
    },

    #[error("'{name}' moved from slot {from} to slot {to}")]
    Moved {
        name: String,
        from: Ordinal,
        to: Ordinal,
    },

    #[error("retired slot {ordinal} was reused by '{name}'")]
    Revived { ordinal: Ordinal, name: String },

    #[error("'{name}' was retired at slot {retired_at} and cannot return at slot {ordinal}")]
    Republished {
        name: String,
        retired_at: Ordinal,
        ordinal: Ordinal,
    },

    #[error("slot {ordinal} ('{name}') changed its sentinel flag")]
    SentinelChanged { ordinal: Ordinal, name: String },

    #[error("slot {ordinal} changed error number from {previous} to {current}")]
    NumberChanged {
        ordinal: Ordinal,
        previous: ErrorNumber,
        current: ErrorNumber,
    },

    #[error("snapshot entry at position {position} carries ordinal {found}")]
    CorruptSnapshot { position: usize, found: Ordinal },
}

/// 将当前目录与上一个已发布快照逐序数比对
pub fn check_evolution(
    previous: &CatalogSnapshot,
    current: &Registry,
) -> Result<EvolutionReport, EvolutionError> {
    let mut violations = Vec::new();
    let mut report = EvolutionReport::default();

    let current_offset = current.numbering().sentinel_offset();
    if previous.sentinel_offset != current_offset {
        violations.push(EvolutionViolation::SentinelOffsetChanged {
            previous: previous.sentinel_offset,
            current: current_offset,
        });
    }

    for (position, old) in previous.entries.iter().enumerate() {
        if old.ordinal.index() != position {
            violations.push(EvolutionViolation::CorruptSnapshot {
                position,
                found: old.ordinal,
            });
            continue;
        }

        let Some(new) = current.lookup_by_ordinal(old.ordinal) else {
            violations.push(EvolutionViolation::Removed {
                ordinal: old.ordinal,
                name: old.name.clone(),
            });
            continue;
        };

        compare_slot(old, new, current, &mut violations, &mut report);
    }

    let retired_names: HashMap<&str, Ordinal> = previous
        .entries
        .iter()
        .filter(|e| e.retired)
        .filter_map(|e| e.former_name.as_deref().map(|name| (name, e.ordinal)))
        .collect();

    for new in current.iter().skip(previous.entries.len()) {
        let name = new.former_name().unwrap_or(new.name());
        if let Some(&retired_at) = retired_names.get(name) {
            violations.push(EvolutionViolation::Republished {
                name: name.to_string(),
                retired_at,
                ordinal: new.ordinal(),
            });
        }
        report.appended.push(SnapshotEntry::from(new));
    }

    if violations.is_empty() {
        info!(
            "catalog evolution ok: {} appended, {} retired",
            report.appended.len(),
            report.retired.len()
        );
        Ok(report)
    } else {
        for violation in &violations {
            warn!("{}", violation);
        }
        Err(EvolutionError { violations })
    }
}

fn compare_slot(
    old: &SnapshotEntry,
    new: &DiagnosticKind,
    current: &Registry,
    violations: &mut Vec<EvolutionViolation>,
    report: &mut EvolutionReport,
) {
    let ordinal = old.ordinal;

    if old.sentinel != new.is_sentinel() {
        violations.push(EvolutionViolation::SentinelChanged {
            ordinal,
            name: old.name.clone(),
        });
    }
    if old.error_number != new.error_number() {
        violations.push(EvolutionViolation::NumberChanged {
            ordinal,
            previous: old.error_number,
            current: new.error_number(),
        });
    }

    match (old.retired, new.is_retired()) {
        (true, true) => {
            let former = new.former_name().unwrap_or_default();
            if old.former_name.as_deref() != Some(former) {
                violations.push(EvolutionViolation::Renamed {
                    ordinal,
                    previous: old.former_name.clone().unwrap_or_default(),
                    current: former.to_string(),
                });
            }
        }
        (true, false) => violations.push(EvolutionViolation::Revived {
            ordinal,
            name: new.name().to_string(),
        }),
        (false, true) => {
            let former = new.former_name().unwrap_or_default();
            if former == old.name {
                report.retired.push(SnapshotEntry::from(new));
            } else {
                violations.push(EvolutionViolation::Renamed {
                    ordinal,
                    previous: old.name.clone(),
                    current: former.to_string(),
                });
            }
        }
        (false, false) if old.name == new.name() => {}
        (false, false) => match current.lookup_by_name(&old.name) {
            Some(moved) => violations.push(EvolutionViolation::Moved {
                name: old.name.clone(),
                from: ordinal,
                to: moved.ordinal(),
            }),
            None => violations.push(EvolutionViolation::Renamed {
                ordinal,
                previous: old.name.clone(),
                current: new.name().to_string(),
            }),
        },
    }
}
