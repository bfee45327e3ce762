//! 错误文档索引
//!
//! 每个已发布的错误号对应一个帮助页面 `<base>/<number>`。
//! [`generate_docs`] 为缺失的页面生成骨架（已有页面不覆盖，
//! 它们的解释文字由维护者编写），并重写 `index.md`。

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::registry::{DiagnosticKind, ErrorNumber, Registry};

/// 文档根路径的默认值
pub const DEFAULT_DOCS_BASE: &str = "docs/errors";

/// 错误号对应的文档路径，如 `docs/errors/42`
pub fn doc_path(
    base: &str,
    number: ErrorNumber,
) -> String {
    format!("{}/{}", base.trim_end_matches('/'), number.get())
}

/// 文档生成错误
#[derive(Debug, Error)]
#[error("failed to write documentation to {}: {source}", .path.display())]
pub struct DocsError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// 生成结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocsSummary {
    /// 新建的页面
    pub created: usize,
    /// 已存在、保留原样的页面
    pub kept: usize,
    /// 索引中列出的退役槽位
    pub retired: usize,
}

/// 为注册表生成文档骨架与索引
pub fn generate_docs(
    registry: &Registry,
    dir: &Path,
) -> Result<DocsSummary, DocsError> {
    fs::create_dir_all(dir).map_err(io_err(dir))?;

    let mut summary = DocsSummary::default();
    for kind in registry.active() {
        let page = dir.join(format!("{}.md", kind.error_number().get()));
        if page.exists() {
            summary.kept += 1;
            continue;
        }
        debug!("create help page {}", page.display());
        fs::write(&page, render_page(kind)).map_err(io_err(page.as_path()))?;
        summary.created += 1;
    }
    summary.retired = registry.iter().filter(|k| k.is_retired()).count();

    let index = dir.join("index.md");
    fs::write(&index, render_index(registry)).map_err(io_err(index.as_path()))?;

    info!(
        "documentation in {}: {} created, {} kept, {} retired",
        dir.display(),
        summary.created,
        summary.kept,
        summary.retired
    );
    Ok(summary)
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> DocsError {
    let path = path.to_path_buf();
    move |source| DocsError { path, source }
}

fn render_page(kind: &DiagnosticKind) -> String {
    let mut page = String::new();
    let code = kind.code().unwrap_or_default();
    let _ = writeln!(page, "# {}: {}", code, kind.name());
    let _ = writeln!(page);
    let _ = writeln!(page, "- Error number: {}", kind.error_number().get());
    let _ = writeln!(page, "- Ordinal: {}", kind.ordinal().get());
    let _ = writeln!(page);
    let _ = writeln!(page, "## Explanation");
    let _ = writeln!(page);
    let _ = writeln!(page, "No explanation has been written for this error yet.");
    page
}

fn render_index(registry: &Registry) -> String {
    let mut index = String::new();
    let _ = writeln!(index, "# Error index");
    let _ = writeln!(index);
    let _ = writeln!(index, "| Code | Name | Status |");
    let _ = writeln!(index, "|------|------|--------|");

    for kind in registry.iter().filter(|k| !k.is_sentinel()) {
        let code = kind.error_number().code().unwrap_or_default();
        if kind.is_retired() {
            let former = kind.former_name().unwrap_or("?");
            let _ = writeln!(index, "| {} | ~~{}~~ | retired |", code, former);
        } else {
            let _ = writeln!(
                index,
                "| [{}]({}.md) | {} | active |",
                code,
                kind.error_number().get(),
                kind.name()
            );
        }
    }
    index
}
