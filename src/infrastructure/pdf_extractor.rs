//! PDF 文本提取 - 基础设施层
//!
//! 只负责"把一个 PDF 变成纯文本"，失败时返回空字符串并记录日志。

use crate::error::ExtractError;
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

/// 提取 PDF 文本（失败返回空字符串）
///
/// # 参数
/// - `path`: PDF 文件路径
/// - `max_pages`: 最多读取的页数，`None` 表示全部
///
/// # 返回
/// 按页顺序拼接的文本，每页之后追加一个换行；任何读取或解析失败都返回空字符串
pub fn extract_text(path: &Path, max_pages: Option<usize>) -> String {
    match try_extract_text(path, max_pages) {
        Ok(text) => text,
        Err(e) => {
            warn!("⚠️ PDF 文本提取失败 {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// 提取 PDF 文本，保留失败原因
pub fn try_extract_text(path: &Path, max_pages: Option<usize>) -> Result<String, ExtractError> {
    let doc = Document::load(path).map_err(|e| ExtractError::LoadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    // get_pages 返回 BTreeMap，页码天然有序
    let pages = doc.get_pages();
    let page_count = pages.len();
    let pages_to_read = max_pages.map_or(page_count, |cap| cap.min(page_count));

    debug!(
        "读取 {} 的前 {}/{} 页",
        path.display(),
        pages_to_read,
        page_count
    );

    let mut text = String::new();
    for (&page_number, _) in pages.iter().take(pages_to_read) {
        let page_text = doc
            .extract_text(&[page_number])
            .map_err(|e| ExtractError::PageFailed {
                path: path.display().to_string(),
                page: page_number,
                message: e.to_string(),
            })?;
        text.push_str(&page_text);
        text.push('\n');
    }

    Ok(text)
}
