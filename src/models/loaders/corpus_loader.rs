use crate::infrastructure::pdf_extractor;
use crate::models::paper::PaperRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 递归扫描目录，加载所有 PDF 论文
///
/// - 深度优先；同一目录下的条目按路径字典序处理，保证多次运行顺序一致
/// - 扩展名 `.pdf` 不区分大小写
/// - 提取不到文本的文件不记录
/// - 无法列出的目录记录警告后跳过，继续处理其兄弟目录
/// - 不跟随目录符号链接
///
/// 没有找到任何论文时返回空列表，由调用方按"无事可做"处理。
pub fn load_corpus(root_directory: &Path, max_pages: usize) -> Vec<PaperRecord> {
    info!(
        "📁 正在扫描 {} 及其所有子目录中的论文...",
        root_directory.display()
    );

    let mut papers = Vec::new();

    // 显式栈：每层保存一个已排序目录的剩余条目
    let mut stack: Vec<std::vec::IntoIter<PathBuf>> = Vec::new();
    if let Some(entries) = list_directory(root_directory) {
        stack.push(entries.into_iter());
    }

    while let Some(entries) = stack.last_mut() {
        let Some(path) = entries.next() else {
            stack.pop();
            continue;
        };

        let is_dir = fs::symlink_metadata(&path)
            .map(|m| m.file_type().is_dir())
            .unwrap_or(false);

        if is_dir {
            if let Some(children) = list_directory(&path) {
                stack.push(children.into_iter());
            }
            continue;
        }

        if !is_pdf(&path) {
            continue;
        }

        info!("正在处理: {}", path.display());
        let content = pdf_extractor::extract_text(&path, Some(max_pages));

        if content.trim().is_empty() {
            warn!("⚠️ 未提取到文本，跳过: {}", path.display());
            continue;
        }

        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        debug!("{}: 提取 {} 个字符", filename, content.chars().count());

        papers.push(PaperRecord::new(
            filename,
            path.display().to_string(),
            content,
        ));
    }

    info!(
        "✓ 从 {} 及其子目录加载了 {} 篇论文",
        root_directory.display(),
        papers.len()
    );

    papers
}

/// 列出目录条目并按路径排序，失败时记录警告并返回 None
fn list_directory(directory: &Path) -> Option<Vec<PathBuf>> {
    let read_dir = match fs::read_dir(directory) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!("⚠️ 无法访问目录 {}: {}", directory.display(), e);
            return None;
        }
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(entry) => entries.push(entry.path()),
            Err(e) => warn!("⚠️ 读取目录条目失败 {}: {}", directory.display(), e),
        }
    }
    entries.sort();
    Some(entries)
}

fn is_pdf(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::pdf_fixtures::write_text_pdf;

    #[test]
    fn test_is_pdf_case_insensitive() {
        assert!(is_pdf(Path::new("a/b/paper.pdf")));
        assert!(is_pdf(Path::new("paper.PDF")));
        assert!(is_pdf(Path::new("paper.Pdf")));
        assert!(!is_pdf(Path::new("paper.pdf.txt")));
        assert!(!is_pdf(Path::new("notes.md")));
    }

    #[test]
    fn test_load_nested_directories_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("b_sub/deeper")).unwrap();
        std::fs::create_dir_all(root.join("a_sub")).unwrap();

        write_text_pdf(&root.join("c.pdf"), &["Paper C"]);
        write_text_pdf(&root.join("a_sub/x.PDF"), &["Paper X"]);
        write_text_pdf(&root.join("b_sub/deeper/y.pdf"), &["Paper Y"]);
        write_text_pdf(&root.join("b_sub/z.pdf"), &["Paper Z"]);
        std::fs::write(root.join("readme.txt"), "not a paper").unwrap();

        let papers = load_corpus(root, 10);
        let names: Vec<&str> = papers.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, vec!["x.PDF", "y.pdf", "z.pdf", "c.pdf"]);
        assert!(papers.iter().all(|p| !p.content.trim().is_empty()));
        assert!(papers.iter().all(|p| p.judgment.is_none()));
        assert!(papers[1].filepath.ends_with("y.pdf"));
    }

    #[test]
    fn test_load_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.pdf", "c.pdf"] {
            write_text_pdf(&dir.path().join(name), &[name]);
        }

        let first: Vec<String> = load_corpus(dir.path(), 10)
            .into_iter()
            .map(|p| p.filepath)
            .collect();
        let second: Vec<String> = load_corpus(dir.path(), 10)
            .into_iter()
            .map(|p| p.filepath)
            .collect();
        assert_eq!(first, second);
        assert!(first[0].ends_with("a.pdf"));
    }

    #[test]
    fn test_page_cap_applied() {
        let dir = tempfile::tempdir().unwrap();
        write_text_pdf(&dir.path().join("long.pdf"), &["First", "Second", "Third"]);

        let papers = load_corpus(dir.path(), 1);
        assert_eq!(papers.len(), 1);
        assert!(papers[0].content.contains("First"));
        assert!(!papers[0].content.contains("Third"));
    }

    #[test]
    fn test_corrupt_pdf_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        write_text_pdf(&dir.path().join("good.pdf"), &["Valid paper"]);
        std::fs::write(dir.path().join("bad.pdf"), b"garbage bytes").unwrap();

        let papers = load_corpus(dir.path(), 10);
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].filename, "good.pdf");
    }

    #[test]
    fn test_empty_directory_yields_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        assert!(load_corpus(dir.path(), 10).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_text_pdf(&root.join("a_first.pdf"), &["Paper A"]);
        let locked = root.join("b_locked");
        std::fs::create_dir(&locked).unwrap();
        write_text_pdf(&locked.join("hidden.pdf"), &["Hidden"]);
        write_text_pdf(&root.join("c_last.pdf"), &["Paper C"]);

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
        // root 用户仍可读取，此时无法构造不可访问的目录
        if std::fs::read_dir(&locked).is_ok() {
            std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let papers = load_corpus(root, 10);
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        let names: Vec<&str> = papers.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, vec!["a_first.pdf", "c_last.pdf"]);
    }

    #[test]
    fn test_missing_root_yields_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_corpus(&dir.path().join("missing"), 10).is_empty());
    }
}
