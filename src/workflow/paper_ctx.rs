/// 论文处理上下文
///
/// 只携带日志需要的位置信息，不持有论文本身。
#[derive(Debug, Clone)]
pub struct PaperCtx {
    /// 论文序号（从 1 开始）
    pub paper_index: usize,
    /// 本批论文总数
    pub total: usize,
    /// 显示用文件名
    pub filename: String,
}

impl PaperCtx {
    pub fn new(paper_index: usize, total: usize, filename: impl Into<String>) -> Self {
        Self {
            paper_index,
            total,
            filename: filename.into(),
        }
    }
}
