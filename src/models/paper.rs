use crate::models::judgment::JudgmentRecord;

/// 一篇论文
///
/// 在语料加载时创建，`judgment` 只由评估流水线写入一次。
#[derive(Debug, Clone, PartialEq)]
pub struct PaperRecord {
    /// 显示用文件名
    pub filename: String,
    /// 完整路径，同一次运行内唯一
    pub filepath: String,
    /// 提取出的纯文本
    pub content: String,
    /// 评审结果，评估前为 None
    pub judgment: Option<JudgmentRecord>,
}

impl PaperRecord {
    pub fn new(
        filename: impl Into<String>,
        filepath: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            filepath: filepath.into(),
            content: content.into(),
            judgment: None,
        }
    }

    /// 是否满足纳入标准（未评审视为不满足）
    pub fn is_included(&self) -> bool {
        self.judgment
            .as_ref()
            .map(|j| j.meets_inclusion_criteria)
            .unwrap_or(false)
    }

    /// 总分（未评审视为 0）
    pub fn overall_score(&self) -> u32 {
        self.judgment.as_ref().map(|j| j.overall_score).unwrap_or(0)
    }
}
