use serde::{Deserialize, Serialize};

/// 系统文献综述（SLR）评审标准
///
/// 整次运行固定不变，启动时加载一次。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlrRubric {
    pub title: String,
    pub research_questions: Vec<String>,
    pub inclusion_criteria: Vec<String>,
    pub exclusion_criteria: Vec<String>,
    pub time_period: String,
    pub data_extraction_fields: Vec<String>,
    /// 报告标题用的简称，为空时使用 `title`
    #[serde(default)]
    pub short_title: String,
    /// 每个研究问题的主题标签，与 `research_questions` 按位置对应
    #[serde(default)]
    pub research_question_topics: Vec<String>,
}

impl Default for SlrRubric {
    /// 内置的医疗 AI 实施综述标准
    fn default() -> Self {
        Self {
            title: "Healthcare AI Implementation Analysis: A Systematic Literature Review"
                .to_string(),
            research_questions: to_strings(&[
                "RQ1: What are the current implementations and applications of AI technologies across different healthcare domains?",
                "RQ2: How do AI-driven systems impact clinical decision-making and patient care outcomes?",
                "RQ3: What are the key challenges and success factors in implementing AI solutions in healthcare settings?",
            ]),
            inclusion_criteria: to_strings(&[
                "IC1: Studies focusing on practical AI implementation in healthcare settings",
                "IC2: Research presenting empirical evidence or case studies of AI applications",
                "IC3: Papers discussing technical implementation details or deployment strategies",
            ]),
            exclusion_criteria: to_strings(&[
                "EC1: Non-peer-reviewed materials (books, keynotes, technical reports, theses)",
                "EC2: Literature reviews or survey papers",
                "EC3: Duplicate studies or similar papers by same authors",
                "EC4: Theoretical papers without practical implementation",
                "EC5: Studies not focused on healthcare applications",
                "EC6: Grey literature, editorials, or opinion pieces",
            ]),
            time_period: "2019-2025".to_string(),
            data_extraction_fields: to_strings(&[
                "AI techniques used",
                "Healthcare domain",
                "Implementation scope",
                "Technical infrastructure",
                "Performance metrics",
                "Clinical impact",
                "Implementation challenges",
                "Success factors",
            ]),
            short_title: "Healthcare AI Implementation".to_string(),
            research_question_topics: to_strings(&[
                "AI Implementations",
                "Clinical Impact",
                "Challenges & Success Factors",
            ]),
        }
    }
}

impl SlrRubric {
    /// 序列化为评审提示词中使用的描述文本
    pub fn describe(&self) -> String {
        format!(
            "SYSTEMATIC LITERATURE REVIEW INFORMATION:\n\
             Title: {}\n\n\
             Research Questions:\n{}\n\n\
             Inclusion Criteria:\n{}\n\n\
             Exclusion Criteria:\n{}\n\n\
             Time Period: {}\n\n\
             Data Extraction Fields: {}",
            self.title,
            self.research_questions.join("\n"),
            self.inclusion_criteria.join("\n"),
            self.exclusion_criteria.join("\n"),
            self.time_period,
            self.data_extraction_fields.join(", "),
        )
    }
}

impl SlrRubric {
    /// 报告中使用的标题
    pub fn display_title(&self) -> &str {
        if self.short_title.trim().is_empty() {
            &self.title
        } else {
            &self.short_title
        }
    }

    /// 第 `index` 个研究问题的标签，如 `RQ1 (AI Implementations)`
    pub fn research_question_label(&self, index: usize) -> String {
        match self.research_question_topics.get(index) {
            Some(topic) if !topic.trim().is_empty() => format!("RQ{} ({})", index + 1, topic),
            _ => format!("RQ{}", index + 1),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
