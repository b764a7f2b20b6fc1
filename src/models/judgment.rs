use serde::{Deserialize, Serialize};

/// 评审建议
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(alias = "include", alias = "INCLUDE")]
    Include,
    #[serde(alias = "exclude", alias = "EXCLUDE")]
    Exclude,
    /// 评审调用失败时由流水线写入，LLM 不会返回此值
    Error,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Include => "Include",
            Recommendation::Exclude => "Exclude",
            Recommendation::Error => "Error",
        }
    }
}

/// 单篇论文的评审结果
///
/// 字段名与评审服务返回的 JSON 完全一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentRecord {
    pub meets_inclusion_criteria: bool,
    pub inclusion_justification: String,
    pub relevance_to_rq1: u32,
    pub relevance_to_rq2: u32,
    pub relevance_to_rq3: u32,
    pub implementation_quality: u32,
    pub paper_summary: String,
    pub ai_techniques: Vec<String>,
    pub healthcare_domain: String,
    pub implementation_details: String,
    pub key_findings: String,
    pub challenges_identified: Vec<String>,
    pub success_factors: Vec<String>,
    pub overall_score: u32,
    pub recommendation: Recommendation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JudgmentRecord {
    /// 评审失败时的占位结果：不纳入、0 分、建议为 Error
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            meets_inclusion_criteria: false,
            inclusion_justification: String::new(),
            relevance_to_rq1: 0,
            relevance_to_rq2: 0,
            relevance_to_rq3: 0,
            implementation_quality: 0,
            paper_summary: String::new(),
            ai_techniques: Vec::new(),
            healthcare_domain: String::new(),
            implementation_details: String::new(),
            key_findings: String::new(),
            challenges_identified: Vec::new(),
            success_factors: Vec::new(),
            overall_score: 0,
            recommendation: Recommendation::Error,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.recommendation == Recommendation::Error
    }

    /// 检查所有分数在 0-100 之间
    pub fn validate_scores(&self) -> Result<(), String> {
        let scores = [
            ("relevance_to_rq1", self.relevance_to_rq1),
            ("relevance_to_rq2", self.relevance_to_rq2),
            ("relevance_to_rq3", self.relevance_to_rq3),
            ("implementation_quality", self.implementation_quality),
            ("overall_score", self.overall_score),
        ];
        for (name, value) in scores {
            if value > 100 {
                return Err(format!("{} = {} 超出范围 [0, 100]", name, value));
            }
        }
        Ok(())
    }

    /// 纳入标志与建议是否一致（仅用于日志，不参与排序）
    pub fn is_consistent(&self) -> bool {
        self.meets_inclusion_criteria == (self.recommendation == Recommendation::Include)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_judgment_shape() {
        let judgment = JudgmentRecord::from_error("quota exceeded");
        assert!(!judgment.meets_inclusion_criteria);
        assert_eq!(judgment.overall_score, 0);
        assert_eq!(judgment.recommendation, Recommendation::Error);
        assert_eq!(judgment.error.as_deref(), Some("quota exceeded"));
        assert!(judgment.is_error());
    }

    #[test]
    fn test_error_field_is_omitted_when_absent() {
        let mut judgment = JudgmentRecord::from_error("x");
        judgment.error = None;
        let json = serde_json::to_string(&judgment).unwrap();
        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"recommendation\":\"Error\""));
    }

    #[test]
    fn test_validate_scores_range() {
        let mut judgment = JudgmentRecord::from_error("x");
        assert!(judgment.validate_scores().is_ok());
        judgment.relevance_to_rq2 = 101;
        let err = judgment.validate_scores().unwrap_err();
        assert!(err.contains("relevance_to_rq2"));
    }

    #[test]
    fn test_recommendation_accepts_lowercase() {
        let rec: Recommendation = serde_json::from_str("\"include\"").unwrap();
        assert_eq!(rec, Recommendation::Include);
        assert!(serde_json::from_str::<Recommendation>("\"Maybe\"").is_err());
    }

    #[test]
    fn test_consistency_flag() {
        let mut judgment = JudgmentRecord::from_error("x");
        judgment.error = None;
        judgment.recommendation = Recommendation::Exclude;
        assert!(judgment.is_consistent());
        judgment.meets_inclusion_criteria = true;
        assert!(!judgment.is_consistent());
    }
}
