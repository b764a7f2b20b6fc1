//! 评审服务 - 业务能力层
//!
//! 只负责"按评审标准给一篇论文打分"能力：构建提示词、调用 LLM、解析结构化结果。
//! 不关心论文从哪里来，也不处理失败后的兜底。

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::config::Config;
use crate::error::JudgeError;
use crate::models::judgment::{JudgmentRecord, Recommendation};
use crate::models::rubric::SlrRubric;
use crate::services::llm_service::LlmService;

/// 评审者
///
/// 输入评审标准与论文节选，返回结构化评审结果；
/// 任何调用失败或不符合结构的响应都以 `Err` 返回，由流水线决定如何兜底。
#[allow(async_fn_in_trait)]
pub trait Judge {
    async fn judge(&self, rubric: &SlrRubric, excerpt: &str)
        -> Result<JudgmentRecord, JudgeError>;
}

/// 基于 LLM 的评审者
pub struct LlmJudge {
    llm_service: LlmService,
}

impl LlmJudge {
    pub fn new(config: &Config) -> Self {
        Self {
            llm_service: LlmService::new(config),
        }
    }

    pub fn model_name(&self) -> &str {
        self.llm_service.model_name()
    }
}

impl Judge for LlmJudge {
    async fn judge(
        &self,
        rubric: &SlrRubric,
        excerpt: &str,
    ) -> Result<JudgmentRecord, JudgeError> {
        let (user_message, system_message) = build_judge_messages(rubric, excerpt);

        let response = self
            .llm_service
            .send_to_llm(&user_message, Some(&system_message))
            .await?;

        debug!("评审响应长度: {} 字符", response.len());

        parse_judgment_response(&response)
    }
}

/// 构建评审消息
///
/// 返回 (user_message, system_message)
pub fn build_judge_messages(rubric: &SlrRubric, excerpt: &str) -> (String, String) {
    let system_message = format!(
        r#"You are an expert reviewer for a systematic literature review. Your task is to evaluate
research papers for inclusion in the review described below.

{rubric}

Analyze the paper content to determine:
1. If it meets the inclusion criteria and avoids exclusion criteria
2. How well it addresses each research question (RQ1, RQ2, RQ3)
3. The quality and relevance of the implementation details
4. The overall value for this specific literature review

Output your analysis as a JSON object with the following structure:
{{
  "meets_inclusion_criteria": true/false,
  "inclusion_justification": "Brief explanation of why it meets or fails inclusion criteria",
  "relevance_to_rq1": 0-100 score,
  "relevance_to_rq2": 0-100 score,
  "relevance_to_rq3": 0-100 score,
  "implementation_quality": 0-100 score,
  "paper_summary": "2-3 sentence summary of the paper",
  "ai_techniques": ["technique1", "technique2"],
  "healthcare_domain": "The specific domain addressed",
  "implementation_details": "Brief description of implementation approach",
  "key_findings": "Brief summary of key findings",
  "challenges_identified": ["challenge1", "challenge2"],
  "success_factors": ["factor1", "factor2"],
  "overall_score": 0-100 score,
  "recommendation": "Include" or "Exclude"
}}

Return ONLY the JSON object, with integer scores and no additional text."#,
        rubric = rubric.describe()
    );

    let user_message = format!(
        "Here is a research paper to analyze (extracted content from the beginning of the paper):\n\n{}",
        excerpt
    );

    (user_message, system_message)
}

/// 解析评审响应
///
/// 接受纯 JSON 或被 Markdown 代码块包裹的 JSON；缺字段、分数越界、
/// 建议为 "Error" 都视为不符合结构。
pub fn parse_judgment_response(response: &str) -> Result<JudgmentRecord, JudgeError> {
    let json = strip_code_fence(response);

    let judgment: JudgmentRecord =
        serde_json::from_str(json).map_err(|e| JudgeError::MalformedResponse {
            reason: format!("JSON解析失败: {}", e),
        })?;

    judgment
        .validate_scores()
        .map_err(|reason| JudgeError::MalformedResponse { reason })?;

    if judgment.recommendation == Recommendation::Error {
        return Err(JudgeError::MalformedResponse {
            reason: "recommendation 只能是 Include 或 Exclude".to_string(),
        });
    }
    if judgment.error.is_some() {
        return Err(JudgeError::MalformedResponse {
            reason: "响应中不应包含 error 字段".to_string(),
        });
    }

    Ok(judgment)
}

/// 去掉 LLM 常见的 ```json ... ``` 包裹
fn strip_code_fence(response: &str) -> &str {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| {
        Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").expect("valid fence regex")
    });

    let trimmed = response.trim();
    match fence.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RESPONSE: &str = r#"{
        "meets_inclusion_criteria": true,
        "inclusion_justification": "Deployed sepsis alert in two hospitals",
        "relevance_to_rq1": 80,
        "relevance_to_rq2": 70,
        "relevance_to_rq3": 60,
        "implementation_quality": 75,
        "paper_summary": "A deployed early-warning model.",
        "ai_techniques": ["Gradient boosting", "NLP"],
        "healthcare_domain": "Critical care",
        "implementation_details": "EHR-integrated alerting",
        "key_findings": "Mortality dropped",
        "challenges_identified": ["Alert fatigue"],
        "success_factors": ["Clinician buy-in"],
        "overall_score": 78,
        "recommendation": "Include"
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let judgment = parse_judgment_response(VALID_RESPONSE).unwrap();
        assert!(judgment.meets_inclusion_criteria);
        assert_eq!(judgment.overall_score, 78);
        assert_eq!(judgment.ai_techniques, vec!["Gradient boosting", "NLP"]);
        assert_eq!(judgment.recommendation, Recommendation::Include);
        assert!(judgment.error.is_none());
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{}\n```", VALID_RESPONSE);
        let judgment = parse_judgment_response(&fenced).unwrap();
        assert_eq!(judgment.healthcare_domain, "Critical care");

        let bare_fence = format!("```\n{}\n```", VALID_RESPONSE);
        assert!(parse_judgment_response(&bare_fence).is_ok());
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let response = r#"{"meets_inclusion_criteria": true, "overall_score": 90}"#;
        assert!(matches!(
            parse_judgment_response(response),
            Err(JudgeError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range_score() {
        let response = VALID_RESPONSE.replace("\"overall_score\": 78", "\"overall_score\": 178");
        let err = parse_judgment_response(&response).unwrap_err();
        assert!(err.to_string().contains("overall_score"));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_judgment_response("I think this paper is great.").is_err());
    }

    #[test]
    fn test_parse_rejects_error_recommendation() {
        let response = VALID_RESPONSE.replace("\"Include\"", "\"Error\"");
        assert!(parse_judgment_response(&response).is_err());
    }

    #[test]
    fn test_parse_keeps_inconsistent_recommendation() {
        let response = VALID_RESPONSE.replace("\"Include\"", "\"Exclude\"");
        let judgment = parse_judgment_response(&response).unwrap();
        assert!(judgment.meets_inclusion_criteria);
        assert_eq!(judgment.recommendation, Recommendation::Exclude);
        assert!(!judgment.is_consistent());
    }

    #[test]
    fn test_messages_carry_rubric_and_excerpt() {
        let rubric = SlrRubric::default();
        let (user, system) = build_judge_messages(&rubric, "ABSTRACT: We deployed a model.");
        assert!(system.contains("SYSTEMATIC LITERATURE REVIEW INFORMATION"));
        assert!(system.contains("RQ3: What are the key challenges"));
        assert!(system.contains("\"overall_score\": 0-100 score"));
        assert!(user.ends_with("ABSTRACT: We deployed a model."));
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
