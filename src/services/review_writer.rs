//! 详细综述报告 - 业务能力层
//!
//! 只负责"把排序后的纳入论文与汇总统计写成 Markdown"能力

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::ReportError;
use crate::models::paper::PaperRecord;
use crate::models::rubric::SlrRubric;
use crate::ranking::{Aggregates, FrequencyTable};

/// 默认文件名
pub const REVIEW_FILE: &str = "healthcare_ai_detailed_review.md";
/// 常见挑战只列出前 10 项
const TOP_CHALLENGES: usize = 10;

/// 详细综述写入服务
pub struct ReviewWriter {
    path: PathBuf,
    top_n: usize,
}

impl ReviewWriter {
    pub fn in_dir(output_dir: &Path, top_n: usize) -> Self {
        Self {
            path: output_dir.join(REVIEW_FILE),
            top_n,
        }
    }

    /// 写入详细综述
    ///
    /// 没有纳入论文时不写文件，返回 `Ok(None)`
    pub fn write(
        &self,
        rubric: &SlrRubric,
        ranked: &[&PaperRecord],
        aggregates: &Aggregates,
    ) -> Result<Option<PathBuf>, ReportError> {
        if ranked.is_empty() {
            warn!("⚠️ 没有论文满足纳入标准，跳过详细综述");
            return Ok(None);
        }

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let markdown = render_review(rubric, ranked, aggregates, self.top_n, &date);

        fs::write(&self.path, markdown).map_err(|source| ReportError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        info!("📝 详细综述已生成: {}", self.path.display());
        Ok(Some(self.path.clone()))
    }
}

/// 渲染 Markdown 综述
pub fn render_review(
    rubric: &SlrRubric,
    ranked: &[&PaperRecord],
    aggregates: &Aggregates,
    top_n: usize,
    date: &str,
) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# {}: Detailed Paper Review\n", rubric.display_title());
    let _ = writeln!(md, "*Generated on {}*\n", date);

    md.push_str("## Research Questions\n\n");
    for rq in &rubric.research_questions {
        let _ = writeln!(md, "- {}", rq);
    }
    md.push('\n');

    md.push_str("## Top Papers for Inclusion\n\n");
    for (i, paper) in ranked.iter().take(top_n).enumerate() {
        render_paper(&mut md, rubric, i + 1, paper);
    }

    md.push_str("## Summary of Findings\n\n");
    render_counts(&mut md, "Healthcare Domains Covered", &aggregates.domain_counts, None);
    render_counts(&mut md, "AI Techniques Used", &aggregates.technique_counts, None);
    render_counts(
        &mut md,
        "Common Implementation Challenges",
        &aggregates.challenge_counts,
        Some(TOP_CHALLENGES),
    );

    md
}

fn render_paper(md: &mut String, rubric: &SlrRubric, position: usize, paper: &PaperRecord) {
    let Some(j) = paper.judgment.as_ref() else {
        return;
    };

    let _ = writeln!(md, "### {}. {}\n", position, paper.filename);
    let _ = writeln!(md, "**Overall Score:** {}/100\n", j.overall_score);
    let _ = writeln!(md, "**Summary:** {}\n", or_default(&j.paper_summary, "No summary available"));

    md.push_str("**Research Question Relevance:**\n");
    let relevance = [j.relevance_to_rq1, j.relevance_to_rq2, j.relevance_to_rq3];
    for (index, score) in relevance.iter().enumerate() {
        let _ = writeln!(md, "- {}: {}/100", rubric.research_question_label(index), score);
    }
    md.push('\n');

    md.push_str("**Implementation Details:**\n");
    let _ = writeln!(md, "- Healthcare Domain: {}", or_default(&j.healthcare_domain, "Not specified"));
    let techniques = if j.ai_techniques.is_empty() {
        "Not specified".to_string()
    } else {
        j.ai_techniques.join(", ")
    };
    let _ = writeln!(md, "- AI Techniques: {}", techniques);
    let _ = writeln!(
        md,
        "- Implementation Approach: {}\n",
        or_default(&j.implementation_details, "Not described")
    );

    md.push_str("**Key Findings:**\n");
    let _ = writeln!(md, "{}\n", or_default(&j.key_findings, "Not described"));

    if !j.challenges_identified.is_empty() {
        md.push_str("**Challenges Identified:**\n");
        for challenge in &j.challenges_identified {
            let _ = writeln!(md, "- {}", challenge);
        }
        md.push('\n');
    }

    if !j.success_factors.is_empty() {
        md.push_str("**Success Factors:**\n");
        for factor in &j.success_factors {
            let _ = writeln!(md, "- {}", factor);
        }
        md.push('\n');
    }

    md.push_str("---\n\n");
}

fn render_counts(md: &mut String, heading: &str, table: &FrequencyTable, limit: Option<usize>) {
    let _ = writeln!(md, "### {}\n", heading);
    let entries = match limit {
        Some(n) => table.top(n),
        None => table.ranked(),
    };
    for (key, count) in entries {
        let _ = writeln!(md, "- {}: {} papers", key, count);
    }
    md.push('\n');
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
