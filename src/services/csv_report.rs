//! 表格报告 - 业务能力层
//!
//! 只负责"把全部论文的评审结果写成 CSV"能力

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::ReportError;
use crate::models::paper::PaperRecord;
use crate::ranking::report_order;

/// 默认文件名
pub const CSV_REPORT_FILE: &str = "healthcare_ai_paper_analysis.csv";

/// CSV 中的一行
#[derive(Debug, Serialize, PartialEq)]
pub struct ReportRow {
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "Filepath")]
    pub filepath: String,
    #[serde(rename = "Meets Inclusion")]
    pub meets_inclusion: bool,
    #[serde(rename = "RQ1 Score")]
    pub rq1_score: u32,
    #[serde(rename = "RQ2 Score")]
    pub rq2_score: u32,
    #[serde(rename = "RQ3 Score")]
    pub rq3_score: u32,
    #[serde(rename = "Implementation Quality")]
    pub implementation_quality: u32,
    #[serde(rename = "Overall Score")]
    pub overall_score: u32,
    #[serde(rename = "Recommendation")]
    pub recommendation: String,
    #[serde(rename = "Healthcare Domain")]
    pub healthcare_domain: String,
    #[serde(rename = "AI Techniques")]
    pub ai_techniques: String,
    #[serde(rename = "Summary")]
    pub summary: String,
}

impl From<&PaperRecord> for ReportRow {
    fn from(paper: &PaperRecord) -> Self {
        match &paper.judgment {
            Some(j) => Self {
                filename: paper.filename.clone(),
                filepath: paper.filepath.clone(),
                meets_inclusion: j.meets_inclusion_criteria,
                rq1_score: j.relevance_to_rq1,
                rq2_score: j.relevance_to_rq2,
                rq3_score: j.relevance_to_rq3,
                implementation_quality: j.implementation_quality,
                overall_score: j.overall_score,
                recommendation: j.recommendation.as_str().to_string(),
                healthcare_domain: j.healthcare_domain.clone(),
                ai_techniques: j.ai_techniques.join(", "),
                summary: j.paper_summary.clone(),
            },
            None => Self {
                filename: paper.filename.clone(),
                filepath: paper.filepath.clone(),
                meets_inclusion: false,
                rq1_score: 0,
                rq2_score: 0,
                rq3_score: 0,
                implementation_quality: 0,
                overall_score: 0,
                recommendation: "Unknown".to_string(),
                healthcare_domain: String::new(),
                ai_techniques: String::new(),
                summary: String::new(),
            },
        }
    }
}

/// CSV 报告写入服务
pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    /// 在输出目录下使用默认文件名
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            path: output_dir.join(CSV_REPORT_FILE),
        }
    }

    /// 写入所有论文（含未纳入与评审失败的），按纳入、总分降序
    pub fn write(&self, records: &[PaperRecord]) -> Result<PathBuf, ReportError> {
        let path_display = self.path.display().to_string();
        let csv_err = |source| ReportError::Csv {
            path: path_display.clone(),
            source,
        };

        let mut writer = csv::Writer::from_path(&self.path).map_err(csv_err)?;
        for paper in report_order(records) {
            writer.serialize(ReportRow::from(paper)).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| ReportError::Io {
            path: path_display.clone(),
            source,
        })?;

        info!("📄 表格报告已生成: {}", path_display);
        Ok(self.path.clone())
    }
}
