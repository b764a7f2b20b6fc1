//! 批量论文处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责启动检查和各阶段的顺序调度。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、检查论文目录、加载评审标准、创建评审者
//! 2. **批量加载**：扫描并提取所有 PDF（`Vec<PaperRecord>`）
//! 3. **顺序评审**：委托 `evaluation::evaluate` 逐篇评审
//! 4. **排序汇总**：筛选纳入论文并统计领域、技术、挑战
//! 5. **报告输出**：CSV 表格、Markdown 综述、排名与覆盖图表、控制台前 5 名
//! 6. **全局统计**：汇总评审结果

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::paper::PaperRecord;
use crate::models::rubric::SlrRubric;
use crate::models::{load_corpus, load_rubric_toml};
use crate::orchestrator::evaluation::{evaluate, EvaluationStats};
use crate::ranking::{aggregate, rank};
use crate::services::judge_service::{Judge, LlmJudge};
use crate::services::{ChartReport, CsvReport, ReviewWriter};
use crate::utils::logging::{log_papers_loaded, log_startup, print_final_stats};
use crate::utils::truncate_text;
use crate::workflow::EvaluationSettings;

/// 控制台展示的论文数量
const CONSOLE_TOP: usize = 5;
/// 控制台摘要的最大字符数
const CONSOLE_SUMMARY_CHARS: usize = 150;

/// 应用主结构
pub struct App {
    config: Config,
    rubric: SlrRubric,
    judge: LlmJudge,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;

        if !Path::new(&config.papers_dir).is_dir() {
            return Err(AppError::directory_not_found(&config.papers_dir));
        }

        let rubric = match &config.rubric_file {
            Some(path) => load_rubric_toml(Path::new(path)).await?,
            None => SlrRubric::default(),
        };

        log_startup(&config);

        let judge = LlmJudge::new(&config);
        info!("🤖 评审者已就绪: {}", judge.model_name());

        Ok(Self {
            config,
            rubric,
            judge,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<()> {
        run_pipeline(&self.config, &self.rubric, &self.judge).await?;
        Ok(())
    }
}

/// 一次完整运行的产出
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    /// 评审后的全部论文（加载顺序）
    pub records: Vec<PaperRecord>,
    pub csv_path: Option<PathBuf>,
    pub review_path: Option<PathBuf>,
    /// 实际生成的图表
    pub chart_paths: Vec<PathBuf>,
}

/// 加载 → 评审 → 排序汇总 → 报告
///
/// 没有找到 PDF 时直接返回空结果，不进入后续阶段
pub async fn run_pipeline<J: Judge>(
    config: &Config,
    rubric: &SlrRubric,
    judge: &J,
) -> AppResult<PipelineOutcome> {
    info!("\n📁 正在扫描论文目录...");
    let mut records = load_corpus(Path::new(&config.papers_dir), config.max_pages);

    if records.is_empty() {
        warn!("⚠️ 没有找到可读取的 PDF，程序结束");
        return Ok(PipelineOutcome::default());
    }

    log_papers_loaded(records.len(), config.call_delay_ms);

    let settings = EvaluationSettings::from(config);
    evaluate(&mut records, rubric, judge, &settings).await;

    let ranked = rank(&records);
    let aggregates = aggregate(&ranked);
    info!("📌 满足纳入标准的论文: {}/{}", ranked.len(), records.len());

    let output_dir = Path::new(&config.output_dir);
    fs::create_dir_all(output_dir)
        .map_err(|source| AppError::file_write_failed(&config.output_dir, source))?;

    let csv_path = CsvReport::in_dir(output_dir).write(&records)?;
    let review_path = ReviewWriter::in_dir(output_dir, config.top_n).write(rubric, &ranked, &aggregates)?;
    let chart_paths = ChartReport::in_dir(output_dir, config.top_n).write(&ranked)?;

    log_top_papers(&ranked);

    let stats = EvaluationStats::from_records(&records);
    print_final_stats(
        stats.judged,
        stats.failed,
        ranked.len(),
        stats.total,
        &config.output_dir,
    );

    Ok(PipelineOutcome {
        csv_path: Some(csv_path),
        review_path,
        chart_paths,
        records,
    })
}

fn log_top_papers(ranked: &[&PaperRecord]) {
    if ranked.is_empty() {
        warn!("⚠️ 没有论文满足纳入标准");
        return;
    }

    info!("\n{}", "=".repeat(60));
    info!("🏆 排名前 {} 的论文", CONSOLE_TOP.min(ranked.len()));
    info!("{}", "=".repeat(60));

    for (i, paper) in ranked.iter().take(CONSOLE_TOP).enumerate() {
        let Some(j) = paper.judgment.as_ref() else {
            continue;
        };
        info!("\n{}. {}", i + 1, paper.filename);
        info!("   路径: {}", paper.filepath);
        info!("   领域: {}", j.healthcare_domain);
        info!("   技术: {}", j.ai_techniques.join(", "));
        info!("   总分: {}/100", j.overall_score);
        info!(
            "   摘要: {}",
            truncate_text(&j.paper_summary, CONSOLE_SUMMARY_CHARS)
        );
    }
}
