//! 图表报告 - 业务能力层
//!
//! 只负责"把排序后的纳入论文画成图表"能力：
//! - 总分排名条形图（前 N 篇）
//! - 前 3 篇的研究问题覆盖雷达图（不足 3 篇时不画）

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{info, warn};

use crate::error::ReportError;
use crate::models::paper::PaperRecord;
use crate::utils::truncate_text;

/// 排名图文件名
pub const RANKING_CHART_FILE: &str = "healthcare_ai_papers_ranking.svg";
/// 覆盖图文件名
pub const COVERAGE_CHART_FILE: &str = "research_question_coverage.svg";

/// 雷达图展示的论文数量，也是画雷达图的最低论文数
const COVERAGE_PAPERS: usize = 3;
/// 条形图中文件名的最大字符数
const BAR_LABEL_CHARS: usize = 25;
const RADAR_AXES: [&str; 4] = ["RQ1 Score", "RQ2 Score", "RQ3 Score", "Implementation Quality"];

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const GRID_GREY: RGBColor = RGBColor(200, 200, 200);
const PAPER_COLORS: [RGBColor; 3] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14), RGBColor(44, 160, 44)];

type DrawResult = Result<(), Box<dyn Error>>;

/// 图表写入服务
pub struct ChartReport {
    ranking_path: PathBuf,
    coverage_path: PathBuf,
    top_n: usize,
}

impl ChartReport {
    pub fn in_dir(output_dir: &Path, top_n: usize) -> Self {
        Self {
            ranking_path: output_dir.join(RANKING_CHART_FILE),
            coverage_path: output_dir.join(COVERAGE_CHART_FILE),
            top_n,
        }
    }

    /// 绘制图表，返回实际写入的文件
    pub fn write(&self, ranked: &[&PaperRecord]) -> Result<Vec<PathBuf>, ReportError> {
        if ranked.is_empty() {
            warn!("⚠️ 没有论文满足纳入标准，跳过图表");
            return Ok(Vec::new());
        }

        let mut written = Vec::new();

        let top: Vec<&PaperRecord> = ranked.iter().take(self.top_n.max(1)).copied().collect();
        draw_ranking(&self.ranking_path, &top).map_err(|e| chart_error(&self.ranking_path, e))?;
        info!("📊 排名图已生成: {}", self.ranking_path.display());
        written.push(self.ranking_path.clone());

        if ranked.len() >= COVERAGE_PAPERS {
            draw_coverage(&self.coverage_path, &ranked[..COVERAGE_PAPERS])
                .map_err(|e| chart_error(&self.coverage_path, e))?;
            info!("📊 研究问题覆盖图已生成: {}", self.coverage_path.display());
            written.push(self.coverage_path.clone());
        } else {
            info!(
                "纳入论文不足 {} 篇，跳过研究问题覆盖图",
                COVERAGE_PAPERS
            );
        }

        Ok(written)
    }
}

fn chart_error(path: &Path, err: Box<dyn Error>) -> ReportError {
    ReportError::Chart {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// 横向条形图，第 1 名在最上方
fn draw_ranking(path: &Path, papers: &[&PaperRecord]) -> DrawResult {
    let rows = papers.len();
    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top Healthcare AI Implementation Papers", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(20)
        .build_cartesian_2d(0f64..100f64, 0f64..rows as f64)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_label_formatter(&|_| String::new())
        .x_desc("Overall Score")
        .draw()?;

    chart.draw_series(papers.iter().enumerate().map(|(i, paper)| {
        let y = (rows - 1 - i) as f64;
        Rectangle::new(
            [(0.0, y + 0.15), (paper.overall_score() as f64, y + 0.85)],
            SKY_BLUE.filled(),
        )
    }))?;

    chart.draw_series(papers.iter().enumerate().map(|(i, paper)| {
        let y = (rows - 1 - i) as f64;
        Text::new(
            truncate_text(&paper.filename, BAR_LABEL_CHARS),
            (1.0, y + 0.65),
            ("sans-serif", 16),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// 雷达图：每篇论文一条闭合折线，分数缩放到 0..1
fn draw_coverage(path: &Path, papers: &[&PaperRecord]) -> DrawResult {
    let root = SVGBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Research Question Coverage of Top Papers", ("sans-serif", 28))
        .margin(30)
        .build_cartesian_2d(-1.4f64..1.4f64, -1.4f64..1.4f64)?;

    let axes = RADAR_AXES.len();
    let point = |k: usize, value: f64| {
        let angle = (k % axes) as f64 / axes as f64 * std::f64::consts::TAU;
        (value * angle.cos(), value * angle.sin())
    };

    for ring in [0.25, 0.5, 0.75, 1.0] {
        let outline: Vec<(f64, f64)> = (0..=axes).map(|k| point(k, ring)).collect();
        chart.draw_series(std::iter::once(PathElement::new(outline, GRID_GREY)))?;
    }
    chart.draw_series((0..axes).map(|k| PathElement::new(vec![(0.0, 0.0), point(k, 1.0)], GRID_GREY)))?;
    chart.draw_series(
        RADAR_AXES
            .iter()
            .enumerate()
            .map(|(k, label)| Text::new(*label, point(k, 1.1), ("sans-serif", 16))),
    )?;

    for (i, paper) in papers.iter().enumerate() {
        let color = PAPER_COLORS[i % PAPER_COLORS.len()];
        let values = radar_values(paper);
        let outline: Vec<(f64, f64)> = (0..=axes).map(|k| point(k, values[k % axes])).collect();

        chart.draw_series(std::iter::once(Polygon::new(outline.clone(), color.mix(0.1))))?;
        chart
            .draw_series(std::iter::once(PathElement::new(outline, color.stroke_width(2))))?
            .label(paper.filename.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// RQ1、RQ2、RQ3、实施质量，缩放到 0..1
fn radar_values(paper: &PaperRecord) -> [f64; 4] {
    match &paper.judgment {
        Some(j) => [
            j.relevance_to_rq1 as f64 / 100.0,
            j.relevance_to_rq2 as f64 / 100.0,
            j.relevance_to_rq3 as f64 / 100.0,
            j.implementation_quality as f64 / 100.0,
        ],
        None => [0.0; 4],
    }
}
