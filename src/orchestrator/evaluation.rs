//! 论文集合评审 - 编排层
//!
//! ## 职责
//!
//! 顺序遍历 `Vec<PaperRecord>`，逐篇委托 `PaperFlow` 评审并写回结果。
//!
//! ## 核心功能
//!
//! 1. **顺序调度**：一次只评审一篇，等待完成后再开始下一篇
//! 2. **调用间隔**：每次调用之后固定等待（成功或失败都等待）
//! 3. **结果写回**：每篇论文都会得到评审结果
//! 4. **统计输出**：评审成功/失败数量

use tokio::time::sleep;
use tracing::{info, warn};

use crate::models::paper::PaperRecord;
use crate::models::rubric::SlrRubric;
use crate::services::judge_service::Judge;
use crate::workflow::{EvaluationSettings, PaperCtx, PaperFlow};

/// 评审统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EvaluationStats {
    pub judged: usize,
    pub failed: usize,
    pub total: usize,
}

impl EvaluationStats {
    pub fn from_records(records: &[PaperRecord]) -> Self {
        let failed = records
            .iter()
            .filter(|r| r.judgment.as_ref().map_or(true, |j| j.is_error()))
            .count();
        Self {
            judged: records.len() - failed,
            failed,
            total: records.len(),
        }
    }
}

/// 评审全部论文
///
/// # 返回
/// 没有论文时返回 `false`；否则返回 `true`，且每篇论文都带有评审结果
pub async fn evaluate<J: Judge>(
    records: &mut [PaperRecord],
    rubric: &SlrRubric,
    judge: &J,
    settings: &EvaluationSettings,
) -> bool {
    if records.is_empty() {
        warn!("⚠️ 没有可评审的论文");
        return false;
    }

    let total = records.len();
    let flow = PaperFlow::new(judge, rubric, settings);

    for (index, paper) in records.iter_mut().enumerate() {
        let ctx = PaperCtx::new(index + 1, total, paper.filename.clone());
        info!("\n[论文 {}/{}] 📄 {}", ctx.paper_index, total, paper.filename);

        let judgment = flow.run(paper, &ctx).await;
        paper.judgment = Some(judgment);

        if !settings.call_delay.is_zero() {
            sleep(settings.call_delay).await;
        }
    }

    let stats = EvaluationStats::from_records(records);
    info!("{}", "─".repeat(60));
    info!(
        "✓ 评审结束: 成功 {}/{}，失败 {}",
        stats.judged, stats.total, stats.failed
    );
    info!("{}", "─".repeat(60));

    true
}
