//! 论文评审流程 - 流程层
//!
//! 核心职责：定义"一篇论文"的完整评审流程
//!
//! 流程顺序：
//! 1. 截取正文节选
//! 2. 调用评审者（超时保护，频率限制时指数退避重试）
//! 3. 失败兜底：生成 Error 评审结果，绝不向上抛出

use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::JudgeError;
use crate::models::judgment::JudgmentRecord;
use crate::models::paper::PaperRecord;
use crate::models::rubric::SlrRubric;
use crate::services::judge_service::Judge;
use crate::utils::logging::truncate_text;
use crate::workflow::paper_ctx::PaperCtx;

/// 单次退避等待的上限
pub const MAX_BACKOFF_DELAY: Duration = Duration::from_secs(300);

/// 评估流水线参数
#[derive(Debug, Clone)]
pub struct EvaluationSettings {
    /// 节选的最大字符数
    pub excerpt_chars: usize,
    /// 每次调用之后的固定间隔
    pub call_delay: Duration,
    /// 频率限制时的最大重试次数
    pub max_retries: u32,
    /// 退避基础时长
    pub retry_base_delay: Duration,
    /// 单次调用超时
    pub judge_timeout: Duration,
}

impl From<&Config> for EvaluationSettings {
    fn from(config: &Config) -> Self {
        Self {
            excerpt_chars: config.excerpt_chars,
            call_delay: Duration::from_millis(config.call_delay_ms),
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
            judge_timeout: Duration::from_secs(config.judge_timeout_secs),
        }
    }
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// 取正文前 `max_chars` 个字符，不会截断在多字节字符中间
pub fn excerpt(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &content[..byte_index],
        None => content,
    }
}

/// 第 `attempt` 次重试前的等待：`base * 2^(attempt-1)`，溢出或超过上限时取 [`MAX_BACKOFF_DELAY`]
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    2u32.checked_pow(attempt.saturating_sub(1))
        .and_then(|factor| base.checked_mul(factor))
        .map_or(MAX_BACKOFF_DELAY, |delay| delay.min(MAX_BACKOFF_DELAY))
}

/// 论文评审流程
///
/// - 编排单篇论文的评审：节选 → 评审 → 重试/兜底
/// - 不持有论文集合
/// - 不负责调用间隔（由编排层控制）
pub struct PaperFlow<'a, J: Judge> {
    judge: &'a J,
    rubric: &'a SlrRubric,
    settings: &'a EvaluationSettings,
}

impl<'a, J: Judge> PaperFlow<'a, J> {
    pub fn new(judge: &'a J, rubric: &'a SlrRubric, settings: &'a EvaluationSettings) -> Self {
        Self {
            judge,
            rubric,
            settings,
        }
    }

    /// 评审一篇论文，总是返回评审结果
    pub async fn run(&self, paper: &PaperRecord, ctx: &PaperCtx) -> JudgmentRecord {
        let excerpt = excerpt(&paper.content, self.settings.excerpt_chars);
        debug!(
            "[论文 {}/{}] 节选 {} 个字符",
            ctx.paper_index,
            ctx.total,
            excerpt.chars().count()
        );

        match self.judge_with_retry(excerpt, ctx).await {
            Ok(judgment) => {
                info!(
                    "[论文 {}/{}] ✓ 评审完成: 纳入={}, 总分={}",
                    ctx.paper_index, ctx.total, judgment.meets_inclusion_criteria, judgment.overall_score
                );
                if !judgment.is_consistent() {
                    debug!(
                        "[论文 {}/{}] 纳入标志与建议 {} 不一致，排序只看纳入标志",
                        ctx.paper_index,
                        ctx.total,
                        judgment.recommendation.as_str()
                    );
                }
                judgment
            }
            Err(e) => {
                error!(
                    "[论文 {}/{}] ❌ 评审失败 {}: {}",
                    ctx.paper_index,
                    ctx.total,
                    truncate_text(&ctx.filename, 60),
                    e
                );
                JudgmentRecord::from_error(e.to_string())
            }
        }
    }

    /// 调用评审者；仅频率限制错误会退避重试
    async fn judge_with_retry(
        &self,
        excerpt: &str,
        ctx: &PaperCtx,
    ) -> Result<JudgmentRecord, JudgeError> {
        let mut retries = 0u32;

        loop {
            let result = match timeout(
                self.settings.judge_timeout,
                self.judge.judge(self.rubric, excerpt),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(JudgeError::Timeout {
                    secs: self.settings.judge_timeout.as_secs(),
                }),
            };

            match result {
                Err(e) if e.is_rate_limited() && retries < self.settings.max_retries => {
                    retries += 1;
                    let delay = backoff_delay(self.settings.retry_base_delay, retries);
                    warn!(
                        "[论文 {}/{}] ⏳ 触发频率限制，{:?} 后第 {}/{} 次重试",
                        ctx.paper_index, ctx.total, delay, retries, self.settings.max_retries
                    );
                    sleep(delay).await;
                }
                other => return other,
            }
        }
    }
}
