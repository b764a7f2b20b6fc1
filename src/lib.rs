//! # SLR Paper Screener
//!
//! 一个用于系统性文献综述（SLR）论文初筛的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露能力，不关心业务
//! - `pdf_extractor` - 读取 PDF 前若干页的纯文本，失败时返回空串
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单篇论文或单份报告
//! - `LlmJudge` - 按评审标准给论文打分
//! - `LlmService` - LLM 调用能力
//! - `CsvReport` / `ReviewWriter` / `ChartReport` - 写 CSV、Markdown 与图表能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一篇论文"的完整评审流程
//! - `PaperCtx` - 上下文封装（序号 + 文件名）
//! - `PaperFlow` - 流程编排（节选 → 评审 → 重试 → 兜底）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 启动检查与阶段调度
//! - `orchestrator/evaluation` - 顺序评审论文集合
//!
//! 另有 `models/`（数据模型与加载器）和 `ranking`（排序与汇总统计）。
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod ranking;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{JudgmentRecord, PaperRecord, Recommendation, SlrRubric};
pub use orchestrator::{evaluate, run_pipeline, App, PipelineOutcome};
pub use ranking::{aggregate, rank, Aggregates};
pub use services::{Judge, LlmJudge};
pub use workflow::{EvaluationSettings, PaperCtx, PaperFlow};
