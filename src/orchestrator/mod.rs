//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和阶段调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量论文处理器
//! - 管理应用生命周期（初始化、运行）
//! - 加载论文集合（Vec<PaperRecord>）
//! - 依次调度评审、排序汇总、报告输出
//! - 输出全局统计信息
//!
//! ### `evaluation` - 论文集合评审
//! - 顺序遍历所有论文
//! - 创建并复用 PaperFlow
//! - 控制调用间隔
//! - 输出评审统计
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理整个目录)
//!     ↓
//! evaluation (处理 Vec<PaperRecord>)
//!     ↓
//! workflow::PaperFlow (处理单篇论文)
//!     ↓
//! services (能力层：judge / llm / csv / review / chart)
//!     ↓
//! infrastructure (基础设施：PDF 文本提取)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管阶段，evaluation 管逐篇评审
//! 2. **顺序执行**：不并发，一次只有一个评审调用
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体评审判断

pub mod batch_processor;
pub mod evaluation;

// 重新导出主要类型
pub use batch_processor::{run_pipeline, App, PipelineOutcome};
pub use evaluation::{evaluate, EvaluationStats};
