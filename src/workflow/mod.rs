pub mod paper_ctx;
pub mod paper_flow;

pub use paper_ctx::PaperCtx;
pub use paper_flow::{excerpt, EvaluationSettings, PaperFlow};
