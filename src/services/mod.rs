pub mod chart_report;
pub mod csv_report;
pub mod judge_service;
pub mod llm_service;
pub mod review_writer;

pub use chart_report::ChartReport;
pub use csv_report::CsvReport;
pub use judge_service::{Judge, LlmJudge};
pub use llm_service::LlmService;
pub use review_writer::ReviewWriter;
