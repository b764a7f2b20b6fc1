pub mod judgment;
pub mod loaders;
pub mod paper;
pub mod rubric;

pub use judgment::{JudgmentRecord, Recommendation};
pub use loaders::{load_corpus, load_rubric_toml};
pub use paper::PaperRecord;
pub use rubric::SlrRubric;
