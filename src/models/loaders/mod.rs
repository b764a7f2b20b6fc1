pub mod corpus_loader;
pub mod toml_loader;

pub use corpus_loader::load_corpus;
pub use toml_loader::load_rubric_toml;
