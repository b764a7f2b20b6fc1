pub mod pdf_extractor;

#[cfg(test)]
pub(crate) mod pdf_fixtures;

pub use pdf_extractor::{extract_text, try_extract_text};
