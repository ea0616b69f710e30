pub mod extractor;

pub use extractor::{extract, ExtractionPlan};
