//! Identity document classification and field extraction.

pub mod classifier;
mod extractor;
pub mod rules;
pub mod validity;

pub use classifier::{classify, DocumentClassifier, Signature};
pub use extractor::FieldExtractor;
pub use rules::{DocumentFields, TypeExtractor};
pub use validity::ValidityPolicy;
