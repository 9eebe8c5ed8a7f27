pub mod caption;
pub mod extractor;
