pub mod document_model;
pub mod geometry;
pub mod snapshot;
