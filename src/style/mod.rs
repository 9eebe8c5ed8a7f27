pub mod catalog;
pub mod properties;
