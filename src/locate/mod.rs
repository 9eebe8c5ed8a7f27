pub mod path_builder;
pub mod step;
