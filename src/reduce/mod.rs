pub mod outline;
pub mod reduced_model;
pub mod simplifier;
