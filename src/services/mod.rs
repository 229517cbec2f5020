pub mod ordering;
pub mod scoring;
