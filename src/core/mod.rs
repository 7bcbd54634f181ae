/// Corpus preparation, model building, and word generation.

pub mod config;
pub mod corpus;
pub mod generator;
pub mod model;
