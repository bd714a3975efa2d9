//! Concept graph construction and its rendering attributes

pub mod builder;
pub mod visuals;
