pub mod catalog;
pub mod dates;
pub mod engine;
pub mod factors;
pub mod matcher;
pub mod rotation;

pub use engine::RecommendationEngine;
