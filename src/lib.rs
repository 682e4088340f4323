//! Field records, crop catalog and the crop rotation / planting
//! recommendation engine behind the `cropops` CLI.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logic;
pub mod models;
pub mod report;

pub use error::{CropOpsError, Result};
pub use logic::RecommendationEngine;
