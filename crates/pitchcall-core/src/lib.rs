// Library root: next-pitch recommendations from historical Statcast data.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod glossary;
pub mod outcome;
pub mod pitch;
pub mod query;

pub use engine::{recommend, FilterContext, RecommendError, RecommendationResult};
