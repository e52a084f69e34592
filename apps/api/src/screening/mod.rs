//! Resume screening: normalization, experience detection, keyword matching,
//! score composition, suggestions and ranking, plus the analyzer that runs them
//! in order for each uploaded resume.

pub mod analyzer;
pub mod experience;
pub mod handlers;
pub mod keywords;
pub mod normalize;
pub mod ranking;
pub mod scoring;
pub mod suggestions;
