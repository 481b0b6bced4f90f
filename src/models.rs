use crate::config::ModelsConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Text to summarize with the two models to compare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    pub model1: String,
    pub model2: String,
}

/// Summaries keyed by model identifier
pub type SummaryResult = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summaries: SummaryResult,
}

/// A single user judgment of one model's summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub model_name: String,
    pub clarity: i64,
    pub accuracy: i64,
    pub conciseness: i64,
    pub preference: bool,
}

/// Descriptive statistics over every stored rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    pub total_ratings: usize,
    pub avg_clarity: f64,
    pub avg_accuracy: f64,
    pub avg_conciseness: f64,
    /// Most frequently rated model
    pub preferred_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: ModelsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateResponse {
    pub status: String,
    pub message: String,
}

impl RateResponse {
    pub fn saved() -> Self {
        Self {
            status: "success".to_string(),
            message: "Rating saved successfully".to_string(),
        }
    }
}

/// Body of `GET /api/ratings`: statistics when data exists, a notice otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingsResponse {
    Rated {
        ratings: Vec<RatingRecord>,
        stats: RatingStats,
    },
    Empty {
        ratings: Vec<RatingRecord>,
        message: String,
    },
}

impl RatingsResponse {
    pub fn empty() -> Self {
        Self::Empty {
            ratings: Vec::new(),
            message: "No ratings yet".to_string(),
        }
    }
}
