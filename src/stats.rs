use crate::models::{RatingRecord, RatingStats};
use std::collections::BTreeMap;

/// Calculate statistics across every rating, or `None` when there are none
pub fn calculate_statistics(records: &[RatingRecord]) -> Option<RatingStats> {
    if records.is_empty() {
        return None;
    }

    Some(RatingStats {
        total_ratings: records.len(),
        avg_clarity: calculate_mean(records, |r| r.clarity),
        avg_accuracy: calculate_mean(records, |r| r.accuracy),
        avg_conciseness: calculate_mean(records, |r| r.conciseness),
        preferred_model: calculate_mode(records),
    })
}

/// Arithmetic mean of one score dimension
fn calculate_mean(records: &[RatingRecord], score: impl Fn(&RatingRecord) -> i64) -> f64 {
    let sum: f64 = records.iter().map(|r| score(r) as f64).sum();
    sum / records.len() as f64
}

/// Most frequently rated model name; ties go to the smallest name
fn calculate_mode(records: &[RatingRecord]) -> Option<String> {
    let mut frequency: BTreeMap<&str, usize> = BTreeMap::new();

    for record in records {
        *frequency.entry(record.model_name.as_str()).or_insert(0) += 1;
    }

    // `max_by_key` keeps the last maximum, so walk names in reverse order
    frequency
        .iter()
        .rev()
        .max_by_key(|&(_, count)| count)
        .map(|(name, _)| name.to_string())
}
