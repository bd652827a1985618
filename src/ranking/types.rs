use serde::Serialize;

use super::classifier::StarRating;

pub type RankIndex = f64;

/// Result of scoring one movie, ready to be written to its aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieScore {
    #[serde(rename = "avgRanking")]
    pub star_rating: StarRating,
    pub num_rankings: i64,
    pub avg_rank_index: RankIndex,
    /// Rounded to one decimal.
    pub percentile: f64,
}
