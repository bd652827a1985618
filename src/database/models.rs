use chrono::NaiveDateTime;
use rusqlite::types::Value;

/// One user's ranking of one movie.
#[derive(Debug, Clone)]
pub struct RankingRecord {
    pub id: i64,
    pub user_id: String,
    pub movie_id: Option<String>,
    /// Raw stored value; see [`RankingRecord::numeric_rank_index`].
    pub rank_index: Value,
    pub ranked: Option<bool>,
    pub title: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl RankingRecord {
    /// The rank index when it was stored as a finite number, `None` otherwise.
    pub fn numeric_rank_index(&self) -> Option<f64> {
        match self.rank_index {
            Value::Integer(v) => Some(v as f64),
            Value::Real(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.ranked == Some(true)
    }
}

/// Per-movie summary row. Provisioned externally, overwritten by recomputation.
#[derive(Debug, Clone)]
pub struct MovieAggregate {
    pub id: i64,
    pub movie_id: String,
    pub title: Option<String>,
    pub avg_ranking: Option<f64>,
    pub num_rankings: Option<i64>,
    pub avg_rank_index: Option<f64>,
    pub percentile: Option<f64>,
    pub last_updated: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

/// The computed fields written back to a [`MovieAggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateUpdate {
    pub avg_ranking: f64,
    pub num_rankings: i64,
    pub avg_rank_index: f64,
    pub percentile: f64,
}
