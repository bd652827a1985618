use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::MovieAggregate;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingBody {
    #[serde(default)]
    pub rank_index: Option<Value>,
    #[serde(default)]
    pub ranked: Option<bool>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieBody {
    pub movie_id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub movie_id: String,
    pub title: Option<String>,
    pub avg_ranking: Option<f64>,
    pub num_rankings: Option<i64>,
    pub avg_rank_index: Option<f64>,
    pub percentile: Option<f64>,
    pub last_updated: Option<NaiveDateTime>,
}

impl From<MovieAggregate> for MovieResponse {
    fn from(movie: MovieAggregate) -> Self {
        Self {
            movie_id: movie.movie_id,
            title: movie.title,
            avg_ranking: movie.avg_ranking,
            num_rankings: movie.num_rankings,
            avg_rank_index: movie.avg_rank_index,
            percentile: movie.percentile,
            last_updated: movie.last_updated,
        }
    }
}
