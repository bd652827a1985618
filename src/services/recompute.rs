use std::time::Instant;

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::config::settings::RankingSettings;
use crate::database::{self, AggregateUpdate, DbConn, DbPool};
use crate::domain::RankingChangeEvent;
use crate::errors::StoreError;
use crate::ranking::{self, MovieScore};

use super::locks::KeyedLocks;

/// What a single recomputation did. Everything except `Updated` is a
/// benign no-op.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Outcome {
    Updated {
        movie_id: String,
        aggregate_id: i64,
        #[serde(flatten)]
        score: MovieScore,
    },
    NoMovieId,
    NoQualifyingRankings {
        movie_id: String,
    },
    AggregateMissing {
        movie_id: String,
    },
}

impl Outcome {
    pub fn is_update(&self) -> bool {
        matches!(self, Outcome::Updated { .. })
    }
}

/// Recomputes movie aggregates in response to ranking changes.
///
/// May be called concurrently and repeatedly for the same or different
/// movies. Recomputations of the same movie are serialized so that the last
/// write always reflects the latest read.
pub struct RecomputeService {
    pool: DbPool,
    settings: RankingSettings,
    locks: KeyedLocks,
}

impl RecomputeService {
    pub fn new(pool: DbPool, settings: RankingSettings) -> Self {
        Self {
            pool,
            settings,
            locks: KeyedLocks::new(),
        }
    }

    pub fn handle_event(&self, event: &RankingChangeEvent) -> Result<Outcome, StoreError> {
        debug!("Ranking change: before={:?} after={:?}", event.before, event.after);

        match event.movie_id() {
            Some(movie_id) => self.recompute(movie_id),
            None => {
                warn!("No movieId in ranking change, nothing to recompute");
                Ok(Outcome::NoMovieId)
            }
        }
    }

    pub fn recompute(&self, movie_id: &str) -> Result<Outcome, StoreError> {
        let started = Instant::now();
        info!("=== Recomputing aggregate for movie {} ===", movie_id);

        let result = self
            .locks
            .with_lock(movie_id, || self.recompute_locked(movie_id));

        match &result {
            Ok(outcome) => info!(
                "=== Movie {} done in {}ms ({}) ===",
                movie_id,
                started.elapsed().as_millis(),
                describe(outcome)
            ),
            Err(e) => log_failure(movie_id, e),
        }

        result
    }

    fn recompute_locked(&self, movie_id: &str) -> Result<Outcome, StoreError> {
        let mut conn = database::get_connection(&self.pool)?;

        // Step 1: Rank pool for this movie
        let records = database::rankings::list_by_movie(&mut conn, movie_id)?;
        let pool = ranking::collect_rank_pool(&records);
        info!("  → {} of {} rankings qualify", pool.len(), records.len());

        let Some(avg_rank_index) = ranking::mean(&pool) else {
            info!("  → No qualifying rankings for movie {}", movie_id);
            return Ok(Outcome::NoQualifyingRankings {
                movie_id: movie_id.to_string(),
            });
        };

        // Step 2: Global distribution
        let all_records = database::rankings::list_all(&mut conn)?;
        let distribution =
            ranking::collect_global_distribution(&all_records, self.settings.global_requires_ranked);
        info!("  → {} rank positions in global distribution", distribution.len());

        // Step 3: Percentile and star rating
        let score = ranking::score_movie(avg_rank_index, pool.len(), &distribution);

        // Step 4: Write aggregate
        self.write_aggregate(&mut conn, movie_id, score)
    }

    fn write_aggregate(&self, conn: &mut DbConn, movie_id: &str, score: MovieScore) -> Result<Outcome, StoreError> {
        let Some(movie) = database::movies::find_by_movie_id(conn, movie_id)? else {
            warn!(
                "No movie aggregate found for movie {}; it has to be provisioned before it can be scored",
                movie_id
            );
            return Ok(Outcome::AggregateMissing {
                movie_id: movie_id.to_string(),
            });
        };

        let update = AggregateUpdate {
            avg_ranking: score.star_rating.as_f64(),
            num_rankings: score.num_rankings,
            avg_rank_index: score.avg_rank_index,
            percentile: score.percentile,
        };
        database::movies::update_aggregate(conn, movie.id, &update)?;
        info!("  → Updated aggregate {} for movie {}", movie.id, movie_id);

        verify_write(conn, movie.id)?;

        Ok(Outcome::Updated {
            movie_id: movie_id.to_string(),
            aggregate_id: movie.id,
            score,
        })
    }
}

fn verify_write(conn: &mut DbConn, aggregate_id: i64) -> Result<(), StoreError> {
    if let Some(stored) = database::movies::find_by_id(conn, aggregate_id)? {
        debug!(
            "  Verification: avgRanking={:?}, numRankings={:?}, percentile={:?}, lastUpdated={:?}",
            stored.avg_ranking, stored.num_rankings, stored.percentile, stored.last_updated
        );
    }
    Ok(())
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Updated { score, .. } => format!(
            "{} stars, {} rankings, {:.1}%",
            score.star_rating.as_f64(),
            score.num_rankings,
            score.percentile
        ),
        Outcome::NoMovieId => "no movie id".to_string(),
        Outcome::NoQualifyingRankings { .. } => "no qualifying rankings".to_string(),
        Outcome::AggregateMissing { .. } => "aggregate missing".to_string(),
    }
}

fn log_failure(movie_id: &str, err: &StoreError) {
    error!("Recomputation failed for movie {}: {}", movie_id, err);
    if let Some(remediation) = err.remediation() {
        error!("  Fix: {}", remediation);
    }
}
