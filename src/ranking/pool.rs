use log::debug;

use super::types::RankIndex;
use crate::database::RankingRecord;

/// Rank positions that count towards a movie's own score: explicitly
/// ranked, numeric and non-negative. `records` is expected to be the
/// rankings already selected for one movie.
pub fn collect_rank_pool(records: &[RankingRecord]) -> Vec<RankIndex> {
    records.iter().filter_map(qualifying_rank).collect()
}

fn qualifying_rank(record: &RankingRecord) -> Option<RankIndex> {
    let rank = record.numeric_rank_index().filter(|&rank| rank >= 0.0);

    match rank {
        Some(rank) if record.is_ranked() => Some(rank),
        _ => {
            debug!(
                "  Skipping ranking {} (user {}): ranked={:?}, rankIndex={:?}, title={:?}",
                record.id, record.user_id, record.ranked, record.rank_index, record.title
            );
            None
        }
    }
}
