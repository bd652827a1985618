use super::types::RankIndex;
use crate::database::RankingRecord;

/// Every numeric rank position in the store. Unlike the per-movie pool this
/// keeps unranked and negative positions, unless `require_ranked` is set.
pub fn collect_global_distribution(records: &[RankingRecord], require_ranked: bool) -> Vec<RankIndex> {
    records
        .iter()
        .filter(|record| !require_ranked || record.is_ranked())
        .filter_map(RankingRecord::numeric_rank_index)
        .collect()
}
