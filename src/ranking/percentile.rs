use super::types::RankIndex;

/// Arithmetic mean, `None` for an empty pool.
pub fn mean(pool: &[RankIndex]) -> Option<RankIndex> {
    if pool.is_empty() {
        return None;
    }
    let sum: f64 = pool.iter().sum();
    Some(sum / pool.len() as f64)
}

/// Share of the distribution ranked strictly worse (numerically greater)
/// than `avg_rank_index`, as 0..=100.
pub fn percentile_of(avg_rank_index: RankIndex, distribution: &[RankIndex]) -> f64 {
    if distribution.is_empty() {
        return 0.0;
    }
    let worse_count = count_worse(avg_rank_index, distribution);
    worse_count as f64 / distribution.len() as f64 * 100.0
}

fn count_worse(avg_rank_index: RankIndex, distribution: &[RankIndex]) -> usize {
    distribution.iter().filter(|&&rank| rank > avg_rank_index).count()
}

pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
