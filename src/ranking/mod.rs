pub mod classifier;
pub mod distribution;
pub mod percentile;
pub mod pool;
pub mod types;

pub use classifier::StarRating;
pub use distribution::collect_global_distribution;
pub use percentile::{mean, percentile_of, round_to_one_decimal};
pub use pool::collect_rank_pool;
pub use types::{MovieScore, RankIndex};

use log::info;

/// Score a movie from the average of its own rank pool against the
/// system-wide distribution of individual rank positions.
pub fn score_movie(avg_rank_index: RankIndex, num_rankings: usize, distribution: &[RankIndex]) -> MovieScore {
    let percentile = percentile_of(avg_rank_index, distribution);
    let star_rating = StarRating::from_percentile(percentile);

    info!(
        "avg rankIndex {:.3} from {} rankings, percentile {:.1}% of {} positions, {} stars",
        avg_rank_index,
        num_rankings,
        percentile,
        distribution.len(),
        star_rating.as_f64()
    );

    MovieScore {
        star_rating,
        num_rankings: num_rankings as i64,
        avg_rank_index,
        percentile: round_to_one_decimal(percentile),
    }
}
