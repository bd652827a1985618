pub mod events;

pub use events::{RankingChangeEvent, RankingSnapshot};
