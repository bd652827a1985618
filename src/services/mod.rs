pub mod locks;
pub mod rankings;
pub mod recompute;
pub mod server;

pub use recompute::{Outcome, RecomputeService};
