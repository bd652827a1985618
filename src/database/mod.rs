pub mod connection;
pub mod models;
pub mod movies;
pub mod rankings;
pub mod setup;

pub use connection::{DbConn, DbPool, create_pool, get_connection};
pub use models::*;
