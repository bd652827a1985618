use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

use crate::errors::StoreError;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub fn create_pool(database_path: &str, max_size: u32) -> Result<DbPool> {
    let manager = build_manager(database_path);
    build_pool(manager, max_size)
}

fn build_manager(path: &str) -> SqliteConnectionManager {
    SqliteConnectionManager::file(path)
}

fn build_pool(manager: SqliteConnectionManager, max_size: u32) -> Result<DbPool> {
    r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn, StoreError> {
    pool.get().map_err(StoreError::from)
}
