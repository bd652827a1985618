use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::models::{AggregateUpdate, MovieAggregate};
use crate::errors::{StoreError, with_query_context, with_write_context};

const MOVIE_COLUMNS: &str =
    "id, movie_id, title, avg_ranking, num_rankings, avg_rank_index, percentile, last_updated, created_at";

fn parse_movie_row(row: &rusqlite::Row) -> rusqlite::Result<MovieAggregate> {
    Ok(MovieAggregate {
        id: row.get(0)?,
        movie_id: row.get(1)?,
        title: row.get(2)?,
        avg_ranking: row.get(3)?,
        num_rankings: row.get(4)?,
        avg_rank_index: row.get(5)?,
        percentile: row.get(6)?,
        last_updated: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// First aggregate row carrying `movie_id`. Duplicates are tolerated; the
/// oldest one wins.
pub fn find_by_movie_id(conn: &mut DbConn, movie_id: &str) -> Result<Option<MovieAggregate>, StoreError> {
    let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE movie_id = ?1 ORDER BY id LIMIT 1");

    with_query_context(
        conn.query_row(&sql, params![movie_id], parse_movie_row).optional(),
        &format!("movie aggregate for {movie_id}"),
    )
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<MovieAggregate>, StoreError> {
    let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?1");

    with_query_context(
        conn.query_row(&sql, params![id], parse_movie_row).optional(),
        "movie aggregate by id",
    )
}

/// Overwrite the computed fields of one aggregate row. `last_updated` is
/// stamped by the store.
pub fn update_aggregate(conn: &mut DbConn, id: i64, update: &AggregateUpdate) -> Result<(), StoreError> {
    let sql = "UPDATE movies SET avg_ranking = ?1, num_rankings = ?2, avg_rank_index = ?3, percentile = ?4, last_updated = CURRENT_TIMESTAMP WHERE id = ?5";

    with_write_context(
        conn.execute(
            sql,
            params![update.avg_ranking, update.num_rankings, update.avg_rank_index, update.percentile, id],
        ),
        "movie aggregate",
    )
    .map(|_| ())
}

/// Provision an aggregate row for `movie_id` unless one already exists.
pub fn ensure_movie(conn: &mut DbConn, movie_id: &str, title: Option<&str>) -> Result<MovieAggregate, StoreError> {
    if let Some(existing) = find_by_movie_id(conn, movie_id)? {
        return Ok(existing);
    }

    insert_new_movie(conn, movie_id, title)
}

fn insert_new_movie(conn: &mut DbConn, movie_id: &str, title: Option<&str>) -> Result<MovieAggregate, StoreError> {
    let sql = format!("INSERT INTO movies (movie_id, title) VALUES (?1, ?2) RETURNING {MOVIE_COLUMNS}");

    with_write_context(
        conn.query_row(&sql, params![movie_id, title], parse_movie_row),
        "new movie aggregate",
    )
}
