use rusqlite::types::Value;
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::models::RankingRecord;
use crate::errors::{StoreError, with_query_context, with_write_context};

const RANKING_COLUMNS: &str = "id, user_id, movie_id, rank_index, ranked, title, updated_at";

fn parse_ranking_row(row: &rusqlite::Row) -> rusqlite::Result<RankingRecord> {
    Ok(RankingRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        movie_id: row.get(2)?,
        rank_index: row.get(3)?,
        ranked: parse_ranked(row.get(4)?),
        title: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn parse_ranked(value: Value) -> Option<bool> {
    match value {
        Value::Integer(1) => Some(true),
        Value::Integer(0) => Some(false),
        _ => None,
    }
}

/// Every ranking recorded for `movie_id`, across all users, unfiltered.
pub fn list_by_movie(conn: &mut DbConn, movie_id: &str) -> Result<Vec<RankingRecord>, StoreError> {
    let sql = format!("SELECT {RANKING_COLUMNS} FROM rankings WHERE movie_id = ?1");
    let operation = format!("rankings for movie {movie_id}");

    let mut stmt = with_query_context(conn.prepare(&sql), &operation)?;
    let rows = with_query_context(
        stmt.query_map(params![movie_id], parse_ranking_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>()),
        &operation,
    )?;

    Ok(rows)
}

/// Every ranking in the store, for every user and movie.
pub fn list_all(conn: &mut DbConn) -> Result<Vec<RankingRecord>, StoreError> {
    let sql = format!("SELECT {RANKING_COLUMNS} FROM rankings");

    let mut stmt = with_query_context(conn.prepare(&sql), "all rankings")?;
    let rows = with_query_context(
        stmt.query_map([], parse_ranking_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>()),
        "all rankings",
    )?;

    Ok(rows)
}

pub fn find(conn: &mut DbConn, user_id: &str, movie_id: &str) -> Result<Option<RankingRecord>, StoreError> {
    let sql = format!("SELECT {RANKING_COLUMNS} FROM rankings WHERE user_id = ?1 AND movie_id = ?2");

    with_query_context(
        conn.query_row(&sql, params![user_id, movie_id], parse_ranking_row).optional(),
        "ranking by user and movie",
    )
}

pub fn upsert_ranking(
    conn: &mut DbConn,
    user_id: &str,
    movie_id: &str,
    rank_index: &Value,
    ranked: Option<bool>,
    title: Option<&str>,
) -> Result<RankingRecord, StoreError> {
    let sql = format!(
        "INSERT INTO rankings (user_id, movie_id, rank_index, ranked, title) VALUES (?1, ?2, ?3, ?4, ?5) \
         ON CONFLICT (user_id, movie_id) DO UPDATE SET rank_index = excluded.rank_index, ranked = excluded.ranked, \
         title = excluded.title, updated_at = CURRENT_TIMESTAMP RETURNING {RANKING_COLUMNS}"
    );

    with_write_context(
        conn.query_row(&sql, params![user_id, movie_id, rank_index, ranked, title], parse_ranking_row),
        "ranking",
    )
}

/// Remove a ranking, returning the row as it was before deletion.
pub fn delete_ranking(
    conn: &mut DbConn,
    user_id: &str,
    movie_id: &str,
) -> Result<Option<RankingRecord>, StoreError> {
    let sql = format!("DELETE FROM rankings WHERE user_id = ?1 AND movie_id = ?2 RETURNING {RANKING_COLUMNS}");

    with_write_context(
        conn.query_row(&sql, params![user_id, movie_id], parse_ranking_row).optional(),
        "ranking deletion",
    )
}
