use rusqlite::types::Value as SqlValue;
use serde_json::Value;

use crate::database::{self, DbConn};
use crate::domain::{RankingChangeEvent, RankingSnapshot};
use crate::errors::StoreError;

/// Store one user's ranking of a movie and describe the change.
pub fn save_ranking(
    conn: &mut DbConn,
    user_id: &str,
    movie_id: &str,
    rank_index: Option<&Value>,
    ranked: Option<bool>,
    title: Option<&str>,
) -> Result<RankingChangeEvent, StoreError> {
    let before = database::rankings::find(conn, user_id, movie_id)?;
    let after = database::rankings::upsert_ranking(
        conn,
        user_id,
        movie_id,
        &json_to_sql(rank_index),
        ranked,
        title,
    )?;

    Ok(RankingChangeEvent::new(
        before.as_ref().map(RankingSnapshot::from),
        Some(RankingSnapshot::from(&after)),
    ))
}

/// Delete one user's ranking of a movie. `None` when there was nothing to
/// delete.
pub fn remove_ranking(
    conn: &mut DbConn,
    user_id: &str,
    movie_id: &str,
) -> Result<Option<RankingChangeEvent>, StoreError> {
    let deleted = database::rankings::delete_ranking(conn, user_id, movie_id)?;

    Ok(deleted.map(|record| RankingChangeEvent::new(Some(RankingSnapshot::from(&record)), None)))
}

fn json_to_sql(value: Option<&Value>) -> SqlValue {
    match value {
        None | Some(Value::Null) => SqlValue::Null,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map_or(SqlValue::Null, SqlValue::Real),
        },
        Some(Value::String(s)) => SqlValue::Text(s.clone()),
        Some(other) => SqlValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::TempDb;
    use serde_json::json;

    #[test]
    fn test_save_reports_before_and_after() {
        let db = TempDb::new("service_save_ranking");
        let mut conn = db.conn();

        let created = save_ranking(&mut conn, "alice", "550", Some(&json!(3)), Some(true), Some("Fight Club")).unwrap();
        assert!(created.before.is_none());
        assert_eq!(created.movie_id(), Some("550"));

        let updated = save_ranking(&mut conn, "alice", "550", Some(&json!(1)), Some(true), Some("Fight Club")).unwrap();
        assert_eq!(updated.before.unwrap().rank_index, Some(json!(3)));
        assert_eq!(updated.after.unwrap().rank_index, Some(json!(1)));
    }

    #[test]
    fn test_remove_reports_before_only() {
        let db = TempDb::new("service_remove_ranking");
        let mut conn = db.conn();
        save_ranking(&mut conn, "alice", "550", Some(&json!(0)), Some(true), None).unwrap();

        let event = remove_ranking(&mut conn, "alice", "550").unwrap().unwrap();

        assert!(event.after.is_none());
        assert_eq!(event.movie_id(), Some("550"));
        assert!(remove_ranking(&mut conn, "alice", "550").unwrap().is_none());
    }

    #[test]
    fn test_json_to_sql() {
        assert_eq!(json_to_sql(Some(&json!(2))), SqlValue::Integer(2));
        assert_eq!(json_to_sql(Some(&json!(2.5))), SqlValue::Real(2.5));
        assert_eq!(json_to_sql(Some(&json!("2"))), SqlValue::Text("2".into()));
        assert_eq!(json_to_sql(Some(&json!(true))), SqlValue::Text("true".into()));
        assert_eq!(json_to_sql(None), SqlValue::Null);
    }
}
