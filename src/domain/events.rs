use rusqlite::types::Value as SqlValue;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::database::RankingRecord;

/// State of one ranking record on one side of a change.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSnapshot {
    #[serde(default, deserialize_with = "deserialize_movie_id")]
    pub movie_id: Option<String>,
    #[serde(default)]
    pub rank_index: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub ranked: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub title: Option<String>,
}

/// A ranking record was created, updated or deleted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RankingChangeEvent {
    #[serde(default)]
    pub before: Option<RankingSnapshot>,
    #[serde(default)]
    pub after: Option<RankingSnapshot>,
}

impl RankingChangeEvent {
    pub fn new(before: Option<RankingSnapshot>, after: Option<RankingSnapshot>) -> Self {
        Self { before, after }
    }

    /// Movie the change belongs to. The after-state wins so that deletions
    /// still resolve through the before-state.
    pub fn movie_id(&self) -> Option<&str> {
        snapshot_movie_id(&self.after).or_else(|| snapshot_movie_id(&self.before))
    }
}

fn snapshot_movie_id(snapshot: &Option<RankingSnapshot>) -> Option<&str> {
    snapshot
        .as_ref()
        .and_then(|s| s.movie_id.as_deref())
        .filter(|id| !id.is_empty())
}

/// Movie ids are opaque, but clients commonly send them as JSON numbers.
/// A numeric zero is as absent as an empty string.
fn deserialize_movie_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(id)) if id.as_f64() != Some(0.0) => Some(id.to_string()),
        _ => None,
    })
}

// Only the movie id matters for recomputation, so a mistyped field is
// dropped instead of rejecting the whole event.
fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(flag)) => Some(flag),
        _ => None,
    })
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

impl From<&RankingRecord> for RankingSnapshot {
    fn from(record: &RankingRecord) -> Self {
        Self {
            movie_id: record.movie_id.clone(),
            rank_index: sql_to_json(&record.rank_index),
            ranked: record.ranked,
            title: record.title.clone(),
        }
    }
}

fn sql_to_json(value: &SqlValue) -> Option<Value> {
    match value {
        SqlValue::Integer(v) => Some(Value::from(*v)),
        SqlValue::Real(v) => serde_json::Number::from_f64(*v).map(Value::Number),
        SqlValue::Text(v) => Some(Value::String(v.clone())),
        SqlValue::Null | SqlValue::Blob(_) => None,
    }
}
