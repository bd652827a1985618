use thiserror::Error;

const SCHEMA_REMEDIATION: &str =
    "Run `movie_rank_aggregator init` to create the rankings/movies tables and their movie_id indexes";

/// Failures raised by the ranking store. All of them are fatal to a single
/// recomputation and are handed back to whoever dispatched it. The
/// underlying error is part of the message.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store schema not found for {operation}: {cause}")]
    SchemaNotFound {
        operation: String,
        cause: rusqlite::Error,
    },

    #[error("Failed to query {operation}: {cause}")]
    Query {
        operation: String,
        cause: rusqlite::Error,
    },

    #[error("Failed to write {operation}: {cause}")]
    Write {
        operation: String,
        cause: rusqlite::Error,
    },

    #[error("Failed to get database connection from pool: {0}")]
    Pool(r2d2::Error),
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Pool(err)
    }
}

impl StoreError {
    pub fn is_schema_not_found(&self) -> bool {
        matches!(self, StoreError::SchemaNotFound { .. })
    }

    /// Operator guidance for failures that have a known fix.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            StoreError::SchemaNotFound { .. } => Some(SCHEMA_REMEDIATION),
            _ => None,
        }
    }
}

/// Wrap a read result with the operation it belongs to
pub fn with_query_context<T>(result: rusqlite::Result<T>, operation: &str) -> Result<T, StoreError> {
    result.map_err(|cause| classify(cause, operation, false))
}

/// Wrap a write result with the operation it belongs to
pub fn with_write_context<T>(result: rusqlite::Result<T>, operation: &str) -> Result<T, StoreError> {
    result.map_err(|cause| classify(cause, operation, true))
}

fn classify(cause: rusqlite::Error, operation: &str, is_write: bool) -> StoreError {
    let operation = operation.to_string();
    if is_missing_schema(&cause) {
        StoreError::SchemaNotFound { operation, cause }
    } else if is_write {
        StoreError::Write { operation, cause }
    } else {
        StoreError::Query { operation, cause }
    }
}

fn is_missing_schema(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            message.contains("no such table") || message.contains("no such index")
        }
        _ => false,
    }
}
