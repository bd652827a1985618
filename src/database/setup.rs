use anyhow::{Context, Result};

use super::connection::DbConn;

/// Create the rankings and movies tables plus their lookup indexes.
/// Safe to run against an already initialised database.
pub fn ensure_schema(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::info!("Database schema ready ({} statements)", statements.len());
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sql_statements_drops_blanks() {
        let statements = split_sql_statements("CREATE TABLE a (x);\n\n ;CREATE TABLE b (y);\n");
        assert_eq!(statements, vec!["CREATE TABLE a (x)", "CREATE TABLE b (y)"]);
    }

    #[test]
    fn test_schema_has_both_tables() {
        let statements = split_sql_statements(include_str!("schema.sql"));
        assert_eq!(statements.len(), 4);
        assert!(statements.iter().any(|s| s.contains("TABLE IF NOT EXISTS rankings")));
        assert!(statements.iter().any(|s| s.contains("TABLE IF NOT EXISTS movies")));
    }
}
