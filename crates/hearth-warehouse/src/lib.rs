//! DuckDB-backed store for monthly real-estate market statistics.
//!
//! One table per metric category, each keyed by the `"Month Year"` period
//! label. The serving path is strictly read-only; writes exist only for
//! schema setup and fixture seeding. Rows are surfaced as JSON field-maps
//! ([`MetricRecord`]) so the domain layer stays agnostic of each table's
//! shape.

pub mod migrations;
pub mod pool;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use ::duckdb::types::Value as DuckValue;
use ::duckdb::{Connection, ToSql};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use hearth_core::{Category, MetricRecord};

pub use pool::{AccessMode, ConnectionPool, PooledConnection};

/// Errors that can occur during warehouse operations.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Query was rejected before execution (policy, guardrails, shape).
    #[error("query rejected: {0}")]
    QueryRejected(String),

    #[error("query timed out after {timeout_ms}ms")]
    QueryTimeout { timeout_ms: u64 },
}

/// Configuration for the warehouse database.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    /// Path to the `DuckDB` database file.
    pub db_path: PathBuf,
    /// Maximum number of idle connections kept around.
    pub max_pool_size: usize,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            db_path: resolve_hearth_home().join("market.duckdb"),
            max_pool_size: 4,
        }
    }
}

impl WarehouseConfig {
    pub fn at(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}

/// Limits applied to ad-hoc inspection queries.
#[derive(Debug, Clone, Copy)]
pub struct QueryGuardrails {
    pub max_rows: usize,
    pub query_timeout_ms: u64,
}

impl Default for QueryGuardrails {
    fn default() -> Self {
        Self {
            max_rows: 10_000,
            query_timeout_ms: 5_000,
        }
    }
}

impl QueryGuardrails {
    fn timeout(self) -> Duration {
        Duration::from_millis(self.query_timeout_ms.max(1))
    }

    fn validate(self) -> Result<(), WarehouseError> {
        if self.max_rows == 0 {
            return Err(WarehouseError::QueryRejected(String::from(
                "--max-rows must be greater than zero",
            )));
        }
        if self.query_timeout_ms == 0 {
            return Err(WarehouseError::QueryRejected(String::from(
                "--query-timeout-ms must be greater than zero",
            )));
        }
        Ok(())
    }
}

/// Column metadata for ad-hoc query results.
#[derive(Debug, Clone, Serialize)]
pub struct SqlColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
}

/// Result of an ad-hoc query execution.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub columns: Vec<SqlColumn>,
    pub rows: Vec<Vec<Value>>,
    pub row_count: usize,
    pub truncated: bool,
}

/// The warehouse interface over the market statistics file.
#[derive(Clone)]
pub struct Warehouse {
    pool: ConnectionPool,
}

impl Warehouse {
    /// Open the warehouse at the default location (`HEARTH_HOME`).
    pub fn open_default() -> Result<Self, WarehouseError> {
        Self::open(WarehouseConfig::default())
    }

    pub fn open(config: WarehouseConfig) -> Result<Self, WarehouseError> {
        if let Some(parent) = config.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let pool = ConnectionPool::new(config.db_path.clone(), config.max_pool_size);
        let warehouse = Self { pool };
        warehouse.initialize()?;
        Ok(warehouse)
    }

    /// Apply schema migrations. Idempotent.
    pub fn initialize(&self) -> Result<(), WarehouseError> {
        let connection = self.pool.acquire(AccessMode::ReadWrite)?;
        migrations::apply_migrations(&connection)?;
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        self.pool.db_path()
    }

    /// Fetch every record of one category as JSON field-maps.
    ///
    /// Row order is unspecified; chronological ordering is the domain
    /// layer's job. An absent table degrades to an empty collection,
    /// matching the contract that "no data" is never an error on the read
    /// path; any other failure (corrupt file, I/O) propagates.
    pub fn fetch_category(&self, category: Category) -> Result<Vec<MetricRecord>, WarehouseError> {
        let connection = self.pool.acquire(AccessMode::ReadOnly)?;
        let sql = format!("SELECT * FROM {}", category.table());

        let mut statement = match connection.prepare(&sql) {
            Ok(statement) => statement,
            Err(error) if is_missing_table(&error) => {
                tracing::warn!(category = %category, %error, "category table absent, serving empty collection");
                return Ok(Vec::new());
            }
            Err(error) => return Err(error.into()),
        };

        let _ = statement.query([] as [&dyn ToSql; 0])?;
        let column_count = statement.column_count();
        let mut columns = Vec::with_capacity(column_count);
        for index in 0..column_count {
            columns.push(statement.column_name(index)?.to_string());
        }

        let mut rows = statement.query([] as [&dyn ToSql; 0])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut fields = Map::with_capacity(column_count);
            for (index, name) in columns.iter().enumerate() {
                let value: DuckValue = row.get(index)?;
                fields.insert(name.clone(), to_json_value(value));
            }
            records.push(MetricRecord::new(fields));
        }

        Ok(records)
    }

    /// Insert records into a category table. Parameterized throughout; used
    /// by fixture seeding and tests, never by the serving path.
    pub fn load_records(
        &self,
        category: Category,
        records: &[MetricRecord],
    ) -> Result<(), WarehouseError> {
        if records.is_empty() {
            return Ok(());
        }

        let connection = self.pool.acquire(AccessMode::ReadWrite)?;
        connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<(), WarehouseError> {
            for record in records {
                let fields = record.fields();
                let column_list = fields
                    .keys()
                    .map(|name| quote_identifier(name))
                    .collect::<Vec<_>>()
                    .join(", ");
                let placeholders = vec!["?"; fields.len()].join(", ");
                let sql = format!(
                    "INSERT OR REPLACE INTO {table} ({column_list}) VALUES ({placeholders})",
                    table = category.table(),
                );

                let params: Vec<Box<dyn ToSql>> =
                    fields.values().map(to_sql_param).collect();
                let param_refs: Vec<&dyn ToSql> =
                    params.iter().map(AsRef::as_ref).collect();
                connection.execute(&sql, param_refs.as_slice())?;
            }
            Ok(())
        })();

        finalize_transaction(&connection, result)
    }

    /// Execute an ad-hoc inspection query with guardrails.
    ///
    /// Read-only mode accepts a single SELECT/CTE statement; anything else
    /// requires `allow_write`.
    pub fn execute_query(
        &self,
        sql: &str,
        guardrails: QueryGuardrails,
        allow_write: bool,
    ) -> Result<QueryResult, WarehouseError> {
        guardrails.validate()?;
        let sql = normalize_sql(sql)?;

        if !allow_write {
            enforce_read_only_query(sql)?;
        }

        let mode = if allow_write {
            AccessMode::ReadWrite
        } else {
            AccessMode::ReadOnly
        };
        let connection = self.pool.acquire(mode)?;

        let started = Instant::now();
        if is_select_like(sql) {
            run_select(&connection, sql, guardrails, started)
        } else if allow_write {
            connection.execute_batch(sql)?;
            ensure_timeout(started, guardrails.timeout())?;
            Ok(QueryResult {
                columns: Vec::new(),
                rows: Vec::new(),
                row_count: 0,
                truncated: false,
            })
        } else {
            Err(WarehouseError::QueryRejected(String::from(
                "only SELECT/CTE queries are allowed without --write",
            )))
        }
    }
}

fn run_select(
    connection: &Connection,
    sql: &str,
    guardrails: QueryGuardrails,
    started: Instant,
) -> Result<QueryResult, WarehouseError> {
    let mut statement = connection.prepare(sql)?;
    let _ = statement.query([] as [&dyn ToSql; 0])?;

    // Column metadata is only available after execution.
    let column_count = statement.column_count();
    let mut columns = Vec::with_capacity(column_count);
    for index in 0..column_count {
        let name = statement.column_name(index)?.to_string();
        let dtype = statement.column_type(index);
        columns.push(SqlColumn {
            name,
            r#type: dtype.to_string(),
        });
    }

    let mut cursor = statement.query([] as [&dyn ToSql; 0])?;
    let mut rows = Vec::new();
    let mut truncated = false;

    while let Some(row) = cursor.next()? {
        ensure_timeout(started, guardrails.timeout())?;

        if rows.len() >= guardrails.max_rows {
            truncated = true;
            break;
        }

        let mut output = Vec::with_capacity(column_count);
        for index in 0..column_count {
            let value: DuckValue = row.get(index)?;
            output.push(to_json_value(value));
        }
        rows.push(output);
    }

    ensure_timeout(started, guardrails.timeout())?;

    Ok(QueryResult {
        columns,
        row_count: rows.len(),
        rows,
        truncated,
    })
}

fn finalize_transaction<T>(
    connection: &Connection,
    result: Result<T, WarehouseError>,
) -> Result<T, WarehouseError> {
    match result {
        Ok(value) => {
            connection.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(error) => {
            let _ = connection.execute_batch("ROLLBACK");
            Err(error)
        }
    }
}

fn to_json_value(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(value) => Value::Bool(value),
        DuckValue::TinyInt(value) => Value::Number(Number::from(value)),
        DuckValue::SmallInt(value) => Value::Number(Number::from(value)),
        DuckValue::Int(value) => Value::Number(Number::from(value)),
        DuckValue::BigInt(value) => Value::Number(Number::from(value)),
        DuckValue::UTinyInt(value) => Value::Number(Number::from(value)),
        DuckValue::USmallInt(value) => Value::Number(Number::from(value)),
        DuckValue::UInt(value) => Value::Number(Number::from(value)),
        DuckValue::UBigInt(value) => Value::Number(Number::from(value)),
        DuckValue::Float(value) => number_from_f64(f64::from(value)),
        DuckValue::Double(value) => number_from_f64(value),
        DuckValue::Text(value) => Value::String(value),
        other => Value::String(format!("{other:?}")),
    }
}

fn number_from_f64(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn to_sql_param(value: &Value) -> Box<dyn ToSql> {
    match value {
        Value::Null => Box::new(None::<String>),
        Value::Bool(value) => Box::new(*value),
        Value::Number(value) => {
            if let Some(integer) = value.as_i64() {
                Box::new(integer)
            } else {
                Box::new(value.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(value) => Box::new(value.clone()),
        other => Box::new(other.to_string()),
    }
}

// DuckDB reports a dropped or never-created table as a catalog error; only
// that condition is a benign "no data yet" on the read path.
fn is_missing_table(error: &::duckdb::Error) -> bool {
    matches!(
        error,
        ::duckdb::Error::DuckDBFailure(_, Some(message))
            if message.contains("Catalog Error") && message.contains("does not exist")
    )
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn normalize_sql(sql: &str) -> Result<&str, WarehouseError> {
    let normalized = sql.trim();
    if normalized.is_empty() {
        return Err(WarehouseError::QueryRejected(String::from(
            "query must not be empty",
        )));
    }
    Ok(normalized.trim_end_matches(';').trim())
}

fn enforce_read_only_query(sql: &str) -> Result<(), WarehouseError> {
    if !is_select_like(sql) {
        return Err(WarehouseError::QueryRejected(String::from(
            "read-only mode accepts only SELECT/CTE queries; use --write for write statements",
        )));
    }
    if sql.split(';').filter(|part| !part.trim().is_empty()).count() > 1 {
        return Err(WarehouseError::QueryRejected(String::from(
            "multiple SQL statements are not allowed in read-only mode",
        )));
    }
    Ok(())
}

fn is_select_like(sql: &str) -> bool {
    let first_keyword = sql
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();
    matches!(
        first_keyword.as_str(),
        "SELECT" | "WITH" | "EXPLAIN" | "SHOW" | "DESCRIBE"
    )
}

fn ensure_timeout(started: Instant, timeout: Duration) -> Result<(), WarehouseError> {
    if started.elapsed() > timeout {
        return Err(WarehouseError::QueryTimeout {
            timeout_ms: timeout.as_millis().min(u128::from(u64::MAX)) as u64,
        });
    }
    Ok(())
}

fn resolve_hearth_home() -> PathBuf {
    if let Some(path) = env::var_os("HEARTH_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".hearth");
    }

    PathBuf::from(".hearth")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn record(label: &str, active: i64) -> MetricRecord {
        match json!({"Month Year": label, "Active Listings": active}) {
            Value::Object(map) => MetricRecord::new(map),
            _ => unreachable!(),
        }
    }

    fn open_temp(dir: &tempfile::TempDir) -> Warehouse {
        Warehouse::open(WarehouseConfig::at(dir.path().join("market.duckdb")))
            .expect("warehouse open")
    }

    #[test]
    fn initializes_all_category_tables() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);

        for category in Category::ALL {
            let result = warehouse
                .execute_query(
                    &format!("SELECT COUNT(*) FROM {}", category.table()),
                    QueryGuardrails::default(),
                    false,
                )
                .expect("query");
            assert_eq!(result.row_count, 1, "table {} must exist", category.table());
        }
    }

    #[test]
    fn loaded_records_round_trip_as_field_maps() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);

        warehouse
            .load_records(
                Category::Listings,
                &[record("Jan-24", 42), record("Feb-24", 37)],
            )
            .expect("load");

        let records = warehouse
            .fetch_category(Category::Listings)
            .expect("fetch");
        assert_eq!(records.len(), 2);
        let labels: Vec<_> = records.iter().filter_map(|r| r.period_label()).collect();
        assert!(labels.contains(&"Jan-24"));
        assert!(labels.contains(&"Feb-24"));
    }

    #[test]
    fn loading_the_same_period_twice_replaces_the_row() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);

        warehouse
            .load_records(Category::Listings, &[record("Jan-24", 42)])
            .expect("first load");
        warehouse
            .load_records(Category::Listings, &[record("Jan-24", 50)])
            .expect("second load");

        let records = warehouse
            .fetch_category(Category::Listings)
            .expect("fetch");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Active Listings"), Some(&json!(50)));
    }

    #[test]
    fn absent_category_table_serves_an_empty_collection() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);

        warehouse
            .execute_query("DROP TABLE days_on_market", QueryGuardrails::default(), true)
            .expect("drop");

        let records = warehouse
            .fetch_category(Category::DaysOnMarket)
            .expect("absent table is not an error");
        assert!(records.is_empty());
    }

    #[test]
    fn only_catalog_errors_count_as_a_missing_table() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);
        let connection = warehouse
            .pool
            .acquire(AccessMode::ReadOnly)
            .expect("connection");

        let missing = connection
            .prepare("SELECT * FROM no_such_table")
            .expect_err("catalog error");
        assert!(is_missing_table(&missing));

        // A binder failure on an existing table must propagate, not
        // degrade to "no data".
        let binder = connection
            .prepare("SELECT no_such_column FROM listings")
            .expect_err("binder error");
        assert!(!is_missing_table(&binder));
    }

    #[test]
    fn empty_category_serves_an_empty_collection() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);

        let records = warehouse.fetch_category(Category::Volume).expect("fetch");
        assert!(records.is_empty());
    }

    #[test]
    fn read_only_mode_rejects_write_query() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);

        let error = warehouse
            .execute_query(
                "CREATE TABLE scratch (id INTEGER)",
                QueryGuardrails::default(),
                false,
            )
            .expect_err("should reject");
        assert!(matches!(error, WarehouseError::QueryRejected(_)));
    }

    #[test]
    fn rejects_multiple_statements_in_read_only_mode() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);

        let error = warehouse
            .execute_query(
                "SELECT 1; SELECT 2",
                QueryGuardrails::default(),
                false,
            )
            .expect_err("should reject");
        assert!(matches!(error, WarehouseError::QueryRejected(_)));
    }

    #[test]
    fn zero_guardrails_are_rejected() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);

        let error = warehouse
            .execute_query(
                "SELECT 1",
                QueryGuardrails {
                    max_rows: 0,
                    query_timeout_ms: 1_000,
                },
                false,
            )
            .expect_err("zero max_rows should fail");
        assert!(matches!(error, WarehouseError::QueryRejected(_)));
    }

    #[test]
    fn results_are_truncated_at_max_rows() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_temp(&temp);

        let records: Vec<_> = (1..=12)
            .map(|month| {
                record(
                    &hearth_core::format_label(month, 2024).expect("valid month"),
                    month as i64,
                )
            })
            .collect();
        warehouse
            .load_records(Category::Listings, &records)
            .expect("load");

        let result = warehouse
            .execute_query(
                "SELECT * FROM listings",
                QueryGuardrails {
                    max_rows: 5,
                    query_timeout_ms: 5_000,
                },
                false,
            )
            .expect("query");
        assert_eq!(result.row_count, 5);
        assert!(result.truncated);
    }
}
