//! Idempotent schema setup for the six metric category tables.
//!
//! Column names carry the human-readable headings the dashboard consumes
//! verbatim ("Month Year", "Active Listings", ...); the period label column
//! is the primary key of every table.

use ::duckdb::Connection;

struct Migration {
    version: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_category_tables",
        sql: r#"
CREATE TABLE IF NOT EXISTS listings (
    "Month Year" TEXT PRIMARY KEY,
    "Active Listings" BIGINT,
    "New Listings" BIGINT,
    "Pending Listings" BIGINT,
    "Sold Listings" BIGINT
);

CREATE TABLE IF NOT EXISTS price_trends (
    "Month Year" TEXT PRIMARY KEY,
    "Active Median List" DOUBLE,
    "Sold Median List" DOUBLE,
    "Sold Median Sale" DOUBLE
);

CREATE TABLE IF NOT EXISTS list_price_ratio (
    "Month Year" TEXT PRIMARY KEY,
    "Sale List Price %" DOUBLE
);

CREATE TABLE IF NOT EXISTS days_on_market (
    "Month Year" TEXT PRIMARY KEY,
    "Average ADOM" DOUBLE,
    "Median ADOM" DOUBLE
);

CREATE TABLE IF NOT EXISTS months_of_inventory (
    "Month Year" TEXT PRIMARY KEY,
    "Months Inventory" DOUBLE
);

CREATE TABLE IF NOT EXISTS volume (
    "Month Year" TEXT PRIMARY KEY,
    "Active Volume" DOUBLE,
    "New Volume" DOUBLE,
    "Sold Volume (Sale)" DOUBLE
);
"#,
    },
];

pub fn apply_migrations(connection: &Connection) -> Result<(), ::duckdb::Error> {
    connection.execute_batch(
        r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#,
    )?;

    for migration in MIGRATIONS {
        let applied: i64 = connection.query_row(
            "SELECT COUNT(*) FROM schema_migrations WHERE version = ?",
            [migration.version],
            |row| row.get(0),
        )?;
        if applied > 0 {
            continue;
        }
        connection.execute_batch(migration.sql)?;
        connection.execute(
            "INSERT INTO schema_migrations (version) VALUES (?)",
            [migration.version],
        )?;
    }

    Ok(())
}
