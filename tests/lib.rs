//! Shared fixtures for the workspace behavior tests.

use serde_json::{json, Map, Value};
use tempfile::TempDir;

use hearth_core::{MetricRecord, PERIOD_FIELD};
use hearth_warehouse::{Warehouse, WarehouseConfig};

/// A minimal record carrying only the period label.
pub fn record(label: &str) -> MetricRecord {
    let mut fields = Map::new();
    fields.insert(PERIOD_FIELD.to_string(), Value::String(label.to_string()));
    MetricRecord::from(fields)
}

/// A record with the period label plus one metric column.
pub fn record_with(label: &str, active_listings: i64) -> MetricRecord {
    let mut fields = Map::new();
    fields.insert(PERIOD_FIELD.to_string(), Value::String(label.to_string()));
    fields.insert("Active Listings".to_string(), json!(active_listings));
    MetricRecord::from(fields)
}

pub fn records(labels: &[&str]) -> Vec<MetricRecord> {
    labels.iter().map(|label| record(label)).collect()
}

/// Opens a fresh warehouse under a temporary directory. The directory
/// guard must outlive the warehouse.
pub fn temp_warehouse() -> (TempDir, Warehouse) {
    let temp = tempfile::tempdir().expect("tempdir");
    let warehouse = Warehouse::open(WarehouseConfig {
        db_path: temp.path().join("market.duckdb"),
        max_pool_size: 2,
    })
    .expect("warehouse open");
    (temp, warehouse)
}
