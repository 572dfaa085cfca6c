use std::collections::BTreeMap;
use std::fs;
use std::str::FromStr;

use serde_json::json;

use hearth_core::{Category, MetricRecord};
use hearth_warehouse::Warehouse;

use crate::cli::SeedArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &SeedArgs, warehouse: &Warehouse) -> Result<CommandResult, CliError> {
    let payload = fs::read_to_string(&args.file)?;
    let fixtures: BTreeMap<String, Vec<MetricRecord>> = serde_json::from_str(&payload)?;

    let mut loaded = BTreeMap::new();
    for (name, records) in &fixtures {
        let category = Category::from_str(name)?;
        warehouse.load_records(category, records)?;
        loaded.insert(category.as_str(), records.len());
    }

    Ok(CommandResult::ok(json!({
        "file": args.file.display().to_string(),
        "loaded": loaded,
    })))
}
