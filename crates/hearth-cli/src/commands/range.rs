use time::OffsetDateTime;

use hearth_core::{default_range, Category, Period};
use hearth_warehouse::Warehouse;

use crate::error::CliError;

use super::CommandResult;

pub fn run(warehouse: &Warehouse) -> Result<CommandResult, CliError> {
    let mut collections = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        collections.push(warehouse.fetch_category(category)?);
    }

    let now = Period::from(OffsetDateTime::now_utc());
    let range = default_range(collections.iter().map(Vec::as_slice), now);

    Ok(CommandResult::ok(serde_json::to_value(range)?))
}
