use std::str::FromStr;

use time::OffsetDateTime;

use hearth_core::{default_range, filter_by_range, Category, Period, PeriodRange};
use hearth_warehouse::Warehouse;

use crate::cli::FetchArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &FetchArgs, warehouse: &Warehouse) -> Result<CommandResult, CliError> {
    let category = Category::from_str(&args.category)?;
    let records = warehouse.fetch_category(category)?;

    let (records, fell_back) = match resolve_range(args, &records)? {
        Some(range) => {
            let outcome = filter_by_range(&records, &range)?;
            (outcome.records, outcome.fell_back)
        }
        None => (records, false),
    };

    let mut result = CommandResult::ok(serde_json::to_value(&records)?);
    if fell_back {
        result = result
            .with_warning("range matched no records; showing the full series sorted by period");
    }
    Ok(result)
}

fn resolve_range(
    args: &FetchArgs,
    records: &[hearth_core::MetricRecord],
) -> Result<Option<PeriodRange>, CliError> {
    if args.last_year {
        let now = Period::from(OffsetDateTime::now_utc());
        return Ok(Some(default_range([records], now)));
    }

    match (&args.start, &args.end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start = Period::parse(start)?;
            let end = Period::parse(end)?;
            Ok(Some(PeriodRange::from_periods(start, end)))
        }
        _ => Err(CliError::Command(String::from(
            "--start and --end must be given together",
        ))),
    }
}
