use serde::Serialize;
use serde_json::Value;

use hearth_warehouse::{QueryGuardrails, Warehouse};

use crate::cli::SqlArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SqlColumn {
    name: String,
    #[serde(rename = "type")]
    r#type: String,
}

#[derive(Debug, Serialize)]
struct SqlResponseData {
    columns: Vec<SqlColumn>,
    rows: Vec<Vec<Value>>,
    row_count: usize,
    truncated: bool,
}

pub fn run(args: &SqlArgs, warehouse: &Warehouse) -> Result<CommandResult, CliError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::Command(String::from("query must not be empty")));
    }

    let guardrails = QueryGuardrails {
        max_rows: args.max_rows,
        query_timeout_ms: args.query_timeout_ms,
    };

    let result = warehouse
        .execute_query(query, guardrails, args.write)
        .map_err(|error| CliError::Command(format!("query execution failed: {error}")))?;

    let data = SqlResponseData {
        columns: result
            .columns
            .into_iter()
            .map(|col| SqlColumn {
                name: col.name,
                r#type: col.r#type,
            })
            .collect(),
        rows: result.rows,
        row_count: result.row_count,
        truncated: result.truncated,
    };

    let mut command_result = CommandResult::ok(serde_json::to_value(&data)?);
    if data.truncated {
        command_result = command_result.with_warning(format!(
            "result truncated at {} rows (use --max-rows to increase limit)",
            data.row_count
        ));
    }

    Ok(command_result)
}
