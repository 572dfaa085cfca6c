mod fetch;
mod range;
mod seed;
mod sql;

use serde_json::Value;
use uuid::Uuid;

use hearth_warehouse::{Warehouse, WarehouseConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::{Envelope, EnvelopeMeta};

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let warehouse = open_warehouse(cli)?;

    let result = match &cli.command {
        Command::Fetch(args) => fetch::run(args, &warehouse)?,
        Command::Range => range::run(&warehouse)?,
        Command::Sql(args) => sql::run(args, &warehouse)?,
        Command::Seed(args) => seed::run(args, &warehouse)?,
    };

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string());
    for warning in result.warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope {
        meta,
        data: result.data,
    })
}

fn open_warehouse(cli: &Cli) -> Result<Warehouse, CliError> {
    let config = match &cli.db {
        Some(path) => WarehouseConfig::at(path),
        None => WarehouseConfig::default(),
    };
    Ok(Warehouse::open(config)?)
}
