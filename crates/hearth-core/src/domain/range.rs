use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::Period;
use crate::ValidationError;

/// A closed, inclusive interval over calendar months.
///
/// The interval may be inverted (start after end) or lie entirely outside a
/// collection's span; the range filter treats both as "matches nothing" and
/// falls back rather than erroring. A month outside 1..=12, however, is a
/// malformed range and fails loudly at [`PeriodRange::bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRange {
    pub start_month: u32,
    pub start_year: i32,
    pub end_month: u32,
    pub end_year: i32,
}

impl PeriodRange {
    pub fn new(start_month: u32, start_year: i32, end_month: u32, end_year: i32) -> Self {
        Self {
            start_month,
            start_year,
            end_month,
            end_year,
        }
    }

    pub fn from_periods(start: Period, end: Period) -> Self {
        Self {
            start_month: start.month(),
            start_year: start.year(),
            end_month: end.month(),
            end_year: end.year(),
        }
    }

    /// Decode the endpoints into comparable periods.
    pub fn bounds(&self) -> Result<(Period, Period), ValidationError> {
        let start = Period::new(self.start_year, self.start_month)?;
        let end = Period::new(self.end_year, self.end_month)?;
        Ok((start, end))
    }
}

impl Display for PeriodRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.bounds() {
            Ok((start, end)) => write!(f, "{start}..{end}"),
            Err(_) => write!(
                f,
                "{}/{}..{}/{}",
                self.start_month, self.start_year, self.end_month, self.end_year
            ),
        }
    }
}
