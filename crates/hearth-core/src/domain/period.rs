use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

use crate::ValidationError;

/// The twelve recognized month abbreviations, in calendar order.
/// Matching is case-sensitive: `mar-25` does not decode.
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One calendar month, decoded from a `MMM-YY` period label.
///
/// Ordering is year-major, month-minor; two periods with the same year and
/// month are equal. Field order matters for the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u8,
}

impl Period {
    /// Build a period from a 4-digit year and a 1-12 month.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::MonthOutOfRange { month });
        }
        Ok(Self {
            year,
            month: month as u8,
        })
    }

    /// Decode a `MMM-YY` label, e.g. `Mar-25` -> (2025, 3).
    ///
    /// The century is resolved with the fixed rule `year = 2000 + YY`; the
    /// data domain never carries pre-2000 records.
    pub fn parse(label: &str) -> Result<Self, ValidationError> {
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel);
        }
        let (month_token, year_token) =
            label
                .split_once('-')
                .ok_or_else(|| ValidationError::MissingSeparator {
                    value: label.to_owned(),
                })?;
        let month = month_number(month_token).ok_or_else(|| ValidationError::UnknownMonth {
            value: month_token.to_owned(),
        })?;
        if year_token.len() != 2 || !year_token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidYear {
                value: year_token.to_owned(),
            });
        }
        let short_year: i32 = year_token
            .parse()
            .map_err(|_| ValidationError::InvalidYear {
                value: year_token.to_owned(),
            })?;
        Ok(Self {
            year: 2000 + short_year,
            month,
        })
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number in 1..=12.
    pub const fn month(self) -> u32 {
        self.month as u32
    }

    /// Canonical `MMM-YY` label for this period.
    pub fn label(self) -> String {
        // month is 1..=12 by construction, so this cannot fail
        format!(
            "{}-{:02}",
            MONTHS[(self.month - 1) as usize],
            self.year.rem_euclid(100)
        )
    }

    /// Calendar subtraction, rolling over year boundaries:
    /// (2025, 3) minus 12 months is (2024, 3).
    pub fn months_back(self, months: u32) -> Self {
        let total = self.year * 12 + i32::from(self.month) - 1 - months as i32;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u8,
        }
    }
}

/// Encode a 1-12 month and a 4-digit year as a `MMM-YY` label.
///
/// This is the display-formatting path: an out-of-range month yields a
/// diagnostic error rather than a panic, and callers render nothing.
pub fn format_label(month: u32, year: i32) -> Result<String, ValidationError> {
    Period::new(year, month).map(Period::label)
}

fn month_number(token: &str) -> Option<u8> {
    MONTHS
        .iter()
        .position(|month| *month == token)
        .map(|index| (index + 1) as u8)
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl From<OffsetDateTime> for Period {
    fn from(value: OffsetDateTime) -> Self {
        Self {
            year: value.year(),
            month: u8::from(value.month()),
        }
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
