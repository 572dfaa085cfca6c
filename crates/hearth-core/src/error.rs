use thiserror::Error;

/// Validation and decoding errors exposed by `hearth-core`.
///
/// Period label failures are expected inputs: consuming operations skip the
/// offending record and carry on. None of these abort a batch operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("period label cannot be empty")]
    EmptyLabel,
    #[error("period label '{value}' is missing the '-' separator")]
    MissingSeparator { value: String },
    #[error("unknown month abbreviation '{value}', expected Jan..Dec")]
    UnknownMonth { value: String },
    #[error("year segment '{value}' must be two decimal digits")]
    InvalidYear { value: String },

    #[error("month {month} is out of range 1..=12")]
    MonthOutOfRange { month: u32 },

    #[error("record has no usable '{field}' field")]
    MissingPeriodField { field: &'static str },

    #[error(
        "invalid category '{value}', expected one of listings, prices, ratio, dom, inventory, volume"
    )]
    UnknownCategory { value: String },
}
