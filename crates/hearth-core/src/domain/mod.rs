mod category;
mod period;
mod range;
mod record;

pub use category::Category;
pub use period::{format_label, Period};
pub use range::PeriodRange;
pub use record::{MetricRecord, PERIOD_FIELD};
