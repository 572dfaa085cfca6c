//! Range filtering and default range selection over metric collections.
//!
//! Both operations are pure: they never mutate the caller's collection and
//! depend only on their arguments ("now" is injected, not read from a clock).

use crate::domain::{MetricRecord, Period, PeriodRange};
use crate::ValidationError;

/// The outcome of a range filter pass. `fell_back` is set when the range
/// matched nothing and the whole collection was returned instead, so callers
/// can surface the substitution to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub records: Vec<MetricRecord>,
    pub fell_back: bool,
}

/// Filter a collection down to the records inside `range`, sorted ascending
/// by period.
///
/// Records whose period label does not decode are skipped with a warning;
/// they never fail the operation. If the requested range matches nothing but
/// the collection has records, the entire collection is returned instead of
/// an empty result: decodable records sorted ascending, undecodable records
/// keeping their original positions (they have no period to sort by). That
/// fallback is a deliberate product decision, not a bug: an out-of-span or
/// inverted range must never blank the dashboard, and each category falls
/// back independently of the others.
///
/// The only loud failure is a structurally malformed range (month outside
/// 1..=12).
pub fn filter_by_range(
    records: &[MetricRecord],
    range: &PeriodRange,
) -> Result<FilterOutcome, ValidationError> {
    // Nothing to filter and nothing to fall back to.
    if records.is_empty() {
        return Ok(FilterOutcome {
            records: Vec::new(),
            fell_back: false,
        });
    }

    let (start, end) = range.bounds()?;

    let decoded: Vec<(Option<Period>, &MetricRecord)> = records
        .iter()
        .map(|record| match record.period() {
            Ok(period) => (Some(period), record),
            Err(error) => {
                tracing::warn!(
                    label = record.period_label().unwrap_or_default(),
                    %error,
                    "skipping record with unusable period label"
                );
                (None, record)
            }
        })
        .collect();

    let mut retained: Vec<(Period, &MetricRecord)> = decoded
        .iter()
        .filter_map(|&(period, record)| {
            period
                .filter(|period| (start..=end).contains(period))
                .map(|period| (period, record))
        })
        .collect();

    if retained.is_empty() {
        tracing::warn!(
            %range,
            records = records.len(),
            "range matched no records, returning the full series"
        );
        return Ok(FilterOutcome {
            records: full_series(&decoded),
            fell_back: true,
        });
    }

    // sort_by_key is stable: equal periods keep their input order
    retained.sort_by_key(|(period, _)| *period);

    Ok(FilterOutcome {
        records: retained
            .into_iter()
            .map(|(_, record)| record.clone())
            .collect(),
        fell_back: false,
    })
}

/// The fallback rendition of the whole collection: decodable records sorted
/// ascending among themselves, undecodable records pinned to their original
/// positions.
fn full_series(decoded: &[(Option<Period>, &MetricRecord)]) -> Vec<MetricRecord> {
    let mut sorted: Vec<(Period, &MetricRecord)> = decoded
        .iter()
        .filter_map(|&(period, record)| period.map(|period| (period, record)))
        .collect();
    sorted.sort_by_key(|(period, _)| *period);

    let mut in_order = sorted.into_iter().map(|(_, record)| record);
    decoded
        .iter()
        .map(|&(period, record)| {
            if period.is_some() {
                in_order.next().unwrap_or(record)
            } else {
                record
            }
        })
        .map(Clone::clone)
        .collect()
}

/// Derive the default range from one or more collections: the latest period
/// observed anywhere, back 12 months.
///
/// Records that fail to decode are ignored; if nothing decodes at all, the
/// injected `now` stands in for the latest period. This never fails.
pub fn default_range<'a, I>(collections: I, now: Period) -> PeriodRange
where
    I: IntoIterator<Item = &'a [MetricRecord]>,
{
    let mut latest: Option<Period> = None;
    for collection in collections {
        for record in collection {
            if let Ok(period) = record.period() {
                if latest.is_none_or(|current| period > current) {
                    latest = Some(period);
                }
            }
        }
    }

    let end = latest.unwrap_or(now);
    PeriodRange::from_periods(end.months_back(12), end)
}
