//! Behavior tests for range filtering across metric collections.
//!
//! These verify the user-visible contract: inclusive bounds, stable
//! chronological output, and the full-series fallback applied per
//! category rather than across the whole dashboard.

use hearth_core::{default_range, filter_by_range, Period, PeriodRange};
use hearth_tests::{record, records};

#[test]
fn when_range_covers_part_of_the_series_only_those_months_survive() {
    // Given: a year of listings data in scrambled order
    let series = records(&[
        "Dec-24", "Jan-24", "Jul-24", "Mar-24", "Oct-24", "May-24",
    ]);

    // When: the user narrows to March through July
    let range = PeriodRange::new(3, 2024, 7, 2024);
    let outcome = filter_by_range(&series, &range).expect("filter");

    // Then: both endpoints are kept and the output is chronological
    assert!(!outcome.fell_back);
    let labels: Vec<_> = outcome
        .records
        .iter()
        .map(|r| r.period_label().unwrap_or_default().to_string())
        .collect();
    assert_eq!(labels, vec!["Mar-24", "May-24", "Jul-24"]);
}

#[test]
fn when_range_misses_one_category_only_that_category_falls_back() {
    // Given: listings spanning 2024 and volume starting mid-2024
    let listings = records(&[
        "Jan-24", "Feb-24", "Mar-24", "Apr-24", "May-24", "Jun-24",
        "Jul-24", "Aug-24", "Sep-24", "Oct-24", "Nov-24", "Dec-24",
    ]);
    let volume = records(&["Jun-24", "Jul-24", "Aug-24", "Sep-24", "Oct-24", "Nov-24", "Dec-24"]);

    // When: a range that matches listings but not the first half of volume
    let range = PeriodRange::new(1, 2024, 5, 2024);
    let filtered_listings = filter_by_range(&listings, &range).expect("filter listings");
    let filtered_volume = filter_by_range(&volume, &range).expect("filter volume");

    // Then: listings are narrowed while volume falls back to its full series
    assert!(!filtered_listings.fell_back);
    assert_eq!(filtered_listings.records.len(), 5);
    assert!(filtered_volume.fell_back);
    assert_eq!(filtered_volume.records.len(), 7);
    assert_eq!(
        filtered_volume.records[0].period_label(),
        Some("Jun-24"),
        "fallback output stays chronological"
    );
}

#[test]
fn when_range_matches_nothing_anywhere_every_category_shows_its_full_series() {
    let listings = records(&["Mar-24", "Apr-24"]);
    let volume = records(&["Jun-24"]);

    let range = PeriodRange::new(1, 2023, 12, 2023);

    assert_eq!(
        filter_by_range(&listings, &range).expect("filter").records.len(),
        2
    );
    assert_eq!(
        filter_by_range(&volume, &range).expect("filter").records.len(),
        1
    );
}

#[test]
fn when_filter_is_applied_twice_the_result_does_not_change() {
    let series = records(&["Nov-23", "Jan-24", "Mar-24", "May-24"]);
    let range = PeriodRange::new(1, 2024, 12, 2024);

    let once = filter_by_range(&series, &range).expect("first pass");
    let twice = filter_by_range(&once.records, &range).expect("second pass");

    assert_eq!(once, twice);
}

#[test]
fn when_no_category_has_data_the_default_range_ends_at_the_current_month() {
    let empty: Vec<Vec<_>> = vec![Vec::new(), Vec::new()];
    let now = Period::new(2025, 6).expect("period");

    let range = default_range(empty.iter().map(Vec::as_slice), now);

    assert_eq!((range.end_month, range.end_year), (6, 2025));
    assert_eq!((range.start_month, range.start_year), (6, 2024));
}

#[test]
fn when_categories_disagree_on_latest_period_the_newest_wins() {
    let listings = records(&["Oct-24", "Nov-24"]);
    let volume = records(&["Mar-25"]);
    let now = Period::new(2025, 8).expect("period");

    let range = default_range(
        [listings.as_slice(), volume.as_slice()],
        now,
    );

    // Then: the range ends at Mar-25 and starts twelve months earlier
    assert_eq!((range.end_month, range.end_year), (3, 2025));
    assert_eq!((range.start_month, range.start_year), (3, 2024));
}

#[test]
fn when_records_carry_garbage_labels_they_are_dropped_not_fatal() {
    let mut series = records(&["Mar-24", "Apr-24"]);
    series.push(record("March 2024"));
    series.push(record("mar-24"));

    let range = PeriodRange::new(1, 2024, 12, 2024);
    let outcome = filter_by_range(&series, &range).expect("filter");

    assert!(!outcome.fell_back);
    assert_eq!(outcome.records.len(), 2, "only canonical labels survive");
}

#[test]
fn when_the_fallback_fires_garbage_labeled_records_come_back_too() {
    // Given: a series where one record's label never decodes
    let series = vec![record("Jan-24"), record("garbage")];

    // When: the range lies entirely outside the data's span
    let range = PeriodRange::new(1, 2019, 12, 2019);
    let outcome = filter_by_range(&series, &range).expect("filter");

    // Then: the whole collection comes back, not just the decodable part
    assert!(outcome.fell_back);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].period_label(), Some("Jan-24"));
    assert_eq!(outcome.records[1].period_label(), Some("garbage"));
}

#[test]
fn when_nothing_in_the_series_decodes_the_fallback_still_shows_everything() {
    let series = vec![record("garbage"), record("also-garbage")];

    let range = PeriodRange::new(1, 2024, 12, 2024);
    let outcome = filter_by_range(&series, &range).expect("filter");

    assert!(outcome.fell_back);
    assert_eq!(outcome.records.len(), 2, "input order is preserved");
    assert_eq!(outcome.records[0].period_label(), Some("garbage"));
}
