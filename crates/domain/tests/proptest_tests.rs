//! Property-based tests for the calendar domain
//!
//! These tests use proptest to verify invariants across many random inputs.

use chrono::{Datelike, NaiveDate};
use domain::{
    DateKey, DayAggregate, EventId, EventKind, EventRecord, MonthGrid, YearMonth, days_in_month,
};
use proptest::prelude::*;

// ============================================================================
// Month grid
// ============================================================================

mod month_grid_tests {
    use super::*;

    proptest! {
        #[test]
        fn current_month_portion_has_every_day(year in any::<i32>(), month in 1u8..=12) {
            let grid = MonthGrid::for_month(year, month).unwrap();
            let keys: Vec<DateKey> = grid.current_month_keys().collect();
            prop_assert_eq!(keys.len(), usize::from(days_in_month(year, month)));
            for (i, key) in keys.iter().enumerate() {
                prop_assert_eq!(usize::from(key.day()), i + 1);
                prop_assert_eq!(key.month(), month);
                prop_assert_eq!(key.year(), year);
            }
        }

        #[test]
        fn filler_precedes_first_day(year in any::<i32>(), month in 1u8..=12) {
            let grid = MonthGrid::for_month(year, month).unwrap();
            let filler = grid.leading_filler_count();
            prop_assert!(filler < 7);
            prop_assert!(grid.cells()[..filler].iter().all(|c| !c.in_current_month()));
            prop_assert!(grid.cells()[filler..].iter().all(|c| c.in_current_month()));
            prop_assert_eq!(filler, grid.cells()[filler].date_key().unwrap().weekday().index());
        }

        #[test]
        fn filler_ends_on_last_day_of_previous_month(year in -5000i32..5000, month in 1u8..=12) {
            let grid = MonthGrid::for_month(year, month).unwrap();
            let previous = YearMonth::new(year, month).unwrap().previous();
            if let Some(last) = grid.cells()[..grid.leading_filler_count()].last() {
                prop_assert_eq!(last.day_number(), previous.days());
            }
        }

        #[test]
        fn trailing_filler_makes_whole_weeks(year in any::<i32>(), month in 1u8..=12) {
            let grid = MonthGrid::for_month(year, month).unwrap().with_trailing_filler();
            prop_assert_eq!(grid.cells().len() % 7, 0);
            prop_assert!(grid.cells().len() <= 42);
        }

        #[test]
        fn matches_chrono_in_its_range(year in 1i32..9999, month in 1u8..=12) {
            let first = NaiveDate::from_ymd_opt(year, u32::from(month), 1).unwrap();
            let grid = MonthGrid::for_month(year, month).unwrap();
            prop_assert_eq!(
                grid.leading_filler_count(),
                first.weekday().num_days_from_sunday() as usize
            );
        }
    }
}

// ============================================================================
// Date keys
// ============================================================================

mod date_key_tests {
    use super::*;

    proptest! {
        #[test]
        fn display_parse_roundtrip(
            year in prop_oneof![-9999i32..=9999, Just(i32::MIN), Just(i32::MAX), any::<i32>()],
            month in 1u8..=12,
            day in 1u8..=31,
        ) {
            if let Ok(key) = DateKey::new(year, month, day) {
                let parsed = DateKey::parse(&key.to_string()).unwrap();
                prop_assert_eq!(parsed, key);
            }
        }

        #[test]
        fn succ_advances_one_day(year in -9999i32..=9999, month in 1u8..=12, day in 1u8..=28) {
            let key = DateKey::new(year, month, day).unwrap();
            prop_assert_eq!(key.succ().day_number(), key.day_number() + 1);
            prop_assert!(key.succ() > key);
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

mod aggregate_tests {
    use super::*;

    fn records(days: &[u8]) -> Vec<EventRecord> {
        days.iter()
            .enumerate()
            .map(|(i, day)| {
                EventRecord::new(
                    EventId::new(i.to_string()),
                    DateKey::new(2026, 1, *day).unwrap(),
                    EventKind::Meeting,
                    format!("Evento {i}"),
                )
                .unwrap()
            })
            .collect()
    }

    proptest! {
        #[test]
        fn preserves_total_count(days in prop::collection::vec(1u8..=31, 0..64)) {
            let aggregate = DayAggregate::from_events(records(&days));
            prop_assert_eq!(aggregate.total_events(), days.len());
        }

        #[test]
        fn preserves_within_day_order(days in prop::collection::vec(1u8..=31, 0..64)) {
            let input = records(&days);
            let aggregate = DayAggregate::from_events(input.clone());
            for (key, events) in aggregate.iter() {
                prop_assert!(events.iter().all(|e| e.date_key == *key));
                let expected: Vec<&EventRecord> =
                    input.iter().filter(|e| e.date_key == *key).collect();
                let actual: Vec<&EventRecord> = events.iter().collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
