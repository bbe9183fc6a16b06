//! Calendar month → season mapping.
//!
//! Fixed Northern-hemisphere convention:
//!
//! - Dec, Jan, Feb: winter
//! - Mar, Apr, May: spring
//! - Jun, Jul, Aug: summer
//! - Sep, Oct, Nov: autumn
//!
//! This is independent of the labels carried by a dataset. A dataset labelled
//! with another convention (e.g. Southern hemisphere) silently disagrees with
//! it; `calendar_mismatches` counts such records so callers can warn about it.

use chrono::{Datelike, NaiveDate};

use crate::domain::{Observation, Season};

/// Season for a 1-based month number. `None` outside `1..=12`.
pub fn season_for_month(month: u32) -> Option<Season> {
    (1..=12).contains(&month).then(|| calendar_season(month))
}

/// Season for a calendar date.
pub fn season_for_date(date: NaiveDate) -> Season {
    calendar_season(date.month())
}

fn calendar_season(month: u32) -> Season {
    match month {
        12 | 1 | 2 => Season::Winter,
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        _ => Season::Autumn,
    }
}

/// Number of observations whose label differs from the calendar mapping.
pub fn calendar_mismatches(observations: &[Observation]) -> usize {
    observations
        .iter()
        .filter(|o| season_for_date(o.timestamp.date()) != o.season)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_month_maps_to_expected_season() {
        let expected = [
            Season::Winter,
            Season::Winter,
            Season::Spring,
            Season::Spring,
            Season::Spring,
            Season::Summer,
            Season::Summer,
            Season::Summer,
            Season::Autumn,
            Season::Autumn,
            Season::Autumn,
            Season::Winter,
        ];
        for (i, season) in expected.iter().enumerate() {
            assert_eq!(season_for_month(i as u32 + 1), Some(*season), "month {}", i + 1);
        }
    }

    #[test]
    fn out_of_range_months_have_no_season() {
        assert_eq!(season_for_month(0), None);
        assert_eq!(season_for_month(13), None);
    }

    #[test]
    fn date_lookup_uses_month_only() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(season_for_date(d), Season::Winter);
        let d = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(season_for_date(d), Season::Autumn);
    }

    #[test]
    fn southern_labels_are_counted_as_mismatches() {
        let ts = NaiveDate::from_ymd_opt(2024, 7, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let obs = vec![
            Observation {
                timestamp: ts,
                city: "Sydney".into(),
                temperature: 12.0,
                season: Season::Winter,
            },
            Observation {
                timestamp: ts,
                city: "Sydney".into(),
                temperature: 13.0,
                season: Season::Summer,
            },
        ];
        assert_eq!(calendar_mismatches(&obs), 1);
    }
}
