//! Live reading vs. seasonal normal range.
//!
//! The normal range of a season is `mean ± 2σ` of its profile entry, inclusive
//! at both ends.

use crate::domain::{NormalRangeCheck, Season, SeasonProfile};
use crate::error::AnalysisError;

/// Half-width of the normal range in standard deviations.
pub const NORMAL_RANGE_SIGMA: f64 = 2.0;

/// Judge `current_temp` against the profile entry for `current_season`.
pub fn check_current_reading(
    current_temp: f64,
    profile: &SeasonProfile,
    current_season: Season,
) -> Result<NormalRangeCheck, AnalysisError> {
    if !current_temp.is_finite() {
        return Err(AnalysisError::MalformedInput(format!(
            "current temperature must be a finite number, got {current_temp}"
        )));
    }

    let stats = profile.get(current_season)?;
    let std = stats.std.ok_or(AnalysisError::UndefinedSpread {
        season: current_season,
        count: stats.count,
    })?;

    let lower_bound = stats.mean - NORMAL_RANGE_SIGMA * std;
    let upper_bound = stats.mean + NORMAL_RANGE_SIGMA * std;

    Ok(NormalRangeCheck {
        season: current_season,
        current_temp,
        mean: stats.mean,
        std,
        lower_bound,
        upper_bound,
        is_normal: lower_bound <= current_temp && current_temp <= upper_bound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeasonStats;

    fn profile() -> SeasonProfile {
        [
            (
                Season::Winter,
                SeasonStats {
                    mean: -4.0,
                    std: Some(3.0),
                    count: 90,
                },
            ),
            (
                Season::Summer,
                SeasonStats {
                    mean: 18.3,
                    std: Some(2.7),
                    count: 92,
                },
            ),
            (
                Season::Autumn,
                SeasonStats {
                    mean: 8.0,
                    std: None,
                    count: 1,
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn bounds_are_two_sigma() {
        let check = check_current_reading(0.0, &profile(), Season::Winter).unwrap();
        assert_eq!(check.lower_bound, -10.0);
        assert_eq!(check.upper_bound, 2.0);
        assert!(check.is_normal);
    }

    #[test]
    fn upper_boundary_is_inclusive() {
        let p = profile();
        let stats = p.get(Season::Summer).unwrap();
        let upper = stats.mean + 2.0 * stats.std.unwrap();

        let at = check_current_reading(upper, &p, Season::Summer).unwrap();
        assert!(at.is_normal, "reading at mean + 2σ must be normal");

        let above = check_current_reading(upper + 1e-9, &p, Season::Summer).unwrap();
        assert!(!above.is_normal, "reading just above mean + 2σ must be abnormal");
    }

    #[test]
    fn lower_boundary_is_inclusive() {
        let p = profile();
        assert!(check_current_reading(-10.0, &p, Season::Winter).unwrap().is_normal);
        assert!(!check_current_reading(-10.000001, &p, Season::Winter).unwrap().is_normal);
    }

    #[test]
    fn absent_season_is_season_not_found() {
        assert_eq!(
            check_current_reading(12.0, &profile(), Season::Spring),
            Err(AnalysisError::SeasonNotFound(Season::Spring))
        );
    }

    #[test]
    fn undefined_std_is_reported() {
        assert_eq!(
            check_current_reading(8.0, &profile(), Season::Autumn),
            Err(AnalysisError::UndefinedSpread {
                season: Season::Autumn,
                count: 1,
            })
        );
    }

    #[test]
    fn non_finite_reading_is_rejected() {
        assert!(matches!(
            check_current_reading(f64::NAN, &profile(), Season::Winter),
            Err(AnalysisError::MalformedInput(_))
        ));
    }
}
