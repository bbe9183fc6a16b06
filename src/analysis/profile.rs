//! Seasonal profile: mean and sample std per season label over the whole series.

use std::collections::BTreeMap;

use crate::domain::{Observation, Season, SeasonProfile, SeasonStats};
use crate::math::mean_and_std;

/// Aggregate temperatures per season, ignoring chronology.
///
/// Seasons with no rows are absent from the result.
pub fn compute_profile(observations: &[Observation]) -> SeasonProfile {
    let mut groups: BTreeMap<Season, Vec<f64>> = BTreeMap::new();
    for obs in observations {
        groups.entry(obs.season).or_default().push(obs.temperature);
    }

    groups
        .into_iter()
        .filter_map(|(season, temps)| {
            let (mean, std) = mean_and_std(&temps)?;
            Some((
                season,
                SeasonStats {
                    mean,
                    std,
                    count: temps.len(),
                },
            ))
        })
        .collect()
}
