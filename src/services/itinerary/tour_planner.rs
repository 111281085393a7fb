use crate::error::{AppError, Result};
use crate::models::{DistanceTable, Poi};

/// Ordered stops for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTour<'a> {
    /// 1-based
    pub day: u32,
    pub stops: Vec<&'a Poi>,
}

/// Greedy day-major tour construction over rating-ranked POIs.
///
/// Each day opens with the highest-rated unused POI and grows by the nearest
/// unused neighbor of the last stop until it holds `ceil(total / days)` stops.
/// A day also ends as soon as no unused POI is reachable at finite distance,
/// even if POIs remain; those may never be scheduled. Days that would start
/// with nothing left are omitted.
pub fn plan_tours<'a>(
    ranked: &'a [Poi],
    table: &DistanceTable,
    days: u32,
) -> Result<Vec<DayTour<'a>>> {
    if days == 0 {
        return Err(AppError::InvalidRequest(
            "days must be at least 1".to_string(),
        ));
    }

    let total = ranked.len();
    let day_count = days as usize;
    if total < day_count {
        return Err(AppError::InsufficientSpots(format!(
            "Not enough spots to generate itinerary: {} spots for {} days",
            total, days
        )));
    }

    let per_day = (total + day_count - 1) / day_count;
    let mut used = vec![false; total];
    let mut tours = Vec::with_capacity(day_count);

    for day in 1..=days {
        let Some(first) = used.iter().position(|u| !u) else {
            tracing::debug!(day, "All spots scheduled before day {}", day);
            break;
        };

        used[first] = true;
        let mut stops = vec![first];
        let mut current = first;

        while stops.len() < per_day {
            match nearest_unused(ranked, table, &used, current) {
                Some(next) => {
                    used[next] = true;
                    stops.push(next);
                    current = next;
                }
                None => {
                    if used.iter().any(|u| !u) {
                        tracing::debug!(
                            day,
                            stops = stops.len(),
                            target = per_day,
                            "No reachable spot from '{}', ending day early",
                            ranked[current].name
                        );
                    }
                    break;
                }
            }
        }

        tours.push(DayTour {
            day,
            stops: stops.into_iter().map(|i| &ranked[i]).collect(),
        });
    }

    Ok(tours)
}

/// Unused POI closest to `current`; ties go to the higher-ranked one.
fn nearest_unused(
    ranked: &[Poi],
    table: &DistanceTable,
    used: &[bool],
    current: usize,
) -> Option<usize> {
    let origin = &ranked[current].id;
    let mut best: Option<(usize, f64)> = None;

    for (idx, poi) in ranked.iter().enumerate() {
        if used[idx] {
            continue;
        }
        let distance = table.distance(origin, &poi.id);
        if !distance.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((idx, distance));
        }
    }

    best.map(|(idx, _)| idx)
}
