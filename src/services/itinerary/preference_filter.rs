use crate::models::{Poi, PreferenceTable};

/// Keep POIs matching any selected preference, then rank by rating.
///
/// Falls back to the full input when no labels are given or nothing matches.
/// Sorting is stable, so equal ratings keep their search order.
pub fn filter_and_rank<S: AsRef<str>>(
    pois: Vec<Poi>,
    labels: &[S],
    table: &PreferenceTable,
) -> Vec<Poi> {
    let mut ranked = if labels.is_empty() {
        tracing::debug!("No preferences provided, ranking all {} spots", pois.len());
        pois
    } else {
        let wanted = table.categories_for(labels);
        let (matching, rest): (Vec<Poi>, Vec<Poi>) = pois
            .into_iter()
            .partition(|poi| poi.matches_any_category(&wanted));

        if matching.is_empty() {
            tracing::info!(
                preferences = labels.len(),
                "No spots match preferences, falling back to all spots"
            );
            rest
        } else {
            tracing::debug!(
                matched = matching.len(),
                dropped = rest.len(),
                "Filtered spots by preferences"
            );
            matching
        }
    };

    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ranked
}
