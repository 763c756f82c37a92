//! Orders attractions by distance to a reference point.

use trailpoint_core::geo::{self, Location};
use trailpoint_core::types::Attraction;
use trailpoint_core::TrailPointResult;

/// An attraction paired with its distance to the reference location.
#[derive(Debug, Clone)]
pub struct RankedAttraction {
    pub attraction: Attraction,
    pub distance_miles: f64,
}

/// Rank the catalog by ascending distance to `reference` and keep the
/// closest `count` entries. Equal distances keep catalog order (the sort is
/// stable), so the result is deterministic for a fixed catalog ordering.
pub fn rank_with_distances(
    reference: &Location,
    catalog: &[Attraction],
    count: usize,
) -> TrailPointResult<Vec<RankedAttraction>> {
    let mut ranked = Vec::with_capacity(catalog.len());
    for attraction in catalog {
        let distance_miles = geo::distance(&attraction.location, reference)?;
        ranked.push(RankedAttraction {
            attraction: attraction.clone(),
            distance_miles,
        });
    }
    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    ranked.truncate(count);
    Ok(ranked)
}

/// Same ranking, attractions only.
pub fn rank_nearby_attractions(
    reference: &Location,
    catalog: &[Attraction],
    count: usize,
) -> TrailPointResult<Vec<Attraction>> {
    Ok(rank_with_distances(reference, catalog, count)?
        .into_iter()
        .map(|entry| entry.attraction)
        .collect())
}
