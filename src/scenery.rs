//! # Scenery Placement
//!
//! Rejection-sampling placement of decorative objects clear of the road.
//! Candidates are drawn uniformly over a rectangle and rejected when they
//! fall within `clearance` of the road centerline or of an already placed
//! item. The total attempt budget is bounded, so a board with little free
//! area yields a short result instead of looping.

use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Point;
use crate::path::RoadPath;

const ATTEMPTS_PER_ITEM: usize = 40;

/// Scatters up to `count` scenery points over the `width` x `height`
/// rectangle, each at least `clearance` away from the road centerline and
/// from every other point. May return fewer than `count` when the attempt
/// budget runs out.
#[pyfunction]
#[pyo3(signature = (path, count, width, height, clearance, seed = None))]
pub fn scatter_scenery(
    path: &RoadPath,
    count: usize,
    width: f64,
    height: f64,
    clearance: f64,
    seed: Option<u64>,
) -> Vec<Point> {
    if count == 0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut placed: Vec<Point> = Vec::with_capacity(count);
    let mut budget = count * ATTEMPTS_PER_ITEM;
    while placed.len() < count && budget > 0 {
        budget -= 1;
        let candidate = Point::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        if path.distance_to_centerline(candidate) < clearance {
            continue;
        }
        if placed.iter().any(|p| p.distance(&candidate) < clearance) {
            continue;
        }
        placed.push(candidate);
    }
    placed
}
