//! # Waypoints
//!
//! Fixed, clickable reference positions on the road. A waypoint sits at the
//! midpoint of its segment, evaluated once against the shared reference lane
//! and cached; it never moves, so pointer hit-testing is a plain distance
//! check against the cached world point.

use pyo3::prelude::*;

use crate::geometry::{PathPosition, Point};
use crate::path::RoadPath;

/// Reference lane every waypoint is projected against, independent of any
/// agent's lane.
pub const WAYPOINT_LANE: i32 = 1;

/// Default pointer hit radius, in world units.
pub const WAYPOINT_HIT_RADIUS: f64 = 14.0;

#[pyclass]
#[derive(Debug, Clone)]
pub struct Waypoint {
    path_position: PathPosition,
    position: Point,
    is_home: bool,
}

#[pymethods]
impl Waypoint {
    /// Places a waypoint at progress 0.5 of `segment`. Fails fast on an
    /// out-of-range segment so every constructed waypoint is a valid
    /// navigation target.
    #[new]
    #[pyo3(signature = (path, segment, is_home = false))]
    pub fn new(path: &RoadPath, segment: usize, is_home: bool) -> PyResult<Self> {
        path.check_segment(segment)?;
        let path_position = PathPosition::new(segment, 0.5);
        let position = path.project(segment, 0.5, WAYPOINT_LANE, 0.0);
        Ok(Waypoint {
            path_position,
            position,
            is_home,
        })
    }

    /// True when `point` falls strictly inside `radius` of the cached world
    /// position. Used to map pointer/tap input to a navigation command.
    #[pyo3(signature = (point, radius = WAYPOINT_HIT_RADIUS))]
    pub fn is_hit(&self, point: &Point, radius: f64) -> bool {
        self.position.distance(point) < radius
    }

    /// Cached world position.
    #[getter]
    pub fn position(&self) -> Point {
        self.position
    }

    /// On-path location, usable as a navigation target.
    #[getter]
    pub fn path_position(&self) -> PathPosition {
        self.path_position
    }

    /// Marks the terminal "home" waypoint of a route. Informational only;
    /// the caller decides whether to stop issuing navigation commands.
    #[getter]
    pub fn is_home(&self) -> bool {
        self.is_home
    }

    fn __str__(&self) -> String {
        format!(
            "Waypoint(segment={}, home={})",
            self.path_position.segment, self.is_home
        )
    }
}
