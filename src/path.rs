//! # Road Path
//!
//! The immutable polyline every agent and waypoint is positioned against.
//!
//! A location on the road is a (segment, progress, lane, lateral offset)
//! tuple. `project` maps it to a world point: the segment is interpolated by
//! progress, then the point is displaced along the segment's unit normal by
//! `LANE_SPACING * lane + lateral_offset`.
//!
//! ## Coordinate convention
//!
//! World coordinates are Y-down (screen convention). The unit normal of a
//! segment with direction `(dx, dy)` is `(dy, -dx) / len`, so for a
//! left-to-right segment positive lanes sit at negative Y ("above" the
//! centerline on screen).
//!
//! Zero-length segments are rejected at construction, which is what makes
//! `project` and `heading_degrees` infallible on in-range segments.

use log::debug;
use pyo3::prelude::*;

use crate::error::SimError;
use crate::geometry::{Point, Vector2D};

/// Lateral distance between adjacent lanes, in world units.
pub const LANE_SPACING: f64 = 22.0;

#[pyclass]
#[derive(Debug, Clone)]
pub struct RoadPath {
    points: Vec<Point>,
}

impl RoadPath {
    /// Builds a path from an ordered polyline, rejecting paths that are too
    /// short or contain a zero-length segment.
    pub fn try_new(points: Vec<Point>) -> Result<Self, SimError> {
        if points.len() < 2 {
            return Err(SimError::TooFewPoints(points.len()));
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[0] == pair[1] {
                return Err(SimError::DegenerateSegment(i));
            }
        }
        debug!("road path built: {} segments", points.len() - 1);
        Ok(RoadPath { points })
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    pub(crate) fn check_segment(&self, segment: usize) -> Result<(), SimError> {
        if segment < self.segment_count() {
            Ok(())
        } else {
            Err(SimError::SegmentOutOfRange {
                index: segment,
                count: self.segment_count(),
            })
        }
    }

    /// Direction vector of `segment`. Nonzero by construction.
    fn direction(&self, segment: usize) -> Vector2D {
        self.points[segment + 1] - self.points[segment]
    }

    /// World point for a (segment, progress, lane, lateral offset) tuple.
    ///
    /// Progress at or beyond 1.0 on the last segment extrapolates linearly
    /// with that segment's normal; there is no segment past the end to
    /// switch to. Panics on an out-of-range segment, which agents and
    /// waypoints rule out at construction.
    pub fn project(&self, segment: usize, progress: f64, lane: i32, lateral_offset: f64) -> Point {
        let dir = self.direction(segment);
        let base = self.points[segment] + dir * progress;
        let normal = dir.perpendicular().normalize();
        base + normal * (LANE_SPACING * f64::from(lane) + lateral_offset)
    }

    /// Angle of the segment's direction vector, in degrees. Heading is
    /// segment-granular: it ignores progress and any lateral perturbation.
    pub fn heading_degrees(&self, segment: usize) -> f64 {
        self.direction(segment).angle_degrees()
    }

    /// Distance from `point` to the nearest point of the centerline.
    pub fn distance_to_centerline(&self, point: Point) -> f64 {
        self.points
            .windows(2)
            .map(|pair| crate::geometry::distance_to_segment(point, pair[0], pair[1]))
            .fold(f64::INFINITY, f64::min)
    }
}

#[pymethods]
impl RoadPath {
    #[new]
    fn py_new(points: Vec<Point>) -> PyResult<Self> {
        Ok(Self::try_new(points)?)
    }

    #[pyo3(name = "segment_count")]
    fn segment_count_py(&self) -> usize {
        self.segment_count()
    }

    #[pyo3(name = "project")]
    fn project_py(
        &self,
        segment: usize,
        progress: f64,
        lane: i32,
        lateral_offset: f64,
    ) -> PyResult<Point> {
        self.check_segment(segment)?;
        Ok(self.project(segment, progress, lane, lateral_offset))
    }

    #[pyo3(name = "heading_degrees")]
    fn heading_degrees_py(&self, segment: usize) -> PyResult<f64> {
        self.check_segment(segment)?;
        Ok(self.heading_degrees(segment))
    }

    #[pyo3(name = "distance_to_centerline")]
    fn distance_to_centerline_py(&self, point: &Point) -> f64 {
        self.distance_to_centerline(*point)
    }

    fn __str__(&self) -> String {
        format!("RoadPath({} segments)", self.segment_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn horizontal_path() -> RoadPath {
        RoadPath::try_new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]).unwrap()
    }

    // --- construction ---

    #[test]
    fn test_try_new_rejects_short_paths() {
        assert_eq!(RoadPath::try_new(vec![]).unwrap_err(), SimError::TooFewPoints(0));
        assert_eq!(
            RoadPath::try_new(vec![Point::new(1.0, 1.0)]).unwrap_err(),
            SimError::TooFewPoints(1)
        );
    }

    #[test]
    fn test_try_new_rejects_zero_length_segment() {
        let err = RoadPath::try_new(vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(100.0, 0.0),
        ])
        .unwrap_err();
        assert_eq!(err, SimError::DegenerateSegment(1));
    }

    #[test]
    fn test_segment_count() {
        let path = RoadPath::try_new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
        .unwrap();
        assert_eq!(path.segment_count(), 2);
    }

    // --- project ---

    #[test]
    fn test_project_concrete_scenario() {
        // Lane 1 on a left-to-right segment sits at -22 in Y (Y-down).
        let path = horizontal_path();
        let p = path.project(0, 0.5, 1, 0.0);
        assert_relative_eq!(p.x, 50.0);
        assert_relative_eq!(p.y, -22.0);
    }

    #[test]
    fn test_project_endpoint_offset_only_by_lane() {
        let path = horizontal_path();
        let p = path.project(0, 0.0, -1, 0.0);
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 22.0);
    }

    #[test]
    fn test_project_lane_symmetry_on_slanted_segment() {
        // +L and -L must be equidistant from the centerline and on opposite
        // sides, for any lane magnitude.
        let path = RoadPath::try_new(vec![Point::new(1.0, 2.0), Point::new(7.0, -3.0)]).unwrap();
        for lane in [1, 2, 5] {
            let center = path.project(0, 0.3, 0, 0.0);
            let left = path.project(0, 0.3, lane, 0.0);
            let right = path.project(0, 0.3, -lane, 0.0);
            assert_relative_eq!(center.distance(&left), center.distance(&right), epsilon = 1e-9);
            assert_relative_eq!(
                center.distance(&left),
                LANE_SPACING * f64::from(lane),
                epsilon = 1e-9
            );
            // Opposite sides: the centerline point is the midpoint.
            assert_relative_eq!((left.x + right.x) / 2.0, center.x, epsilon = 1e-9);
            assert_relative_eq!((left.y + right.y) / 2.0, center.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_project_lateral_offset_adds_to_lane_term() {
        let path = horizontal_path();
        let p = path.project(0, 0.5, 1, -3.0);
        assert_relative_eq!(p.y, -19.0); // -22 + 3 back toward center
    }

    #[test]
    fn test_project_past_end_reuses_last_normal() {
        let path = horizontal_path();
        let p = path.project(0, 1.2, 1, 0.0);
        assert_relative_eq!(p.x, 120.0);
        assert_relative_eq!(p.y, -22.0);
    }

    // --- heading ---

    #[test]
    fn test_heading_horizontal_segment() {
        assert_relative_eq!(horizontal_path().heading_degrees(0), 0.0);
    }

    #[test]
    fn test_heading_per_segment() {
        let path = RoadPath::try_new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
        .unwrap();
        assert_relative_eq!(path.heading_degrees(0), 0.0);
        assert_relative_eq!(path.heading_degrees(1), 90.0, epsilon = 1e-9);
    }

    // --- centerline distance ---

    #[test]
    fn test_distance_to_centerline_picks_nearest_segment() {
        let path = RoadPath::try_new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ])
        .unwrap();
        // Closer to the vertical segment than to the horizontal one.
        assert_relative_eq!(path.distance_to_centerline(Point::new(90.0, 50.0)), 10.0);
        assert_relative_eq!(path.distance_to_centerline(Point::new(50.0, 8.0)), 8.0);
    }

    #[test]
    fn test_check_segment_bounds() {
        let path = horizontal_path();
        assert!(path.check_segment(0).is_ok());
        assert_eq!(
            path.check_segment(1).unwrap_err(),
            SimError::SegmentOutOfRange { index: 1, count: 1 }
        );
    }
}
