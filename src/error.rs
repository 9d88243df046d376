//! Crate error taxonomy.
//!
//! Construction-time failures only: a validated `RoadPath` makes the
//! steady-state tick infallible, so nothing here is raised per tick.

use pyo3::exceptions::PyValueError;
use pyo3::PyErr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("a road path needs at least two points, got {0}")]
    TooFewPoints(usize),

    #[error("segment {0} has zero length: consecutive path points coincide")]
    DegenerateSegment(usize),

    #[error("segment index {index} out of range for a path with {count} segments")]
    SegmentOutOfRange { index: usize, count: usize },
}

impl From<SimError> for PyErr {
    fn from(err: SimError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
