//! # Geometry Primitives
//!
//! Vocabulary types shared by every module:
//!
//! - **Point**: 2D world position (Y-down screen convention)
//! - **Vector2D**: 2D direction/displacement with arithmetic operations
//! - **PathPosition**: canonical location on the road as (segment, progress)
//!
//! Plus the point-to-segment distance used by scenery placement.

use pyo3::prelude::*;
use std::ops::{Add, Mul, Sub};

#[pyclass]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl Point {
    #[new]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn __str__(&self) -> String {
        format!("Point({:.2}, {:.2})", self.x, self.y)
    }

    pub fn __add__(&self, other: &Vector2D) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub fn __sub__(&self, other: &Point) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Sub for Point {
    type Output = Vector2D;

    fn sub(self, other: Point) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Add<Vector2D> for Point {
    type Output = Point;

    fn add(self, other: Vector2D) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

#[pyclass]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2D {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl Vector2D {
    #[new]
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Vector2D {
        let mag = self.magnitude();
        if mag > 0.0 {
            Vector2D {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Vector2D { x: 0.0, y: 0.0 }
        }
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Clockwise perpendicular. In the Y-down convention this turns a
    /// left-to-right vector toward negative Y ("up" on screen).
    pub fn perpendicular(&self) -> Vector2D {
        Vector2D {
            x: self.y,
            y: -self.x,
        }
    }

    pub fn angle_degrees(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn __str__(&self) -> String {
        format!("Vector2D({:.2}, {:.2})", self.x, self.y)
    }

    pub fn __add__(&self, other: &Vector2D) -> Vector2D {
        Vector2D {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub fn __sub__(&self, other: &Vector2D) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub fn __mul__(&self, scalar: f64) -> Vector2D {
        Vector2D {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, scalar: f64) -> Vector2D {
        Vector2D {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Canonical location on the road: a segment index and a fractional
/// progress along it in [0, 1).
#[pyclass]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPosition {
    #[pyo3(get, set)]
    pub segment: usize,
    #[pyo3(get, set)]
    pub progress: f64,
}

#[pymethods]
impl PathPosition {
    #[new]
    pub fn new(segment: usize, progress: f64) -> Self {
        PathPosition { segment, progress }
    }

    pub fn __str__(&self) -> String {
        format!("PathPosition(segment={}, progress={:.3})", self.segment, self.progress)
    }
}

/// Distance from `point` to the segment `a`-`b`, clamped to the endpoints.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let length_sq = ab.dot(&ab);
    if length_sq == 0.0 {
        return point.distance(&a);
    }
    let t = ((point - a).dot(&ab) / length_sq).clamp(0.0, 1.0);
    point.distance(&(a + ab * t))
}
