//! # Roadway Core
//!
//! Simulation core for kinematic agents on a fixed curved road: a player
//! agent navigating to operator-selected waypoints and autonomous traffic
//! looping along the road, with a lightweight same-lane overtake heuristic.
//!
//! ## Components
//!
//! - **RoadPath**: the immutable polyline plus the projection and heading
//!   math every position derives from.
//! - **Waypoint**: fixed clickable targets on the path.
//! - **Agent**: the per-tick state machine (player seeking / autonomous
//!   looping, lateral-offset avoidance).
//! - **advance_simulation**: the ordered per-tick pass over all agents.
//! - **scatter_scenery**: bounded rejection sampling for decor placement.
//!
//! ## Usage
//!
//! This library is primarily used through Python bindings via PyO3: a
//! frontend owns the window, rendering and frame pacing, reads agent and
//! waypoint positions each frame, and forwards pointer hits as
//! `Agent.set_target` calls. The simulation itself is single-threaded and
//! synchronous; one `advance_simulation` call per frame.

use pyo3::prelude::*;

mod agent;
mod error;
mod geometry;
mod path;
mod scenery;
mod waypoint;

pub use agent::{
    advance_simulation, Agent, NeighborState, ARRIVAL_TOLERANCE, CONFLICT_WINDOW,
    DEFAULT_PLAYER_SPEED, LATERAL_DECAY, OVERTAKE_MAGNITUDE,
};
pub use error::SimError;
pub use geometry::{distance_to_segment, PathPosition, Point, Vector2D};
pub use path::{RoadPath, LANE_SPACING};
pub use scenery::scatter_scenery;
pub use waypoint::{Waypoint, WAYPOINT_HIT_RADIUS, WAYPOINT_LANE};

/// The fixed curved route the demo simulation runs on: an S-loop sized for
/// an 800x600 board, Y-down.
#[pyfunction]
pub fn create_figure_route() -> RoadPath {
    let points = vec![
        Point::new(60.0, 520.0),
        Point::new(180.0, 470.0),
        Point::new(300.0, 430.0),
        Point::new(420.0, 380.0),
        Point::new(520.0, 300.0),
        Point::new(560.0, 200.0),
        Point::new(500.0, 120.0),
        Point::new(380.0, 90.0),
        Point::new(260.0, 110.0),
        Point::new(160.0, 170.0),
        Point::new(100.0, 260.0),
        Point::new(80.0, 380.0),
    ];
    // The fixed point list is known-good; construction cannot fail.
    RoadPath::try_new(points).unwrap_or_else(|err| unreachable!("fixed route invalid: {err}"))
}

/// Binding wrapper for the tick pass: borrows each agent in turn, snapshots
/// the others, and updates in list order. The caller keeps the navigating
/// agent first in the list.
#[pyfunction]
#[pyo3(name = "advance_simulation")]
fn advance_simulation_py(py: Python<'_>, path: &RoadPath, agents: Vec<Py<Agent>>) -> PyResult<()> {
    for i in 0..agents.len() {
        let neighbors: Vec<NeighborState> = agents
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, other)| NeighborState::of(&other.borrow(py)))
            .collect();
        agents[i].borrow_mut(py).step(path, &neighbors);
    }
    Ok(())
}

#[pymodule]
fn roadway_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data structures
    m.add_class::<Point>()?;
    m.add_class::<Vector2D>()?;
    m.add_class::<PathPosition>()?;
    m.add_class::<RoadPath>()?;
    m.add_class::<Waypoint>()?;
    m.add_class::<Agent>()?;

    // Simulation entry points
    m.add_function(wrap_pyfunction!(advance_simulation_py, m)?)?;
    m.add_function(wrap_pyfunction!(scatter_scenery, m)?)?;
    m.add_function(wrap_pyfunction!(create_figure_route, m)?)?;

    // Constants frontends need for drawing and hit-testing
    m.add("LANE_SPACING", LANE_SPACING)?;
    m.add("WAYPOINT_HIT_RADIUS", WAYPOINT_HIT_RADIUS)?;

    Ok(())
}
