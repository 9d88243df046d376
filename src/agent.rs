//! # Agents
//!
//! The kinematic agents that move along the road, and the per-tick update
//! that drives them.
//!
//! One `Agent` type covers both roles behind a private tagged variant:
//!
//! - **Player**: moves only while it holds a navigation target (Seeking);
//!   arrival snaps it onto the target and returns it to Cruising. Progress
//!   overflow clamps at the final segment.
//! - **Autonomous**: advances unconditionally every tick and wraps from the
//!   last segment back to the first, looping forever. It never holds a
//!   target.
//!
//! Both variants share the same post-advance routine: decay the lateral
//! perturbation, scan the other agents for a same-lane conflict, then
//! reproject world position and heading.
//!
//! ## Conflict scan
//!
//! The scan walks the other agents in list order and stops at the first one
//! on the same lane and segment whose progress lies within
//! [`CONFLICT_WINDOW`]. If this agent is strictly behind that neighbor it
//! swings laterally toward the overtaking side; either way the scan ends
//! there, so a later, closer neighbor is never consulted that tick.
//! Conflicts across a segment boundary are invisible to the scan; the
//! same-segment requirement is deliberate.

use log::{debug, trace};
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{PathPosition, Point};
use crate::path::RoadPath;

/// Progress distance under which a Seeking agent snaps onto its target.
pub const ARRIVAL_TOLERANCE: f64 = 0.02;
/// Progress window within which a same-lane, same-segment neighbor counts
/// as a conflict.
pub const CONFLICT_WINDOW: f64 = 0.12;
/// Geometric decay applied to the lateral perturbation every tick.
pub const LATERAL_DECAY: f64 = 0.85;
/// Lateral swing, in world units, applied when overtaking.
pub const OVERTAKE_MAGNITUDE: f64 = 12.0;
/// Progress per tick for a player agent unless overridden.
pub const DEFAULT_PLAYER_SPEED: f64 = 0.01;

const AUTONOMOUS_SPEED_MIN: f64 = 0.004;
const AUTONOMOUS_SPEED_MAX: f64 = 0.007;

#[derive(Debug, Clone)]
enum Kind {
    Player { target: Option<PathPosition> },
    Autonomous,
}

/// Positional snapshot of another agent, read during the conflict scan.
#[derive(Debug, Clone, Copy)]
pub struct NeighborState {
    pub lane: i32,
    pub segment: usize,
    pub progress: f64,
}

impl NeighborState {
    pub fn of(agent: &Agent) -> Self {
        NeighborState {
            lane: agent.lane,
            segment: agent.segment,
            progress: agent.progress,
        }
    }
}

#[pyclass]
#[derive(Debug, Clone)]
pub struct Agent {
    /// Signed lane identity; the sign encodes the side and travel direction.
    #[pyo3(get)]
    pub lane: i32,
    #[pyo3(get)]
    pub segment: usize,
    #[pyo3(get)]
    pub progress: f64,
    /// Progress units per tick.
    #[pyo3(get)]
    pub speed: f64,
    /// Transient lateral perturbation on top of the lane offset; decays
    /// toward zero each tick.
    #[pyo3(get)]
    pub lateral_offset: f64,
    kind: Kind,
    position: Point,
    heading_degrees: f64,
}

impl Agent {
    fn with_kind(
        path: &RoadPath,
        kind: Kind,
        lane: i32,
        segment: usize,
        progress: f64,
        speed: f64,
    ) -> Self {
        Agent {
            lane,
            segment,
            progress,
            speed,
            lateral_offset: 0.0,
            kind,
            position: path.project(segment, progress, lane, 0.0),
            heading_degrees: path.heading_degrees(segment),
        }
    }

    /// One simulation tick for this agent: advance, decay, conflict scan,
    /// reproject. `neighbors` holds the other agents in shared-list order,
    /// self excluded.
    pub fn step(&mut self, path: &RoadPath, neighbors: &[NeighborState]) {
        self.advance(path);
        self.lateral_offset *= LATERAL_DECAY;
        self.scan_conflicts(neighbors);
        self.position = path.project(self.segment, self.progress, self.lane, self.lateral_offset);
        self.heading_degrees = path.heading_degrees(self.segment);
    }

    fn advance(&mut self, path: &RoadPath) {
        let last = path.segment_count() - 1;
        match &mut self.kind {
            Kind::Player { target } => {
                let Some(goal) = *target else {
                    // Cruising: a player only moves toward a target.
                    return;
                };
                if goal.segment == self.segment
                    && (self.progress - goal.progress).abs() < ARRIVAL_TOLERANCE
                {
                    self.progress = goal.progress;
                    *target = None;
                    debug!(
                        "player arrived: segment {} progress {:.3}",
                        self.segment, self.progress
                    );
                } else {
                    self.progress += self.speed;
                    if self.progress >= 1.0 {
                        self.progress = 0.0;
                        self.segment = (self.segment + 1).min(last);
                    }
                }
            }
            Kind::Autonomous => {
                self.progress += self.speed;
                if self.progress >= 1.0 {
                    self.progress = 0.0;
                    self.segment = (self.segment + 1) % path.segment_count();
                }
            }
        }
    }

    fn scan_conflicts(&mut self, neighbors: &[NeighborState]) {
        for other in neighbors {
            if other.lane == self.lane
                && other.segment == self.segment
                && (other.progress - self.progress).abs() < CONFLICT_WINDOW
            {
                if self.progress < other.progress {
                    self.lateral_offset = -f64::from(self.lane) * OVERTAKE_MAGNITUDE;
                    trace!(
                        "overtake swing on segment {}: progress {:.3} behind {:.3}",
                        self.segment,
                        self.progress,
                        other.progress
                    );
                }
                // The first matching neighbor settles the scan either way.
                break;
            }
        }
    }
}

#[pymethods]
impl Agent {
    /// The operator-navigated agent. Starts Cruising; it moves once a
    /// target is set.
    #[staticmethod]
    #[pyo3(signature = (path, lane, segment, progress = 0.0, speed = DEFAULT_PLAYER_SPEED))]
    pub fn player(
        path: &RoadPath,
        lane: i32,
        segment: usize,
        progress: f64,
        speed: f64,
    ) -> PyResult<Self> {
        path.check_segment(segment)?;
        Ok(Self::with_kind(
            path,
            Kind::Player { target: None },
            lane,
            segment,
            progress,
            speed,
        ))
    }

    /// A looping traffic participant. The direction flag picks the lane
    /// sign; the starting segment and speed are drawn from `seed` (or from
    /// entropy when `seed` is `None`).
    #[staticmethod]
    #[pyo3(signature = (path, forward, seed = None))]
    pub fn autonomous(path: &RoadPath, forward: bool, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let lane = if forward { 1 } else { -1 };
        let segment = rng.gen_range(0..path.segment_count());
        let speed = rng.gen_range(AUTONOMOUS_SPEED_MIN..=AUTONOMOUS_SPEED_MAX);
        Self::with_kind(path, Kind::Autonomous, lane, segment, 0.0, speed)
    }

    /// Points the player at `target`, replacing any previous target and
    /// discarding progress toward it. Autonomous agents ignore this; they
    /// are traffic participants, not navigators. Target segments come from
    /// waypoints and are in range by construction; this is not re-checked.
    pub fn set_target(&mut self, target: PathPosition) {
        match &mut self.kind {
            Kind::Player { target: slot } => {
                debug!(
                    "target set: segment {} progress {:.3}",
                    target.segment, target.progress
                );
                *slot = Some(target);
            }
            Kind::Autonomous => {
                trace!("set_target ignored for autonomous agent");
            }
        }
    }

    /// True while a navigation target is held (the Seeking state).
    #[getter]
    pub fn is_seeking(&self) -> bool {
        matches!(self.kind, Kind::Player { target: Some(_) })
    }

    /// World position, recomputed each tick. Read-only for rendering.
    #[getter]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Heading of the current segment in degrees; segment-granular, not
    /// smoothed.
    #[getter]
    pub fn heading_degrees(&self) -> f64 {
        self.heading_degrees
    }

    fn __str__(&self) -> String {
        let role = match self.kind {
            Kind::Player { .. } => "player",
            Kind::Autonomous => "autonomous",
        };
        format!(
            "Agent({}, lane={}, segment={}, progress={:.3})",
            role, self.lane, self.segment, self.progress
        )
    }
}

/// One full simulation tick: a single sequential pass over `agents` in list
/// order.
///
/// The ordering contract is load-bearing. The caller places the navigating
/// agent first, so its conflict scan sees every autonomous agent at its
/// previous-tick position, while each autonomous agent sees the player and
/// any earlier autonomous agent already updated. Sequential and snapshot
/// semantics produce different avoidance outcomes; this implementation is
/// deliberately sequential.
pub fn advance_simulation(path: &RoadPath, agents: &mut [Agent]) {
    for i in 0..agents.len() {
        let neighbors: Vec<NeighborState> = agents
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, other)| NeighborState::of(other))
            .collect();
        agents[i].step(path, &neighbors);
    }
}
