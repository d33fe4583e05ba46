//! Global constants for wingmesh-core

/// Tolerance for degenerate lengths (zero axes, zero spans)
pub const GEOMETRY_EPSILON: f64 = 1e-12;

/// Minimum number of chordwise panels when a control surface hinge is present
pub const MIN_CHORD_PANELS_WITH_HINGE: usize = 2;

/// Default chord fraction around which sections are twisted
pub const DEFAULT_TORSION_CENTER: f64 = 0.25;

/// Default distance under which two structural nodes share a number
pub const NODE_MERGE_TOLERANCE: f64 = 1e-9;
