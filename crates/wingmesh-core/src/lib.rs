//! Lifting-Surface Geometry Core
//!
//! This crate discretizes trapezoidal lifting surfaces for vortex-lattice and
//! beam models:
//! - Discretization: normalized point distributions with hinge forcing
//! - Transform: Rodrigues rotations, mirroring and grid reshaping
//! - Grid/Panel: aerodynamic panel corner arrays and derived panel geometry
//! - OrientedNode: structural nodes with quaternion orientation
//! - Surface/Beam: single segment mesh and node chain generation
//! - MacroSurface: multi-segment, optionally mirrored wings and stabilizers

pub mod beam;
pub mod config;
pub mod constants;
pub mod discretization;
pub mod error;
pub mod grid;
pub mod macro_surface;
pub mod node;
pub mod panel;
pub mod surface;
pub mod transform;

pub use beam::*;
pub use config::*;
pub use constants::*;
pub use discretization::*;
pub use error::*;
pub use grid::*;
pub use macro_surface::*;
pub use node::*;
pub use panel::*;
pub use surface::*;
pub use transform::*;
