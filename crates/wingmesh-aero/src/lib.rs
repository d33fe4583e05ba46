//! Vortex-Lattice Kernels
//!
//! This crate provides the elementary physics consumed by a vortex-lattice
//! solver built on `wingmesh-core` meshes:
//! - Horseshoe vortex induced velocity and Kutta-Joukowski force
//! - Horseshoe filaments placed on mesh panels
//! - Freestream plus rotation flow fields from a flight state
//! - Kernel configuration

pub mod config;
pub mod constants;
pub mod error;
pub mod flow;
pub mod horseshoe;

// Re-exports for convenience
pub use config::KernelConfig;
pub use constants::{DEFAULT_CORE_RADIUS, SEA_LEVEL_DENSITY};
pub use error::{AeroError, AeroResult};
pub use flow::{Attitude, FlowField};
pub use horseshoe::{
    HorseshoeVortex, bound_segment_velocity, force, induced_velocity, trailing_leg_velocity,
};
