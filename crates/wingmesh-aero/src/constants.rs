//! Global constants for wingmesh-aero

/// Distance from a filament under which its induced velocity is zero [m]
pub const DEFAULT_CORE_RADIUS: f64 = 1e-3;

/// ISA sea level air density [kg/m³]
pub const SEA_LEVEL_DENSITY: f64 = 1.225;
