//! Spatial transforms: Rodrigues rotations and basis changes
//!
//! Grid-level operations (translate, rotate, mirror, reshape) live on
//! [`crate::grid::Grid`] and are built on the point functions here.

use glam::{DMat3, DQuat, DVec3};

use crate::constants::GEOMETRY_EPSILON;
use crate::error::{GeometryError, GeometryResult};

/// Normalize a rotation axis, rejecting zero-length and non-finite vectors
pub fn unit_axis(axis: DVec3) -> GeometryResult<DVec3> {
    axis.try_normalize()
        .ok_or(GeometryError::DegenerateAxis(axis.to_array()))
}

/// Rodrigues rotation matrix `cosθ·I + sinθ·[u]× + (1 − cosθ)·(u ⊗ u)`
///
/// The axis is normalized before use.
pub fn rotation_matrix(axis: DVec3, angle: f64) -> GeometryResult<DMat3> {
    let u = unit_axis(axis)?;
    let (sin, cos) = angle.sin_cos();

    let identity = DMat3::IDENTITY;
    // Column-major: columns of [u]×
    let cross_matrix = DMat3::from_cols(
        DVec3::new(0.0, u.z, -u.y),
        DVec3::new(-u.z, 0.0, u.x),
        DVec3::new(u.y, -u.x, 0.0),
    );
    let tensor = DMat3::from_cols(u * u.x, u * u.y, u * u.z);

    Ok(identity * cos + cross_matrix * sin + tensor * (1.0 - cos))
}

/// Rotate a single point about `axis` passing through `center`
pub fn rotate_point(point: DVec3, axis: DVec3, center: DVec3, angle: f64) -> GeometryResult<DVec3> {
    let rotation = rotation_matrix(axis, angle)?;
    Ok(rotation * (point - center) + center)
}

/// Rotate a list of points about `axis` passing through `center`
pub fn rotate_points(
    points: &[DVec3],
    axis: DVec3,
    center: DVec3,
    angle: f64,
) -> GeometryResult<Vec<DVec3>> {
    let rotation = rotation_matrix(axis, angle)?;
    Ok(points
        .iter()
        .map(|&p| rotation * (p - center) + center)
        .collect())
}

/// Offset every point by `translation`
pub fn translate_points(points: &[DVec3], translation: DVec3) -> Vec<DVec3> {
    points.iter().map(|&p| p + translation).collect()
}

/// Perpendicular distance from `point` to the infinite line through `a` and `b`
///
/// Returns `None` when `a` and `b` coincide.
pub fn distance_point_to_line(a: DVec3, b: DVec3, point: DVec3) -> Option<f64> {
    let direction = b - a;
    let length = direction.length();
    if length <= GEOMETRY_EPSILON {
        return None;
    }
    Some((point - a).cross(point - b).length() / length)
}

/// Cosine of the angle between two vectors (0 if either is zero)
pub fn cos_between(v1: DVec3, v2: DVec3) -> f64 {
    let norms = v1.length() * v2.length();
    if norms <= GEOMETRY_EPSILON {
        return 0.0;
    }
    (v1.dot(v2) / norms).clamp(-1.0, 1.0)
}

/// Angle between two vectors in radians (π/2 if either is zero)
pub fn angle_between(v1: DVec3, v2: DVec3) -> f64 {
    cos_between(v1, v2).acos()
}

/// Express a global vector in the basis formed by `x`, `y` and `z`
pub fn change_coord_sys(vector: DVec3, x: DVec3, y: DVec3, z: DVec3) -> DVec3 {
    DMat3::from_cols(x, y, z).inverse() * vector
}

/// Yaw, pitch and roll (intrinsic Z-Y'-X'') of a unit quaternion
pub fn yaw_pitch_roll(q: DQuat) -> (f64, f64, f64) {
    let yaw = (2.0 * (q.w * q.z + q.x * q.y)).atan2(1.0 - 2.0 * (q.y * q.y + q.z * q.z));
    let pitch = (2.0 * (q.w * q.y - q.z * q.x)).clamp(-1.0, 1.0).asin();
    let roll = (2.0 * (q.w * q.x + q.y * q.z)).atan2(1.0 - 2.0 * (q.x * q.x + q.y * q.y));
    (yaw, pitch, roll)
}

/// Yaw, pitch and roll of a global axis-angle rotation seen from a local basis
pub fn decompose_rotation(
    axis: DVec3,
    angle: f64,
    local_x: DVec3,
    local_y: DVec3,
    local_z: DVec3,
) -> GeometryResult<(f64, f64, f64)> {
    let local_axis = unit_axis(change_coord_sys(axis, local_x, local_y, local_z))?;
    Ok(yaw_pitch_roll(DQuat::from_axis_angle(local_axis, angle)))
}
