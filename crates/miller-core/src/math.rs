//! Vector helpers shared by the mapper and the renderer.

use std::f32::consts::PI;

use glam::{Quat, Vec3};

/// Dot products this close to +-1 are treated as (anti)parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Normalize `v`, or `None` when it has no direction.
///
/// Only the zero vector and non-finite input are rejected. Scaling by the
/// largest component first keeps the length finite and nonzero for any other
/// vector, however large or small its components.
pub fn normalize(v: Vec3) -> Option<Vec3> {
    if !v.is_finite() {
        return None;
    }
    let scale = v.abs().max_element();
    if scale == 0.0 {
        return None;
    }
    let unit = (v / scale).normalize();
    unit.is_normalized().then_some(unit)
}

/// A unit vector perpendicular to the unit vector `v`.
///
/// Crosses `v` with the world axis it is least aligned with, so `+Z` maps to
/// `+Y` and `+X` maps to `+Z`.
pub fn perpendicular(v: Vec3) -> Vec3 {
    let abs = v.abs();
    let reference = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    v.cross(reference).normalize()
}

/// Shortest-arc rotation taking unit vector `from` onto unit vector `to`.
///
/// The rotation axis is `from × to` and the angle `acos(from · to)`.
/// Parallel inputs give the identity; antiparallel inputs give a half turn
/// about [`perpendicular`]`(from)`, since the cross product vanishes there.
pub fn shortest_arc(from: Vec3, to: Vec3) -> Quat {
    let dot = from.dot(to).clamp(-1.0, 1.0);
    if dot >= 1.0 - PARALLEL_EPSILON {
        return Quat::IDENTITY;
    }
    if dot <= -1.0 + PARALLEL_EPSILON {
        return Quat::from_axis_angle(perpendicular(from), PI);
    }
    let axis = from.cross(to).normalize();
    Quat::from_axis_angle(axis, dot.acos())
}
