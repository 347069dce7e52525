//! Tangent frames along polylines.

use glam::{DQuat, DVec3};

use crate::{Point3, Vector3};

const PARALLEL_EPSILON: f64 = 1e-9;

/// Rotate `v` around `axis` (normalized internally) by `angle` radians.
pub fn rotate_about_axis(v: Vector3, axis: Vector3, angle: f64) -> Vector3 {
    let len = axis.length();
    if len < PARALLEL_EPSILON {
        return v;
    }
    DQuat::from_axis_angle(axis / len, angle) * v
}

/// Unit tangents at every point of a polyline, by central differences.
///
/// Endpoints use one-sided differences unless `cyclic`, in which case
/// neighbors wrap around. A single point has no direction; it gets the X
/// axis so downstream frames stay well-defined.
pub fn polyline_tangents(points: &[Point3], cyclic: bool) -> Vec<Vector3> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![DVec3::X];
    }

    let mut tangents = Vec::with_capacity(n);
    for i in 0..n {
        let prev = if i > 0 {
            points[i - 1]
        } else if cyclic {
            points[n - 1]
        } else {
            points[0]
        };
        let next = if i + 1 < n {
            points[i + 1]
        } else if cyclic {
            points[0]
        } else {
            points[n - 1]
        };
        let dir = next - prev;
        tangents.push(if dir.length() < PARALLEL_EPSILON {
            DVec3::X
        } else {
            dir.normalize()
        });
    }
    tangents
}

/// Per-point unit normals for a polyline: the Z-up reference direction made
/// perpendicular to the local tangent, then twisted around the tangent by the
/// point's tilt (radians).
///
/// `tilts` is either empty (no twist) or one angle per point.
pub fn frame_normals(points: &[Point3], tilts: &[f64], cyclic: bool) -> Vec<Vector3> {
    debug_assert!(
        tilts.is_empty() || tilts.len() == points.len(),
        "Tilt count must match point count, got {} tilts for {} points",
        tilts.len(),
        points.len()
    );

    let tangents = polyline_tangents(points, cyclic);
    tangents
        .iter()
        .enumerate()
        .map(|(i, &tangent)| {
            let side = DVec3::Z.cross(tangent);
            let normal = if side.length() < PARALLEL_EPSILON {
                // Tangent is vertical; any horizontal direction serves.
                DVec3::X
            } else {
                tangent.cross(side).normalize()
            };
            match tilts.get(i) {
                Some(&tilt) if tilt != 0.0 => rotate_about_axis(normal, tangent, tilt),
                _ => normal,
            }
        })
        .collect()
}
