//! Curve normals exposed as a read-only attribute.

use rayon::prelude::*;

use strand_curve::{Curve, PolySpline, Spline, SplineBase, SplineKind};
use strand_math::Vector3;

use crate::attribute::ReadAttribute;
use crate::component::CurveComponent;
use crate::domain::{adapt_domain, AttrDomain};
use crate::varray::VArray;

/// Normals at the requested granularity, or `None` without curve data.
///
/// Point-granularity normals for a single poly spline borrow the spline's
/// evaluated normals directly; every other case computes an owned array.
pub fn curve_normals(component: &CurveComponent, domain: AttrDomain) -> Option<ReadAttribute<'_>> {
    let curve = component.get_for_read()?;
    match domain {
        AttrDomain::Point => {
            let splines = curve.splines();
            if splines.len() == 1 && splines[0].kind() == SplineKind::Poly {
                return Some(ReadAttribute::Vec3(VArray::Span(
                    splines[0].evaluated_normals(),
                )));
            }
            Some(ReadAttribute::Vec3(VArray::Owned(point_normals(curve))))
        }
        AttrDomain::Spline => {
            let normals = ReadAttribute::Vec3(VArray::Owned(point_normals(curve)));
            adapt_domain(curve, normals, AttrDomain::Point, AttrDomain::Spline)
        }
    }
}

/// One normal per control point, over all splines.
///
/// Each spline writes a disjoint output range, so the loop parallelizes
/// without synchronization.
fn point_normals(curve: &Curve) -> Vec<Vector3> {
    let offsets = curve.point_offsets();
    let mut normals = vec![Vector3::ZERO; offsets.total()];

    let mut chunks = Vec::with_capacity(offsets.spline_count());
    let mut rest = normals.as_mut_slice();
    for spline in 0..offsets.spline_count() {
        let (chunk, tail) = rest.split_at_mut(offsets.size_of(spline));
        chunks.push(chunk);
        rest = tail;
    }

    curve
        .splines()
        .par_iter()
        .zip(chunks)
        .for_each(|(spline, out)| spline_point_normals(spline, out));

    normals
}

fn spline_point_normals(spline: &Spline, out: &mut [Vector3]) {
    match spline {
        Spline::Poly(_) => out.copy_from_slice(spline.evaluated_normals()),
        Spline::Bezier(bezier) => {
            // Sample the evaluated normals where the control points sit.
            let evaluated = spline.evaluated_normals();
            for (point, offset) in bezier.control_point_eval_offsets().iter().enumerate() {
                out[point] = evaluated[*offset];
            }
        }
        Spline::Nurbs(nurbs) => {
            // NURBS control points are not on the path, so their normals are
            // not well defined; borrow the frame of a poly spline over the
            // same control points instead.
            let mut base = SplineBase::from_positions(nurbs.base.positions.clone());
            base.tilts = nurbs.base.tilts.clone();
            base.cyclic = nurbs.base.cyclic;
            let poly = Spline::Poly(PolySpline { base });
            out.copy_from_slice(poly.evaluated_normals());
        }
        Spline::CatmullRom(_) => {
            debug_assert!(false, "Catmull-Rom normals are not implemented");
            out.fill(Vector3::ZERO);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;
    use strand_curve::PolySpline;

    fn poly(points: Vec<DVec3>) -> Spline {
        Spline::Poly(PolySpline {
            base: SplineBase::from_positions(points),
        })
    }

    #[test]
    fn test_single_poly_spline_borrows_normals() {
        let mut curve = Curve::new();
        curve.add_spline(poly(vec![DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0)]));
        let component = CurveComponent::from_curve(curve);

        let normals = curve_normals(&component, AttrDomain::Point).unwrap();
        assert_eq!(normals.len(), 3);
        let varray = normals.typed::<DVec3>().unwrap();
        assert!(varray.as_span().is_some());
        for normal in varray.to_vec() {
            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_multi_spline_point_normals_cover_all_points() {
        let mut curve = Curve::new();
        curve.add_spline(poly(vec![DVec3::ZERO, DVec3::X]));
        curve.add_spline(poly(vec![
            DVec3::Y,
            DVec3::new(0.0, 2.0, 0.0),
            DVec3::new(0.0, 3.0, 0.0),
        ]));
        let component = CurveComponent::from_curve(curve);

        let normals = curve_normals(&component, AttrDomain::Point).unwrap();
        assert_eq!(normals.len(), 5);
        for normal in normals.typed::<DVec3>().unwrap().to_vec() {
            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_spline_domain_reduces() {
        let mut curve = Curve::new();
        curve.add_spline(poly(vec![DVec3::ZERO, DVec3::X]));
        curve.add_spline(poly(vec![DVec3::Y, DVec3::new(0.0, 2.0, 0.0)]));
        let component = CurveComponent::from_curve(curve);

        let normals = curve_normals(&component, AttrDomain::Spline).unwrap();
        assert_eq!(normals.len(), 2);
    }
}
