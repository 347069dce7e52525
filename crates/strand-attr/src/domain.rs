//! Conversion of attribute values between point and spline granularity.

use strand_core::AttrElement;
use strand_curve::Curve;
use strand_math::mix::{Mix, Mixer};

use crate::attribute::{Erasable, ReadAttribute};
use crate::varray::VArray;

/// The granularity an attribute has one value at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrDomain {
    Point,
    Spline,
}

/// Convert `attribute` from one granularity to another.
///
/// Same-granularity conversion passes the values through untouched; an empty
/// input, or a conversion with no defined behavior, yields `None`.
pub fn adapt_domain<'a>(
    curve: &'a Curve,
    attribute: ReadAttribute<'a>,
    from: AttrDomain,
    to: AttrDomain,
) -> Option<ReadAttribute<'a>> {
    if attribute.is_empty() {
        return None;
    }
    if from == to {
        return Some(attribute);
    }
    match (from, to) {
        (AttrDomain::Point, AttrDomain::Spline) => Some(point_to_spline(curve, attribute)),
        (AttrDomain::Spline, AttrDomain::Point) => Some(spline_to_point(curve, attribute)),
        _ => None,
    }
}

macro_rules! adapt_each_type {
    ($attribute:expr, $varray:ident => $body:expr) => {
        match $attribute {
            ReadAttribute::Bool($varray) => Erasable::wrap_read($body),
            ReadAttribute::Int($varray) => Erasable::wrap_read($body),
            ReadAttribute::Float($varray) => Erasable::wrap_read($body),
            ReadAttribute::Vec2($varray) => Erasable::wrap_read($body),
            ReadAttribute::Vec3($varray) => Erasable::wrap_read($body),
            ReadAttribute::Color($varray) => Erasable::wrap_read($body),
        }
    };
}

/// Reduce every spline's point values to one value per spline.
///
/// Booleans reduce to all-true, everything else to the arithmetic mean;
/// splines without points finalize to the reduction's identity.
fn point_to_spline<'a>(curve: &Curve, attribute: ReadAttribute<'a>) -> ReadAttribute<'a> {
    adapt_each_type!(attribute, varray => VArray::Owned(reduce_per_spline(curve, &varray)))
}

fn reduce_per_spline<T>(curve: &Curve, values: &VArray<'_, T>) -> Vec<T>
where
    T: AttrElement + Mix,
{
    let offsets = curve.point_offsets();
    debug_assert_eq!(values.len(), offsets.total());

    let mut mixer = Mixer::new(offsets.spline_count());
    for spline in 0..offsets.spline_count() {
        for index in offsets.range(spline) {
            mixer.mix_in(spline, values.get(index));
        }
    }
    mixer.finalize()
}

/// View spline values at point granularity, lazily.
fn spline_to_point<'a>(curve: &'a Curve, attribute: ReadAttribute<'a>) -> ReadAttribute<'a> {
    adapt_each_type!(attribute, varray => {
        debug_assert_eq!(varray.len(), curve.spline_count());
        VArray::Broadcast {
            values: varray.to_vec(),
            offsets: curve.point_offsets(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use strand_curve::{PolySpline, Spline, SplineBase};

    fn curve_with_sizes(sizes: &[usize]) -> Curve {
        let mut curve = Curve::new();
        for &size in sizes {
            let positions = (0..size).map(|i| DVec3::new(i as f64, 0.0, 0.0)).collect();
            curve.add_spline(Spline::Poly(PolySpline {
                base: SplineBase::from_positions(positions),
            }));
        }
        curve
    }

    #[test]
    fn test_identity_is_passthrough() {
        let curve = curve_with_sizes(&[2]);
        let attribute = ReadAttribute::Float(VArray::Owned(vec![1.0, 2.0]));
        let out = adapt_domain(&curve, attribute, AttrDomain::Point, AttrDomain::Point).unwrap();
        assert_eq!(out.typed::<f64>().unwrap().to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_empty_input_is_absent() {
        let curve = curve_with_sizes(&[]);
        let attribute = ReadAttribute::Float(VArray::Owned(Vec::new()));
        assert!(adapt_domain(&curve, attribute, AttrDomain::Point, AttrDomain::Point).is_none());
    }

    #[test]
    fn test_point_to_spline_mean() {
        let curve = curve_with_sizes(&[3, 2]);
        let attribute = ReadAttribute::Float(VArray::Owned(vec![1.0, 2.0, 3.0, 4.0, 5.0]));
        let out = adapt_domain(&curve, attribute, AttrDomain::Point, AttrDomain::Spline).unwrap();
        assert_eq!(out.typed::<f64>().unwrap().to_vec(), vec![2.0, 4.5]);
    }

    #[test]
    fn test_point_to_spline_bool_and() {
        let curve = curve_with_sizes(&[2, 2, 0]);
        let attribute = ReadAttribute::Bool(VArray::Owned(vec![true, false, true, true]));
        let out = adapt_domain(&curve, attribute, AttrDomain::Point, AttrDomain::Spline).unwrap();
        // One false point poisons its spline; an empty spline is vacuously
        // true.
        assert_eq!(
            out.typed::<bool>().unwrap().to_vec(),
            vec![false, true, true]
        );
    }

    #[test]
    fn test_spline_to_point_broadcast() {
        let curve = curve_with_sizes(&[3, 2]);
        let attribute = ReadAttribute::Int(VArray::Owned(vec![7, 9]));
        let out = adapt_domain(&curve, attribute, AttrDomain::Spline, AttrDomain::Point).unwrap();
        let varray = out.typed::<i32>().unwrap();
        assert_eq!(varray.len(), 5);
        assert_eq!(varray.to_vec(), vec![7, 7, 7, 9, 9]);
        for i in 0..3 {
            assert_eq!(varray.get(i), 7);
        }
    }
}
