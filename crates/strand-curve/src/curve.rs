//! The multi-spline curve container.

use serde::{Deserialize, Serialize};
use strand_core::{Result, StrandError, Validate};

use crate::attributes::AttributeSet;
use crate::offsets::OffsetIndex;
use crate::spline::{Spline, SplineKind};

/// An ordered collection of splines plus spline-granularity custom
/// attributes stored contiguously on the curve itself.
///
/// Every spline is expected to carry the same set of point-attribute layers
/// with identical types; this is checked in debug builds only
/// ([`Curve::assert_valid_point_attributes`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Curve {
    splines: Vec<Spline>,
    pub attributes: AttributeSet,
}

impl Curve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn splines(&self) -> &[Spline] {
        &self.splines
    }

    pub fn splines_mut(&mut self) -> &mut [Spline] {
        &mut self.splines
    }

    /// Append a spline, growing every curve-level attribute layer by one
    /// default value so spline-granularity layers stay in sync.
    pub fn add_spline(&mut self, spline: Spline) {
        self.splines.push(spline);
        self.attributes.push_defaults();
    }

    pub fn spline_count(&self) -> usize {
        self.splines.len()
    }

    pub fn point_count(&self) -> usize {
        self.splines.iter().map(|spline| spline.size()).sum()
    }

    pub fn has_spline_with_kind(&self, kind: SplineKind) -> bool {
        self.splines.iter().any(|spline| spline.kind() == kind)
    }

    /// Derive the flat-index table over the current spline sizes.
    pub fn point_offsets(&self) -> OffsetIndex {
        OffsetIndex::from_sizes(self.splines.iter().map(|spline| spline.size()))
    }

    /// Debug-build check that every spline carries the same point-attribute
    /// layers with the same types.
    pub fn assert_valid_point_attributes(&self) {
        debug_assert!(
            self.point_attributes_consistent(),
            "Splines carry mismatched point-attribute layers"
        );
    }

    fn point_attributes_consistent(&self) -> bool {
        let Some(first) = self.splines.first() else {
            return true;
        };
        self.splines[1..].iter().all(|spline| {
            spline.attributes().layer_count() == first.attributes().layer_count()
                && first.attributes().iter().all(|layer| {
                    spline
                        .attributes()
                        .get(layer.name())
                        .is_some_and(|data| data.data_type() == layer.data().data_type())
                })
        })
    }
}

impl Validate for Curve {
    fn validate(&self) -> Result<()> {
        for (i, spline) in self.splines.iter().enumerate() {
            let size = spline.size();
            let base = spline.base();
            if base.radii.len() != size || base.tilts.len() != size {
                return Err(StrandError::Geometry(format!(
                    "Spline {} has {} points but {} radii and {} tilts",
                    i,
                    size,
                    base.radii.len(),
                    base.tilts.len()
                )));
            }
            for layer in base.attributes.iter() {
                if layer.data().len() != size {
                    return Err(StrandError::Attribute(format!(
                        "Layer '{}' on spline {} has {} values for {} points",
                        layer.name(),
                        i,
                        layer.data().len(),
                        size
                    )));
                }
            }
            if let Spline::Bezier(bezier) = spline {
                if bezier.handles_left.len() != size || bezier.handles_right.len() != size {
                    return Err(StrandError::Geometry(format!(
                        "Bezier spline {} has mismatched handle counts",
                        i
                    )));
                }
            }
        }

        if !self.point_attributes_consistent() {
            return Err(StrandError::Attribute(
                "Splines carry mismatched point-attribute layers".into(),
            ));
        }

        for layer in self.attributes.iter() {
            if layer.data().len() != self.splines.len() {
                return Err(StrandError::Attribute(format!(
                    "Curve layer '{}' has {} values for {} splines",
                    layer.name(),
                    layer.data().len(),
                    self.splines.len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::{PolySpline, SplineBase};
    use glam::DVec3;
    use strand_core::AttrType;

    fn poly(count: usize) -> Spline {
        let positions = (0..count).map(|i| DVec3::new(i as f64, 0.0, 0.0)).collect();
        Spline::Poly(PolySpline {
            base: SplineBase::from_positions(positions),
        })
    }

    #[test]
    fn test_counts_and_offsets() {
        let mut curve = Curve::new();
        curve.add_spline(poly(3));
        curve.add_spline(poly(2));

        assert_eq!(curve.spline_count(), 2);
        assert_eq!(curve.point_count(), 5);
        assert_eq!(curve.point_offsets().as_slice(), &[0, 3, 5]);
    }

    #[test]
    fn test_add_spline_grows_curve_layers() {
        let mut curve = Curve::new();
        curve.add_spline(poly(1));
        curve.attributes.create("label", AttrType::Int, 1);
        curve.add_spline(poly(2));
        assert_eq!(curve.attributes.get("label").unwrap().len(), 2);
    }

    #[test]
    fn test_validate_catches_bad_layer_len() {
        let mut curve = Curve::new();
        curve.add_spline(poly(3));
        curve.splines_mut()[0]
            .attributes_mut()
            .create("weight", AttrType::Float, 2);
        assert!(curve.validate().is_err());
    }

    #[test]
    fn test_validate_catches_inconsistent_point_layers() {
        let mut curve = Curve::new();
        curve.add_spline(poly(2));
        curve.add_spline(poly(2));
        curve.splines_mut()[0]
            .attributes_mut()
            .create("weight", AttrType::Float, 2);
        assert!(curve.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut curve = Curve::new();
        curve.add_spline(poly(3));
        curve.splines_mut()[0]
            .attributes_mut()
            .create("weight", AttrType::Float, 3);
        curve.attributes.create("label", AttrType::Int, 1);

        let json = serde_json::to_string(&curve).unwrap();
        let restored: Curve = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.spline_count(), 1);
        assert_eq!(restored.point_count(), 3);
        assert!(restored.splines()[0].attributes().contains("weight"));
        assert!(restored.attributes.contains("label"));
        restored.validate().unwrap();
    }
}
