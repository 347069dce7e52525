//! Spline kinds and their shared storage.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use strand_math::{Point3, Vector3};

use crate::attributes::AttributeSet;
use crate::eval;

/// The closed set of spline kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplineKind {
    Poly,
    Bezier,
    Nurbs,
    /// Declared but not implemented; evaluation paths must not reach it.
    CatmullRom,
}

/// Lazily computed evaluated data, reset by [`Spline::mark_cache_invalid`].
///
/// Cells are filled at most once per invalidation and are safe to initialize
/// from concurrent readers.
#[derive(Debug, Default)]
pub struct EvalCache {
    pub(crate) positions: OnceLock<Vec<Point3>>,
    pub(crate) tilts: OnceLock<Vec<f64>>,
    pub(crate) normals: OnceLock<Vec<Vector3>>,
}

impl EvalCache {
    pub(crate) fn invalidate(&mut self) {
        *self = Self::default();
    }
}

/// Cloning a spline does not clone its caches; they refill on demand.
impl Clone for EvalCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

/// Storage common to every spline kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplineBase {
    pub positions: Vec<Point3>,
    pub radii: Vec<f64>,
    pub tilts: Vec<f64>,
    pub cyclic: bool,
    pub attributes: AttributeSet,
    #[serde(skip)]
    pub(crate) cache: EvalCache,
}

impl SplineBase {
    /// Base storage over `positions`, with unit radii and zero tilts.
    pub fn from_positions(positions: Vec<Point3>) -> Self {
        let n = positions.len();
        Self {
            positions,
            radii: vec![1.0; n],
            tilts: vec![0.0; n],
            cyclic: false,
            attributes: AttributeSet::new(),
            cache: EvalCache::default(),
        }
    }

    pub fn size(&self) -> usize {
        self.positions.len()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolySpline {
    pub base: SplineBase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BezierSpline {
    pub base: SplineBase,
    pub handles_left: Vec<Point3>,
    pub handles_right: Vec<Point3>,
    pub resolution: i32,
}

impl BezierSpline {
    pub const DEFAULT_RESOLUTION: i32 = 12;

    pub fn new(base: SplineBase, handles_left: Vec<Point3>, handles_right: Vec<Point3>) -> Self {
        debug_assert!(
            handles_left.len() == base.size() && handles_right.len() == base.size(),
            "Handle counts must match point count, got {}/{} handles for {} points",
            handles_left.len(),
            handles_right.len(),
            base.size()
        );
        Self {
            base,
            handles_left,
            handles_right,
            resolution: Self::DEFAULT_RESOLUTION,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurbsSpline {
    pub base: SplineBase,
    pub degree: usize,
    pub resolution: i32,
}

impl NurbsSpline {
    pub const DEFAULT_RESOLUTION: i32 = 12;

    pub fn new(base: SplineBase, degree: usize) -> Self {
        debug_assert!(degree >= 1, "NURBS degree must be at least 1");
        Self {
            base,
            degree,
            resolution: Self::DEFAULT_RESOLUTION,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatmullRomSpline {
    pub base: SplineBase,
}

/// One path within a multi-spline curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Spline {
    Poly(PolySpline),
    Bezier(BezierSpline),
    Nurbs(NurbsSpline),
    CatmullRom(CatmullRomSpline),
}

impl Spline {
    pub fn kind(&self) -> SplineKind {
        match self {
            Spline::Poly(_) => SplineKind::Poly,
            Spline::Bezier(_) => SplineKind::Bezier,
            Spline::Nurbs(_) => SplineKind::Nurbs,
            Spline::CatmullRom(_) => SplineKind::CatmullRom,
        }
    }

    pub fn base(&self) -> &SplineBase {
        match self {
            Spline::Poly(s) => &s.base,
            Spline::Bezier(s) => &s.base,
            Spline::Nurbs(s) => &s.base,
            Spline::CatmullRom(s) => &s.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut SplineBase {
        match self {
            Spline::Poly(s) => &mut s.base,
            Spline::Bezier(s) => &mut s.base,
            Spline::Nurbs(s) => &mut s.base,
            Spline::CatmullRom(s) => &mut s.base,
        }
    }

    pub fn size(&self) -> usize {
        self.base().size()
    }

    pub fn positions(&self) -> &[Point3] {
        &self.base().positions
    }

    pub fn radii(&self) -> &[f64] {
        &self.base().radii
    }

    pub fn tilts(&self) -> &[f64] {
        &self.base().tilts
    }

    pub fn is_cyclic(&self) -> bool {
        self.base().cyclic
    }

    pub fn set_cyclic(&mut self, cyclic: bool) {
        self.base_mut().cyclic = cyclic;
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.base().attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.base_mut().attributes
    }

    /// Drop all lazily evaluated data; it recomputes on next access.
    pub fn mark_cache_invalid(&mut self) {
        self.base_mut().cache.invalidate();
    }

    /// Points sampled along the spline, at the kind's resolution.
    pub fn evaluated_positions(&self) -> &[Point3] {
        self.base()
            .cache
            .positions
            .get_or_init(|| eval::evaluate_positions(self))
    }

    /// Tilt angles interpolated onto the evaluated points.
    pub fn evaluated_tilts(&self) -> &[f64] {
        self.base()
            .cache
            .tilts
            .get_or_init(|| eval::evaluate_tilts(self))
    }

    /// Unit normals at the evaluated points.
    pub fn evaluated_normals(&self) -> &[Vector3] {
        self.base()
            .cache
            .normals
            .get_or_init(|| eval::evaluate_normals(self))
    }
}
