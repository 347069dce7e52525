pub mod attributes;
pub mod curve;
mod eval;
pub mod offsets;
pub mod spline;

pub use attributes::AttributeSet;
pub use curve::Curve;
pub use offsets::OffsetIndex;
pub use spline::{
    BezierSpline, CatmullRomSpline, EvalCache, NurbsSpline, PolySpline, Spline, SplineBase,
    SplineKind,
};
