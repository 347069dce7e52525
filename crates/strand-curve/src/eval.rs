//! Sampling of spline kinds into evaluated polylines.

use strand_math::frame;
use strand_math::Point3;

use crate::spline::{BezierSpline, NurbsSpline, Spline};

pub(crate) fn evaluate_positions(spline: &Spline) -> Vec<Point3> {
    match spline {
        Spline::Poly(s) => s.base.positions.clone(),
        Spline::Bezier(s) => sample_bezier(s),
        Spline::Nurbs(s) => sample_nurbs(s),
        Spline::CatmullRom(s) => {
            debug_assert!(false, "Catmull-Rom evaluation is not implemented");
            s.base.positions.clone()
        }
    }
}

pub(crate) fn evaluate_tilts(spline: &Spline) -> Vec<f64> {
    let tilts = &spline.base().tilts;
    match spline {
        Spline::Poly(_) | Spline::CatmullRom(_) => tilts.clone(),
        Spline::Bezier(s) => sample_segment_lerp(tilts, s.resolution, s.base.cyclic),
        Spline::Nurbs(s) => sample_segment_lerp(tilts, s.resolution, s.base.cyclic),
    }
}

pub(crate) fn evaluate_normals(spline: &Spline) -> Vec<strand_math::Vector3> {
    frame::frame_normals(
        spline.evaluated_positions(),
        spline.evaluated_tilts(),
        spline.is_cyclic(),
    )
}

impl BezierSpline {
    /// Index of each control point within the evaluated point array.
    pub fn control_point_eval_offsets(&self) -> Vec<usize> {
        let stride = self.resolution.max(1) as usize;
        (0..self.base.size()).map(|i| i * stride).collect()
    }
}

/// Number of evaluated points for `n` control points at `resolution` samples
/// per segment. Cyclic splines close the last segment back to the start, so
/// the first point is not repeated at the end.
fn evaluated_len(n: usize, resolution: i32, cyclic: bool) -> usize {
    let res = resolution.max(1) as usize;
    if n < 2 {
        return n;
    }
    if cyclic {
        n * res
    } else {
        (n - 1) * res + 1
    }
}

fn cubic_point(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Point3 {
    let s = 1.0 - t;
    p0 * (s * s * s) + p1 * (3.0 * s * s * t) + p2 * (3.0 * s * t * t) + p3 * (t * t * t)
}

fn sample_bezier(spline: &BezierSpline) -> Vec<Point3> {
    let n = spline.base.size();
    if n < 2 {
        return spline.base.positions.clone();
    }
    let res = spline.resolution.max(1) as usize;
    let cyclic = spline.base.cyclic;
    let segments = if cyclic { n } else { n - 1 };

    let mut out = Vec::with_capacity(evaluated_len(n, spline.resolution, cyclic));
    for i in 0..segments {
        let j = (i + 1) % n;
        let p0 = spline.base.positions[i];
        let p1 = spline.handles_right[i];
        let p2 = spline.handles_left[j];
        let p3 = spline.base.positions[j];
        for k in 0..res {
            let t = k as f64 / res as f64;
            out.push(cubic_point(p0, p1, p2, p3, t));
        }
    }
    if !cyclic {
        out.push(spline.base.positions[n - 1]);
    }
    out
}

fn sample_nurbs(spline: &NurbsSpline) -> Vec<Point3> {
    let n = spline.base.size();
    if n < 2 {
        return spline.base.positions.clone();
    }
    let cyclic = spline.base.cyclic;

    // A cyclic spline is closed by repeating the first control point; the
    // sampling below then stops one sample short of the duplicated end.
    let mut control_points = spline.base.positions.clone();
    if cyclic {
        control_points.push(control_points[0]);
    }

    let degree = spline.degree.clamp(1, control_points.len() - 1);
    let knots = clamped_uniform_knots(control_points.len(), degree);
    let count = evaluated_len(n, spline.resolution, cyclic);

    (0..count)
        .map(|k| {
            let t = if cyclic {
                k as f64 / count as f64
            } else {
                k as f64 / (count - 1) as f64
            };
            curve_point(degree, &knots, &control_points, t)
        })
        .collect()
}

/// Linear interpolation of per-control-point scalars onto evaluated points.
fn sample_segment_lerp(values: &[f64], resolution: i32, cyclic: bool) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return values.to_vec();
    }
    let res = resolution.max(1) as usize;
    let segments = if cyclic { n } else { n - 1 };

    let mut out = Vec::with_capacity(evaluated_len(n, resolution, cyclic));
    for i in 0..segments {
        let j = (i + 1) % n;
        for k in 0..res {
            let f = k as f64 / res as f64;
            out.push(values[i] * (1.0 - f) + values[j] * f);
        }
    }
    if !cyclic {
        out.push(values[n - 1]);
    }
    out
}

// --- Clamped uniform B-spline evaluation ---

fn clamped_uniform_knots(control_count: usize, degree: usize) -> Vec<f64> {
    let span_count = control_count - degree;
    let mut knots = Vec::with_capacity(control_count + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));
    for i in 1..span_count {
        knots.push(i as f64 / span_count as f64);
    }
    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    knots
}

fn find_span(degree: usize, knots: &[f64], last_control: usize, t: f64) -> usize {
    if t >= knots[last_control + 1] {
        return last_control;
    }
    if t <= knots[degree] {
        return degree;
    }
    let mut low = degree;
    let mut high = last_control + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut basis = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    basis[0] = 1.0;
    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = basis[r] / (right[r + 1] + left[j - r]);
            basis[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        basis[j] = saved;
    }
    basis
}

fn curve_point(degree: usize, knots: &[f64], control_points: &[Point3], t: f64) -> Point3 {
    let last_control = control_points.len() - 1;
    let span = find_span(degree, knots, last_control, t);
    let basis = basis_functions(degree, knots, span, t);

    let mut point = Point3::ZERO;
    for (i, weight) in basis.iter().enumerate() {
        point += *weight * control_points[span - degree + i];
    }
    point
}
