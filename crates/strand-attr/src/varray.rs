//! Virtual arrays: fragmented per-spline storage presented as one flat,
//! randomly-indexable, bulk-materializable array of a single element type.
//!
//! Adapters borrow the backing curve data and are rebuilt per access
//! request; they cannot outlive the borrow they were constructed from.

use std::mem::MaybeUninit;

use strand_core::AttrElement;
use strand_curve::{OffsetIndex, Spline};

use crate::mask::IndexMask;

/// Accessors routing one point attribute to its kind-specific storage.
///
/// `get` returns an empty span for splines that lack the attribute (the
/// empty-span convention: such points read as the default value), and
/// `get_mut` returns `None` there, making writes a no-op. `update_on_write`
/// runs once per affected spline when a write batch is finished, not per
/// element.
#[derive(Clone, Copy)]
pub struct PointSpanAccessor<T: AttrElement> {
    pub get: for<'s> fn(&'s Spline) -> &'s [T],
    pub get_mut: for<'s> fn(&'s mut Spline) -> Option<&'s mut [T]>,
    pub update_on_write: Option<fn(&mut Spline)>,
}

/// A read-only virtual array over one of five backing shapes.
pub enum VArray<'a, T: AttrElement> {
    /// One contiguous span (single-spline fast path, curve-level layers).
    Span(&'a [T]),
    /// One physical span per spline; empty spans read as `T::default()`.
    Spans {
        spans: Vec<&'a [T]>,
        offsets: OffsetIndex,
    },
    /// One derived value per spline, computed on access.
    SplineDerived {
        splines: &'a [Spline],
        get: fn(&Spline) -> T,
    },
    /// One value per spline, viewed at point granularity.
    Broadcast {
        values: Vec<T>,
        offsets: OffsetIndex,
    },
    /// Materialized values.
    Owned(Vec<T>),
}

impl<'a, T: AttrElement> VArray<'a, T> {
    pub fn len(&self) -> usize {
        match self {
            VArray::Span(data) => data.len(),
            VArray::Spans { offsets, .. } => offsets.total(),
            VArray::SplineDerived { splines, .. } => splines.len(),
            VArray::Broadcast { offsets, .. } => offsets.total(),
            VArray::Owned(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> T {
        match self {
            VArray::Span(data) => data[index],
            VArray::Spans { spans, offsets } => {
                let (spline, local) = offsets.lookup(index);
                let span = spans[spline];
                if span.is_empty() {
                    T::default()
                } else {
                    span[local]
                }
            }
            VArray::SplineDerived { splines, get } => get(&splines[index]),
            VArray::Broadcast { values, offsets } => {
                let (spline, _) = offsets.lookup(index);
                values[spline]
            }
            VArray::Owned(data) => data[index],
        }
    }

    /// The backing span, when the array is contiguous.
    pub fn as_span(&self) -> Option<&[T]> {
        match self {
            VArray::Span(data) => Some(data),
            VArray::Owned(data) => Some(data),
            _ => None,
        }
    }

    /// Copy the masked values into `dst` (sized to the full array).
    pub fn materialize(&self, mask: IndexMask, dst: &mut [T]) {
        debug_assert_eq!(dst.len(), self.len());
        match self {
            VArray::Span(data) => materialize_contiguous(data, mask, dst),
            VArray::Owned(data) => materialize_contiguous(data, mask, dst),
            VArray::Spans { spans, offsets } => materialize_spans(spans, offsets, mask, dst),
            VArray::Broadcast { values, offsets } => {
                materialize_broadcast(values, offsets, mask, dst)
            }
            VArray::SplineDerived { splines, get } => {
                for index in mask.iter() {
                    dst[index] = get(&splines[index]);
                }
            }
        }
    }

    /// Like [`materialize`](Self::materialize), writing into uninitialized
    /// storage. Only the masked entries are initialized afterwards.
    pub fn materialize_uninit(&self, mask: IndexMask, dst: &mut [MaybeUninit<T>]) {
        debug_assert_eq!(dst.len(), self.len());
        match self {
            VArray::Span(data) => materialize_contiguous_uninit(data, mask, dst),
            VArray::Owned(data) => materialize_contiguous_uninit(data, mask, dst),
            VArray::Spans { spans, offsets } => {
                materialize_spans_uninit(spans, offsets, mask, dst)
            }
            VArray::Broadcast { values, offsets } => {
                materialize_broadcast_uninit(values, offsets, mask, dst)
            }
            VArray::SplineDerived { splines, get } => {
                for index in mask.iter() {
                    dst[index].write(get(&splines[index]));
                }
            }
        }
    }

    /// Materialize the full range into a fresh vector.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = vec![T::default(); self.len()];
        self.materialize(IndexMask::full(self.len()), &mut out);
        out
    }
}

/// A read-write virtual array.
///
/// After a batch of writes, call [`finish`](VMutArray::finish) to run the
/// backing's update-on-write hook once per affected spline.
pub enum VMutArray<'a, T: AttrElement> {
    /// One contiguous span (single-spline fast path, curve-level layers).
    Span(&'a mut [T]),
    /// One physical span per spline, pre-resolved (dynamic point layers).
    Spans {
        spans: Vec<&'a mut [T]>,
        offsets: OffsetIndex,
    },
    /// Accessor-routed per-spline spans (builtin point attributes); covers
    /// kind-specific storage such as handles, where some splines lack the
    /// attribute entirely.
    SplineSpans {
        splines: &'a mut [Spline],
        offsets: OffsetIndex,
        accessor: PointSpanAccessor<T>,
    },
    /// One derived value per spline with a get/set function pair; the setter
    /// owns clamping and cache invalidation.
    SplineDerived {
        splines: &'a mut [Spline],
        get: fn(&Spline) -> T,
        set: fn(&mut Spline, T),
    },
}

impl<'a, T: AttrElement> VMutArray<'a, T> {
    pub fn len(&self) -> usize {
        match self {
            VMutArray::Span(data) => data.len(),
            VMutArray::Spans { offsets, .. } => offsets.total(),
            VMutArray::SplineSpans { offsets, .. } => offsets.total(),
            VMutArray::SplineDerived { splines, .. } => splines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> T {
        match self {
            VMutArray::Span(data) => data[index],
            VMutArray::Spans { spans, offsets } => {
                let (spline, local) = offsets.lookup(index);
                let span = &spans[spline];
                if span.is_empty() {
                    T::default()
                } else {
                    span[local]
                }
            }
            VMutArray::SplineSpans {
                splines,
                offsets,
                accessor,
            } => {
                let (spline, local) = offsets.lookup(index);
                let span = (accessor.get)(&splines[spline]);
                if span.is_empty() {
                    T::default()
                } else {
                    span[local]
                }
            }
            VMutArray::SplineDerived { splines, get, .. } => get(&splines[index]),
        }
    }

    /// Scatter one value. Splines lacking the attribute ignore the write.
    pub fn set(&mut self, index: usize, value: T) {
        match self {
            VMutArray::Span(data) => data[index] = value,
            VMutArray::Spans { spans, offsets } => {
                let (spline, local) = offsets.lookup(index);
                let span = &mut spans[spline];
                if !span.is_empty() {
                    span[local] = value;
                }
            }
            VMutArray::SplineSpans {
                splines,
                offsets,
                accessor,
            } => {
                let (spline, local) = offsets.lookup(index);
                if let Some(span) = (accessor.get_mut)(&mut splines[spline]) {
                    span[local] = value;
                }
            }
            VMutArray::SplineDerived { splines, set, .. } => set(&mut splines[index], value),
        }
    }

    /// Copy `src` (in flat order) into the backing, one bulk copy per
    /// spline.
    pub fn set_all(&mut self, src: &[T]) {
        debug_assert_eq!(src.len(), self.len());
        match self {
            VMutArray::Span(data) => data.copy_from_slice(src),
            VMutArray::Spans { spans, offsets } => {
                for (spline, span) in spans.iter_mut().enumerate() {
                    if !span.is_empty() {
                        span.copy_from_slice(&src[offsets.range(spline)]);
                    }
                }
            }
            VMutArray::SplineSpans {
                splines,
                offsets,
                accessor,
            } => {
                for (index, spline) in splines.iter_mut().enumerate() {
                    if let Some(span) = (accessor.get_mut)(spline) {
                        span.copy_from_slice(&src[offsets.range(index)]);
                    }
                }
            }
            VMutArray::SplineDerived { splines, set, .. } => {
                for (index, spline) in splines.iter_mut().enumerate() {
                    set(spline, src[index]);
                }
            }
        }
    }

    /// Copy the masked values into `dst` (sized to the full array).
    pub fn materialize(&self, mask: IndexMask, dst: &mut [T]) {
        debug_assert_eq!(dst.len(), self.len());
        match self {
            VMutArray::Span(data) => materialize_contiguous(data, mask, dst),
            VMutArray::Spans { spans, offsets } => {
                let shared: Vec<&[T]> = spans.iter().map(|span| &**span).collect();
                materialize_spans(&shared, offsets, mask, dst);
            }
            VMutArray::SplineSpans {
                splines,
                offsets,
                accessor,
            } => {
                let shared: Vec<&[T]> =
                    splines.iter().map(|spline| (accessor.get)(spline)).collect();
                materialize_spans(&shared, offsets, mask, dst);
            }
            VMutArray::SplineDerived { splines, get, .. } => {
                for index in mask.iter() {
                    dst[index] = get(&splines[index]);
                }
            }
        }
    }

    pub fn materialize_uninit(&self, mask: IndexMask, dst: &mut [MaybeUninit<T>]) {
        debug_assert_eq!(dst.len(), self.len());
        match self {
            VMutArray::Span(data) => materialize_contiguous_uninit(data, mask, dst),
            VMutArray::Spans { spans, offsets } => {
                let shared: Vec<&[T]> = spans.iter().map(|span| &**span).collect();
                materialize_spans_uninit(&shared, offsets, mask, dst);
            }
            VMutArray::SplineSpans {
                splines,
                offsets,
                accessor,
            } => {
                let shared: Vec<&[T]> =
                    splines.iter().map(|spline| (accessor.get)(spline)).collect();
                materialize_spans_uninit(&shared, offsets, mask, dst);
            }
            VMutArray::SplineDerived { splines, get, .. } => {
                for index in mask.iter() {
                    dst[index].write(get(&splines[index]));
                }
            }
        }
    }

    /// End a write batch: run the update-on-write hook once per affected
    /// spline. Backings without a hook are unaffected.
    pub fn finish(self) {
        if let VMutArray::SplineSpans {
            splines, accessor, ..
        } = self
        {
            if let Some(update) = accessor.update_on_write {
                for spline in splines {
                    update(spline);
                }
            }
        }
    }
}

fn materialize_contiguous<T: AttrElement>(src: &[T], mask: IndexMask, dst: &mut [T]) {
    if mask.is_full_range(src.len()) {
        dst.copy_from_slice(src);
    } else {
        for index in mask.iter() {
            dst[index] = src[index];
        }
    }
}

fn materialize_contiguous_uninit<T: AttrElement>(
    src: &[T],
    mask: IndexMask,
    dst: &mut [MaybeUninit<T>],
) {
    for index in mask.iter() {
        dst[index].write(src[index]);
    }
}

/// Individual spans may be empty when a spline lacks the attribute; the
/// corresponding destination range is filled with the default value instead
/// of read out of bounds.
fn materialize_spans<T: AttrElement>(
    spans: &[&[T]],
    offsets: &OffsetIndex,
    mask: IndexMask,
    dst: &mut [T],
) {
    if mask.is_full_range(offsets.total()) {
        for (index, span) in spans.iter().enumerate() {
            let out = &mut dst[offsets.range(index)];
            if span.is_empty() {
                out.fill(T::default());
            } else {
                out.copy_from_slice(span);
            }
        }
    } else {
        let table = offsets.as_slice();
        let mut spline = 0;
        for index in mask.iter() {
            // Skip splines with no masked points.
            while index >= table[spline + 1] {
                spline += 1;
            }
            let span = spans[spline];
            dst[index] = if span.is_empty() {
                T::default()
            } else {
                span[index - table[spline]]
            };
        }
    }
}

fn materialize_spans_uninit<T: AttrElement>(
    spans: &[&[T]],
    offsets: &OffsetIndex,
    mask: IndexMask,
    dst: &mut [MaybeUninit<T>],
) {
    if mask.is_full_range(offsets.total()) {
        for (index, span) in spans.iter().enumerate() {
            let out = &mut dst[offsets.range(index)];
            if span.is_empty() {
                for slot in out {
                    slot.write(T::default());
                }
            } else {
                for (slot, value) in out.iter_mut().zip(span.iter()) {
                    slot.write(*value);
                }
            }
        }
    } else {
        let table = offsets.as_slice();
        let mut spline = 0;
        for index in mask.iter() {
            while index >= table[spline + 1] {
                spline += 1;
            }
            let span = spans[spline];
            dst[index].write(if span.is_empty() {
                T::default()
            } else {
                span[index - table[spline]]
            });
        }
    }
}

fn materialize_broadcast<T: AttrElement>(
    values: &[T],
    offsets: &OffsetIndex,
    mask: IndexMask,
    dst: &mut [T],
) {
    if mask.is_full_range(offsets.total()) {
        // One fill per spline sub-range, not one store per point.
        for (spline, value) in values.iter().enumerate() {
            dst[offsets.range(spline)].fill(*value);
        }
    } else {
        let table = offsets.as_slice();
        let mut spline = 0;
        for index in mask.iter() {
            while index >= table[spline + 1] {
                spline += 1;
            }
            dst[index] = values[spline];
        }
    }
}

fn materialize_broadcast_uninit<T: AttrElement>(
    values: &[T],
    offsets: &OffsetIndex,
    mask: IndexMask,
    dst: &mut [MaybeUninit<T>],
) {
    if mask.is_full_range(offsets.total()) {
        for (spline, value) in values.iter().enumerate() {
            for slot in &mut dst[offsets.range(spline)] {
                slot.write(*value);
            }
        }
    } else {
        let table = offsets.as_slice();
        let mut spline = 0;
        for index in mask.iter() {
            while index >= table[spline + 1] {
                spline += 1;
            }
            dst[index].write(values[spline]);
        }
    }
}
