//! Prefix-sum index mapping flat point indices to (spline, local) pairs.

/// Accumulated point counts over an ordered spline sequence.
///
/// `offsets[i]` is the number of points in splines `[0, i)`; the last entry
/// is the total. The table is recomputed on demand rather than cached, so it
/// is always consistent with the splines it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetIndex {
    offsets: Vec<usize>,
}

impl OffsetIndex {
    pub fn from_sizes<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let sizes = sizes.into_iter();
        let mut offsets = Vec::with_capacity(sizes.size_hint().0 + 1);
        let mut total = 0;
        offsets.push(0);
        for size in sizes {
            total += size;
            offsets.push(total);
        }
        Self { offsets }
    }

    /// Total number of points.
    pub fn total(&self) -> usize {
        *self.offsets.last().unwrap()
    }

    /// Number of splines the table was built from.
    pub fn spline_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// The flat index range covered by one spline.
    pub fn range(&self, spline: usize) -> std::ops::Range<usize> {
        self.offsets[spline]..self.offsets[spline + 1]
    }

    pub fn size_of(&self, spline: usize) -> usize {
        self.offsets[spline + 1] - self.offsets[spline]
    }

    /// Locate the spline containing flat `index` and the index within it.
    ///
    /// Binary search for the last offset not greater than `index`. Must not
    /// be called on an empty table or with `index >= total()`.
    pub fn lookup(&self, index: usize) -> (usize, usize) {
        debug_assert!(
            index < self.total(),
            "Flat index {} out of range (total {})",
            index,
            self.total()
        );
        let spline = self.offsets.partition_point(|&offset| offset <= index) - 1;
        (spline, index - self.offsets[spline])
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }
}
