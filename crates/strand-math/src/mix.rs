//! Reduction of many attribute values into one, per value type.
//!
//! Numeric and vector types reduce to the arithmetic mean via a running
//! accumulator; booleans reduce to the logical AND, so a bucket that never
//! receives a value finalizes to `true` (vacuously all-true) while numeric
//! buckets finalize to zero.

use glam::{DVec2, DVec3, DVec4};

/// A value type that can be mixed into a single representative value.
pub trait Mix: Copy + Default {
    type Accum: Clone;

    fn accum_init() -> Self::Accum;
    fn mix_in(accum: &mut Self::Accum, value: Self);
    fn finalize(accum: Self::Accum, count: usize) -> Self;
}

impl Mix for bool {
    type Accum = bool;

    fn accum_init() -> bool {
        true
    }

    fn mix_in(accum: &mut bool, value: bool) {
        *accum &= value;
    }

    fn finalize(accum: bool, _count: usize) -> bool {
        accum
    }
}

impl Mix for i32 {
    type Accum = f64;

    fn accum_init() -> f64 {
        0.0
    }

    fn mix_in(accum: &mut f64, value: i32) {
        *accum += value as f64;
    }

    fn finalize(accum: f64, count: usize) -> i32 {
        if count == 0 {
            0
        } else {
            (accum / count as f64).round() as i32
        }
    }
}

macro_rules! impl_mix_mean {
    ($($elem:ty),* $(,)?) => {
        $(impl Mix for $elem {
            type Accum = $elem;

            fn accum_init() -> $elem {
                <$elem>::default()
            }

            fn mix_in(accum: &mut $elem, value: $elem) {
                *accum += value;
            }

            fn finalize(accum: $elem, count: usize) -> $elem {
                if count == 0 {
                    <$elem>::default()
                } else {
                    accum / count as f64
                }
            }
        })*
    };
}

impl_mix_mean!(f64, DVec2, DVec3, DVec4);

/// Accumulates values into a fixed number of buckets, one output per bucket.
pub struct Mixer<T: Mix> {
    accums: Vec<T::Accum>,
    counts: Vec<usize>,
}

impl<T: Mix> Mixer<T> {
    pub fn new(buckets: usize) -> Self {
        Self {
            accums: vec![T::accum_init(); buckets],
            counts: vec![0; buckets],
        }
    }

    pub fn mix_in(&mut self, bucket: usize, value: T) {
        T::mix_in(&mut self.accums[bucket], value);
        self.counts[bucket] += 1;
    }

    pub fn finalize(self) -> Vec<T> {
        self.accums
            .into_iter()
            .zip(self.counts)
            .map(|(accum, count)| T::finalize(accum, count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_of_floats() {
        let mut mixer = Mixer::<f64>::new(2);
        mixer.mix_in(0, 1.0);
        mixer.mix_in(0, 2.0);
        mixer.mix_in(0, 3.0);
        mixer.mix_in(1, 4.0);
        mixer.mix_in(1, 5.0);

        let out = mixer.finalize();
        assert_relative_eq!(out[0], 2.0);
        assert_relative_eq!(out[1], 4.5);
    }

    #[test]
    fn test_empty_bucket_defaults() {
        let mixer = Mixer::<f64>::new(1);
        assert_eq!(mixer.finalize(), vec![0.0]);

        // Booleans are all-true reductions, so an empty bucket is true.
        let mixer = Mixer::<bool>::new(1);
        assert_eq!(mixer.finalize(), vec![true]);
    }

    #[test]
    fn test_bool_and_reduction() {
        let mut mixer = Mixer::<bool>::new(2);
        mixer.mix_in(0, true);
        mixer.mix_in(0, false);
        mixer.mix_in(0, true);
        mixer.mix_in(1, true);
        mixer.mix_in(1, true);

        assert_eq!(mixer.finalize(), vec![false, true]);
    }

    #[test]
    fn test_int_mean_rounds() {
        let mut mixer = Mixer::<i32>::new(1);
        mixer.mix_in(0, 1);
        mixer.mix_in(0, 2);
        assert_eq!(mixer.finalize(), vec![2]); // 1.5 rounds away from zero
    }

    #[test]
    fn test_vector_mean() {
        let mut mixer = Mixer::<DVec3>::new(1);
        mixer.mix_in(0, DVec3::new(1.0, 0.0, 0.0));
        mixer.mix_in(0, DVec3::new(0.0, 1.0, 0.0));
        let out = mixer.finalize();
        assert_relative_eq!(out[0].x, 0.5);
        assert_relative_eq!(out[0].y, 0.5);
    }
}
