//! Uniform random sources backing every draw in the crate.
//!
//! Generators never touch an RNG directly. They go through [`UniformSource`],
//! so tests can script exact draws with [`FixedSource`] or pin a seeded RNG
//! with [`RngSource`].

use rand::{Rng, RngCore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A source of uniformly distributed numbers.
pub trait UniformSource: Send + Sync {
    /// Integer uniformly distributed over `[low, high]`. Callers guarantee `low <= high`.
    fn int_in_range(&self, low: i64, high: i64) -> i64;

    /// Real uniformly distributed over `[low, high)`. Returns `low` when the range is empty.
    fn real_in_range(&self, low: f64, high: f64) -> f64;
}

/// Production source using the thread-local RNG, seeded from OS entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl ThreadRngSource {
    pub fn new() -> Self {
        Self
    }
}

impl UniformSource for ThreadRngSource {
    fn int_in_range(&self, low: i64, high: i64) -> i64 {
        rand::thread_rng().gen_range(low..=high)
    }

    fn real_in_range(&self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..high)
    }
}

/// Wraps any `RngCore` so it can be shared behind `&self`.
///
/// # Example
/// ```
/// use dicebag::source::{RngSource, UniformSource};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let source = RngSource::new(StdRng::seed_from_u64(7));
/// let value = source.int_in_range(1, 6);
/// assert!((1..=6).contains(&value));
/// ```
#[derive(Debug)]
pub struct RngSource<R> {
    rng: Mutex<R>,
}

impl<R: RngCore + Send> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: RngCore + Send> UniformSource for RngSource<R> {
    fn int_in_range(&self, low: i64, high: i64) -> i64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..=high)
    }

    fn real_in_range(&self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..high)
    }
}

/// Scripted source returning values from a fixed sequence, cycling when exhausted.
///
/// Values are clamped into the requested range.
#[derive(Debug)]
pub struct FixedSource {
    values: Vec<i64>,
    index: AtomicUsize,
}

impl FixedSource {
    pub fn new(values: Vec<i64>) -> Self {
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: i64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    fn next(&self) -> Option<i64> {
        if self.values.is_empty() {
            return None;
        }
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        Some(self.values[idx % self.values.len()])
    }
}

impl UniformSource for FixedSource {
    fn int_in_range(&self, low: i64, high: i64) -> i64 {
        self.next().map_or(low, |v| v.clamp(low, high))
    }

    fn real_in_range(&self, low: f64, high: f64) -> f64 {
        match self.next() {
            Some(v) if low < high => (v as f64).clamp(low, high),
            _ => low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_thread_rng_respects_bounds() {
        let source = ThreadRngSource::new();
        for _ in 0..200 {
            let value = source.int_in_range(-3, 3);
            assert!((-3..=3).contains(&value), "Value {} out of range", value);
        }
    }

    #[test]
    fn test_thread_rng_degenerate_range() {
        let source = ThreadRngSource::new();
        assert_eq!(source.int_in_range(5, 5), 5);
        assert_eq!(source.real_in_range(2.0, 2.0), 2.0);
    }

    #[test]
    fn test_seeded_source_same_sequence() {
        let a = RngSource::new(StdRng::seed_from_u64(42));
        let b = RngSource::new(StdRng::seed_from_u64(42));

        let values_a: Vec<i64> = (0..10).map(|_| a.int_in_range(0, 1000)).collect();
        let values_b: Vec<i64> = (0..10).map(|_| b.int_in_range(0, 1000)).collect();

        assert_eq!(values_a, values_b);
    }

    #[test]
    fn test_real_in_range_half_open() {
        let source = RngSource::new(StdRng::seed_from_u64(1));
        for _ in 0..200 {
            let value = source.real_in_range(0.0, 1.5);
            assert!((0.0..1.5).contains(&value));
        }
    }

    #[test]
    fn test_fixed_source_cycles_and_clamps() {
        let source = FixedSource::new(vec![1, 50, 200]);
        assert_eq!(source.int_in_range(1, 100), 1);
        assert_eq!(source.int_in_range(1, 100), 50);
        assert_eq!(source.int_in_range(1, 100), 100);
        assert_eq!(source.int_in_range(1, 100), 1);
        assert_eq!(source.draws(), 4);
    }

    #[test]
    fn test_fixed_source_empty_returns_low() {
        let source = FixedSource::new(vec![]);
        assert_eq!(source.int_in_range(3, 9), 3);
    }
}
