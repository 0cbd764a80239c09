//! Factorial kernels. All variants yield `n!` as an `f64`, which stays exact up to `22!` and
//! finite up to `170!`. Beyond that the result saturates to infinity.

use std::sync::RwLock;

/// The largest `n` for which `n!` is finite in double precision.
pub const MAX_FINITE: u8 = 170;

pub trait Factorial {
    fn get(&self, n: u8) -> f64;

    /// Natural logarithm of `n!`, i.e., `lnΓ(n + 1)`.
    #[inline]
    fn ln(&self, n: u8) -> f64 {
        if n <= MAX_FINITE {
            self.get(n).ln()
        } else {
            (2..=n).map(|i| f64::ln(i as f64)).sum()
        }
    }
}

#[derive(Default)]
pub struct Calculator;

impl Factorial for Calculator {
    #[inline]
    fn get(&self, n: u8) -> f64 {
        let mut product = 1.0;
        for i in 2..=n {
            product *= i as f64;
        }
        product
    }
}

const MAX_ENTRIES: usize = MAX_FINITE as usize + 1;

/// A fully precomputed table. Immutable once built, so it may be shared freely.
pub struct Lookup {
    entries: Box<[f64; MAX_ENTRIES]>,
}
impl Factorial for Lookup {
    #[inline]
    fn get(&self, n: u8) -> f64 {
        self.entries.get(n as usize).copied().unwrap_or(f64::INFINITY)
    }
}

impl Default for Lookup {
    fn default() -> Self {
        let mut entries = Box::new([1.0; MAX_ENTRIES]);
        for i in 2..MAX_ENTRIES {
            entries[i] = i as f64 * entries[i - 1];
        }
        Self { entries }
    }
}

/// An incrementally grown cache. Entries are only ever appended: a request for `n` extends the
/// cache from the highest previously computed entry, and lower entries are never recomputed.
///
/// The cache sits behind a lock, so a single `Memo` may be shared across threads.
pub struct Memo {
    entries: RwLock<Vec<f64>>,
}
impl Memo {
    /// Number of entries currently held, i.e., one more than the highest `n` computed so far.
    pub fn len(&self) -> usize {
        self.read_entries(|entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry above `1!`.
    pub fn reset(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.truncate(2);
    }

    /// Factorial of an arbitrary real. Negative, fractional or non-finite arguments yield `0`.
    pub fn checked(&self, n: f64) -> f64 {
        if !n.is_finite() || n < 0.0 || n.fract() != 0.0 {
            0.0
        } else if n > MAX_FINITE as f64 {
            f64::INFINITY
        } else {
            self.get(n as u8)
        }
    }

    fn read_entries<R>(&self, f: impl FnOnce(&[f64]) -> R) -> R {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&entries)
    }
}

impl Default for Memo {
    fn default() -> Self {
        Self {
            entries: RwLock::new(vec![1.0, 1.0]),
        }
    }
}

impl Factorial for Memo {
    fn get(&self, n: u8) -> f64 {
        if n > MAX_FINITE {
            return f64::INFINITY;
        }
        let index = n as usize;
        if let Some(cached) = self.read_entries(|entries| entries.get(index).copied()) {
            return cached;
        }

        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        // another writer may have extended the cache while the lock was released
        while entries.len() <= index {
            let next = entries.len();
            let product = next as f64 * entries[next - 1];
            entries.push(product);
        }
        entries[index]
    }
}
