use super::PartialDerivative;
use std::collections::HashMap;

/// Number of cache lookups that were answered from the cache and that required
/// an evaluation of the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// lookups answered from the cache
    pub hit: u64,
    /// lookups that evaluated the model
    pub miss: u64,
    /// partial derivatives stored in the cache
    pub entries: usize,
}

/// Partial derivatives of the reduced excess Gibbs energy that were already evaluated.
///
/// A single evaluation with a dual number yields the requested derivative
/// together with all lower derivatives along the same directions. All of
/// them are stored.
#[derive(Clone, Debug)]
pub(crate) struct Cache {
    map: HashMap<PartialDerivative, f64>,
    hit: u64,
    miss: u64,
}

impl Cache {
    pub fn with_capacity(components: usize) -> Cache {
        // g, dg/dT, d2g/dT2, dg/dn_i, d2g/dTdn_i and the upper triangle of d2g/dn_idn_j
        let capacity = 3 + 2 * components + components * (components + 1) / 2;
        Cache {
            map: HashMap::with_capacity(capacity),
            hit: 0,
            miss: 0,
        }
    }

    /// Return the cached value of `derivative` or store all results of `evaluate`.
    ///
    /// `evaluate` has to return `derivative` among its results.
    pub fn get_or_insert_with<F, I>(&mut self, derivative: PartialDerivative, evaluate: F) -> f64
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = (PartialDerivative, f64)>,
    {
        if let Some(&value) = self.map.get(&derivative) {
            self.hit += 1;
            return value;
        }
        self.miss += 1;
        tracing::trace!(?derivative, miss = self.miss, "derivative cache miss");
        self.map.extend(evaluate());
        self.map.get(&derivative).copied().unwrap_or(f64::NAN)
    }

    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            hit: self.hit,
            miss: self.miss,
            entries: self.map.len(),
        }
    }
}
