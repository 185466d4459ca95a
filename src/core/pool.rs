//! Purpose: Bounded-reuse free-list of counted engines.
//! Exports: `Pool`, `Pooled`, `PoolOptions`, `PoolStats`, `ParserPool`, `ScannerPool`, `DEFAULT_MAX_REUSE`.
//! Role: Amortizes engine allocation while capping how long one instance keeps its buffers.
//! Invariants: Every wrapper in the free-list had `uses <= max_reuse` when it was inserted.
//! Invariants: The free-list lock covers only push/pop; factories and drops run outside it.
//! Notes: Checking in a wrapper from another pool is a contract violation and is not detected.
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::core::counted::Counted;
use crate::core::error::Error;
use crate::json::{Parser, Scanner};

/// Threshold used when options leave `max_reuse` unset.
pub const DEFAULT_MAX_REUSE: i64 = 1000;

pub type ParserPool = Pool<Parser>;
pub type ScannerPool = Pool<Scanner>;

type Factory<E> = Box<dyn Fn() -> E + Send + Sync>;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct PoolOptions {
    /// Uses after which a wrapper is dropped instead of recycled. Negative disables reuse.
    pub max_reuse: i64,
}

impl PoolOptions {
    pub fn new(max_reuse: i64) -> Self {
        Self { max_reuse }
    }
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REUSE)
    }
}

pub struct Pool<E> {
    free: Mutex<Vec<Counted<E>>>,
    max_reuse: i64,
    factory: Factory<E>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    returns: AtomicUsize,
    discards: AtomicUsize,
}

impl<E: Default + 'static> Pool<E> {
    /// Creates an empty pool. `max_reuse` is not validated.
    pub fn new(max_reuse: i64) -> Self {
        Self::with_factory(max_reuse, E::default)
    }

    pub fn from_options(options: PoolOptions) -> Self {
        Self::new(options.max_reuse)
    }
}

impl<E> Pool<E> {
    pub fn with_factory(max_reuse: i64, factory: impl Fn() -> E + Send + Sync + 'static) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_reuse,
            factory: Box::new(factory),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            returns: AtomicUsize::new(0),
            discards: AtomicUsize::new(0),
        }
    }

    pub fn max_reuse(&self) -> i64 {
        self.max_reuse
    }

    /// Takes a wrapper from the free-list, or builds a fresh one with `uses == 0`.
    ///
    /// The caller owns the wrapper exclusively until it is passed to `checkin`.
    pub fn checkout(&self) -> Counted<E> {
        let reused = self.free.lock().pop();
        match reused {
            Some(counted) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                counted
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(max_reuse = self.max_reuse, "allocating pooled engine");
                Counted::new((self.factory)())
            }
        }
    }

    /// Recycles `counted` unless it has been used more than `max_reuse` times.
    pub fn checkin(&self, counted: Counted<E>) {
        let uses = counted.uses();
        if !self.retains(uses) {
            self.discards.fetch_add(1, Ordering::Relaxed);
            debug!(uses, max_reuse = self.max_reuse, "discarding pooled engine");
            return;
        }
        self.free.lock().push(counted);
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    /// Checks out a wrapper that is checked back in when the guard drops.
    pub fn get(&self) -> Pooled<'_, E> {
        Pooled {
            pool: self,
            counted: Some(self.checkout()),
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            size: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            discards: self.discards.load(Ordering::Relaxed),
        }
    }

    /// Wrappers currently waiting in the free-list.
    pub fn len(&self) -> usize {
        self.free.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.lock().is_empty()
    }

    fn retains(&self, uses: u64) -> bool {
        // Strictly greater discards: a wrapper is recycled after exactly `max_reuse` uses.
        i64::try_from(uses).is_ok_and(|uses| uses <= self.max_reuse)
    }
}

impl Pool<Parser> {
    /// Parses `input` with a pooled parser and hands the value to `f`.
    pub fn parse_with<R>(&self, input: &[u8], f: impl FnOnce(&Value) -> R) -> Result<R, Error> {
        let mut parser = self.get();
        let value = parser.parse_bytes(input)?;
        Ok(f(value))
    }
}

impl<E> fmt::Debug for Pool<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("max_reuse", &self.max_reuse)
            .field("stats", &self.stats())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PoolStats {
    pub size: usize,
    /// Checkouts served from the free-list.
    pub hits: usize,
    /// Checkouts that allocated a fresh engine.
    pub misses: usize,
    pub returns: usize,
    /// Checkins dropped for exceeding `max_reuse`.
    pub discards: usize,
}

impl PoolStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Checkout guard; derefs to the wrapper and checks it in on drop.
pub struct Pooled<'a, E> {
    pool: &'a Pool<E>,
    counted: Option<Counted<E>>,
}

impl<E> Pooled<'_, E> {
    /// Takes the wrapper out of the guard without checking it in.
    pub fn detach(mut self) -> Counted<E> {
        self.counted.take().expect("pooled wrapper already taken")
    }
}

impl<E> Deref for Pooled<'_, E> {
    type Target = Counted<E>;

    fn deref(&self) -> &Self::Target {
        self.counted.as_ref().expect("pooled wrapper already taken")
    }
}

impl<E> DerefMut for Pooled<'_, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.counted.as_mut().expect("pooled wrapper already taken")
    }
}

impl<E> Drop for Pooled<'_, E> {
    fn drop(&mut self) {
        if let Some(counted) = self.counted.take() {
            self.pool.checkin(counted);
        }
    }
}
