//! Purpose: Bounded-reuse pools for stateful JSON parsers and scanners.
//! Exports: `core` (counting wrapper, pool, errors), `json` (parse/scan engines), and re-exports.
//! Role: Library for callers that parse many dissimilar documents and want to reuse engines.
//! Invariants: A pooled engine used more than `max_reuse` times is dropped at checkin.
//! Invariants: Pools never fail; only engines report errors, and wrappers forward them as-is.
pub mod core;
pub mod json;

pub use crate::core::counted::{Counted, CountedParser, CountedScanner};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::pool::{
    DEFAULT_MAX_REUSE, ParserPool, Pool, PoolOptions, PoolStats, Pooled, ScannerPool,
};
pub use crate::json::{Parser, Scanner};
