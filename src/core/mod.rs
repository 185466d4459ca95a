// Core modules: counting wrapper, bounded-reuse pool, and engine error model.
pub mod counted;
pub mod error;
pub mod pool;
