//! Purpose: Attach a use counter to a reusable engine instance.
//! Exports: `Counted`, `CountedParser`, `CountedScanner`.
//! Role: The unit a `Pool` hands out and takes back; `uses` drives the recycle decision.
//! Invariants: `uses` grows by exactly one per input-consuming call, before delegating.
//! Invariants: `uses` never decreases and no `&mut` access to the engine bypasses it.
//! Notes: Results and errors come from the engine unchanged.

use serde_json::Value;

use crate::core::error::Error;
use crate::json::{Parser, Scanner};

pub type CountedParser = Counted<Parser>;
pub type CountedScanner = Counted<Scanner>;

#[derive(Debug)]
pub struct Counted<E> {
    engine: E,
    uses: u64,
}

impl<E> Counted<E> {
    pub(crate) fn new(engine: E) -> Self {
        Self { engine, uses: 0 }
    }

    pub fn uses(&self) -> u64 {
        self.uses
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Counts one use, then runs `f` against the engine.
    ///
    /// This is the pass-through for engines without a dedicated forwarder.
    pub fn consume<R>(&mut self, f: impl FnOnce(&mut E) -> R) -> R {
        self.uses += 1;
        f(&mut self.engine)
    }
}

impl Counted<Parser> {
    pub fn parse(&mut self, input: &str) -> Result<&Value, Error> {
        self.uses += 1;
        self.engine.parse(input)
    }

    pub fn parse_bytes(&mut self, input: &[u8]) -> Result<&Value, Error> {
        self.uses += 1;
        self.engine.parse_bytes(input)
    }
}

impl Counted<Scanner> {
    pub fn init(&mut self, input: &str) {
        self.uses += 1;
        self.engine.init(input);
    }

    pub fn init_bytes(&mut self, input: &[u8]) {
        self.uses += 1;
        self.engine.init_bytes(input);
    }

    // Iteration does not consume new input, so it is not counted.
    pub fn next(&mut self) -> bool {
        self.engine.next()
    }

    pub fn value(&self) -> Option<&Value> {
        self.engine.value()
    }

    pub fn error(&self) -> Option<&Error> {
        self.engine.error()
    }
}
