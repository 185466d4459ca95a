//! Purpose: Reusable scanner over a stream of whitespace-separated JSON values.
//! Exports: `Scanner`.
//! Role: Scan engine wrapped by `Counted` and recycled through `ScannerPool`.
//! Invariants: `init`/`init_bytes` reset position, value, and error; scratch capacity is kept.
//! Invariants: Once an error is recorded `next` returns false until the next init.

use serde_json::Value;

use crate::core::error::Error;

#[derive(Debug, Default)]
pub struct Scanner {
    scratch: Vec<u8>,
    pos: usize,
    value: Option<Value>,
    error: Option<Error>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, input: &str) {
        self.init_bytes(input.as_bytes());
    }

    pub fn init_bytes(&mut self, input: &[u8]) {
        self.scratch.clear();
        self.scratch.extend_from_slice(input);
        self.pos = 0;
        self.value = None;
        self.error = None;
    }

    /// Advances to the next value. Returns false at end of input or on error.
    pub fn next(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.pos += skip_whitespace(&self.scratch[self.pos..]);
        if self.pos >= self.scratch.len() {
            self.value = None;
            return false;
        }

        let mut stream =
            serde_json::Deserializer::from_slice(&self.scratch[self.pos..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => {
                self.pos += stream.byte_offset();
                self.value = Some(value);
                true
            }
            Some(Err(err)) => {
                self.error = Some(Error::from_json(err).with_offset(self.pos as u64));
                self.value = None;
                false
            }
            None => {
                self.value = None;
                false
            }
        }
    }

    /// The value produced by the last successful `next`.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn capacity(&self) -> usize {
        self.scratch.capacity()
    }
}

fn skip_whitespace(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\r'))
        .count()
}
