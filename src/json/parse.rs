//! Purpose: Reusable JSON document parser that keeps its scratch buffer between calls.
//! Exports: `Parser`.
//! Role: Parse engine wrapped by `Counted` and recycled through `ParserPool`.
//! Invariants: Each call replaces the previous value; returned borrows end at the next call.
//! Invariants: Scratch capacity only grows; dropping the parser is the only way to release it.
//! Notes: Error mapping happens here so pooled callers see categorised failures.

use serde_json::Value;

use crate::core::error::Error;

#[derive(Debug, Default)]
pub struct Parser {
    scratch: Vec<u8>,
    value: Value,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&mut self, input: &str) -> Result<&Value, Error> {
        self.parse_bytes(input.as_bytes())
    }

    /// Parses one complete document; only whitespace may follow it.
    pub fn parse_bytes(&mut self, input: &[u8]) -> Result<&Value, Error> {
        self.scratch.clear();
        self.scratch.extend_from_slice(input);
        self.value = Value::Null;
        self.value = serde_json::from_slice(&self.scratch).map_err(Error::from_json)?;
        Ok(&self.value)
    }

    /// Bytes of scratch space retained for the next call.
    pub fn capacity(&self) -> usize {
        self.scratch.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn parses_text_and_bytes() {
        let mut parser = Parser::new();
        let value = parser.parse(r#"{"a":1,"b":[true,null]}"#).expect("parse");
        assert_eq!(value, &json!({"a": 1, "b": [true, null]}));

        let value = parser.parse_bytes(b" [1, 2, 3] \n").expect("parse bytes");
        assert_eq!(value, &json!([1, 2, 3]));
    }

    #[test]
    fn rejects_trailing_data() {
        let mut parser = Parser::new();
        let err = parser.parse("{} {}").expect_err("trailing document");
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn failure_leaves_parser_usable() {
        let mut parser = Parser::new();
        let err = parser.parse(r#"{"a":"#).expect_err("truncated");
        assert_eq!(err.kind(), ErrorKind::Eof);

        let value = parser.parse(r#""ok""#).expect("recover");
        assert_eq!(value, &json!("ok"));
    }

    #[test]
    fn scratch_capacity_tracks_largest_input() {
        let mut parser = Parser::new();
        let large = format!(r#"{{"pad":"{}"}}"#, "x".repeat(4096));
        parser.parse(&large).expect("large");
        let retained = parser.capacity();
        assert!(retained >= large.len());

        parser.parse("1").expect("small");
        assert_eq!(parser.capacity(), retained);
    }
}
