use serde_json::{Map, Number, Value};

/// Tagged view over one decoded JSON value.
///
/// Borrows from the decoded object; lives only while a single record is
/// being converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodedValue<'a> {
    Number(&'a Number),
    String(&'a str),
    Boolean(bool),
    Null,
    Array(&'a [Value]),
    Object(&'a Map<String, Value>),
}

impl<'a> From<&'a Value> for DecodedValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Number(n) => DecodedValue::Number(n),
            Value::String(s) => DecodedValue::String(s),
            Value::Bool(b) => DecodedValue::Boolean(*b),
            Value::Null => DecodedValue::Null,
            Value::Array(items) => DecodedValue::Array(items),
            Value::Object(map) => DecodedValue::Object(map),
        }
    }
}

/// Decoded top-level JSON object of one record.
pub struct DecodedRecord {
    fields: Map<String, Value>,
}

impl DecodedRecord {
    /// Decode `bytes` as exactly one JSON object.
    ///
    /// Returns `None` for invalid JSON, trailing data, or a non-object top level.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Map<String, Value>>(bytes)
            .ok()
            .map(|fields| Self { fields })
    }

    pub fn get(&self, name: &str) -> Option<DecodedValue<'_>> {
        self.fields.get(name).map(DecodedValue::from)
    }

    /// String value of `name`, if present and a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            DecodedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_dispatches_on_variant() {
        let rec = DecodedRecord::decode(
            br#"{"n":1,"s":"x","b":true,"z":null,"a":[1,2],"o":{"k":"v"}}"#,
        )
        .unwrap();
        assert!(matches!(rec.get("n"), Some(DecodedValue::Number(_))));
        assert_eq!(rec.get("s"), Some(DecodedValue::String("x")));
        assert_eq!(rec.get("b"), Some(DecodedValue::Boolean(true)));
        assert_eq!(rec.get("z"), Some(DecodedValue::Null));
        assert!(matches!(rec.get("a"), Some(DecodedValue::Array(items)) if items.len() == 2));
        assert!(matches!(rec.get("o"), Some(DecodedValue::Object(_))));
        assert_eq!(rec.get("missing"), None);
    }

    #[test]
    fn get_str_requires_string() {
        let rec = DecodedRecord::decode(br#"{"_path":7,"ts":"x"}"#).unwrap();
        assert_eq!(rec.get_str("_path"), None);
        assert_eq!(rec.get_str("ts"), Some("x"));
    }

    #[test]
    fn decode_rejects_non_objects_and_trailing_data() {
        assert!(DecodedRecord::decode(b"[1,2,3]").is_none());
        assert!(DecodedRecord::decode(b"\"conn\"").is_none());
        assert!(DecodedRecord::decode(br#"{"a":1} trailing"#).is_none());
        assert!(DecodedRecord::decode(br#"{"a":1"#).is_none());
        assert!(DecodedRecord::decode(b"{\"a\":\"\xff\"}").is_none());
    }

    #[test]
    fn empty_object_decodes_as_empty() {
        let rec = DecodedRecord::decode(b"{ }\n").unwrap();
        assert!(rec.is_empty());
    }
}
