//! Record handles over decoded rows

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A read-only view over one row returned by the rows API
///
/// Every row carries a numeric `id`; the other fields are whatever the
/// table defines, keyed by field name or `field_<n>` depending on the
/// connection's field-names mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: i64,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Record {
    /// Build a record from a decoded JSON object
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The row id
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Raw value of a field, if present
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields except `id`
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Field value rendered as a string
    ///
    /// Fails with [`Error::FieldAccess`] when the row has no such key.
    pub fn string_value(&self, key: &str) -> Result<String> {
        self.fields
            .get(key)
            .map(coerce_to_string)
            .ok_or_else(|| Error::field_access(key))
    }

    /// Field value parsed as a float
    ///
    /// Lenient: absent keys and values without a numeric prefix give
    /// `f64::NAN` instead of an error. Select options and link rows
    /// (objects, or lists holding objects) are never numeric.
    pub fn number_value(&self, key: &str) -> f64 {
        match self.fields.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::Bool(_) | Value::Null | Value::Object(_)) | None => f64::NAN,
            Some(Value::Array(items)) if items.iter().any(Value::is_object) => f64::NAN,
            Some(other) => parse_float_prefix(&coerce_to_string(other)),
        }
    }

    /// Field value as a boolean; absent, null, `false`, `0` and `""` are false
    pub fn bool_value(&self, key: &str) -> bool {
        match self.fields.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    /// Deserialize the whole row, `id` included, into a typed struct
    ///
    /// A row that does not fit `T` is an [`Error::Mapping`], not a
    /// transport failure.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.to_value()).map_err(Error::Mapping)
    }

    /// The row as a JSON object, `id` included
    pub fn to_value(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert("id".to_string(), Value::from(self.id));
        Value::Object(map)
    }

    pub fn into_value(self) -> Value {
        let mut map = self.fields;
        map.insert("id".to_string(), Value::from(self.id));
        Value::Object(map)
    }
}

/// One page of a list call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    /// Total rows matching the query, across all pages
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(rename = "results")]
    pub records: Vec<Record>,
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // link row and select options come back as {"id": .., "value": ..}
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("value") {
                Some(inner) => coerce_to_string(inner),
                None => coerce_to_string(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(map) => match map.get("value") {
            Some(inner) => coerce_to_string(inner),
            None => value.to_string(),
        },
    }
}

/// Parse the longest leading float literal, NaN if there is none
fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_id_is_verbatim() {
        let r = record(json!({"id": 42, "Name": "X"}));
        assert_eq!(r.id(), 42);
        assert_eq!(r.fields().len(), 1);
    }

    #[test]
    fn test_missing_id_fails_to_decode() {
        let err = Record::from_value(json!({"Name": "X"})).unwrap_err();
        assert!(err.is_transport());
        assert!(Record::from_value(json!({"id": "seven"})).is_err());
    }

    #[test]
    fn test_string_value() {
        let r = record(json!({
            "id": 1,
            "Name": "John Doe",
            "Age": 25,
            "Active": true,
            "Notes": null,
            "Tags": [{"id": 3, "value": "red"}, {"id": 4, "value": "blue"}],
            "Refs": [1, 2],
        }));

        assert_eq!(r.string_value("Name").unwrap(), "John Doe");
        assert_eq!(r.string_value("Age").unwrap(), "25");
        assert_eq!(r.string_value("Active").unwrap(), "true");
        assert_eq!(r.string_value("Notes").unwrap(), "");
        assert_eq!(r.string_value("Tags").unwrap(), "red,blue");
        assert_eq!(r.string_value("Refs").unwrap(), "1,2");
    }

    #[test]
    fn test_string_value_missing_key() {
        let r = record(json!({"id": 1}));
        match r.string_value("Name") {
            Err(Error::FieldAccess { key }) => assert_eq!(key, "Name"),
            other => panic!("expected FieldAccess, got {:?}", other),
        }
    }

    #[test]
    fn test_number_value() {
        let r = record(json!({
            "id": 1,
            "Age": 25,
            "AgeText": "25",
            "Price": "19.99 EUR",
            "Exp": "1e3",
            "Neg": " -4.5",
        }));

        assert_eq!(r.number_value("Age"), 25.0);
        assert_eq!(r.number_value("AgeText"), 25.0);
        assert_eq!(r.number_value("Price"), 19.99);
        assert_eq!(r.number_value("Exp"), 1000.0);
        assert_eq!(r.number_value("Neg"), -4.5);
    }

    // Unparsable and absent values give NaN rather than an error. Callers
    // depend on this leniency, so it is kept even though it hides typos.
    #[test]
    fn test_number_value_lenient_nan() {
        let r = record(json!({"id": 1, "Name": "abc", "Flag": true, "Empty": ""}));

        assert!(r.number_value("Name").is_nan());
        assert!(r.number_value("Flag").is_nan());
        assert!(r.number_value("Empty").is_nan());
        assert!(r.number_value("Missing").is_nan());
    }

    #[test]
    fn test_number_value_of_options_is_nan() {
        let r = record(json!({
            "id": 1,
            "Status": {"id": 3, "value": "5", "color": "red"},
            "Links": [{"id": 8, "value": "12"}],
            "Scores": [25, 30],
        }));

        assert!(r.number_value("Status").is_nan());
        assert!(r.number_value("Links").is_nan());
        assert_eq!(r.number_value("Scores"), 25.0);
        assert_eq!(r.string_value("Status").unwrap(), "5");
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("3.14abc"), 3.14);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("7."), 7.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert_eq!(parse_float_prefix("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float_prefix(".").is_nan());
        assert!(parse_float_prefix("-").is_nan());
    }

    #[test]
    fn test_bool_value() {
        let r = record(json!({"id": 1, "Done": true, "Zero": 0, "Text": "x"}));
        assert!(r.bool_value("Done"));
        assert!(!r.bool_value("Zero"));
        assert!(r.bool_value("Text"));
        assert!(!r.bool_value("Missing"));
    }

    #[test]
    fn test_deserialize_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Person {
            id: i64,
            #[serde(rename = "Name")]
            name: String,
            #[serde(rename = "Age")]
            age: u32,
        }

        let r = record(json!({"id": 7, "Name": "Jane Doe", "Age": 24}));
        let person: Person = r.deserialize().unwrap();
        assert_eq!(
            person,
            Person {
                id: 7,
                name: "Jane Doe".to_string(),
                age: 24
            }
        );
        assert_eq!(r.into_value(), json!({"id": 7, "Name": "Jane Doe", "Age": 24}));
    }

    #[test]
    fn test_deserialize_shape_mismatch_is_not_transport() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Person {
            #[serde(rename = "Age")]
            age: u32,
        }

        let r = record(json!({"id": 7, "Age": "old"}));
        let err = r.deserialize::<Person>().unwrap_err();
        assert!(matches!(err, Error::Mapping(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_page_decoding() {
        let page: Page = serde_json::from_value(json!({
            "count": 3,
            "next": "https://api.baserow.io/api/database/rows/table/1/?page=2",
            "previous": null,
            "results": [{"id": 1}, {"id": 2}],
        }))
        .unwrap();

        assert_eq!(page.count, 3);
        assert!(page.has_next());
        assert_eq!(page.records.iter().map(Record::id).collect::<Vec<_>>(), vec![1, 2]);
    }
}
