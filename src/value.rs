use lazy_static::lazy_static;
use regex::Regex;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

lazy_static! {
    static ref INT_PREFIX_REGEX: Regex = Regex::new(r"^\s*([+-]?[0-9]+)").unwrap();
}

/// Decimal integer that may hold the not-a-number sentinel.
///
/// Unparseable numeric input never fails the decode; it turns into
/// [`Int::NAN`] instead, which renders as `NaN` on the wire and `null` in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Int(Option<i64>);

impl Int {
    pub const NAN: Int = Int(None);

    pub fn new(value: i64) -> Self {
        Int(Some(value))
    }

    pub fn value(self) -> Option<i64> {
        self.0
    }

    pub fn is_nan(self) -> bool {
        self.0.is_none()
    }

    /// Parses the leading decimal integer of `text`.
    ///
    /// Leading whitespace and an optional sign are accepted, anything after
    /// the digits is ignored. No digits yields [`Int::NAN`]; digits that do
    /// not fit in 64 bits are an [`IntOutOfRange`] error.
    pub fn try_parse_prefix(text: &str) -> Result<Self, IntOutOfRange> {
        match INT_PREFIX_REGEX
            .captures(text)
            .and_then(|captures| captures.get(1))
        {
            Some(digits) => digits
                .as_str()
                .parse::<i64>()
                .map(Int::new)
                .map_err(|_| IntOutOfRange),
            None => Ok(Int::NAN),
        }
    }

    /// Like [`Int::try_parse_prefix`], folding out-of-range values into
    /// [`Int::NAN`].
    pub fn parse_prefix(text: &str) -> Self {
        Self::try_parse_prefix(text).unwrap_or(Int::NAN)
    }
}

/// Decimal digits that do not fit in a 64-bit integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntOutOfRange;

impl From<i64> for Int {
    fn from(value: i64) -> Self {
        Int::new(value)
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => f.write_str("NaN"),
        }
    }
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<i64>::deserialize(deserializer).map(Int)
    }
}

/// One decoded test-case value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(Int),
    Text(String),
    Numbers(Vec<Int>),
    Texts(Vec<String>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::Numbers(_) => "number array",
            Value::Texts(_) => "string array",
        }
    }
}

/// Decoded test-case input, keyed by variable name in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructuredInput {
    entries: Vec<(String, Value)>,
}

impl StructuredInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `name`, replacing an existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Renders the input as a JSON object for result displays.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for StructuredInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct StructuredInputVisitor;

impl<'de> Visitor<'de> for StructuredInputVisitor {
    type Value = StructuredInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of variable names to test-case values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut input = StructuredInput::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            if input.get(&key).is_some() {
                return Err(de::Error::custom(format!("duplicate variable `{}`", key)));
            }
            input.insert(key, value);
        }
        Ok(input)
    }
}

impl<'de> Deserialize<'de> for StructuredInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StructuredInputVisitor)
    }
}
