use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::schema::{ElementType, Structure, VariableDescriptor, VariableSchema};
use crate::testcase::RawTestCase;
use crate::value::{Int, StructuredInput, Value};

/// Knobs for [`decode_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Reject structure tokens other than `array`, `number` and `string`
    /// instead of decoding them as scalar strings.
    pub strict_structures: bool,
}

/// Decodes a raw test case against its variable schema with default options.
///
/// Empty input on either side yields an empty mapping.
///
/// # Examples
/// ```
/// use apticode::{decode, Int, Value};
///
/// let input = decode("2\nA\n5\nB\n1 2 3\n", "a number number\nb array number\n").unwrap();
/// assert_eq!(input.get("a"), Some(&Value::Number(Int::new(5))));
/// assert_eq!(input.len(), 2);
/// ```
pub fn decode(test_case: &str, variable_schema: &str) -> Result<StructuredInput, DecodeError> {
    decode_with(test_case, variable_schema, &DecodeOptions::default())
}

pub fn decode_with(
    test_case: &str,
    variable_schema: &str,
    options: &DecodeOptions,
) -> Result<StructuredInput, DecodeError> {
    if test_case.is_empty() || variable_schema.is_empty() {
        return Ok(StructuredInput::new());
    }

    let schema = VariableSchema::parse(variable_schema);
    let raw = RawTestCase::parse(test_case);
    decode_parsed(&raw, &schema, options)
}

/// Decodes an already split test case. The header count drives iteration.
pub fn decode_parsed(
    raw: &RawTestCase<'_>,
    schema: &VariableSchema,
    options: &DecodeOptions,
) -> Result<StructuredInput, DecodeError> {
    let count = raw.count.value().ok_or_else(|| DecodeError::InvalidCount {
        line: raw.header.to_string(),
    })?;

    let mut input = StructuredInput::new();
    if count <= 0 {
        return Ok(input);
    }

    let count = usize::try_from(count)
        .ok()
        .filter(|n| *n <= schema.len())
        .ok_or(DecodeError::MalformedSchema {
            expected: count,
            declared: schema.len(),
        })?;

    for (index, descriptor) in schema.iter().take(count).enumerate() {
        let line = raw.value(index).ok_or_else(|| DecodeError::MissingValue {
            index: index + 1,
            name: descriptor.name.clone(),
        })?;
        let value = decode_value(descriptor, line, options)?;
        input.insert(descriptor.name.clone(), value);
    }

    debug!(
        "decoded {} test-case variables ({} declared in schema)",
        input.len(),
        schema.len()
    );
    Ok(input)
}

/// Decodes a single value line according to its descriptor.
pub fn decode_value(
    descriptor: &VariableDescriptor,
    line: &str,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    let parse_number = |token: &str| {
        Int::try_parse_prefix(token).map_err(|_| DecodeError::NumberOutOfRange {
            name: descriptor.name.clone(),
            token: token.to_string(),
        })
    };

    let value = match &descriptor.structure {
        Structure::Array => {
            // Single-space split: consecutive spaces produce empty tokens.
            let tokens = line.split(' ');
            match descriptor.element_type {
                ElementType::Number => {
                    Value::Numbers(tokens.map(parse_number).collect::<Result<_, _>>()?)
                }
                ElementType::String => Value::Texts(tokens.map(str::to_string).collect()),
            }
        }
        Structure::Number => Value::Number(parse_number(line)?),
        Structure::String => Value::Text(line.to_string()),
        Structure::Unrecognized(token) => {
            if options.strict_structures {
                return Err(DecodeError::UnknownStructure {
                    name: descriptor.name.clone(),
                    token: token.clone(),
                });
            }
            warn!(
                "variable `{}` has unknown structure {:?}, keeping it as a string",
                descriptor.name, token
            );
            Value::Text(line.to_string())
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(line: &str) -> VariableDescriptor {
        VariableDescriptor::parse_line(line)
    }

    #[test]
    fn number_array_keeps_empty_tokens_as_nan() {
        let value = decode_value(
            &descriptor("xs array number"),
            "1  2",
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(
            value,
            Value::Numbers(vec![Int::new(1), Int::NAN, Int::new(2)])
        );
    }

    #[test]
    fn string_array_keeps_empty_tokens() {
        let value = decode_value(
            &descriptor("xs array string"),
            "a  b ",
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(
            value,
            Value::Texts(vec![
                "a".to_string(),
                String::new(),
                "b".to_string(),
                String::new()
            ])
        );
    }

    #[test]
    fn unknown_element_type_reads_strings() {
        let value = decode_value(
            &descriptor("xs array float"),
            "1 2",
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(value, Value::Texts(vec!["1".to_string(), "2".to_string()]));
    }

    #[test]
    fn scalar_string_is_verbatim() {
        let value = decode_value(
            &descriptor("s string string"),
            "  hello world ",
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(value, Value::Text("  hello world ".to_string()));
    }

    #[test]
    fn unknown_structure_is_a_string_unless_strict() {
        let d = descriptor("g matrix number");
        assert_eq!(
            decode_value(&d, "1 2", &DecodeOptions::default()).unwrap(),
            Value::Text("1 2".to_string())
        );

        let strict = DecodeOptions {
            strict_structures: true,
        };
        assert_eq!(
            decode_value(&d, "1 2", &strict),
            Err(DecodeError::UnknownStructure {
                name: "g".to_string(),
                token: "matrix".to_string()
            })
        );
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: DecodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DecodeOptions::default());
        let options: DecodeOptions =
            serde_json::from_str(r#"{"strict_structures":true}"#).unwrap();
        assert!(options.strict_structures);
    }
}
