use log::debug;

use crate::error::EncodeError;
use crate::schema::{ElementType, Structure, VariableDescriptor, VariableSchema};
use crate::value::{StructuredInput, Value};

/// Writes structured input back into the raw test-case format.
///
/// The output holds the variable count, then a label line (the variable
/// name) and a value line per schema entry, every line ending in `\n`.
/// Variables present in `input` but absent from `schema` are skipped.
///
/// # Examples
/// ```
/// use apticode::{decode, encode, Int, StructuredInput, Value, VariableSchema};
///
/// let schema = VariableSchema::parse("n number number\nxs array number");
/// let mut input = StructuredInput::new();
/// input.insert("n", Value::Number(Int::new(3)));
/// input.insert("xs", Value::Numbers(vec![Int::new(4), Int::new(5)]));
///
/// let text = encode(&input, &schema).unwrap();
/// assert_eq!(text, "2\nn\n3\nxs\n4 5\n");
/// assert_eq!(decode(&text, &schema.to_string()).unwrap(), input);
/// ```
pub fn encode(input: &StructuredInput, schema: &VariableSchema) -> Result<String, EncodeError> {
    let mut out = String::new();
    out.push_str(&schema.len().to_string());
    out.push('\n');

    for descriptor in schema.iter() {
        let value = input
            .get(&descriptor.name)
            .ok_or_else(|| EncodeError::MissingValue {
                name: descriptor.name.clone(),
            })?;
        out.push_str(&descriptor.name);
        out.push('\n');
        out.push_str(&encode_value(descriptor, value)?);
        out.push('\n');
    }

    let skipped = input
        .names()
        .filter(|name| !schema.iter().any(|d| d.name == *name))
        .count();
    if skipped > 0 {
        debug!("skipped {} variables not declared in schema", skipped);
    }
    Ok(out)
}

/// Renders one value line for `descriptor`.
pub fn encode_value(descriptor: &VariableDescriptor, value: &Value) -> Result<String, EncodeError> {
    let name = &descriptor.name;
    let mismatch = |expected: &str| EncodeError::ShapeMismatch {
        name: name.clone(),
        expected: expected.to_string(),
        found: value.kind(),
    };
    let unencodable = |reason: &'static str| EncodeError::Unencodable {
        name: name.clone(),
        reason,
    };

    // `[]` carries no element type, so emptiness is checked before shape.
    let empty_array = match value {
        Value::Numbers(items) => items.is_empty(),
        Value::Texts(items) => items.is_empty(),
        Value::Number(_) | Value::Text(_) => false,
    };
    if descriptor.structure == Structure::Array && empty_array {
        return Err(unencodable("empty arrays do not survive the space-separated format"));
    }

    match (&descriptor.structure, descriptor.element_type, value) {
        (Structure::Array, ElementType::Number, Value::Numbers(items)) => {
            let tokens: Vec<String> = items.iter().map(|item| item.to_string()).collect();
            Ok(tokens.join(" "))
        }
        (Structure::Array, ElementType::String, Value::Texts(items)) => {
            if items.iter().any(|item| item.contains(' ') || item.contains('\n')) {
                return Err(unencodable("array elements may not contain spaces or newlines"));
            }
            Ok(items.join(" "))
        }
        (Structure::Array, ElementType::Number, _) => Err(mismatch("number array")),
        (Structure::Array, ElementType::String, _) => Err(mismatch("string array")),
        (Structure::Number, _, Value::Number(n)) => Ok(n.to_string()),
        (Structure::Number, _, _) => Err(mismatch("number")),
        (Structure::String | Structure::Unrecognized(_), _, Value::Text(text)) => {
            if text.contains('\n') {
                return Err(unencodable("strings may not contain newlines"));
            }
            Ok(text.clone())
        }
        (Structure::String | Structure::Unrecognized(_), _, _) => Err(mismatch("string")),
    }
}
