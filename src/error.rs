use thiserror::Error;

/// Failure while decoding a raw test case against its variable schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("variable count {line:?} on line 0 is not a usable integer")]
    InvalidCount { line: String },

    #[error("variable `{name}` holds {token:?}, which does not fit in a 64-bit integer")]
    NumberOutOfRange { name: String, token: String },

    #[error("malformed schema: test case declares {expected} variables but schema lists {declared}")]
    MalformedSchema { expected: i64, declared: usize },

    #[error("test case has no value line for variable {index} (`{name}`)")]
    MissingValue { index: usize, name: String },

    #[error("variable `{name}` has unknown structure {token:?}")]
    UnknownStructure { name: String, token: String },
}

/// Failure while writing structured input back into the raw wire format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("no value for schema variable `{name}`")]
    MissingValue { name: String },

    #[error("variable `{name}` expects {expected} but holds {found}")]
    ShapeMismatch {
        name: String,
        expected: String,
        found: &'static str,
    },

    #[error("variable `{name}` cannot be encoded: {reason}")]
    Unencodable { name: String, reason: &'static str },
}
