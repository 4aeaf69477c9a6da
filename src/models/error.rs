use serde_json::Value;

/// Errors that can occur when loading or saving an article collection
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// Input was neither a list nor a mapping of article records
    #[error("Unsupported JSON data structure: expected a list or an object, got {0}")]
    UnsupportedShape(String),

    /// An article record was not a JSON object
    #[error("Unsupported article record: expected an object, got {0}")]
    UnsupportedRecord(String),

    /// File open/read/write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON text
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias for collection operations
pub type Result<T> = std::result::Result<T, CollectionError>;

/// JSON type name used in shape errors
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
