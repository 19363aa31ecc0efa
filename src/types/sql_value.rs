/// A typed value bound to one positional slot of a prepared statement.
/// The variant selects the bind type; drivers convert it to their native encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Large binary object, used for WKB payloads.
    LargeObject(Vec<u8>),
    Text(String),
    Integer(i64),
    Float(f64),
}

impl SqlValue {
    /// Name of the bind type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::LargeObject(_) => "large object",
            SqlValue::Text(_) => "text",
            SqlValue::Integer(_) => "integer",
            SqlValue::Float(_) => "float",
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Integer(i64::from(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::LargeObject(value)
    }
}
