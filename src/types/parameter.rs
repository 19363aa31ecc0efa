use crate::types::SqlValue;

/// Serialized geometry carried by a [`GeometryParameter`].
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryPayload {
    /// Well-known binary.
    Binary(Vec<u8>),
    /// Well-known text.
    Text(String),
}

/// A geometry value pending insertion into SQL.
///
/// Occupies two consecutive placeholders: the payload, then the SRID.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryParameter {
    payload: GeometryPayload,
    srid: i32,
}

impl GeometryParameter {
    /// A geometry serialized as WKB.
    pub fn binary(wkb: impl Into<Vec<u8>>, srid: i32) -> Self {
        Self {
            payload: GeometryPayload::Binary(wkb.into()),
            srid,
        }
    }

    /// A geometry serialized as WKT.
    pub fn text(wkt: impl Into<String>, srid: i32) -> Self {
        Self {
            payload: GeometryPayload::Text(wkt.into()),
            srid,
        }
    }

    pub fn payload(&self) -> &GeometryPayload {
        &self.payload
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.payload, GeometryPayload::Binary(_))
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Bind value for the payload slot: large object for WKB, text for WKT.
    pub(crate) fn payload_value(&self) -> SqlValue {
        match &self.payload {
            GeometryPayload::Binary(bytes) => SqlValue::LargeObject(bytes.clone()),
            GeometryPayload::Text(text) => SqlValue::Text(text.clone()),
        }
    }

    /// Bind value for the SRID slot.
    pub(crate) fn srid_value(&self) -> SqlValue {
        SqlValue::Integer(i64::from(self.srid))
    }
}

/// A plain scalar parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarParameter {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ScalarParameter {
    pub fn is_integer(&self) -> bool {
        matches!(self, ScalarParameter::Integer(_))
    }

    pub(crate) fn value(&self) -> SqlValue {
        match self {
            ScalarParameter::Integer(i) => SqlValue::Integer(*i),
            ScalarParameter::Float(f) => SqlValue::Float(*f),
            ScalarParameter::Text(s) => SqlValue::Text(s.clone()),
        }
    }
}

impl From<i32> for ScalarParameter {
    fn from(value: i32) -> Self {
        ScalarParameter::Integer(i64::from(value))
    }
}

impl From<i64> for ScalarParameter {
    fn from(value: i64) -> Self {
        ScalarParameter::Integer(value)
    }
}

impl From<f64> for ScalarParameter {
    fn from(value: f64) -> Self {
        ScalarParameter::Float(value)
    }
}

impl From<&str> for ScalarParameter {
    fn from(value: &str) -> Self {
        ScalarParameter::Text(value.to_string())
    }
}

impl From<String> for ScalarParameter {
    fn from(value: String) -> Self {
        ScalarParameter::Text(value)
    }
}

/// One entry of an ordered parameter list.
/// Order must match the positional placeholders of the query text.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Geometry(GeometryParameter),
    Scalar(ScalarParameter),
}

impl Parameter {
    /// Number of positional slots this parameter consumes.
    pub fn slot_count(&self) -> usize {
        match self {
            Parameter::Geometry(_) => 2,
            Parameter::Scalar(_) => 1,
        }
    }
}

impl From<GeometryParameter> for Parameter {
    fn from(value: GeometryParameter) -> Self {
        Parameter::Geometry(value)
    }
}

impl From<ScalarParameter> for Parameter {
    fn from(value: ScalarParameter) -> Self {
        Parameter::Scalar(value)
    }
}

impl From<i32> for Parameter {
    fn from(value: i32) -> Self {
        Parameter::Scalar(value.into())
    }
}

impl From<i64> for Parameter {
    fn from(value: i64) -> Self {
        Parameter::Scalar(value.into())
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Scalar(value.into())
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Parameter::Scalar(value.into())
    }
}

impl From<String> for Parameter {
    fn from(value: String) -> Self {
        Parameter::Scalar(value.into())
    }
}
