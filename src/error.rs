use thiserror::Error;
use tracing::debug;

/// Boxed cause attached to a driver error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// SQLSTATE classes that mean the engine cannot perform the requested operation.
///
/// `42` is "syntax error or access rule violation", reported when a spatial
/// function is undefined. `22` is "data exception", reported by some engines
/// (MySQL 5.7) for geometry types or values they cannot process.
pub const NOT_SUPPORTED_CLASSES: &[&str] = &["42", "22"];

/// A failure reported by a database driver, normalized to a (code, message) pair.
///
/// Every driver maps its native error into this shape so that classification
/// does not depend on where the error came from.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DriverError {
    /// Structured SQLSTATE reported by the database, if any.
    pub sqlstate: Option<String>,
    /// Raw vendor error code, used when no SQLSTATE is available.
    pub code: Option<String>,
    pub message: String,
    #[source]
    pub source: Option<BoxError>,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            sqlstate: None,
            code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a structured SQLSTATE.
    pub fn with_sqlstate(mut self, sqlstate: impl Into<String>) -> Self {
        self.sqlstate = Some(sqlstate.into());
        self
    }

    /// Attach a raw vendor code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach the native error this one was built from.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Two-character error class.
    ///
    /// Taken from the SQLSTATE when it has at least two characters, otherwise
    /// from the leading characters of the raw code. Some drivers report an
    /// empty SQLSTATE. The fallback is best-effort: raw codes come in
    /// vendor-specific formats and only some of them start with a SQLSTATE
    /// class.
    pub fn class(&self) -> Option<&str> {
        [self.sqlstate.as_deref(), self.code.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|code| code.get(..2))
    }
}

/// Error type for geosql operations
#[derive(Debug, Error)]
pub enum GeoSqlError {
    /// The engine lacks the spatial function or cannot process the geometry.
    /// Callers may fall back to another engine.
    #[error("Operation not supported by engine: {0}")]
    OperationNotSupported(#[source] DriverError),

    /// Any other driver failure, passed through unchanged.
    #[error(transparent)]
    TransportFailure(DriverError),

    #[error("Driver returned no result set for query: {query}")]
    MissingResultSet { query: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] DriverError),

    #[error("Missing configuration: {0} is not set")]
    MissingConfiguration(&'static str),
}

impl GeoSqlError {
    pub fn is_operation_not_supported(&self) -> bool {
        matches!(self, GeoSqlError::OperationNotSupported(_))
    }

    /// The driver error behind this failure, if it came from the driver.
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            GeoSqlError::OperationNotSupported(e)
            | GeoSqlError::TransportFailure(e)
            | GeoSqlError::ConnectionFailed(e) => Some(e),
            _ => None,
        }
    }
}

/// Classify a driver failure.
///
/// Errors in a [`NOT_SUPPORTED_CLASSES`] class become
/// [`GeoSqlError::OperationNotSupported`]; everything else is a
/// [`GeoSqlError::TransportFailure`] carrying the original error.
pub fn classify(error: DriverError) -> GeoSqlError {
    match error.class() {
        Some(class) if NOT_SUPPORTED_CLASSES.contains(&class) => {
            debug!(
                sqlstate = ?error.sqlstate,
                code = ?error.code,
                "driver error classified as operation not supported"
            );
            GeoSqlError::OperationNotSupported(error)
        }
        _ => GeoSqlError::TransportFailure(error),
    }
}

/// Result type alias for geosql operations
pub type Result<T> = std::result::Result<T, GeoSqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_function_is_not_supported() {
        let err = classify(
            DriverError::new("function st_area does not exist").with_sqlstate("42883"),
        );
        assert!(err.is_operation_not_supported());
    }

    #[test]
    fn test_data_exception_is_not_supported() {
        let err = classify(DriverError::new("invalid geometry").with_sqlstate("22023"));
        assert!(err.is_operation_not_supported());
    }

    #[test]
    fn test_other_classes_pass_through() {
        for sqlstate in ["08006", "23505", "57014", "HY000"] {
            let err = classify(DriverError::new("boom").with_sqlstate(sqlstate));
            match err {
                GeoSqlError::TransportFailure(e) => {
                    assert_eq!(e.sqlstate.as_deref(), Some(sqlstate));
                    assert_eq!(e.message, "boom");
                }
                other => panic!("Expected TransportFailure for {}, got {:?}", sqlstate, other),
            }
        }
    }

    #[test]
    fn test_sqlstate_preferred_over_code() {
        let err = classify(
            DriverError::new("connection lost")
                .with_sqlstate("08006")
                .with_code("42000"),
        );
        assert!(!err.is_operation_not_supported());
    }

    #[test]
    fn test_falls_back_to_raw_code() {
        let err = classify(DriverError::new("no such function").with_code("42000"));
        assert!(err.is_operation_not_supported());

        let err = classify(DriverError::new("gone away").with_code("2006"));
        assert!(!err.is_operation_not_supported());
    }

    #[test]
    fn test_empty_sqlstate_falls_back_to_raw_code() {
        let err = DriverError::new("unknown function")
            .with_sqlstate("")
            .with_code("42000");
        assert_eq!(err.class(), Some("42"));
        assert!(classify(err).is_operation_not_supported());

        let err = DriverError::new("short").with_sqlstate("4").with_code("08S01");
        assert_eq!(err.class(), Some("08"));
    }

    #[test]
    fn test_missing_or_short_code_is_transport_failure() {
        assert!(matches!(
            classify(DriverError::new("no code")),
            GeoSqlError::TransportFailure(_)
        ));
        assert!(matches!(
            classify(DriverError::new("short").with_code("4")),
            GeoSqlError::TransportFailure(_)
        ));
    }

    #[test]
    fn test_transport_failure_preserves_message_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = classify(DriverError::new("write failed").with_source(io));
        assert_eq!(err.to_string(), "write failed");
        let source = std::error::Error::source(&err).expect("source should be kept");
        assert_eq!(source.to_string(), "pipe closed");
    }
}
