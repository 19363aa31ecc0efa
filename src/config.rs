use crate::error::{GeoSqlError, Result};

/// Environment variable holding the connection string.
pub const DATABASE_URL_ENV: &str = "GEOSQL_DATABASE_URL";

/// Settings for opening a database connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    pub connection_string: String,
}

impl ConnectionConfig {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
        }
    }

    /// Read the connection string from `GEOSQL_DATABASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        lookup(DATABASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(Self::new)
            .ok_or(GeoSqlError::MissingConfiguration(DATABASE_URL_ENV))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup() {
        let config = ConnectionConfig::from_lookup(|key| {
            assert_eq!(key, DATABASE_URL_ENV);
            Some("postgres://localhost/gis".to_string())
        })
        .unwrap();
        assert_eq!(config.connection_string, "postgres://localhost/gis");
    }

    #[test]
    fn test_missing_or_blank_is_an_error() {
        let err = ConnectionConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, GeoSqlError::MissingConfiguration(DATABASE_URL_ENV)));

        let err = ConnectionConfig::from_lookup(|_| Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, GeoSqlError::MissingConfiguration(_)));
    }
}
