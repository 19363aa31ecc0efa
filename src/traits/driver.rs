use async_trait::async_trait;

use crate::error::DriverError;
use crate::types::{RawQueryResult, SqlValue};

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Reporting the platform identity of the connection
/// - Preparing parameterized statements from SQL text using `?` placeholders
/// - Reporting failures as [`DriverError`] with the database's SQLSTATE where known
///
/// The driver does not own the connection lifecycle on behalf of the engine;
/// opening and closing it is the caller's business.
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Platform identity of the connection, e.g. `"postgresql"` or `"mysql"`.
    fn platform(&self) -> &str;

    /// Prepare a statement for repeated execution.
    async fn prepare(&self, sql: &str) -> Result<Box<dyn PreparedStatement>, DriverError>;
}

/// A prepared statement held by the connection.
#[async_trait]
pub trait PreparedStatement: Send + Sync {
    /// Bind a typed value to a 1-based positional slot.
    fn bind(&mut self, position: usize, value: SqlValue) -> Result<(), DriverError>;

    /// Run the statement with the currently bound values and fetch every row.
    ///
    /// Returns `None` when the statement ran but produced no result set.
    /// Bound values are consumed: the next execution must bind every slot again.
    async fn execute(&mut self) -> Result<Option<RawQueryResult>, DriverError>;
}
