use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::error::DriverError;
use crate::traits::{DatabaseDriver, PreparedStatement};

/// Prepared statements keyed by their exact query text.
///
/// Entries live as long as the cache. There is no eviction: the set of
/// distinct query texts is small and fixed by the caller's templates.
#[derive(Default)]
pub struct StatementCache {
    statements: HashMap<String, Box<dyn PreparedStatement>>,
}

impl StatementCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the statement for `sql`, preparing it on first use.
    ///
    /// A failed prepare leaves nothing behind, so the next call retries it.
    pub async fn resolve(
        &mut self,
        driver: &dyn DatabaseDriver,
        sql: &str,
    ) -> Result<&mut dyn PreparedStatement, DriverError> {
        let statement = match self.statements.entry(sql.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(query = sql, "preparing statement");
                entry.insert(driver.prepare(sql).await?)
            }
        };

        Ok(statement.as_mut())
    }

    pub fn contains(&self, sql: &str) -> bool {
        self.statements.contains_key(sql)
    }

    /// Returns the number of cached statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
