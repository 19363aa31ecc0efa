//! SQL dialect classification and the SQL fragments that depend on it.

use std::borrow::Cow;

use crate::traits::DatabaseDriver;
use crate::types::{GeometryParameter, ScalarParameter};

/// Platform identities treated as MySQL. MariaDB belongs to the MySQL family.
const MYSQL_PLATFORMS: &[&str] = &["mysql", "mariadb"];

/// Platform identities treated as PostgreSQL.
const POSTGRESQL_PLATFORMS: &[&str] = &["postgresql"];

/// SQL dialect of the connection in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    Generic,
    MySql,
    PostgreSql,
}

impl Dialect {
    /// Classify a reported platform identity. Matching is exact.
    pub fn from_platform(platform: &str) -> Self {
        if MYSQL_PLATFORMS.contains(&platform) {
            Dialect::MySql
        } else if POSTGRESQL_PLATFORMS.contains(&platform) {
            Dialect::PostgreSql
        } else {
            Dialect::Generic
        }
    }

    #[inline]
    pub const fn is_mysql(self) -> bool {
        matches!(self, Dialect::MySql)
    }

    #[inline]
    pub const fn is_postgresql(self) -> bool {
        matches!(self, Dialect::PostgreSql)
    }

    /// Geometry constructor from WKB, taking the payload and the SRID.
    ///
    /// MySQL casts the payload to BINARY, otherwise the driver may send it as
    /// text and corrupt it.
    pub const fn geom_from_wkb_syntax(self) -> &'static str {
        match self {
            Dialect::MySql => "ST_GeomFromWKB(BINARY ?, ?)",
            Dialect::Generic | Dialect::PostgreSql => "ST_GeomFromWKB(?, ?)",
        }
    }

    /// Geometry constructor from WKT, taking the payload and the SRID.
    pub const fn geom_from_text_syntax(self) -> &'static str {
        "ST_GeomFromText(?, ?)"
    }

    /// Constructor fragment matching the encoding of `geometry`.
    pub fn geometry_placeholder(self, geometry: &GeometryParameter) -> &'static str {
        if geometry.is_binary() {
            self.geom_from_wkb_syntax()
        } else {
            self.geom_from_text_syntax()
        }
    }

    /// Placeholder fragment for a scalar parameter.
    ///
    /// PostgreSQL cannot infer the type of an integer parameter in some
    /// expressions and rejects it as ambiguous, so it gets an explicit cast.
    pub fn parameter_placeholder(self, parameter: &ScalarParameter) -> &'static str {
        match (self, parameter) {
            (Dialect::PostgreSql, ScalarParameter::Integer(_)) => "CAST (? AS INTEGER)",
            _ => "?",
        }
    }
}

/// Classify the dialect of a live connection.
pub fn classify(driver: &dyn DatabaseDriver) -> Dialect {
    Dialect::from_platform(driver.platform())
}

#[derive(Clone, Copy)]
enum Scan {
    Code,
    Quoted(char),
    LineComment,
    BlockComment,
}

/// Byte offsets of the `?` placeholders in `sql`.
///
/// Question marks inside single-quoted literals, double-quoted identifiers,
/// `--` line comments and `/* */` block comments are not placeholders.
/// Doubled quotes toggle twice and need no special case.
pub fn placeholder_offsets(sql: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut scan = Scan::Code;
    let mut chars = sql.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        scan = match (scan, c, next) {
            (Scan::Code, '\'' | '"', _) => Scan::Quoted(c),
            (Scan::Code, '-', Some('-')) => {
                chars.next();
                Scan::LineComment
            }
            (Scan::Code, '/', Some('*')) => {
                chars.next();
                Scan::BlockComment
            }
            (Scan::Code, '?', _) => {
                offsets.push(offset);
                Scan::Code
            }
            (Scan::Quoted(q), c, _) if c == q => Scan::Code,
            (Scan::LineComment, '\n', _) => Scan::Code,
            (Scan::BlockComment, '*', Some('/')) => {
                chars.next();
                Scan::Code
            }
            (scan, _, _) => scan,
        };
    }

    offsets
}

/// Rewrite `?` placeholders as `$1, $2, ...` for numbered-placeholder protocols.
pub fn numbered_placeholders(sql: &str) -> Cow<'_, str> {
    let offsets = placeholder_offsets(sql);
    if offsets.is_empty() {
        return Cow::Borrowed(sql);
    }

    let mut out = String::with_capacity(sql.len() + offsets.len() * 2);
    let mut last = 0;
    for (i, offset) in offsets.iter().enumerate() {
        out.push_str(&sql[last..*offset]);
        out.push('$');
        out.push_str(&(i + 1).to_string());
        last = offset + 1;
    }
    out.push_str(&sql[last..]);

    Cow::Owned(out)
}
