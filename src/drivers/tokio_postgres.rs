use std::sync::Arc;

use async_trait::async_trait;
use tokio_postgres::types::{FromSql, ToSql, Type};
use tokio_postgres::{Client, NoTls, Row, Statement};
use tracing::error;

use crate::config::ConnectionConfig;
use crate::dialect::numbered_placeholders;
use crate::error::{DriverError, GeoSqlError, Result};
use crate::traits::{DatabaseDriver, PreparedStatement};
use crate::types::{ColumnValue, RawQueryResult, ResultRow, SqlValue};

/// Platform identity reported by this driver.
pub const PLATFORM: &str = "postgresql";

/// PostgreSQL driver implementation using tokio-postgres.
pub struct TokioPostgresDriver {
    client: Arc<Client>,
}

impl TokioPostgresDriver {
    /// Connect to a PostgreSQL database.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(&config.connection_string, NoTls)
            .await
            .map_err(|e| GeoSqlError::ConnectionFailed(driver_error(e)))?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "PostgreSQL connection error");
            }
        });

        Ok(Self::new(client))
    }

    /// Wrap a client whose connection task the caller already drives.
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    fn platform(&self) -> &str {
        PLATFORM
    }

    async fn prepare(
        &self,
        sql: &str,
    ) -> std::result::Result<Box<dyn PreparedStatement>, DriverError> {
        let statement = self
            .client
            .prepare(&numbered_placeholders(sql))
            .await
            .map_err(driver_error)?;
        let slots = statement.params().len();

        Ok(Box::new(TokioPostgresStatement {
            client: Arc::clone(&self.client),
            statement,
            values: vec![None; slots],
        }))
    }
}

/// A value converted to the type the server inferred for its slot.
#[derive(Debug, Clone)]
enum PgParam {
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Float8(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl PgParam {
    fn as_to_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            PgParam::Int2(v) => v,
            PgParam::Int4(v) => v,
            PgParam::Int8(v) => v,
            PgParam::Float4(v) => v,
            PgParam::Float8(v) => v,
            PgParam::Text(v) => v,
            PgParam::Bytes(v) => v,
        }
    }
}

struct TokioPostgresStatement {
    client: Arc<Client>,
    statement: Statement,
    values: Vec<Option<PgParam>>,
}

#[async_trait]
impl PreparedStatement for TokioPostgresStatement {
    fn bind(&mut self, position: usize, value: SqlValue) -> std::result::Result<(), DriverError> {
        let slots = self.values.len();
        let index = position
            .checked_sub(1)
            .filter(|index| *index < slots)
            .ok_or_else(|| {
                DriverError::new(format!(
                    "Parameter position {} out of range, statement has {} parameter(s)",
                    position, slots
                ))
            })?;

        let param = to_pg_param(value, &self.statement.params()[index])?;
        self.values[index] = Some(param);
        Ok(())
    }

    async fn execute(&mut self) -> std::result::Result<Option<RawQueryResult>, DriverError> {
        let slots = self.values.len();
        let values = std::mem::replace(&mut self.values, vec![None; slots]);

        let params = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_ref()
                    .map(PgParam::as_to_sql)
                    .ok_or_else(|| DriverError::new(format!("Parameter {} is not bound", index + 1)))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if self.statement.columns().is_empty() {
            self.client
                .execute(&self.statement, &params)
                .await
                .map_err(driver_error)?;
            return Ok(None);
        }

        let rows = self
            .client
            .query(&self.statement, &params)
            .await
            .map_err(driver_error)?;

        let rows = rows
            .iter()
            .map(convert_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Some(RawQueryResult::new(rows)))
    }
}

/// Convert a bound value to the type the server inferred for its slot.
///
/// Numbers are narrowed or widened to the slot's integer or float type, text
/// is parsed when the slot is numeric, and any scalar may go into a text slot.
/// Anything else is rejected before it reaches the server.
fn to_pg_param(value: SqlValue, type_: &Type) -> std::result::Result<PgParam, DriverError> {
    match value {
        SqlValue::Integer(i) => integer_param(i, type_),
        SqlValue::Float(f) => float_param(f, type_),
        SqlValue::Text(s) => text_param(s, type_),
        SqlValue::LargeObject(bytes) if <Vec<u8> as ToSql>::accepts(type_) => {
            Ok(PgParam::Bytes(bytes))
        }
        value @ SqlValue::LargeObject(_) => Err(cannot_bind(&value, type_)),
    }
}

fn integer_param(i: i64, type_: &Type) -> std::result::Result<PgParam, DriverError> {
    if *type_ == Type::INT2 {
        i16::try_from(i)
            .map(PgParam::Int2)
            .map_err(|_| integer_out_of_range(i, type_))
    } else if *type_ == Type::INT4 {
        i32::try_from(i)
            .map(PgParam::Int4)
            .map_err(|_| integer_out_of_range(i, type_))
    } else if *type_ == Type::INT8 {
        Ok(PgParam::Int8(i))
    } else if *type_ == Type::FLOAT4 {
        Ok(PgParam::Float4(i as f32))
    } else if *type_ == Type::FLOAT8 {
        Ok(PgParam::Float8(i as f64))
    } else if is_text_slot(type_) {
        Ok(PgParam::Text(i.to_string()))
    } else {
        Err(cannot_bind(&SqlValue::Integer(i), type_))
    }
}

fn float_param(f: f64, type_: &Type) -> std::result::Result<PgParam, DriverError> {
    if *type_ == Type::FLOAT4 {
        Ok(PgParam::Float4(f as f32))
    } else if *type_ == Type::FLOAT8 {
        Ok(PgParam::Float8(f))
    } else if is_text_slot(type_) {
        Ok(PgParam::Text(f.to_string()))
    } else {
        Err(cannot_bind(&SqlValue::Float(f), type_))
    }
}

fn text_param(s: String, type_: &Type) -> std::result::Result<PgParam, DriverError> {
    if is_text_slot(type_) {
        Ok(PgParam::Text(s))
    } else if [Type::INT2, Type::INT4, Type::INT8].contains(type_) {
        let i = s.trim().parse::<i64>().map_err(|_| unparsable(&s, type_))?;
        integer_param(i, type_)
    } else if [Type::FLOAT4, Type::FLOAT8].contains(type_) {
        let f = s.trim().parse::<f64>().map_err(|_| unparsable(&s, type_))?;
        float_param(f, type_)
    } else {
        Err(cannot_bind(&SqlValue::Text(s), type_))
    }
}

fn is_text_slot(type_: &Type) -> bool {
    <String as ToSql>::accepts(type_)
}

fn integer_out_of_range(value: i64, type_: &Type) -> DriverError {
    DriverError::new(format!(
        "Integer {} does not fit parameter of type {}",
        value, type_
    ))
}

fn unparsable(value: &str, type_: &Type) -> DriverError {
    DriverError::new(format!(
        "Text {:?} cannot be read as parameter of type {}",
        value, type_
    ))
}

fn cannot_bind(value: &SqlValue, type_: &Type) -> DriverError {
    DriverError::new(format!(
        "Cannot bind {} value to parameter of type {}",
        value.type_name(),
        type_
    ))
}

/// Wire bytes of a column whose type has no dedicated mapping.
struct RawValue(Vec<u8>);

impl<'a> FromSql<'a> for RawValue {
    fn from_sql(
        _type_: &Type,
        raw: &'a [u8],
    ) -> std::result::Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(RawValue(raw.to_vec()))
    }

    fn accepts(_type_: &Type) -> bool {
        true
    }
}

fn convert_row(row: &Row) -> std::result::Result<ResultRow, DriverError> {
    (0..row.len())
        .map(|index| column_value(row, index))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(ResultRow::new)
}

/// Convert a row value at a given index to a ColumnValue.
/// Types without a mapping (e.g. PostGIS geometry, which arrives as EWKB)
/// are returned as raw bytes.
fn column_value(row: &Row, index: usize) -> std::result::Result<ColumnValue, DriverError> {
    let type_ = row.columns()[index].type_();

    let value = if *type_ == Type::BOOL {
        row.try_get::<_, Option<bool>>(index).map(ColumnValue::from)
    } else if *type_ == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)
            .map(|v| ColumnValue::from(v.map(i64::from)))
    } else if *type_ == Type::INT4 {
        row.try_get::<_, Option<i32>>(index)
            .map(|v| ColumnValue::from(v.map(i64::from)))
    } else if *type_ == Type::INT8 {
        row.try_get::<_, Option<i64>>(index).map(ColumnValue::from)
    } else if *type_ == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(index)
            .map(|v| ColumnValue::from(v.map(f64::from)))
    } else if *type_ == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(index).map(ColumnValue::from)
    } else if [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME].contains(type_) {
        row.try_get::<_, Option<String>>(index).map(ColumnValue::from)
    } else if *type_ == Type::BYTEA {
        row.try_get::<_, Option<Vec<u8>>>(index).map(ColumnValue::from)
    } else {
        row.try_get::<_, Option<RawValue>>(index)
            .map(|v| ColumnValue::from(v.map(|raw| raw.0)))
    };

    value.map_err(driver_error)
}

/// Normalize a tokio-postgres error, keeping the server SQLSTATE when there is one.
fn driver_error(error: tokio_postgres::Error) -> DriverError {
    let sqlstate = error.code().map(|state| state.code().to_string());
    let message = match error.as_db_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    };

    let mut driver_error = DriverError::new(message).with_source(error);
    driver_error.sqlstate = sqlstate;
    driver_error
}
