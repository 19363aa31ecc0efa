//! geosql - runs spatial SQL functions on a relational database for a geometry library
//!
//! The engine prepares each distinct query once, binds geometries as
//! (payload, SRID) slot pairs, and tells "this database cannot do that"
//! apart from genuine failures so callers can fall back to another engine.
//!
//! # Example
//! ```ignore
//! use geosql::{ConnectionConfig, GeometryParameter, Parameter, SpatialEngine};
//!
//! let mut engine = SpatialEngine::connect(&ConnectionConfig::from_env()?).await?;
//!
//! let sql = format!("SELECT ST_Area({})", engine.geom_from_wkb_syntax());
//! let params: Vec<Parameter> = vec![GeometryParameter::binary(wkb, 4326).into()];
//!
//! match engine.execute(&sql, &params).await {
//!     Ok(rows) => println!("area: {:?}", rows[0].get(0)),
//!     Err(e) if e.is_operation_not_supported() => { /* try another engine */ }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod binder;
pub mod cache;
pub mod config;
pub mod dialect;
pub mod drivers;
pub mod error;
pub mod traits;
pub mod types;

mod engine;

// Re-export main types for convenient access
pub use config::ConnectionConfig;
pub use dialect::Dialect;
pub use engine::SpatialEngine;
pub use error::{DriverError, GeoSqlError, Result};
pub use traits::{DatabaseDriver, PreparedStatement};
pub use types::{
    ColumnValue, GeometryParameter, GeometryPayload, Parameter, RawQueryResult, ResultRow,
    ScalarParameter, SqlValue,
};
