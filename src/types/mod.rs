mod parameter;
mod row;
mod sql_value;

pub use parameter::{GeometryParameter, GeometryPayload, Parameter, ScalarParameter};
pub use row::{ColumnValue, RawQueryResult, ResultRow};
pub use sql_value::SqlValue;
