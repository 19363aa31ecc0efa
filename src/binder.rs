use crate::error::DriverError;
use crate::traits::PreparedStatement;
use crate::types::Parameter;

/// Bind an ordered parameter list to the positional slots of `statement`.
///
/// A geometry takes two consecutive slots (payload, then SRID). Binary payloads
/// bind as large objects and text payloads as text. Scalars take one slot each,
/// integers as integer, floats as float and strings as text. Returns the number
/// of slots bound.
pub fn bind(
    statement: &mut dyn PreparedStatement,
    parameters: &[Parameter],
) -> Result<usize, DriverError> {
    let mut position = 1;

    for parameter in parameters {
        match parameter {
            Parameter::Geometry(geometry) => {
                statement.bind(position, geometry.payload_value())?;
                statement.bind(position + 1, geometry.srid_value())?;
            }
            Parameter::Scalar(scalar) => {
                statement.bind(position, scalar.value())?;
            }
        }
        position += parameter.slot_count();
    }

    Ok(position - 1)
}
