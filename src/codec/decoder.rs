use crate::driver::DriverValue;
use crate::error::SqlBridgeError;
use crate::types::SqlValue;

/// Maps driver-reported values back into the application representation.
///
/// The mirror of [`crate::codec::Encoder`]: recognized coercions invert
/// structurally (temporal, UUID, and binary values map straight back); text is
/// never re-parsed on the way out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Decode a single driver value.
    ///
    /// # Errors
    ///
    /// Returns `SqlBridgeError::CoercionError` for values with no application
    /// representation, such as an unread large-object handle.
    pub fn decode(&self, value: DriverValue) -> Result<SqlValue, SqlBridgeError> {
        match value {
            DriverValue::Null => Ok(SqlValue::Null),
            DriverValue::Bool(b) => Ok(SqlValue::Bool(b)),
            DriverValue::Int(i) => Ok(SqlValue::Int(i)),
            DriverValue::Float(f) => Ok(SqlValue::Float(f)),
            DriverValue::Text(s) => Ok(SqlValue::Text(s)),
            DriverValue::Date(d) => Ok(SqlValue::Date(d)),
            DriverValue::Time(t) => Ok(SqlValue::Time(t)),
            DriverValue::Timestamp(ts) => Ok(SqlValue::Timestamp(ts)),
            DriverValue::Bytes(bytes) => Ok(SqlValue::Blob(bytes)),
            DriverValue::Uuid(u) => Ok(SqlValue::Uuid(u)),
            DriverValue::Blob(handle) => Err(SqlBridgeError::CoercionError(format!(
                "driver returned an unmaterialized blob handle ({})",
                handle.0
            ))),
            DriverValue::Array(items) => {
                let mut decoded = Vec::with_capacity(items.len());
                for item in items {
                    decoded.push(self.decode(item)?);
                }
                Ok(SqlValue::Array(decoded))
            }
        }
    }

    /// Decode a full driver row.
    ///
    /// # Errors
    ///
    /// Propagates the first per-value decode failure.
    pub fn decode_row(&self, row: Vec<DriverValue>) -> Result<Vec<SqlValue>, SqlBridgeError> {
        let mut out = Vec::with_capacity(row.len());
        for value in row {
            out.push(self.decode(value)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::BlobHandle;

    #[test]
    fn scalar_values_map_straight_back() {
        let decoder = Decoder;
        assert_eq!(
            decoder.decode(DriverValue::Int(42)).unwrap(),
            SqlValue::Int(42)
        );
        assert_eq!(
            decoder.decode(DriverValue::Bytes(vec![1, 2])).unwrap(),
            SqlValue::Blob(vec![1, 2])
        );
    }

    #[test]
    fn blob_handles_do_not_decode() {
        let decoder = Decoder;
        let err = decoder.decode(DriverValue::Blob(BlobHandle(9))).unwrap_err();
        assert!(matches!(err, SqlBridgeError::CoercionError(_)));
    }
}
