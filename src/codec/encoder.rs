use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::config::BridgeConfig;
use crate::driver::{ColumnDescriptor, DriverValue};
use crate::error::SqlBridgeError;
use crate::types::{SqlType, SqlValue};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Coerces application values to the driver-declared parameter type.
///
/// Best-effort by design: only the explicitly recognized coercions are
/// applied, everything else passes through unchanged and the driver decides.
/// Constructed once per bridge connection and passed in explicitly.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    cast_uuid: bool,
    cast_date: bool,
    cast_time: bool,
    cast_datetime: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

impl Encoder {
    #[must_use]
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            cast_uuid: config.cast_uuid,
            cast_date: config.cast_date,
            cast_time: config.cast_time,
            cast_datetime: config.cast_datetime,
        }
    }

    /// Encode `value` for the placeholder described by `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns `SqlBridgeError::CoercionError` when a recognized coercion
    /// applies but the value cannot be converted (e.g. an unparseable date
    /// string bound to a DATE column).
    pub fn encode(
        &self,
        descriptor: &ColumnDescriptor,
        value: &SqlValue,
    ) -> Result<DriverValue, SqlBridgeError> {
        match value {
            SqlValue::Null => Ok(DriverValue::Null),
            SqlValue::Bool(b) => Ok(DriverValue::Bool(*b)),
            SqlValue::Int(i) => Ok(DriverValue::Int(*i)),
            SqlValue::Float(f) => Ok(DriverValue::Float(*f)),
            SqlValue::Timestamp(ts) => Ok(DriverValue::Timestamp(*ts)),
            SqlValue::Date(d) => Ok(DriverValue::Date(*d)),
            SqlValue::Time(t) => Ok(DriverValue::Time(*t)),
            SqlValue::Uuid(u) => Ok(DriverValue::Uuid(*u)),
            SqlValue::Blob(bytes) => Ok(DriverValue::Bytes(bytes.clone())),
            SqlValue::Text(s) => self.encode_text(descriptor, s),
            SqlValue::Array(items) => {
                let mut encoded = Vec::with_capacity(items.len());
                for item in items {
                    encoded.push(self.encode(descriptor, item)?);
                }
                Ok(DriverValue::Array(encoded))
            }
        }
    }

    fn encode_text(
        &self,
        descriptor: &ColumnDescriptor,
        text: &str,
    ) -> Result<DriverValue, SqlBridgeError> {
        match descriptor.sql_type {
            SqlType::Date if self.cast_date => parse_date(text).map(DriverValue::Date),
            SqlType::Time if self.cast_time => parse_time(text).map(DriverValue::Time),
            SqlType::Timestamp if self.cast_datetime => {
                parse_datetime(text).map(DriverValue::Timestamp)
            }
            _ => {
                // UUID casting is shape-based: any value that parses as a UUID
                // is promoted when the switch is on.
                if self.cast_uuid
                    && let Ok(uuid) = Uuid::parse_str(text)
                {
                    return Ok(DriverValue::Uuid(uuid));
                }
                Ok(DriverValue::Text(text.to_owned()))
            }
        }
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, SqlBridgeError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|err| {
        SqlBridgeError::CoercionError(format!("cannot coerce {text:?} to DATE: {err}"))
    })
}

fn parse_time(text: &str) -> Result<NaiveTime, SqlBridgeError> {
    NaiveTime::parse_from_str(text, "%H:%M:%S%.f").map_err(|err| {
        SqlBridgeError::CoercionError(format!("cannot coerce {text:?} to TIME: {err}"))
    })
}

fn parse_datetime(text: &str) -> Result<NaiveDateTime, SqlBridgeError> {
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }
    }
    Err(SqlBridgeError::CoercionError(format!(
        "cannot coerce {text:?} to TIMESTAMP"
    )))
}
