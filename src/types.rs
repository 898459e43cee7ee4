use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SqlBridgeError;

/// Values that can be stored in a database row or used as query parameters.
///
/// A closed sum over every shape the loosely-typed client boundary can carry,
/// so the encoder can match exhaustively instead of inspecting types at
/// runtime:
/// ```rust
/// use sql_bridge::prelude::*;
///
/// let params = vec![
///     SqlValue::Int(1),
///     SqlValue::Text("alice".into()),
///     SqlValue::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Timestamp value (date + time, no zone)
    Timestamp(NaiveDateTime),
    /// Calendar date value
    Date(NaiveDate),
    /// Time-of-day value
    Time(NaiveTime),
    /// Binary data
    Blob(Vec<u8>),
    /// UUID value
    Uuid(Uuid),
    /// Nested array of values
    Array(Vec<SqlValue>),
}

impl SqlValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let SqlValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let SqlValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let SqlValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlValue::Bool(value) => Some(*value),
            SqlValue::Int(0) => Some(false),
            SqlValue::Int(1) => Some(true),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let SqlValue::Timestamp(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        if let SqlValue::Date(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_time(&self) -> Option<NaiveTime> {
        if let SqlValue::Time(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let SqlValue::Blob(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        if let SqlValue::Uuid(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

/// Declared SQL type of a statement parameter or result column.
///
/// A subset of the standard generic type codes; `vendor_code` yields the
/// conventional numeric constant so the registry can talk to drivers that
/// only accept raw integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    Null,
    Bit,
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Float,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    LongVarchar,
    Date,
    Time,
    Timestamp,
    Binary,
    VarBinary,
    LongVarBinary,
    Blob,
    Clob,
    Array,
    Other,
}

impl SqlType {
    /// The conventional numeric type code for this SQL type.
    #[must_use]
    pub fn vendor_code(self) -> i32 {
        match self {
            SqlType::Null => 0,
            SqlType::Bit => -7,
            SqlType::Boolean => 16,
            SqlType::TinyInt => -6,
            SqlType::SmallInt => 5,
            SqlType::Integer => 4,
            SqlType::BigInt => -5,
            SqlType::Real => 7,
            SqlType::Float => 6,
            SqlType::Double => 8,
            SqlType::Numeric => 2,
            SqlType::Decimal => 3,
            SqlType::Char => 1,
            SqlType::Varchar => 12,
            SqlType::LongVarchar => -1,
            SqlType::Date => 91,
            SqlType::Time => 92,
            SqlType::Timestamp => 93,
            SqlType::Binary => -2,
            SqlType::VarBinary => -3,
            SqlType::LongVarBinary => -4,
            SqlType::Blob => 2004,
            SqlType::Clob => 2005,
            SqlType::Array => 2003,
            SqlType::Other => 1111,
        }
    }

    /// Parse an uppercase SQL type name, e.g. `"VARCHAR"` or `"TIMESTAMP"`.
    ///
    /// # Errors
    ///
    /// Returns `SqlBridgeError::ParameterError` for names outside the
    /// supported set.
    pub fn from_name(name: &str) -> Result<Self, SqlBridgeError> {
        let ty = match name {
            "NULL" => SqlType::Null,
            "BIT" => SqlType::Bit,
            "BOOLEAN" => SqlType::Boolean,
            "TINYINT" => SqlType::TinyInt,
            "SMALLINT" => SqlType::SmallInt,
            "INTEGER" => SqlType::Integer,
            "BIGINT" => SqlType::BigInt,
            "REAL" => SqlType::Real,
            "FLOAT" => SqlType::Float,
            "DOUBLE" => SqlType::Double,
            "NUMERIC" => SqlType::Numeric,
            "DECIMAL" => SqlType::Decimal,
            "CHAR" => SqlType::Char,
            "VARCHAR" => SqlType::Varchar,
            "LONGVARCHAR" => SqlType::LongVarchar,
            "DATE" => SqlType::Date,
            "TIME" => SqlType::Time,
            "TIMESTAMP" => SqlType::Timestamp,
            "BINARY" => SqlType::Binary,
            "VARBINARY" => SqlType::VarBinary,
            "LONGVARBINARY" => SqlType::LongVarBinary,
            "BLOB" => SqlType::Blob,
            "CLOB" => SqlType::Clob,
            "ARRAY" => SqlType::Array,
            "OTHER" => SqlType::Other,
            other => {
                return Err(SqlBridgeError::ParameterError(format!(
                    "unknown SQL type name: {other}"
                )));
            }
        };
        Ok(ty)
    }
}

/// Declared type of an output parameter.
///
/// Drivers with non-standard type systems (e.g. Oracle cursors) are addressed
/// with a raw vendor integer instead of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutType {
    /// A named standard SQL type.
    Named(SqlType),
    /// A raw vendor-specific type code.
    Vendor(i32),
}

impl OutType {
    /// The numeric code handed to the driver when registering the parameter.
    #[must_use]
    pub fn vendor_code(self) -> i32 {
        match self {
            OutType::Named(ty) => ty.vendor_code(),
            OutType::Vendor(code) => code,
        }
    }

    /// Parse a dynamic out-type marker: a type-name string or a raw numeric
    /// code, matching what loosely-typed callers send.
    ///
    /// # Errors
    ///
    /// Returns `SqlBridgeError::ParameterError` if the name is unknown.
    pub fn from_name_or_code(marker: &serde_json::Value) -> Result<Option<Self>, SqlBridgeError> {
        match marker {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(name) => Ok(Some(OutType::Named(SqlType::from_name(name)?))),
            serde_json::Value::Number(num) => {
                let code = num.as_i64().ok_or_else(|| {
                    SqlBridgeError::ParameterError(format!("non-integer out-type code: {num}"))
                })?;
                Ok(Some(OutType::Vendor(
                    i32::try_from(code).map_err(|_| {
                        SqlBridgeError::ParameterError(format!("out-type code out of range: {code}"))
                    })?,
                )))
            }
            other => Err(SqlBridgeError::ParameterError(format!(
                "invalid out-type marker: {other}"
            ))),
        }
    }
}

impl From<SqlType> for OutType {
    fn from(ty: SqlType) -> Self {
        OutType::Named(ty)
    }
}

/// The role a parameter plays in a statement, tagged explicitly.
///
/// Inferring the role from value nullability is fragile (a legitimate NULL
/// input is indistinguishable from "no input"), so the boundary carries the
/// role alongside the value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Pure input: bound with a value before execution.
    In(SqlValue),
    /// Pure output: registered, read back after execution, never bound.
    Out(OutType),
    /// Combined IN/OUT: bound as input and registered as output.
    InOut(SqlValue, OutType),
}

impl ParamValue {
    #[must_use]
    pub fn input(&self) -> Option<&SqlValue> {
        match self {
            ParamValue::In(value) | ParamValue::InOut(value, _) => Some(value),
            ParamValue::Out(_) => None,
        }
    }

    #[must_use]
    pub fn out_type(&self) -> Option<OutType> {
        match self {
            ParamValue::Out(ty) | ParamValue::InOut(_, ty) => Some(*ty),
            ParamValue::In(_) => None,
        }
    }
}

/// A query and its parameters bundled together.
#[derive(Debug, Clone)]
pub struct QueryAndParams {
    /// The SQL text
    pub query: String,
    /// The parameters to bind or register, one per placeholder
    pub params: Vec<ParamValue>,
}

impl QueryAndParams {
    pub fn new(query: impl Into<String>, params: Vec<ParamValue>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }

    /// Wrap a plain input sequence, tagging every value as `In`.
    pub fn with_inputs(query: impl Into<String>, inputs: Vec<SqlValue>) -> Self {
        Self {
            query: query.into(),
            params: inputs.into_iter().map(ParamValue::In).collect(),
        }
    }

    /// Build tagged parameters from the loose two-sequence callable form:
    /// an input sequence and an out-type sequence, the longer one deciding the
    /// parameter count. A NULL input means "no input at this position";
    /// positions with neither an input nor an out type become `In(Null)`.
    pub fn from_sequences(
        query: impl Into<String>,
        inputs: Vec<SqlValue>,
        out_types: Vec<Option<OutType>>,
    ) -> Self {
        let max = inputs.len().max(out_types.len());
        let mut inputs = inputs.into_iter();
        let mut out_types = out_types.into_iter();
        let mut params = Vec::with_capacity(max);
        for _ in 0..max {
            let input = inputs.next().filter(|value| !value.is_null());
            let out = out_types.next().flatten();
            let param = match (input, out) {
                (Some(value), Some(ty)) => ParamValue::InOut(value, ty),
                (Some(value), None) => ParamValue::In(value),
                (None, Some(ty)) => ParamValue::Out(ty),
                (None, None) => ParamValue::In(SqlValue::Null),
            };
            params.push(param);
        }
        Self {
            query: query.into(),
            params,
        }
    }
}
