//! The blocking driver contract.
//!
//! This is the lower boundary of the bridge: the operations a vendor driver
//! must expose so the marshaling layer can bind parameters, register output
//! parameters, and read results back. Every call here may block; the worker
//! module keeps these calls off async threads.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::error::DriverError;
use crate::types::SqlType;

/// How a statement should be prepared, chosen by the statement preparer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// Plain prepared statement.
    Plain,
    /// Prepared statement requesting auto-generated keys.
    ReturnGeneratedKeys,
    /// Prepared statement scoped to generated-key columns by ordinal.
    GeneratedKeyIndexes(Vec<i32>),
    /// Prepared statement scoped to generated-key columns by name.
    GeneratedKeyNames(Vec<String>),
    /// Callable statement (stored-procedure call with IN/OUT parameters).
    Callable,
}

/// Per-position metadata reported by the driver for a prepared statement.
///
/// Fetched lazily, at most once per position per execution; never cached
/// beyond one statement's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub sql_type: SqlType,
    pub nullable: Option<bool>,
    pub scale: Option<i32>,
}

impl ColumnDescriptor {
    #[must_use]
    pub fn of(sql_type: SqlType) -> Self {
        Self {
            sql_type,
            nullable: None,
            scale: None,
        }
    }
}

/// Opaque handle to a driver-side large object created through the
/// connection. Valid only for the statement execution that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobHandle(pub u64);

/// A driver-ready value: what the encoder produces and what the driver hands
/// back when reading rows, generated keys, or output parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Blob(BlobHandle),
    Array(Vec<DriverValue>),
}

/// A block of rows as the driver reports them.
#[derive(Debug, Clone, Default)]
pub struct DriverRows {
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<DriverValue>>,
}

/// A blocking driver connection.
///
/// Implementations own whatever vendor state backs the connection and must
/// release it in `Drop`.
pub trait DriverConnection: Send {
    type Statement: DriverStatement;

    /// Prepare a statement of the requested kind.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the vendor driver rejects the SQL or does
    /// not support the requested kind.
    fn prepare(&mut self, sql: &str, kind: &StatementKind)
    -> Result<Self::Statement, DriverError>;

    /// Create a large object on the connection and populate it with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the driver cannot allocate the object.
    fn create_blob(&mut self, bytes: &[u8]) -> Result<BlobHandle, DriverError>;
}

/// A prepared (or callable) statement handle.
///
/// Positions are 1-based, matching the placeholder numbering drivers expose.
/// Implementations must release vendor-side cursors and resources in `Drop`;
/// the bridge drops the handle on every exit path, including errors.
pub trait DriverStatement {
    /// Declared metadata for the placeholder at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if metadata is unavailable for the position.
    fn parameter_descriptor(&mut self, pos: usize) -> Result<ColumnDescriptor, DriverError>;

    /// Bind an input value at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the driver rejects the value.
    fn bind(&mut self, pos: usize, value: DriverValue) -> Result<(), DriverError>;

    /// Bind SQL NULL at `pos` with the given declared type.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the driver rejects the bind.
    fn bind_null(&mut self, pos: usize, sql_type: SqlType) -> Result<(), DriverError>;

    /// Register `pos` as an output parameter with a vendor type code.
    ///
    /// Only meaningful on callable statements. Some drivers require all
    /// registrations to happen before parameter metadata is queried.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the statement is not callable or the
    /// position is invalid.
    fn register_out_parameter(&mut self, pos: usize, vendor_code: i32)
    -> Result<(), DriverError>;

    /// Execute the statement. Returns `true` when a result set is available.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on any execution failure.
    fn execute(&mut self) -> Result<bool, DriverError>;

    /// The rows produced by the last execution.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if no result set is available.
    fn result_rows(&mut self) -> Result<DriverRows, DriverError>;

    /// Rows affected by the last execution (0 for pure queries).
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the driver cannot report a count.
    fn rows_affected(&mut self) -> Result<u64, DriverError>;

    /// Auto-generated keys from the last execution, when requested at
    /// preparation time.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if keys were not requested or are unavailable.
    fn generated_keys(&mut self) -> Result<DriverRows, DriverError>;

    /// Read back the value of a registered output parameter.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if `pos` was never registered.
    fn out_value(&mut self, pos: usize) -> Result<DriverValue, DriverError>;
}
