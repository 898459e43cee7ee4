//! Convenient imports for common functionality.
//!
//! Re-exports the types most callers need to issue statements through the
//! bridge.

pub use crate::codec::{Decoder, Encoder};
pub use crate::config::BridgeConfig;
pub use crate::driver::{
    BlobHandle, ColumnDescriptor, DriverConnection, DriverRows, DriverStatement, DriverValue,
    StatementKind,
};
pub use crate::error::{DriverError, SqlBridgeError};
pub use crate::executor::BridgeResponse;
pub use crate::results::{BridgeRow, ResultSet};
pub use crate::statement::{ExecOptions, OutParams};
pub use crate::types::{OutType, ParamValue, QueryAndParams, SqlType, SqlValue};
pub use crate::worker::{AsyncQueryExecutor, BridgeConnection};
