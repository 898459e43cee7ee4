//! Async adapter for blocking, thread-per-call SQL drivers.
//!
//! The bridge sits between a loosely-typed async client API and a vendor
//! driver's statically-typed parameter and column model. It coerces values to
//! the driver-declared parameter types, tracks IN/OUT parameters for callable
//! (stored-procedure) statements, selects the right prepared-statement
//! variant for generated-key extraction, and runs every blocking driver call
//! on a dedicated worker thread.

pub mod codec;
pub mod config;
pub mod driver;
pub mod error;
pub mod executor;
pub mod results;
pub mod statement;
pub mod types;
pub mod worker;

pub mod prelude;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use codec::{Decoder, Encoder};
pub use config::BridgeConfig;
pub use error::{DriverError, SqlBridgeError};
pub use executor::{BridgeResponse, execute_blocking};
pub use results::{BridgeRow, ResultSet};
pub use statement::{ExecOptions, OutParams};
pub use types::{OutType, ParamValue, QueryAndParams, SqlType, SqlValue};
pub use worker::{AsyncQueryExecutor, BridgeConnection};
