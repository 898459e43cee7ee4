use std::fmt;

use thiserror::Error;

/// Failure reported by the underlying vendor driver.
///
/// Carries the driver's message plus the optional SQLSTATE and vendor error
/// code most drivers expose. The bridge wraps and propagates these unchanged
/// in kind; it never retries or suppresses them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct DriverError {
    pub message: String,
    pub sqlstate: Option<String>,
    pub vendor_code: Option<i32>,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sqlstate: None,
            vendor_code: None,
        }
    }

    #[must_use]
    pub fn with_sqlstate(mut self, sqlstate: impl Into<String>) -> Self {
        self.sqlstate = Some(sqlstate.into());
        self
    }

    #[must_use]
    pub fn with_vendor_code(mut self, code: i32) -> Self {
        self.vendor_code = Some(code);
        self
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(state) = &self.sqlstate {
            write!(f, " (sqlstate {state})")?;
        }
        if let Some(code) = self.vendor_code {
            write!(f, " (vendor code {code})")?;
        }
        Ok(())
    }
}

/// Errors produced by the bridge layer.
#[derive(Debug, Error)]
pub enum SqlBridgeError {
    #[error(transparent)]
    DriverError(#[from] DriverError),

    #[error("Coercion error: {0}")]
    CoercionError(String),

    #[error("Generated keys error: {0}")]
    GeneratedKeysError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}
