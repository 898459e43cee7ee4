use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::codec::{Decoder, Encoder};
use crate::config::BridgeConfig;
use crate::driver::DriverConnection;
use crate::error::SqlBridgeError;
use crate::executor::BridgeResponse;
use crate::statement::ExecOptions;
use crate::types::{ParamValue, QueryAndParams, SqlValue};

use super::channel::{BoxedCallback, Command};
use super::manager::BridgeWorker;

/// Async executor boundary for bridged connections.
#[async_trait]
pub trait AsyncQueryExecutor {
    /// Execute one parameterized statement and return the normalized
    /// response.
    async fn execute(
        &self,
        query: QueryAndParams,
        options: ExecOptions,
    ) -> Result<BridgeResponse, SqlBridgeError>;
}

/// Async handle to a blocking driver connection backed by a dedicated worker
/// thread.
///
/// Cloning shares the worker; all clones serialize onto the same connection.
/// Dropping the last clone shuts the worker down, which is also how a caller
/// cancels in-flight work: the driver's own interrupt behavior applies.
pub struct BridgeConnection<C: DriverConnection + 'static> {
    worker: Arc<BridgeWorker<C>>,
}

impl<C: DriverConnection + 'static> Clone for BridgeConnection<C> {
    fn clone(&self) -> Self {
        Self {
            worker: Arc::clone(&self.worker),
        }
    }
}

impl<C: DriverConnection + 'static> BridgeConnection<C> {
    /// Wrap a blocking driver connection, spawning its worker thread. The
    /// encoder is configured once here and shared by every execution.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBridgeError::ConnectionError`] if the worker thread
    /// cannot be spawned.
    pub fn new(conn: C, config: &BridgeConfig) -> Result<Self, SqlBridgeError> {
        let worker = BridgeWorker::spawn(conn, Encoder::from_config(config), Decoder)?;
        Ok(Self {
            worker: Arc::new(worker),
        })
    }

    /// Identifier of the worker thread backing this connection.
    #[must_use]
    pub fn worker_id(&self) -> u64 {
        self.worker.worker_id()
    }

    /// Execute one statement with explicit parameter roles and options.
    ///
    /// # Errors
    ///
    /// Propagates any [`SqlBridgeError`] from normalization, preparation,
    /// binding, or execution, plus channel failures if the worker is gone.
    pub async fn execute_statement(
        &self,
        sql: &str,
        params: Vec<ParamValue>,
        options: ExecOptions,
    ) -> Result<BridgeResponse, SqlBridgeError> {
        let sql = sql.to_owned();
        self.worker
            .request(
                |respond_to| Command::Execute {
                    sql,
                    params,
                    options,
                    respond_to,
                },
                "bridge worker dropped while executing statement",
            )
            .await
    }

    /// Convenience for pure-input statements: every value is tagged `In`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::execute_statement`].
    pub async fn execute_inputs(
        &self,
        sql: &str,
        inputs: Vec<SqlValue>,
    ) -> Result<BridgeResponse, SqlBridgeError> {
        self.execute_statement(
            sql,
            inputs.into_iter().map(ParamValue::In).collect(),
            ExecOptions::default(),
        )
        .await
    }

    /// Run synchronous logic against the worker-owned driver connection.
    ///
    /// # Errors
    ///
    /// Propagates errors from the callback and channel failures if the
    /// worker is gone.
    pub async fn with_connection<F, R>(&self, func: F) -> Result<R, SqlBridgeError>
    where
        F: FnOnce(&mut C) -> Result<R, SqlBridgeError> + Send + 'static,
        R: Send + 'static,
    {
        let callback: BoxedCallback<C> =
            Box::new(move |conn| func(conn).map(|value| Box::new(value) as Box<dyn Any + Send>));
        let boxed = self
            .worker
            .request(
                |respond_to| Command::WithConnection {
                    callback,
                    respond_to,
                },
                "bridge worker dropped while running connection callback",
            )
            .await?;
        boxed.downcast::<R>().map(|value| *value).map_err(|_| {
            SqlBridgeError::ExecutionError("unexpected connection callback response type".into())
        })
    }
}

#[async_trait]
impl<C: DriverConnection + 'static> AsyncQueryExecutor for BridgeConnection<C> {
    async fn execute(
        &self,
        query: QueryAndParams,
        options: ExecOptions,
    ) -> Result<BridgeResponse, SqlBridgeError> {
        self.execute_statement(&query.query, query.params, options)
            .await
    }
}
