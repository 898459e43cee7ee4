use std::any::Any;

use tokio::sync::oneshot;

use crate::driver::DriverConnection;
use crate::error::SqlBridgeError;
use crate::executor::BridgeResponse;
use crate::statement::ExecOptions;
use crate::types::ParamValue;

pub(super) type BoxedResponse = Result<Box<dyn Any + Send>, SqlBridgeError>;
pub(super) type BoxedCallback<C> = Box<dyn FnOnce(&mut C) -> BoxedResponse + Send>;

pub(super) enum Command<C: DriverConnection> {
    Execute {
        sql: String,
        params: Vec<ParamValue>,
        options: ExecOptions,
        respond_to: oneshot::Sender<Result<BridgeResponse, SqlBridgeError>>,
    },
    WithConnection {
        callback: BoxedCallback<C>,
        respond_to: oneshot::Sender<BoxedResponse>,
    },
    Shutdown,
}
