use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;

use tokio::sync::oneshot;

use crate::codec::{Decoder, Encoder};
use crate::driver::DriverConnection;
use crate::error::SqlBridgeError;

use super::channel::Command;
use super::dispatcher::run_bridge_worker;

static NEXT_WORKER_ID: AtomicU64 = AtomicU64::new(1);

pub(super) struct BridgeWorker<C: DriverConnection + 'static> {
    sender: Sender<Command<C>>,
    worker_id: u64,
}

impl<C: DriverConnection + 'static> BridgeWorker<C> {
    pub(super) fn spawn(
        conn: C,
        encoder: Encoder,
        decoder: Decoder,
    ) -> Result<Self, SqlBridgeError> {
        let (sender, receiver) = mpsc::channel::<Command<C>>();
        let worker_id = NEXT_WORKER_ID.fetch_add(1, Ordering::Relaxed);
        thread::Builder::new()
            .name(format!("sql-bridge-worker-{worker_id}"))
            .spawn(move || {
                run_bridge_worker(conn, &encoder, &decoder, &receiver);
            })
            .map_err(|err| {
                SqlBridgeError::ConnectionError(format!(
                    "failed to spawn bridge worker thread: {err}"
                ))
            })?;

        Ok(Self { sender, worker_id })
    }

    pub(super) fn worker_id(&self) -> u64 {
        self.worker_id
    }

    pub(super) fn send_command(&self, command: Command<C>) -> Result<(), SqlBridgeError> {
        self.sender
            .send(command)
            .map_err(|_| SqlBridgeError::ConnectionError("bridge worker closed".into()))
    }

    pub(super) async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, SqlBridgeError>>) -> Command<C>,
        drop_message: &'static str,
    ) -> Result<T, SqlBridgeError> {
        let (tx, rx) = oneshot::channel();
        self.send_command(build(tx))?;
        rx.await
            .map_err(|_| SqlBridgeError::ConnectionError(drop_message.into()))?
    }
}

impl<C: DriverConnection + 'static> Drop for BridgeWorker<C> {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
    }
}
