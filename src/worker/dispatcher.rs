use std::sync::mpsc::Receiver;

use crate::codec::{Decoder, Encoder};
use crate::driver::DriverConnection;
use crate::executor::execute_blocking;

use super::channel::Command;

/// Worker loop: owns the blocking driver connection for its whole lifetime
/// and serializes every driver call onto this thread.
pub(super) fn run_bridge_worker<C: DriverConnection>(
    mut conn: C,
    encoder: &Encoder,
    decoder: &Decoder,
    receiver: &Receiver<Command<C>>,
) {
    while let Ok(command) = receiver.recv() {
        match command {
            Command::Shutdown => break,
            Command::Execute {
                sql,
                params,
                options,
                respond_to,
            } => {
                let _ = respond_to.send(execute_blocking(
                    &mut conn, &sql, &params, &options, encoder, decoder,
                ));
            }
            Command::WithConnection {
                callback,
                respond_to,
            } => {
                let _ = respond_to.send(callback(&mut conn));
            }
        }
    }
    tracing::debug!("bridge worker exiting");
}
