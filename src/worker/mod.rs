// Worker module - moves blocking driver calls onto a dedicated thread
//
// One OS thread per driver connection; commands arrive over an mpsc channel
// and results return over tokio oneshot channels, so async callers never
// block on the driver.

mod channel;
mod connection;
mod dispatcher;
mod manager;

pub use connection::{AsyncQueryExecutor, BridgeConnection};
