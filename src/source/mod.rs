//! Sources of monitor-channel records: a live `HCI_CHANNEL_MONITOR` socket or
//! a replay file, behind one injectable trait (teacher: `Scanner`).

#[cfg(feature = "socket")]
pub mod socket;

pub mod file;

use crate::monitor::MonitorRecord;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors opening or reading a monitor-record source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to open monitor source: {0}")]
    Open(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How many in-flight records the source-to-consumer channel can buffer
/// before the source backs off.
pub const RECORD_CHANNEL_BUFFER_SIZE: usize = 64;

/// Abstraction over "where monitor records come from", so the run loop can
/// be tested without a real socket or file on disk.
pub trait MonitorSource: Send + Sync {
    fn open(&self) -> Pin<Box<dyn Future<Output = Result<mpsc::Receiver<MonitorRecord>, SourceError>> + Send + '_>>;
}
