//! Core application runner (business logic) for `hci-dissector`.
//!
//! This module is intentionally decoupled from CLI parsing and process exit codes
//! so it can be tested deterministically.

use crate::filter::FilterMask;
use crate::monitor::{self, index::IndexTable};
use crate::output::PacketSink;
use crate::source::{MonitorSource, SourceError};
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration for the core run loop.
#[derive(Parser, Debug, Clone)]
#[command(author, about, version)]
pub struct Options {
    /// Replay a recorded monitor stream instead of reading the live
    /// `HCI_CHANNEL_MONITOR` socket.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Show the controller index in front of each record.
    #[arg(short = 'i', long = "index")]
    pub show_index: bool,

    /// Show the capture date in front of each record.
    #[arg(long = "date")]
    pub show_date: bool,

    /// Show the capture time in front of each record.
    #[arg(long = "time")]
    pub show_time: bool,

    /// Dump the payload of ACL data packets.
    #[arg(long = "acl-data")]
    pub acl_data: bool,

    /// Dump the payload of SCO data packets.
    #[arg(long = "sco-data")]
    pub sco_data: bool,

    /// Verbose output, print I/O errors to stderr as they occur.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Options {
    /// Build the [`FilterMask`] this invocation asked for.
    pub fn filter_mask(&self) -> FilterMask {
        let mut mask = FilterMask::empty();
        if self.show_index {
            mask = mask.union(FilterMask::SHOW_INDEX);
        }
        if self.show_date {
            mask = mask.union(FilterMask::SHOW_DATE);
        }
        if self.show_time {
            mask = mask.union(FilterMask::SHOW_TIME);
        }
        if self.acl_data {
            mask = mask.union(FilterMask::SHOW_ACL_DATA);
        }
        if self.sco_data {
            mask = mask.union(FilterMask::SHOW_SCO_DATA);
        }
        mask
    }
}

/// Errors returned by the core run loop.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Run the core processing loop: pull records from `source`, dissect each one
/// against a fresh [`IndexTable`], and write the rendered lines to `sink`.
pub async fn run_with_io(
    options: Options,
    source: &dyn MonitorSource,
    sink: &dyn PacketSink,
) -> Result<(), RunError> {
    let filter = options.filter_mask();
    let mut table = IndexTable::new();

    let mut records = source.open().await?;

    while let Some(record) = records.recv().await {
        let lines = monitor::dissect(&record, &mut table, filter);
        sink.write_record(&lines)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::MonitorRecord;
    use crate::test_utils::{RESET_COMMAND, RESET_COMMAND_COMPLETE, TEST_ADDR, new_index_payload, record};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    struct FakeSource {
        records: Mutex<Vec<MonitorRecord>>,
    }

    impl FakeSource {
        fn new(records: Vec<MonitorRecord>) -> Self {
            Self { records: Mutex::new(records) }
        }
    }

    impl MonitorSource for FakeSource {
        fn open(
            &self,
        ) -> Pin<Box<dyn Future<Output = Result<mpsc::Receiver<MonitorRecord>, SourceError>> + Send + '_>>
        {
            let records = self.records.lock().unwrap().clone();
            Box::pin(async move {
                let (tx, rx) = mpsc::channel(records.len().max(1));
                tokio::spawn(async move {
                    for r in records {
                        let _ = tx.send(r).await;
                    }
                });
                Ok(rx)
            })
        }
    }

    struct FakeSink {
        lines: Mutex<Vec<String>>,
    }

    impl FakeSink {
        fn new() -> Self {
            Self { lines: Mutex::new(Vec::new()) }
        }
    }

    impl PacketSink for FakeSink {
        fn write_record(&self, lines: &[String]) -> std::io::Result<()> {
            self.lines.lock().unwrap().extend_from_slice(lines);
            Ok(())
        }
    }

    fn base_options() -> Options {
        Options {
            file: None,
            show_index: false,
            show_date: false,
            show_time: false,
            acl_data: false,
            sco_data: false,
            verbose: false,
        }
    }

    #[tokio::test]
    async fn run_dissects_every_record_in_order() {
        let mut event = vec![0x0e, RESET_COMMAND_COMPLETE.len() as u8];
        event.extend_from_slice(&RESET_COMMAND_COMPLETE);

        let source = FakeSource::new(vec![record(2, 0, RESET_COMMAND.to_vec()), record(3, 0, event)]);
        let sink = FakeSink::new();

        run_with_io(base_options(), &source, &sink).await.unwrap();

        let lines = sink.lines.into_inner().unwrap();
        assert!(lines.iter().any(|l| l.contains("Reset")));
        assert!(lines.iter().any(|l| l.contains("Command Complete")));
    }

    #[tokio::test]
    async fn run_carries_index_table_across_records() {
        let new_index = new_index_payload(0x00, 0x00, TEST_ADDR, "hci0"); // BR/EDR, virtual

        let source = FakeSource::new(vec![record(0, 0, new_index), record(1, 0, Vec::new())]);
        let sink = FakeSink::new();

        let mut options = base_options();
        options.show_index = true;

        run_with_io(options, &source, &sink).await.unwrap();

        let lines = sink.lines.into_inner().unwrap();
        assert!(lines.iter().any(|l| l.contains("New Index")));
        assert!(lines.iter().any(|l| l.contains("Delete Index")));
    }
}
