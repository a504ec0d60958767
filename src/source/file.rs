//! Replay a monitor record stream previously captured to a file.
//!
//! Records are stored back-to-back in the same header-plus-body shape the
//! live monitor socket delivers: `{opcode:16LE, index:16LE, len:16LE}`
//! followed by `len` bytes of payload. This is an enrichment over the
//! distilled spec (which only discusses a live channel) so recorded traffic
//! can be dissected without Bluetooth hardware.

use super::{MonitorSource, RECORD_CHANNEL_BUFFER_SIZE, SourceError};
use crate::monitor::MonitorRecord;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

const HEADER_SIZE: usize = 6;

async fn read_record(file: &mut File) -> std::io::Result<Option<MonitorRecord>> {
    let mut header = [0u8; HEADER_SIZE];
    match file.read_exact(&mut header).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let opcode = u16::from_le_bytes([header[0], header[1]]);
    let index = u16::from_le_bytes([header[2], header[3]]);
    let len = u16::from_le_bytes([header[4], header[5]]) as usize;

    let mut data = vec![0u8; len];
    file.read_exact(&mut data).await?;

    Ok(Some(MonitorRecord { tv: None, index, opcode, data }))
}

/// Replays a recording from disk as a [`MonitorSource`].
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MonitorSource for FileSource {
    fn open(&self) -> Pin<Box<dyn Future<Output = Result<mpsc::Receiver<MonitorRecord>, SourceError>> + Send + '_>> {
        Box::pin(async move {
            let mut file = File::open(&self.path)
                .await
                .map_err(|e| SourceError::Open(format!("{}: {e}", self.path.display())))?;

            let (tx, rx) = mpsc::channel(RECORD_CHANNEL_BUFFER_SIZE);

            tokio::spawn(async move {
                loop {
                    match read_record(&mut file).await {
                        Ok(Some(record)) => {
                            if tx.send(record).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => break,
                        Err(_) => break,
                    }
                }
            });

            Ok(rx)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_record(buf: &mut Vec<u8>, opcode: u16, index: u16, data: &[u8]) {
        buf.extend_from_slice(&opcode.to_le_bytes());
        buf.extend_from_slice(&index.to_le_bytes());
        buf.extend_from_slice(&(data.len() as u16).to_le_bytes());
        buf.extend_from_slice(data);
    }

    #[tokio::test]
    async fn replays_every_record_in_order() {
        let mut bytes = Vec::new();
        write_record(&mut bytes, 2, 0, &[0x03, 0x0c, 0x00]);
        write_record(&mut bytes, 3, 0, &[0x0e, 0x04, 0x01, 0x03, 0x0c, 0x00]);

        let dir = std::env::temp_dir();
        let path = dir.join(format!("hci-dissector-test-{:p}.bin", &bytes));
        std::fs::File::create(&path).unwrap().write_all(&bytes).unwrap();

        let source = FileSource::new(&path);
        let mut rx = source.open().await.unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.opcode, 2);
        let second = rx.recv().await.unwrap();
        assert_eq!(second.opcode, 3);
        assert!(rx.recv().await.is_none());

        let _ = std::fs::remove_file(&path);
    }
}
