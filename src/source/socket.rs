//! Raw `HCI_CHANNEL_MONITOR` socket backend.
//!
//! Grounded in the teacher's raw `AF_BLUETOOTH` socket backend
//! (`scanner/hci.rs`): the same `libc`-direct socket/bind/`AsyncFd` idiom,
//! generalized from `HCI_CHANNEL_RAW` + a BPF advertisement filter to the
//! monitor channel, which delivers already-delimited
//! `{opcode, index, len}` + payload records instead of raw LE advertising
//! reports.

use super::{MonitorSource, RECORD_CHANNEL_BUFFER_SIZE, SourceError};
use crate::monitor::MonitorRecord;
use libc::{AF_BLUETOOTH, SOCK_CLOEXEC, SOCK_RAW, c_int, sockaddr, socklen_t};
use std::future::Future;
use std::io;
use std::mem;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::pin::Pin;
use tokio::io::unix::AsyncFd;
use tokio::sync::mpsc;

const BTPROTO_HCI: c_int = 1;
const HCI_CHANNEL_MONITOR: u16 = 2;
const HCI_DEV_NONE: u16 = 0xffff;
const HEADER_SIZE: usize = 6;

#[repr(C)]
struct SockaddrHci {
    hci_family: u16,
    hci_dev: u16,
    hci_channel: u16,
}

fn open_monitor_socket() -> Result<OwnedFd, SourceError> {
    let fd = unsafe { libc::socket(AF_BLUETOOTH, SOCK_RAW | SOCK_CLOEXEC, BTPROTO_HCI) };
    if fd < 0 {
        return Err(SourceError::Open(format!(
            "failed to create HCI socket: {}",
            io::Error::last_os_error()
        )));
    }
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

fn bind_monitor_channel(fd: &OwnedFd) -> Result<(), SourceError> {
    let addr = SockaddrHci {
        hci_family: AF_BLUETOOTH as u16,
        hci_dev: HCI_DEV_NONE,
        hci_channel: HCI_CHANNEL_MONITOR,
    };

    let ret = unsafe {
        libc::bind(
            fd.as_raw_fd(),
            &addr as *const SockaddrHci as *const sockaddr,
            mem::size_of::<SockaddrHci>() as socklen_t,
        )
    };

    if ret < 0 {
        return Err(SourceError::Open(format!(
            "failed to bind monitor channel: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

fn parse_record(buf: &[u8]) -> Option<MonitorRecord> {
    if buf.len() < HEADER_SIZE {
        return None;
    }

    let opcode = u16::from_le_bytes([buf[0], buf[1]]);
    let index = u16::from_le_bytes([buf[2], buf[3]]);
    let len = u16::from_le_bytes([buf[4], buf[5]]) as usize;
    let data = buf.get(HEADER_SIZE..HEADER_SIZE + len)?.to_vec();

    Some(MonitorRecord { tv: None, index, opcode, data })
}

/// Live monitor-channel socket source. Requires `CAP_NET_RAW` (or root).
#[derive(Debug, Default, Clone, Copy)]
pub struct SocketSource;

impl MonitorSource for SocketSource {
    fn open(&self) -> Pin<Box<dyn Future<Output = Result<mpsc::Receiver<MonitorRecord>, SourceError>> + Send + '_>> {
        Box::pin(async move {
            let fd = open_monitor_socket()?;
            bind_monitor_channel(&fd)?;

            let async_fd = AsyncFd::new(fd).map_err(|e| SourceError::Open(format!("failed to register async fd: {e}")))?;

            let (tx, rx) = mpsc::channel(RECORD_CHANNEL_BUFFER_SIZE);

            tokio::spawn(async move {
                // HCI_MAX_FRAME_SIZE-ish bound; monitor records stay well under this.
                let mut buf = [0u8; 4096];

                loop {
                    let mut guard = match async_fd.readable().await {
                        Ok(guard) => guard,
                        Err(_) => break,
                    };

                    let n = match guard.try_io(|inner| {
                        let ret = unsafe {
                            libc::read(inner.as_raw_fd(), buf.as_mut_ptr() as *mut libc::c_void, buf.len())
                        };
                        if ret < 0 { Err(io::Error::last_os_error()) } else { Ok(ret as usize) }
                    }) {
                        Ok(Ok(n)) if n > 0 => n,
                        Ok(Ok(_)) => continue,
                        Ok(Err(_)) => break,
                        Err(_) => continue, // WouldBlock
                    };

                    if let Some(record) = parse_record(&buf[..n]) {
                        if tx.send(record).await.is_err() {
                            break;
                        }
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

    #[test]
    fn parse_record_reads_header_and_payload() {
        let mut buf = vec![2, 0, 0, 0, 3, 0]; // opcode=2, index=0, len=3
        buf.extend_from_slice(&[0xaa, 0xbb, 0xcc]);
        let record = parse_record(&buf).unwrap();
        assert_eq!(record.opcode, 2);
        assert_eq!(record.data, vec![0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn parse_record_rejects_truncated_payload() {
        let buf = vec![2, 0, 0, 0, 5, 0, 0xaa];
        assert!(parse_record(&buf).is_none());
    }
}
