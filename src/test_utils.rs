//! Shared fixtures for unit tests across the crate.

use crate::addr::BdAddr;
use crate::monitor::MonitorRecord;

/// A stable controller address for unit tests.
pub const TEST_ADDR: BdAddr = BdAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

/// Raw bytes of an HCI `Reset` command (OGF 3, OCF 3) with an empty parameter block.
pub const RESET_COMMAND: [u8; 3] = [0x03, 0x0c, 0x00];

/// Raw bytes of a `Command Complete` event reporting `Reset` succeeded, `ncmd` 1.
pub const RESET_COMMAND_COMPLETE: [u8; 4] = [0x01, 0x03, 0x0c, 0x00];

/// Build a monitor-channel record with no timestamp, the given opcode/index/payload.
pub fn record(opcode: u16, index: u16, data: Vec<u8>) -> MonitorRecord {
    MonitorRecord { tv: None, index, opcode, data }
}

/// Build a `New Index` record payload: `{type, bus, bdaddr, name[8]}`.
pub fn new_index_payload(controller_type: u8, bus: u8, address: BdAddr, name: &str) -> Vec<u8> {
    let mut data = vec![controller_type, bus];
    data.extend_from_slice(&address.0);
    let mut name_field = [0u8; 8];
    let bytes = name.as_bytes();
    let len = bytes.len().min(8);
    name_field[..len].copy_from_slice(&bytes[..len]);
    data.extend_from_slice(&name_field);
    data
}
