//! Monitor-channel demultiplexer: dispatches `{timeval, index, opcode,
//! payload}` records to a dissector entry point or an index-lifecycle
//! handler, and owns the channel-header rendering policy.

pub mod index;

use crate::dissector;
use crate::filter::FilterMask;
use index::{Bus, ControllerType, IndexEntry, IndexTable};

/// Which channel a record arrived on — controls the bracket style of the
/// optional index prefix (`{hciN}` vs `[hciN]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Control,
    Monitor,
}

/// Monitor-channel record opcode, identifying what kind of record follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOpcode {
    NewIndex,
    DelIndex,
    CommandPkt,
    EventPkt,
    AclTxPkt,
    AclRxPkt,
    ScoTxPkt,
    ScoRxPkt,
    Unknown(u16),
}

impl MonitorOpcode {
    pub fn from_raw(value: u16) -> Self {
        match value {
            0 => MonitorOpcode::NewIndex,
            1 => MonitorOpcode::DelIndex,
            2 => MonitorOpcode::CommandPkt,
            3 => MonitorOpcode::EventPkt,
            4 => MonitorOpcode::AclTxPkt,
            5 => MonitorOpcode::AclRxPkt,
            6 => MonitorOpcode::ScoTxPkt,
            7 => MonitorOpcode::ScoRxPkt,
            other => MonitorOpcode::Unknown(other),
        }
    }
}

/// The 2-bit flag representation some capture formats use in place of the
/// monitor opcode numbering. Grounded on bluez's `packet_get_flags`.
pub fn flags_of(opcode: MonitorOpcode) -> u8 {
    match opcode {
        MonitorOpcode::CommandPkt => 0x02,
        MonitorOpcode::EventPkt => 0x03,
        MonitorOpcode::AclTxPkt => 0x00,
        MonitorOpcode::AclRxPkt => 0x01,
        _ => 0xff,
    }
}

/// The inverse of [`flags_of`]: bit 1 selects the event/command family, bit 0
/// selects the RX/TX direction. Grounded on bluez's `packet_get_opcode`.
pub fn opcode_of(flags: u8) -> MonitorOpcode {
    match (flags & 0x02 != 0, flags & 0x01 != 0) {
        (true, true) => MonitorOpcode::EventPkt,
        (true, false) => MonitorOpcode::CommandPkt,
        (false, true) => MonitorOpcode::AclRxPkt,
        (false, false) => MonitorOpcode::AclTxPkt,
    }
}

/// A wall-clock timestamp, independent of any particular clock source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeVal {
    pub sec: i64,
    pub usec: i64,
}

/// One demultiplexed monitor-channel record, ready for dissection.
#[derive(Debug, Clone)]
pub struct MonitorRecord {
    pub tv: Option<TimeVal>,
    pub index: u16,
    pub opcode: u16,
    pub data: Vec<u8>,
}

const NEW_INDEX_SIZE: usize = 1 + 1 + 6 + 8; // type, bus, bdaddr, name[8]

/// Civil (year, month, day) from a count of days since the Unix epoch,
/// proleptic Gregorian calendar. Howard Hinnant's `civil_from_days`.
///
/// We render in UTC rather than local time: unlike bluez's `localtime_r`
/// call, nothing in this crate carries a timezone database.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097); // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32; // [1, 12]
    (if m <= 2 { y + 1 } else { y }, m, d)
}

fn format_date(sec: i64) -> String {
    let (y, m, d) = civil_from_days(sec.div_euclid(86_400));
    format!("{y:04}-{m:02}-{d:02} ")
}

fn channel_header(record: &MonitorRecord, channel: ChannelKind, filter: FilterMask) -> String {
    let mut header = String::new();

    if filter.contains(FilterMask::SHOW_INDEX) {
        match channel {
            ChannelKind::Control => header.push_str(&format!("{{hci{}}} ", record.index)),
            ChannelKind::Monitor => header.push_str(&format!("[hci{}] ", record.index)),
        }
    }

    if let Some(tv) = record.tv {
        if filter.contains(FilterMask::SHOW_DATE) {
            header.push_str(&format_date(tv.sec));
        }
        if filter.contains(FilterMask::SHOW_TIME) {
            header.push_str(&format!("{:02}:{:02}:{:02}.{:06} ", (tv.sec / 3600) % 24, (tv.sec / 60) % 60, tv.sec % 60, tv.usec));
        }
    }

    header
}

fn new_index(record: &MonitorRecord, table: &mut IndexTable, filter: FilterMask) -> Vec<String> {
    if record.data.len() < NEW_INDEX_SIZE {
        return vec!["* Malformed New Index record".to_string()];
    }

    let controller_type = ControllerType::from_raw(record.data[0]);
    let bus = Bus::from_raw(record.data[1]);
    let address = crate::addr::BdAddr::from_slice(&record.data[2..8]);
    let name_end = record.data[8..16].iter().position(|&b| b == 0).map(|p| 8 + p).unwrap_or(16);
    let name = String::from_utf8_lossy(&record.data[8..name_end]).into_owned();

    table.insert(record.index, IndexEntry { controller_type, bus, address });

    let mut header = channel_header(record, ChannelKind::Monitor, filter);
    header.push_str(&format!(
        "= New Index: {address} ({},{},{name})",
        controller_type.name(),
        bus.name()
    ));
    vec![header]
}

fn del_index(record: &MonitorRecord, table: &IndexTable, filter: FilterMask) -> Vec<String> {
    let address = table.address_of(record.index);
    let mut header = channel_header(record, ChannelKind::Monitor, filter);
    header.push_str(&format!("= Delete Index: {address}"));
    vec![header]
}

/// Dissect one monitor-channel record, dispatching to the HCI dissector or
/// an index-lifecycle handler as appropriate.
pub fn dissect(record: &MonitorRecord, table: &mut IndexTable, filter: FilterMask) -> Vec<String> {
    let opcode = MonitorOpcode::from_raw(record.opcode);

    match opcode {
        MonitorOpcode::NewIndex => new_index(record, table, filter),
        MonitorOpcode::DelIndex => del_index(record, table, filter),
        MonitorOpcode::CommandPkt | MonitorOpcode::EventPkt | MonitorOpcode::AclTxPkt | MonitorOpcode::AclRxPkt
        | MonitorOpcode::ScoTxPkt | MonitorOpcode::ScoRxPkt => {
            let mut header = channel_header(record, ChannelKind::Monitor, filter);
            let body = match opcode {
                MonitorOpcode::CommandPkt => dissector::command_packet(&record.data),
                MonitorOpcode::EventPkt => dissector::event_packet(&record.data, filter),
                MonitorOpcode::AclTxPkt => dissector::acl_data(&record.data, false, filter),
                MonitorOpcode::AclRxPkt => dissector::acl_data(&record.data, true, filter),
                MonitorOpcode::ScoTxPkt => dissector::sco_data(&record.data, false, filter),
                MonitorOpcode::ScoRxPkt => dissector::sco_data(&record.data, true, filter),
                _ => unreachable!(),
            };
            let mut lines = body;
            if let Some(first) = lines.first_mut() {
                header.push_str(first);
                *first = header;
            } else {
                lines.push(header);
            }
            lines
        }
        MonitorOpcode::Unknown(code) => {
            let mut header = channel_header(record, ChannelKind::Monitor, filter);
            header.push_str(&format!("* Unknown packet (code {code} len {})", record.data.len()));
            let mut lines = vec![header];
            lines.extend(crate::field::hexdump(&record.data));
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RESET_COMMAND, TEST_ADDR, new_index_payload, record};

    #[test]
    fn command_record_dissects_through_to_hci_layer() {
        let mut table = IndexTable::new();
        let lines = dissect(&record(2, 0, RESET_COMMAND.to_vec()), &mut table, FilterMask::empty());
        assert!(lines[0].starts_with("< HCI Command: Reset"));
    }

    #[test]
    fn new_index_registers_address_for_later_del_index() {
        let mut table = IndexTable::new();
        let data = new_index_payload(0x00, 0x01, TEST_ADDR, "hci0"); // BR/EDR, USB

        let lines = dissect(&record(0, 0, data), &mut table, FilterMask::empty());
        assert!(lines[0].contains("New Index"));
        assert!(lines[0].contains("BR/EDR"));
        assert!(lines[0].contains("USB"));

        let del_lines = dissect(&record(1, 0, Vec::new()), &mut table, FilterMask::empty());
        assert!(del_lines[0].contains(&TEST_ADDR.to_string()));
    }

    #[test]
    fn index_prefix_only_shown_when_filter_set() {
        let mut table = IndexTable::new();
        let data = RESET_COMMAND.to_vec();
        let hidden = dissect(&record(2, 3, data.clone()), &mut table, FilterMask::empty());
        assert!(!hidden[0].starts_with('['));

        let shown = dissect(&record(2, 3, data), &mut table, FilterMask::SHOW_INDEX);
        assert!(shown[0].starts_with("[hci3] "));
    }

    #[test]
    fn unknown_opcode_hexdumps_the_whole_record() {
        let mut table = IndexTable::new();
        let lines = dissect(&record(99, 0, vec![0xaa, 0xbb]), &mut table, FilterMask::empty());
        assert!(lines[0].contains("Unknown packet"));
        assert!(lines[1].contains("aa bb"));
    }

    #[test]
    fn flags_of_matches_bluez_packet_get_flags() {
        assert_eq!(flags_of(MonitorOpcode::CommandPkt), 0x02);
        assert_eq!(flags_of(MonitorOpcode::EventPkt), 0x03);
        assert_eq!(flags_of(MonitorOpcode::AclTxPkt), 0x00);
        assert_eq!(flags_of(MonitorOpcode::AclRxPkt), 0x01);
        assert_eq!(flags_of(MonitorOpcode::NewIndex), 0xff);
        assert_eq!(flags_of(MonitorOpcode::ScoTxPkt), 0xff);
    }

    #[test]
    fn flags_and_opcode_round_trip() {
        for f in [0x00u8, 0x01, 0x02, 0x03] {
            assert_eq!(flags_of(opcode_of(f)), f);
        }
        for o in [MonitorOpcode::CommandPkt, MonitorOpcode::EventPkt, MonitorOpcode::AclTxPkt, MonitorOpcode::AclRxPkt] {
            assert_eq!(opcode_of(flags_of(o)), o);
        }
    }

    #[test]
    fn date_filter_renders_a_civil_date() {
        let mut table = IndexTable::new();
        let mut rec = record(2, 0, RESET_COMMAND.to_vec());
        rec.tv = Some(TimeVal { sec: 1_700_000_000, usec: 0 }); // 2023-11-14 22:13:20 UTC
        let lines = dissect(&rec, &mut table, FilterMask::SHOW_DATE);
        assert!(lines[0].starts_with("2023-11-14 "));
    }
}
