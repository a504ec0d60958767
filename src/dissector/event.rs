//! HCI event codes and their decoders, including the special-cased Command
//! Complete / Command Status / LE Meta Event dispatchers.

use super::opcode::{self, Opcode};
use super::size::SizeRule;
use super::subevent;
use super::u16_le;
use crate::addr::BdAddr;
use crate::field;
use crate::filter::FilterMask;

type EventDecoder = fn(&[u8], FilterMask) -> Vec<String>;

/// A single HCI event code: name plus optional decoder/size rule.
pub struct EventDescriptor {
    pub event: u8,
    pub name: &'static str,
    pub decoder: Option<(EventDecoder, SizeRule)>,
}

/// Find the descriptor for `event`, if the table knows it.
pub fn lookup(event: u8) -> Option<&'static EventDescriptor> {
    EVENT_TABLE.iter().find(|d| d.event == event)
}

fn null_evt(_data: &[u8], _filter: FilterMask) -> Vec<String> {
    Vec::new()
}

fn status_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::status(data[0])]
}

/// Command Complete: `{ncmd:8, opcode:16LE, return_params...}`, dispatching
/// to the originating command's response decoder.
fn cmd_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    let ncmd = data[0];
    let opcode_value = u16_le(data, 1);
    let opcode = Opcode(opcode_value);
    let params = &data[3..];

    let descriptor = opcode::lookup(opcode_value);
    let name = descriptor.map(|d| d.name).unwrap_or("Unknown");

    let mut lines = vec![format!(
        "            {name} (0x{:02x}|0x{:04x}) ncmd {ncmd}",
        opcode.ogf(),
        opcode.ocf()
    )];

    match descriptor.and_then(|d| d.rsp) {
        None => lines.extend(field::hexdump(params)),
        Some((decode, rule)) => lines.extend(super::apply_size_rule(rule, params, decode)),
    }

    lines
}

/// Command Status: `{status:8, ncmd:8, opcode:16LE}` — no return parameters,
/// since the command is still in flight.
fn cmd_status_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    let status = data[0];
    let ncmd = data[1];
    let opcode_value = u16_le(data, 2);
    let opcode = Opcode(opcode_value);
    let name = opcode::lookup(opcode_value).map(|d| d.name).unwrap_or("Unknown");

    vec![
        field::status(status),
        format!(
            "            {name} (0x{:02x}|0x{:04x}) ncmd {ncmd}",
            opcode.ogf(),
            opcode.ocf()
        ),
    ]
}

/// LE Meta Event: `{subevent:8, ...}`, dispatching into the subevent table.
fn le_meta_event_evt(data: &[u8], filter: FilterMask) -> Vec<String> {
    let subevent_code = data[0];
    let params = &data[1..];

    let descriptor = subevent::lookup(subevent_code);
    let name = descriptor.map(|d| d.name).unwrap_or("Unknown");

    let mut lines = vec![format!("            LE Subevent: {name} (0x{subevent_code:02x})")];

    match descriptor.and_then(|d| d.decoder) {
        None => lines.extend(field::hexdump(params)),
        Some((decode, rule)) => lines.extend(super::apply_size_rule(rule, params, |p| decode(p, filter))),
    }

    lines
}

fn inquiry_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::status(data[0])]
}

fn inquiry_result_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    let num_responses = data[0] as usize;
    let mut lines = vec![field::num_responses(data[0])];
    for i in 0..num_responses {
        let addr_off = 1 + i * 6;
        lines.push(field::address(BdAddr::from_slice(&data[addr_off..addr_off + 6])));
    }
    lines
}

fn conn_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![
        field::status(data[0]),
        field::handle(u16_le(data, 1)),
        field::address(BdAddr::from_slice(&data[3..9])),
        field::link_type(data[9]),
        field::encr_mode(data[10]),
    ]
}

fn conn_request_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![
        field::address(BdAddr::from_slice(&data[0..6])),
        field::class_of_device([data[6], data[7], data[8]]),
        field::link_type(data[9]),
    ]
}

fn disconn_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::status(data[0]), field::handle(u16_le(data, 1)), field::reason(data[3])]
}

fn auth_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::status(data[0]), field::handle(u16_le(data, 1))]
}

fn change_conn_link_key_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::status(data[0]), field::handle(u16_le(data, 1))]
}

fn remote_name_req_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![
        field::status(data[0]),
        field::address(BdAddr::from_slice(&data[1..7])),
        field::name(&data[7..]),
    ]
}

fn encrypt_change_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::status(data[0]), field::handle(u16_le(data, 1)), field::encr_mode(data[3])]
}

fn read_remote_features_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    let mut bitmap = [0u8; 8];
    bitmap.copy_from_slice(&data[3..11]);
    vec![field::status(data[0]), field::handle(u16_le(data, 1)), field::features(&bitmap)]
}

fn read_remote_version_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![
        field::status(data[0]),
        field::handle(u16_le(data, 1)),
        field::lmp_version(data[3], u16_le(data, 4)),
        field::manufacturer(u16_le(data, 6)),
    ]
}

fn hardware_error_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![format!("            Code: 0x{:02x}", data[0])]
}

fn role_change_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![
        field::status(data[0]),
        field::address(BdAddr::from_slice(&data[1..7])),
        field::role(data[7]),
    ]
}

fn mode_change_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![
        field::status(data[0]),
        field::handle(u16_le(data, 1)),
        format!("            Mode: 0x{:02x}", data[3]),
        field::clock_offset(u16_le(data, 4)),
    ]
}

fn pin_code_request_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::address(BdAddr::from_slice(data))]
}

fn link_key_request_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::address(BdAddr::from_slice(data))]
}

fn link_key_notify_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    let mut lines = vec![field::address(BdAddr::from_slice(&data[0..6])), field::key_flag(data[22])];
    lines.extend(field::hexdump(&data[6..22]));
    lines
}

fn data_buffer_overflow_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::link_type(data[0])]
}

fn max_slots_change_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::handle(u16_le(data, 0)), format!("            Max slots: {}", data[2])]
}

fn conn_packet_type_changed_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::status(data[0]), field::handle(u16_le(data, 1)), field::packet_type(u16_le(data, 3))]
}

fn pscan_rep_mode_change_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::address(BdAddr::from_slice(&data[0..6])), field::pscan_rep_mode(data[6])]
}

fn inquiry_result_rssi_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    let num_responses = data[0] as usize;
    let mut lines = vec![field::num_responses(data[0])];
    for i in 0..num_responses {
        let off = 1 + i * 14;
        lines.push(field::address(BdAddr::from_slice(&data[off..off + 6])));
        lines.push(field::class_of_device([data[off + 8], data[off + 9], data[off + 10]]));
        lines.push(format!("            RSSI: {} dBm", data[off + 13] as i8));
    }
    lines
}

fn read_remote_ext_features_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    let mut bitmap = [0u8; 8];
    bitmap.copy_from_slice(&data[5..13]);
    vec![
        field::status(data[0]),
        field::handle(u16_le(data, 1)),
        format!("            Page: {}/{}", data[3], data[4]),
        field::features(&bitmap),
    ]
}

fn sync_conn_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![
        field::status(data[0]),
        field::handle(u16_le(data, 1)),
        field::address(BdAddr::from_slice(&data[3..9])),
        field::link_type(data[9]),
    ]
}

fn extended_inquiry_result_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    let mut eir = [0u8; 240];
    eir.copy_from_slice(&data[14..254]);
    let mut lines = vec![
        field::num_responses(data[0]),
        field::address(BdAddr::from_slice(&data[1..7])),
        field::pscan_rep_mode(data[7]),
        field::class_of_device([data[9], data[10], data[11]]),
        field::clock_offset(u16_le(data, 12)),
        format!("            RSSI: {} dBm", data[13] as i8),
    ];
    lines.extend(field::eir(&eir));
    lines
}

fn io_capability_request_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::address(BdAddr::from_slice(data))]
}

fn io_capability_response_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![
        field::address(BdAddr::from_slice(&data[0..6])),
        format!("            Capability: 0x{:02x}", data[6]),
        field::fec(data[7]),
        format!("            Authentication: 0x{:02x}", data[8]),
    ]
}

fn user_confirmation_request_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![
        field::address(BdAddr::from_slice(&data[0..6])),
        format!("            Passkey: {}", u32::from_le_bytes([data[6], data[7], data[8], data[9]])),
    ]
}

fn simple_pairing_complete_evt(data: &[u8], _filter: FilterMask) -> Vec<String> {
    vec![field::status(data[0]), field::address(BdAddr::from_slice(&data[1..7]))]
}

/// The HCI event code table.
pub static EVENT_TABLE: &[EventDescriptor] = &[
    EventDescriptor { event: 0x01, name: "Inquiry Complete", decoder: Some((inquiry_complete_evt, SizeRule::Fixed(1))) },
    EventDescriptor { event: 0x02, name: "Inquiry Result", decoder: Some((inquiry_result_evt, SizeRule::Min(1))) },
    EventDescriptor { event: 0x03, name: "Connect Complete", decoder: Some((conn_complete_evt, SizeRule::Fixed(11))) },
    EventDescriptor { event: 0x04, name: "Connect Request", decoder: Some((conn_request_evt, SizeRule::Fixed(10))) },
    EventDescriptor { event: 0x05, name: "Disconnect Complete", decoder: Some((disconn_complete_evt, SizeRule::Fixed(4))) },
    EventDescriptor { event: 0x06, name: "Auth Complete", decoder: Some((auth_complete_evt, SizeRule::Fixed(3))) },
    EventDescriptor {
        event: 0x07,
        name: "Remote Name Req Complete",
        decoder: Some((remote_name_req_complete_evt, SizeRule::Fixed(255))),
    },
    EventDescriptor {
        event: 0x08,
        name: "Encrypt Change",
        decoder: Some((encrypt_change_evt, SizeRule::Fixed(4))),
    },
    EventDescriptor {
        event: 0x09,
        name: "Change Connection Link Key Complete",
        decoder: Some((change_conn_link_key_complete_evt, SizeRule::Fixed(3))),
    },
    EventDescriptor { event: 0x0a, name: "Master Link Key Complete", decoder: None },
    EventDescriptor {
        event: 0x0b,
        name: "Read Remote Supported Features Complete",
        decoder: Some((read_remote_features_complete_evt, SizeRule::Fixed(11))),
    },
    EventDescriptor {
        event: 0x0c,
        name: "Read Remote Version Complete",
        decoder: Some((read_remote_version_complete_evt, SizeRule::Fixed(8))),
    },
    EventDescriptor { event: 0x0d, name: "QoS Setup Complete", decoder: None },
    EventDescriptor { event: 0x0e, name: "Command Complete", decoder: Some((cmd_complete_evt, SizeRule::Min(3))) },
    EventDescriptor { event: 0x0f, name: "Command Status", decoder: Some((cmd_status_evt, SizeRule::Fixed(4))) },
    EventDescriptor { event: 0x10, name: "Hardware Error", decoder: Some((hardware_error_evt, SizeRule::Fixed(1))) },
    EventDescriptor { event: 0x11, name: "Flush Occurred", decoder: None },
    EventDescriptor { event: 0x12, name: "Role Change", decoder: Some((role_change_evt, SizeRule::Fixed(8))) },
    EventDescriptor { event: 0x13, name: "Number of Completed Packets", decoder: None },
    EventDescriptor { event: 0x14, name: "Mode Change", decoder: Some((mode_change_evt, SizeRule::Fixed(6))) },
    EventDescriptor { event: 0x15, name: "Return Link Keys", decoder: None },
    EventDescriptor { event: 0x16, name: "PIN Code Request", decoder: Some((pin_code_request_evt, SizeRule::Fixed(6))) },
    EventDescriptor { event: 0x17, name: "Link Key Request", decoder: Some((link_key_request_evt, SizeRule::Fixed(6))) },
    EventDescriptor {
        event: 0x18,
        name: "Link Key Notification",
        decoder: Some((link_key_notify_evt, SizeRule::Fixed(23))),
    },
    EventDescriptor { event: 0x19, name: "Loopback Command", decoder: None },
    EventDescriptor {
        event: 0x1a,
        name: "Data Buffer Overflow",
        decoder: Some((data_buffer_overflow_evt, SizeRule::Fixed(1))),
    },
    EventDescriptor { event: 0x1b, name: "Max Slots Change", decoder: Some((max_slots_change_evt, SizeRule::Fixed(3))) },
    EventDescriptor { event: 0x1c, name: "Read Clock Offset Complete", decoder: None },
    EventDescriptor {
        event: 0x1d,
        name: "Connection Packet Type Changed",
        decoder: Some((conn_packet_type_changed_evt, SizeRule::Fixed(5))),
    },
    EventDescriptor { event: 0x1e, name: "QoS Violation", decoder: Some((null_evt, SizeRule::Fixed(2))) },
    EventDescriptor {
        event: 0x20,
        name: "Page Scan Repetition Mode Change",
        decoder: Some((pscan_rep_mode_change_evt, SizeRule::Fixed(7))),
    },
    EventDescriptor { event: 0x21, name: "Flow Specification Complete", decoder: None },
    EventDescriptor {
        event: 0x22,
        name: "Inquiry Result With RSSI",
        decoder: Some((inquiry_result_rssi_evt, SizeRule::Min(1))),
    },
    EventDescriptor {
        event: 0x23,
        name: "Read Remote Extended Features Complete",
        decoder: Some((read_remote_ext_features_complete_evt, SizeRule::Fixed(13))),
    },
    EventDescriptor {
        event: 0x2c,
        name: "Synchronous Connect Complete",
        decoder: Some((sync_conn_complete_evt, SizeRule::Fixed(17))),
    },
    EventDescriptor { event: 0x2d, name: "Synchronous Connection Changed", decoder: None },
    EventDescriptor { event: 0x2e, name: "Sniff Subrating", decoder: None },
    EventDescriptor {
        event: 0x2f,
        name: "Extended Inquiry Result",
        decoder: Some((extended_inquiry_result_evt, SizeRule::Fixed(254))),
    },
    EventDescriptor { event: 0x30, name: "Encryption Key Refresh Complete", decoder: Some((status_evt, SizeRule::Fixed(1))) },
    EventDescriptor {
        event: 0x31,
        name: "IO Capability Request",
        decoder: Some((io_capability_request_evt, SizeRule::Fixed(6))),
    },
    EventDescriptor {
        event: 0x32,
        name: "IO Capability Response",
        decoder: Some((io_capability_response_evt, SizeRule::Fixed(9))),
    },
    EventDescriptor {
        event: 0x33,
        name: "User Confirmation Request",
        decoder: Some((user_confirmation_request_evt, SizeRule::Fixed(10))),
    },
    EventDescriptor { event: 0x34, name: "User Passkey Request", decoder: Some((pin_code_request_evt, SizeRule::Fixed(6))) },
    EventDescriptor { event: 0x35, name: "Remote OOB Data Request", decoder: Some((pin_code_request_evt, SizeRule::Fixed(6))) },
    EventDescriptor {
        event: 0x36,
        name: "Simple Pairing Complete",
        decoder: Some((simple_pairing_complete_evt, SizeRule::Fixed(7))),
    },
    EventDescriptor { event: 0x38, name: "Link Supervision Timeout Changed", decoder: None },
    EventDescriptor { event: 0x39, name: "Enhanced Flush Complete", decoder: None },
    EventDescriptor { event: 0x3b, name: "User Passkey Notification", decoder: None },
    EventDescriptor { event: 0x3c, name: "Keypress Notification", decoder: None },
    EventDescriptor { event: 0x3d, name: "Remote Host Supported Features Notification", decoder: None },
    EventDescriptor { event: 0x3e, name: "LE Meta Event", decoder: Some((le_meta_event_evt, SizeRule::Min(1))) },
    EventDescriptor { event: 0x40, name: "Physical Link Complete", decoder: None },
    EventDescriptor { event: 0x41, name: "Channel Selected", decoder: None },
    EventDescriptor { event: 0x42, name: "Disconnect Physical Link Complete", decoder: None },
    EventDescriptor { event: 0x43, name: "Physical Link Loss Early Warning", decoder: None },
    EventDescriptor { event: 0x44, name: "Physical Link Recovery", decoder: None },
    EventDescriptor { event: 0x45, name: "Logical Link Complete", decoder: None },
    EventDescriptor { event: 0x46, name: "Disconnect Logical Link Complete", decoder: None },
    EventDescriptor { event: 0x47, name: "Flow Spec Modify Complete", decoder: None },
    EventDescriptor { event: 0x48, name: "Number of Completed Data Blocks", decoder: None },
    EventDescriptor { event: 0x4c, name: "Short Range Mode Change Complete", decoder: None },
    EventDescriptor { event: 0x4d, name: "AMP Status Change", decoder: None },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_event() {
        assert_eq!(lookup(0x0e).unwrap().name, "Command Complete");
    }

    #[test]
    fn lookup_unknown_event_misses() {
        assert!(lookup(0xaa).is_none());
    }

    #[test]
    fn command_complete_dispatches_to_reset_response() {
        let (decode, rule) = lookup(0x0e).unwrap().decoder.unwrap();
        assert_eq!(rule, SizeRule::Min(3));
        // ncmd=1, opcode=Reset(0x0c03), return_params=[status=0x00]
        let lines = decode(&[0x01, 0x03, 0x0c, 0x00], FilterMask::empty());
        assert_eq!(lines[0], "            Reset (0x03|0x0003) ncmd 1");
        assert_eq!(lines[1], "            Status: Success (0x00)");
    }

    #[test]
    fn command_status_reports_in_flight_opcode() {
        let (decode, _) = lookup(0x0f).unwrap().decoder.unwrap();
        // status=0x00, ncmd=1, opcode=Inquiry(0x0401)
        let lines = decode(&[0x00, 0x01, 0x01, 0x04], FilterMask::empty());
        assert_eq!(lines[0], "            Status: Success (0x00)");
        assert_eq!(lines[1], "            Inquiry (0x01|0x0001) ncmd 1");
    }

    #[test]
    fn le_meta_event_dispatches_into_subevent_table() {
        let (decode, _) = lookup(0x3e).unwrap().decoder.unwrap();
        let lines = decode(&[0x02, 0xaa, 0xbb], FilterMask::empty());
        assert!(lines[0].contains("LE Advertising Report"));
        assert!(lines[1].contains("aa bb"));
    }

    #[test]
    fn le_meta_event_unknown_subevent_hexdumps() {
        let (decode, _) = lookup(0x3e).unwrap().decoder.unwrap();
        let lines = decode(&[0xff, 0x01], FilterMask::empty());
        assert!(lines[0].contains("Unknown"));
    }
}
