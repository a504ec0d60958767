//! HCI dissector: opcode/event tables, per-message decoders, and the four
//! packet-kind entry points (command, event, ACL data, SCO data).

pub mod event;
pub mod opcode;
mod size;
pub mod subevent;

pub use size::{SizeRule, SizeViolation};

use crate::field;
use crate::filter::FilterMask;

/// Read a little-endian `u16` out of `data` at `offset`.
///
/// # Panics
/// Panics if `data` does not have at least `offset + 2` bytes; callers only
/// call this after the size discipline has validated the payload length.
pub(crate) fn u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

const COMMAND_HDR_SIZE: usize = 3;
const EVENT_HDR_SIZE: usize = 2;
const ACL_HDR_SIZE: usize = 4;
const SCO_HDR_SIZE: usize = 3;

/// Decompose a 16-bit ACL/SCO handle+flags field.
fn split_handle_flags(raw: u16) -> (u16, u8) {
    (raw & 0x0fff, (raw >> 12) as u8)
}

/// Run a decoder against `payload` under a [`SizeRule`], returning either the
/// decoder's rendered lines or a size-violation diagnostic plus hexdump.
fn apply_size_rule(rule: SizeRule, payload: &[u8], decode: impl FnOnce(&[u8]) -> Vec<String>) -> Vec<String> {
    match rule.check(payload.len()) {
        Ok(()) => decode(payload),
        Err(violation) => {
            let mut lines = vec![format!("            {}", violation.message())];
            lines.extend(field::hexdump(payload));
            lines
        }
    }
}

/// Dissect an HCI command packet: `{opcode:16LE, plen:8}` followed by `plen`
/// parameter bytes.
///
/// Returns the rendered lines, including the `< HCI Command: ...` header.
pub fn command_packet(data: &[u8]) -> Vec<String> {
    if data.len() < COMMAND_HDR_SIZE {
        return vec!["* Malformed HCI Command packet".to_string()];
    }

    let opcode_value = u16_le(data, 0);
    let plen = data[2] as usize;
    let params = &data[COMMAND_HDR_SIZE..];

    if params.len() != plen {
        return vec!["* Invalid HCI Command packet size".to_string()];
    }

    let opcode = opcode::Opcode(opcode_value);
    let descriptor = opcode::lookup(opcode_value);
    let name = descriptor.map(|d| d.name).unwrap_or("Unknown");

    let mut lines = vec![format!(
        "< HCI Command: {name} (0x{:02x}|0x{:04x}) plen {plen}",
        opcode.ogf(),
        opcode.ocf()
    )];

    match descriptor.and_then(|d| d.cmd) {
        None => lines.extend(field::hexdump(params)),
        Some((decode, rule)) => lines.extend(apply_size_rule(rule, params, decode)),
    }

    lines
}

/// Dissect an HCI event packet: `{evt:8, plen:8}` followed by `plen` bytes.
pub fn event_packet(data: &[u8], filter: FilterMask) -> Vec<String> {
    if data.len() < EVENT_HDR_SIZE {
        return vec!["* Malformed HCI Event packet".to_string()];
    }

    let evt = data[0];
    let plen = data[1] as usize;
    let params = &data[EVENT_HDR_SIZE..];

    if params.len() != plen {
        return vec!["* Invalid HCI Event packet size".to_string()];
    }

    let descriptor = event::lookup(evt);
    let name = descriptor.map(|d| d.name).unwrap_or("Unknown");

    let mut lines = vec![format!("> HCI Event: {name} (0x{evt:02x}) plen {plen}")];

    match descriptor.and_then(|d| d.decoder) {
        None => lines.extend(field::hexdump(params)),
        Some((decode, rule)) => lines.extend(apply_size_rule(rule, params, |p| decode(p, filter))),
    }

    lines
}

/// Dissect an ACL data packet: `{handle|flags:16LE, dlen:16LE}` plus body.
///
/// `inbound` selects the direction marker (`>` inbound, `<` outbound).
pub fn acl_data(data: &[u8], inbound: bool, filter: FilterMask) -> Vec<String> {
    if data.len() < ACL_HDR_SIZE {
        let dir = if inbound { "RX" } else { "TX" };
        return vec![format!("* Malformed ACL Data {dir} packet")];
    }

    let handle_flags = u16_le(data, 0);
    let dlen = u16_le(data, 2) as usize;
    let (handle, flags) = split_handle_flags(handle_flags);
    let marker = if inbound { '>' } else { '<' };

    let mut lines = vec![format!(
        "{marker} ACL Data: handle {handle} flags 0x{flags:02x} dlen {dlen}"
    )];

    if filter.contains(FilterMask::SHOW_ACL_DATA) {
        lines.extend(field::hexdump(&data[ACL_HDR_SIZE..]));
    }

    lines
}

/// Dissect a SCO data packet: `{handle|flags:16LE, dlen:8}` plus body.
pub fn sco_data(data: &[u8], inbound: bool, filter: FilterMask) -> Vec<String> {
    if data.len() < SCO_HDR_SIZE {
        let dir = if inbound { "RX" } else { "TX" };
        return vec![format!("* Malformed SCO Data {dir} packet")];
    }

    let handle_flags = u16_le(data, 0);
    let dlen = data[2] as usize;
    let (handle, flags) = split_handle_flags(handle_flags);
    let marker = if inbound { '>' } else { '<' };

    let mut lines = vec![format!(
        "{marker} SCO Data: handle {handle} flags 0x{flags:02x} dlen {dlen}"
    )];

    if filter.contains(FilterMask::SHOW_SCO_DATA) {
        lines.extend(field::hexdump(&data[SCO_HDR_SIZE..]));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_header_too_short() {
        assert_eq!(command_packet(&[0x01, 0x00]), vec!["* Malformed HCI Command packet"]);
    }

    #[test]
    fn command_plen_mismatch() {
        // Reset (0x0c03) claims plen 0 but carries one trailing byte.
        let lines = command_packet(&[0x03, 0x0c, 0x00, 0xaa]);
        assert_eq!(lines, vec!["* Invalid HCI Command packet size"]);
    }

    #[test]
    fn unknown_opcode_hexdumps() {
        let lines = command_packet(&[0xff, 0xff, 0x02, 0xaa, 0xbb]);
        assert!(lines[0].starts_with("< HCI Command: Unknown"));
        assert!(lines[1].contains("aa bb"));
    }

    #[test]
    fn acl_respects_filter() {
        let data = [0x80, 0x00, 0x03, 0x00, 0x01, 0x02, 0x03];
        let hidden = acl_data(&data, false, FilterMask::empty());
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0], "< ACL Data: handle 128 flags 0x00 dlen 3");

        let shown = acl_data(&data, false, FilterMask::SHOW_ACL_DATA);
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn sco_direction_marker() {
        let data = [0x01, 0x00, 0x02, 0xaa, 0xbb];
        let lines = sco_data(&data, true, FilterMask::empty());
        assert!(lines[0].starts_with('>'));
    }
}
