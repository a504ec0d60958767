//! Pure formatting of primitive HCI field types.
//!
//! Every function here renders a single field into one or more already
//! indented lines. Nothing in this module makes a parsing or validation
//! decision — that is the dissector's job. Values are assumed to already be
//! decoded into native-endian Rust integers/slices by the caller.

use crate::addr::BdAddr;
use crate::error_code::error_name;
use std::fmt::Write as _;

/// Leading indent applied to every rendered field line, matching the
/// reference renderer's `"%-12c"` (12-column blank) prefix.
const INDENT: &str = "            ";

fn line(content: impl std::fmt::Display) -> String {
    format!("{INDENT}{content}")
}

fn enum_name(value: u8, table: &[(u8, &'static str)]) -> &'static str {
    table
        .iter()
        .find(|(code, _)| *code == value)
        .map(|(_, name)| *name)
        .unwrap_or("Reserved")
}

/// `Address: XX:XX:XX:XX:XX:XX` — most-significant octet first.
pub fn address(addr: BdAddr) -> String {
    line(format!("Address: {addr}"))
}

/// `Handle: <decimal>`
pub fn handle(handle: u16) -> String {
    line(format!("Handle: {handle}"))
}

/// `Packet type: 0x<4 hex>`
pub fn packet_type(pkt_type: u16) -> String {
    line(format!("Packet type: 0x{pkt_type:04x}"))
}

/// `Access code: 0x<3 bytes, most-significant first>`
pub fn iac(lap: [u8; 3]) -> String {
    line(format!(
        "Access code: 0x{:02x}{:02x}{:02x}",
        lap[2], lap[1], lap[0]
    ))
}

/// `Class: 0x<3 bytes, most-significant first>`
pub fn class_of_device(dev_class: [u8; 3]) -> String {
    line(format!(
        "Class: 0x{:02x}{:02x}{:02x}",
        dev_class[2], dev_class[1], dev_class[0]
    ))
}

/// `Setting: 0x<4 hex>`
pub fn voice_setting(setting: u16) -> String {
    line(format!("Setting: 0x{setting:04x}"))
}

/// `Link policy: 0x<4 hex>`
pub fn link_policy(policy: u16) -> String {
    line(format!("Link policy: 0x{policy:04x}"))
}

/// `Clock offset: 0x<4 hex>`
pub fn clock_offset(offset: u16) -> String {
    line(format!("Clock offset: 0x{offset:04x}"))
}

/// `Timeout: <value*0.625> msec (0x<4 hex>)`
pub fn timeout(raw: u16) -> String {
    line(format!("Timeout: {:.3} msec (0x{raw:04x})", raw as f64 * 0.625))
}

/// `Length: <value*1.28>s (0x<2 hex>)`
pub fn inquiry_length(raw: u8) -> String {
    line(format!("Length: {:.2}s (0x{raw:02x})", raw as f64 * 1.28))
}

/// `Num responses: <decimal>`
pub fn num_responses(count: u8) -> String {
    line(format!("Num responses: {count}"))
}

const INQUIRY_MODE: [(u8, &str); 3] = [
    (0x00, "Standard Inquiry Result"),
    (0x01, "Inquiry Result with RSSI"),
    (0x02, "Inquiry Result with RSSI or Extended Inquiry Result"),
];

/// `Mode: <name> (0x<2 hex>)` for the Inquiry Mode enumeration.
pub fn inquiry_mode(mode: u8) -> String {
    line(format!("Mode: {} (0x{mode:02x})", enum_name(mode, &INQUIRY_MODE)))
}

const SIMPLE_PAIRING_MODE: [(u8, &str); 2] = [(0x00, "Disabled"), (0x01, "Enabled")];

/// `Mode: <name> (0x<2 hex>)` for the Simple Pairing Mode enumeration.
pub fn simple_pairing_mode(mode: u8) -> String {
    line(format!(
        "Mode: {} (0x{mode:02x})",
        enum_name(mode, &SIMPLE_PAIRING_MODE)
    ))
}

const PSCAN_REP_MODE: [(u8, &str); 3] = [(0x00, "R0"), (0x01, "R1"), (0x02, "R2")];

/// `Page scan repetition mode: <name> (0x<2 hex>)`
pub fn pscan_rep_mode(mode: u8) -> String {
    line(format!(
        "Page scan repetition mode: {} (0x{mode:02x})",
        enum_name(mode, &PSCAN_REP_MODE)
    ))
}

const PSCAN_PERIOD_MODE: [(u8, &str); 3] = [(0x00, "P0"), (0x01, "P1"), (0x02, "P2")];

/// `Page period mode: <name> (0x<2 hex>)`
pub fn pscan_period_mode(mode: u8) -> String {
    line(format!(
        "Page period mode: {} (0x{mode:02x})",
        enum_name(mode, &PSCAN_PERIOD_MODE)
    ))
}

const PSCAN_MODE: [(u8, &str); 4] = [
    (0x00, "Mandatory"),
    (0x01, "Optional I"),
    (0x02, "Optional II"),
    (0x03, "Optional III"),
];

/// `Page scan mode: <name> (0x<2 hex>)`
pub fn pscan_mode(mode: u8) -> String {
    line(format!(
        "Page scan mode: {} (0x{mode:02x})",
        enum_name(mode, &PSCAN_MODE)
    ))
}

const LINK_TYPE: [(u8, &str); 2] = [(0x00, "SCO"), (0x01, "ACL")];

/// `Link type: <name> (0x<2 hex>)`
pub fn link_type(value: u8) -> String {
    line(format!("Link type: {} (0x{value:02x})", enum_name(value, &LINK_TYPE)))
}

const ENCR_MODE: [(u8, &str); 2] = [(0x00, "Disabled"), (0x01, "Enabled")];

/// `Encryption: <name> (0x<2 hex>)`
pub fn encr_mode(value: u8) -> String {
    line(format!(
        "Encryption: {} (0x{value:02x})",
        enum_name(value, &ENCR_MODE)
    ))
}

const KEY_FLAG: [(u8, &str); 2] = [(0x00, "Semi-permanent"), (0x01, "Temporary")];

/// `Key flag: <name> (0x<2 hex>)`
pub fn key_flag(value: u8) -> String {
    line(format!("Key flag: {} (0x{value:02x})", enum_name(value, &KEY_FLAG)))
}

const ROLE: [(u8, &str); 2] = [(0x00, "Master"), (0x01, "Slave")];

/// `Role: <name> (0x<2 hex>)`
pub fn role(value: u8) -> String {
    line(format!("Role: {} (0x{value:02x})", enum_name(value, &ROLE)))
}

const ROLE_SWITCH: [(u8, &str); 2] = [(0x00, "Stay master"), (0x01, "Allow slave")];

/// `Role switch: <name> (0x<2 hex>)`
pub fn role_switch(value: u8) -> String {
    line(format!(
        "Role switch: {} (0x{value:02x})",
        enum_name(value, &ROLE_SWITCH)
    ))
}

const FEC: [(u8, &str); 2] = [(0x00, "Not required"), (0x01, "Required")];

/// `FEC: <name> (0x<2 hex>)`
pub fn fec(value: u8) -> String {
    line(format!("FEC: {} (0x{value:02x})", enum_name(value, &FEC)))
}

/// `Status: <name> (0x<2 hex>)` / `Reason: <name> (0x<2 hex>)`
fn error_field(label: &str, code: u8) -> String {
    line(format!("{label}: {} (0x{code:02x})", error_name(code)))
}

/// `Status: <name> (0x<2 hex>)`
pub fn status(code: u8) -> String {
    error_field("Status", code)
}

/// `Reason: <name> (0x<2 hex>)`
pub fn reason(code: u8) -> String {
    error_field("Reason", code)
}

/// `Name: <up to 248 bytes, NUL-terminated>`
pub fn name(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let text = String::from_utf8_lossy(&data[..end.min(data.len())]);
    line(format!("Name: {text}"))
}

/// `<label>: <version> - 0x<4 hex>`
pub fn version(label: &str, version: u8, revision: u16) -> String {
    line(format!("{label}: {version} - 0x{revision:04x}"))
}

/// `HCI version: <version> - 0x<4 hex>`
pub fn hci_version(hci_ver: u8, hci_rev: u16) -> String {
    version("HCI version", hci_ver, hci_rev)
}

/// `LMP version: <version> - 0x<4 hex>`
pub fn lmp_version(lmp_ver: u8, lmp_subver: u16) -> String {
    version("LMP version", lmp_ver, lmp_subver)
}

/// `Manufacturer: <decimal>`
pub fn manufacturer(value: u16) -> String {
    line(format!("Manufacturer: {value}"))
}

/// `Commands: 0x<128 contiguous hex chars>`
pub fn commands(bitmap: &[u8; 64]) -> String {
    let mut s = String::with_capacity(128);
    for byte in bitmap {
        let _ = write!(s, "{byte:02x}");
    }
    line(format!("Commands: 0x{s}"))
}

/// `Features: 0x.. 0x.. ...` (8 space-separated bytes)
pub fn features(bitmap: &[u8; 8]) -> String {
    let mut s = String::new();
    for byte in bitmap {
        let _ = write!(s, " 0x{byte:02x}");
    }
    line(format!("Features:{s}"))
}

/// `Mask: 0x<16 contiguous hex chars>`
pub fn event_mask(mask: &[u8; 8]) -> String {
    let mut s = String::with_capacity(16);
    for byte in mask {
        let _ = write!(s, "{byte:02x}");
    }
    line(format!("Mask: 0x{s}"))
}

/// `EIR` data is just a fixed 240-byte hexdump.
pub fn eir(data: &[u8; 240]) -> Vec<String> {
    hexdump(data)
}

/// Canonical 16-bytes-per-line hexdump, with a trailing ASCII gutter.
///
/// Each byte contributes `"XX "` to the hex column and an ASCII replacement
/// character (`.` for non-printable) to the gutter; both columns are padded
/// with spaces on the final, possibly-partial line.
pub fn hexdump(buf: &[u8]) -> Vec<String> {
    if buf.is_empty() {
        return Vec::new();
    }

    buf.chunks(16)
        .map(|chunk| {
            let mut hex = String::with_capacity(48);
            let mut ascii = String::with_capacity(16);
            for byte in chunk {
                let _ = write!(hex, "{byte:02x} ");
                ascii.push(if byte.is_ascii_graphic() || *byte == b' ' {
                    *byte as char
                } else {
                    '.'
                });
            }
            for _ in chunk.len()..16 {
                hex.push_str("   ");
            }
            line(format!("{hex} {ascii}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_reversed_and_colon_separated() {
        let addr = BdAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        assert_eq!(address(addr), format!("{INDENT}Address: 66:55:44:33:22:11"));
    }

    #[test]
    fn timeout_converts_units() {
        assert_eq!(timeout(0x0010), format!("{INDENT}Timeout: 10.000 msec (0x0010)"));
    }

    #[test]
    fn inquiry_length_converts_units() {
        assert_eq!(inquiry_length(0x30), format!("{INDENT}Length: 61.44s (0x30)"));
    }

    #[test]
    fn status_unknown_code() {
        assert_eq!(status(0x40), format!("{INDENT}Status: Unknown (0x40)"));
    }

    #[test]
    fn status_known_code() {
        assert_eq!(status(0x00), format!("{INDENT}Status: Success (0x00)"));
    }

    #[test]
    fn reserved_enum_value() {
        assert_eq!(link_type(0x05), format!("{INDENT}Link type: Reserved (0x05)"));
    }

    #[test]
    fn name_nul_terminates() {
        let mut buf = [0u8; 248];
        buf[..4].copy_from_slice(b"Test");
        assert_eq!(name(&buf), format!("{INDENT}Name: Test"));
    }

    #[test]
    fn commands_is_contiguous_hex() {
        let bitmap = [0xffu8; 64];
        let rendered = commands(&bitmap);
        assert_eq!(rendered.len(), INDENT.len() + "Commands: 0x".len() + 128);
        assert!(rendered.ends_with(&"ff".repeat(64)));
    }

    #[test]
    fn features_is_space_separated() {
        let bitmap = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(
            features(&bitmap),
            format!("{INDENT}Features: 0x01 0x02 0x03 0x04 0x05 0x06 0x07 0x08")
        );
    }

    #[test]
    fn hexdump_full_line() {
        let buf: Vec<u8> = (0..16).collect();
        let lines = hexdump(&buf);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f"));
    }

    #[test]
    fn hexdump_partial_last_line_pads() {
        let buf = [0x41u8, 0x42, 0x43];
        let lines = hexdump(&buf);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(&format!("{INDENT}41 42 43")));
        assert!(lines[0].ends_with("ABC"));
        // hex column is always 48 chars wide regardless of how many bytes were present.
        assert_eq!(lines[0].len(), INDENT.len() + 48 + 1 + 3);
    }

    #[test]
    fn hexdump_non_printable_is_dot() {
        let buf = [0x00u8, 0xff];
        let lines = hexdump(&buf);
        assert!(lines[0].trim_end().ends_with(".."));
    }

    #[test]
    fn hexdump_empty_yields_no_lines() {
        assert!(hexdump(&[]).is_empty());
    }

    #[test]
    fn hexdump_two_lines_for_17_bytes() {
        let buf = vec![0u8; 17];
        assert_eq!(hexdump(&buf).len(), 2);
    }
}
