//! Bluetooth device address type.
//!
//! This module provides a compact 6-byte address representation that is
//! decoupled from any specific Bluetooth library.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A Bluetooth device address (BD_ADDR), stored wire-order (little-endian,
/// i.e. `0` is the least significant octet).
///
/// Displaying a [`BdAddr`] reverses the byte order, matching the on-air
/// convention of writing the most significant octet first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BdAddr(pub [u8; 6]);

/// The all-zero address, used as a placeholder when the real address is
/// unknown (e.g. `DEL_INDEX` for an index never seen via `NEW_INDEX`).
pub const BDADDR_ANY: BdAddr = BdAddr([0; 6]);

impl BdAddr {
    /// Parse a [`BdAddr`] out of the first 6 bytes of `data`.
    ///
    /// # Panics
    /// Panics if `data` has fewer than 6 bytes; callers validate length
    /// against the declared packet size before calling field decoders.
    pub fn from_slice(data: &[u8]) -> Self {
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&data[..6]);
        BdAddr(bytes)
    }
}

impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[5], self.0[4], self.0[3], self.0[2], self.0[1], self.0[0]
        )
    }
}

/// Errors returned when parsing a [`BdAddr`] from its colon-separated string form.
#[derive(Error, Debug, PartialEq)]
pub enum ParseAddrError {
    #[error("invalid address: expected 6 parts, got {0}")]
    InvalidLength(usize),
    #[error("invalid address: part {0} has wrong length")]
    InvalidPartLength(usize),
    #[error("invalid address: '{0}' is not valid hex")]
    InvalidHex(String),
}

impl FromStr for BdAddr {
    type Err = ParseAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(ParseAddrError::InvalidLength(parts.len()));
        }

        // The string is most-significant-octet-first; storage is reversed.
        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 2 {
                return Err(ParseAddrError::InvalidPartLength(i));
            }
            bytes[5 - i] = u8::from_str_radix(part, 16)
                .map_err(|_| ParseAddrError::InvalidHex(part.to_string()))?;
        }

        Ok(BdAddr(bytes))
    }
}

impl From<[u8; 6]> for BdAddr {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reverses_wire_order() {
        let addr = BdAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        assert_eq!(format!("{addr}"), "66:55:44:33:22:11");
    }

    #[test]
    fn display_round_trips_through_parse() {
        let addr: BdAddr = "66:55:44:33:22:11".parse().unwrap();
        assert_eq!(addr.0, [0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        assert_eq!(format!("{addr}"), "66:55:44:33:22:11");
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(
            "invalid".parse::<BdAddr>(),
            Err(ParseAddrError::InvalidLength(1))
        ));
        assert!(matches!(
            "AA:BB:CC".parse::<BdAddr>(),
            Err(ParseAddrError::InvalidLength(3))
        ));
        assert!(matches!(
            "AA:BB:CC:DD:EE:GG".parse::<BdAddr>(),
            Err(ParseAddrError::InvalidHex(_))
        ));
    }

    #[test]
    fn any_is_all_zero() {
        assert_eq!(BDADDR_ANY.0, [0u8; 6]);
        assert_eq!(format!("{BDADDR_ANY}"), "00:00:00:00:00:00");
    }

    #[test]
    fn from_slice_reads_six_bytes_unreversed() {
        let data = [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x99];
        let addr = BdAddr::from_slice(&data);
        assert_eq!(addr.0, [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }
}
