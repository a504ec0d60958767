//! Adapter index table populated by `NEW_INDEX`/`DEL_INDEX` monitor records.

use crate::addr::{BDADDR_ANY, BdAddr};

/// Maximum number of simultaneously tracked adapter indices, matching the
/// `index_list[MAX_INDEX]` bound.
pub const MAX_INDEX: usize = 16;

/// Controller type, carried in `NEW_INDEX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerType {
    BrEdr,
    Amp,
    Unknown(u8),
}

impl ControllerType {
    pub fn from_raw(value: u8) -> Self {
        match value {
            0x00 => ControllerType::BrEdr,
            0x01 => ControllerType::Amp,
            other => ControllerType::Unknown(other),
        }
    }

    pub fn name(self) -> String {
        match self {
            ControllerType::BrEdr => "BR/EDR".to_string(),
            ControllerType::Amp => "AMP".to_string(),
            ControllerType::Unknown(v) => format!("Unknown ({v})"),
        }
    }
}

/// Transport bus, carried in `NEW_INDEX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bus {
    Virtual,
    Usb,
    PcCard,
    Uart,
    Rs232,
    Pci,
    Sdio,
    Unknown(u8),
}

impl Bus {
    pub fn from_raw(value: u8) -> Self {
        match value {
            0x00 => Bus::Virtual,
            0x01 => Bus::Usb,
            0x02 => Bus::PcCard,
            0x03 => Bus::Uart,
            0x04 => Bus::Rs232,
            0x05 => Bus::Pci,
            0x06 => Bus::Sdio,
            other => Bus::Unknown(other),
        }
    }

    pub fn name(self) -> String {
        match self {
            Bus::Virtual => "VIRTUAL".to_string(),
            Bus::Usb => "USB".to_string(),
            Bus::PcCard => "PCCARD".to_string(),
            Bus::Uart => "UART".to_string(),
            Bus::Rs232 => "RS232".to_string(),
            Bus::Pci => "PCI".to_string(),
            Bus::Sdio => "SDIO".to_string(),
            Bus::Unknown(v) => format!("Unknown ({v})"),
        }
    }
}

/// One slot in the adapter index table: the `NEW_INDEX` record's fields.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry {
    pub controller_type: ControllerType,
    pub bus: Bus,
    pub address: BdAddr,
}

/// Bounded table of adapter indices, mirroring `index_list[MAX_INDEX]`.
///
/// Indices at or beyond [`MAX_INDEX`] are accepted by the demultiplexer but
/// silently not recorded here, same as the reference table.
#[derive(Debug, Default)]
pub struct IndexTable {
    slots: [Option<IndexEntry>; MAX_INDEX],
}

impl IndexTable {
    pub fn new() -> Self {
        Self { slots: [None; MAX_INDEX] }
    }

    pub fn insert(&mut self, index: u16, entry: IndexEntry) {
        if let Some(slot) = self.slots.get_mut(index as usize) {
            *slot = Some(entry);
        }
    }

    pub fn get(&self, index: u16) -> Option<&IndexEntry> {
        self.slots.get(index as usize).and_then(|s| s.as_ref())
    }

    pub fn address_of(&self, index: u16) -> BdAddr {
        self.get(index).map(|e| e.address).unwrap_or(BDADDR_ANY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_round_trips() {
        let mut table = IndexTable::new();
        let entry = IndexEntry {
            controller_type: ControllerType::BrEdr,
            bus: Bus::Usb,
            address: BdAddr::from_slice(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]),
        };
        table.insert(0, entry);
        assert_eq!(table.get(0).unwrap().bus, Bus::Usb);
    }

    #[test]
    fn out_of_bounds_index_is_ignored() {
        let mut table = IndexTable::new();
        let entry = IndexEntry { controller_type: ControllerType::BrEdr, bus: Bus::Uart, address: BDADDR_ANY };
        table.insert(MAX_INDEX as u16, entry);
        assert!(table.get(MAX_INDEX as u16).is_none());
    }

    #[test]
    fn unset_index_resolves_to_bdaddr_any() {
        let table = IndexTable::new();
        assert_eq!(table.address_of(3), BDADDR_ANY);
    }

    #[test]
    fn unknown_controller_type_keeps_raw_value() {
        assert_eq!(ControllerType::from_raw(0x07).name(), "Unknown (7)");
    }
}
