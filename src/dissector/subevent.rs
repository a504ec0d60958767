//! LE Meta Event subevent table, dispatched from the LE Meta Event decoder.

use super::size::SizeRule;
use crate::filter::FilterMask;

type SubeventDecoder = fn(&[u8], FilterMask) -> Vec<String>;

/// A single LE Meta Event subevent: name plus optional decoder/size rule.
pub struct SubeventDescriptor {
    pub subevent: u8,
    pub name: &'static str,
    pub decoder: Option<(SubeventDecoder, SizeRule)>,
}

/// Find the descriptor for `subevent`, if the table knows it.
pub fn lookup(subevent: u8) -> Option<&'static SubeventDescriptor> {
    SUBEVENT_TABLE.iter().find(|d| d.subevent == subevent)
}

/// LE Meta Event subevent codes.
///
/// None of these currently carry a decoder; the table exists so the LE Meta
/// Event dispatcher has somewhere to grow into as subevents are decoded.
pub static SUBEVENT_TABLE: &[SubeventDescriptor] = &[
    SubeventDescriptor { subevent: 0x01, name: "LE Connection Complete", decoder: None },
    SubeventDescriptor { subevent: 0x02, name: "LE Advertising Report", decoder: None },
    SubeventDescriptor { subevent: 0x03, name: "LE Connection Update Complete", decoder: None },
    SubeventDescriptor { subevent: 0x04, name: "LE Read Remote Used Features Complete", decoder: None },
    SubeventDescriptor { subevent: 0x05, name: "LE Long Term Key Request", decoder: None },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_subevent_has_a_name() {
        assert_eq!(lookup(0x01).unwrap().name, "LE Connection Complete");
    }

    #[test]
    fn unknown_subevent_misses() {
        assert!(lookup(0xff).is_none());
    }

    #[test]
    fn table_carries_no_decoders_yet() {
        assert!(SUBEVENT_TABLE.iter().all(|d| d.decoder.is_none()));
    }
}
