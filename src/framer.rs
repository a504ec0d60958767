//! H:4 transport framing: reassembles a byte stream into whole HCI packets.
//!
//! Mirrors the reassembly state machine in `serial_read_callback` (an
//! offset/expect/len byte counter, not a length-prefixed message codec) but
//! generalizes it to all four H:4 packet-type tags rather than only
//! `HCI_COMMAND_PKT`.

use thiserror::Error;

/// The H:4 packet-type tag, carried as the first byte of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    Command,
    Acl,
    Sco,
    Event,
}

impl PacketKind {
    const COMMAND_TAG: u8 = 0x01;
    const ACL_TAG: u8 = 0x02;
    const SCO_TAG: u8 = 0x03;
    const EVENT_TAG: u8 = 0x04;

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            Self::COMMAND_TAG => Some(PacketKind::Command),
            Self::ACL_TAG => Some(PacketKind::Acl),
            Self::SCO_TAG => Some(PacketKind::Sco),
            Self::EVENT_TAG => Some(PacketKind::Event),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            PacketKind::Command => Self::COMMAND_TAG,
            PacketKind::Acl => Self::ACL_TAG,
            PacketKind::Sco => Self::SCO_TAG,
            PacketKind::Event => Self::EVENT_TAG,
        }
    }

    /// Length of the header that follows the type tag, not counting the tag
    /// byte itself.
    fn header_len(self) -> usize {
        match self {
            PacketKind::Command => 3, // opcode:16LE, plen:8
            PacketKind::Event => 2,   // evt:8, plen:8
            PacketKind::Acl => 4,     // handle|flags:16LE, dlen:16LE
            PacketKind::Sco => 3,     // handle|flags:16LE, dlen:8
        }
    }

    /// Read the payload length out of a complete `tag + header` prefix.
    fn payload_len(self, header: &[u8]) -> usize {
        match self {
            PacketKind::Command => header[3] as usize,
            PacketKind::Event => header[2] as usize,
            PacketKind::Acl => u16::from_le_bytes([header[3], header[4]]) as usize,
            PacketKind::Sco => header[3] as usize,
        }
    }
}

/// Framing failures. Unlike a dissector size violation (a decode-time
/// diagnostic), losing H:4 sync is a transport-level error: the framer
/// cannot tell where the next frame starts without the caller reconnecting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramerError {
    #[error("unknown H:4 packet type 0x{0:02x}")]
    UnknownPacketType(u8),
}

/// Byte-at-a-time H:4 reassembler.
///
/// Feeding the same bytes through one `feed` call or many produces identical
/// output frames; `Framer` never emits a partial packet.
#[derive(Debug, Default)]
pub struct Framer {
    pending: Vec<u8>,
    expected: Option<usize>,
}

impl Framer {
    pub fn new() -> Self {
        Self { pending: Vec::new(), expected: None }
    }

    /// Feed additional transport bytes, returning any packets (including
    /// their leading type-tag byte) that completed as a result.
    ///
    /// On an unrecognized type tag, returns an error immediately and resets
    /// internal state; any bytes not yet consumed from `bytes` are lost, the
    /// same way `serial_read_callback` abandons the read on a bad tag.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<Vec<u8>>, FramerError> {
        let mut frames = Vec::new();

        for &byte in bytes {
            self.pending.push(byte);

            if self.expected.is_none() {
                if self.pending.len() == 1 {
                    if PacketKind::from_tag(byte).is_none() {
                        self.pending.clear();
                        return Err(FramerError::UnknownPacketType(byte));
                    }
                }

                let kind = PacketKind::from_tag(self.pending[0]).expect("tag validated on first byte");
                let header_len = kind.header_len();

                if self.pending.len() == 1 + header_len {
                    let payload_len = kind.payload_len(&self.pending);
                    self.expected = Some(1 + header_len + payload_len);
                }
            }

            if let Some(total) = self.expected {
                if self.pending.len() == total {
                    frames.push(std::mem::take(&mut self.pending));
                    self.expected = None;
                }
            }
        }

        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reset_command(plen: u8, params: &[u8]) -> Vec<u8> {
        let mut frame = vec![0x01, 0x03, 0x0c, plen];
        frame.extend_from_slice(params);
        frame
    }

    #[test]
    fn single_call_yields_one_frame() {
        let frame = reset_command(0, &[]);
        let mut framer = Framer::new();
        let out = framer.feed(&frame).unwrap();
        assert_eq!(out, vec![frame]);
    }

    #[test]
    fn byte_at_a_time_yields_same_frame() {
        let frame = reset_command(1, &[0xaa]);
        let mut framer = Framer::new();
        let mut collected = Vec::new();
        for &byte in &frame {
            collected.extend(framer.feed(&[byte]).unwrap());
        }
        assert_eq!(collected, vec![frame]);
    }

    #[test]
    fn arbitrary_chunking_is_equivalent() {
        let mut full = reset_command(2, &[0x11, 0x22]);
        full.extend(reset_command(0, &[]));

        let whole = Framer::new().feed(&full).unwrap();

        let mut chunked = Framer::new();
        let mut collected = Vec::new();
        for chunk in full.chunks(3) {
            collected.extend(chunked.feed(chunk).unwrap());
        }

        assert_eq!(whole, collected);
    }

    #[test]
    fn acl_frame_uses_16_bit_length() {
        let mut frame = vec![0x02, 0x00, 0x00, 0x02, 0x00]; // handle 0, dlen 2
        frame.extend_from_slice(&[0x01, 0x02]);
        let out = Framer::new().feed(&frame).unwrap();
        assert_eq!(out, vec![frame]);
    }

    #[test]
    fn never_emits_a_partial_frame() {
        let frame = reset_command(4, &[1, 2, 3, 4]);
        let mut framer = Framer::new();
        let out = framer.feed(&frame[..frame.len() - 1]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn unknown_tag_is_an_error_and_resets_state() {
        let mut framer = Framer::new();
        let err = framer.feed(&[0xff]).unwrap_err();
        assert_eq!(err, FramerError::UnknownPacketType(0xff));

        // Framer resynchronizes: a following valid frame still decodes.
        let frame = reset_command(0, &[]);
        let out = framer.feed(&frame).unwrap();
        assert_eq!(out, vec![frame]);
    }
}
