//! Plain-text [`super::PacketSink`]: one rendered line per output line,
//! mirroring btmon's own terminal rendering.

use super::PacketSink;
use std::io::Write;
use std::sync::Mutex;

/// Writes each record's lines to a shared writer, one per line.
pub struct TextSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }
}

impl<W: Write + Send> PacketSink for TextSink<W> {
    fn write_record(&self, lines: &[String]) -> std::io::Result<()> {
        let mut out = self.out.lock().unwrap();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_entry() {
        let sink = TextSink::new(Vec::<u8>::new());
        sink.write_record(&["a".to_string(), "b".to_string()]).unwrap();
        let out = sink.out.into_inner().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
    }
}
