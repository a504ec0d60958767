//! Output sinks for rendered monitor records.
//!
//! This mirrors the teacher's `OutputFormatter` split: a trait decoupling
//! "what the lines are" from "where they go", with one implementation for
//! now and room to add others (e.g. JSON) later.

pub mod text;

/// A sink that accepts the already-rendered lines for one monitor record.
pub trait PacketSink: Send + Sync {
    /// Write one record's rendered lines. `lines` is never empty.
    fn write_record(&self, lines: &[String]) -> std::io::Result<()>;
}
