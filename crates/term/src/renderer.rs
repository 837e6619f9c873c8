//! TextRenderer: writes snapshots to any `io::Write` sink.

use std::io::Write;

use anyhow::Result;

use crate::core::BoardSnapshot;

pub struct TextRenderer<W: Write> {
    out: W,
    buf: String,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: String::new(),
        }
    }

    /// Write every row of `snapshot` followed by a newline, then flush
    pub fn draw(&mut self, snapshot: &BoardSnapshot) -> Result<()> {
        self.buf.clear();
        encode_into(snapshot, &mut self.buf);
        self.out.write_all(self.buf.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// The full text dump as one string
pub fn render_to_string(snapshot: &BoardSnapshot) -> String {
    let mut out = String::with_capacity((snapshot.width as usize + 1) * snapshot.height as usize);
    encode_into(snapshot, &mut out);
    out
}

fn encode_into(snapshot: &BoardSnapshot, out: &mut String) {
    for row in &snapshot.rows {
        out.extend(row.iter());
        out.push('\n');
    }
}
