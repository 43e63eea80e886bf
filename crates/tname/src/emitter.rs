//! Walks a type list and writes one stanza per name
//!
//! Each stanza is followed by a single blank line. Output depends only on
//! the list, the template and the options, so repeated runs are identical.

use std::io::{self, Write};
use tracing::debug;

use crate::template::Template;
use crate::types::TypeName;

/// First line of a generated region
pub const BEGIN_MARKER: &str = "/* --begin generated-- (see tname) */";
/// Last line of a generated region
pub const END_MARKER: &str = "/* --end generated-- */";

/// Layout knobs for emitted text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Spaces prefixed to every non-empty line
    pub indent: usize,
    /// Wrap the output in begin/end marker comments
    pub markers: bool,
}

/// Renders stanzas into an output sink
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    template: Template,
    options: EmitOptions,
}

impl Emitter {
    pub fn new(template: Template, options: EmitOptions) -> Self {
        Self { template, options }
    }

    /// Write one stanza plus a blank line per name, in order.
    ///
    /// Only I/O errors from `out` can fail this; they are returned as-is.
    pub fn emit<'a, I, W>(&self, names: I, out: &mut W) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a TypeName>,
        W: Write + ?Sized,
    {
        let pad = " ".repeat(self.options.indent);
        let eol = self.template.line_ending();

        if self.options.markers {
            write_line(out, &pad, BEGIN_MARKER, eol)?;
        }

        let mut count = 0usize;
        for name in names {
            self.emit_block(name, out, &pad, eol)?;
            count += 1;
        }

        if self.options.markers {
            write_line(out, &pad, END_MARKER, eol)?;
        }

        out.flush()?;
        debug!(blocks = count, "emitted stanzas");
        Ok(())
    }

    /// Emit into a string
    pub fn render<'a, I>(&self, names: I) -> String
    where
        I: IntoIterator<Item = &'a TypeName>,
    {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.emit(names, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn emit_block<W: Write + ?Sized>(
        &self,
        name: &TypeName,
        out: &mut W,
        pad: &str,
        eol: &str,
    ) -> io::Result<()> {
        let block = self.template.render(name);
        for line in block.split_inclusive('\n') {
            let body = line.trim_end_matches(['\r', '\n']);
            write_line(out, pad, body, &line[body.len()..])?;
        }
        out.write_all(eol.as_bytes())
    }
}

/// Write `line` followed by `eol`. Blank lines get no padding.
fn write_line<W: Write + ?Sized>(out: &mut W, pad: &str, line: &str, eol: &str) -> io::Result<()> {
    if !line.is_empty() {
        out.write_all(pad.as_bytes())?;
    }
    out.write_all(line.as_bytes())?;
    out.write_all(eol.as_bytes())
}
