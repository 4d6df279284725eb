//! Operator-facing output on stdout.
//!
//! Logs go to stderr through `tracing`; everything the operator is meant to
//! read goes through [`Console`].

use std::io::{self, Write};

use console::{style, StyledObject};

/// Writes plan details, phase status lines, and the final message.
pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Console<W> {
    /// Wraps `out`. With `color` false no escape codes are written.
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Writes one line of plain text.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Writes an empty line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Writes a `label: value` line.
    pub fn field(&mut self, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{label}: {value}")
    }

    /// Writes a line led by a bold `NOTE`.
    pub fn note(&mut self, text: &str) -> io::Result<()> {
        let tag = self.paint(style("NOTE").bold());
        writeln!(self.out, "{tag}: {text}")
    }

    /// Starts a status line; finish it with [`Console::ok`].
    pub fn start(&mut self, label: &str) -> io::Result<()> {
        write!(self.out, "{label}... ")?;
        self.out.flush()
    }

    /// Completes the current status line.
    pub fn ok(&mut self) -> io::Result<()> {
        let mark = self.paint(style("Ok ✔").green());
        writeln!(self.out, "{mark}")
    }

    fn paint<D>(&self, styled: StyledObject<D>) -> StyledObject<D> {
        if self.color {
            styled
        } else {
            styled.force_styling(false)
        }
    }

    /// Returns the underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
