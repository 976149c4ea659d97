//! Incremental subtitle block writers.
//!
//! Writers flush after every block so a concurrently reading process observes
//! monotonically growing output. This is a design requirement of the
//! transcript path, not an optimization knob.

use std::io::Write;

use subcut_models::{format_srt_timestamp, SubtitleBlock};

use crate::error::{TranscriptError, TranscriptResult};

/// Sink for finished subtitle blocks.
pub trait BlockWriter {
    /// Write a single block and flush it.
    fn write_block(&mut self, block: &SubtitleBlock) -> TranscriptResult<()>;

    /// Flush and close the writer. Idempotent; writing after close errors.
    fn close(&mut self) -> TranscriptResult<()>;
}

/// A `BlockWriter` producing SRT output.
///
/// Entries are 1-indexed: index line, `start --> end` timing line, the block's
/// text lines, and a blank separator line.
pub struct SrtWriter<W: Write> {
    w: W,
    next_index: usize,
    closed: bool,
}

impl<W: Write> SrtWriter<W> {
    /// Create a new SRT writer over `w`.
    pub fn new(w: W) -> Self {
        Self {
            w,
            next_index: 1,
            closed: false,
        }
    }
}

impl<W: Write> BlockWriter for SrtWriter<W> {
    fn write_block(&mut self, block: &SubtitleBlock) -> TranscriptResult<()> {
        if self.closed {
            return Err(TranscriptError::WriterClosed);
        }

        writeln!(self.w, "{}", self.next_index)?;
        writeln!(
            self.w,
            "{} --> {}",
            format_srt_timestamp(block.start),
            format_srt_timestamp(block.end)
        )?;
        for line in &block.lines {
            writeln!(self.w, "{line}")?;
        }
        writeln!(self.w)?;
        self.w.flush()?;

        self.next_index += 1;
        Ok(())
    }

    fn close(&mut self) -> TranscriptResult<()> {
        if self.closed {
            return Ok(());
        }
        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}

/// A `BlockWriter` producing plain text: one flattened line per block, line
/// breaks inside a block replaced with a single space.
pub struct PlainTextWriter<W: Write> {
    w: W,
    closed: bool,
}

impl<W: Write> PlainTextWriter<W> {
    /// Create a new plain-text writer over `w`.
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }
}

impl<W: Write> BlockWriter for PlainTextWriter<W> {
    fn write_block(&mut self, block: &SubtitleBlock) -> TranscriptResult<()> {
        if self.closed {
            return Err(TranscriptError::WriterClosed);
        }

        writeln!(self.w, "{}", block.flattened())?;
        self.w.flush()?;
        Ok(())
    }

    fn close(&mut self) -> TranscriptResult<()> {
        if self.closed {
            return Ok(());
        }
        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}
