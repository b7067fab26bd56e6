//! Destinations for battle output.
//!
//! A [`LogSink`] receives every event line in the order it happened and a
//! board snapshot after each round. The engine only ever talks to the trait;
//! where the text ends up is the embedder's choice.
//!
//! # Provided Sinks
//!
//! - [`WriterSink`]: any [`io::Write`], e.g. stdout or a log file
//! - [`TeeSink`]: duplicates output to two sinks
//! - [`MemorySink`]: keeps lines in memory

use std::io::{self, Write};

use crate::display::{graveyard_line, Board};
use crate::event::BattleEvent;

/// Receives battle output.
pub trait LogSink {
    /// Writes one event line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the line cannot be written.
    fn record(&mut self, event: &BattleEvent) -> io::Result<()>;

    /// Writes a board snapshot followed by the graveyard line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the board cannot be written.
    fn render(&mut self, board: &Board, graveyard: &[String]) -> io::Result<()>;

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if flushing fails.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn record(&mut self, event: &BattleEvent) -> io::Result<()> {
        (**self).record(event)
    }

    fn render(&mut self, board: &Board, graveyard: &[String]) -> io::Result<()> {
        (**self).render(board, graveyard)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

// =============================================================================
// Writer Sink
// =============================================================================

/// Writes plain text lines to an [`io::Write`].
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn record(&mut self, event: &BattleEvent) -> io::Result<()> {
        writeln!(self.writer, "{event}")
    }

    fn render(&mut self, board: &Board, graveyard: &[String]) -> io::Result<()> {
        self.writer.write_all(board.render_text().as_bytes())?;
        writeln!(self.writer, "{}", graveyard_line(graveyard))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

// =============================================================================
// Tee Sink
// =============================================================================

/// Sends everything to two sinks, first `A` then `B`.
#[derive(Debug)]
pub struct TeeSink<A, B> {
    first: A,
    second: B,
}

impl<A: LogSink, B: LogSink> TeeSink<A, B> {
    /// Combines two sinks.
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Splits the tee back into its halves.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: LogSink, B: LogSink> LogSink for TeeSink<A, B> {
    fn record(&mut self, event: &BattleEvent) -> io::Result<()> {
        self.first.record(event)?;
        self.second.record(event)
    }

    fn render(&mut self, board: &Board, graveyard: &[String]) -> io::Result<()> {
        self.first.render(board, graveyard)?;
        self.second.render(board, graveyard)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}

// =============================================================================
// Memory Sink
// =============================================================================

/// Collects output lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
    boards: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            boards: 0,
        }
    }

    /// Every line written so far, board rows included.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of boards rendered.
    #[must_use]
    pub const fn boards(&self) -> usize {
        self.boards
    }

    /// Returns `true` if some line equals `line`.
    #[must_use]
    pub fn contains(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }
}

impl LogSink for MemorySink {
    fn record(&mut self, event: &BattleEvent) -> io::Result<()> {
        self.lines.push(event.to_string());
        Ok(())
    }

    fn render(&mut self, board: &Board, graveyard: &[String]) -> io::Result<()> {
        self.lines
            .extend(board.render_text().lines().map(str::to_owned));
        self.lines.push(graveyard_line(graveyard));
        self.boards += 1;
        Ok(())
    }
}
