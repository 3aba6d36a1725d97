// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Live status line shown while a benchmark samples.
//!
//! Purely visual: nothing here feeds back into the recorded data.

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Stdout, Write};

use crate::metrics::BenchmarkSummary;

/// Shown in place of the description until the first result is described.
pub const PENDING_DESCRIPTION: &str = "...";

/// Receives progress events from the harness.
pub trait Progress {
    /// A benchmark is about to run setup and sample.
    fn start(&mut self, name: &str) -> io::Result<()>;

    /// A sample completed.
    fn sample(
        &mut self,
        name: &str,
        description: Option<&str>,
        count: usize,
        last_ms: u64,
    ) -> io::Result<()>;

    /// Sampling finished; print the permanent summary.
    fn finish(&mut self, summary: &BenchmarkSummary) -> io::Result<()>;
}

/// Rewrites a single terminal line in place.
pub struct TerminalProgress<W: Write> {
    out: W,
}

impl TerminalProgress<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rewrite(&mut self, line: String) -> io::Result<()> {
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        )?;
        self.out.flush()
    }
}

impl<W: Write> Progress for TerminalProgress<W> {
    fn start(&mut self, name: &str) -> io::Result<()> {
        write!(self.out, "{name}: starting")?;
        self.out.flush()
    }

    fn sample(
        &mut self,
        name: &str,
        description: Option<&str>,
        count: usize,
        last_ms: u64,
    ) -> io::Result<()> {
        let description = description.unwrap_or(PENDING_DESCRIPTION);
        self.rewrite(format!(
            "{name} ({description}): {count} samples, last {last_ms}ms"
        ))
    }

    fn finish(&mut self, summary: &BenchmarkSummary) -> io::Result<()> {
        self.rewrite(format!("{summary}\n"))
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuietProgress;

impl Progress for QuietProgress {
    fn start(&mut self, _name: &str) -> io::Result<()> {
        Ok(())
    }

    fn sample(&mut self, _: &str, _: Option<&str>, _: usize, _: u64) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, _summary: &BenchmarkSummary) -> io::Result<()> {
        Ok(())
    }
}
