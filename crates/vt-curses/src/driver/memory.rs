// SPDX-License-Identifier: MIT
//
// In-memory driver — records output, replays scripted input.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

use super::Driver;

/// A driver that keeps everything in memory.
///
/// Output accumulates in a byte vector, flushes are counted, raw/echo state
/// is remembered, and reads are served from a queue filled with
/// [`push_input`](Self::push_input).
///
/// ```
/// use std::io::Write;
/// use vt_curses::Driver;
/// use vt_curses::driver::MemoryDriver;
///
/// let mut d = MemoryDriver::with_input(b"q");
/// d.write_all(b"\x1b[2J").unwrap();
/// assert_eq!(d.output(), b"\x1b[2J");
/// assert_eq!(d.read_byte(None).unwrap(), b'q');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDriver {
    output: Vec<u8>,
    input: VecDeque<u8>,
    flushes: usize,
    raw: bool,
    echo: bool,
}

impl MemoryDriver {
    /// Empty output, no input, cooked mode with echo on.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            output: Vec::new(),
            input: VecDeque::new(),
            flushes: 0,
            raw: false,
            echo: true,
        }
    }

    /// A driver whose reads will return `input`, in order.
    #[must_use]
    pub fn with_input(input: &[u8]) -> Self {
        let mut d = Self::new();
        d.push_input(input);
        d
    }

    /// Queue more bytes for [`read_byte`](Driver::read_byte).
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    /// Everything written so far.
    #[inline]
    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Take the recorded output, leaving it empty.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Number of bytes still waiting to be read.
    #[inline]
    #[must_use]
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Number of `flush()` calls.
    #[inline]
    #[must_use]
    pub const fn flushes(&self) -> usize {
        self.flushes
    }

    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.raw
    }

    #[inline]
    #[must_use]
    pub const fn is_echo(&self) -> bool {
        self.echo
    }
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MemoryDriver {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

impl Driver for MemoryDriver {
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        self.raw = enabled;
        Ok(())
    }

    fn set_local_echo(&mut self, enabled: bool) -> io::Result<()> {
        self.echo = enabled;
        Ok(())
    }

    fn read_byte(&mut self, _timeout: Option<Duration>) -> io::Result<u8> {
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }

    fn flush_input(&mut self) -> io::Result<()> {
        self.input.clear();
        Ok(())
    }
}
