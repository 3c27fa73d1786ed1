// SPDX-License-Identifier: MIT
//
// Output drivers — the byte transport under the screen.
//
// Everything above this module speaks in escape sequences; everything below
// it is a physical link. A driver is an `io::Write` plus the few line-
// discipline knobs curses needs (raw, echo) and a blocking one-byte read.
//
// Three drivers ship with the crate:
//
//   PosixDriver    — stdin/stdout of a Unix tty, termios for raw/echo
//   SerialDriver   — a UART behind the `SerialPort` trait; no line
//                    discipline, so raw/echo are no-ops
//   MemoryDriver   — records everything in memory, for tests
//
// The driver is picked by whoever builds the `Screen`, not by a cfg switch
// inside the library.

use std::io::{self, Write};
use std::time::Duration;

mod memory;
#[cfg(unix)]
mod posix;
mod serial;

pub use memory::MemoryDriver;
#[cfg(unix)]
pub use posix::PosixDriver;
pub use serial::{SerialDriver, SerialPort, StreamPort};

/// A byte transport with just enough line-discipline control for curses.
///
/// Writes go through [`io::Write`]; [`flush`](io::Write::flush) forces any
/// buffered output onto the link. Unbuffered transports make it a no-op.
pub trait Driver: Write {
    /// Disable (`true`) or restore (`false`) canonical input and signal
    /// generation. No-op on transports without a line discipline.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the mode change.
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()>;

    /// Enable or disable the transport's own echo of typed input. No-op on
    /// transports without a line discipline.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the mode change.
    fn set_local_echo(&mut self, enabled: bool) -> io::Result<()>;

    /// Read one byte, blocking.
    ///
    /// `None` waits forever. A driver that cannot time out treats
    /// `Some(_)` the same as `None`.
    ///
    /// # Errors
    ///
    /// `TimedOut` if a honored timeout expires, `UnexpectedEof` if the
    /// input is closed, or any transport error.
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<u8>;

    /// Discard input received but not yet read.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails to drop its input queue.
    fn flush_input(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Write a single byte.
    ///
    /// # Errors
    ///
    /// Propagates the transport's write error.
    fn write_byte(&mut self, b: u8) -> io::Result<()> {
        self.write_all(&[b])
    }

    /// Write a string verbatim.
    ///
    /// # Errors
    ///
    /// Propagates the transport's write error.
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_all(s.as_bytes())
    }
}

impl<D: Driver + ?Sized> Driver for &mut D {
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_raw_mode(enabled)
    }

    fn set_local_echo(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_local_echo(enabled)
    }

    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<u8> {
        (**self).read_byte(timeout)
    }

    fn flush_input(&mut self) -> io::Result<()> {
        (**self).flush_input()
    }
}

/// Mirror bytes headed for the wire to `tracing`.
///
/// Compiled in only with the `trace-output` feature; has no effect on the
/// transport either way.
#[cfg(feature = "trace-output")]
#[inline]
pub(crate) fn trace_wire(bytes: &[u8]) {
    tracing::trace!(target: "vt_curses::wire", out = %bytes.escape_ascii());
}

#[cfg(not(feature = "trace-output"))]
#[inline]
pub(crate) const fn trace_wire(_bytes: &[u8]) {}

// ─── Tests ───────────────────────────────────────────────────────────────────
