// SPDX-License-Identifier: MIT
//
// Serial driver — curses over a bare UART.
//
// A UART has no kernel line discipline: no canonical mode, no echo, no
// signals. Whatever the other end types arrives byte by byte, and whatever
// we send goes out immediately. So raw and echo toggles are no-ops, flush is
// a no-op (nothing is buffered here), and every write is pushed straight to
// the port.
//
// The hardware itself sits behind `SerialPort`: implement `put`/`get` with
// your board's register access (or HAL call) and hand it to `SerialDriver`.
// `StreamPort` covers the hosted case where the UART is just a byte stream,
// e.g. an opened `/dev/ttyUSB0`.

use std::io::{self, Read, Write};
use std::time::Duration;

use super::{Driver, trace_wire};

// ─── SerialPort ──────────────────────────────────────────────────────────────

/// Register-level access to a UART.
pub trait SerialPort {
    /// Transmit one byte, blocking until the transmitter accepts it.
    ///
    /// # Errors
    ///
    /// Returns an error if the peripheral reports a transmit fault.
    fn put(&mut self, byte: u8) -> io::Result<()>;

    /// Receive one byte, blocking until one arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the peripheral reports a receive fault.
    fn get(&mut self) -> io::Result<u8>;
}

/// A [`SerialPort`] over any byte stream.
#[derive(Debug)]
pub struct StreamPort<T> {
    inner: T,
}

impl<T: Read + Write> StreamPort<T> {
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Give back the wrapped stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write> SerialPort for StreamPort<T> {
    fn put(&mut self, byte: u8) -> io::Result<()> {
        self.inner.write_all(&[byte])?;
        self.inner.flush()
    }

    fn get(&mut self) -> io::Result<u8> {
        let mut b = [0u8; 1];
        self.inner.read_exact(&mut b)?;
        Ok(b[0])
    }
}

// ─── SerialDriver ────────────────────────────────────────────────────────────

/// Unbuffered [`Driver`] over a [`SerialPort`].
///
/// The read timeout is accepted and ignored: a UART receive is a plain
/// blocking wait on the data-ready flag.
#[derive(Debug)]
pub struct SerialDriver<P> {
    port: P,
}

impl<P: SerialPort> SerialDriver<P> {
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    #[inline]
    pub const fn port(&self) -> &P {
        &self.port
    }

    #[inline]
    pub const fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }
}

impl<P: SerialPort> Write for SerialDriver<P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut sent = 0;
        for &b in buf {
            if let Err(e) = self.port.put(b) {
                if sent == 0 {
                    return Err(e);
                }
                break;
            }
            sent += 1;
        }
        trace_wire(&buf[..sent]);
        Ok(sent)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<P: SerialPort> Driver for SerialDriver<P> {
    fn set_raw_mode(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }

    fn set_local_echo(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }

    fn read_byte(&mut self, _timeout: Option<Duration>) -> io::Result<u8> {
        self.port.get()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
