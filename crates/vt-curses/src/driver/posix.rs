// SPDX-License-Identifier: MIT
//
// POSIX terminal driver — stdin/stdout of a Unix tty.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr, tcflush), isatty, poll and raw fd reads. These are the
// standard POSIX interfaces for terminal control — there is no safe
// alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// Raw mode here is the curses `raw()` of old, not `cfmakeraw`: only
// ICANON and ISIG are cleared, so output post-processing (ONLCR) keeps
// turning our `\n` into `\r\n`. Echo is the ECHO flag and nothing else.
//
// Reads go straight to fd 0 with `read(2)` rather than through `io::Stdin`.
// Stdin keeps its own buffer, and bytes hiding in it would make `poll(2)`
// report "nothing to read" while input is in fact waiting.
//
// The termios in effect when the driver was created is put back on drop,
// so a consumer that forgets `Screen::end` still leaves a working shell.

use std::io::{self, BufWriter, Stdout, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::Duration;

use super::{Driver, trace_wire};

/// [`Driver`] over the process's controlling terminal.
///
/// Output is buffered (like C stdio) until [`flush`](Write::flush). When
/// stdin is not a tty (pipes, CI), every line-discipline call succeeds
/// without doing anything.
pub struct PosixDriver {
    out: BufWriter<Stdout>,
    fd: RawFd,
    /// Termios at construction; `None` when stdin is not a tty.
    original: Option<libc::termios>,
}

impl PosixDriver {
    /// Open the driver on stdin/stdout and remember the current termios.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin is a tty but its attributes can't be read.
    pub fn new() -> io::Result<Self> {
        let fd = io::stdin().as_raw_fd();
        let original = if is_tty(fd) { Some(get_termios(fd)?) } else { None };

        Ok(Self {
            out: BufWriter::new(io::stdout()),
            fd,
            original,
        })
    }

    /// Whether stdin is a terminal.
    #[inline]
    #[must_use]
    pub const fn is_tty(&self) -> bool {
        self.original.is_some()
    }

    /// Set (`on`) or clear local-mode `flags`, leaving everything else.
    fn update_lflag(&self, flags: libc::tcflag_t, on: bool) -> io::Result<()> {
        if self.original.is_none() {
            return Ok(());
        }

        let mut t = get_termios(self.fd)?;
        if on {
            t.c_lflag |= flags;
        } else {
            t.c_lflag &= !flags;
            if flags & libc::ICANON != 0 {
                // VMIN=1, VTIME=0: read() blocks until one byte arrives.
                t.c_cc[libc::VMIN] = 1;
                t.c_cc[libc::VTIME] = 0;
            }
        }
        set_termios(self.fd, &t)
    }

    /// Wait up to `timeout` for stdin to become readable.
    fn wait_readable(&self, timeout: Duration) -> io::Result<bool> {
        let ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };

        loop {
            let ready = unsafe { libc::poll(&raw mut pfd, 1, ms) };
            if ready >= 0 {
                return Ok(ready > 0);
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
        }
    }
}

impl Write for PosixDriver {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        trace_wire(buf);
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Driver for PosixDriver {
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        self.update_lflag(libc::ICANON | libc::ISIG, !enabled)
    }

    fn set_local_echo(&mut self, enabled: bool) -> io::Result<()> {
        self.update_lflag(libc::ECHO, enabled)
    }

    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<u8> {
        if let Some(t) = timeout {
            if !self.wait_readable(t)? {
                return Err(io::Error::from(io::ErrorKind::TimedOut));
            }
        }

        let mut b = 0u8;
        loop {
            let n = unsafe { libc::read(self.fd, (&raw mut b).cast::<libc::c_void>(), 1) };
            match n {
                1 => return Ok(b),
                0 => return Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
                _ => {
                    let err = io::Error::last_os_error();
                    if err.kind() != io::ErrorKind::Interrupted {
                        return Err(err);
                    }
                }
            }
        }
    }

    fn flush_input(&mut self) -> io::Result<()> {
        if self.original.is_none() {
            return Ok(());
        }
        if unsafe { libc::tcflush(self.fd, libc::TCIFLUSH) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Drop for PosixDriver {
    fn drop(&mut self) {
        let _ = self.out.flush();
        if let Some(ref original) = self.original {
            let _ = set_termios(self.fd, original);
        }
    }
}

// ─── termios helpers ─────────────────────────────────────────────────────────

fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    unsafe {
        let mut t: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &raw mut t) != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(t)
    }
}

fn set_termios(fd: RawFd, t: &libc::termios) -> io::Result<()> {
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, t) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // These run under `cargo test`, where stdin may or may not be a tty.
    // They check that nothing panics and non-tty mode degrades to no-ops.

    #[test]
    fn new_succeeds() {
        let d = PosixDriver::new().unwrap();
        assert_eq!(d.is_tty(), is_tty(d.fd));
    }

    #[test]
    fn mode_toggles_round_trip() {
        let mut d = PosixDriver::new().unwrap();
        d.set_raw_mode(true).unwrap();
        d.set_local_echo(false).unwrap();
        d.set_local_echo(true).unwrap();
        d.set_raw_mode(false).unwrap();
    }

    #[test]
    fn flush_with_nothing_buffered() {
        let mut d = PosixDriver::new().unwrap();
        d.flush().unwrap();
    }

    #[test]
    fn drop_restores_without_panicking() {
        let mut d = PosixDriver::new().unwrap();
        d.set_raw_mode(true).unwrap();
        drop(d);
    }
}
