// SPDX-License-Identifier: MIT
//
// Screen — the curses-style public API.
//
// A `Screen` owns a driver, the cursor/attribute cache and the color-pair
// table. Each call is a thin composition: ask the cache whether anything
// needs sending, encode it, push it through the driver.
//
// Session lifecycle mirrors curses:
//
//   Screen::init(driver)   echo off, normal attrs, clear, home
//   ... addstr / move_to / attrset / getch ...
//   screen.end()           bottom-left, normal attrs, clear line, show
//                          cursor, replace mode, flush, echo back on
//
// `end` also runs on drop if the session is still open, so an early return
// or a panic unwinding through the editor restores the terminal.
//
// Echo and keypad are advisory flags here. Terminal echo is switched off
// for the whole session, `getch` never echoes, and no escape-sequence key
// decoding happens even with keypad on: what arrives on the wire is what
// `getch` returns, one byte at a time.

use std::time::Duration;

use crate::ansi;
use crate::attr::Attr;
use crate::color::ColorPairs;
use crate::config::SCREEN_ROWS;
use crate::driver::Driver;
use crate::error::Result;
use crate::output::{Position, ScreenWriter};

/// A full-screen terminal session over driver `D`.
///
/// ```
/// use vt_curses::{Attr, Color, Screen};
/// use vt_curses::driver::MemoryDriver;
///
/// let mut scr = Screen::init(MemoryDriver::new())?;
/// scr.init_pair(1, Color::Yellow, Color::Blue)?;
/// scr.attrset(scr.color_pair(1)?)?;
/// scr.mvaddstr(2, 4, "hello")?;
/// scr.refresh()?;
/// scr.end()?;
/// # Ok::<(), vt_curses::Error>(())
/// ```
pub struct Screen<D: Driver> {
    driver: D,
    writer: ScreenWriter,
    pairs: ColorPairs,
    started: bool,
    echo: bool,
    keypad: bool,
}

impl<D: Driver> Screen<D> {
    /// Start a session on `driver`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn init(driver: D) -> Result<Self> {
        let mut scr = Self {
            driver,
            writer: ScreenWriter::new(),
            pairs: ColorPairs::new(),
            started: false,
            echo: true,
            keypad: false,
        };

        scr.driver.set_local_echo(false)?;
        if let Err(e) = scr.home() {
            let _ = scr.driver.set_local_echo(true);
            return Err(e);
        }
        scr.started = true;
        tracing::debug!("screen session started");
        Ok(scr)
    }

    fn home(&mut self) -> Result<()> {
        self.attrset(Attr::NORMAL)?;
        self.clear()?;
        self.move_to(0, 0)
    }

    /// End the session and hand the terminal back in a sane state.
    ///
    /// Idempotent: does nothing if the session is not running.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn end(&mut self) -> Result<()> {
        if !self.started {
            return Ok(());
        }

        self.move_to(SCREEN_ROWS - 1, 0)?;
        self.attrset(Attr::NORMAL)?;
        self.clrtoeol()?;
        self.curs_set(true)?;
        ansi::replace_mode(&mut self.driver)?;
        self.refresh()?;
        self.driver.set_local_echo(true)?;
        self.started = false;
        tracing::debug!("screen session ended");
        Ok(())
    }

    // ── Colors ──────────────────────────────────────────────────────

    /// Colors are always available; kept for curses compatibility.
    ///
    /// # Errors
    ///
    /// Never fails.
    #[allow(clippy::unused_self, clippy::missing_const_for_fn)]
    pub fn start_color(&mut self) -> Result<()> {
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn has_colors(&self) -> bool {
        true
    }

    /// Hardware line insert/delete is never used; accepted and ignored.
    #[allow(clippy::unused_self)]
    pub const fn idlok(&mut self, _enabled: bool) {}

    /// Define color pair `id` as `fg` on `bg`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPair`](crate::Error::InvalidPair) for id 0 or past
    /// the table, [`Error::InvalidColor`](crate::Error::InvalidColor) for
    /// colors 8 and up.
    pub fn init_pair(&mut self, id: u8, fg: impl Into<u8>, bg: impl Into<u8>) -> Result<()> {
        let (fg, bg) = (fg.into(), bg.into());
        self.pairs.define(id, fg, bg)?;
        tracing::debug!(id, fg, bg, "init_pair");
        Ok(())
    }

    /// Attribute word of pair `id`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPair`](crate::Error::InvalidPair) for id 0 or past
    /// the table.
    pub fn color_pair(&self, id: u8) -> Result<Attr> {
        self.pairs.get(id)
    }

    #[inline]
    #[must_use]
    pub const fn pairs(&self) -> &ColorPairs {
        &self.pairs
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Read one raw byte, blocking until it arrives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails or its
    /// input is closed.
    pub fn getch(&mut self) -> Result<u8> {
        Ok(self.driver.read_byte(None)?)
    }

    /// Read one raw byte, giving up after `timeout` where the driver
    /// supports it (see [`Driver::read_byte`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) with kind `TimedOut` on
    /// timeout, or any driver failure.
    pub fn getch_timeout(&mut self, timeout: Duration) -> Result<u8> {
        Ok(self.driver.read_byte(Some(timeout))?)
    }

    /// Throw away typed-ahead input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn flushinp(&mut self) -> Result<()> {
        Ok(self.driver.flush_input()?)
    }

    /// Deliver keys immediately, including interrupt characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn raw(&mut self) -> Result<()> {
        Ok(self.driver.set_raw_mode(true)?)
    }

    /// Undo [`raw`](Self::raw).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn noraw(&mut self) -> Result<()> {
        Ok(self.driver.set_raw_mode(false)?)
    }

    pub const fn echo(&mut self) {
        self.echo = true;
    }

    pub const fn noecho(&mut self) {
        self.echo = false;
    }

    pub const fn keypad(&mut self, enabled: bool) {
        self.keypad = enabled;
    }

    // ── Output ──────────────────────────────────────────────────────

    /// Show or hide the cursor. Always sent, never cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn curs_set(&mut self, visible: bool) -> Result<()> {
        if visible {
            ansi::cursor_show(&mut self.driver)?;
        } else {
            ansi::cursor_hide(&mut self.driver)?;
        }
        Ok(())
    }

    /// Write one byte (see [`ScreenWriter::put_char`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn addch(&mut self, ch: u8) -> Result<()> {
        Ok(self.writer.put_char(&mut self.driver, ch)?)
    }

    /// Write a whole string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn addstr(&mut self, s: impl AsRef<[u8]>) -> Result<()> {
        self.addnstr(s, None)
    }

    /// Write at most `n` bytes of `s`; `None` writes all of it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn addnstr(&mut self, s: impl AsRef<[u8]>, n: Option<usize>) -> Result<()> {
        let bytes = s.as_ref();
        let bytes = &bytes[..n.map_or(bytes.len(), |n| n.min(bytes.len()))];
        tracing::debug!(s = %bytes.escape_ascii(), "addstr");
        Ok(self.writer.put_bytes(&mut self.driver, bytes)?)
    }

    /// Move, then write `s`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn mvaddstr(&mut self, row: u16, col: u16, s: impl AsRef<[u8]>) -> Result<()> {
        self.move_to(row, col)?;
        self.addstr(s)
    }

    /// Turn on the flags and colors set in `additions`, keeping the rest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn attron(&mut self, additions: Attr) -> Result<()> {
        self.writer.merge_attr(&mut self.driver, additions)?;
        Ok(())
    }

    /// Replace the active attribute word.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn attrset(&mut self, attr: Attr) -> Result<()> {
        self.writer.apply_attr(&mut self.driver, attr)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn standout(&mut self) -> Result<()> {
        self.attron(Attr::STANDOUT)
    }

    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn standend(&mut self) -> Result<()> {
        self.attrset(Attr::NORMAL)
    }

    /// Erase the whole screen. The cursor stays where it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn clear(&mut self) -> Result<()> {
        Ok(ansi::clear_screen(&mut self.driver)?)
    }

    /// Erase from the cursor to the end of its line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn clrtoeol(&mut self) -> Result<()> {
        Ok(ansi::clear_to_eol(&mut self.driver)?)
    }

    /// Move the cursor; silent if it is already there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn move_to(&mut self, row: u16, col: u16) -> Result<()> {
        self.writer.move_cursor(&mut self.driver, row, col)?;
        Ok(())
    }

    /// Push buffered output to the terminal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the driver fails.
    pub fn refresh(&mut self) -> Result<()> {
        Ok(self.driver.flush()?)
    }

    // ── State ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    #[inline]
    #[must_use]
    pub const fn is_echo(&self) -> bool {
        self.echo
    }

    #[inline]
    #[must_use]
    pub const fn is_keypad(&self) -> bool {
        self.keypad
    }

    /// Where the library believes the cursor is.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.writer.cursor()
    }

    /// The attribute word last sent to the terminal.
    #[inline]
    #[must_use]
    pub const fn attr(&self) -> Attr {
        self.writer.attr()
    }

    #[inline]
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    #[inline]
    pub const fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: Driver> Drop for Screen<D> {
    fn drop(&mut self) {
        if self.started {
            let _ = self.end();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::color::Color;
    use crate::driver::MemoryDriver;
    use crate::error::Error;

    /// A started screen with the init output already discarded.
    fn screen() -> Screen<MemoryDriver> {
        let mut scr = Screen::init(MemoryDriver::new()).unwrap();
        scr.driver_mut().take_output();
        scr
    }

    fn output(scr: &mut Screen<MemoryDriver>) -> String {
        String::from_utf8(scr.driver_mut().take_output()).unwrap()
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    #[test]
    fn init_clears_and_homes() {
        let mut scr = Screen::init(MemoryDriver::new()).unwrap();
        assert_eq!(output(&mut scr), "\x1b[2J\x1b[1;1H");
        assert!(scr.is_started());
        assert!(!scr.driver().is_echo());
        assert_eq!(scr.cursor(), Position::new(0, 0));
        assert_eq!(scr.attr(), Attr::NORMAL);
    }

    #[test]
    fn end_restores_terminal() {
        let mut scr = screen();
        scr.end().unwrap();
        assert_eq!(output(&mut scr), "\x1b[24;1H\x1b[K\x1b[?25h\x1b[4l");
        assert!(!scr.is_started());
        assert!(scr.driver().is_echo());
        assert_eq!(scr.driver().flushes(), 1);
    }

    #[test]
    fn end_resets_active_attributes() {
        let mut scr = screen();
        scr.attrset(Attr::REVERSE).unwrap();
        scr.driver_mut().take_output();
        scr.end().unwrap();
        assert_eq!(output(&mut scr), "\x1b[24;1H\x1b[0m\x1b[K\x1b[?25h\x1b[4l");
    }

    #[test]
    fn end_twice_is_noop() {
        let mut scr = screen();
        scr.end().unwrap();
        scr.driver_mut().take_output();
        scr.end().unwrap();
        assert!(scr.driver().output().is_empty());
        assert_eq!(scr.driver().flushes(), 1);
    }

    #[test]
    fn drop_ends_session() {
        let mut driver = MemoryDriver::new();
        {
            let scr = Screen::init(&mut driver).unwrap();
            drop(scr);
        }
        assert!(driver.output().ends_with(b"\x1b[4l"));
        assert!(driver.is_echo());
    }

    /// Accepts line-discipline changes but fails every write.
    struct BrokenLink {
        echo: bool,
    }

    impl io::Write for BrokenLink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Driver for BrokenLink {
        fn set_raw_mode(&mut self, _enabled: bool) -> io::Result<()> {
            Ok(())
        }

        fn set_local_echo(&mut self, enabled: bool) -> io::Result<()> {
            self.echo = enabled;
            Ok(())
        }

        fn read_byte(&mut self, _timeout: Option<Duration>) -> io::Result<u8> {
            Err(io::Error::from(io::ErrorKind::UnexpectedEof))
        }
    }

    #[test]
    fn failed_init_restores_echo() {
        let mut link = BrokenLink { echo: true };
        let res = Screen::init(&mut link);
        assert!(matches!(res, Err(Error::Io(_))));
        drop(res);
        assert!(link.echo);
    }

    // ── Colors ──────────────────────────────────────────────────────

    #[test]
    fn colors_always_available() {
        let mut scr = screen();
        scr.start_color().unwrap();
        assert!(scr.has_colors());
    }

    #[test]
    fn idlok_is_silent() {
        let mut scr = screen();
        scr.idlok(true);
        scr.idlok(false);
        assert!(scr.driver().output().is_empty());
    }

    #[test]
    fn init_pair_and_lookup() {
        let mut scr = screen();
        scr.init_pair(1, Color::Red, Color::Black).unwrap();
        assert_eq!(scr.color_pair(1).unwrap(), Attr::colors(Color::Red, Color::Black));
        assert!(scr.driver().output().is_empty());
    }

    #[test]
    fn init_pair_rejects_bad_input() {
        let mut scr = screen();
        assert!(matches!(scr.init_pair(0, 1u8, 2u8), Err(Error::InvalidPair(0))));
        assert!(matches!(
            scr.init_pair(1, 8u8, 0u8),
            Err(Error::InvalidColor { fg: 8, bg: 0 })
        ));
        assert_eq!(scr.pairs(), &ColorPairs::new());
    }

    // ── Input ───────────────────────────────────────────────────────

    #[test]
    fn getch_returns_raw_bytes() {
        let mut scr = Screen::init(MemoryDriver::with_input(b"\x1b[A")).unwrap();
        scr.keypad(true);
        // No key decoding: the arrow sequence arrives byte by byte.
        assert_eq!(scr.getch().unwrap(), 0x1b);
        assert_eq!(scr.getch().unwrap(), b'[');
        assert_eq!(scr.getch().unwrap(), b'A');
    }

    #[test]
    fn getch_does_not_echo() {
        let mut scr = Screen::init(MemoryDriver::with_input(b"x")).unwrap();
        scr.echo();
        scr.driver_mut().take_output();
        assert_eq!(scr.getch().unwrap(), b'x');
        assert!(scr.driver().output().is_empty());
    }

    #[test]
    fn getch_on_closed_input_is_io_error() {
        let mut scr = screen();
        match scr.getch() {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected EOF, got {other:?}"),
        }
    }

    #[test]
    fn getch_timeout_reads_available_byte() {
        let mut scr = Screen::init(MemoryDriver::with_input(b"k")).unwrap();
        assert_eq!(scr.getch_timeout(Duration::from_millis(10)).unwrap(), b'k');
    }

    #[test]
    fn flushinp_discards_typeahead() {
        let mut scr = Screen::init(MemoryDriver::with_input(b"abc")).unwrap();
        scr.flushinp().unwrap();
        assert_eq!(scr.driver().pending_input(), 0);
    }

    #[test]
    fn raw_toggles_driver() {
        let mut scr = screen();
        scr.raw().unwrap();
        assert!(scr.driver().is_raw());
        scr.noraw().unwrap();
        assert!(!scr.driver().is_raw());
    }

    #[test]
    fn echo_and_keypad_are_flags_only() {
        let mut scr = screen();
        assert!(scr.is_echo());
        scr.noecho();
        assert!(!scr.is_echo());
        scr.echo();
        assert!(scr.is_echo());
        assert!(!scr.driver().is_echo());

        assert!(!scr.is_keypad());
        scr.keypad(true);
        assert!(scr.is_keypad());
    }

    // ── Output ──────────────────────────────────────────────────────

    #[test]
    fn curs_set_is_never_cached() {
        let mut scr = screen();
        scr.curs_set(false).unwrap();
        scr.curs_set(false).unwrap();
        scr.curs_set(true).unwrap();
        assert_eq!(output(&mut scr), "\x1b[?25l\x1b[?25l\x1b[?25h");
    }

    #[test]
    fn clear_is_never_cached() {
        let mut scr = screen();
        scr.clear().unwrap();
        scr.clear().unwrap();
        scr.clrtoeol().unwrap();
        scr.clrtoeol().unwrap();
        assert_eq!(output(&mut scr), "\x1b[2J\x1b[2J\x1b[K\x1b[K");
    }

    #[test]
    fn clear_keeps_cursor_cache() {
        // ED 2 leaves the cursor in place, so the cache stays valid and a
        // move to the current position is still suppressed.
        let mut scr = screen();
        scr.addstr("ab").unwrap();
        scr.clear().unwrap();
        scr.curs_set(false).unwrap();
        assert_eq!(scr.cursor(), Position::new(0, 2));
        scr.driver_mut().take_output();
        scr.move_to(0, 2).unwrap();
        assert!(scr.driver().output().is_empty());
        scr.move_to(0, 0).unwrap();
        assert_eq!(output(&mut scr), "\x1b[1;1H");
    }

    #[test]
    fn clear_keeps_attribute_cache() {
        let mut scr = screen();
        scr.attrset(Attr::UNDERLINE).unwrap();
        scr.clear().unwrap();
        scr.driver_mut().take_output();
        scr.attrset(Attr::UNDERLINE).unwrap();
        assert!(scr.driver().output().is_empty());
    }

    #[test]
    fn addnstr_truncates() {
        let mut scr = screen();
        scr.addnstr("hello", Some(3)).unwrap();
        assert_eq!(output(&mut scr), "hel");
        assert_eq!(scr.cursor(), Position::new(0, 3));
    }

    #[test]
    fn addnstr_longer_than_string() {
        let mut scr = screen();
        scr.addnstr("hi", Some(50)).unwrap();
        assert_eq!(output(&mut scr), "hi");
    }

    #[test]
    fn addnstr_none_is_natural_length() {
        let mut scr = screen();
        scr.addnstr(b"bytes", None).unwrap();
        assert_eq!(output(&mut scr), "bytes");
    }

    #[test]
    fn mvaddstr_moves_then_writes() {
        let mut scr = screen();
        scr.mvaddstr(5, 10, "x").unwrap();
        assert_eq!(output(&mut scr), "\x1b[6;11Hx");
        assert_eq!(scr.cursor(), Position::new(5, 11));
    }

    #[test]
    fn attron_layers_on_pair() {
        let mut scr = screen();
        scr.init_pair(2, Color::Green, Color::Black).unwrap();
        scr.attrset(scr.color_pair(2).unwrap()).unwrap();
        scr.attron(Attr::UNDERLINE).unwrap();
        assert_eq!(output(&mut scr), "\x1b[0;32;40m\x1b[0;32;40;4m");
    }

    #[test]
    fn standout_and_standend() {
        let mut scr = screen();
        scr.standout().unwrap();
        scr.standend().unwrap();
        assert_eq!(output(&mut scr), "\x1b[0;7m\x1b[0m");
        assert_eq!(scr.attr(), Attr::NORMAL);
    }

    #[test]
    fn refresh_flushes_without_output() {
        let mut scr = screen();
        scr.refresh().unwrap();
        assert_eq!(scr.driver().flushes(), 1);
        assert!(scr.driver().output().is_empty());
    }
}
