// SPDX-License-Identifier: MIT
//
// Stateful screen output — the escape-suppression cache.
//
// The terminal is stateful and a 9600-baud serial line is slow. A full-screen
// editor repaints constantly, and most repaints ask for the cursor position
// or the colors the terminal already has. `ScreenWriter` remembers what it
// last sent and stays silent when asked for the same thing again.
//
// What it tracks:
//
//   cursor — last position sent with CUP, then advanced by the characters
//            we write (printable +1, BS −1, CR/LF to column 0)
//   attr   — last attribute word sent with an SGR rebuild
//
// What it does NOT track: the fixed sequences (ED 2, EL, DECTCEM). None of
// them moves the cursor or touches SGR state on a VT100, so the cache stays
// correct across them. Raw control bytes other than BS/CR/LF are passed
// through with no tracking at all; their effect is the caller's business.
//
// There is no line wrap at the right margin: the column keeps counting past
// `SCREEN_COLS`, exactly as many characters as were written.

use std::io::{self, Write};

use crate::ansi;
use crate::attr::Attr;
use crate::config::SCREEN_ROWS;

const BS: u8 = 0x08;
const TAB: u8 = 0x09;
const LF: u8 = 0x0a;
const CR: u8 = 0x0d;

// ─── Position ────────────────────────────────────────────────────────────────

/// A 0-based screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

// ─── ScreenWriter ────────────────────────────────────────────────────────────

/// Cursor/attribute cache that emits escapes only when something changes.
///
/// Every method takes the destination writer explicitly; the cache itself
/// owns no I/O. Methods that may be suppressed return whether they wrote
/// anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenWriter {
    cursor: Position,
    attr: Attr,
}

impl ScreenWriter {
    /// Cursor on the bottom-left cell, normal attributes — where a shell
    /// prompt leaves a freshly started program.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor: Position::new(SCREEN_ROWS - 1, 0),
            attr: Attr::NORMAL,
        }
    }

    /// Last-known cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Last-applied attribute word.
    #[inline]
    #[must_use]
    pub const fn attr(&self) -> Attr {
        self.attr
    }

    /// Move the cursor, unless it is already at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`; the cache is left unchanged.
    pub fn move_cursor(&mut self, out: &mut impl Write, row: u16, col: u16) -> io::Result<bool> {
        let to = Position::new(row, col);
        if to == self.cursor {
            return Ok(false);
        }
        tracing::debug!(row, col, "move");
        ansi::cursor_to(out, row, col)?;
        self.cursor = to;
        Ok(true)
    }

    /// Switch to `attr` with a full SGR rebuild, unless it is already
    /// active.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`; the cache is left unchanged.
    pub fn apply_attr(&mut self, out: &mut impl Write, attr: Attr) -> io::Result<bool> {
        if attr == self.attr {
            return Ok(false);
        }
        tracing::debug!(attr = format_args!("{:#06x}", attr.pack()), "attrset");
        ansi::sgr(out, attr)?;
        self.attr = attr;
        Ok(true)
    }

    /// Layer `additions` onto the active attribute (see [`Attr::merge`]).
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn merge_attr(&mut self, out: &mut impl Write, additions: Attr) -> io::Result<bool> {
        self.apply_attr(out, self.attr.merge(additions))
    }

    /// Write one byte and account for its effect on the cursor.
    ///
    /// - BS moves left, but never past column 0 (and sends nothing there).
    /// - TAB is accepted and ignored.
    /// - LF clears the rest of the line first, then moves to the next row.
    /// - CR returns to column 0.
    /// - Printable ASCII advances one column.
    /// - Anything else is sent untouched and not tracked.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn put_char(&mut self, out: &mut impl Write, b: u8) -> io::Result<()> {
        match b {
            BS => {
                if self.cursor.col > 0 {
                    out.write_all(&[b])?;
                    self.cursor.col -= 1;
                }
            }
            // TODO: advance to the next multiple-of-8 tab stop with CUP.
            TAB => {}
            LF => {
                ansi::clear_to_eol(out)?;
                out.write_all(&[b])?;
                self.cursor.row = self.cursor.row.saturating_add(1);
                self.cursor.col = 0;
            }
            CR => {
                out.write_all(&[b])?;
                self.cursor.col = 0;
            }
            0x20..=0x7e => {
                out.write_all(&[b])?;
                self.cursor.col = self.cursor.col.saturating_add(1);
            }
            _ => {
                tracing::debug!(byte = format_args!("{b:#04x}"), "addch passthrough");
                out.write_all(&[b])?;
            }
        }
        Ok(())
    }

    /// [`put_char`](Self::put_char) over each byte, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first write error and returns it.
    pub fn put_bytes(&mut self, out: &mut impl Write, bytes: &[u8]) -> io::Result<()> {
        bytes.iter().try_for_each(|&b| self.put_char(out, b))
    }
}

impl Default for ScreenWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
