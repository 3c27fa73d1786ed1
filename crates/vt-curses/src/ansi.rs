// SPDX-License-Identifier: MIT
//
// ANSI/VT100 escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit — that's the `ScreenWriter`'s job. This
// module only knows the byte-level encoding of the handful of commands a
// VT100 understands and this library needs.
//
// Cursor positions are 0-indexed in our API and converted to 1-indexed for
// the terminal.

use std::io::{self, Write};

use crate::attr::Attr;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(row, col)` using CUP (Cursor Position).
///
/// Coordinates are not clamped. Out-of-range positions are sent as-is and
/// the terminal decides what to do with them.
#[inline]
pub fn cursor_to(w: &mut impl Write, row: u16, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(row) + 1, u32::from(col) + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2). The cursor does not move.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Clear from the cursor to the end of the line (EL 0).
#[inline]
pub fn clear_to_eol(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

/// Reset insert/replace mode to replace (IRM off).
#[inline]
pub fn replace_mode(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[4l")
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// Emit a full SGR rebuild for `attr`.
///
/// Always starts from SGR 0 and re-adds every field that is set:
///
/// ```text
/// ESC [ 0 [;3<fg>] [;4<bg>] [;4] [;7] m
/// ```
///
/// Underline and background both start with `;4`. Parameters are
/// `;`-separated, so the terminal still parses `;4` (underline) and `;4<n>`
/// (background) apart.
pub fn sgr(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    w.write_all(b"\x1b[0")?;
    if let Some(fg) = attr.fg() {
        w.write_all(&[b';', b'3', b'0' + fg.index()])?;
    }
    if let Some(bg) = attr.bg() {
        w.write_all(&[b';', b'4', b'0' + bg.index()])?;
    }
    if attr.is_underline() {
        w.write_all(b";4")?;
    }
    if attr.is_reverse() {
        w.write_all(b";7")?;
    }
    w.write_all(b"m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
