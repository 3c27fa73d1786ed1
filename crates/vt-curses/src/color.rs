// SPDX-License-Identifier: MIT
//
// Colors and the color-pair table.
//
// Only the eight classic ANSI colors exist here: the SGR rebuild encodes a
// color as a single digit after `3` or `4`, and a VT100 on the far end of a
// serial cable knows nothing more.
//
// A color pair is a foreground/background combination referenced by a small
// integer, the way curses applications think about color. The table holds
// `COLOR_PAIRS` slots; slot 0 is reserved and can never be defined.

use crate::attr::Attr;
use crate::config::{COLORS, COLOR_PAIRS};
use crate::error::{Error, Result};

// ─── Color ───────────────────────────────────────────────────────────────────

/// One of the eight base ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl Color {
    /// All colors in index order.
    pub const ALL: [Self; COLORS as usize] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Color for an index in `0..8`, or `None` for anything else.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Black),
            1 => Some(Self::Red),
            2 => Some(Self::Green),
            3 => Some(Self::Yellow),
            4 => Some(Self::Blue),
            5 => Some(Self::Magenta),
            6 => Some(Self::Cyan),
            7 => Some(Self::White),
            _ => None,
        }
    }

    /// The color's index (the digit used in SGR 3x / 4x).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl From<Color> for u8 {
    fn from(c: Color) -> Self {
        c.index()
    }
}

// ─── Color Pairs ─────────────────────────────────────────────────────────────

/// Fixed-size table mapping pair ids to color-only attribute words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPairs {
    slots: [Attr; COLOR_PAIRS],
}

impl ColorPairs {
    /// An empty table: every slot is [`Attr::NORMAL`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [Attr::NORMAL; COLOR_PAIRS],
        }
    }

    /// Whether `id` names a definable slot (1 through `COLOR_PAIRS - 1`).
    #[inline]
    #[must_use]
    pub const fn is_valid_id(id: u8) -> bool {
        id != 0 && (id as usize) < COLOR_PAIRS
    }

    /// Define pair `id` as `fg` on `bg`.
    ///
    /// The id is checked before the colors, so a call that is wrong on both
    /// counts reports [`Error::InvalidPair`]. On failure the table is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPair`] if `id` is 0 or past the table,
    /// [`Error::InvalidColor`] if either color is 8 or above.
    pub fn define(&mut self, id: u8, fg: u8, bg: u8) -> Result<()> {
        if !Self::is_valid_id(id) {
            return Err(Error::InvalidPair(id));
        }
        let (Some(f), Some(b)) = (Color::from_index(fg), Color::from_index(bg)) else {
            return Err(Error::InvalidColor { fg, bg });
        };
        self.slots[usize::from(id)] = Attr::colors(f, b);
        Ok(())
    }

    /// Look up pair `id`.
    ///
    /// An id that is valid but was never defined yields [`Attr::NORMAL`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPair`] if `id` is 0 or past the table.
    pub fn get(&self, id: u8) -> Result<Attr> {
        if Self::is_valid_id(id) {
            Ok(self.slots[usize::from(id)])
        } else {
            Err(Error::InvalidPair(id))
        }
    }

    /// Lenient lookup in the style of curses' `COLOR_PAIR(n)`: any id
    /// outside the table maps to [`Attr::NORMAL`] instead of failing.
    #[must_use]
    pub fn pair_or_normal(&self, id: u8) -> Attr {
        self.slots
            .get(usize::from(id))
            .copied()
            .unwrap_or(Attr::NORMAL)
    }
}

impl Default for ColorPairs {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
