// SPDX-License-Identifier: MIT
//
// Attribute word — colors plus underline/reverse, and its packed form.
//
// Internally an attribute is a small struct with explicit optional colors.
// The packed 16-bit form exists for compatibility with code that stores
// attributes as curses `attr_t` values:
//
//   ┌──────────────┬──────────────┬───────────────────────┐
//   │ bits 15..12  │ bits 11..8   │ bits 7..0             │
//   │ background   │ foreground   │ flags (UL=0x01,       │
//   │ 0 = unset    │ 0 = unset    │        REV=0x02)      │
//   │ n = color n-1│ n = color n-1│                       │
//   └──────────────┴──────────────┴───────────────────────┘
//
// Colors are stored one-based so that an all-zero word means "terminal
// default everything".

use std::ops::BitOr;

use crate::color::Color;

const FLAGS_MASK: u16 = 0x00ff;
const FG_SHIFT: u16 = 8;
const FG_MASK: u16 = 0x0f00;
const BG_SHIFT: u16 = 12;
const BG_MASK: u16 = 0xf000;

// ─── Flags ───────────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attribute flags (the low byte of the packed word).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct AttrFlags: u8 {
        /// SGR 4 — underline.
        const UNDERLINE = 1 << 0;
        /// SGR 7 — reverse video.
        const REVERSE   = 1 << 1;
        /// Curses' "standout" is reverse video here.
        const STANDOUT  = Self::REVERSE.bits();
    }
}

// ─── Attr ────────────────────────────────────────────────────────────────────

/// A display style: optional foreground, optional background, flags.
///
/// `None` for a color means "leave it to the terminal default". Combine
/// with `|` to layer attributes without clobbering colors:
///
/// ```
/// use vt_curses::{Attr, Color};
///
/// let red = Attr::NORMAL.with_fg(Color::Red);
/// let style = red | Attr::UNDERLINE;
/// assert_eq!(style.fg(), Some(Color::Red));
/// assert!(style.is_underline());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Attr {
    fg: Option<Color>,
    bg: Option<Color>,
    flags: AttrFlags,
}

impl Attr {
    /// No colors, no flags.
    pub const NORMAL: Self = Self::new(None, None, AttrFlags::empty());
    /// Underline only.
    pub const UNDERLINE: Self = Self::new(None, None, AttrFlags::UNDERLINE);
    /// Reverse video only.
    pub const REVERSE: Self = Self::new(None, None, AttrFlags::REVERSE);
    /// Alias of [`Attr::REVERSE`].
    pub const STANDOUT: Self = Self::REVERSE;

    #[inline]
    #[must_use]
    pub const fn new(fg: Option<Color>, bg: Option<Color>, flags: AttrFlags) -> Self {
        Self { fg, bg, flags }
    }

    /// A color-only word, as stored in the pair table.
    #[inline]
    #[must_use]
    pub const fn colors(fg: Color, bg: Color) -> Self {
        Self::new(Some(fg), Some(bg), AttrFlags::empty())
    }

    #[inline]
    #[must_use]
    pub const fn fg(self) -> Option<Color> {
        self.fg
    }

    #[inline]
    #[must_use]
    pub const fn bg(self) -> Option<Color> {
        self.bg
    }

    #[inline]
    #[must_use]
    pub const fn flags(self) -> AttrFlags {
        self.flags
    }

    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = Some(fg);
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_flags(mut self, flags: AttrFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    #[inline]
    #[must_use]
    pub const fn is_underline(self) -> bool {
        self.flags.contains(AttrFlags::UNDERLINE)
    }

    #[inline]
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        self.flags.contains(AttrFlags::REVERSE)
    }

    /// Whether this is [`Attr::NORMAL`].
    #[inline]
    #[must_use]
    pub const fn is_normal(self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.flags.is_empty()
    }

    /// Layer `additions` on top of `self`.
    ///
    /// Flags are OR'd. A color in `additions` replaces ours; an unset color
    /// in `additions` keeps ours. This is what "turn underline on" needs:
    /// the current colors survive.
    #[must_use]
    pub const fn merge(self, additions: Self) -> Self {
        Self {
            fg: match additions.fg {
                Some(c) => Some(c),
                None => self.fg,
            },
            bg: match additions.bg {
                Some(c) => Some(c),
                None => self.bg,
            },
            flags: self.flags.union(additions.flags),
        }
    }

    /// The packed 16-bit form.
    #[must_use]
    pub const fn pack(self) -> u16 {
        let mut word = self.flags.bits() as u16;
        if let Some(c) = self.fg {
            word |= (c.index() as u16 + 1) << FG_SHIFT;
        }
        if let Some(c) = self.bg {
            word |= (c.index() as u16 + 1) << BG_SHIFT;
        }
        word
    }

    /// Decode a packed word.
    ///
    /// Unknown flag bits are dropped. Color nibbles above 8 do not name a
    /// color and decode as unset.
    #[must_use]
    pub const fn unpack(word: u16) -> Self {
        Self {
            fg: unpack_color((word & FG_MASK) >> FG_SHIFT),
            bg: unpack_color((word & BG_MASK) >> BG_SHIFT),
            flags: AttrFlags::from_bits_truncate((word & FLAGS_MASK) as u8),
        }
    }
}

/// Remove the one-based offset from a 4-bit color field.
#[allow(clippy::cast_possible_truncation)] // Field is masked to 4 bits.
const fn unpack_color(field: u16) -> Option<Color> {
    if field == 0 {
        None
    } else {
        Color::from_index((field - 1) as u8)
    }
}

impl BitOr for Attr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.merge(rhs)
    }
}

impl From<Attr> for u16 {
    fn from(a: Attr) -> Self {
        a.pack()
    }
}

impl From<u16> for Attr {
    fn from(word: u16) -> Self {
        Self::unpack(word)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
