// SPDX-License-Identifier: MIT
//
// Printable names for raw bytes — curses' `unctrl()`.
//
//   0x20..=0x7e   itself                    'A'  → "A"
//   0x00..=0x1f   caret notation            0x01 → "^A"
//   0x7f          caret notation            0x7f → "^?"
//   0xa0..=0xfe   meta-dash notation        0xc1 → "M-A"
//   0x80..=0x9f   tilde notation (C1)       0x81 → "~A"
//   0xff          tilde notation            0xff → "~?"
//
// The result is returned by value in a four-byte inline buffer, so it can be
// kept, compared or printed without allocation.

use std::fmt;
use std::ops::Deref;

/// A short, owned, printable rendering of one byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unctrl {
    buf: [u8; 4],
    len: u8,
}

impl Unctrl {
    #[allow(clippy::cast_possible_truncation)] // At most 3 bytes.
    const fn new(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 4];
        let mut i = 0;
        while i < bytes.len() {
            buf[i] = bytes[i];
            i += 1;
        }
        Self {
            buf,
            len: bytes.len() as u8,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Every branch of `unctrl` produces ASCII only.
        std::str::from_utf8(&self.buf[..usize::from(self.len)]).unwrap_or_default()
    }
}

impl Deref for Unctrl {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Unctrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for Unctrl {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Unctrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Unctrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// Describe byte `c` in a short human-readable form.
#[must_use]
pub const fn unctrl(c: u8) -> Unctrl {
    match c {
        0x20..=0x7e => Unctrl::new(&[c]),
        0x00..=0x7f => Unctrl::new(&[b'^', c ^ 0x40]),
        0xa0..=0xfe => Unctrl::new(&[b'M', b'-', c ^ 0x80]),
        _ => Unctrl::new(&[b'~', c ^ 0xc0]),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_is_itself() {
        assert_eq!(unctrl(b'A'), "A");
        assert_eq!(unctrl(b' '), " ");
        assert_eq!(unctrl(b'~'), "~");
    }

    #[test]
    fn c0_controls_use_caret() {
        assert_eq!(unctrl(0x01), "^A");
        assert_eq!(unctrl(0x00), "^@");
        assert_eq!(unctrl(0x1b), "^[");
        assert_eq!(unctrl(0x7f), "^?");
    }

    #[test]
    fn high_printables_use_meta_dash() {
        assert_eq!(unctrl(0xc1), "M-A");
        assert_eq!(unctrl(0xa0), "M- ");
        assert_eq!(unctrl(0xfe), "M-~");
    }

    #[test]
    fn c1_controls_and_ff_use_tilde() {
        assert_eq!(unctrl(0x81), "~A");
        assert_eq!(unctrl(0x9b), "~[");
        assert_eq!(unctrl(0xff), "~?");
    }

    #[test]
    fn ff_differs_from_other_forms() {
        let s = unctrl(0xff);
        assert!(s.starts_with('~'));
        assert_ne!(s, unctrl(0x3f));
        assert_ne!(s, unctrl(0x7f));
        assert_ne!(s, unctrl(0xbf));
    }

    #[test]
    fn results_are_independent_values() {
        let a = unctrl(0x01);
        let b = unctrl(0xc1);
        assert_eq!(a.to_string(), "^A");
        assert_eq!(b.to_string(), "M-A");
    }

    #[test]
    fn every_byte_is_short_ascii() {
        for c in 0..=u8::MAX {
            let s = unctrl(c);
            assert!((1..=3).contains(&s.len()), "byte {c:#04x}");
            assert!(s.is_ascii(), "byte {c:#04x}");
        }
    }

    #[test]
    fn debug_is_quoted() {
        assert_eq!(format!("{:?}", unctrl(0x01)), "\"^A\"");
    }
}
