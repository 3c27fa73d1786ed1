// SPDX-License-Identifier: MIT
//
// vt-curses — a minimal curses-style screen API over ANSI/VT100.
//
// Just enough curses to drive a small full-screen editor: cursor moves,
// character output, colors, underline/reverse, raw and echo input. Output
// is a tiny subset of VT100 escape sequences sent through a pluggable
// driver, so the same screen logic runs over a POSIX terminal or a bare
// UART with no line discipline at all.
//
// The layering, leaves first:
//
//   driver  → byte transport (POSIX termios, serial port, in-memory)
//   attr    → attribute word: colors + underline/reverse, packed form
//   color   → the 8 base colors and the color-pair table
//   ansi    → pure escape-sequence encoders
//   output  → the state cache that suppresses redundant escapes
//   screen  → the public curses-style API tying it all together
//
// There is no global state. A `Screen` owns its driver, its cache and its
// pair table; tests run any number of them side by side.

pub mod ansi;
pub mod attr;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod output;
pub mod screen;
pub mod unctrl;

pub use attr::{Attr, AttrFlags};
pub use color::{Color, ColorPairs};
pub use driver::Driver;
pub use error::{Error, Result};
pub use output::Position;
pub use screen::Screen;
pub use unctrl::{Unctrl, unctrl};
