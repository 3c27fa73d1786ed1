// SPDX-License-Identifier: MIT
//
// Fixed screen configuration.
//
// The geometry is never queried from the transport: a serial link has no
// TIOCGWINSZ, and the editor this library serves lays itself out for a
// classic 80×24 VT100.

/// Number of screen rows.
pub const SCREEN_ROWS: u16 = 24;

/// Number of screen columns.
pub const SCREEN_COLS: u16 = 80;

/// Slots in the color-pair table. Slot 0 is reserved and never populated.
pub const COLOR_PAIRS: usize = 16;

/// Number of base colors (black through white).
pub const COLORS: u8 = 8;
