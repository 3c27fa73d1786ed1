// SPDX-License-Identifier: MIT
//
// Error taxonomy.
//
// Only color-table misuse is a logical error. Everything on the rendering
// path succeeds unless the transport itself fails, in which case the
// driver's `io::Error` is carried through unchanged.

use thiserror::Error;

/// Errors returned by the screen API.
#[derive(Debug, Error)]
pub enum Error {
    /// Pair id is 0 or outside the color-pair table.
    #[error("invalid color pair {0}")]
    InvalidPair(u8),

    /// Foreground or background is not one of the 8 base colors.
    #[error("invalid color (fg {fg}, bg {bg}): colors must be below 8")]
    InvalidColor {
        /// Requested foreground.
        fg: u8,
        /// Requested background.
        bg: u8,
    },

    /// The driver failed to read from or write to its transport.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
