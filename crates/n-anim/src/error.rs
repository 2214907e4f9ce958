// SPDX-License-Identifier: MIT

//! Errors returned by the drawing API.
//!
//! Only invalid *requests* are errors. Coordinates that fall off the canvas
//! are clamped or wrapped, and terminal I/O failures are logged, never
//! returned. A call that fails with a [`DrawError`] has not touched the
//! screen buffer.

use thiserror::Error;

/// Which border margin a setter was asked to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

/// A rejected drawing or configuration request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("start position is missing")]
    MissingStart,
    #[error("end position is missing")]
    MissingEnd,
    #[error("text cannot be empty")]
    EmptyText,
    #[error("animation duration cannot be negative, got {0} ms")]
    NegativeDuration(i64),
    #[error("{side} border must be between 0 and 50 percent, got {percent}")]
    BorderOutOfRange { side: Side, percent: i32 },
}
