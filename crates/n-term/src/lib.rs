// SPDX-License-Identifier: MIT
//
// n-term — Terminal rendering core for n-canvas.
//
// Everything between "a cell of the canvas changed" and "the terminal shows
// it": a thread-safe screen buffer of pre-styled cells with dirty tracking,
// frame composition that skips empty rows, and a background draw loop that
// flushes whole frames in one write and throttles itself when idle.
//
// Terminal control is done with plain ANSI escape sequences and a single
// ioctl for the window size. No TUI framework sits underneath; every byte
// sent to the terminal comes from `ansi`.

pub mod ansi;
pub mod color;
pub mod draw_loop;
pub mod frame;
pub mod output;
pub mod screen;
pub mod terminal;

pub use color::{ColorCode, paint};
pub use draw_loop::{DrawLoop, FrameClock, LoopConfig, StopSignal};
pub use output::TerminalOutput;
pub use screen::ScreenBuffer;
pub use terminal::{FixedSize, Size, SizeProvider, TerminalSize};
