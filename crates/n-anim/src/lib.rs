// SPDX-License-Identifier: MIT

//! # n-anim — Layout and animation for n-canvas
//!
//! Everything above the screen buffer:
//!
//! - **[`position`]** — `Position` in percent of the frame, plus a row offset
//! - **[`easing`]** — cubic Bézier curves and the named `AnimationKind`s
//! - **[`animation`]** — `Animation` descriptors: curve, duration, direction, gradient
//! - **[`ui`]** — `UserInterface`, the drawing API (elements, tables, moves, patterns)
//! - **[`error`]** — `DrawError` for rejected draw requests
//!
//! Rendering itself lives in `n-term`; start it with
//! [`UserInterface::start_draw_loop`].

pub mod animation;
pub mod easing;
pub mod error;
pub mod position;
pub mod ui;

pub use animation::{Animation, Direction, Gradient};
pub use easing::{AnimationKind, CubicBezier};
pub use error::{DrawError, Side};
pub use position::{Delta, Position};
pub use ui::{Borders, UiConfig, UserInterface};
