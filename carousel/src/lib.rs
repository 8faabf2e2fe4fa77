//! A headless sliding-window carousel engine.
//!
//! For timer-driven orchestration (settling, clone correction, auto-play, gestures), see the
//! `carousel-adapter` crate.
//!
//! This crate focuses on the parts that must stay consistent with each other: which items are
//! shown, the committed track offset, and whether a position change is a real navigation or an
//! invisible clone-stitch jump. Infinite looping is faked by duplicating boundary items, and the
//! duplicates are modelled as an index map over the caller's sequence rather than copies.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport and container widths
//! - pointer and keyboard input
//! - a monotonic clock (through the adapter)
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod carousel;
mod clones;
mod error;
mod geometry;
mod gesture;
mod options;
mod state;
mod throttle;
mod types;

#[cfg(test)]
mod tests;

pub use carousel::Carousel;
pub use clones::CloneSet;
pub use error::CarouselError;
pub use geometry::{Geometry, ServerLayout};
pub use gesture::{GestureSession, Release};
pub use options::{
    AfterChangeCallback, BeforeChangeCallback, Breakpoint, CarouselOptions,
    DEFAULT_AUTO_PLAY_INTERVAL_MS, DEFAULT_MINIMUM_DRAG_PX, DEFAULT_TRANSITION_DURATION_MS,
};
pub use state::{Dot, Frame, ItemWidth, PublicState};
pub use throttle::ThrottleGate;
pub use types::{
    DisplayedItem, DragDirection, Measurement, Phase, PointerEvent, PointerKind, Recompute,
    Transition,
};
