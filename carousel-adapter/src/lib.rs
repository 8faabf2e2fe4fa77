//! Adapter utilities for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic and has no clock. This crate provides the time-driven
//! half an adapter needs:
//!
//! - A [`Controller`] that owns slide settling, deferred clone-band correction, resize settle
//!   passes, auto-play and the shared navigation throttle
//! - Tween-based offset sampling for renderers that draw every frame
//! - Key code mapping for keyboard navigation
//!
//! Time is passed in explicitly as `now_ms`, so the whole controller can be driven by a fake
//! clock in tests.
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod controller;
mod input;
mod timers;
mod tween;


pub use controller::{Controller, MeasureProvider};
pub use input::Key;
pub use timers::{Timer, TimerKind, TimerQueue};
pub use tween::{Easing, Tween};
