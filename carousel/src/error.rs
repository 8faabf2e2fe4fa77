use alloc::string::String;

/// Configuration problems detected while resolving geometry.
///
/// These are fatal: they surface from `mount`/resize handling and are never swallowed.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarouselError {
    #[error("no breakpoint matches viewport width {viewport_width}px")]
    NoMatchingBreakpoint { viewport_width: f32 },

    #[error("breakpoint `{device_tag}` shows zero slots")]
    ZeroSlots { device_tag: String },

    #[error("container width must be finite and non-negative (got {0})")]
    InvalidContainerWidth(f32),

    #[error("server device tag `{0}` is not one of the breakpoint device tags")]
    UnknownDeviceTag(String),
}
