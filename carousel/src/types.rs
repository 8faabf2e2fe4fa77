/// Where the engine is in its slide lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    /// An animated transition is in flight.
    Sliding,
    /// A non-animated clone-stitch jump is being applied.
    ///
    /// Transient: `Carousel::correct_boundary` enters and leaves it within one call, so snapshots
    /// taken between calls never report it.
    Correcting,
}

/// How the renderer should move from the previous offset to the current one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transition {
    Animated,
    /// Snap without a visible transition (clone stitching, resize, drag cancel).
    #[default]
    Instant,
}

/// The way the pointer travelled during a drag, relative to where it started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragDirection {
    /// Pointer moved left: reveals the following items.
    Left,
    /// Pointer moved right: reveals the preceding items.
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            kind: PointerKind::Mouse,
        }
    }

    pub fn touch(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            kind: PointerKind::Touch,
        }
    }

    pub fn is_touch(&self) -> bool {
        self.kind == PointerKind::Touch
    }
}

/// A layout observation supplied by the UI layer.
///
/// `viewport_width` selects the breakpoint; `container_width` sizes the items.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    pub viewport_width: f32,
    pub container_width: f32,
}

impl Measurement {
    pub fn new(viewport_width: f32, container_width: f32) -> Self {
        Self {
            viewport_width,
            container_width,
        }
    }
}

/// One slot of the clone-extended sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayedItem {
    pub displayed_index: usize,
    /// Index into the caller's item sequence.
    pub real_index: usize,
    pub is_clone: bool,
}

/// Why the clone set is being rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recompute {
    /// First client-side measurement.
    Mount,
    /// Breakpoint or container size changed; keep `current_index` numerically stable.
    Resize,
    /// The number of real items changed.
    ItemsChanged,
}
