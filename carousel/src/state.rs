use alloc::string::String;

use crate::{DragDirection, Phase};

/// A read-only snapshot for arrows, dots, button groups and hooks.
///
/// `current_index` is the clone-extended index; `real_index` is the same position translated
/// back into the caller's item sequence.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicState {
    pub current_index: usize,
    pub real_index: usize,
    pub slots_to_show: usize,
    /// Tag of the active breakpoint (`None` before the first measurement).
    pub device_tag: Option<String>,
    pub phase: Phase,
    pub is_sliding: bool,
    pub is_dragging: bool,
    pub direction: Option<DragDirection>,
    pub item_width_px: f32,
    pub container_width_px: f32,
    pub offset_px: f32,
    pub total_items: usize,
    pub displayed_len: usize,
    /// Not more items than slots: looping, dragging and auto-play are off.
    pub not_enough_items: bool,
    pub mounted: bool,
    pub is_at_start: bool,
    pub is_at_end: bool,
    pub show_arrows: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

/// Item width as the renderer should apply it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemWidth {
    Px(f32),
    /// Before measurement: a share of the container.
    Percent(f32),
    /// Before measurement with no server layout: let items size themselves.
    Auto,
}

/// Everything a renderer needs to position the track for one frame.
///
/// `translate_px` already folds in the drag preview, center/partial-visible adjustments and the
/// additional offset. None of those adjustments are written back into the committed offset.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub translate_px: f32,
    /// Whether to apply the slide transition when moving to `translate_px`.
    pub animate: bool,
    pub item_width: ItemWidth,
    /// Overflow should be clipped while no measurement exists.
    pub clip_overflow: bool,
}

/// One dot of the dot list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dot {
    /// First real item this dot stands for.
    pub real_start: usize,
    /// Clone-extended index to jump to when the dot is chosen.
    pub target_index: usize,
    pub active: bool,
}
