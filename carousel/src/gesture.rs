use crate::geometry::round_half_away_from_zero;
use crate::{DragDirection, PointerEvent, PointerKind};

/// Transient record of one drag/swipe, alive from pointer-down to pointer-up/leave.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureSession {
    pub start_x: f32,
    pub start_y: f32,
    pub last_x: f32,
    pub direction: Option<DragDirection>,
    pub kind: PointerKind,
    /// Committed offset when the gesture started; previews are measured from here.
    pub origin_offset_px: f32,
    /// Last preview offset produced by a horizontal move.
    pub preview_offset_px: Option<f32>,
}

impl GestureSession {
    pub fn start(event: PointerEvent, origin_offset_px: f32) -> Self {
        Self {
            start_x: event.x,
            start_y: event.y,
            last_x: event.x,
            direction: None,
            kind: event.kind,
            origin_offset_px,
            preview_offset_px: None,
        }
    }

    /// Horizontal travel since pointer-down (negative when dragged left).
    pub fn delta_x(&self) -> f32 {
        self.last_x - self.start_x
    }
}

/// What a finished gesture asks the navigation layer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    Advance(usize),
    Retreat(usize),
    /// Too short: put the track back where it was.
    Cancel,
}

/// `true` when a move mostly travels vertically and should be left to page scrolling.
pub(crate) fn is_vertical(session: &GestureSession, event: &PointerEvent) -> bool {
    let dx = (event.x - session.start_x).abs();
    let dy = (event.y - session.start_y).abs();
    dx <= dy
}

pub(crate) fn direction_of(delta_x: f32) -> Option<DragDirection> {
    if delta_x < 0.0 {
        Some(DragDirection::Left)
    } else if delta_x > 0.0 {
        Some(DragDirection::Right)
    } else {
        None
    }
}

/// Origin plus travel, held inside `[min_offset, 0]` so neither end reveals empty space.
pub(crate) fn preview_offset(origin_offset_px: f32, delta_x: f32, min_offset_px: f32) -> f32 {
    (origin_offset_px + delta_x).clamp(min_offset_px.min(0.0), 0.0)
}

pub(crate) fn release_decision(delta_x: f32, minimum_drag_px: f32, item_width_px: f32) -> Release {
    let distance = delta_x.abs();
    if distance == 0.0 || distance < minimum_drag_px || item_width_px <= 0.0 {
        return Release::Cancel;
    }
    let passed = round_half_away_from_zero(distance / item_width_px).max(1.0) as usize;
    if delta_x < 0.0 {
        Release::Advance(passed)
    } else {
        Release::Retreat(passed)
    }
}
