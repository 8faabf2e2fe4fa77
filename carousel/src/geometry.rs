use alloc::string::String;

use crate::{Breakpoint, CarouselError, CarouselOptions, Measurement};

/// Resolved layout parameters for the current viewport.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub slots_to_show: usize,
    pub device_tag: String,
    /// Distance between two consecutive slot starts.
    pub item_width_px: f32,
    pub container_width_px: f32,
    /// Per-item gutter reserved in partial-visible mode (`0` otherwise).
    pub gutter_px: f32,
}

impl Geometry {
    /// Picks the breakpoint for `measurement.viewport_width` and sizes items against
    /// `measurement.container_width`.
    ///
    /// Breakpoints are inclusive on both ends. When ranges overlap the last matching entry wins.
    pub fn resolve(
        options: &CarouselOptions,
        measurement: Measurement,
    ) -> Result<Self, CarouselError> {
        let container_width = measurement.container_width;
        if !container_width.is_finite() || container_width < 0.0 {
            return Err(CarouselError::InvalidContainerWidth(container_width));
        }

        let breakpoint = match_breakpoint(&options.breakpoints, measurement.viewport_width)
            .ok_or(CarouselError::NoMatchingBreakpoint {
                viewport_width: measurement.viewport_width,
            })?;
        if breakpoint.slots == 0 {
            cwarn!(device_tag = %breakpoint.device_tag, "breakpoint with zero slots");
            return Err(CarouselError::ZeroSlots {
                device_tag: breakpoint.device_tag.clone(),
            });
        }

        let geometry = Self {
            slots_to_show: breakpoint.slots,
            device_tag: breakpoint.device_tag.clone(),
            item_width_px: item_width(container_width, breakpoint.slots, options.center_mode),
            container_width_px: container_width,
            gutter_px: options.gutter_for(breakpoint),
        };
        cdebug!(
            slots = geometry.slots_to_show,
            device_tag = %geometry.device_tag,
            item_width = geometry.item_width_px,
            container_width,
            "Geometry::resolve"
        );
        Ok(geometry)
    }

    /// Width of one item as drawn (the slot stride minus the partial-visibility gutter).
    pub fn rendered_item_width_px(&self) -> f32 {
        (self.item_width_px - self.gutter_px).max(0.0)
    }

    /// Layout used before any client-side measurement exists.
    ///
    /// Items are sized as a percentage of the container using the `server_device_tag`
    /// breakpoint, so the first render and the first measured render agree on offset `0`.
    /// Returns `Ok(None)` when no server device tag is configured.
    pub fn server_side(options: &CarouselOptions) -> Result<Option<ServerLayout>, CarouselError> {
        let Some(tag) = options.server_device_tag.as_deref() else {
            return Ok(None);
        };
        let breakpoint = options
            .breakpoints
            .iter()
            .find(|b| b.device_tag == tag)
            .ok_or_else(|| CarouselError::UnknownDeviceTag(String::from(tag)))?;
        if breakpoint.slots == 0 {
            return Err(CarouselError::ZeroSlots {
                device_tag: breakpoint.device_tag.clone(),
            });
        }
        Ok(Some(ServerLayout {
            slots_to_show: breakpoint.slots,
            item_width_percent: 100.0 / breakpoint.slots as f32,
        }))
    }
}

/// Percentage-based layout for the render pass that happens before measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerLayout {
    pub slots_to_show: usize,
    pub item_width_percent: f32,
}

fn match_breakpoint(breakpoints: &[Breakpoint], viewport_width: f32) -> Option<&Breakpoint> {
    breakpoints.iter().rev().find(|b| b.contains(viewport_width))
}

fn item_width(container_width: f32, slots: usize, center_mode: bool) -> f32 {
    // Center mode keeps half a slot free on each side.
    let effective_slots = slots + usize::from(center_mode);
    round_half_away_from_zero(container_width / effective_slots as f32)
}

/// Rounds to the nearest integer, ties away from zero.
pub(crate) fn round_half_away_from_zero(v: f32) -> f32 {
    v.round()
}
