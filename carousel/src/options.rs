use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::PublicState;

/// A hook fired right before a navigation is applied.
///
/// The first argument is the clone-extended index the carousel is about to move to.
pub type BeforeChangeCallback = Arc<dyn Fn(usize, &PublicState) + Send + Sync>;

/// A hook fired once a navigation has settled (one transition duration after it started).
///
/// The first argument is the clone-extended index the carousel moved away from.
pub type AfterChangeCallback = Arc<dyn Fn(usize, &PublicState) + Send + Sync>;

pub const DEFAULT_TRANSITION_DURATION_MS: u64 = 400;
pub const DEFAULT_MINIMUM_DRAG_PX: f32 = 80.0;
pub const DEFAULT_AUTO_PLAY_INTERVAL_MS: u64 = 3000;

/// One row of the responsive table: how many slots to show for a viewport width range.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    /// Name reported to the presentation layer (e.g. `"desktop"`).
    pub device_tag: String,
    /// Inclusive lower bound of the viewport width.
    pub min_width: f32,
    /// Inclusive upper bound of the viewport width.
    pub max_width: f32,
    pub slots: usize,
    /// Overrides `CarouselOptions::partial_visibility_gutter_px` for this breakpoint.
    #[cfg_attr(feature = "serde", serde(default))]
    pub partial_visibility_gutter: Option<f32>,
}

impl Breakpoint {
    pub fn new(device_tag: impl Into<String>, min_width: f32, max_width: f32, slots: usize) -> Self {
        Self {
            device_tag: device_tag.into(),
            min_width,
            max_width,
            slots,
            partial_visibility_gutter: None,
        }
    }

    pub fn with_partial_visibility_gutter(mut self, gutter: f32) -> Self {
        self.partial_visibility_gutter = Some(gutter);
        self
    }

    pub fn contains(&self, viewport_width: f32) -> bool {
        viewport_width >= self.min_width && viewport_width <= self.max_width
    }
}

/// Configuration for [`crate::Carousel`].
///
/// Hooks are stored in `Arc`s so the options stay cheap to clone when an adapter tweaks a flag
/// and re-applies them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselOptions {
    /// Number of real items in the caller's sequence.
    pub count: usize,
    pub breakpoints: Vec<Breakpoint>,

    /// Loop past both ends using clones.
    pub infinite: bool,
    /// Reserve half a slot on each side so the active window sits in the middle.
    pub center_mode: bool,
    /// Show a sliver of the next item by shrinking every rendered item by a gutter.
    pub partial_visible: bool,
    pub partial_visibility_gutter_px: f32,

    /// Length of one slide animation; also the throttle window.
    pub transition_duration_ms: u64,
    /// Drags shorter than this snap back instead of navigating.
    pub minimum_drag_px: f32,

    pub auto_play: bool,
    pub auto_play_interval_ms: u64,

    /// Constant added to the rendered translate.
    pub additional_offset_px: f32,

    /// Items moved by arrows, keyboard and auto-play.
    pub slides_to_slide: usize,
    /// Mouse dragging.
    pub draggable: bool,
    /// Touch swiping.
    pub swipeable: bool,
    pub keyboard_control: bool,
    pub arrows: bool,
    /// Device tags on which arrows are hidden.
    pub remove_arrows_on_device: Vec<String>,
    pub show_dots: bool,
    /// Clicking an item navigates to it.
    pub focus_on_select: bool,
    /// Breakpoint used to lay items out before the first measurement (server render).
    pub server_device_tag: Option<String>,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub before_change: Option<BeforeChangeCallback>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub after_change: Option<AfterChangeCallback>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self::new(0, Vec::new())
    }
}

impl Clone for CarouselOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            breakpoints: self.breakpoints.clone(),
            infinite: self.infinite,
            center_mode: self.center_mode,
            partial_visible: self.partial_visible,
            partial_visibility_gutter_px: self.partial_visibility_gutter_px,
            transition_duration_ms: self.transition_duration_ms,
            minimum_drag_px: self.minimum_drag_px,
            auto_play: self.auto_play,
            auto_play_interval_ms: self.auto_play_interval_ms,
            additional_offset_px: self.additional_offset_px,
            slides_to_slide: self.slides_to_slide,
            draggable: self.draggable,
            swipeable: self.swipeable,
            keyboard_control: self.keyboard_control,
            arrows: self.arrows,
            remove_arrows_on_device: self.remove_arrows_on_device.clone(),
            show_dots: self.show_dots,
            focus_on_select: self.focus_on_select,
            server_device_tag: self.server_device_tag.clone(),
            before_change: self.before_change.clone(),
            after_change: self.after_change.clone(),
        }
    }
}

impl CarouselOptions {
    /// Creates options for `count` real items laid out by `breakpoints`.
    ///
    /// Everything else starts from the defaults: finite, not centered, 400ms transitions,
    /// 80px minimum drag, one item per step, mouse and touch dragging enabled.
    pub fn new(count: usize, breakpoints: Vec<Breakpoint>) -> Self {
        Self {
            count,
            breakpoints,
            infinite: false,
            center_mode: false,
            partial_visible: false,
            partial_visibility_gutter_px: 0.0,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            minimum_drag_px: DEFAULT_MINIMUM_DRAG_PX,
            auto_play: false,
            auto_play_interval_ms: DEFAULT_AUTO_PLAY_INTERVAL_MS,
            additional_offset_px: 0.0,
            slides_to_slide: 1,
            draggable: true,
            swipeable: true,
            keyboard_control: true,
            arrows: true,
            remove_arrows_on_device: Vec::new(),
            show_dots: false,
            focus_on_select: false,
            server_device_tag: None,
            before_change: None,
            after_change: None,
        }
    }

    /// Single-breakpoint shorthand: `slots` items at every viewport width.
    pub fn fixed(count: usize, slots: usize) -> Self {
        Self::new(
            count,
            alloc::vec![Breakpoint::new("any", 0.0, f32::MAX, slots)],
        )
    }

    pub fn with_infinite(mut self, infinite: bool) -> Self {
        self.infinite = infinite;
        self
    }

    pub fn with_center_mode(mut self, center_mode: bool) -> Self {
        self.center_mode = center_mode;
        self
    }

    pub fn with_partial_visible(mut self, partial_visible: bool, gutter_px: f32) -> Self {
        self.partial_visible = partial_visible;
        self.partial_visibility_gutter_px = gutter_px;
        self
    }

    pub fn with_transition_duration_ms(mut self, duration_ms: u64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    pub fn with_minimum_drag_px(mut self, minimum_drag_px: f32) -> Self {
        self.minimum_drag_px = minimum_drag_px;
        self
    }

    pub fn with_auto_play(mut self, auto_play: bool, interval_ms: u64) -> Self {
        self.auto_play = auto_play;
        self.auto_play_interval_ms = interval_ms;
        self
    }

    pub fn with_additional_offset_px(mut self, additional_offset_px: f32) -> Self {
        self.additional_offset_px = additional_offset_px;
        self
    }

    pub fn with_slides_to_slide(mut self, slides_to_slide: usize) -> Self {
        self.slides_to_slide = slides_to_slide.max(1);
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn with_swipeable(mut self, swipeable: bool) -> Self {
        self.swipeable = swipeable;
        self
    }

    pub fn with_keyboard_control(mut self, keyboard_control: bool) -> Self {
        self.keyboard_control = keyboard_control;
        self
    }

    pub fn with_arrows(mut self, arrows: bool) -> Self {
        self.arrows = arrows;
        self
    }

    pub fn with_remove_arrows_on_device(mut self, device_tags: Vec<String>) -> Self {
        self.remove_arrows_on_device = device_tags;
        self
    }

    pub fn with_show_dots(mut self, show_dots: bool) -> Self {
        self.show_dots = show_dots;
        self
    }

    pub fn with_focus_on_select(mut self, focus_on_select: bool) -> Self {
        self.focus_on_select = focus_on_select;
        self
    }

    pub fn with_server_device_tag(mut self, device_tag: Option<String>) -> Self {
        self.server_device_tag = device_tag;
        self
    }

    pub fn with_before_change(
        mut self,
        before_change: Option<impl Fn(usize, &PublicState) + Send + Sync + 'static>,
    ) -> Self {
        self.before_change = before_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_after_change(
        mut self,
        after_change: Option<impl Fn(usize, &PublicState) + Send + Sync + 'static>,
    ) -> Self {
        self.after_change = after_change.map(|f| Arc::new(f) as _);
        self
    }

    /// Gutter for a breakpoint, or `0` when partial visibility is off.
    pub fn gutter_for(&self, breakpoint: &Breakpoint) -> f32 {
        if !self.partial_visible {
            return 0.0;
        }
        breakpoint
            .partial_visibility_gutter
            .unwrap_or(self.partial_visibility_gutter_px)
    }
}

impl core::fmt::Debug for CarouselOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselOptions")
            .field("count", &self.count)
            .field("breakpoints", &self.breakpoints)
            .field("infinite", &self.infinite)
            .field("center_mode", &self.center_mode)
            .field("partial_visible", &self.partial_visible)
            .field(
                "partial_visibility_gutter_px",
                &self.partial_visibility_gutter_px,
            )
            .field("transition_duration_ms", &self.transition_duration_ms)
            .field("minimum_drag_px", &self.minimum_drag_px)
            .field("auto_play", &self.auto_play)
            .field("auto_play_interval_ms", &self.auto_play_interval_ms)
            .field("additional_offset_px", &self.additional_offset_px)
            .field("slides_to_slide", &self.slides_to_slide)
            .field("draggable", &self.draggable)
            .field("swipeable", &self.swipeable)
            .field("keyboard_control", &self.keyboard_control)
            .field("arrows", &self.arrows)
            .field("show_dots", &self.show_dots)
            .field("focus_on_select", &self.focus_on_select)
            .field("server_device_tag", &self.server_device_tag)
            .finish_non_exhaustive()
    }
}
