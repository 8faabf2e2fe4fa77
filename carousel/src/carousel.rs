use alloc::vec::Vec;

use crate::clones::CloneSet;
use crate::geometry::Geometry;
use crate::gesture::{self, GestureSession, Release};
use crate::{
    CarouselError, CarouselOptions, Dot, Frame, ItemWidth, Measurement, Phase, PointerEvent,
    PointerKind, PublicState, Recompute, Transition,
};

/// The headless carousel engine.
///
/// This type owns the slide index, the committed pixel offset and the clone map, and nothing
/// else:
/// - It does not hold any UI objects or items; the caller keeps the item sequence.
/// - It has no clock. Transition timing, throttling windows and deferred clone correction are
///   driven by an adapter (see the `carousel-adapter` crate), which calls [`Carousel::settle`]
///   and [`Carousel::correct_boundary`] when their time comes.
///
/// The committed offset always equals `-(item_width * current_index)`. Drag previews and the
/// center/partial-visible adjustments only exist in [`Frame`].
#[derive(Clone, Debug)]
pub struct Carousel {
    options: CarouselOptions,
    geometry: Option<Geometry>,
    measurement: Option<Measurement>,
    clones: CloneSet,
    current_index: usize,
    offset_px: f32,
    phase: Phase,
    transition: Transition,
}

impl Carousel {
    /// Creates an unmeasured carousel.
    ///
    /// Until [`Self::measure`] runs, the index and offset are both `0`, which is what a server
    /// render shows as well.
    pub fn new(options: CarouselOptions) -> Self {
        cdebug!(
            count = options.count,
            infinite = options.infinite,
            breakpoints = options.breakpoints.len(),
            "Carousel::new"
        );
        Self {
            clones: CloneSet::build(options.count, 0, options.infinite),
            options,
            geometry: None,
            measurement: None,
            current_index: 0,
            offset_px: 0.0,
            phase: Phase::Idle,
            transition: Transition::Instant,
        }
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Replaces the options and, when layout-relevant fields changed, re-derives geometry and
    /// clones from the last measurement.
    ///
    /// A change of item count or looping mode snaps back to the initial index; other layout
    /// changes keep the current index like a resize does.
    pub fn set_options(&mut self, options: CarouselOptions) -> Result<(), CarouselError> {
        let structural =
            options.count != self.options.count || options.infinite != self.options.infinite;
        let layout = structural
            || options.breakpoints != self.options.breakpoints
            || options.center_mode != self.options.center_mode
            || options.partial_visible != self.options.partial_visible
            || options.partial_visibility_gutter_px != self.options.partial_visibility_gutter_px;
        self.options = options;
        if !layout {
            return Ok(());
        }
        ctrace!(
            count = self.options.count,
            infinite = self.options.infinite,
            "Carousel::set_options"
        );
        let mode = if structural {
            Recompute::ItemsChanged
        } else {
            Recompute::Resize
        };
        match self.measurement {
            Some(m) => self.measure(m, mode),
            None => {
                self.clones = CloneSet::build(self.options.count, 0, self.options.infinite);
                Ok(())
            }
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut CarouselOptions),
    ) -> Result<(), CarouselError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Applies a layout observation: resolves the breakpoint, sizes items and rebuilds clones.
    ///
    /// `Recompute::Resize` keeps `current_index` numerically stable (clamped into range) as
    /// long as the clone layout keeps its shape; the other modes snap to the initial index.
    /// The offset is re-applied without animation.
    pub fn measure(
        &mut self,
        measurement: Measurement,
        mode: Recompute,
    ) -> Result<(), CarouselError> {
        let geometry = Geometry::resolve(&self.options, measurement)?;
        let was_cloned = self.clones.is_cloned();
        let clones = CloneSet::build(
            self.options.count,
            geometry.slots_to_show,
            self.options.infinite,
        );
        cdebug!(
            ?mode,
            slots = geometry.slots_to_show,
            item_width = geometry.item_width_px,
            prev_len = self.clones.displayed_len(),
            displayed_len = clones.displayed_len(),
            "Carousel::measure"
        );

        let keep_index =
            mode == Recompute::Resize && self.is_mounted() && was_cloned == clones.is_cloned();
        self.current_index = if keep_index {
            let max_start = clones
                .displayed_len()
                .saturating_sub(geometry.slots_to_show);
            self.current_index.min(max_start)
        } else {
            clones.initial_index()
        };
        self.clones = clones;
        self.geometry = Some(geometry);
        self.measurement = Some(measurement);
        self.snap_to_current();
        Ok(())
    }

    /// Changes the number of real items; the window snaps to the initial index.
    pub fn set_count(&mut self, count: usize) -> Result<(), CarouselError> {
        if self.options.count == count {
            return Ok(());
        }
        self.update_options(|o| o.count = count)
    }

    pub fn is_mounted(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn last_measurement(&self) -> Option<Measurement> {
        self.measurement
    }

    pub fn clones(&self) -> &CloneSet {
        &self.clones
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The clone-extended index mapped back into the caller's sequence.
    pub fn real_index(&self) -> usize {
        self.clones.real_index(self.current_index).unwrap_or(0)
    }

    pub fn offset_px(&self) -> f32 {
        self.offset_px
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_sliding(&self) -> bool {
        self.phase == Phase::Sliding
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn slots_to_show(&self) -> usize {
        self.geometry.as_ref().map_or(0, |g| g.slots_to_show)
    }

    pub fn item_width_px(&self) -> f32 {
        self.geometry.as_ref().map_or(0.0, |g| g.item_width_px)
    }

    pub fn displayed_len(&self) -> usize {
        self.clones.displayed_len()
    }

    /// Not more real items than slots. Only meaningful once mounted.
    pub fn not_enough_items(&self) -> bool {
        self.is_mounted() && self.options.count <= self.slots_to_show()
    }

    /// Whether navigation can do anything at all.
    pub fn can_navigate(&self) -> bool {
        self.is_mounted() && !self.not_enough_items()
    }

    /// Last index that can start a full window.
    pub fn max_start(&self) -> usize {
        self.displayed_len().saturating_sub(self.slots_to_show())
    }

    pub fn is_at_start(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.current_index + self.slots_to_show() >= self.displayed_len()
    }

    fn offset_for(&self, index: usize) -> f32 {
        -(self.item_width_px() * index as f32)
    }

    /// Target of moving forward by `step` items, or `None` when nothing would move.
    ///
    /// Overshoot is truncated to the last full window. In looping mode that window lies in the
    /// trailing clone band, which boundary correction folds back afterwards.
    pub fn next_target(&self, step: usize) -> Option<usize> {
        if !self.can_navigate() || step == 0 {
            return None;
        }
        let max_start = self.max_start();
        if self.current_index >= max_start {
            return None;
        }
        Some(self.current_index.saturating_add(step).min(max_start))
    }

    /// Target of moving back by `step` items, or `None` when already at the start.
    pub fn previous_target(&self, step: usize) -> Option<usize> {
        if !self.can_navigate() || step == 0 {
            return None;
        }
        match self.current_index.checked_sub(step) {
            Some(prev) => Some(prev),
            None if self.current_index != 0 => Some(0),
            None => None,
        }
    }

    /// Validates a direct jump (dots, button groups, item selection).
    pub fn jump_target(&self, index: usize) -> Option<usize> {
        if !self.is_mounted() || index >= self.displayed_len() {
            cwarn!(index, displayed_len = self.displayed_len(), "jump target out of range");
            return None;
        }
        Some(index)
    }

    /// Starts an animated slide to `target` and returns the index it left.
    ///
    /// Call [`Self::settle`] once the transition duration has elapsed.
    pub fn begin_slide(&mut self, target: usize) -> usize {
        let previous = self.current_index;
        self.current_index = target;
        self.offset_px = self.offset_for(target);
        self.phase = Phase::Sliding;
        self.transition = Transition::Animated;
        ctrace!(previous, target, offset = self.offset_px, "begin_slide");
        previous
    }

    /// Marks the in-flight transition as finished.
    pub fn settle(&mut self) {
        if self.phase == Phase::Sliding {
            self.phase = Phase::Idle;
        }
    }

    /// The real-region index equivalent to the current clone-band position, if any.
    pub fn boundary_correction(&self) -> Option<usize> {
        if !self.options.infinite || !self.can_navigate() {
            return None;
        }
        self.clones.equivalent_real_position(self.current_index)
    }

    /// Silently moves out of a clone band. Only acts from `Idle` with real geometry.
    ///
    /// The jump passes through `Phase::Correcting` and is back at `Idle` when this returns.
    /// Returns `true` when the position changed.
    pub fn correct_boundary(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        let Some(target) = self.boundary_correction() else {
            return false;
        };
        ctrace!(from = self.current_index, to = target, "correct_boundary");
        self.phase = Phase::Correcting;
        self.current_index = target;
        self.offset_px = self.offset_for(target);
        self.transition = Transition::Instant;
        self.phase = Phase::Idle;
        true
    }

    /// Re-applies the canonical offset for the current index without animation.
    pub fn snap_to_current(&mut self) {
        self.offset_px = self.offset_for(self.current_index);
        self.transition = Transition::Instant;
    }

    /// Whether a drag/swipe with this input modality may start.
    pub fn can_drag(&self, kind: PointerKind) -> bool {
        let enabled = match kind {
            PointerKind::Mouse => self.options.draggable,
            PointerKind::Touch => self.options.swipeable,
        };
        enabled && self.can_navigate()
    }

    /// Feeds a pointer move into `session` and returns the preview offset to render.
    ///
    /// Moves that travel more vertically than horizontally return `None` and leave the session
    /// untouched, so page scrolling keeps working.
    pub fn drag_preview(&self, session: &mut GestureSession, event: PointerEvent) -> Option<f32> {
        if gesture::is_vertical(session, &event) {
            return None;
        }
        let geometry = self.geometry.as_ref()?;
        session.last_x = event.x;
        let dx = session.delta_x();
        if let Some(direction) = gesture::direction_of(dx) {
            session.direction = Some(direction);
        }
        let min_offset = -(geometry.item_width_px * self.max_start() as f32);
        let preview = gesture::preview_offset(session.origin_offset_px, dx, min_offset);
        session.preview_offset_px = Some(preview);
        Some(preview)
    }

    /// Decides what a finished gesture commits to.
    pub fn release(&self, session: &GestureSession) -> Release {
        gesture::release_decision(
            session.delta_x(),
            self.options.minimum_drag_px,
            self.item_width_px(),
        )
    }

    pub fn public_state(&self) -> PublicState {
        let not_enough_items = self.not_enough_items();
        let device_tag = self.geometry.as_ref().map(|g| g.device_tag.clone());
        let arrows_removed = device_tag
            .as_ref()
            .is_some_and(|tag| self.options.remove_arrows_on_device.contains(tag));
        let show_arrows = self.options.arrows && !arrows_removed && !not_enough_items;
        let is_at_start = self.is_at_start();
        let is_at_end = self.is_at_end();
        PublicState {
            current_index: self.current_index,
            real_index: self.real_index(),
            slots_to_show: self.slots_to_show(),
            device_tag,
            phase: self.phase,
            is_sliding: self.is_sliding(),
            is_dragging: false,
            direction: None,
            item_width_px: self.item_width_px(),
            container_width_px: self.geometry.as_ref().map_or(0.0, |g| g.container_width_px),
            offset_px: self.offset_px,
            total_items: self.options.count,
            displayed_len: self.displayed_len(),
            not_enough_items,
            mounted: self.is_mounted(),
            is_at_start,
            is_at_end,
            show_arrows,
            can_go_previous: show_arrows && (self.options.infinite || !is_at_start),
            can_go_next: show_arrows && (self.options.infinite || !is_at_end),
        }
    }

    /// Computes the render frame, optionally with a drag preview in place of the committed
    /// offset.
    pub fn frame(&self, preview_offset_px: Option<f32>) -> Frame {
        let additional = self.options.additional_offset_px;
        let Some(geometry) = &self.geometry else {
            let item_width = match Geometry::server_side(&self.options) {
                Ok(Some(layout)) => ItemWidth::Percent(layout.item_width_percent),
                _ => ItemWidth::Auto,
            };
            return Frame {
                translate_px: additional,
                animate: false,
                item_width,
                clip_overflow: true,
            };
        };

        let base = preview_offset_px.unwrap_or(self.offset_px);
        let not_enough_items = self.not_enough_items();
        let partial = self.options.partial_visible && !not_enough_items;
        let translate = if partial {
            let mut t = base + self.current_index as f32 * geometry.gutter_px;
            if !self.options.infinite && self.is_at_end() {
                let shown = geometry.rendered_item_width_px() * geometry.slots_to_show as f32;
                t += geometry.container_width_px - shown;
            }
            t
        } else if self.options.center_mode
            && !not_enough_items
            && (self.options.infinite || self.current_index != 0)
        {
            base + geometry.item_width_px / 2.0
        } else {
            base
        };

        let item_width = if partial {
            geometry.rendered_item_width_px()
        } else {
            geometry.item_width_px
        };
        Frame {
            translate_px: translate + additional,
            animate: preview_offset_px.is_none() && self.transition == Transition::Animated,
            item_width: ItemWidth::Px(item_width),
            clip_overflow: false,
        }
    }

    /// The dot list: one dot per `slides_to_slide` group of real items.
    ///
    /// Empty when dots are off, before measurement, or when there are not enough items.
    pub fn dots(&self) -> Vec<Dot> {
        if !self.options.show_dots || !self.can_navigate() {
            return Vec::new();
        }
        let count = self.options.count;
        let slots = self.slots_to_show();
        let step = self.options.slides_to_slide.max(1);
        let looping = self.clones.is_cloned();
        let (dot_count, last_start) = if looping {
            (count.div_ceil(step), count - 1)
        } else {
            ((count - slots).div_ceil(step) + 1, count - slots)
        };
        let lead = self.clones.block_len();
        let real = self.real_index();
        let start_of = |i: usize| (i * step).min(last_start);

        (0..dot_count)
            .map(|i| {
                let real_start = start_of(i);
                let is_last = i + 1 == dot_count;
                let active = real >= real_start && (is_last || real < start_of(i + 1));
                Dot {
                    real_start,
                    target_index: real_start + lead,
                    active,
                }
            })
            .collect()
    }
}
