use alloc::sync::Arc;
use alloc::vec::Vec;

use carousel::{
    Carousel, CarouselError, CarouselOptions, Dot, Frame, Geometry, GestureSession, Measurement,
    Phase, PointerEvent, PublicState, Recompute, Release, ThrottleGate,
};

use crate::{Easing, Key, TimerKind, TimerQueue, Tween};

/// Supplies the current viewport and container widths on demand.
pub type MeasureProvider = Arc<dyn Fn() -> Measurement + Send + Sync>;

/// A framework-neutral controller that wraps a [`Carousel`] and owns everything time-related:
/// slide settling, `after_change` delivery, clone-band correction, the resize settle pass,
/// auto-play, the drag session and the shared throttle gate.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `mount` once the container can be measured
/// - the input handlers (`on_pointer_*`, `on_key`, `on_resize`) when UI events occur
/// - `tick(now_ms)` each frame/timer tick
///
/// Every entry point fires due timers before acting, so deferred work always runs before a new
/// navigation observes the state. After `teardown` all entry points are no-ops.
#[derive(Clone)]
pub struct Controller {
    carousel: Carousel,
    gate: ThrottleGate,
    timers: TimerQueue,
    gesture: Option<GestureSession>,
    measure: Option<MeasureProvider>,
    tween: Option<Tween>,
    easing: Easing,
    generation: u64,
    hovered: bool,
    mounted: bool,
    torn_down: bool,
    boundary_check_deferred: bool,
    deferred_error: Option<CarouselError>,
}

impl Controller {
    pub fn new(options: CarouselOptions) -> Self {
        Self::from_carousel(Carousel::new(options))
    }

    pub fn from_carousel(carousel: Carousel) -> Self {
        Self {
            gate: ThrottleGate::new(carousel.options().transition_duration_ms),
            carousel,
            timers: TimerQueue::new(),
            gesture: None,
            measure: None,
            tween: None,
            easing: Easing::default(),
            generation: 0,
            hovered: false,
            mounted: false,
            torn_down: false,
            boundary_check_deferred: false,
            deferred_error: None,
        }
    }

    /// Easing used by [`Self::tick`] / [`Self::animated_offset`] samples.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn into_carousel(self) -> Carousel {
        self.carousel
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn is_throttled(&self, now_ms: u64) -> bool {
        self.gate.is_engaged(now_ms)
    }

    /// Number of deferred callbacks still scheduled.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn duration_ms(&self) -> u64 {
        self.carousel.options().transition_duration_ms
    }

    fn is_live(&self) -> bool {
        self.mounted && !self.torn_down
    }

    /// Takes the first client-side measurement, builds clones and starts auto-play.
    ///
    /// Calling it again once mounted does nothing. Configuration errors are returned and leave
    /// the controller unmounted.
    pub fn mount(&mut self, provider: MeasureProvider, now_ms: u64) -> Result<(), CarouselError> {
        if self.mounted || self.torn_down {
            return Ok(());
        }
        Geometry::server_side(self.carousel.options())?;
        let measurement = provider();
        self.carousel.measure(measurement, Recompute::Mount)?;
        self.measure = Some(provider);
        self.mounted = true;
        adebug!(
            now_ms,
            slots = self.carousel.slots_to_show(),
            current_index = self.carousel.current_index(),
            "Controller::mount"
        );
        self.arm_auto_play(now_ms);
        Ok(())
    }

    /// Clones the current options, applies `f`, then re-applies them.
    ///
    /// Auto-play is armed or cancelled to match the new options, and the throttle window follows
    /// `transition_duration_ms`.
    pub fn update_options(
        &mut self,
        now_ms: u64,
        f: impl FnOnce(&mut CarouselOptions),
    ) -> Result<(), CarouselError> {
        self.carousel.update_options(f)?;
        self.gate.set_window_ms(self.duration_ms());
        self.sync_auto_play(now_ms);
        Ok(())
    }

    pub fn set_auto_play(&mut self, auto_play: bool, now_ms: u64) -> Result<(), CarouselError> {
        self.update_options(now_ms, |o| o.auto_play = auto_play)
    }

    /// Replaces the number of real items. The window snaps to the initial index.
    pub fn set_count(&mut self, count: usize, now_ms: u64) -> Result<(), CarouselError> {
        if self.torn_down {
            return Ok(());
        }
        self.fire_pending(now_ms);
        self.carousel.set_count(count)?;
        self.tween = None;
        self.gesture = None;
        self.sync_auto_play(now_ms);
        Ok(())
    }

    /// Advances by `slides_to_slide`.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        let step = self.carousel.options().slides_to_slide;
        self.advance_by(step, now_ms)
    }

    pub fn advance_by(&mut self, n: usize, now_ms: u64) -> bool {
        self.fire_pending(now_ms);
        self.navigate_at(now_ms, |c| c.next_target(n))
    }

    /// Retreats by `slides_to_slide`.
    pub fn retreat(&mut self, now_ms: u64) -> bool {
        let step = self.carousel.options().slides_to_slide;
        self.retreat_by(step, now_ms)
    }

    pub fn retreat_by(&mut self, n: usize, now_ms: u64) -> bool {
        self.fire_pending(now_ms);
        self.navigate_at(now_ms, |c| c.previous_target(n))
    }

    /// Jumps to a clone-extended index (dots, button groups).
    pub fn jump_to(&mut self, index: usize, now_ms: u64) -> bool {
        self.fire_pending(now_ms);
        self.navigate_at(now_ms, |c| c.jump_target(index))
    }

    /// Item click: jumps to the item when `focus_on_select` is enabled.
    pub fn on_item_select(&mut self, displayed_index: usize, now_ms: u64) -> bool {
        if !self.carousel.options().focus_on_select {
            return false;
        }
        self.jump_to(displayed_index, now_ms)
    }

    pub fn on_key(&mut self, key: Key, now_ms: u64) -> bool {
        if !self.carousel.options().keyboard_control {
            return false;
        }
        match key {
            Key::ArrowLeft => self.retreat(now_ms),
            Key::ArrowRight => self.advance(now_ms),
            Key::Other(_) => false,
        }
    }

    /// Applies a resize observation.
    ///
    /// The first observation after a quiet period is applied immediately and schedules a second
    /// pass (through the measure provider) one transition duration later. Observations arriving
    /// while that pass is pending are dropped.
    pub fn on_resize(&mut self, measurement: Measurement, now_ms: u64) -> Result<(), CarouselError> {
        if !self.is_live() {
            return Ok(());
        }
        self.fire_due(now_ms)?;
        if self
            .timers
            .contains(|k| matches!(k, TimerKind::SettleGeometry))
        {
            atrace!(now_ms, "on_resize: settle pass pending, observation dropped");
            return Ok(());
        }
        self.carousel.measure(measurement, Recompute::Resize)?;
        self.tween = None;
        let due = now_ms.saturating_add(self.duration_ms());
        self.timers.schedule(due, TimerKind::SettleGeometry);
        self.sync_auto_play(now_ms);
        Ok(())
    }

    /// The page became visible again: treat it like a resize using the provider's measurement.
    pub fn on_visibility_change(&mut self, now_ms: u64) -> Result<(), CarouselError> {
        let Some(provider) = self.measure.clone() else {
            return Ok(());
        };
        self.on_resize(provider(), now_ms)
    }

    /// Pauses auto-play while the pointer hovers the track.
    pub fn on_pointer_enter(&mut self, now_ms: u64) {
        if !self.is_live() {
            return;
        }
        self.fire_pending(now_ms);
        self.hovered = true;
        self.timers.cancel(|k| matches!(k, TimerKind::AutoPlay));
    }

    /// Resumes auto-play and finishes any drag in progress.
    pub fn on_pointer_leave(&mut self, now_ms: u64) -> bool {
        if !self.is_live() {
            return false;
        }
        self.hovered = false;
        self.arm_auto_play(now_ms);
        self.finish_gesture(now_ms)
    }

    pub fn on_pointer_down(&mut self, event: PointerEvent, now_ms: u64) -> bool {
        if !self.is_live() {
            return false;
        }
        self.fire_pending(now_ms);
        if !self.carousel.can_drag(event.kind) || self.gate.is_engaged(now_ms) {
            atrace!(now_ms, touch = event.is_touch(), "on_pointer_down: ignored");
            return false;
        }
        self.tween = None;
        self.gesture = Some(GestureSession::start(event, self.carousel.offset_px()));
        true
    }

    /// Returns the preview offset when the move updated it.
    pub fn on_pointer_move(&mut self, event: PointerEvent, now_ms: u64) -> Option<f32> {
        if !self.is_live() {
            return None;
        }
        let mut session = self.gesture?;
        if event.is_touch() {
            self.timers.cancel(|k| matches!(k, TimerKind::AutoPlay));
        }
        self.fire_pending(now_ms);
        let preview = self.carousel.drag_preview(&mut session, event);
        self.gesture = Some(session);
        preview
    }

    /// Finishes the drag: commits a navigation or snaps back. Returns whether it navigated.
    ///
    /// A release also ends the hover pause, so auto-play resumes even though the pointer is
    /// still over the track.
    pub fn on_pointer_up(&mut self, _event: PointerEvent, now_ms: u64) -> bool {
        if !self.is_live() {
            return false;
        }
        self.hovered = false;
        self.arm_auto_play(now_ms);
        self.finish_gesture(now_ms)
    }

    fn finish_gesture(&mut self, now_ms: u64) -> bool {
        let Some(session) = self.gesture else {
            return false;
        };
        self.fire_pending(now_ms);
        let committed = match self.carousel.release(&session) {
            Release::Advance(n) => self.navigate_at(now_ms, |c| c.next_target(n)),
            Release::Retreat(n) => self.navigate_at(now_ms, |c| c.previous_target(n)),
            Release::Cancel => false,
        };
        self.gesture = None;
        if !committed {
            atrace!(delta_x = session.delta_x(), "gesture: snap back");
            self.carousel.snap_to_current();
            self.tween = None;
            if core::mem::take(&mut self.boundary_check_deferred) {
                self.schedule_boundary_check(now_ms);
                self.fire_pending(now_ms);
            }
        }
        committed
    }

    /// Fires due timers and returns the in-flight offset sample while a slide animates.
    ///
    /// Errors from a deferred resize pass are reported here.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<f32>, CarouselError> {
        if let Some(err) = self.deferred_error.take() {
            return Err(err);
        }
        self.fire_due(now_ms)?;
        let Some(tween) = self.tween else {
            return Ok(None);
        };
        let offset = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        Ok(Some(offset))
    }

    /// Where the track is drawn right now: drag preview, then tween sample, then the committed
    /// offset.
    pub fn animated_offset(&self, now_ms: u64) -> f32 {
        if let Some(preview) = self.gesture.and_then(|g| g.preview_offset_px) {
            return preview;
        }
        match self.tween {
            Some(tween) => tween.sample(now_ms),
            None => self.carousel.offset_px(),
        }
    }

    pub fn public_state(&self) -> PublicState {
        let mut state = self.carousel.public_state();
        state.is_dragging = self.gesture.is_some();
        state.direction = self.gesture.and_then(|g| g.direction);
        state
    }

    pub fn frame(&self) -> Frame {
        self.carousel
            .frame(self.gesture.and_then(|g| g.preview_offset_px))
    }

    pub fn dots(&self) -> Vec<Dot> {
        self.carousel.dots()
    }

    /// Cancels every pending timer and drops the gesture and tween. Later calls are no-ops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        adebug!(pending = self.timers.len(), "Controller::teardown");
        self.timers.clear();
        self.gesture = None;
        self.tween = None;
        self.deferred_error = None;
        self.torn_down = true;
    }

    fn navigate_at(&mut self, now_ms: u64, plan: impl FnOnce(&Carousel) -> Option<usize>) -> bool {
        if !self.is_live() {
            return false;
        }
        if !self.gate.try_acquire(now_ms) {
            return false;
        }
        let Some(target) = plan(&self.carousel) else {
            atrace!(now_ms, current = self.carousel.current_index(), "navigation: no-op");
            return false;
        };
        self.commit(target, now_ms);
        true
    }

    fn commit(&mut self, target: usize, now_ms: u64) {
        if let Some(before_change) = self.carousel.options().before_change.clone() {
            before_change(target, &self.public_state());
        }
        let from = self.animated_offset(now_ms);
        let previous = self.carousel.begin_slide(target);
        self.generation = self.generation.wrapping_add(1);
        self.boundary_check_deferred = false;
        self.timers
            .cancel(|k| matches!(k, TimerKind::CorrectBoundary { .. }));

        let duration = self.duration_ms();
        let due = now_ms.saturating_add(duration);
        self.timers.schedule(
            due,
            TimerKind::Settle {
                generation: self.generation,
            },
        );
        if self.carousel.options().after_change.is_some() {
            self.timers.schedule(
                due,
                TimerKind::AfterChange {
                    previous_index: previous,
                },
            );
        }
        self.tween = Some(Tween::new(
            from,
            self.carousel.offset_px(),
            now_ms,
            duration,
            self.easing,
        ));
        atrace!(
            previous,
            target,
            generation = self.generation,
            due,
            "navigation: committed"
        );
    }

    fn fire_pending(&mut self, now_ms: u64) {
        if let Err(err) = self.fire_due(now_ms) {
            awarn!(%err, "deferred geometry pass failed");
            self.deferred_error = Some(err);
        }
    }

    fn fire_due(&mut self, now_ms: u64) -> Result<(), CarouselError> {
        if self.torn_down {
            return Ok(());
        }
        while let Some(timer) = self.timers.pop_due(now_ms) {
            match timer.kind {
                TimerKind::Settle { generation } => self.on_settle(generation, timer.due_ms),
                TimerKind::AfterChange { previous_index } => {
                    if let Some(after_change) = self.carousel.options().after_change.clone() {
                        after_change(previous_index, &self.public_state());
                    }
                }
                TimerKind::CorrectBoundary { generation } => self.on_correct_boundary(generation),
                TimerKind::SettleGeometry => self.settle_geometry()?,
                TimerKind::AutoPlay => self.on_auto_play(now_ms),
            }
        }
        Ok(())
    }

    fn on_settle(&mut self, generation: u64, due_ms: u64) {
        if generation != self.generation {
            return;
        }
        self.carousel.settle();
        self.schedule_boundary_check(due_ms);
    }

    fn schedule_boundary_check(&mut self, due_ms: u64) {
        if self.carousel.boundary_correction().is_some() {
            self.timers.schedule(
                due_ms,
                TimerKind::CorrectBoundary {
                    generation: self.generation,
                },
            );
        }
    }

    fn on_correct_boundary(&mut self, generation: u64) {
        if generation != self.generation || self.carousel.phase() != Phase::Idle {
            atrace!(generation, current = self.generation, "boundary correction: stale");
            return;
        }
        if self.gesture.is_some() {
            self.boundary_check_deferred = true;
            return;
        }
        if self.carousel.correct_boundary() {
            self.tween = None;
        }
    }

    fn settle_geometry(&mut self) -> Result<(), CarouselError> {
        let Some(provider) = self.measure.clone() else {
            return Ok(());
        };
        self.carousel.measure(provider(), Recompute::Resize)?;
        self.tween = None;
        Ok(())
    }

    /// Runs one auto-play step at the observed time. Intervals missed by a late tick are
    /// dropped: the next step is armed from `now_ms`.
    fn on_auto_play(&mut self, now_ms: u64) {
        if !self.carousel.options().auto_play || self.hovered {
            return;
        }
        if self.gesture.is_none() {
            let step = self.carousel.options().slides_to_slide;
            self.navigate_at(now_ms, |c| c.next_target(step));
        }
        self.arm_auto_play(now_ms);
    }

    fn auto_play_allowed(&self) -> bool {
        let options = self.carousel.options();
        options.auto_play
            && options.auto_play_interval_ms > 0
            && self.is_live()
            && self.carousel.can_navigate()
    }

    fn arm_auto_play(&mut self, now_ms: u64) {
        if !self.auto_play_allowed()
            || self.hovered
            || self.timers.contains(|k| matches!(k, TimerKind::AutoPlay))
        {
            return;
        }
        let due = now_ms.saturating_add(self.carousel.options().auto_play_interval_ms);
        self.timers.schedule(due, TimerKind::AutoPlay);
    }

    fn sync_auto_play(&mut self, now_ms: u64) {
        if self.auto_play_allowed() {
            self.arm_auto_play(now_ms);
        } else {
            self.timers.cancel(|k| matches!(k, TimerKind::AutoPlay));
        }
    }
}

impl core::fmt::Debug for Controller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("carousel", &self.carousel)
            .field("gate", &self.gate)
            .field("timers", &self.timers)
            .field("gesture", &self.gesture)
            .field("tween", &self.tween)
            .field("generation", &self.generation)
            .field("hovered", &self.hovered)
            .field("mounted", &self.mounted)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
