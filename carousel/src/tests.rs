use crate::*;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn responsive() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("desktop", 1024.0, 3000.0, 3),
        Breakpoint::new("tablet", 464.0, 1023.0, 2),
        Breakpoint::new("mobile", 0.0, 463.0, 1),
    ]
}

fn mounted(options: CarouselOptions, container_width: f32) -> Carousel {
    let mut c = Carousel::new(options);
    c.measure(Measurement::new(1280.0, container_width), Recompute::Mount)
        .unwrap();
    c
}

fn slide(c: &mut Carousel, target: Option<usize>) {
    if let Some(target) = target {
        c.begin_slide(target);
    }
    c.settle();
}

fn assert_canonical(c: &Carousel) {
    assert!(c.current_index() < c.displayed_len());
    assert_eq!(c.offset_px(), -(c.item_width_px() * c.current_index() as f32));
}

#[test]
fn unmeasured_carousel_renders_at_zero() {
    let c = Carousel::new(CarouselOptions::fixed(10, 3).with_infinite(true));
    assert!(!c.is_mounted());
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.offset_px(), 0.0);
    assert_eq!(c.next_target(1), None);
    assert_eq!(c.previous_target(1), None);

    let frame = c.frame(None);
    assert_eq!(frame.translate_px, 0.0);
    assert!(!frame.animate);
    assert!(frame.clip_overflow);
    assert_eq!(frame.item_width, ItemWidth::Auto);
}

#[test]
fn server_layout_uses_server_device_tag() {
    let opts = CarouselOptions::new(10, responsive())
        .with_server_device_tag(Some(String::from("tablet")));
    let c = Carousel::new(opts.clone());
    assert_eq!(c.frame(None).item_width, ItemWidth::Percent(50.0));

    let layout = Geometry::server_side(&opts).unwrap().unwrap();
    assert_eq!(layout.slots_to_show, 2);

    let bad = opts.with_server_device_tag(Some(String::from("watch")));
    assert_eq!(
        Geometry::server_side(&bad),
        Err(CarouselError::UnknownDeviceTag(String::from("watch")))
    );
}

#[test]
fn geometry_selects_breakpoint_by_viewport_width() {
    let opts = CarouselOptions::new(10, responsive());
    let g = Geometry::resolve(&opts, Measurement::new(800.0, 600.0)).unwrap();
    assert_eq!(g.slots_to_show, 2);
    assert_eq!(g.device_tag, "tablet");
    assert_eq!(g.item_width_px, 300.0);

    let g = Geometry::resolve(&opts, Measurement::new(1024.0, 900.0)).unwrap();
    assert_eq!(g.slots_to_show, 3);
    assert_eq!(g.item_width_px, 300.0);
}

#[test]
fn geometry_errors_are_reported() {
    let opts = CarouselOptions::new(10, responsive());
    assert_eq!(
        Geometry::resolve(&opts, Measurement::new(5000.0, 600.0)),
        Err(CarouselError::NoMatchingBreakpoint {
            viewport_width: 5000.0
        })
    );

    let zero = CarouselOptions::new(10, vec![Breakpoint::new("broken", 0.0, 5000.0, 0)]);
    assert_eq!(
        Geometry::resolve(&zero, Measurement::new(100.0, 100.0)),
        Err(CarouselError::ZeroSlots {
            device_tag: String::from("broken")
        })
    );

    assert!(matches!(
        Geometry::resolve(&opts, Measurement::new(800.0, f32::NAN)),
        Err(CarouselError::InvalidContainerWidth(_))
    ));

    let mut c = Carousel::new(opts);
    assert!(c.measure(Measurement::new(5000.0, 600.0), Recompute::Mount).is_err());
    assert!(!c.is_mounted());
}

#[test]
fn center_mode_reserves_a_slot_and_partial_mode_a_gutter() {
    let centered = CarouselOptions::fixed(10, 3).with_center_mode(true);
    let g = Geometry::resolve(&centered, Measurement::new(1000.0, 800.0)).unwrap();
    assert_eq!(g.item_width_px, 200.0);

    let partial = CarouselOptions::new(
        10,
        vec![Breakpoint::new("any", 0.0, 5000.0, 3).with_partial_visibility_gutter(40.0)],
    )
    .with_partial_visible(true, 10.0);
    let g = Geometry::resolve(&partial, Measurement::new(1000.0, 600.0)).unwrap();
    assert_eq!(g.item_width_px, 200.0);
    assert_eq!(g.gutter_px, 40.0);
    assert_eq!(g.rendered_item_width_px(), 160.0);
}

#[test]
fn clone_set_layout() {
    let clones = CloneSet::build(6, 2, true);
    assert!(clones.is_cloned());
    assert_eq!(clones.displayed_len(), 10);
    assert_eq!(clones.initial_index(), 2);

    let mut reals = Vec::new();
    let mut flags = Vec::new();
    clones.for_each_displayed(|it| {
        reals.push(it.real_index);
        flags.push(it.is_clone);
    });
    assert_eq!(reals, vec![4, 5, 0, 1, 2, 3, 4, 5, 0, 1]);
    assert_eq!(
        flags,
        vec![true, true, false, false, false, false, false, false, true, true]
    );

    assert_eq!(clones.equivalent_real_position(0), Some(6));
    assert_eq!(clones.equivalent_real_position(1), Some(7));
    assert_eq!(clones.equivalent_real_position(2), None);
    assert_eq!(clones.equivalent_real_position(7), None);
    assert_eq!(clones.equivalent_real_position(8), Some(2));
    assert_eq!(clones.equivalent_real_position(9), Some(3));
    assert_eq!(clones.real_index(10), None);

    let items = ["a", "b", "c", "d", "e", "f"];
    let shown: Vec<&str> = clones.displayed(&items).map(|(_, s)| *s).collect();
    assert_eq!(shown, vec!["e", "f", "a", "b", "c", "d", "e", "f", "a", "b"]);
}

#[test]
fn clone_set_is_identity_without_looping_or_items() {
    for clones in [
        CloneSet::build(6, 2, false),
        CloneSet::build(3, 5, true),
        CloneSet::build(5, 5, true),
    ] {
        assert!(!clones.is_cloned());
        assert_eq!(clones.displayed_len(), clones.count());
        assert_eq!(clones.initial_index(), 0);
        assert_eq!(clones.equivalent_real_position(0), None);
    }
}

#[test]
fn finite_advance_clamps_to_last_window() {
    // 10 items, 3 slots, 200px items.
    let mut c = mounted(CarouselOptions::fixed(10, 3), 600.0);
    assert_eq!(c.item_width_px(), 200.0);
    assert_eq!(c.current_index(), 0);

    for _ in 0..3 {
        let target = c.next_target(1);
        slide(&mut c, target);
    }
    assert_eq!(c.current_index(), 3);
    assert_eq!(c.offset_px(), -600.0);

    let target = c.next_target(3);
    slide(&mut c, target);
    assert_eq!(c.current_index(), 6);

    // Overshoot truncates to the last full window.
    assert_eq!(c.next_target(3), Some(7));
    slide(&mut c, Some(7));
    assert_eq!(c.next_target(1), None);
    assert_eq!(c.current_index(), 7);
    assert_eq!(c.offset_px(), -1400.0);
    assert!(c.is_at_end());
}

#[test]
fn finite_retreat_clamps_to_zero() {
    let mut c = mounted(CarouselOptions::fixed(10, 3), 600.0);
    assert_eq!(c.previous_target(1), None);
    slide(&mut c, Some(2));
    assert_eq!(c.previous_target(5), Some(0));
    slide(&mut c, Some(0));
    // Offset 0 is a real position, distinct from "no move".
    assert_eq!(c.offset_px(), 0.0);
    assert_eq!(c.previous_target(1), None);
}

#[test]
fn begin_slide_animates_and_settle_returns_to_idle() {
    let mut c = mounted(CarouselOptions::fixed(10, 3), 600.0);
    assert_eq!(c.transition(), Transition::Instant);
    let previous = c.begin_slide(2);
    assert_eq!(previous, 0);
    assert_eq!(c.phase(), Phase::Sliding);
    assert_eq!(c.transition(), Transition::Animated);
    assert!(c.frame(None).animate);
    c.settle();
    assert_eq!(c.phase(), Phase::Idle);
}

#[test]
fn infinite_retreat_into_leading_band_is_corrected_silently() {
    let mut c = mounted(CarouselOptions::fixed(6, 2).with_infinite(true), 400.0);
    assert_eq!(c.displayed_len(), 10);
    assert_eq!(c.current_index(), 2);
    assert_eq!(c.real_index(), 0);

    let target = c.previous_target(1);
    assert_eq!(target, Some(1));
    c.begin_slide(1);
    // Not while the transition is in flight.
    assert!(!c.correct_boundary());
    assert_eq!(c.boundary_correction(), Some(7));

    c.settle();
    assert!(c.correct_boundary());
    assert_eq!(c.current_index(), 7);
    assert_eq!(c.real_index(), 5);
    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(c.public_state().phase, Phase::Idle);
    assert_eq!(c.transition(), Transition::Instant);
    assert!(!c.frame(None).animate);
    assert_canonical(&c);
}

#[test]
fn infinite_loop_is_seamless_for_many_shapes() {
    for count in 2..12usize {
        for slots in 1..count {
            let mut c = mounted(
                CarouselOptions::fixed(count, slots).with_infinite(true),
                slots as f32 * 100.0,
            );
            let initial_real = c.real_index();
            for _ in 0..count {
                let target = c.next_target(1);
                assert!(target.is_some(), "count={count} slots={slots}");
                slide(&mut c, target);
                c.correct_boundary();
                assert_canonical(&c);
            }
            let r = c.current_index();
            assert!(r >= slots && r < slots + count);
            assert_eq!((r - slots) % count, initial_real);

            for _ in 0..count {
                let target = c.previous_target(1);
                slide(&mut c, target);
                c.correct_boundary();
                assert_canonical(&c);
            }
            assert_eq!(c.real_index(), initial_real);
        }
    }
}

#[test]
fn random_navigation_keeps_invariants() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..64 {
        let count = rng.gen_range_usize(1, 20);
        let slots = rng.gen_range_usize(1, 6);
        let infinite = rng.gen_bool();
        let mut c = mounted(
            CarouselOptions::fixed(count, slots).with_infinite(infinite),
            600.0,
        );
        for _ in 0..50 {
            let step = rng.gen_range_usize(1, 4);
            let target = match rng.gen_range_usize(0, 3) {
                0 => c.next_target(step),
                1 => c.previous_target(step),
                _ => c.jump_target(rng.gen_range_usize(0, c.displayed_len().max(1))),
            };
            slide(&mut c, target);
            c.correct_boundary();
            assert_canonical(&c);
            if c.clones().is_cloned() {
                assert!(!c.clones().is_clone(c.current_index()));
            }
        }
    }
}

#[test]
fn not_enough_items_disables_navigation() {
    let c = mounted(CarouselOptions::fixed(3, 5).with_infinite(true), 500.0);
    assert!(c.not_enough_items());
    assert!(!c.clones().is_cloned());
    assert_eq!(c.displayed_len(), 3);
    assert_eq!(c.next_target(1), None);
    assert_eq!(c.previous_target(1), None);
    assert!(!c.can_drag(PointerKind::Touch));

    let state = c.public_state();
    assert!(state.not_enough_items);
    assert!(!state.show_arrows);
    assert!(!state.can_go_next);
    assert!(c.dots().is_empty());
}

#[test]
fn jump_is_idempotent() {
    let mut c = mounted(CarouselOptions::fixed(10, 3), 600.0);
    let target = c.jump_target(4);
    slide(&mut c, target);
    let first = c.offset_px();
    let target = c.jump_target(4);
    slide(&mut c, target);
    assert_eq!(c.offset_px(), first);
    assert_eq!(c.jump_target(10), None);
}

#[test]
fn resize_keeps_index_and_item_change_snaps_to_initial() {
    let mut c = Carousel::new(CarouselOptions::new(6, responsive()).with_infinite(true));
    c.measure(Measurement::new(800.0, 400.0), Recompute::Mount)
        .unwrap();
    assert_eq!(c.slots_to_show(), 2);
    assert_eq!(c.current_index(), 2);
    slide(&mut c, Some(4));

    c.measure(Measurement::new(800.0, 600.0), Recompute::Resize)
        .unwrap();
    assert_eq!(c.current_index(), 4);
    assert_eq!(c.offset_px(), -1200.0);
    assert_eq!(c.transition(), Transition::Instant);

    c.measure(Measurement::new(1200.0, 900.0), Recompute::Resize)
        .unwrap();
    assert_eq!(c.slots_to_show(), 3);
    assert_eq!(c.displayed_len(), 12);
    assert_eq!(c.current_index(), 4);
    assert_canonical(&c);

    c.set_count(8).unwrap();
    assert_eq!(c.displayed_len(), 14);
    assert_eq!(c.current_index(), 3);
    assert_eq!(c.real_index(), 0);
    assert_canonical(&c);
}

#[test]
fn resize_to_more_slots_keeps_a_full_window() {
    let breakpoints = vec![
        Breakpoint::new("narrow", 0.0, 799.0, 3),
        Breakpoint::new("wide", 800.0, 3000.0, 5),
    ];
    let mut c = Carousel::new(CarouselOptions::new(10, breakpoints));
    c.measure(Measurement::new(600.0, 600.0), Recompute::Mount)
        .unwrap();
    slide(&mut c, Some(7));
    assert!(c.is_at_end());

    c.measure(Measurement::new(1000.0, 1000.0), Recompute::Resize)
        .unwrap();
    assert_eq!(c.slots_to_show(), 5);
    assert_eq!(c.max_start(), 5);
    assert_eq!(c.current_index(), 5);
    assert!(c.is_at_end());
    assert_eq!(c.next_target(1), None);
    assert_eq!(c.previous_target(1), Some(4));
    assert_canonical(&c);
}

#[test]
fn resize_into_looping_layout_snaps_to_initial() {
    let mut c = Carousel::new(CarouselOptions::new(3, responsive()).with_infinite(true));
    c.measure(Measurement::new(1200.0, 900.0), Recompute::Mount)
        .unwrap();
    assert!(c.not_enough_items());
    c.measure(Measurement::new(300.0, 300.0), Recompute::Resize)
        .unwrap();
    assert!(c.clones().is_cloned());
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.real_index(), 0);
}

#[test]
fn drag_preview_and_release() {
    let c = mounted(
        CarouselOptions::fixed(10, 3).with_minimum_drag_px(80.0),
        600.0,
    );
    let mut session = GestureSession::start(PointerEvent::mouse(500.0, 100.0), c.offset_px());

    assert_eq!(c.drag_preview(&mut session, PointerEvent::mouse(440.0, 100.0)), Some(-60.0));
    assert_eq!(session.direction, Some(DragDirection::Left));
    assert_eq!(c.release(&session), Release::Cancel);

    assert_eq!(c.drag_preview(&mut session, PointerEvent::mouse(250.0, 110.0)), Some(-250.0));
    assert_eq!(c.release(&session), Release::Advance(1));

    // 300 / 200 = 1.5 rounds away from zero.
    c.drag_preview(&mut session, PointerEvent::mouse(200.0, 110.0));
    assert_eq!(c.release(&session), Release::Advance(2));

    // Mostly vertical: ignored, session unchanged.
    assert_eq!(c.drag_preview(&mut session, PointerEvent::mouse(190.0, 600.0)), None);
    assert_eq!(session.last_x, 200.0);
}

#[test]
fn drag_preview_does_not_reveal_empty_space() {
    let mut c = mounted(CarouselOptions::fixed(10, 3), 600.0);
    let mut session = GestureSession::start(PointerEvent::touch(100.0, 0.0), c.offset_px());
    assert_eq!(c.drag_preview(&mut session, PointerEvent::touch(300.0, 0.0)), Some(0.0));
    assert_eq!(session.direction, Some(DragDirection::Right));
    assert_eq!(c.release(&session), Release::Retreat(1));

    slide(&mut c, Some(7));
    let mut session = GestureSession::start(PointerEvent::touch(500.0, 0.0), c.offset_px());
    assert_eq!(c.drag_preview(&mut session, PointerEvent::touch(100.0, 0.0)), Some(-1400.0));
    // Preview never touched the committed offset.
    assert_eq!(c.offset_px(), -1400.0);
}

#[test]
fn drag_modalities_follow_options() {
    let c = mounted(
        CarouselOptions::fixed(10, 3)
            .with_draggable(false)
            .with_swipeable(true),
        600.0,
    );
    assert!(!c.can_drag(PointerKind::Mouse));
    assert!(c.can_drag(PointerKind::Touch));
}

#[test]
fn throttle_gate_drops_calls_inside_window() {
    let mut gate = ThrottleGate::new(400);
    assert!(gate.try_acquire(0));
    assert!(gate.is_engaged(1));
    assert!(!gate.try_acquire(1));
    assert!(!gate.try_acquire(399));
    assert!(gate.try_acquire(400));
    gate.reset();
    assert!(gate.try_acquire(401));
}

#[test]
fn frame_applies_center_and_partial_adjustments() {
    let mut centered = mounted(
        CarouselOptions::fixed(10, 3).with_center_mode(true),
        800.0,
    );
    assert_eq!(centered.frame(None).translate_px, 0.0);
    slide(&mut centered, Some(2));
    assert_eq!(centered.frame(None).translate_px, -300.0);
    assert_eq!(centered.offset_px(), -400.0);

    let mut partial = mounted(
        CarouselOptions::fixed(10, 3)
            .with_partial_visible(true, 30.0)
            .with_additional_offset_px(5.0),
        600.0,
    );
    assert_eq!(partial.frame(None).item_width, ItemWidth::Px(170.0));
    assert_eq!(partial.frame(None).translate_px, 5.0);
    slide(&mut partial, Some(7));
    // -1400 + 7 * 30 + (600 - 170 * 3) + 5
    assert_eq!(partial.frame(None).translate_px, -1095.0);

    let preview = partial.frame(Some(-1300.0));
    assert!(!preview.animate);
    assert_eq!(partial.offset_px(), -1400.0);
}

#[test]
fn public_state_reports_real_index_and_arrows() {
    let mut c = mounted(
        CarouselOptions::fixed(6, 2)
            .with_infinite(true)
            .with_remove_arrows_on_device(vec![String::from("mobile")]),
        400.0,
    );
    slide(&mut c, Some(8));
    let state = c.public_state();
    assert_eq!(state.current_index, 8);
    assert_eq!(state.real_index, 0);
    assert_eq!(state.device_tag.as_deref(), Some("any"));
    assert!(state.show_arrows);
    assert!(state.can_go_next);
    assert!(state.can_go_previous);

    let finite = mounted(CarouselOptions::fixed(6, 2), 400.0);
    let state = finite.public_state();
    assert!(state.is_at_start);
    assert!(!state.can_go_previous);
    assert!(state.can_go_next);

    let mut hidden = Carousel::new(
        CarouselOptions::new(6, responsive())
            .with_remove_arrows_on_device(vec![String::from("mobile")]),
    );
    hidden
        .measure(Measurement::new(320.0, 320.0), Recompute::Mount)
        .unwrap();
    assert!(!hidden.public_state().show_arrows);
}

#[test]
fn dots_follow_the_window() {
    let mut c = mounted(CarouselOptions::fixed(10, 3).with_show_dots(true), 600.0);
    let dots = c.dots();
    assert_eq!(dots.len(), 8);
    assert!(dots[0].active);
    assert_eq!(dots.iter().filter(|d| d.active).count(), 1);

    slide(&mut c, Some(dots[7].target_index));
    assert!(c.dots()[7].active);

    let stepped = mounted(
        CarouselOptions::fixed(10, 3)
            .with_show_dots(true)
            .with_slides_to_slide(2),
        600.0,
    );
    let starts: Vec<usize> = stepped.dots().iter().map(|d| d.real_start).collect();
    assert_eq!(starts, vec![0, 2, 4, 6, 7]);

    let mut looping = mounted(
        CarouselOptions::fixed(6, 2)
            .with_infinite(true)
            .with_show_dots(true),
        400.0,
    );
    let dots = looping.dots();
    assert_eq!(dots.len(), 6);
    assert_eq!(dots[0].target_index, 2);
    slide(&mut looping, Some(dots[3].target_index));
    assert_eq!(looping.real_index(), 3);
    assert!(looping.dots()[3].active);

    assert!(mounted(CarouselOptions::fixed(10, 3), 600.0).dots().is_empty());
}

#[test]
fn update_options_reapplies_last_measurement() {
    let mut c = mounted(CarouselOptions::fixed(6, 2), 400.0);
    assert!(!c.clones().is_cloned());
    c.update_options(|o| o.infinite = true).unwrap();
    assert!(c.clones().is_cloned());
    assert_eq!(c.current_index(), 2);
    assert_canonical(&c);
}

#[cfg(feature = "serde")]
#[test]
fn options_load_from_json() {
    let json = r#"{
        "count": 8,
        "infinite": true,
        "transition_duration_ms": 250,
        "breakpoints": [
            { "device_tag": "desktop", "min_width": 1024, "max_width": 3000, "slots": 4 },
            { "device_tag": "mobile", "min_width": 0, "max_width": 1023, "slots": 1,
              "partial_visibility_gutter": 24 }
        ]
    }"#;
    let opts: CarouselOptions = serde_json::from_str(json).unwrap();
    assert_eq!(opts.count, 8);
    assert!(opts.infinite);
    assert_eq!(opts.transition_duration_ms, 250);
    assert_eq!(opts.minimum_drag_px, DEFAULT_MINIMUM_DRAG_PX);
    assert_eq!(opts.breakpoints[1].partial_visibility_gutter, Some(24.0));
    assert!(opts.before_change.is_none());

    let c = mounted(opts, 800.0);
    let state = serde_json::to_value(c.public_state()).unwrap();
    assert_eq!(state["slots_to_show"], 4);
    assert_eq!(state["real_index"], 0);
}
