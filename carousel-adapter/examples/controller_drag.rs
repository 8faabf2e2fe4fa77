use std::sync::Arc;

use carousel::{CarouselOptions, Measurement, PointerEvent, PublicState};
use carousel_adapter::{Controller, Easing, Key};

fn main() -> Result<(), carousel::CarouselError> {
    // Example: a controller driven by a fake 16ms frame clock.
    //
    // An adapter would:
    // - mount once the container has a size
    // - forward pointer/key/resize events with the current time
    // - call tick(now_ms) every frame and translate the track by frame().translate_px, or by
    //   the returned tween sample when it draws the animation itself
    let options = CarouselOptions::fixed(8, 3)
        .with_infinite(true)
        .with_auto_play(true, 1_500)
        .with_after_change(Some(|previous: usize, state: &PublicState| {
            println!("after_change: {previous} -> {} (real {})", state.current_index, state.real_index);
        }));
    let mut c = Controller::new(options).with_easing(Easing::SmoothStep);
    c.mount(Arc::new(|| Measurement::new(1280.0, 960.0)), 0)?;

    c.on_pointer_down(PointerEvent::touch(700.0, 200.0), 100);
    for (i, x) in [650.0, 560.0, 430.0].into_iter().enumerate() {
        let preview = c.on_pointer_move(PointerEvent::touch(x, 204.0), 116 + i as u64 * 16);
        println!("drag preview={preview:?}");
    }
    let committed = c.on_pointer_up(PointerEvent::touch(430.0, 204.0), 164);
    println!("drag committed={committed} index={}", c.carousel().current_index());

    c.on_key(Key::from_code(Key::LEFT_ARROW_CODE), 800);

    let mut now_ms = 0u64;
    while now_ms < 5_000 {
        now_ms += 16;
        if let Some(offset) = c.tick(now_ms)? {
            if now_ms % 160 == 0 {
                println!("t={now_ms} offset={offset}");
            }
        }
    }

    c.teardown();
    println!("final state={:?}", c.public_state());
    Ok(())
}
