// Example: responsive breakpoints, the pre-measurement frame and manual slide driving.
use carousel::{Breakpoint, Carousel, CarouselOptions, Measurement, Recompute};

fn main() -> Result<(), carousel::CarouselError> {
    let options = CarouselOptions::new(
        12,
        vec![
            Breakpoint::new("desktop", 1024.0, 3000.0, 4),
            Breakpoint::new("tablet", 464.0, 1023.0, 2),
            Breakpoint::new("mobile", 0.0, 463.0, 1),
        ],
    )
    .with_server_device_tag(Some("desktop".to_string()))
    .with_show_dots(true);

    let mut c = Carousel::new(options);
    println!("server frame={:?}", c.frame(None));

    c.measure(Measurement::new(1280.0, 1200.0), Recompute::Mount)?;
    println!(
        "mounted: tag={:?} item_width={} frame={:?}",
        c.public_state().device_tag,
        c.item_width_px(),
        c.frame(None)
    );

    // Without an adapter, the caller owns timing: begin a slide, then settle it.
    while let Some(target) = c.next_target(3) {
        let previous = c.begin_slide(target);
        c.settle();
        println!(
            "{previous} -> {} offset={} at_end={}",
            c.current_index(),
            c.offset_px(),
            c.is_at_end()
        );
    }

    let active: Vec<_> = c.dots().iter().map(|d| d.active).collect();
    println!("dots={active:?}");

    c.measure(Measurement::new(400.0, 380.0), Recompute::Resize)?;
    println!(
        "after resize: slots={} index={} offset={}",
        c.slots_to_show(),
        c.current_index(),
        c.offset_px()
    );
    Ok(())
}
