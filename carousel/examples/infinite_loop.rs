// Example: looping mode renders clones as an index map over the caller's items.
use carousel::{Carousel, CarouselOptions, Measurement, Recompute};

fn main() -> Result<(), carousel::CarouselError> {
    let items = ["red", "orange", "yellow", "green", "blue"];
    let mut c = Carousel::new(CarouselOptions::fixed(items.len(), 2).with_infinite(true));
    c.measure(Measurement::new(800.0, 800.0), Recompute::Mount)?;

    let rendered: Vec<String> = c
        .clones()
        .displayed(&items)
        .map(|(slot, item)| {
            if slot.is_clone {
                format!("({item})")
            } else {
                item.to_string()
            }
        })
        .collect();
    println!("track={}", rendered.join(" "));

    for _ in 0..7 {
        let Some(target) = c.next_target(1) else {
            break;
        };
        c.begin_slide(target);
        c.settle();
        let landed = c.current_index();
        let corrected = c.correct_boundary();
        println!(
            "landed={landed} corrected={corrected} index={} showing={}",
            c.current_index(),
            items[c.real_index()]
        );
    }
    Ok(())
}
