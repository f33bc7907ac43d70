use windowagg_core::config::WindowSettings;
use windowagg_core::reducers::{BlocksAverage, Collect, Identity, SingleAverage, Sum};
use windowagg_core::window::{CountWindow, SlidingWindow, TumblingWindow};

fn main() -> anyhow::Result<()> {
    let readings: Vec<i64> = (1..=12).collect();

    // Non-overlapping groups of three, averaged.
    let mut averages = TumblingWindow::new(Sum, SingleAverage, WindowSettings::new(3))?;
    for avg in averages.add_samples(readings.iter().copied()) {
        println!("tumbling avg: {avg}");
    }

    // The same stream kept verbatim per window.
    let mut chunks = TumblingWindow::new(Collect, Identity, WindowSettings::new(4))?;
    for chunk in chunks.add_samples(readings.iter().copied()) {
        println!("tumbling chunk: {chunk:?}");
    }

    // Last five readings, reported every second reading once five have arrived.
    let mut moving =
        SlidingWindow::new(BlocksAverage, WindowSettings::new(5).with_resolution(2))?;
    for (i, reading) in readings.iter().map(|&r| r as f64).enumerate() {
        if let Some(avg) = moving.add_sample(reading) {
            println!("sliding avg after {} readings: {avg:.2}", i + 1);
        }
    }

    Ok(())
}
