use std::time::{Duration, Instant};

use windowagg_core::buffer::RingBuffer;
use windowagg_core::config::WindowSettings;
use windowagg_core::reducers::{BlocksAverage, Count, SingleAverage, Sum};
use windowagg_core::window::{BlockWindow, SlidingTimeWindow, TumblingTimeWindow};

/// Simulated request latencies (ms), grouped by the block they arrive in.
const TRAFFIC: [&[f64]; 6] = [
    &[12.0, 15.0, 11.0],
    &[40.0, 38.0],
    &[],
    &[9.0, 10.0, 11.0, 12.0],
    &[100.0],
    &[14.0, 16.0],
];

fn main() -> anyhow::Result<()> {
    let block = Duration::from_millis(20);

    // Mean latency per block. The host decides when a block ends.
    let per_block = WindowSettings::new(1).with_external_timer();
    let mut latency = TumblingTimeWindow::new(Sum, SingleAverage, per_block)?;

    // Requests per block, averaged over the last three blocks.
    let rate_settings = WindowSettings::new(3).with_resolution(1).with_external_timer();
    let mut rate = SlidingTimeWindow::new(Count, BlocksAverage, rate_settings)?;

    // Busiest of the last two blocks.
    let peak_settings = WindowSettings::new(2).with_resolution(1).with_external_timer();
    let busiest = |blocks: &RingBuffer<usize>| blocks.iter().copied().max().unwrap_or(0);
    let mut peak = SlidingTimeWindow::new(Count, busiest, peak_settings)?;

    let start = Instant::now();
    for (n, samples) in TRAFFIC.iter().enumerate() {
        latency.add_samples(samples.iter().copied());
        rate.add_samples(samples.iter().copied());
        peak.add_samples(samples.iter().copied());

        std::thread::sleep(block);
        let elapsed = start.elapsed().as_millis();

        if let Some(mean) = latency.next_block() {
            println!("[{elapsed:>4}ms] block {n}: mean latency {mean:.1}ms");
        }
        if let Some(avg) = rate.next_block() {
            println!("[{elapsed:>4}ms] block {n}: {avg} requests/block over last 3");
        }
        if let Some(max) = peak.next_block() {
            println!("[{elapsed:>4}ms] block {n}: busiest of last 2 had {max} requests");
        }
    }

    Ok(())
}
