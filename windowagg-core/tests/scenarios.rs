use windowagg_core::buffer::RingBuffer;
use windowagg_core::config::WindowSettings;
use windowagg_core::reducers::{
    BlocksAverage, Collect, Contents, Identity, Max, SingleAverage, Sum,
};
use windowagg_core::window::{
    BlockWindow, CountWindow, SlidingTimeWindow, SlidingWindow, TumblingTimeWindow,
    TumblingWindow, accumulate_fn,
};

fn lcg_next(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

fn gen_samples(seed: u64, n: usize) -> Vec<i64> {
    let mut state = seed;
    (0..n).map(|_| (lcg_next(&mut state) >> 40) as i64 % 1000).collect()
}

#[test]
fn test_tumbling_emissions_partition_the_stream() {
    let samples = gen_samples(7, 1000);
    for k in [1, 2, 3, 7, 64] {
        let mut window = TumblingWindow::new(Collect, Identity, WindowSettings::new(k)).unwrap();
        let mut emitted = Vec::new();
        for (i, &s) in samples.iter().enumerate() {
            match window.add_sample(s) {
                Some(chunk) => {
                    assert_eq!((i + 1) % k, 0, "k={k} emitted on call {}", i + 1);
                    emitted.push(chunk);
                }
                None => assert_ne!((i + 1) % k, 0, "k={k} missed call {}", i + 1),
            }
        }
        // Every emitted window is exactly the next k samples, with no carry-over.
        let expected: Vec<Vec<i64>> = samples.chunks_exact(k).map(<[i64]>::to_vec).collect();
        assert_eq!(emitted, expected, "k={k}");
    }
}

#[test]
fn test_sliding_emissions_are_the_last_k_samples() {
    let samples = gen_samples(42, 500);
    for (k, r) in [(5, 2), (8, 8), (10, 1), (9, 4)] {
        let settings = WindowSettings::new(k).with_resolution(r);
        let mut window = SlidingWindow::new(Contents, settings).unwrap();
        for (i, &s) in samples.iter().enumerate() {
            let calls = i + 1;
            let emission = window.add_sample(s);
            let due = calls >= k && (calls - k) % r == 0;
            assert_eq!(emission.is_some(), due, "k={k} r={r} call={calls}");
            if let Some(contents) = emission {
                assert_eq!(contents, samples[calls - k..calls].to_vec());
            }
        }
    }
}

#[test]
fn test_sliding_average_tracks_a_naive_moving_average() {
    let samples: Vec<f64> = gen_samples(3, 200).into_iter().map(|s| s as f64).collect();
    let settings = WindowSettings::new(6).with_resolution(3);
    let mut window = SlidingWindow::new(BlocksAverage, settings).unwrap();
    for (i, &s) in samples.iter().enumerate() {
        if let Some(avg) = window.add_sample(s) {
            let tail = &samples[i + 1 - 6..=i];
            let naive = tail.iter().sum::<f64>() / 6.0;
            assert!((avg - naive).abs() < 1e-9);
        }
    }
}

#[test]
fn test_tumbling_time_window_driven_by_caller_clock() {
    // A host loop closing a block every fourth sample, plus two idle ticks.
    let settings = WindowSettings::new(4).with_external_timer();
    let mut window = TumblingTimeWindow::new(Sum, SingleAverage, settings).unwrap();
    let mut emitted = Vec::new();
    for (tick, s) in (1..=12i64).enumerate() {
        window.add_sample(s);
        if (tick + 1) % 4 == 0 {
            emitted.extend(window.next_block());
        }
    }
    emitted.extend(window.next_block());
    emitted.extend(window.next_block());
    assert_eq!(emitted, vec![2, 6, 10, 0, 0]);
}

#[test]
fn test_sliding_time_window_with_custom_functions() {
    // Block value: the largest sample; window value: the range across blocks.
    let settings = WindowSettings::new(3).with_resolution(1).with_external_timer();
    let range = |blocks: &RingBuffer<Option<i64>>| {
        let peaks: Vec<i64> = blocks.iter().flatten().copied().collect();
        match (peaks.iter().min(), peaks.iter().max()) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0,
        }
    };
    let mut window = SlidingTimeWindow::new(Max, range, settings).unwrap();

    let blocks: [&[i64]; 5] = [&[1, 9], &[4], &[], &[20, 2], &[3]];
    let emitted: Vec<Option<i64>> = blocks
        .iter()
        .map(|block| {
            window.add_samples(block.iter().copied());
            window.next_block()
        })
        .collect();
    assert_eq!(emitted, vec![None, None, Some(5), Some(16), Some(17)]);
}

#[test]
fn test_accumulate_fn_builds_structured_accumulators() {
    #[derive(Debug, Clone)]
    struct Reading {
        sensor: &'static str,
    }

    let by_sensor = accumulate_fn(Vec::new, |mut acc: Vec<&'static str>, r: Reading| {
        if !acc.contains(&r.sensor) {
            acc.push(r.sensor);
        }
        acc
    });
    let mut window = TumblingWindow::new(
        by_sensor,
        |sensors: Vec<&'static str>, n: usize| (sensors, n),
        WindowSettings::new(3),
    )
    .unwrap();

    let readings = [
        Reading { sensor: "a" },
        Reading { sensor: "b" },
        Reading { sensor: "a" },
    ];
    let out = window.add_samples(readings.iter().cloned());
    assert_eq!(out, vec![(vec!["a", "b"], 3)]);
}

#[test]
fn test_windows_move_across_threads() {
    let mut window = TumblingWindow::new(Sum, SingleAverage, WindowSettings::new(2)).unwrap();
    window.add_sample(10i64);
    let handle = std::thread::spawn(move || window.add_sample(20));
    assert_eq!(handle.join().unwrap(), Some(15));
}
