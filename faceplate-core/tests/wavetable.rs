mod common;

use std::sync::Arc;
use std::time::Duration;

use faceplate_core::wavetable::{
    ChartState, ScrubPhase, ScrubTiming, WavetableChart, WavetableError, WavetableScrubber,
    WAVE_LENGTH, WAVE_POINTS,
};
use faceplate_types::{entries, EnumParamUpdate, ListSelectItem};

fn timing(display_ms: u64, tick_ms: u64) -> ScrubTiming {
    ScrubTiming {
        display_time: Duration::from_millis(display_ms),
        tick: Duration::from_millis(tick_ms),
    }
}

fn scrubber_with(num_waves: usize, timing: ScrubTiming) -> (tempfile::TempDir, WavetableScrubber) {
    let dir = tempfile::tempdir().unwrap();
    common::write_wavetable(&dir.path().join("table.wav"), num_waves, 1);
    let scrubber = WavetableScrubber::new(dir.path(), timing);
    assert!(scrubber.load("table"));
    (dir, scrubber)
}

/// First point of the wave emitted on each tick, `None` for unchanged ticks.
fn run(scrubber: &WavetableScrubber, ticks: usize) -> Vec<Option<f32>> {
    (0..ticks)
        .map(|_| scrubber.next_wave_samples().first().copied())
        .collect()
}

#[test]
fn test_load_sets_initial_state() {
    let (_dir, scrubber) = scrubber_with(4, ScrubTiming::default());
    assert_eq!(scrubber.num_waves(), 4);
    assert_eq!(scrubber.wave_index(), Some(0));
    assert_eq!(scrubber.cursor(), Some(0));
    assert_eq!(scrubber.phase(), ScrubPhase::Forward);
}

#[test]
fn test_misaligned_file_fails_and_unloads() {
    let dir = tempfile::tempdir().unwrap();
    common::write_wavetable(&dir.path().join("good.wav"), 2, 1);
    common::write_wavetable_samples(&dir.path().join("bad.wav"), WAVE_LENGTH * 2 + 7, 1);
    let scrubber = WavetableScrubber::new(dir.path(), ScrubTiming::default());

    assert!(scrubber.load("good"));
    assert!(!scrubber.load("bad"));
    assert_eq!(scrubber.phase(), ScrubPhase::Unloaded);
    assert!(scrubber.next_wave_samples().is_empty());

    match scrubber.load_path(&dir.path().join("bad.wav")) {
        Err(WavetableError::Misaligned { samples }) => assert_eq!(samples, WAVE_LENGTH * 2 + 7),
        other => panic!("expected Misaligned, got {:?}", other),
    }
}

#[test]
fn test_missing_and_empty_files_fail() {
    let dir = tempfile::tempdir().unwrap();
    common::write_wavetable(&dir.path().join("empty.wav"), 0, 1);
    let scrubber = WavetableScrubber::new(dir.path(), ScrubTiming::default());
    assert!(!scrubber.load("nope"));
    assert!(matches!(
        scrubber.load_path(&dir.path().join("nope.wav")),
        Err(WavetableError::Read(_))
    ));
    assert!(matches!(
        scrubber.load_path(&dir.path().join("empty.wav")),
        Err(WavetableError::NoWaves)
    ));
}

#[test]
fn test_too_many_waves_rejected() {
    let dir = tempfile::tempdir().unwrap();
    common::write_wavetable(&dir.path().join("huge.wav"), 257, 1);
    let scrubber = WavetableScrubber::new(dir.path(), ScrubTiming::default());
    assert!(matches!(
        scrubber.load_path(&dir.path().join("huge.wav")),
        Err(WavetableError::TooManyWaves(257))
    ));
}

#[test]
fn test_reads_first_channel_only() {
    let dir = tempfile::tempdir().unwrap();
    common::write_wavetable(&dir.path().join("stereo.wav"), 2, 2);
    let scrubber = WavetableScrubber::new(dir.path(), timing(20, 10));
    assert!(scrubber.load("stereo"));
    assert_eq!(scrubber.num_waves(), 2);
    let wave = scrubber.next_wave_samples();
    assert_eq!(wave.len(), WAVE_POINTS);
    assert!(wave.iter().all(|&s| s == 0.0));
}

#[test]
fn test_int_samples_are_normalized() {
    let dir = tempfile::tempdir().unwrap();
    common::write_int_wavetable(&dir.path().join("int.wav"), 1);
    let scrubber = WavetableScrubber::new(dir.path(), timing(10, 10));
    assert!(scrubber.load("int"));
    let wave = scrubber.next_wave_samples();
    assert!(wave.iter().all(|&s| (s - 0.5).abs() < 1e-6));
}

#[test]
fn test_wave_changes_every_ten_ticks() {
    // Tick is a tenth of the per-wave time (400 ms / 4 waves = 100 ms).
    let (_dir, scrubber) = scrubber_with(4, timing(400, 10));
    // Stop before the reversal, where the clamped index repeats the last wave.
    let emitted = run(&scrubber, 35);
    let changes: Vec<usize> = emitted
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_some())
        .map(|(i, _)| i)
        .collect();
    // Rounding puts the first change half a wave in.
    assert_eq!(changes, vec![4, 14, 24, 34]);
    for pair in changes.windows(2) {
        assert_eq!(pair[1] - pair[0], 10);
    }
}

#[test]
fn test_ping_pong_cycle() {
    // One wave per tick.
    let n = 3;
    let (_dir, scrubber) = scrubber_with(n, timing(30, 10));
    let mut reversed_at = None;
    let mut waves = Vec::new();
    for tick in 0..2 * n {
        let wave = scrubber.next_wave_samples();
        waves.push(wave[0]);
        if reversed_at.is_none() && scrubber.phase() == ScrubPhase::Reverse {
            reversed_at = Some(tick);
            assert_eq!(scrubber.wave_index(), Some(n - 1));
        }
    }
    assert_eq!(reversed_at, Some(n - 1));
    assert_eq!(waves, vec![0.0, 1.0, 2.0, 2.0, 0.0, 0.0]);
    // Back at the start, going forward again.
    assert_eq!(scrubber.phase(), ScrubPhase::Forward);
    assert_eq!(scrubber.wave_index(), Some(0));
    assert_eq!(scrubber.cursor(), Some(0));
    assert_eq!(run(&scrubber, 3), vec![Some(0.0), Some(1.0), Some(2.0)]);
}

#[test]
fn test_reverse_cursor_steps_back_one_extra_wave() {
    let (_dir, scrubber) = scrubber_with(8, timing(80, 10));
    run(&scrubber, 8);
    assert_eq!(scrubber.phase(), ScrubPhase::Reverse);
    assert_eq!(scrubber.cursor(), Some(7 * WAVE_LENGTH));
    // First reverse step: index lags by one so inc is 2. Cursor goes to
    // 8 waves after the read, then back (2 + 1).
    scrubber.next_wave_samples();
    assert_eq!(scrubber.cursor(), Some(5 * WAVE_LENGTH));
    // Steady reverse: inc 1 reads wave 5 and lands on wave 4.
    assert_eq!(scrubber.next_wave_samples()[0], 5.0);
    assert_eq!(scrubber.cursor(), Some(4 * WAVE_LENGTH));
}

#[test]
fn test_unload_stops_animation() {
    let (_dir, scrubber) = scrubber_with(2, timing(20, 10));
    scrubber.unload();
    assert_eq!(scrubber.phase(), ScrubPhase::Unloaded);
    assert!(run(&scrubber, 5).iter().all(Option::is_none));
}

#[test]
fn test_chart_follows_wavetable_lists() {
    let dir = tempfile::tempdir().unwrap();
    common::write_wavetable(&dir.path().join("Saw.wav"), 2, 1);
    let scrubber = Arc::new(WavetableScrubber::new(dir.path(), timing(20, 10)));
    let mut chart = WavetableChart::new(scrubber.clone());

    let mut msg = EnumParamUpdate {
        name: "Wavetable".into(),
        selected_item: 9,
        items: entries(["Saw", "Missing"]),
        wt_list: true,
    };
    // Out-of-range selection falls back to the first entry.
    chart.on_enum_list(&msg);
    assert_eq!(chart.state(), &ChartState::Animating);
    assert!(chart.tick());
    assert_eq!(chart.points().len(), WAVE_POINTS);

    // A wavetable that cannot load draws a zero line.
    chart.on_select(&ListSelectItem {
        selected_item: 1,
        wt_list: true,
    });
    assert_eq!(chart.state(), &ChartState::Flat);
    assert!(!chart.tick());
    assert_eq!(chart.points(), &[0.0; WAVE_POINTS][..]);
    assert!(!scrubber.is_loaded());

    // Any other list hides the chart.
    msg.wt_list = false;
    chart.on_enum_list(&msg);
    assert_eq!(chart.state(), &ChartState::Hidden);
    assert!(chart.points().is_empty());
}

#[test]
fn test_chart_clear_unloads_and_hides() {
    let dir = tempfile::tempdir().unwrap();
    common::write_wavetable(&dir.path().join("Saw.wav"), 2, 1);
    let scrubber = Arc::new(WavetableScrubber::new(dir.path(), timing(20, 10)));
    let mut chart = WavetableChart::new(scrubber.clone());
    chart.on_enum_list(&EnumParamUpdate {
        name: "Wavetable".into(),
        selected_item: 0,
        items: entries(["Saw"]),
        wt_list: true,
    });
    assert!(chart.is_animating());

    chart.clear();
    assert_eq!(chart.state(), &ChartState::Hidden);
    assert!(chart.points().is_empty());
    assert!(!scrubber.is_loaded());
    assert!(!chart.tick());
}
