mod common;

use std::time::Duration;

use faceplate_core::dispatch::{DisplayEvent, ScopeDirective};
use faceplate_core::pipeline::DisplayPipeline;
use faceplate_core::scope::{
    DisplayMode, ScopeDataSource, ScopeFeed, ScopeModeHandle, ScopeVisibility,
    SCOPE_IDLE_FRAME_COUNT,
};
use faceplate_core::transport::RecordSender;
use faceplate_types::{SampleFrame, ScopeMode, SCOPE_NUM_SAMPLES};

struct Rig {
    source: ScopeDataSource,
    feed: ScopeFeed,
    mode: ScopeModeHandle,
    visibility: ScopeVisibility,
    events: crossbeam_channel::Receiver<DisplayEvent>,
}

fn rig(mode: ScopeMode) -> Rig {
    let (tx, events) = crossbeam_channel::unbounded();
    let mode = ScopeModeHandle::new(mode);
    let visibility = ScopeVisibility::new();
    let (mut source, feed) =
        ScopeDataSource::new(mode.clone(), visibility.clone(), tx, SCOPE_IDLE_FRAME_COUNT);
    source.start(480);
    Rig {
        source,
        feed,
        mode,
        visibility,
        events,
    }
}

fn ramp() -> SampleFrame {
    let samples: Vec<f32> = (0..SCOPE_NUM_SAMPLES)
        .flat_map(|i| {
            let l = i as f32 / SCOPE_NUM_SAMPLES as f32;
            [l, -0.5 * l]
        })
        .collect();
    SampleFrame::from_interleaved(&samples)
}

#[test]
fn test_osc_sums_channels() {
    let mut r = rig(ScopeMode::Osc);
    let frame = ramp();
    r.source.ingest(&frame);
    let points = r.feed.snapshot();
    for (i, ((l, rt), p)) in frame.pairs().zip(points.iter()).enumerate() {
        let x = 2.0 * i as f32 / SCOPE_NUM_SAMPLES as f32 - 1.0;
        assert!((p.x - x).abs() < 1e-6);
        assert!((p.y - (l + rt)).abs() < 1e-6);
    }
    assert_eq!(points[0].x, -1.0);
}

#[test]
fn test_xy_rotates_45_degrees() {
    let mut r = rig(ScopeMode::Xy);
    let frame = ramp();
    r.source.ingest(&frame);
    let points = r.feed.snapshot();
    let (s, c) = std::f32::consts::FRAC_PI_4.sin_cos();
    for ((l, rt), p) in frame.pairs().zip(points.iter()) {
        assert!((p.x - (l * c - rt * s)).abs() < 1e-6);
        assert!((p.y - (l * s + rt * c)).abs() < 1e-6);
    }
    // Equal channels land on the vertical axis.
    let mut r = rig(ScopeMode::Xy);
    r.source.ingest(&SampleFrame::from_interleaved(&[0.5, 0.5]));
    let p = r.feed.snapshot()[0];
    assert!(p.x.abs() < 1e-6);
    assert!((p.y - 0.5 * std::f32::consts::SQRT_2).abs() < 1e-6);
}

#[test]
fn test_off_keeps_last_published_points() {
    let mut r = rig(ScopeMode::Osc);
    r.source.ingest(&ramp());
    let before = r.feed.snapshot();
    r.mode.set(ScopeMode::Off);
    r.source.ingest(&SampleFrame::from_interleaved(&[0.9; 256]));
    assert!(!r.feed.has_fresh());
    assert_eq!(r.feed.snapshot(), before);
}

#[test]
fn test_idle_background_scope_hides_at_threshold() {
    let mut r = rig(ScopeMode::Osc);
    r.visibility.show_mode(DisplayMode::Background);
    let silence = SampleFrame::default();

    for _ in 0..SCOPE_IDLE_FRAME_COUNT - 1 {
        r.source.ingest(&silence);
    }
    assert!(r.visibility.is_shown());
    assert!(r.events.try_recv().is_err());

    r.source.ingest(&silence);
    assert!(!r.visibility.is_shown());
    assert_eq!(r.visibility.display_mode(), DisplayMode::Background);
    assert_eq!(
        r.events.try_recv().unwrap(),
        DisplayEvent::Scope(ScopeDirective::Hide { reset_mode: false })
    );
    assert!(r.events.try_recv().is_err());

    // Hidden scopes stop counting.
    for _ in 0..SCOPE_IDLE_FRAME_COUNT * 2 {
        r.source.ingest(&silence);
    }
    assert!(r.events.try_recv().is_err());
}

#[test]
fn test_activity_resets_idle_count() {
    let mut r = rig(ScopeMode::Osc);
    r.visibility.show_mode(DisplayMode::Background);
    let silence = SampleFrame::default();
    for _ in 0..SCOPE_IDLE_FRAME_COUNT - 1 {
        r.source.ingest(&silence);
    }
    r.source.ingest(&ramp());
    assert_eq!(r.source.idle_frames(), 0);
    // Already shown, so no show directive.
    assert!(r.events.try_recv().is_err());
    for _ in 0..SCOPE_IDLE_FRAME_COUNT - 1 {
        r.source.ingest(&silence);
    }
    assert!(r.visibility.is_shown());
}

#[test]
fn test_hidden_scope_reappears_on_signal() {
    let mut r = rig(ScopeMode::Xy);
    r.visibility.show_mode(DisplayMode::Background);
    for _ in 0..SCOPE_IDLE_FRAME_COUNT {
        r.source.ingest(&SampleFrame::default());
    }
    let _hide = r.events.try_recv().unwrap();

    r.source.ingest(&ramp());
    assert!(r.visibility.is_shown());
    assert_eq!(
        r.events.try_recv().unwrap(),
        DisplayEvent::Scope(ScopeDirective::Show)
    );
}

#[test]
fn test_latest_frame_reaches_redraw() {
    let mut settings = common::local_settings();
    settings.default_scope_mode = ScopeMode::Osc;
    let (pipeline, mut handles, _ui_tx, samples_tx) =
        DisplayPipeline::start_local(&settings).unwrap();

    // Burst faster than the worker drains; the single slot keeps the newest.
    for level in 1..=20 {
        let frame = SampleFrame::from_interleaved(&[level as f32 * 0.01, 0.0]);
        samples_tx.send(&frame.to_record()).unwrap();
    }
    common::wait_until(Duration::from_secs(2), || {
        handles.scope.with(|points| (points[0].y - 0.2).abs() < 1e-6)
    });

    pipeline.shutdown();
}
