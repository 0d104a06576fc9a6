//! Frame-driver tests: blending through ticks, feeds and dirty tracking.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glidechart::{
    Chart, ChartConfig, PointerEvent, SeriesKind, SeriesValue, Snapshot, TickOutcome,
};
use glidechart_test_utils::RecordingSurface;

const FRAME_MS: f64 = 16.0;

/// Chart that records `frame[0].values()` on every rendered tick.
fn recording_chart(kind: SeriesKind) -> (Chart, Rc<RefCell<Vec<Vec<f64>>>>) {
    let mut chart = Chart::new(ChartConfig::new(vec![kind]));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    chart.on_render(move |_ui, frame| {
        sink.borrow_mut().push(frame[0].values().to_vec());
    });
    (chart, seen)
}

/// Tick every `FRAME_MS` until the chart stops asking for frames.
fn tick_until_settled(chart: &mut Chart, surface: &mut RecordingSurface, time: &mut f64) {
    for _ in 0..500 {
        *time += FRAME_MS;
        let outcome = chart.tick(*time, surface).unwrap();
        if !outcome.repaint {
            return;
        }
    }
    panic!("chart never settled");
}

// ==================== Blending through ticks ====================

#[test]
fn test_static_series_jumps_to_newest() {
    let (mut chart, seen) = recording_chart(SeriesKind::Static);
    let mut surface = RecordingSurface::default();

    chart.push(vec![SeriesValue::scalar(1.0)]).unwrap();
    chart.tick(0.0, &mut surface).unwrap();
    chart.push(vec![SeriesValue::scalar(5.0)]).unwrap();
    chart.tick(FRAME_MS, &mut surface).unwrap();

    assert_eq!(seen.borrow().last().unwrap(), &vec![5.0]);
}

#[test]
fn test_dynamic_series_blends_monotonically() {
    let (mut chart, seen) = recording_chart(SeriesKind::Dynamic);
    let mut surface = RecordingSurface::default();
    let mut time = 0.0;

    chart.push(vec![SeriesValue::Dynamic(vec![0.0])]).unwrap();
    chart.tick(time, &mut surface).unwrap();
    tick_until_settled(&mut chart, &mut surface, &mut time);

    seen.borrow_mut().clear();
    chart.push(vec![SeriesValue::Dynamic(vec![10.0])]).unwrap();
    tick_until_settled(&mut chart, &mut surface, &mut time);

    let values: Vec<f64> = seen.borrow().iter().map(|v| v[0]).collect();
    assert!(values.len() > 10, "blend finished too quickly: {:?}", values);
    for pair in values.windows(2) {
        assert!(pair[1] >= pair[0], "not monotonic: {:?}", values);
    }
    assert!(values.iter().all(|v| (0.0..=10.0).contains(v)));
    assert!(values.iter().any(|v| *v > 0.0 && *v < 10.0));
    assert_eq!(*values.last().unwrap(), 10.0);
    assert_eq!(chart.queue().len(), 1);
}

#[test]
fn test_large_delta_collapses_to_newest() {
    let (mut chart, seen) = recording_chart(SeriesKind::Dynamic);
    let mut surface = RecordingSurface::default();

    for value in [0.0, 1.0, 2.0] {
        chart.push(vec![SeriesValue::Dynamic(vec![value])]).unwrap();
    }
    chart.tick(0.0, &mut surface).unwrap();
    assert_eq!(chart.queue().len(), 3);

    // The host was suspended for five seconds.
    chart.tick(5000.0, &mut surface).unwrap();
    assert_eq!(chart.queue().len(), 1);
    assert_eq!(seen.borrow().last().unwrap(), &vec![2.0]);
}

#[test]
fn test_moving_window_scrolls() {
    let mut chart = Chart::new(ChartConfig::new(vec![SeriesKind::Moving]));
    let windows = Rc::new(RefCell::new(Vec::new()));
    let sink = windows.clone();
    chart.on_render(move |_ui, frame| {
        let window = frame[0].as_moving().unwrap();
        sink.borrow_mut()
            .push((window.samples.to_vec(), window.offset, window.visible_len));
    });
    let mut surface = RecordingSurface::default();

    chart
        .push(vec![SeriesValue::moving(vec![1.0, 2.0, 3.0], 0.0)])
        .unwrap();
    chart.tick(0.0, &mut surface).unwrap();
    chart.tick(5000.0, &mut surface).unwrap();

    chart
        .push(vec![SeriesValue::moving(vec![2.0, 3.0, 4.0], 1.0)])
        .unwrap();
    chart.tick(5000.0 + FRAME_MS, &mut surface).unwrap();
    {
        let windows = windows.borrow();
        let (samples, offset, visible_len) = windows.last().unwrap();
        assert_eq!(samples, &vec![1.0, 2.0, 3.0, 4.0]);
        assert!(*offset > 0.0 && *offset < 1.0);
        assert_eq!(*visible_len, 3);
    }

    let mut time = 5000.0 + FRAME_MS;
    tick_until_settled(&mut chart, &mut surface, &mut time);

    let windows = windows.borrow();
    let (samples, offset, _) = windows.last().unwrap();
    assert_eq!(samples, &vec![2.0, 3.0, 4.0]);
    assert_eq!(*offset, 1.0);
    for pair in windows.windows(2) {
        assert!(pair[1].1 >= pair[0].1);
    }
}

#[test]
fn test_rejected_push_keeps_queue() {
    let (mut chart, _) = recording_chart(SeriesKind::Dynamic);
    chart.push(vec![SeriesValue::Dynamic(vec![1.0, 2.0])]).unwrap();
    assert!(chart.push(vec![SeriesValue::Dynamic(vec![1.0])]).is_err());
    assert!(chart.push(Snapshot::default()).is_err());
    assert_eq!(chart.queue().len(), 1);
}

#[test]
fn test_empty_queue_draws_nothing() {
    let (mut chart, seen) = recording_chart(SeriesKind::Static);
    let mut surface = RecordingSurface::default();

    let outcome = chart.tick(0.0, &mut surface).unwrap();
    assert!(!outcome.rendered);
    assert_eq!(surface.clears(), 0);
    assert!(seen.borrow().is_empty());
}

// ==================== Feeds ====================

#[test]
fn test_feed_snapshot_visible_on_next_tick() {
    let (mut chart, seen) = recording_chart(SeriesKind::Static);
    let mut surface = RecordingSurface::default();
    let feed = chart.feed();

    std::thread::spawn(move || {
        feed.push(vec![SeriesValue::scalar(42.0)]).unwrap();
    })
    .join()
    .unwrap();

    assert!(chart.queue().is_empty());
    let outcome = chart.tick(0.0, &mut surface).unwrap();
    assert!(outcome.rendered);
    assert_eq!(seen.borrow().last().unwrap(), &vec![42.0]);
}

#[test]
fn test_invalid_feed_snapshot_is_dropped() {
    let (mut chart, seen) = recording_chart(SeriesKind::Static);
    let mut surface = RecordingSurface::default();
    let feed = chart.feed();

    feed.push(vec![SeriesValue::Dynamic(vec![1.0])]).unwrap();
    let outcome = chart.tick(0.0, &mut surface).unwrap();

    assert!(!outcome.rendered);
    assert!(chart.queue().is_empty());
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_feed_after_chart_dropped() {
    let (chart, _) = recording_chart(SeriesKind::Static);
    let feed = chart.feed();
    drop(chart);
    assert!(feed.push(vec![SeriesValue::scalar(1.0)]).is_err());
}

#[test]
fn test_waker_called_for_pushes() {
    let (mut chart, _) = recording_chart(SeriesKind::Static);
    let mut surface = RecordingSurface::default();
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = wakes.clone();
    chart.set_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    chart.tick(0.0, &mut surface).unwrap();
    chart.push(vec![SeriesValue::scalar(1.0)]).unwrap();
    assert_eq!(wakes.load(Ordering::SeqCst), 1);

    chart.feed().push(vec![SeriesValue::scalar(2.0)]).unwrap();
    assert_eq!(wakes.load(Ordering::SeqCst), 2);

    chart.clear_waker();
    chart.feed().push(vec![SeriesValue::scalar(3.0)]).unwrap();
    assert_eq!(wakes.load(Ordering::SeqCst), 2);
}

// ==================== Dirty tracking ====================

#[test]
fn test_repaint_only_while_changing() {
    let (mut chart, _) = recording_chart(SeriesKind::Dynamic);
    let mut surface = RecordingSurface::default();
    let mut time = 0.0;

    chart.push(vec![SeriesValue::Dynamic(vec![0.0])]).unwrap();
    let first = chart.tick(time, &mut surface).unwrap();
    assert!(first.repaint);

    tick_until_settled(&mut chart, &mut surface, &mut time);
    assert!(!chart.needs_repaint());

    time += FRAME_MS;
    let idle = chart.tick(time, &mut surface).unwrap();
    assert_eq!(
        idle,
        TickOutcome {
            rendered: true,
            repaint: false,
            cursor: None,
        }
    );

    chart.push(vec![SeriesValue::Dynamic(vec![1.0])]).unwrap();
    assert!(chart.needs_repaint());
    time += FRAME_MS;
    assert!(chart.tick(time, &mut surface).unwrap().repaint);
}

#[test]
fn test_resize_requests_repaint() {
    let (mut chart, _) = recording_chart(SeriesKind::Static);
    let mut surface = RecordingSurface::default();
    let mut time = 0.0;

    chart.push(vec![SeriesValue::scalar(1.0)]).unwrap();
    chart.tick(time, &mut surface).unwrap();
    tick_until_settled(&mut chart, &mut surface, &mut time);

    surface.resize(640.0, 480.0);
    time += FRAME_MS;
    assert!(chart.tick(time, &mut surface).unwrap().repaint);
}

#[test]
fn test_pointer_event_marks_dirty() {
    let (mut chart, _) = recording_chart(SeriesKind::Static);
    let mut surface = RecordingSurface::default();
    let mut time = 0.0;

    chart.push(vec![SeriesValue::scalar(1.0)]).unwrap();
    chart.tick(time, &mut surface).unwrap();
    tick_until_settled(&mut chart, &mut surface, &mut time);
    assert!(!chart.needs_repaint());

    chart.pointer_event(PointerEvent::Entered);
    assert!(chart.needs_repaint());
}

#[test]
fn test_dirty_tracking_off_always_repaints() {
    let mut chart = Chart::new(
        ChartConfig::new(vec![SeriesKind::Static]).with_dirty_tracking(false),
    );
    let mut surface = RecordingSurface::default();

    chart.push(vec![SeriesValue::scalar(1.0)]).unwrap();
    for i in 0..5 {
        let outcome = chart.tick(i as f64 * FRAME_MS, &mut surface).unwrap();
        assert!(outcome.repaint);
    }
    assert!(chart.needs_repaint());
}
