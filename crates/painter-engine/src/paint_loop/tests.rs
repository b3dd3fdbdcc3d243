use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::*;
use crate::coords::{Point, Size};
use crate::paint::Color;
use crate::surface::Surface;

const WAIT: Duration = Duration::from_secs(2);

/// Copies every published frame into a channel.
struct Capture {
    tx: Mutex<Sender<Surface>>,
}

impl RenderSink for Capture {
    fn publish(&self, frame: &Surface) {
        let _ = self.tx.lock().send(frame.clone());
    }
}

fn capture_loop(config: LoopConfig) -> (PaintLoop, Receiver<Surface>) {
    let (tx, rx) = mpsc::channel();
    let paint_loop = PaintLoop::new(config, Capture { tx: Mutex::new(tx) });
    (paint_loop, rx)
}

fn started() -> (PaintLoop, Receiver<Surface>) {
    let (paint_loop, rx) = capture_loop(LoopConfig::default());
    paint_loop.start().unwrap();
    (paint_loop, rx)
}

fn at(frame: &Surface, x: i32, y: i32) -> Color {
    frame.pixel(Point::new(x, y)).unwrap()
}

/// Repaint of the state folded from the default over `ops`.
fn expected_frame(size: Size, ops: &[Operation]) -> Surface {
    let mut surface = Surface::new(size).unwrap();
    let mut state = State::default();
    for op in ops {
        op.apply(&mut surface, &mut state);
    }
    repaint(&mut surface, &state);
    surface
}

// ── scenarios ─────────────────────────────────────────────────────────────

#[test]
fn white_background_with_figure() {
    let (paint_loop, rx) = started();
    paint_loop.post_all([
        Operation::white(),
        Operation::AddFigure { x: 0.5, y: 0.5 },
        Operation::RequestUpdate,
    ]);

    let frame = rx.recv_timeout(WAIT).expect("no frame published");
    assert_eq!(at(&frame, 400, 400), Color::YELLOW);
    assert_eq!(at(&frame, 350, 400), Color::YELLOW);
    assert_eq!(at(&frame, 400, 430), Color::YELLOW);
    assert_eq!(at(&frame, 10, 10), Color::WHITE);
    assert_eq!(at(&frame, 500, 500), Color::WHITE);
    assert_eq!(at(&frame, 700, 700), Color::WHITE);

    paint_loop.stop_and_wait();
}

#[test]
fn green_background_with_cut_out() {
    let (paint_loop, rx) = started();
    paint_loop.post_all([
        Operation::green(),
        Operation::SetHighlightRegion { x1: 0.25, y1: 0.25, x2: 0.75, y2: 0.75 },
        Operation::RequestUpdate,
    ]);

    let frame = rx.recv_timeout(WAIT).expect("no frame published");
    assert_eq!(at(&frame, 100, 100), Color::GREEN);
    assert_eq!(at(&frame, 200, 200), Color::BLACK);
    assert_eq!(at(&frame, 400, 400), Color::BLACK);
    assert_eq!(at(&frame, 599, 599), Color::BLACK);
    assert_eq!(at(&frame, 600, 600), Color::GREEN);

    paint_loop.stop_and_wait();
}

#[test]
fn published_frame_matches_folded_state() {
    let ops = vec![
        Operation::green(),
        Operation::AddFigure { x: 0.2, y: 0.3 },
        Operation::SetHighlightRegion { x1: 0.6, y1: 0.1, x2: 0.9, y2: 0.4 },
        Operation::MoveFigures { dx: 0.05, dy: -0.1 },
        Operation::AddFigure { x: 0.8, y: 0.8 },
        Operation::white(),
    ];

    let (paint_loop, rx) = started();
    paint_loop.post_all(ops.iter().cloned());
    paint_loop.post(Operation::RequestUpdate);

    let frame = rx.recv_timeout(WAIT).expect("no frame published");
    assert!(frame == expected_frame(paint_loop.config().size, &ops));

    paint_loop.stop_and_wait();
}

#[test]
fn move_shifts_figure() {
    let (paint_loop, rx) = started();
    paint_loop.post_all([
        Operation::white(),
        Operation::AddFigure { x: 0.5, y: 0.5 },
        Operation::RequestUpdate,
    ]);
    rx.recv_timeout(WAIT).expect("initial frame");

    paint_loop.post_all([Operation::MoveFigures { dx: 0.1, dy: 0.1 }, Operation::RequestUpdate]);
    let frame = rx.recv_timeout(WAIT).expect("moved frame");
    assert_eq!(at(&frame, 480, 480), Color::YELLOW);
    assert_eq!(at(&frame, 400, 400), Color::WHITE);

    paint_loop.stop_and_wait();
}

#[test]
fn reset_returns_to_black() {
    let (paint_loop, rx) = started();
    paint_loop.post_all([
        Operation::green(),
        Operation::SetHighlightRegion { x1: 0.1, y1: 0.1, x2: 0.9, y2: 0.9 },
        Operation::AddFigure { x: 0.3, y: 0.3 },
        Operation::RequestUpdate,
    ]);
    let before = rx.recv_timeout(WAIT).expect("populated frame");
    assert_eq!(at(&before, 50, 50), Color::GREEN);

    paint_loop.post_all([Operation::Reset, Operation::RequestUpdate]);
    let after = rx.recv_timeout(WAIT).expect("reset frame");
    assert!(after == expected_frame(paint_loop.config().size, &[]));

    paint_loop.stop_and_wait();
}

#[test]
fn no_publish_without_update() {
    let (paint_loop, rx) = started();
    paint_loop.post_all([Operation::white(), Operation::AddFigure { x: 0.5, y: 0.5 }]);
    paint_loop.stop_and_wait();
    assert!(rx.try_recv().is_err());
}

#[test]
fn composite_update_publishes_once() {
    let (paint_loop, rx) = started();
    paint_loop.post(Operation::composite([
        Operation::white(),
        Operation::RequestUpdate,
        Operation::RequestUpdate,
    ]));
    paint_loop.stop_and_wait();

    assert_eq!(rx.try_iter().count(), 1);
}

// ── double buffering ──────────────────────────────────────────────────────

#[test]
fn surfaces_swap_after_each_publish() {
    let (paint_loop, _rx) = started();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let probe = || {
        let seen = seen.clone();
        Operation::custom(move |s: &mut Surface| seen.lock().push(s.as_bytes().as_ptr() as usize))
    };

    paint_loop.post_all([
        probe(),
        Operation::RequestUpdate,
        probe(),
        Operation::RequestUpdate,
        probe(),
    ]);
    paint_loop.stop_and_wait();

    let seen = seen.lock();
    assert_eq!(seen.len(), 3);
    assert_ne!(seen[0], seen[1]);
    assert_eq!(seen[0], seen[2]);
}

// ── lifecycle ─────────────────────────────────────────────────────────────

#[test]
fn stop_before_start_returns() {
    let (paint_loop, _rx) = capture_loop(LoopConfig::default());
    paint_loop.stop_and_wait();
    paint_loop.stop_and_wait();
    assert_eq!(paint_loop.phase(), Phase::Stopped);
}

#[test]
fn stop_twice_returns() {
    let (paint_loop, _rx) = started();
    assert!(paint_loop.is_running());
    paint_loop.stop_and_wait();
    paint_loop.stop_and_wait();
    assert_eq!(paint_loop.phase(), Phase::Stopped);
}

#[test]
fn stop_wakes_idle_consumer() {
    let config = LoopConfig {
        poll_interval: Duration::from_secs(30),
        ..LoopConfig::default()
    };
    let (paint_loop, _rx) = capture_loop(config);
    paint_loop.start().unwrap();
    thread::sleep(Duration::from_millis(20));

    let begin = Instant::now();
    paint_loop.stop_and_wait();
    assert!(begin.elapsed() < Duration::from_secs(10));
}

#[test]
fn concurrent_stoppers_all_return() {
    let (paint_loop, _rx) = started();
    let paint_loop = Arc::new(paint_loop);

    let stoppers: Vec<_> = (0..4)
        .map(|_| {
            let paint_loop = paint_loop.clone();
            thread::spawn(move || paint_loop.stop_and_wait())
        })
        .collect();
    for s in stoppers {
        s.join().unwrap();
    }
    assert_eq!(paint_loop.phase(), Phase::Stopped);
}

#[test]
fn ops_posted_before_stop_are_drained() {
    let applied = Arc::new(AtomicUsize::new(0));
    let (paint_loop, rx) = started();

    for i in 0..200 {
        let applied = applied.clone();
        paint_loop.post(Operation::AddFigure { x: (i % 10) as f64 / 10.0, y: 0.5 });
        paint_loop.post(Operation::custom(move |_| {
            applied.fetch_add(1, Ordering::SeqCst);
        }));
    }
    paint_loop.post_all([Operation::white(), Operation::RequestUpdate]);
    paint_loop.stop_and_wait();

    assert_eq!(applied.load(Ordering::SeqCst), 200);
    assert_eq!(paint_loop.pending(), 0);
    let last = rx.try_iter().last().expect("final frame");
    assert_eq!(at(&last, 780, 780), Color::WHITE);
    assert_eq!(at(&last, 400, 400), Color::YELLOW);
}

#[test]
fn start_twice_runs_one_consumer() {
    let (paint_loop, _rx) = started();
    paint_loop.start().unwrap();

    let threads = Arc::new(Mutex::new(Vec::new()));
    for _ in 0..20 {
        let threads = threads.clone();
        paint_loop.post(Operation::custom(move |_| threads.lock().push(thread::current().id())));
    }
    paint_loop.stop_and_wait();

    let threads = threads.lock();
    assert_eq!(threads.len(), 20);
    assert!(threads.iter().all(|id| *id == threads[0]));
}

#[test]
fn restart_begins_with_default_state() {
    let (paint_loop, rx) = started();
    paint_loop.post_all([Operation::green(), Operation::AddFigure { x: 0.5, y: 0.5 }]);
    paint_loop.stop_and_wait();

    paint_loop.start().unwrap();
    paint_loop.post(Operation::RequestUpdate);
    let frame = rx.recv_timeout(WAIT).expect("frame after restart");
    assert!(frame == expected_frame(paint_loop.config().size, &[]));

    paint_loop.stop_and_wait();
}

#[test]
fn posts_while_stopped_apply_after_start() {
    let (paint_loop, rx) = capture_loop(LoopConfig::default());
    paint_loop.post_all([Operation::white(), Operation::RequestUpdate]);
    assert_eq!(paint_loop.pending(), 2);
    assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

    paint_loop.start().unwrap();
    let frame = rx.recv_timeout(WAIT).expect("buffered frame");
    assert_eq!(at(&frame, 0, 0), Color::WHITE);

    paint_loop.stop_and_wait();
}

#[test]
fn invalid_size_fails_to_start() {
    let config = LoopConfig {
        size: Size::new(0, 800),
        ..LoopConfig::default()
    };
    let (paint_loop, _rx) = capture_loop(config);
    assert!(paint_loop.start().is_err());
    assert_eq!(paint_loop.phase(), Phase::Stopped);
    paint_loop.stop_and_wait();
}

#[test]
fn drop_drains_running_loop() {
    let (paint_loop, rx) = started();
    paint_loop.post_all([Operation::green(), Operation::RequestUpdate]);
    drop(paint_loop);

    let frame = rx.try_recv().expect("frame published before drop returned");
    assert_eq!(at(&frame, 0, 0), Color::GREEN);
}

// ── producers ─────────────────────────────────────────────────────────────

#[test]
fn concurrent_producers_keep_their_order() {
    let config = LoopConfig {
        queue_capacity: 4,
        ..LoopConfig::default()
    };
    let (paint_loop, _rx) = capture_loop(config);
    paint_loop.start().unwrap();
    let paint_loop = Arc::new(paint_loop);
    let log = Arc::new(Mutex::new(Vec::new()));

    let producers: Vec<_> = (0..4usize)
        .map(|p| {
            let paint_loop = paint_loop.clone();
            let log = log.clone();
            thread::spawn(move || {
                for i in 0..25usize {
                    let log = log.clone();
                    paint_loop.post(Operation::custom(move |_| log.lock().push((p, i))));
                }
            })
        })
        .collect();
    for p in producers {
        p.join().unwrap();
    }
    paint_loop.stop_and_wait();

    let log = log.lock();
    assert_eq!(log.len(), 100);
    for p in 0..4 {
        let order: Vec<usize> = log.iter().filter(|(q, _)| *q == p).map(|(_, i)| *i).collect();
        assert_eq!(order, (0..25).collect::<Vec<_>>());
    }
}
