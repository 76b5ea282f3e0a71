//! Thread safety tests.
//!
//! 1. Compile-time Send + Sync verification for the shared types
//! 2. The task state store's atomicity guarantee under contention
//! 3. Render thread vs. mutator thread over one live Progress

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use weft::prelude::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_primitives_are_send_sync() {
    assert_send_sync::<Segment>();
    assert_send_sync::<Style>();
    assert_send_sync::<Attributes>();
    assert_send_sync::<Color>();
    assert_send_sync::<Measurement>();
    assert_send_sync::<RenderContext>();
    assert_send_sync::<Text>();
}

#[test]
fn test_widgets_are_send_sync() {
    assert_send_sync::<Table>();
    assert_send_sync::<Grid>();
    assert_send_sync::<Progress>();
    assert_send_sync::<ProgressTask>();
    assert_send_sync::<TaskState>();
    assert_send_sync::<SpinnerColumn>();
    assert_send_sync::<Spinner>();
    assert_send_sync::<RenderLoop>();
}

#[test]
fn test_concurrent_state_updates_count_exactly() {
    // K concurrent increments must produce exactly K: update is one
    // critical section, so no read-modify-write interleaving loses one.
    let state = Arc::new(TaskState::new());
    let threads = 16;
    let per_thread = 250;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for _ in 0..per_thread {
                    state.update::<i64>("hits", |v| v + 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(state.get::<i64>("hits"), i64::from(threads * per_thread));
}

#[test]
fn test_distinct_keys_do_not_interfere() {
    let state = Arc::new(TaskState::new());

    let writers: Vec<_> = (0..4)
        .map(|idx: i64| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                let key = format!("key{idx}");
                for _ in 0..100 {
                    state.update::<i64>(&key, |v| v + 1);
                }
            })
        })
        .collect();
    for handle in writers {
        handle.join().unwrap();
    }

    for idx in 0..4 {
        assert_eq!(state.get::<i64>(&format!("key{idx}")), 100);
    }
}

#[test]
fn test_two_tasks_never_share_state() {
    let progress = Progress::with_columns(vec![]);
    let a = progress.add_task("a");
    let b = progress.add_task("b");

    a.state().update::<i64>("counter", |v| v + 7);
    assert_eq!(a.state().get::<i64>("counter"), 7);
    assert_eq!(b.state().get::<i64>("counter"), 0);
}

#[test]
fn test_render_thread_against_mutators() {
    // One thread renders repeatedly while several threads advance tasks
    // and hammer the same spinner keys. Nothing may panic or deadlock,
    // and already-applied mutations must be visible by the next pass.
    let progress = Arc::new(Progress::new());
    let tasks: Vec<_> = (0..4)
        .map(|idx| progress.add_task_with_total(format!("task {idx}"), 1000.0))
        .collect();

    let render_progress = Arc::clone(&progress);
    let renderer = thread::spawn(move || {
        let ctx = RenderContext::new(60);
        for _ in 0..200 {
            let _ = render_progress.render(&ctx, 60);
        }
    });

    let mutators: Vec<_> = tasks
        .iter()
        .map(|task| {
            let task = Arc::clone(task);
            thread::spawn(move || {
                for step in 0..200 {
                    task.advance(1.0);
                    task.state().update::<i64>("spinner.index", |v| v + 1);
                    if step % 50 == 0 {
                        task.set_description(format!("step {step}"));
                    }
                }
            })
        })
        .collect();

    for handle in mutators {
        handle.join().unwrap();
    }
    renderer.join().unwrap();

    for task in &tasks {
        let snapshot = task.snapshot();
        assert!((snapshot.completed - 200.0).abs() < f64::EPSILON);
    }

    // A fresh render after all mutations sees the final state.
    let ctx = RenderContext::new(60);
    let output = weft::segment::segments_to_plain(&progress.render(&ctx, 60));
    assert!(output.contains("step 150"));
}

#[test]
fn test_stop_between_frames_leaves_state_consistent() {
    let progress = Arc::new(Progress::new());
    let task = progress.add_task_with_total("steady", 10.0);

    struct NullSink;
    impl FrameSink for NullSink {
        fn write_frame(
            &mut self,
            _context: &RenderContext,
            _segments: &[Segment],
        ) -> std::io::Result<()> {
            Ok(())
        }
    }

    let render_loop = RenderLoop::new(
        Box::new(Arc::clone(&progress)),
        Box::new(NullSink),
        RenderConfig::builder()
            .refresh_per_second(500.0)
            .width_override(40)
            .build()
            .unwrap(),
    );

    render_loop.start();
    thread::sleep(Duration::from_millis(20));
    render_loop.stop();

    // The store is still usable after the loop is gone.
    task.advance(10.0);
    task.state().update::<i64>("post", |v| v + 1);
    assert!(task.is_finished());
    assert_eq!(task.state().get::<i64>("post"), 1);
}
