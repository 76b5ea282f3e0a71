//! Progress rendering demo.
//!
//! Runs a few tasks to completion while the render loop draws one frame
//! per tick. Output is plain text (one frame appended after another);
//! pipe-friendly on purpose.
//!
//! Run with: cargo run --bin progress_demo

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use weft::prelude::*;

fn main() {
    let progress = Arc::new(Progress::new());
    let download = progress.add_task_with_total("downloading", 100.0);
    let index = progress.add_task_with_total("indexing", 40.0);

    let config = RenderConfig::builder()
        .refresh_per_second(8.0)
        .build()
        .expect("static config is valid");

    let render_loop = RenderLoop::new(
        Box::new(Arc::clone(&progress)),
        Box::new(PlainSink::new(std::io::stdout())),
        config,
    );
    render_loop.start();

    for step in 0..20 {
        download.advance(5.0);
        if step % 2 == 0 {
            index.advance(4.0);
        }
        thread::sleep(Duration::from_millis(60));
    }
    index.set_description("indexing (done)");

    thread::sleep(Duration::from_millis(200));
    render_loop.stop();
    render_loop.render_once().expect("final frame");
}
