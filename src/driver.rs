//! The render driver loop.
//!
//! One thread owns the pipeline: at a fixed cadence it snapshots the
//! terminal, measures the root renderable, renders it at the negotiated
//! width, and hands the segments to a sink. Application threads never
//! render; they mutate task data and let the next frame pick it up. The
//! loop stops cooperatively between frames.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::config::RenderConfig;
use crate::context::RenderContext;
use crate::renderables::Renderable;
use crate::segment::Segment;
use crate::sync::lock_recover;

/// Receives each frame's segments in emission order.
///
/// Line boundaries arrive as explicit [`Segment::line`] markers; how the
/// segments become bytes (ANSI, plain text, capture) is the sink's choice.
pub trait FrameSink: Send {
    /// Consume one rendered frame.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from the underlying output.
    fn write_frame(&mut self, context: &RenderContext, segments: &[Segment]) -> io::Result<()>;
}

/// A sink that writes plain text, dropping styles and rendering line
/// break markers as newlines.
pub struct PlainSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> PlainSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> FrameSink for PlainSink<W> {
    fn write_frame(&mut self, _context: &RenderContext, segments: &[Segment]) -> io::Result<()> {
        for segment in segments {
            if segment.is_line_break() {
                self.writer.write_all(b"\n")?;
            } else {
                self.writer.write_all(segment.text.as_bytes())?;
            }
        }
        self.writer.flush()
    }
}

struct LoopInner {
    config: RenderConfig,
    root: Box<dyn Renderable + Send + Sync>,
    sink: Mutex<Box<dyn FrameSink>>,
    stop: AtomicBool,
    started: AtomicBool,
}

impl LoopInner {
    fn context(&self) -> RenderContext {
        let mut context = if self.config.width_override().is_some() {
            RenderContext::new(0)
        } else {
            RenderContext::detect()
        };
        if let Some(width) = self.config.width_override() {
            context = context.with_max_width(width);
        }
        if self.config.force_ascii() {
            context.unicode = false;
        }
        context
    }

    fn render_frame(&self) -> io::Result<()> {
        let context = self.context();
        let measurement = self.root.measure(&context, context.max_width);
        let width = measurement.maximum.min(context.max_width);
        let segments = self.root.render(&context, width);
        log::trace!("frame: width={} segments={}", width, segments.len());
        lock_recover(&self.sink).write_frame(&context, &segments)
    }
}

/// A timer-driven measure+render loop over one root renderable.
pub struct RenderLoop {
    inner: Arc<LoopInner>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RenderLoop {
    /// Create a loop over `root`, writing frames to `sink`.
    #[must_use]
    pub fn new(
        root: Box<dyn Renderable + Send + Sync>,
        sink: Box<dyn FrameSink>,
        config: RenderConfig,
    ) -> Self {
        Self {
            inner: Arc::new(LoopInner {
                config,
                root,
                sink: Mutex::new(sink),
                stop: AtomicBool::new(false),
                started: AtomicBool::new(false),
            }),
            handle: Mutex::new(None),
        }
    }

    /// Render a single frame immediately on the calling thread.
    ///
    /// # Errors
    ///
    /// Propagates sink I/O failures.
    pub fn render_once(&self) -> io::Result<()> {
        self.inner.render_frame()
    }

    /// Start the background render thread. Idempotent.
    pub fn start(&self) {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return;
        }
        self.inner.stop.store(false, Ordering::SeqCst);

        let inner = Arc::clone(&self.inner);
        let interval = inner.config.frame_interval();
        log::debug!("render loop starting at {:?} per frame", interval);

        let handle = thread::spawn(move || {
            while !inner.stop.load(Ordering::Relaxed) {
                if let Err(error) = inner.render_frame() {
                    log::debug!("render loop stopping on sink error: {error}");
                    break;
                }
                thread::sleep(interval);
            }
        });

        *lock_recover(&self.handle) = Some(handle);
    }

    /// Stop the render thread and wait for the in-flight frame to finish.
    /// Idempotent; safe to call from any thread except the render thread.
    pub fn stop(&self) {
        if !self.inner.started.swap(false, Ordering::SeqCst) {
            return;
        }
        self.inner.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = lock_recover(&self.handle).take() {
            let _ = handle.join();
        }
        log::debug!("render loop stopped");
    }

    /// Whether the background thread is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.started.load(Ordering::SeqCst)
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
