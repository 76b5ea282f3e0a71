//! Progress rendering: tasks, columns, and the live progress widget.
//!
//! A [`Progress`] owns a set of long-lived tasks and a list of columns.
//! Every frame it renders one grid row per task by asking each column for
//! a cell given the task's snapshot and the time since the last frame.
//! Columns themselves stay stateless across frames; anything they need to
//! remember (spinner accumulators, frame indices) lives in the task's
//! [`TaskState`] store, which is safe against the application threads that
//! advance the tasks concurrently.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use crate::cells::cell_len;
use crate::context::RenderContext;
use crate::measure::Measurement;
use crate::segment::Segment;
use crate::spinner::{Spinner, known};
use crate::state::TaskState;
use crate::style::{Color, Style};
use crate::sync::{lock_recover, read_recover, write_recover};
use crate::text::{Alignment, Text};

use super::grid::{Grid, GridColumn};
use super::{BoxedRenderable, Renderable};

const ACCUMULATED: &str = "spinner.accumulated";
const INDEX: &str = "spinner.index";

/// A single tracked unit of work.
///
/// Application threads mutate it through the locked setters while the
/// render thread reads [`TaskSnapshot`]s; the animation state store rides
/// along and is shared by every column rendering this task.
#[derive(Debug)]
pub struct ProgressTask {
    id: u64,
    data: Mutex<TaskData>,
    state: Arc<TaskState>,
}

#[derive(Debug)]
struct TaskData {
    description: String,
    completed: f64,
    total: Option<f64>,
    started_at: Option<Instant>,
    finished: bool,
}

impl ProgressTask {
    fn new(id: u64, description: String, total: Option<f64>) -> Self {
        Self {
            id,
            data: Mutex::new(TaskData {
                description,
                completed: 0.0,
                total,
                started_at: None,
                finished: false,
            }),
            state: Arc::new(TaskState::new()),
        }
    }

    /// Unique id within the owning [`Progress`].
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Mark the task started. Idempotent.
    pub fn start(&self) {
        let mut data = lock_recover(&self.data);
        if data.started_at.is_none() {
            data.started_at = Some(Instant::now());
        }
    }

    /// Replace the description.
    pub fn set_description(&self, description: impl Into<String>) {
        lock_recover(&self.data).description = description.into();
    }

    /// Advance completion by `amount`.
    pub fn advance(&self, amount: f64) {
        let mut data = lock_recover(&self.data);
        data.completed += amount;
    }

    /// Set absolute completion.
    pub fn set_completed(&self, completed: f64) {
        lock_recover(&self.data).completed = completed;
    }

    /// Set or clear the total.
    pub fn set_total(&self, total: Option<f64>) {
        lock_recover(&self.data).total = total;
    }

    /// Mark the task finished regardless of completion.
    pub fn finish(&self) {
        lock_recover(&self.data).finished = true;
    }

    /// Whether the task has started.
    #[must_use]
    pub fn is_started(&self) -> bool {
        lock_recover(&self.data).started_at.is_some()
    }

    /// Whether the task has finished, explicitly or by reaching its total.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        let data = lock_recover(&self.data);
        data.finished || data.total.is_some_and(|total| data.completed >= total)
    }

    /// The animation state store for this task.
    #[must_use]
    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Capture a consistent view of the task for one render frame.
    #[must_use]
    pub fn snapshot(&self) -> TaskSnapshot {
        let data = lock_recover(&self.data);
        TaskSnapshot {
            id: self.id,
            description: data.description.clone(),
            completed: data.completed,
            total: data.total,
            started: data.started_at.is_some(),
            finished: data.finished
                || data.total.is_some_and(|total| data.completed >= total),
            elapsed: data.started_at.map(|at| at.elapsed()),
            state: Arc::clone(&self.state),
        }
    }
}

/// A read-only view of one task, captured once per frame.
#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    /// Task id.
    pub id: u64,
    /// Current description.
    pub description: String,
    /// Work completed so far.
    pub completed: f64,
    /// Total work, if known.
    pub total: Option<f64>,
    /// The task has started.
    pub started: bool,
    /// The task has finished.
    pub finished: bool,
    /// Time since the task started.
    pub elapsed: Option<Duration>,
    state: Arc<TaskState>,
}

impl TaskSnapshot {
    /// The task's animation state store (the live one, not a copy).
    #[must_use]
    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Completion as a percentage, clamped to `0..=100`. Tasks without a
    /// total report zero.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        match self.total {
            Some(total) if total > 0.0 => (self.completed / total * 100.0).clamp(0.0, 100.0),
            _ => 0.0,
        }
    }
}

/// One column of a progress display.
///
/// A column is a renderable factory: given a task snapshot and the time
/// since the last frame it produces the cell for that task's row. It also
/// tells the layout engine whether it needs a fixed width and whether its
/// content may wrap.
pub trait ProgressColumn: Send + Sync {
    /// Produce the cell renderable for one task.
    fn render(
        &self,
        context: &RenderContext,
        task: &TaskSnapshot,
        delta: Duration,
    ) -> BoxedRenderable;

    /// Fixed column width, or `None` for automatic sizing.
    fn column_width(&self, context: &RenderContext) -> Option<usize> {
        let _ = context;
        None
    }

    /// Whether the column forbids wrapping.
    fn no_wrap(&self) -> bool {
        false
    }
}

struct SpinnerShared {
    spinner: Arc<Spinner>,
    completed_text: String,
    max_width: Option<usize>,
}

/// An animated spinner cell.
///
/// While a task runs, the spinner accumulates frame delta time in the
/// task's state store and advances one frame each time the spinner's
/// interval elapses; the frame index grows monotonically and wraps via
/// modulo. Before the task starts and after it finishes the column shows
/// the completed text and leaves the state store untouched.
pub struct SpinnerColumn {
    shared: Mutex<SpinnerShared>,
    style: Style,
    completed_style: Style,
}

impl Default for SpinnerColumn {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinnerColumn {
    /// Create a spinner column with the default spinner.
    #[must_use]
    pub fn new() -> Self {
        Self::with_spinner(known::default())
    }

    /// Create a spinner column with an explicit spinner.
    #[must_use]
    pub fn with_spinner(spinner: Arc<Spinner>) -> Self {
        Self {
            shared: Mutex::new(SpinnerShared {
                spinner,
                completed_text: " ".to_string(),
                max_width: None,
            }),
            style: Style::new().color(Color::Yellow),
            completed_style: Style::new(),
        }
    }

    /// Set the spinner style.
    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the completed-text style.
    #[must_use]
    pub const fn completed_style(mut self, style: Style) -> Self {
        self.completed_style = style;
        self
    }

    /// Swap the spinner. Invalidates the cached column width.
    pub fn set_spinner(&self, spinner: Arc<Spinner>) {
        let mut shared = lock_recover(&self.shared);
        shared.spinner = spinner;
        shared.max_width = None;
    }

    /// Set the text shown once a task completes. Invalidates the cached
    /// column width.
    pub fn set_completed_text(&self, text: impl Into<String>) {
        let mut shared = lock_recover(&self.shared);
        shared.completed_text = text.into();
        shared.max_width = None;
    }

    /// The spinner to actually draw in this context: the configured one,
    /// or the ASCII fallback when the terminal cannot show its glyphs.
    /// A per-call decision; the configured spinner is never mutated.
    fn effective_spinner(context: &RenderContext, configured: &Arc<Spinner>) -> Arc<Spinner> {
        if context.ascii_only() && configured.is_unicode() {
            log::trace!("substituting ascii spinner on non-unicode terminal");
            Arc::clone(&known::ASCII)
        } else {
            Arc::clone(configured)
        }
    }
}

impl ProgressColumn for SpinnerColumn {
    fn render(
        &self,
        context: &RenderContext,
        task: &TaskSnapshot,
        delta: Duration,
    ) -> BoxedRenderable {
        let (configured, completed_text) = {
            let shared = lock_recover(&self.shared);
            (Arc::clone(&shared.spinner), shared.completed_text.clone())
        };

        if !task.started || task.finished {
            return Box::new(
                Text::styled(completed_text, self.completed_style).no_wrap(),
            );
        }

        let spinner = Self::effective_spinner(context, &configured);
        // Integer microseconds keep frame selection exact: the visible
        // index is always floor(total elapsed / interval), no matter how
        // the elapsed time was split across render calls.
        let interval_us = i64::try_from(spinner.interval().as_micros())
            .unwrap_or(i64::MAX)
            .max(1);
        let delta_us = i64::try_from(delta.as_micros()).unwrap_or(i64::MAX);

        let accumulated = task
            .state()
            .update::<i64>(ACCUMULATED, |acc| acc.saturating_add(delta_us));
        if accumulated >= interval_us {
            let steps = accumulated / interval_us;
            task.state()
                .update::<i64>(ACCUMULATED, |acc| acc - steps * interval_us);
            task.state().update::<i64>(INDEX, |index| index + steps);
        }

        let index = task.state().get::<i64>(INDEX);
        let frame = spinner.frame(u64::try_from(index).unwrap_or(0));
        Box::new(Text::styled(frame, self.style).no_wrap())
    }

    fn column_width(&self, context: &RenderContext) -> Option<usize> {
        let mut shared = lock_recover(&self.shared);
        if shared.max_width.is_none() {
            let spinner = Self::effective_spinner(context, &shared.spinner);
            let width = spinner
                .max_frame_width()
                .max(cell_len(&shared.completed_text));
            shared.max_width = Some(width);
        }
        shared.max_width
    }

    fn no_wrap(&self) -> bool {
        true
    }
}

/// The task's description, sized automatically.
#[derive(Default)]
pub struct DescriptionColumn {
    style: Style,
}

impl DescriptionColumn {
    /// Create a description column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text style.
    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl ProgressColumn for DescriptionColumn {
    fn render(
        &self,
        _context: &RenderContext,
        task: &TaskSnapshot,
        _delta: Duration,
    ) -> BoxedRenderable {
        Box::new(Text::styled(task.description.clone(), self.style))
    }
}

/// Completion percentage, right-aligned in four cells.
#[derive(Default)]
pub struct PercentageColumn {
    style: Style,
}

impl PercentageColumn {
    /// Create a percentage column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text style.
    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl ProgressColumn for PercentageColumn {
    fn render(
        &self,
        _context: &RenderContext,
        task: &TaskSnapshot,
        _delta: Duration,
    ) -> BoxedRenderable {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = task.percentage() as u32;
        Box::new(
            Text::styled(format!("{percent:>3}%"), self.style)
                .alignment(Alignment::Right)
                .no_wrap(),
        )
    }

    fn column_width(&self, _context: &RenderContext) -> Option<usize> {
        Some(4)
    }

    fn no_wrap(&self) -> bool {
        true
    }
}

/// Elapsed time since the task started, as `m:ss` or `h:mm:ss`.
#[derive(Default)]
pub struct ElapsedColumn {
    style: Style,
}

impl ElapsedColumn {
    /// Create an elapsed-time column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text style.
    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

fn format_elapsed(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    if total_secs < 3600 {
        format!("{}:{:02}", total_secs / 60, total_secs % 60)
    } else {
        format!(
            "{}:{:02}:{:02}",
            total_secs / 3600,
            (total_secs % 3600) / 60,
            total_secs % 60
        )
    }
}

impl ProgressColumn for ElapsedColumn {
    fn render(
        &self,
        _context: &RenderContext,
        task: &TaskSnapshot,
        _delta: Duration,
    ) -> BoxedRenderable {
        let text = task.elapsed.map_or_else(|| "-:--".to_string(), format_elapsed);
        Box::new(
            Text::styled(text, self.style)
                .alignment(Alignment::Right)
                .no_wrap(),
        )
    }

    fn no_wrap(&self) -> bool {
        true
    }
}

/// A live progress display: one grid row per task.
///
/// Implements [`Renderable`]; the render driver treats it like any other
/// widget. `measure` stays pure by reporting only the fixed column widths;
/// `render` computes the frame delta once and builds the grid fresh.
pub struct Progress {
    columns: Vec<Box<dyn ProgressColumn>>,
    tasks: RwLock<Vec<Arc<ProgressTask>>>,
    next_id: AtomicU64,
    last_tick: Mutex<Option<Instant>>,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a progress display with the default column set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_columns(vec![
            Box::new(SpinnerColumn::new()),
            Box::new(DescriptionColumn::new()),
            Box::new(PercentageColumn::new()),
            Box::new(ElapsedColumn::new().style(Style::new().dim())),
        ])
    }

    /// Create a progress display with explicit columns.
    #[must_use]
    pub fn with_columns(columns: Vec<Box<dyn ProgressColumn>>) -> Self {
        Self {
            columns,
            tasks: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
            last_tick: Mutex::new(None),
        }
    }

    /// Add a started task with no known total.
    pub fn add_task(&self, description: impl Into<String>) -> Arc<ProgressTask> {
        self.insert_task(description.into(), None)
    }

    /// Add a started task with a known total.
    pub fn add_task_with_total(
        &self,
        description: impl Into<String>,
        total: f64,
    ) -> Arc<ProgressTask> {
        self.insert_task(description.into(), Some(total))
    }

    fn insert_task(&self, description: String, total: Option<f64>) -> Arc<ProgressTask> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let task = Arc::new(ProgressTask::new(id, description, total));
        task.start();
        write_recover(&self.tasks).push(Arc::clone(&task));
        task
    }

    /// Number of tracked tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        read_recover(&self.tasks).len()
    }

    /// Time since the previous frame; zero on the first.
    fn tick_delta(&self) -> Duration {
        let mut last = lock_recover(&self.last_tick);
        let now = Instant::now();
        let delta = last.map_or(Duration::ZERO, |at| now.duration_since(at));
        *last = Some(now);
        delta
    }

    fn build_grid(&self, context: &RenderContext, delta: Duration) -> Grid {
        let tasks: Vec<Arc<ProgressTask>> = read_recover(&self.tasks).clone();

        let mut grid = Grid::new();
        for column in &self.columns {
            let mut grid_column = GridColumn::new();
            if let Some(width) = column.column_width(context) {
                grid_column = grid_column.width(width);
            }
            if column.no_wrap() {
                grid_column = grid_column.no_wrap();
            }
            grid.add_column(grid_column);
        }

        for task in tasks {
            let snapshot = task.snapshot();
            let cells: Vec<BoxedRenderable> = self
                .columns
                .iter()
                .map(|column| column.render(context, &snapshot, delta))
                .collect();
            grid.add_row(cells);
        }

        grid
    }
}

impl Renderable for Progress {
    fn measure(&self, context: &RenderContext, max_width: usize) -> Measurement {
        if max_width == 0 || self.columns.is_empty() {
            return Measurement::zero();
        }

        // Pure by construction: only the fixed column widths are summed,
        // no cells are built and no animation state moves.
        let fixed: usize = self
            .columns
            .iter()
            .filter_map(|column| column.column_width(context))
            .sum();
        let separators = self.columns.len().saturating_sub(1);
        Measurement::new(fixed + separators, max_width).with_maximum(max_width)
    }

    fn render(&self, context: &RenderContext, width: usize) -> Vec<Segment> {
        if width == 0 || self.columns.is_empty() || self.task_count() == 0 {
            return Vec::new();
        }

        let delta = self.tick_delta();
        self.build_grid(context, delta).render(context, width)
    }
}
