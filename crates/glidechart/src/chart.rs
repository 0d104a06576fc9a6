//! The frame-driven chart.
//!
//! A [`Chart`] owns the snapshot queue, the immediate-mode context and the
//! frame clock. The host calls [`Chart::tick`] once per display refresh
//! with a timestamp and a [`Surface`]; the chart advances the blend, resolves
//! a [`Frame`] and hands it to the render callback.

use crossbeam_channel::{Receiver, Sender};
use glam::Vec2;
use glidechart_core::profiling::profile_function;

use crate::config::ChartConfig;
use crate::context::ImContext;
use crate::error::ChartError;
use crate::feed::{SnapshotFeed, Waker, WakerSlot};
use crate::frame::{FrameClock, FrameDelta};
use crate::input::PointerEvent;
use crate::queue::SnapshotQueue;
use crate::series::{Frame, Snapshot};
use crate::surface::{CursorIcon, Surface};
use crate::widgets::{ChartUi, TooltipStyle, draw_tooltip};

type RenderFn = Box<dyn FnMut(&mut ChartUi<'_>, &Frame<'_>)>;

/// What a tick did and what the host should do next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    /// The render callback ran (the queue was not empty).
    pub rendered: bool,
    /// Another frame is owed: blending or animation is in progress, or
    /// dirty tracking is off.
    pub repaint: bool,
    /// Cursor to show, when it changed this tick.
    pub cursor: Option<CursorIcon>,
}

pub struct Chart {
    config: ChartConfig,
    queue: SnapshotQueue,
    ctx: ImContext,
    clock: FrameClock,
    render: Option<RenderFn>,
    inbox: Receiver<Snapshot>,
    outbox: Sender<Snapshot>,
    waker: WakerSlot,
    tooltip_style: TooltipStyle,
    dirty: bool,
    last_size: Option<Vec2>,
}

impl Chart {
    pub fn new(config: ChartConfig) -> Self {
        let (outbox, inbox) = crossbeam_channel::unbounded();
        tracing::debug!(series = config.series.len(), "creating chart");
        Self {
            queue: SnapshotQueue::new(config.series.clone(), config.blend.clone()),
            clock: FrameClock::new(config.timing.clone()),
            ctx: ImContext::new(),
            render: None,
            inbox,
            outbox,
            waker: WakerSlot::default(),
            tooltip_style: TooltipStyle::default(),
            dirty: true,
            last_size: None,
            config,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn queue(&self) -> &SnapshotQueue {
        &self.queue
    }

    /// The immediate-mode context, e.g. to inspect widget state.
    pub fn context(&self) -> &ImContext {
        &self.ctx
    }

    /// Queue a snapshot from the thread that owns the chart.
    pub fn push(&mut self, snapshot: impl Into<Snapshot>) -> Result<(), ChartError> {
        self.queue.push(snapshot.into())?;
        self.mark_dirty();
        Ok(())
    }

    /// A producer handle that can push from other threads.
    pub fn feed(&self) -> SnapshotFeed {
        SnapshotFeed::new(self.outbox.clone(), self.waker.clone())
    }

    /// Set the callback that draws each frame.
    pub fn on_render<F>(&mut self, render: F)
    where
        F: FnMut(&mut ChartUi<'_>, &Frame<'_>) + 'static,
    {
        self.render = Some(Box::new(render));
        self.mark_dirty();
    }

    /// Called whenever a new frame is needed outside of a tick (a push or a
    /// pointer event). Hosts use it to schedule a repaint.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        let waker: Waker = std::sync::Arc::new(waker);
        self.waker.set(Some(waker));
    }

    pub fn clear_waker(&mut self) {
        self.waker.set(None);
    }

    pub fn set_tooltip_style(&mut self, style: TooltipStyle) {
        self.tooltip_style = style;
    }

    pub fn pointer_event(&mut self, event: PointerEvent) {
        if self.ctx.pointer_mut().on_event(event) {
            self.mark_dirty();
        }
    }

    /// Whether the host should schedule a tick.
    pub fn needs_repaint(&self) -> bool {
        !self.config.dirty_tracking || self.dirty
    }

    fn mark_dirty(&mut self) {
        if !self.dirty {
            self.dirty = true;
            self.waker.wake();
        }
    }

    fn drain_feed(&mut self) {
        for snapshot in self.inbox.try_iter() {
            if let Err(err) = self.queue.push(snapshot) {
                tracing::error!(%err, "dropping snapshot from feed");
            }
        }
    }

    /// Run one frame at `timestamp_ms` (any monotonic clock).
    ///
    /// Drains the feed, advances the blend, resolves the frame, clears
    /// `surface` and runs the render callback, then draws the tooltip
    /// requested during rendering. Nothing is drawn while the queue is
    /// empty.
    pub fn tick(
        &mut self,
        timestamp_ms: f64,
        surface: &mut dyn Surface,
    ) -> Result<TickOutcome, ChartError> {
        profile_function!();

        self.drain_feed();
        self.dirty = false;

        let delta = self.clock.tick(timestamp_ms);
        let size = surface.size();
        let resized = self.last_size.replace(size) != Some(size);

        self.ctx.begin_frame(delta.conditioned_ms, size);
        let result = self.render_frame(delta, surface);
        let cursor = self.ctx.end_frame();
        let blending = result?;

        let repaint = !self.config.dirty_tracking
            || resized
            || blending == Some(true)
            || self.ctx.is_animating();

        tracing::trace!(
            raw_ms = delta.raw_ms,
            delta_ms = delta.conditioned_ms,
            queued = self.queue.len(),
            repaint,
            "tick"
        );

        Ok(TickOutcome {
            rendered: blending.is_some(),
            repaint,
            cursor,
        })
    }

    /// Returns `None` when there was nothing to render, otherwise whether
    /// the queue is still blending.
    fn render_frame(
        &mut self,
        delta: FrameDelta,
        surface: &mut dyn Surface,
    ) -> Result<Option<bool>, ChartError> {
        if self.queue.is_empty() {
            return Ok(None);
        }

        // Suspended hosts deliver one huge delta; pass it through unsmoothed
        // so the queue collapses to the newest snapshot.
        let queue_delta = if delta.raw_ms > self.config.blend.suspend_threshold_ms {
            delta.raw_ms
        } else {
            delta.conditioned_ms
        };
        let blending = self.queue.advance(queue_delta);

        let frame = self.queue.resolve()?;
        surface.clear();
        if let Some(render) = self.render.as_mut() {
            let mut ui = ChartUi::new(&mut self.ctx, &mut *surface, self.config.text);
            render(&mut ui, &frame);
        }

        if let Some(tooltip) = self.ctx.take_tooltip() {
            draw_tooltip(surface, &tooltip, &self.tooltip_style);
        }

        Ok(Some(blending))
    }
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("config", &self.config)
            .field("queued", &self.queue.len())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
