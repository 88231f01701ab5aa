use std::{mem, time::Duration};

use tokio::{sync::mpsc::UnboundedSender, time::Instant};
use tracing::trace;

use super::{Mutation, Surface};

/// Asks the host to call [`RenderBatcher::flush`] at the next frame.
pub trait FrameScheduler: Send {
    /// Requests one flush. Called at most once between two flushes.
    fn request_frame(&mut self);
}

/// Collapses all mutations queued within one frame into a single flush.
///
/// Applying a flushed batch is observably identical to applying each
/// mutation immediately in enqueue order.
pub struct RenderBatcher {
    pending: Vec<Mutation>,
    flush_scheduled: bool,
    scheduler: Box<dyn FrameScheduler>,
}

impl RenderBatcher {
    /// Creates a batcher that requests frames from `scheduler`.
    pub fn new(scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            pending: Vec::new(),
            flush_scheduled: false,
            scheduler,
        }
    }

    /// Queues a mutation, requesting a frame if none is pending.
    pub fn enqueue(&mut self, mutation: Mutation) {
        self.pending.push(mutation);

        if !self.flush_scheduled {
            self.flush_scheduled = true;
            self.scheduler.request_frame();
        }
    }

    /// Queues several mutations at once.
    pub fn enqueue_all(&mut self, mutations: impl IntoIterator<Item = Mutation>) {
        for mutation in mutations {
            self.enqueue(mutation);
        }
    }

    /// Applies every queued mutation in order and presents the surface.
    ///
    /// Returns the number of mutations applied.
    pub fn flush(&mut self, surface: &mut dyn Surface) -> usize {
        let batch = mem::take(&mut self.pending);
        self.flush_scheduled = false;

        for mutation in &batch {
            mutation.apply(surface);
        }
        surface.present();

        trace!(mutations = batch.len(), "Flushed render batch");
        batch.len()
    }

    /// Drops every queued mutation without applying it.
    pub fn discard(&mut self) {
        self.pending.clear();
        self.flush_scheduled = false;
    }

    /// Number of queued mutations.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether a flush has been requested and not yet run.
    pub fn is_flush_scheduled(&self) -> bool {
        self.flush_scheduled
    }
}

/// Delay from `elapsed` to the next multiple of `frame`.
pub fn next_frame_delay(elapsed: Duration, frame: Duration) -> Duration {
    let frame_nanos = frame.as_nanos();
    if frame_nanos == 0 {
        return Duration::ZERO;
    }

    let remaining = frame_nanos - elapsed.as_nanos() % frame_nanos;
    Duration::from_nanos(u64::try_from(remaining).unwrap_or(u64::MAX))
}

/// Requests frames by sending `()` on a channel at the next frame boundary.
///
/// Boundaries are multiples of `frame` since the scheduler was created.
pub struct TokioFrameScheduler {
    tx: UnboundedSender<()>,
    origin: Instant,
    frame: Duration,
}

impl TokioFrameScheduler {
    /// Roughly 60 frames per second.
    pub const DEFAULT_FRAME: Duration = Duration::from_micros(16_667);

    /// Creates a scheduler signalling `tx` once per requested frame.
    pub fn new(tx: UnboundedSender<()>, frame: Duration) -> Self {
        Self {
            tx,
            origin: Instant::now(),
            frame,
        }
    }
}

impl FrameScheduler for TokioFrameScheduler {
    fn request_frame(&mut self) {
        let delay = next_frame_delay(self.origin.elapsed(), self.frame);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(());
        });
    }
}
