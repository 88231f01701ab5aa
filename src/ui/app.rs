use std::time::Duration;

use chrono::{Datelike, Local};
use tokio::{
    sync::{
        mpsc::{self, UnboundedReceiver, UnboundedSender},
        oneshot,
    },
    task::JoinHandle,
};
use tracing::{debug, info, instrument};

use crate::{
    clock::{ClockEngine, ClockTick, TICK_PERIOD},
    config_store::ConfigStore,
    formatting::{LocalZone, TimezoneCatalog},
    render::{RenderBatcher, Surface, TokioFrameScheduler},
};

use super::{Effect, SaveOutcome, UiController, UiEvent};

/// Everything needed to start the clock display.
pub struct App {
    store: ConfigStore,
    surface: Box<dyn Surface + Send>,
    local_zone: Option<LocalZone>,
    catalog: Option<TimezoneCatalog>,
    frame: Duration,
    tick_period: Duration,
}

impl App {
    /// Prepares a display that loads from `store` and draws on `surface`.
    pub fn new(store: ConfigStore, surface: impl Surface + Send + 'static) -> Self {
        Self {
            store,
            surface: Box::new(surface),
            local_zone: None,
            catalog: None,
            frame: TokioFrameScheduler::DEFAULT_FRAME,
            tick_period: TICK_PERIOD,
        }
    }

    /// Uses `zone` instead of detecting the system timezone.
    pub fn with_local_zone(mut self, zone: LocalZone) -> Self {
        self.local_zone = Some(zone);
        self
    }

    /// Offers `catalog` in the timezone picker instead of the full database.
    pub fn with_catalog(mut self, catalog: TimezoneCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Overrides the frame length of the render batcher.
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    /// Overrides the clock tick period.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Loads the settings, mounts the page and spawns the event loop.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip_all)]
    pub async fn start(self) -> AppHandle {
        let config = self.store.load().await;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        let (saves_tx, saves_rx) = mpsc::unbounded_channel();
        let (expiries_tx, expiries_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let engine = ClockEngine::new(ticks_tx, self.local_zone.unwrap_or_else(LocalZone::detect))
            .with_period(self.tick_period);
        let batcher = RenderBatcher::new(Box::new(TokioFrameScheduler::new(frames_tx, self.frame)));
        let catalog = self.catalog.unwrap_or_else(TimezoneCatalog::load);

        let mut controller = UiController::new(config, engine, batcher, catalog);
        controller.mount(Local::now().year());

        let event_loop = EventLoop {
            controller,
            surface: self.surface,
            store: self.store,
            saves_tx,
            expiries_tx,
        };
        let channels = Channels {
            events: events_rx,
            ticks: ticks_rx,
            frames: frames_rx,
            saves: saves_rx,
            expiries: expiries_rx,
            shutdown: shutdown_rx,
        };

        let task = tokio::spawn(event_loop.run(channels));
        info!("World clock started");

        AppHandle {
            events: events_tx,
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a running display.
///
/// Dropping the handle stops the event loop as well; [`AppHandle::dispose`]
/// additionally waits for it to finish.
pub struct AppHandle {
    events: UnboundedSender<UiEvent>,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl AppHandle {
    /// Delivers an input event. Returns `false` if the loop has stopped.
    pub fn send(&self, event: UiEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Whether the event loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops every timer and the event loop, then waits for it to exit.
    pub async fn dispose(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            debug!(error = %e, "Event loop ended abnormally");
        }
        info!("World clock disposed");
    }
}

struct Channels {
    events: UnboundedReceiver<UiEvent>,
    ticks: UnboundedReceiver<ClockTick>,
    frames: UnboundedReceiver<()>,
    saves: UnboundedReceiver<SaveOutcome>,
    expiries: UnboundedReceiver<u64>,
    shutdown: oneshot::Receiver<()>,
}

struct EventLoop {
    controller: UiController,
    surface: Box<dyn Surface + Send>,
    store: ConfigStore,
    saves_tx: UnboundedSender<SaveOutcome>,
    expiries_tx: UnboundedSender<u64>,
}

impl EventLoop {
    async fn run(mut self, mut channels: Channels) {
        loop {
            tokio::select! {
                _ = &mut channels.shutdown => break,
                Some(event) = channels.events.recv() => {
                    let effects = self.controller.handle(event, &*self.surface);
                    self.run_effects(effects);
                }
                Some(tick) = channels.ticks.recv() => self.controller.on_tick(&tick),
                Some(()) = channels.frames.recv() => {
                    self.controller.flush(&mut *self.surface);
                }
                Some(outcome) = channels.saves.recv() => {
                    let effects = self.controller.on_save_finished(outcome);
                    self.run_effects(effects);
                }
                Some(generation) = channels.expiries.recv() => {
                    self.controller.on_notification_expired(generation);
                }
                else => break,
            }
        }

        self.controller.shutdown();
        debug!("Event loop stopped");
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Persist { config, kind } => {
                    let store = self.store.clone();
                    let saves_tx = self.saves_tx.clone();
                    tokio::spawn(async move {
                        let result = store.save(&config).await;
                        let _ = saves_tx.send(SaveOutcome { kind, result });
                    });
                }
                Effect::ExpireNotification { generation, after } => {
                    let expiries_tx = self.expiries_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = expiries_tx.send(generation);
                    });
                }
            }
        }
    }
}
