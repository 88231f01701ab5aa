//! Per-timezone clocks and their once-a-second render loop.
//!
//! The [`ClockEngine`] owns one [`ClockInstance`] per displayed clock. Each
//! instance runs a timer task that only sends [`ClockTick`] messages; the
//! event loop hands them back to [`ClockEngine::on_tick`], which formats
//! the time and queues the text updates on the render batcher.

mod instance;

#[cfg(test)]
mod tests;

pub use instance::{ClockInstance, ClockKey, ClockSlots, ClockState, ClockTick};

use std::{collections::HashMap, time::Duration};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument};

use crate::{
    config::{Config, DateFormat, TimeFormat},
    formatting::{FormatError, FormatterCache, LocalZone, zone_display_name},
    render::{Mutation, RenderBatcher},
};

/// Interval between two renders of the same clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owns every running clock and the formatter cache they share.
pub struct ClockEngine {
    clocks: HashMap<ClockKey, ClockInstance>,
    cache: FormatterCache,
    local: LocalZone,
    time_format: TimeFormat,
    date_format: DateFormat,
    ticks: UnboundedSender<ClockTick>,
    period: Duration,
}

impl ClockEngine {
    /// Creates an engine whose timers send to `ticks`.
    pub fn new(ticks: UnboundedSender<ClockTick>, local: LocalZone) -> Self {
        Self {
            clocks: HashMap::new(),
            cache: FormatterCache::new(),
            local,
            time_format: TimeFormat::default(),
            date_format: DateFormat::default(),
            ticks,
            period: TICK_PERIOD,
        }
    }

    /// Overrides the tick period.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Stops everything and starts the local clock plus one clock per
    /// configured timezone, in configured order.
    ///
    /// Views of clocks that are no longer configured are unmounted.
    #[instrument(skip_all, fields(timezones = config.additional_timezones.len()))]
    pub fn start_all(&mut self, config: &Config, batcher: &mut RenderBatcher) {
        self.time_format = config.time_format;
        self.date_format = config.date_format;

        for (key, mut clock) in self.clocks.drain() {
            clock.stop();
            let still_configured = match &key {
                ClockKey::Local => true,
                ClockKey::Zone(zone) => config.additional_timezones.contains(zone),
            };
            if !still_configured {
                batcher.enqueue_all(key.unmount());
            }
        }

        self.start_clock(ClockKey::Local, batcher);
        for zone in &config.additional_timezones {
            self.start_clock(ClockKey::Zone(zone.clone()), batcher);
        }

        info!(clocks = self.clocks.len(), "Started clocks");
    }

    /// Restarts every clock after a format change.
    pub fn restart_all(&mut self, config: &Config, batcher: &mut RenderBatcher) {
        debug!(time_format = %config.time_format, date_format = %config.date_format, "Restarting clocks");
        self.start_all(config, batcher);
    }

    /// Sanitises `raw`, appends it to the config and starts its clock.
    ///
    /// Returns the stored identifier, or `None` if it was empty after
    /// sanitising or already present.
    pub fn add_timezone(
        &mut self,
        config: &mut Config,
        raw: &str,
        batcher: &mut RenderBatcher,
    ) -> Option<String> {
        let zone = config.push_timezone(raw)?;
        self.start_clock(ClockKey::Zone(zone.clone()), batcher);
        info!(%zone, "Added timezone");
        Some(zone)
    }

    /// Removes `zone` from the config, stops its clock and unmounts its view.
    ///
    /// Returns `false` and changes nothing if the zone is not configured.
    pub fn remove_timezone(
        &mut self,
        config: &mut Config,
        zone: &str,
        batcher: &mut RenderBatcher,
    ) -> bool {
        if !config.remove_timezone(zone) {
            return false;
        }

        let key = ClockKey::Zone(zone.to_string());
        self.stop(&key);
        self.clocks.remove(&key);
        batcher.enqueue_all(key.unmount());

        info!(zone, "Removed timezone");
        true
    }

    /// Renders the clock named by a timer tick.
    ///
    /// Ticks for clocks that are stopped or gone are ignored.
    pub fn on_tick(&mut self, tick: &ClockTick, batcher: &mut RenderBatcher) {
        if !self.is_running(&tick.key) {
            debug!(clock = %tick.key, "Ignoring tick for inactive clock");
            return;
        }
        self.render_logged(&tick.key, Utc::now(), batcher);
    }

    /// Formats `key` at `now` and queues its three slot updates.
    ///
    /// # Errors
    /// Returns `FormatError::UnknownTimezone` if the zone cannot be resolved.
    /// Nothing is queued in that case.
    pub fn render(
        &mut self,
        key: &ClockKey,
        now: DateTime<Utc>,
        batcher: &mut RenderBatcher,
    ) -> Result<(), FormatError> {
        let formatter = self.cache.get_or_create(key.zone(), self.time_format)?;
        let time = formatter.format_time(now);
        let date = formatter.format_date(now, self.date_format);
        let label = match key {
            ClockKey::Local => self.local.label(),
            ClockKey::Zone(zone) => zone_display_name(zone),
        };

        let slots = key.slots();
        batcher.enqueue_all([
            Mutation::text(slots.time, time),
            Mutation::text(slots.date, date),
            Mutation::text(slots.timezone, label),
        ]);
        Ok(())
    }

    /// Renders every running clock from a single instant.
    pub fn render_all(&mut self, now: DateTime<Utc>, batcher: &mut RenderBatcher) {
        let keys: Vec<ClockKey> = self.clocks.keys().cloned().collect();
        for key in &keys {
            self.render_logged(key, now, batcher);
        }
    }

    /// Stops the timer of `key`. Idempotent; returns whether it was running.
    pub fn stop(&mut self, key: &ClockKey) -> bool {
        match self.clocks.get_mut(key) {
            Some(clock) if clock.is_running() => {
                clock.stop();
                true
            }
            _ => false,
        }
    }

    /// Stops every clock and clears the formatter cache.
    pub fn shutdown(&mut self) {
        for clock in self.clocks.values_mut() {
            clock.stop();
        }
        self.clocks.clear();
        self.cache.clear();
        info!("Clock engine shut down");
    }

    /// Whether `key` has a running timer.
    pub fn is_running(&self, key: &ClockKey) -> bool {
        self.clocks.get(key).is_some_and(ClockInstance::is_running)
    }

    /// Keys of every running clock, in no particular order.
    pub fn active_keys(&self) -> Vec<&ClockKey> {
        self.clocks
            .values()
            .filter(|clock| clock.is_running())
            .map(ClockInstance::key)
            .collect()
    }

    /// The shared formatter cache.
    pub fn cache(&self) -> &FormatterCache {
        &self.cache
    }

    /// The detected local timezone.
    pub fn local_zone(&self) -> &LocalZone {
        &self.local
    }

    fn start_clock(&mut self, key: ClockKey, batcher: &mut RenderBatcher) {
        batcher.enqueue_all(key.mount());
        self.render_logged(&key, Utc::now(), batcher);

        let clock = self
            .clocks
            .entry(key.clone())
            .or_insert_with(|| ClockInstance::new(key));
        clock.start(self.ticks.clone(), self.period);
    }

    fn render_logged(&mut self, key: &ClockKey, now: DateTime<Utc>, batcher: &mut RenderBatcher) {
        if let Err(e) = self.render(key, now, batcher) {
            debug!(clock = %key, error = %e, "Skipping clock render");
        }
    }
}
