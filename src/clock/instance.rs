use std::{fmt, time::Duration};

use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, trace};

use crate::{
    config::validation::sanitize_element_key,
    formatting::zone_display_name,
    render::{Mutation, layout},
};

/// Identity of one displayed clock.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClockKey {
    /// The primary clock in the system timezone
    Local,
    /// An additional clock for an IANA identifier
    Zone(String),
}

impl ClockKey {
    /// Identifier handed to the formatter cache; empty for local time.
    pub fn zone(&self) -> &str {
        match self {
            ClockKey::Local => "",
            ClockKey::Zone(zone) => zone,
        }
    }

    /// Element ids of the three text slots this clock writes to.
    pub fn slots(&self) -> ClockSlots {
        match self {
            ClockKey::Local => ClockSlots {
                time: layout::MAIN_TIME.to_string(),
                date: layout::MAIN_DATE.to_string(),
                timezone: layout::MAIN_TIMEZONE.to_string(),
            },
            ClockKey::Zone(zone) => {
                let key = sanitize_element_key(zone);
                ClockSlots {
                    time: layout::clock_slot(&key, "time"),
                    date: layout::clock_slot(&key, "date"),
                    timezone: layout::clock_slot(&key, "timezone"),
                }
            }
        }
    }

    /// Element id of the clock's own view, `None` for the fixed local clock.
    pub fn view(&self) -> Option<String> {
        match self {
            ClockKey::Local => None,
            ClockKey::Zone(zone) => Some(layout::clock_view(&sanitize_element_key(zone))),
        }
    }

    /// Mutations creating the view of an additional clock.
    ///
    /// Creation is idempotent on the surface, so mounting an existing view
    /// changes nothing. The local clock lives in the page skeleton.
    pub fn mount(&self) -> Vec<Mutation> {
        let (ClockKey::Zone(zone), Some(view)) = (self, self.view()) else {
            return Vec::new();
        };
        let slots = self.slots();
        let name = zone_display_name(zone);

        vec![
            Mutation::create(view.as_str(), layout::ADDITIONAL_CLOCKS, "additional-clock"),
            Mutation::create(slots.time, view.as_str(), "time"),
            Mutation::create(slots.date, view.as_str(), "date"),
            Mutation::create(slots.timezone, view.as_str(), "timezone"),
            Mutation::attribute(view.as_str(), "role", "timer"),
            Mutation::attribute(view.as_str(), "aria-live", "polite"),
            Mutation::attribute(view.as_str(), "aria-atomic", "true"),
            Mutation::attribute(view, "aria-label", format!("Clock for {name}")),
        ]
    }

    /// Mutation removing the view of an additional clock.
    pub fn unmount(&self) -> Option<Mutation> {
        self.view()
            .map(|view| Mutation::RemoveElement { id: view.into() })
    }
}

impl fmt::Display for ClockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockKey::Local => f.write_str("local"),
            ClockKey::Zone(zone) => f.write_str(zone),
        }
    }
}

/// Element ids of a clock's time, date and zone label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSlots {
    /// Time of day
    pub time: String,
    /// Calendar date
    pub date: String,
    /// Zone label
    pub timezone: String,
}

/// Sent by a clock's timer once per period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockTick {
    /// Clock that is due for a render
    pub key: ClockKey,
}

/// Lifecycle of a [`ClockInstance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// No timer is scheduled
    Stopped,
    /// A repeating timer is sending ticks
    Running,
}

/// One displayed clock and its repeating timer.
///
/// The timer task only sends [`ClockTick`]s; rendering happens on the
/// receiving side. Dropping the instance cancels the timer.
#[derive(Debug)]
pub struct ClockInstance {
    key: ClockKey,
    timer: Option<JoinHandle<()>>,
}

impl ClockInstance {
    /// A stopped clock for `key`.
    pub fn new(key: ClockKey) -> Self {
        Self { key, timer: None }
    }

    /// The clock's identity.
    pub fn key(&self) -> &ClockKey {
        &self.key
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClockState {
        if self.timer.is_some() {
            ClockState::Running
        } else {
            ClockState::Stopped
        }
    }

    /// Whether the timer is scheduled.
    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    /// Schedules a tick every `period`, the first one `period` from now.
    ///
    /// Restarting a running clock replaces its timer. The task ends on its
    /// own once the receiving side of `ticks` is gone.
    pub fn start(&mut self, ticks: UnboundedSender<ClockTick>, period: Duration) {
        self.stop();

        let key = self.key.clone();
        debug!(clock = %key, "Starting clock timer");

        self.timer = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                trace!(clock = %key, "Clock tick");
                if ticks.send(ClockTick { key: key.clone() }).is_err() {
                    break;
                }
            }
        }));
    }

    /// Cancels the timer. Does nothing if the clock is already stopped.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!(clock = %self.key, "Stopped clock timer");
        }
    }
}

impl Drop for ClockInstance {
    fn drop(&mut self) {
        self.stop();
    }
}
