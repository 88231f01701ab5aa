//! Unit tests for clock module
//!
//! Timers run on a paused tokio clock; rendering goes through a batcher
//! flushed by hand into an in-memory page.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::{
    clock::{ClockEngine, ClockInstance, ClockKey, ClockState, ClockTick},
    config::{Config, TimeFormat},
    formatting::LocalZone,
    render::{FrameScheduler, MemorySurface, RenderBatcher, layout},
};

struct ManualFrames;

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) {}
}

fn batcher() -> RenderBatcher {
    RenderBatcher::new(Box::new(ManualFrames))
}

fn engine() -> (ClockEngine, UnboundedReceiver<ClockTick>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ClockEngine::new(tx, LocalZone::named("UTC")), rx)
}

fn afternoon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 15, 30, 0).unwrap()
}

fn config_with(zones: &[&str]) -> Config {
    Config {
        additional_timezones: zones.iter().map(|zone| zone.to_string()).collect(),
        ..Config::default()
    }
}

#[test]
fn zone_keys_map_to_sanitised_element_ids() {
    let key = ClockKey::Zone("America/Los_Angeles".to_string());
    let slots = key.slots();

    assert_eq!(key.view().as_deref(), Some("clock-America-Los_Angeles"));
    assert_eq!(slots.time, "clock-America-Los_Angeles-time");
    assert_eq!(slots.timezone, "clock-America-Los_Angeles-timezone");
    assert_eq!(ClockKey::Local.slots().time, layout::MAIN_TIME);
    assert!(ClockKey::Local.mount().is_empty());
    assert!(ClockKey::Local.unmount().is_none());
}

#[tokio::test(start_paused = true)]
async fn start_all_mounts_views_with_accessibility_attributes() {
    let (mut engine, _rx) = engine();
    let mut batcher = batcher();
    let mut page = MemorySurface::page();

    engine.start_all(&config_with(&["Asia/Tokyo", "Europe/Paris"]), &mut batcher);
    batcher.flush(&mut page);

    let views: Vec<&str> = page
        .children(layout::ADDITIONAL_CLOCKS)
        .into_iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(views, ["clock-Asia-Tokyo", "clock-Europe-Paris"]);
    assert_eq!(page.attribute("clock-Asia-Tokyo", "role"), Some("timer"));
    assert_eq!(page.attribute("clock-Asia-Tokyo", "aria-live"), Some("polite"));
    assert_eq!(page.attribute("clock-Asia-Tokyo", "aria-atomic"), Some("true"));
    assert_eq!(
        page.attribute("clock-Asia-Tokyo", "aria-label"),
        Some("Clock for Tokyo")
    );
    assert_eq!(page.text("clock-Asia-Tokyo-timezone"), Some("Tokyo"));
    assert!(!page.text(layout::MAIN_TIME).unwrap_or_default().is_empty());
    assert_eq!(page.text(layout::MAIN_TIMEZONE), Some("UTC"));
    assert_eq!(engine.active_keys().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn start_renders_immediately_then_ticks_every_second() {
    let (mut engine, mut rx) = engine();
    let mut batcher = batcher();

    engine.start_all(&Config::default(), &mut batcher);
    assert_eq!(batcher.pending(), 3);
    assert!(rx.try_recv().is_err());

    tokio::time::sleep(Duration::from_millis(1_001)).await;
    let tick = rx.recv().await.unwrap();
    assert_eq!(tick.key, ClockKey::Local);

    engine.on_tick(&tick, &mut batcher);
    assert_eq!(batcher.pending(), 6);
}

#[tokio::test(start_paused = true)]
async fn stopped_clock_sends_no_more_ticks() {
    let (mut engine, mut rx) = engine();
    let mut batcher = batcher();
    engine.start_all(&Config::default(), &mut batcher);

    assert!(engine.stop(&ClockKey::Local));
    assert!(!engine.stop(&ClockKey::Local));
    assert!(!engine.is_running(&ClockKey::Local));

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn ticks_for_unknown_clocks_are_ignored() {
    let (mut engine, _rx) = engine();
    let mut batcher = batcher();

    engine.on_tick(
        &ClockTick {
            key: ClockKey::Zone("Europe/Berlin".to_string()),
        },
        &mut batcher,
    );

    assert_eq!(batcher.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn adding_the_same_zone_twice_keeps_one_clock() {
    let (mut engine, _rx) = engine();
    let mut batcher = batcher();
    let mut page = MemorySurface::page();
    let mut config = Config::default();
    engine.start_all(&config, &mut batcher);

    assert_eq!(
        engine.add_timezone(&mut config, "Europe/Paris", &mut batcher),
        Some("Europe/Paris".to_string())
    );
    assert_eq!(engine.add_timezone(&mut config, "Europe/Paris", &mut batcher), None);
    batcher.flush(&mut page);

    assert_eq!(config.additional_timezones, ["Europe/Paris"]);
    assert_eq!(page.children(layout::ADDITIONAL_CLOCKS).len(), 1);
    assert!(engine.is_running(&ClockKey::Zone("Europe/Paris".to_string())));
}

#[tokio::test(start_paused = true)]
async fn add_sanitises_and_rejects_empty_ids() {
    let (mut engine, _rx) = engine();
    let mut batcher = batcher();
    let mut config = Config::default();

    assert_eq!(engine.add_timezone(&mut config, "...", &mut batcher), None);
    assert_eq!(
        engine.add_timezone(&mut config, " Asia/Tokyo ", &mut batcher),
        Some("Asia/Tokyo".to_string())
    );
    assert_eq!(config.additional_timezones, ["Asia/Tokyo"]);
}

#[tokio::test(start_paused = true)]
async fn remove_unmounts_and_is_noop_when_absent() {
    let (mut engine, _rx) = engine();
    let mut batcher = batcher();
    let mut page = MemorySurface::page();
    let mut config = config_with(&["Asia/Tokyo"]);
    engine.start_all(&config, &mut batcher);
    batcher.flush(&mut page);

    assert!(!engine.remove_timezone(&mut config, "Europe/Paris", &mut batcher));
    assert_eq!(config.additional_timezones, ["Asia/Tokyo"]);
    assert_eq!(batcher.pending(), 0);

    assert!(engine.remove_timezone(&mut config, "Asia/Tokyo", &mut batcher));
    assert!(!engine.remove_timezone(&mut config, "Asia/Tokyo", &mut batcher));
    batcher.flush(&mut page);

    assert!(config.additional_timezones.is_empty());
    assert!(page.element("clock-Asia-Tokyo").is_none());
    assert!(!engine.is_running(&ClockKey::Zone("Asia/Tokyo".to_string())));
}

#[tokio::test(start_paused = true)]
async fn restart_unmounts_views_no_longer_configured() {
    let (mut engine, _rx) = engine();
    let mut batcher = batcher();
    let mut page = MemorySurface::page();

    engine.start_all(&config_with(&["UTC", "Asia/Tokyo"]), &mut batcher);
    batcher.flush(&mut page);
    engine.restart_all(&config_with(&["Asia/Tokyo"]), &mut batcher);
    batcher.flush(&mut page);

    assert!(page.element("clock-UTC").is_none());
    assert!(page.element("clock-Asia-Tokyo").is_some());
    assert_eq!(engine.active_keys().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn renders_24_and_12_hour_clocks() {
    let (mut engine, _rx) = engine();
    let mut batcher = batcher();
    let mut page = MemorySurface::page();
    let utc = ClockKey::Zone("UTC".to_string());
    let mut config = config_with(&["UTC"]);

    engine.start_all(&config, &mut batcher);
    engine.render(&utc, afternoon(), &mut batcher).unwrap();
    batcher.flush(&mut page);
    assert_eq!(page.text("clock-UTC-time"), Some("15:30:00"));
    assert_eq!(page.text("clock-UTC-date"), Some("Monday, January 1, 2024"));

    config.time_format = TimeFormat::Hour12;
    engine.restart_all(&config, &mut batcher);
    engine.render(&utc, afternoon(), &mut batcher).unwrap();
    batcher.flush(&mut page);
    assert_eq!(page.text("clock-UTC-time"), Some("3:30:00 PM"));
    assert!(engine.cache().contains("UTC", TimeFormat::Hour24));
    assert!(engine.cache().contains("UTC", TimeFormat::Hour12));
}

#[tokio::test(start_paused = true)]
async fn unknown_zone_skips_render_but_keeps_running() {
    let (mut engine, _rx) = engine();
    let mut batcher = batcher();
    let mut page = MemorySurface::page();
    let mut config = Config::default();
    engine.start_all(&config, &mut batcher);

    engine.add_timezone(&mut config, "Mars/Olympus_Mons", &mut batcher);
    let key = ClockKey::Zone("Mars/Olympus_Mons".to_string());
    batcher.flush(&mut page);

    assert!(engine.render(&key, afternoon(), &mut batcher).is_err());
    assert!(engine.is_running(&key));
    assert_eq!(page.text("clock-Mars-Olympus_Mons-time"), Some(""));
    assert!(!engine.cache().contains("Mars/Olympus_Mons", TimeFormat::Hour24));
}

#[tokio::test(start_paused = true)]
async fn unresolved_local_zone_uses_placeholder_label() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut engine = ClockEngine::new(tx, LocalZone::unresolved());
    let mut batcher = batcher();
    let mut page = MemorySurface::page();

    engine.start_all(&Config::default(), &mut batcher);
    batcher.flush(&mut page);

    assert_eq!(page.text(layout::MAIN_TIMEZONE), Some("Local Time"));
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_everything_and_clears_cache() {
    let (mut engine, mut rx) = engine();
    let mut batcher = batcher();
    engine.start_all(&config_with(&["Asia/Tokyo"]), &mut batcher);
    assert!(!engine.cache().is_empty());

    engine.shutdown();

    assert!(engine.active_keys().is_empty());
    assert!(engine.cache().is_empty());
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn instance_stop_is_idempotent() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut clock = ClockInstance::new(ClockKey::Local);
    assert_eq!(clock.state(), ClockState::Stopped);

    clock.start(tx, Duration::from_secs(1));
    assert_eq!(clock.state(), ClockState::Running);

    clock.stop();
    clock.stop();
    assert_eq!(clock.state(), ClockState::Stopped);
}
