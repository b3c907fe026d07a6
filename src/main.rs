//! Replay driver.
//!
//! `scrollnice [settings.json] < events.jsonl`
//!
//! Feeds timestamped input events (one JSON object per line) through the
//! engine against a single 1920x1080 monitor, generates timer ticks while
//! the engine keeps its timer running, and logs every wheel event the
//! engine injects. When a settings path is given the file is watched and
//! reloaded between events.
//!
//! ```text
//! {"t": 0,   "type": "move", "x": 1915, "y": 400}
//! {"t": 16,  "type": "move", "x": 1915, "y": 460}
//! {"t": 500, "type": "button", "x": 150, "y": 150, "button": "left", "action": "down"}
//! {"t": 900, "type": "wheel", "x": 10, "y": 10, "delta": 120, "modifiers": {"alt": true}}
//! {"t": 950, "type": "toggle_zone", "index": 0}
//! ```

use anyhow::{Context, Result};
use scrollnice::ScrollNice;
use scrollnice::error::InjectionError;
use scrollnice::platform::{Collaborators, StaticDisplay, TickSource, WheelSink};
use scrollnice::settings::Settings;
use scrollnice::types::{ButtonAction, Modifiers, MouseButton, Point, WheelSample};
use serde::Deserialize;
use std::cell::Cell;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReplayEvent {
    Move {
        t: u64,
        x: i32,
        y: i32,
    },
    Button {
        t: u64,
        x: i32,
        y: i32,
        button: MouseButton,
        action: ButtonAction,
    },
    Wheel {
        t: u64,
        x: i32,
        y: i32,
        delta: i32,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        injected: bool,
    },
    ToggleEnabled {
        t: u64,
    },
    ToggleEdit {
        t: u64,
    },
    ToggleZone {
        t: u64,
        /// Round-robin when absent
        #[serde(default)]
        index: Option<usize>,
    },
    ToggleWheel {
        t: u64,
    },
}

impl ReplayEvent {
    /// Milliseconds since the start of the replay.
    fn at(&self) -> Duration {
        let t = match self {
            Self::Move { t, .. }
            | Self::Button { t, .. }
            | Self::Wheel { t, .. }
            | Self::ToggleEnabled { t }
            | Self::ToggleEdit { t }
            | Self::ToggleZone { t, .. }
            | Self::ToggleWheel { t } => *t,
        };
        Duration::from_millis(t)
    }
}

/// Running totals of injected wheel events.
#[derive(Clone, Copy, Debug, Default)]
struct Totals {
    events: u64,
    net_delta: i64,
}

/// Sink that logs each injected event.
#[derive(Default)]
struct LogSink {
    totals: Rc<Cell<Totals>>,
}

impl WheelSink for LogSink {
    fn emit_wheel(&mut self, delta: i32) -> Result<(), InjectionError> {
        let mut totals = self.totals.get();
        totals.events += 1;
        totals.net_delta += i64::from(delta);
        self.totals.set(totals);
        info!(delta, "wheel");
        Ok(())
    }
}

/// Timer whose interval the replay loop reads back to generate ticks.
#[derive(Default)]
struct ReplayTimer {
    interval: Rc<Cell<Option<Duration>>>,
}

impl TickSource for ReplayTimer {
    fn start_tick(&mut self, interval: Duration) {
        self.interval.set(Some(interval));
    }

    fn stop_tick(&mut self) {
        self.interval.set(None);
    }
}

struct Replay {
    engine: ScrollNice,
    interval: Rc<Cell<Option<Duration>>>,
    start: Instant,
    /// Replay time already processed
    clock: Duration,
    next_tick: Option<Duration>,
}

impl Replay {
    /// Run every tick due up to `until`.
    fn advance(&mut self, until: Duration) {
        while let Some(interval) = self.interval.get() {
            let due = *self.next_tick.get_or_insert(self.clock + interval);
            if due > until {
                break;
            }
            self.clock = due;
            self.engine.handle_tick(self.start + due);
            self.next_tick = Some(due + interval);
        }
        if self.interval.get().is_none() {
            self.next_tick = None;
        }
        self.clock = self.clock.max(until);
    }

    fn apply(&mut self, event: ReplayEvent) {
        let now = self.start + event.at();
        match event {
            ReplayEvent::Move { x, y, .. } => self.engine.handle_pointer_move(Point::new(x, y), now),
            ReplayEvent::Button {
                x,
                y,
                button,
                action,
                ..
            } => self
                .engine
                .handle_button(button, action, Point::new(x, y), now),
            ReplayEvent::Wheel {
                x,
                y,
                delta,
                modifiers,
                injected,
                ..
            } => {
                let sample = WheelSample {
                    position: Point::new(x, y),
                    delta,
                    modifiers,
                    injected,
                };
                let consumed = self.engine.handle_wheel(&sample);
                info!(delta, consumed, "physical wheel");
            }
            ReplayEvent::ToggleEnabled { .. } => {
                self.engine.toggle_enabled();
            }
            ReplayEvent::ToggleEdit { .. } => {
                self.engine.toggle_edit();
            }
            ReplayEvent::ToggleZone { index, .. } => {
                let toggled = match index {
                    Some(index) => self.engine.toggle_zone(index).map(|on| (index, on)),
                    None => self.engine.toggle_next_zone(),
                };
                if toggled.is_none() {
                    warn!(?index, "No such zone");
                }
            }
            ReplayEvent::ToggleWheel { .. } => {
                self.engine.toggle_wheel_block();
            }
        }
    }
}

/// Settings for the replay. A bad or missing file falls back to defaults
/// and stays watched, so fixing it takes effect mid-replay.
fn load_settings(path: Option<&Path>) -> Settings {
    match path {
        Some(path) => {
            if !path.exists() {
                warn!(path = %path.display(), "Settings file not found, using defaults");
            }
            Settings::load_or_default(path)
        }
        None => Settings::load(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scrollnice=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = load_settings(settings_path.as_deref());

    let sink = LogSink::default();
    let totals = Rc::clone(&sink.totals);
    let timer = ReplayTimer::default();
    let interval = Rc::clone(&timer.interval);

    let mut engine = ScrollNice::new(
        settings,
        Collaborators {
            sink: Box::new(sink),
            timer: Box::new(timer),
            display: Box::new(StaticDisplay::single(1920, 1080)),
        },
    );
    if let Some(path) = settings_path {
        if let Err(e) = engine.watch_settings(path) {
            warn!(error = %e, "Settings hot reload unavailable");
        }
    }

    let mut replay = Replay {
        engine,
        interval,
        start: Instant::now(),
        clock: Duration::ZERO,
        next_tick: None,
    };

    for (line_no, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: ReplayEvent = serde_json::from_str(line)
            .with_context(|| format!("line {}: invalid event", line_no + 1))?;
        debug!(?event, "Replaying");

        replay.advance(event.at());
        replay.engine.check_settings_reload();
        replay.apply(event);
    }

    replay.engine.hook_stats().log_summary();
    let totals = totals.get();
    info!(
        events = totals.events,
        net_delta = totals.net_delta,
        dropped = replay.engine.dropped_events(),
        "Replay finished"
    );
    println!(
        "{} wheel events, net delta {}, {} dropped",
        totals.events,
        totals.net_delta,
        replay.engine.dropped_events()
    );
    Ok(())
}
