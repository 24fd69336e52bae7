//! One-second countdown tick source.
//!
//! A running countdown is a spawned task that sends a [`Tick`] every second
//! over an unbounded channel. The receiving side (the UI event loop) hands
//! each tick back to [`crate::SessionStore::on_tick`], so every session
//! mutation still happens on the owner's task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Period between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one started countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownId(u64);

/// One elapsed second, tagged with the countdown that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub countdown: CountdownId,
}

struct Running {
    id: CountdownId,
    task: JoinHandle<()>,
}

/// Idle/Running tick source. At most one task is alive at any time.
pub struct Countdown {
    ticks: mpsc::UnboundedSender<Tick>,
    next_id: u64,
    running: Option<Running>,
}

impl Countdown {
    pub fn new(ticks: mpsc::UnboundedSender<Tick>) -> Self {
        Self {
            ticks,
            next_id: 0,
            running: None,
        }
    }

    /// Start ticking, cancelling any countdown that is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> CountdownId {
        self.stop();

        self.next_id += 1;
        let id = CountdownId(self.next_id);
        let ticks = self.ticks.clone();

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(Tick { countdown: id }).is_err() {
                    break;
                }
            }
        });

        debug!(countdown = id.0, "countdown started");
        self.running = Some(Running { id, task });
        id
    }

    /// Cancel the running countdown. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        match self.running.take() {
            Some(running) => {
                running.task.abort();
                debug!(countdown = running.id.0, "countdown stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn active(&self) -> Option<CountdownId> {
        self.running.as_ref().map(|r| r.id)
    }

    /// Whether `tick` came from the countdown that is currently running.
    pub fn accepts(&self, tick: Tick) -> bool {
        self.active() == Some(tick.countdown)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}
