//! Per-question countdown and the task that drives it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

/// Seconds allowed for each question.
pub const QUESTION_TIME_SECS: u32 = 30;

/// Identifies one arming of a [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownToken(u64);

/// Outcome of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The token belongs to a cancelled or superseded arming.
    Stale,
    /// Seconds left after this tick.
    Running(u32),
    /// Time is up. The countdown has disarmed itself.
    Expired,
}

/// Logical countdown with generation tokens.
///
/// Arming always supersedes the previous arming, so a late tick from an
/// earlier question can never touch the current one.
#[derive(Debug, Clone)]
pub struct Countdown {
    limit: u32,
    remaining: u32,
    generation: u64,
    armed: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(QUESTION_TIME_SECS)
    }
}

impl Countdown {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            remaining: limit,
            generation: 0,
            armed: false,
        }
    }

    /// Start counting from the full limit, superseding any earlier arming.
    pub fn arm(&mut self) -> CountdownToken {
        self.generation += 1;
        self.remaining = self.limit;
        self.armed = true;
        CountdownToken(self.generation)
    }

    /// Stop counting and reset to the full limit.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.remaining = self.limit;
        self.armed = false;
    }

    pub fn tick(&mut self, token: CountdownToken) -> Tick {
        if !self.armed || token.0 != self.generation {
            return Tick::Stale;
        }
        if self.remaining <= 1 {
            self.remaining = 0;
            self.armed = false;
            return Tick::Expired;
        }
        self.remaining -= 1;
        Tick::Running(self.remaining)
    }

    /// Token of the live arming, if any.
    #[must_use]
    pub fn token(&self) -> Option<CountdownToken> {
        self.armed.then_some(CountdownToken(self.generation))
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Background task that emits the armed token once per period.
///
/// At most one task is live; starting a new one aborts the old one first.
pub struct Ticker {
    period: Duration,
    sender: mpsc::UnboundedSender<CountdownToken>,
    running: Option<(CountdownToken, JoinHandle<()>)>,
}

impl Ticker {
    #[must_use]
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<CountdownToken>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let ticker = Self {
            period,
            sender,
            running: None,
        };
        (ticker, receiver)
    }

    /// One tick per second.
    #[must_use]
    pub fn every_second() -> (Self, mpsc::UnboundedReceiver<CountdownToken>) {
        Self::new(Duration::from_secs(1))
    }

    /// Emit ticks for `token`, replacing any running task.
    pub fn start(&mut self, token: CountdownToken) {
        self.stop();
        let period = self.period;
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if sender.send(token).is_err() {
                    break;
                }
            }
        });
        self.running = Some((token, handle));
    }

    pub fn stop(&mut self) {
        if let Some((_, handle)) = self.running.take() {
            handle.abort();
        }
    }

    /// Make the running task match the countdown's live token.
    pub fn sync(&mut self, token: Option<CountdownToken>) {
        match token {
            Some(token) if self.active_token() == Some(token) => {}
            Some(token) => self.start(token),
            None => self.stop(),
        }
    }

    #[must_use]
    pub fn active_token(&self) -> Option<CountdownToken> {
        self.running.as_ref().map(|(token, _)| *token)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
