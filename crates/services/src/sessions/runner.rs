use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::debug;

use quiz_core::model::Difficulty;

use super::service::QuizSession;
use super::view::QuizSnapshot;
use super::workflow::QuizService;
use crate::countdown::{CountdownToken, Ticker};
use crate::error::SessionError;

/// User intents accepted by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizIntent {
    Start(Option<Difficulty>),
    Select(usize),
    Next,
    Prev,
    Finish,
    Restart,
}

/// Cloneable handle used by the UI to drive a running quiz.
#[derive(Clone)]
pub struct QuizHandle {
    intents: mpsc::UnboundedSender<QuizIntent>,
    snapshots: watch::Receiver<QuizSnapshot>,
}

impl QuizHandle {
    /// Queue an intent for the runner.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RunnerClosed` if the runner task has stopped.
    pub fn send(&self, intent: QuizIntent) -> Result<(), SessionError> {
        self.intents
            .send(intent)
            .map_err(|_| SessionError::RunnerClosed)
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that wakes on every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.snapshots.clone()
    }
}

/// Spawn the runner on the current tokio runtime with one-second ticks.
#[must_use]
pub fn spawn_runner(service: Arc<QuizService>) -> QuizHandle {
    spawn_runner_with_period(service, Duration::from_secs(1))
}

/// Spawn the runner with a custom tick period.
#[must_use]
pub fn spawn_runner_with_period(service: Arc<QuizService>, period: Duration) -> QuizHandle {
    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(QuizSnapshot::default());
    let (ticker, ticks) = Ticker::new(period);

    let runner = QuizRunner {
        service,
        session: QuizSession::new(),
        ticker,
        snapshots: snapshot_tx,
    };
    tokio::spawn(runner.run(intent_rx, ticks));

    QuizHandle {
        intents: intent_tx,
        snapshots: snapshot_rx,
    }
}

/// Sole owner and mutator of the session.
///
/// Intents and ticks are handled one at a time; after each one the ticker is
/// brought in line with the session's countdown and a snapshot is published.
struct QuizRunner {
    service: Arc<QuizService>,
    session: QuizSession,
    ticker: Ticker,
    snapshots: watch::Sender<QuizSnapshot>,
}

impl QuizRunner {
    async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<QuizIntent>,
        mut ticks: mpsc::UnboundedReceiver<CountdownToken>,
    ) {
        loop {
            tokio::select! {
                biased;
                intent = intents.recv() => match intent {
                    Some(intent) => self.handle_intent(intent).await,
                    None => break,
                },
                Some(token) = ticks.recv() => self.handle_tick(token).await,
            }
            self.settle();
        }
        self.ticker.stop();
        debug!("quiz runner stopped");
    }

    async fn handle_intent(&mut self, intent: QuizIntent) {
        let outcome = match intent {
            QuizIntent::Start(difficulty) => {
                self.session.begin_loading(difficulty);
                self.settle();
                self.service.load(&mut self.session).await
            }
            QuizIntent::Select(index) => self.session.select_answer(index),
            QuizIntent::Next => self.service.advance(&mut self.session).await.map(|_| ()),
            QuizIntent::Prev => self.session.retreat().map(|_| ()),
            QuizIntent::Finish => self.service.finish(&mut self.session).await.map(|_| ()),
            QuizIntent::Restart => {
                self.session.restart();
                Ok(())
            }
        };
        if let Err(err) = outcome {
            debug!(?intent, error = %err, "intent not applied");
        }
    }

    async fn handle_tick(&mut self, token: CountdownToken) {
        if let Err(err) = self.service.on_tick(&mut self.session, token).await {
            debug!(error = %err, "tick not applied");
        }
    }

    fn settle(&mut self) {
        self.ticker.sync(self.session.countdown_token());
        self.snapshots
            .send_replace(QuizSnapshot::from_session(&self.session));
    }
}
