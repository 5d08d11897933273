use std::sync::Arc;

use dioxus::prelude::*;
use services::{QuizHandle, QuizIntent, QuizSnapshot};

use crate::views::ViewError;

pub trait UiApp: Send + Sync {
    fn quiz(&self) -> QuizHandle;
}

#[derive(Clone)]
pub struct AppContext {
    quiz: QuizHandle,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self { quiz: app.quiz() }
    }

    #[must_use]
    pub fn quiz(&self) -> QuizHandle {
        self.quiz.clone()
    }

    /// Forward a user intent to the quiz runner.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unavailable` if the runner has stopped.
    pub fn send(&self, intent: QuizIntent) -> Result<(), ViewError> {
        self.quiz.send(intent).map_err(ViewError::from)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Live copy of the runner's latest snapshot.
pub fn use_quiz_snapshot() -> Signal<QuizSnapshot> {
    let ctx = use_context::<AppContext>();
    let initial = ctx.quiz().snapshot();
    let mut snapshot = use_signal(move || initial);

    use_future(move || {
        let mut updates = ctx.quiz().subscribe();
        async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                snapshot.set(next);
            }
        }
    });

    snapshot
}
