use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::Difficulty;
use services::{QuizIntent, QuizSnapshot, SessionPhase};

use crate::context::{AppContext, use_quiz_snapshot};
use crate::routes::Route;
use crate::views::ViewError;

/// Whether a requested start has reached the runner.
fn start_acknowledged(snapshot: &QuizSnapshot) -> bool {
    match snapshot.phase {
        SessionPhase::Loading | SessionPhase::Active => true,
        SessionPhase::Terminal => snapshot.result.is_none() && snapshot.error.is_some(),
        SessionPhase::Idle => false,
    }
}

#[component]
pub fn StartView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let snapshot = use_quiz_snapshot();
    let mut difficulty = use_signal(|| Difficulty::Easy);
    let mut requested = use_signal(|| false);
    let mut error = use_signal(|| None::<ViewError>);

    let start = use_callback(move |()| {
        match ctx.send(QuizIntent::Start(Some(difficulty()))) {
            Ok(()) => {
                error.set(None);
                requested.set(true);
            }
            Err(err) => error.set(Some(err)),
        }
    });

    use_effect(move || {
        if requested() && start_acknowledged(&snapshot.read()) {
            requested.set(false);
            let _ = navigator.push(Route::Quiz {});
        }
    });

    rsx! {
        div { class: "page start-page",
            h2 { "Start Quiz" }
            p { class: "hint", "Choose a difficulty level and click Start to begin your quiz." }
            div { class: "field",
                label { r#for: "difficulty", "Difficulty" }
                select {
                    id: "difficulty",
                    value: "{difficulty().as_str()}",
                    onchange: move |evt: FormEvent| {
                        if let Ok(level) = evt.value().parse::<Difficulty>() {
                            difficulty.set(level);
                        }
                    },
                    for level in Difficulty::ALL {
                        option {
                            key: "{level.as_str()}",
                            value: "{level.as_str()}",
                            selected: level == difficulty(),
                            "{level.label()}"
                        }
                    }
                }
            }
            button {
                id: "start-quiz",
                class: "btn btn-primary",
                disabled: requested(),
                onclick: move |_| start.call(()),
                if requested() { "Starting…" } else { "Start Quiz" }
            }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
        }
    }
}
