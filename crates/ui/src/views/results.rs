use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::QuizIntent;

use crate::context::{AppContext, use_quiz_snapshot};
use crate::routes::Route;
use crate::vm::ResultsVm;

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let snapshot = use_quiz_snapshot();

    let restart = use_callback(move |()| {
        let _ = ctx.send(QuizIntent::Restart);
        let _ = navigator.push(Route::Start {});
    });

    let vm = snapshot.read().result.as_ref().map(ResultsVm::from);

    rsx! {
        div { class: "page results-page",
            match vm {
                None => rsx! {
                    p { "No results to show." }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Start {});
                        },
                        "Start a quiz"
                    }
                },
                Some(vm) => rsx! {
                    h2 { "Results" }
                    p { class: "score", "{vm.score_line}" }
                    p { class: "best", "{vm.best_line}" }
                    p { class: "completed", "Completed {vm.completed_at}" }
                    div { class: "breakdown",
                        for row in vm.rows {
                            div { key: "{row.number}", class: "result-row {row.tone}",
                                div { class: "result-head",
                                    span { class: "result-mark", role: "img", aria_label: "{row.tone}",
                                        if row.is_correct { "✅" } else { "❌" }
                                    }
                                    span { "Question {row.number}" }
                                }
                                div { class: "result-prompt", "{row.prompt}" }
                                div { class: "verdict", "{row.verdict}" }
                                div { class: "answers",
                                    "Your answer: {row.your_answer} | Correct answer: {row.correct_answer}"
                                }
                            }
                        }
                    }
                    button {
                        id: "results-restart",
                        class: "btn btn-primary",
                        onclick: move |_| restart.call(()),
                        "Restart Quiz"
                    }
                },
            }
        }
    }
}
