use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::{QuizIntent, QuizSnapshot, SessionPhase};

use crate::context::{AppContext, use_quiz_snapshot};
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{OptionKey, QuizVm, keyboard_selection};

#[derive(Clone, Debug, PartialEq)]
enum QuizScreen {
    Loading,
    Failed(String),
    Empty,
    Ready(QuizVm),
}

impl QuizScreen {
    fn from_snapshot(snapshot: &QuizSnapshot) -> Self {
        if snapshot.phase == SessionPhase::Loading {
            return Self::Loading;
        }
        if let Some(message) = &snapshot.error {
            return Self::Failed(message.clone());
        }
        if !snapshot.is_active() {
            return Self::Empty;
        }
        QuizVm::from_snapshot(snapshot).map_or(Self::Empty, Self::Ready)
    }
}

fn option_key(key: &Key, focused: usize) -> Option<OptionKey> {
    match key {
        Key::ArrowDown | Key::ArrowRight => Some(OptionKey::Next),
        Key::ArrowUp | Key::ArrowLeft => Some(OptionKey::Previous),
        Key::Enter => Some(OptionKey::Activate(focused)),
        Key::Character(value) if value == " " => Some(OptionKey::Activate(focused)),
        Key::Character(value) => value.parse::<u32>().ok().map(OptionKey::Digit),
        _ => None,
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let snapshot = use_quiz_snapshot();
    let mut error = use_signal(|| None::<ViewError>);

    let dispatch = use_callback(move |intent: QuizIntent| {
        if let Err(err) = ctx.send(intent) {
            error.set(Some(err));
        }
    });

    let on_option_key = use_callback(move |(evt, focused): (KeyboardEvent, usize)| {
        let Some(key) = option_key(&evt.data.key(), focused) else {
            return;
        };
        evt.prevent_default();
        if let Some(index) = keyboard_selection(snapshot.read().selection, key) {
            dispatch.call(QuizIntent::Select(index));
        }
    });

    use_effect(move || {
        if snapshot.read().result.is_some() {
            let _ = navigator.push(Route::Results {});
        }
    });

    let screen = QuizScreen::from_snapshot(&snapshot.read());

    rsx! {
        div { class: "page quiz-page",
            match screen {
                QuizScreen::Loading => rsx! {
                    p { class: "status", "Loading questions…" }
                },
                QuizScreen::Failed(message) => rsx! {
                    div { class: "status",
                        p { class: "error", "{message}" }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| {
                                dispatch.call(QuizIntent::Restart);
                                let _ = navigator.push(Route::Start {});
                            },
                            "Back to start"
                        }
                    }
                },
                QuizScreen::Empty => rsx! {
                    div { class: "status",
                        p { "No questions available." }
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Start {});
                            },
                            "Start a quiz"
                        }
                    }
                },
                QuizScreen::Ready(vm) => rsx! {
                    QuestionPanel { vm, dispatch, on_option_key }
                },
            }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
        }
    }
}

#[component]
fn QuestionPanel(
    vm: QuizVm,
    dispatch: Callback<QuizIntent>,
    on_option_key: Callback<(KeyboardEvent, usize)>,
) -> Element {
    let advance_intent = if vm.is_last {
        QuizIntent::Finish
    } else {
        QuizIntent::Next
    };
    let can_advance = vm.can_advance;

    rsx! {
        p { class: "progress-label", "{vm.progress_label}" }
        div { class: "progress", aria_label: "Progress",
            div { class: "progress-fill", style: "width: {vm.progress_percent}%" }
        }
        div { class: "question-head",
            span { class: "category", "{vm.category}" }
            span { class: "difficulty", "{vm.difficulty}" }
        }
        h2 { class: "prompt", "{vm.prompt}" }
        div { class: "options", role: "radiogroup", aria_label: "Choose one option",
            for row in vm.options.iter().cloned() {
                button {
                    key: "{row.index}",
                    id: "option-{row.index}",
                    class: "{row.class()}",
                    role: "radio",
                    aria_checked: "{row.selected}",
                    aria_label: "{row.aria_label}",
                    onclick: move |_| dispatch.call(QuizIntent::Select(row.index)),
                    onkeydown: move |evt: KeyboardEvent| on_option_key.call((evt, row.index)),
                    "{row.text}"
                }
            }
        }
        if let Some(selected) = vm.selected_text.as_deref() {
            p { class: "selected", "Selected: {selected}" }
        }
        div { class: "nav",
            button {
                id: "quiz-prev",
                class: "btn btn-secondary",
                disabled: !vm.can_go_back,
                onclick: move |_| dispatch.call(QuizIntent::Prev),
                "Previous"
            }
            button {
                id: "quiz-next",
                class: "btn btn-primary",
                disabled: !can_advance,
                onclick: move |_| {
                    if can_advance {
                        dispatch.call(advance_intent);
                    }
                },
                "{vm.advance_label()}"
            }
        }
        p { class: "time-left", "{vm.time_left}" }
    }
}
