use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::Question;
use quiz_core::time::fixed_clock;
use services::{
    LocalQuestionSource, QuestionLoader, QuizHandle, QuizIntent, QuizService, QuizSnapshot,
    spawn_runner,
};
use storage::repository::InMemoryScoreStore;

use crate::context::{UiApp, build_app_context};
use crate::views::{QuizView, ResultsView, StartView};

#[derive(Clone)]
struct TestApp {
    quiz: QuizHandle,
}

impl UiApp for TestApp {
    fn quiz(&self) -> QuizHandle {
        self.quiz.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Start,
    Quiz,
    Results,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Start => rsx! { StartView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Results => rsx! { ResultsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz: QuizHandle,
    pub store: InMemoryScoreStore,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn question(id: &str, prompt: &str, correct_index: usize) -> Question {
    Question::new(
        id,
        prompt,
        vec!["Alpha".into(), "Beta".into(), "Gamma".into(), "Delta".into()],
        correct_index,
    )
    .expect("valid question")
}

/// Spawn a runner over `questions`, with the remote source disabled.
pub fn spawn_quiz(questions: Vec<Question>, store: &InMemoryScoreStore) -> QuizHandle {
    let loader = QuestionLoader::offline(LocalQuestionSource::new(questions), 10);
    let service = QuizService::new(loader, Arc::new(store.clone())).with_clock(fixed_clock());
    spawn_runner(Arc::new(service))
}

/// Send `intents` and wait until the published state satisfies `done`.
pub async fn drive_quiz(
    quiz: &QuizHandle,
    intents: &[QuizIntent],
    done: impl FnMut(&QuizSnapshot) -> bool,
) {
    let mut updates = quiz.subscribe();
    for intent in intents {
        quiz.send(*intent).expect("runner alive");
    }
    let _ = tokio::time::timeout(std::time::Duration::from_secs(1), updates.wait_for(done))
        .await
        .expect("runner reached expected state");
}

pub fn setup_view_harness(
    view: ViewKind,
    quiz: QuizHandle,
    store: InMemoryScoreStore,
) -> ViewHarness {
    let app = Arc::new(TestApp { quiz: quiz.clone() });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, quiz, store }
}
