use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{QuizView, ResultsView, StartView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", StartView)] Start {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/results", ResultsView)] Results {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "card",
                h1 { class: "title", "Quiz" }
                Outlet::<Route> {}
            }
        }
    }
}
