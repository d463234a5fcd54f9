use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};

use crate::views::{QuizView, ResultsView};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeRedirect)] Home {},
        #[route("/quiz?:restart", QuizView)] Quiz { restart: bool },
        #[route("/results", ResultsView)] Results {},
        #[route("/:..segments", NotFoundRedirect)] NotFound { segments: Vec<String> },
}

/// Header links for the page currently shown.
#[must_use]
pub fn header_links(current: &Route) -> Vec<(&'static str, Route)> {
    let on_results = matches!(current, Route::Results {});
    let mut links = vec![
        ("Quiz App", Route::Quiz {
            restart: on_results,
        }),
        ("Results", Route::Results {}),
    ];
    if on_results {
        links.push(("Restart Quiz", Route::Quiz { restart: false }));
    }
    links
}

#[component]
fn Layout() -> Element {
    let current = use_route::<Route>();
    let links = header_links(&current);

    rsx! {
        div { class: "app-container",
            header { class: "app-header",
                nav {
                    for (label, to) in links {
                        Link { class: "brand", to, "{label}" }
                    }
                }
            }
            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn HomeRedirect() -> Element {
    redirect_to_quiz()
}

#[component]
fn NotFoundRedirect(segments: Vec<String>) -> Element {
    let _ = segments;
    redirect_to_quiz()
}

fn redirect_to_quiz() -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        let _ = navigator.replace(Route::Quiz { restart: false });
    });
    rsx! {}
}
