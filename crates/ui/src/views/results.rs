use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ResultItemVm, ResultsVm, map_results};

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let results = ctx.results();

    let results_for_resource = results.clone();
    let resource = use_resource(move || {
        let results = results_for_resource.clone();
        async move {
            let record = results.load().await.map_err(|err| {
                warn!(error = %err, "failed to load results");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(map_results(&record))
        }
    });

    let restart = use_callback(move |()| {
        let results = results.clone();
        spawn(async move {
            // A failed clear still leads to a fresh fetch because of `restart`.
            if let Err(err) = results.clear().await {
                warn!(error = %err, "failed to clear results");
            }
            let _ = navigator.push(Route::Quiz { restart: true });
        });
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "stack",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    div { class: "center", "Loading results…" }
                },
                ViewState::Ready(data) => rsx! {
                    ResultsCard { data, on_restart: restart }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "card", "{err.message()}" }
                    div { class: "row",
                        button {
                            class: "grow",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ResultsCard(data: ResultsVm, on_restart: EventHandler<()>) -> Element {
    let empty = data.is_empty();
    rsx! {
        div { class: "card stack",
            div { class: "center",
                h1 { class: "score", "{data.headline}" }
            }
            div { class: "stack",
                if empty {
                    div { class: "muted", "No results yet." }
                }
                for item in data.items {
                    ResultItem { item }
                }
            }
            div { class: "actions",
                button {
                    class: "grow",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "Take New Quiz"
                }
            }
        }
    }
}

#[component]
fn ResultItem(item: ResultItemVm) -> Element {
    rsx! {
        div { class: "stack",
            div {
                strong { "{item.number_label}" }
                " {item.question}"
            }
            div { class: "options",
                for option in item.options {
                    div { class: option.mark.class(), "{option.label}" }
                }
            }
        }
    }
}
