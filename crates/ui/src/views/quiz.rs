use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::QuizSession;
use quiz_core::model::{Difficulty, QuestionCount, QuizSettings, ResultsRecord};
use services::QuizStart;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    QuestionScreenVm, QuizIntent, QuizOutcome, apply_intent, countdown_key, map_question_screen,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
enum LastAction {
    Open,
    StartFresh(QuizSettings),
    Finish(ResultsRecord),
}

#[component]
pub fn QuizView(restart: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();

    let session = use_signal(|| None::<QuizSession>);
    let settings = use_signal(QuizSettings::default);
    let error = use_signal(|| None::<ViewError>);
    let fetching = use_signal(|| false);
    let last_action = use_signal(|| None::<LastAction>);
    // Bumped whenever `session` is replaced by a newly started one.
    let installs = use_signal(|| 0_u64);

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(use_reactive!(|restart| {
        let quiz_loop = quiz_loop_for_resource.clone();
        let mut session = session;
        let mut settings = settings;
        let mut error = error;
        let mut last_action = last_action;
        let mut installs = installs;

        async move {
            last_action.set(Some(LastAction::Open));
            error.set(None);
            match quiz_loop.open(restart).await? {
                QuizStart::Ready(started) => {
                    settings.set(started.settings);
                    session.set(Some(started.session));
                    installs += 1;
                }
                // A settings change started a newer fetch; it owns the session.
                QuizStart::Superseded => {}
            }
            Ok::<_, ViewError>(())
        }
    }));

    let start_fresh = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |next: QuizSettings| {
            let quiz_loop = quiz_loop.clone();
            let mut session = session;
            let mut settings = settings;
            let mut error = error;
            let mut fetching = fetching;
            let mut last_action = last_action;
            let mut installs = installs;

            settings.set(next);
            last_action.set(Some(LastAction::StartFresh(next)));
            fetching.set(true);
            spawn(async move {
                match quiz_loop.start_fresh(next).await {
                    Ok(QuizStart::Ready(started)) => {
                        session.set(Some(started.session));
                        installs += 1;
                        error.set(None);
                        fetching.set(false);
                    }
                    Ok(QuizStart::Superseded) => {}
                    Err(err) => {
                        // The old questions no longer match the chosen settings.
                        session.set(None);
                        error.set(Some(ViewError::from(&err)));
                        fetching.set(false);
                    }
                }
            });
        })
    };

    let finish = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |record: ResultsRecord| {
            let quiz_loop = quiz_loop.clone();
            let mut error = error;
            let mut last_action = last_action;

            last_action.set(Some(LastAction::Finish(record.clone())));
            spawn(async move {
                match quiz_loop.finish(&record).await {
                    Ok(()) => {
                        error.set(None);
                        let _ = navigator.push(Route::Results {});
                    }
                    Err(err) => {
                        warn!(error = %err, "failed to save quiz results");
                        error.set(Some(ViewError::Unknown));
                    }
                }
            });
        })
    };

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut session = session;
        let outcome = session
            .write()
            .as_mut()
            .map_or(QuizOutcome::Continue, |session| apply_intent(session, intent));
        if let QuizOutcome::Completed(record) = outcome {
            finish.call(record);
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, start_fresh, session);
            }
        }
    }

    let countdown = use_memo(move || {
        session
            .read()
            .as_ref()
            .and_then(countdown_key)
            .map(|key| (installs(), key))
    });

    // Restarted (and the pending sleep dropped) whenever the question on screen changes.
    let _ticker = use_resource(move || {
        let active = countdown().is_some();
        async move {
            if !active {
                return;
            }
            loop {
                tokio::time::sleep(TICK_INTERVAL).await;
                if !*fetching.peek() {
                    dispatch.call(QuizIntent::Tick);
                }
            }
        }
    });

    let retry = use_callback(move |()| match last_action() {
        Some(LastAction::StartFresh(next)) => start_fresh.call(next),
        Some(LastAction::Finish(record)) => finish.call(record),
        Some(LastAction::Open) | None => {
            let mut resource = resource;
            resource.restart();
        }
    });

    let on_restart = use_callback(move |()| {
        let mut session = session;
        let mut resource = resource;
        session.set(None);
        resource.restart();
    });

    let state = view_state_from_resource(resource);
    let screen = session.read().as_ref().and_then(map_question_screen);
    let current_settings = settings();
    let is_fetching = fetching();
    let action_error = *error.read();

    rsx! {
        div { class: "stack",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    div { class: "center", "Loading questions…" }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "card", "{err.message()}" }
                    div { class: "row",
                        button {
                            class: "grow",
                            r#type: "button",
                            onclick: move |_| retry.call(()),
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    SettingsBar { settings: current_settings, on_change: start_fresh }
                    if let Some(err) = action_error {
                        div { class: "card", "{err.message()}" }
                        div { class: "row",
                            button {
                                class: "grow",
                                r#type: "button",
                                onclick: move |_| retry.call(()),
                                "Retry"
                            }
                        }
                    }
                    if is_fetching {
                        div { class: "center", "Loading questions…" }
                    } else if let Some(screen) = screen {
                        QuestionPanel { screen, on_intent: dispatch, on_restart }
                    } else if action_error.is_none() {
                        div { class: "center", "No questions. Try again later." }
                    }
                },
            }
        }
    }
}

#[component]
fn SettingsBar(settings: QuizSettings, on_change: EventHandler<QuizSettings>) -> Element {
    rsx! {
        div { class: "row",
            select {
                class: "grow",
                aria_label: "Difficulty",
                onchange: move |evt: FormEvent| {
                    if let Ok(difficulty) = evt.value().parse::<Difficulty>() {
                        on_change.call(QuizSettings { difficulty, ..settings });
                    }
                },
                for difficulty in Difficulty::ALL {
                    option {
                        value: "{difficulty.as_str()}",
                        selected: difficulty == settings.difficulty,
                        "{difficulty.label()}"
                    }
                }
            }
            select {
                class: "grow",
                aria_label: "Amount",
                onchange: move |evt: FormEvent| {
                    if let Ok(amount) = evt.value().parse::<QuestionCount>() {
                        on_change.call(QuizSettings { amount, ..settings });
                    }
                },
                for amount in QuestionCount::choices() {
                    option {
                        value: "{amount}",
                        selected: amount == settings.amount,
                        "{amount} questions"
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionPanel(
    screen: QuestionScreenVm,
    on_intent: EventHandler<QuizIntent>,
    on_restart: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "spaced",
            div { class: "muted", "{screen.position_label}" }
            div { class: "muted", id: "quiz-timer", "{screen.timer_label}" }
        }
        div { class: "progress",
            span { style: "width: {screen.progress_pct}%" }
        }
        div { class: "card stack",
            div { class: "question", "{screen.prompt}" }
            div { class: "options",
                for option in screen.options {
                    button {
                        key: "{option.index}",
                        class: option.class(),
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Select(option.index)),
                        "{option.label}"
                    }
                }
            }
            div { class: "actions",
                button {
                    class: "grow",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "Restart"
                }
                button {
                    class: "grow",
                    r#type: "button",
                    disabled: !screen.can_go_back,
                    onclick: move |_| on_intent.call(QuizIntent::Previous),
                    "Previous"
                }
                button {
                    class: "grow",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Skip),
                    "Skip"
                }
                button {
                    class: "grow",
                    id: "quiz-lock",
                    r#type: "button",
                    disabled: !screen.can_lock,
                    onclick: move |_| on_intent.call(QuizIntent::Lock),
                    "{screen.lock_label}"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    start_fresh: Rc<RefCell<Option<Callback<QuizSettings>>>>,
    session: Rc<RefCell<Option<Signal<Option<QuizSession>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizIntent>,
        start_fresh: Callback<QuizSettings>,
        session: Signal<Option<QuizSession>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.start_fresh.borrow_mut() = Some(start_fresh);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn start_fresh(&self) -> Callback<QuizSettings> {
        (*self.start_fresh.borrow()).expect("quiz start_fresh registered")
    }

    pub(crate) fn session(&self) -> Signal<Option<QuizSession>> {
        (*self.session.borrow()).expect("quiz session registered")
    }
}
