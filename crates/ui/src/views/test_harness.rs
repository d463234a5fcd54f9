use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::Question;
use services::{QuestionRequest, QuestionSource, QuizLoopService, SourceError};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{QuizView, ResultsView};

/// Serves `count` fixed questions; option 0 is always correct.
pub struct FixedSource {
    pub count: usize,
}

#[async_trait]
impl QuestionSource for FixedSource {
    async fn fetch(&self, _request: QuestionRequest) -> Result<Vec<Question>, SourceError> {
        Ok((0..self.count)
            .map(|id| {
                Question::new(
                    format!("Question number {id}?"),
                    vec!["Right".into(), "Wrong".into(), "Also wrong".into()],
                    0,
                )
                .expect("valid question")
            })
            .collect())
    }
}

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz { restart: bool },
    Results,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
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
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    // Target of the quiz view's navigation on completion.
    #[route("/results", ResultsView)]
    Results {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz { restart } => rsx! { QuizView { restart } },
        ViewKind::Results => rsx! { ResultsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz_loop: Arc<QuizLoopService>,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
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

pub fn setup_view_harness(view: ViewKind, source: Arc<dyn QuestionSource>) -> ViewHarness {
    setup_view_harness_with_storage(view, source, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(
    view: ViewKind,
    source: Arc<dyn QuestionSource>,
    storage: Storage,
) -> ViewHarness {
    let quiz_loop = Arc::new(QuizLoopService::new(source, Arc::clone(&storage.kv)));
    let quiz_handles = match view {
        ViewKind::Quiz { .. } => Some(QuizTestHandles::default()),
        ViewKind::Results => None,
    };

    let app = Arc::new(TestApp {
        quiz_loop: Arc::clone(&quiz_loop),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        quiz_loop,
        quiz_handles,
    }
}
