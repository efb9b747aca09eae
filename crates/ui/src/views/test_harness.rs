use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{QuestionBank, QuestionDraft};
use services::{AudioMixer, HighScoreService, QuizController, RecordingAudio};
use storage::{HIGH_SCORE_KEY, InMemoryRepository, ScoreRepository};

use crate::context::{UiApp, build_app_context};
use crate::views::GameView;
use crate::views::game::GameTestHandles;
use crate::views::GameIntent;

#[derive(Clone)]
struct TestApp {
    bank: Arc<QuestionBank>,
    high_scores: Arc<HighScoreService>,
    audio: RecordingAudio,
    initial_high_score: u32,
}

impl UiApp for TestApp {
    fn question_bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    fn high_scores(&self) -> Arc<HighScoreService> {
        Arc::clone(&self.high_scores)
    }

    fn audio(&self) -> AudioMixer {
        AudioMixer::new(Arc::new(self.audio.clone()))
    }

    fn initial_high_score(&self) -> u32 {
        self.initial_high_score
    }
}

#[derive(Clone, Props)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: GameTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.app, &other.app)
    }
}

#[component]
fn GameHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { GameView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub audio: RecordingAudio,
    handles: GameTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn send(&mut self, intent: GameIntent) {
        self.handles.dispatch().call(intent);
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn controller(&self) -> Signal<QuizController> {
        self.handles.controller()
    }

    /// Correct answer of the question on screen.
    pub fn correct_answer(&self) -> String {
        let controller = self.controller();
        let controller = controller.peek();
        controller
            .session()
            .and_then(|session| session.current_question())
            .map(|question| question.correct_answer().to_string())
            .expect("a question on screen")
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

pub fn single_question_bank() -> QuestionBank {
    QuestionBank::from_drafts(vec![QuestionDraft::new(
        "What is the capital of France?",
        ["Paris", "Rome"],
        "Paris",
    )])
    .expect("valid bank")
}

pub async fn setup_view_harness(bank: QuestionBank, high_score: u32) -> ViewHarness {
    let repo = if high_score > 0 {
        InMemoryRepository::with_score(HIGH_SCORE_KEY, high_score)
    } else {
        InMemoryRepository::new()
    };
    let high_scores = Arc::new(HighScoreService::new(Arc::new(repo.clone())));
    let initial_high_score = high_scores.load().await;
    let audio = RecordingAudio::new();
    let handles = GameTestHandles::default();

    let app = Arc::new(TestApp {
        bank: Arc::new(bank),
        high_scores,
        audio: audio.clone(),
        initial_high_score,
    });
    let dom = VirtualDom::new_with_props(
        GameHarness,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        repo,
        audio,
        handles,
    }
}

pub async fn stored_high_score(repo: &InMemoryRepository) -> Option<u32> {
    repo.get_score(HIGH_SCORE_KEY).await.expect("in-memory read")
}
