use crate::models::{AskRequest, RagMode};
use crate::render::render_results;
use crate::traits::{AnswerBackend, PanelSurface};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

/// What happened to one search trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Trimmed query was empty; nothing was sent and the surface is untouched.
    Skipped,
    /// Response arrived and the view was rendered.
    Rendered,
    /// Request or decode failed; an alert was presented.
    Failed,
    /// A newer search started while this one was in flight, so its response
    /// was discarded without touching the surface.
    Stale,
}

/// Controller for one search box: trigger, request, render. Each trigger
/// takes a fresh sequence token; only the holder of the newest token may
/// mutate the surface once its response lands. The HTTP request itself is
/// never cancelled, its completion just stops mattering.
pub struct SearchPanel<B: AnswerBackend> {
    backend: B,
    sequence: AtomicU64,
}

impl<B: AnswerBackend + Send + Sync> SearchPanel<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sequence: AtomicU64::new(0),
        }
    }

    pub async fn perform_search<S: PanelSurface + ?Sized>(
        &self,
        raw_query: &str,
        mode: RagMode,
        surface: &mut S,
    ) -> SearchOutcome {
        let question = raw_query.trim();
        if question.is_empty() {
            return SearchOutcome::Skipped;
        }

        let token = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        surface.show_loader();
        surface.clear_results();

        let request = AskRequest::new(question, mode);
        info!(question, mode = %mode, token, "search started");
        let response = self.backend.ask(&request).await;

        if self.sequence.load(Ordering::SeqCst) != token {
            info!(token, "stale response discarded");
            return SearchOutcome::Stale;
        }

        let outcome = match response {
            Ok(timed) => {
                info!(
                    mode = %timed.result.mode,
                    elapsed_secs = timed.elapsed_secs,
                    images = timed.result.images.len(),
                    "search rendered"
                );
                surface.render(render_results(&timed.result, timed.elapsed_secs));
                SearchOutcome::Rendered
            }
            Err(error) => {
                warn!(%error, "search failed");
                surface.alert(&error.alert_text());
                SearchOutcome::Failed
            }
        };

        surface.hide_loader();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiscoverError;
    use crate::models::{AnswerResult, TimedAnswer};
    use crate::render::ResultsView;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingSurface {
        events: Vec<String>,
        views: Vec<ResultsView>,
        alerts: Vec<String>,
    }

    impl PanelSurface for RecordingSurface {
        fn show_loader(&mut self) {
            self.events.push("show_loader".to_string());
        }

        fn hide_loader(&mut self) {
            self.events.push("hide_loader".to_string());
        }

        fn clear_results(&mut self) {
            self.events.push("clear_results".to_string());
        }

        fn render(&mut self, view: ResultsView) {
            self.events.push("render".to_string());
            self.views.push(view);
        }

        fn alert(&mut self, message: &str) {
            self.events.push("alert".to_string());
            self.alerts.push(message.to_string());
        }
    }

    fn standard_answer() -> AnswerResult {
        AnswerResult {
            answer: "**Brick** is durable.".to_string(),
            mode: "standard".to_string(),
            generation_time: None,
            relevance_score: None,
            entities: Vec::new(),
            images: Vec::new(),
        }
    }

    struct FakeBackend {
        response: fn() -> Result<TimedAnswer, DiscoverError>,
        requests: Mutex<Vec<AskRequest>>,
    }

    impl FakeBackend {
        fn new(response: fn() -> Result<TimedAnswer, DiscoverError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AnswerBackend for FakeBackend {
        async fn ask(&self, request: &AskRequest) -> Result<TimedAnswer, DiscoverError> {
            self.requests.lock().unwrap().push(request.clone());
            (self.response)()
        }
    }

    #[tokio::test]
    async fn empty_query_is_a_no_op() {
        let panel = SearchPanel::new(FakeBackend::new(|| {
            Ok(TimedAnswer {
                result: standard_answer(),
                elapsed_secs: 0.1,
            })
        }));
        let mut surface = RecordingSurface::default();

        let outcome = panel.perform_search("   ", RagMode::Auto, &mut surface).await;

        assert_eq!(outcome, SearchOutcome::Skipped);
        assert!(surface.events.is_empty());
        assert!(panel.backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_search_sends_trimmed_question_and_renders() {
        let panel = SearchPanel::new(FakeBackend::new(|| {
            Ok(TimedAnswer {
                result: standard_answer(),
                elapsed_secs: 1.2,
            })
        }));
        let mut surface = RecordingSurface::default();

        let outcome = panel
            .perform_search("  red brick facade  ", RagMode::Standard, &mut surface)
            .await;

        assert_eq!(outcome, SearchOutcome::Rendered);
        let requests = panel.backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].question, "red brick facade");
        assert_eq!(requests[0].rag_mode, "standard");

        assert_eq!(
            surface.events,
            vec!["show_loader", "clear_results", "render", "hide_loader"]
        );
        let view = &surface.views[0];
        assert!(view.answer_html.contains("<strong>Brick</strong>"));
        assert!(view.cards.is_empty());
    }

    #[tokio::test]
    async fn failed_search_alerts_and_hides_loader_without_rendering() {
        let panel = SearchPanel::new(FakeBackend::new(|| {
            Err(DiscoverError::Status {
                status: 500,
                body: "engine offline".to_string(),
            })
        }));
        let mut surface = RecordingSurface::default();

        let outcome = panel
            .perform_search("impact wrench", RagMode::Auto, &mut surface)
            .await;

        assert_eq!(outcome, SearchOutcome::Failed);
        assert_eq!(
            surface.events,
            vec!["show_loader", "clear_results", "alert", "hide_loader"]
        );
        assert!(surface.views.is_empty());
        assert!(surface.alerts[0].starts_with(crate::error::ALERT_PREFIX));
        assert!(surface.alerts[0].contains("500"));
    }

    #[derive(Default)]
    struct Gates {
        entered: Notify,
        release_first: Notify,
        calls: AtomicUsize,
    }

    struct GatedBackend(Arc<Gates>);

    #[async_trait]
    impl AnswerBackend for GatedBackend {
        async fn ask(&self, _request: &AskRequest) -> Result<TimedAnswer, DiscoverError> {
            let call = self.0.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                self.0.entered.notify_one();
                self.0.release_first.notified().await;
            }
            Ok(TimedAnswer {
                result: standard_answer(),
                elapsed_secs: 0.2,
            })
        }
    }

    #[tokio::test]
    async fn overlapping_search_discards_the_older_response() {
        let gates = Arc::new(Gates::default());
        let panel = Arc::new(SearchPanel::new(GatedBackend(gates.clone())));

        let first = tokio::spawn({
            let panel = panel.clone();
            async move {
                let mut surface = RecordingSurface::default();
                let outcome = panel
                    .perform_search("first query", RagMode::Auto, &mut surface)
                    .await;
                (outcome, surface)
            }
        });

        gates.entered.notified().await;

        let mut second_surface = RecordingSurface::default();
        let second_outcome = panel
            .perform_search("second query", RagMode::Auto, &mut second_surface)
            .await;
        assert_eq!(second_outcome, SearchOutcome::Rendered);

        gates.release_first.notify_one();
        let (first_outcome, first_surface) = first.await.unwrap();

        assert_eq!(first_outcome, SearchOutcome::Stale);
        assert_eq!(first_surface.events, vec!["show_loader", "clear_results"]);
        assert!(first_surface.views.is_empty());
        assert!(first_surface.alerts.is_empty());
    }
}
