use crate::error::DiscoverError;
use crate::models::{AskRequest, TimedAnswer};
use crate::render::ResultsView;
use async_trait::async_trait;

/// Transport seam for the `/ask` operation. The production implementation is
/// [`crate::AskClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait AnswerBackend {
    async fn ask(&self, request: &AskRequest) -> Result<TimedAnswer, DiscoverError>;
}

/// Output surface the panel mutates, one method per side effect of a search
/// cycle. This replaces the original UI's element-by-id contract so rendering
/// can be exercised without a live document.
pub trait PanelSurface {
    /// Show the in-flight indicator.
    fn show_loader(&mut self);

    /// Hide the in-flight indicator. Always the final step of a completed
    /// search, success or failure.
    fn hide_loader(&mut self);

    /// Hide the results area, clear the gallery, and reset the badge strip to
    /// the two base badges.
    fn clear_results(&mut self);

    /// Replace the results area with a freshly built view and reveal it.
    fn render(&mut self, view: ResultsView);

    /// Present a blocking user-facing error message.
    fn alert(&mut self, message: &str);
}
