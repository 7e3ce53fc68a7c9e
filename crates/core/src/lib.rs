pub mod client;
pub mod error;
pub mod models;
pub mod panel;
pub mod render;
pub mod traits;

pub use client::AskClient;
pub use error::{DiscoverError, ALERT_PREFIX};
pub use models::{
    AnswerResult, AskRequest, Badge, HealthStatus, ImageRef, PageLabel, RagMode, TimedAnswer,
};
pub use panel::{SearchOutcome, SearchPanel};
pub use render::{
    compute_badges, image_caption, markdown_to_html, render_results, rewrite_image_path,
    timing_text, ImageCard, ResultsView, NO_MATCHES_MESSAGE, PLACEHOLDER_IMAGE,
};
pub use traits::{AnswerBackend, PanelSurface};
