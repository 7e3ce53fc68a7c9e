use crate::error::DiscoverError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Retrieval strategy understood by the discovery backend. The wire value is
/// the lowercase name; the backend treats it as opaque routing input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RagMode {
    Auto,
    Standard,
    Corrective,
    Speculative,
    Fusion,
}

impl RagMode {
    pub const ALL: [RagMode; 5] = [
        RagMode::Auto,
        RagMode::Standard,
        RagMode::Corrective,
        RagMode::Speculative,
        RagMode::Fusion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RagMode::Auto => "auto",
            RagMode::Standard => "standard",
            RagMode::Corrective => "corrective",
            RagMode::Speculative => "speculative",
            RagMode::Fusion => "fusion",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RagMode::Auto => "Auto - Smart Router",
            RagMode::Standard => "Standard - Fast & Efficient",
            RagMode::Corrective => "Corrective - Quality-Aware",
            RagMode::Speculative => "Speculative - Deep Analysis",
            RagMode::Fusion => "Fusion - High Recall",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RagMode::Auto => "Best for complex technical queries, chooses the optimal path (~3s)",
            RagMode::Standard => "Lightning-fast retrieval for simple part lookups (~1s)",
            RagMode::Corrective => "Verifies results against catalog specs for high precision (~4s)",
            RagMode::Speculative => {
                "Generates detailed technical drafts and enriches with entity extraction (~4s)"
            }
            RagMode::Fusion => {
                "Multi-query variations for finding components across catalog sections (~5s)"
            }
        }
    }
}

impl fmt::Display for RagMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RagMode {
    type Err = DiscoverError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Ok(RagMode::Auto),
            "standard" => Ok(RagMode::Standard),
            "corrective" => Ok(RagMode::Corrective),
            "speculative" => Ok(RagMode::Speculative),
            "fusion" => Ok(RagMode::Fusion),
            other => Err(DiscoverError::UnknownMode(other.to_string())),
        }
    }
}

/// Body of `POST /ask`, serialized exactly as the backend expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AskRequest {
    pub question: String,
    pub rag_mode: String,
}

impl AskRequest {
    pub fn new(question: impl Into<String>, mode: RagMode) -> Self {
        Self {
            question: question.into(),
            rag_mode: mode.as_str().to_string(),
        }
    }
}

/// Page reference on an image hit. The backend sends either a number or a
/// label such as "N/A".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PageLabel {
    Number(u64),
    Label(String),
}

impl fmt::Display for PageLabel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLabel::Number(number) => write!(formatter, "{number}"),
            PageLabel::Label(label) => formatter.write_str(label),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRef {
    pub image_path: String,
    #[serde(default)]
    pub ocr_text: Option<String>,
    pub pdf: String,
    pub page: PageLabel,
    pub score: f64,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// Response of `POST /ask`. `mode` is required: a response without it is a
/// decode failure rather than a guess (the mode drives badge rendering).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub mode: String,
    #[serde(default)]
    pub generation_time: Option<String>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// An answer together with the locally measured wall-clock duration of the
/// request, rounded to one decimal place.
#[derive(Debug, Clone)]
pub struct TimedAnswer {
    pub result: AnswerResult,
    pub elapsed_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub engine: Option<String>,
}

/// Small colored label summarizing one fact about a response. The badge strip
/// is rebuilt from scratch on every render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub color: String,
}
