use crate::models::{AnswerResult, Badge, ImageRef};
use pulldown_cmark::{html, Parser};

pub const BASE_BADGE_TEXTS: [&str; 2] = ["WURTH-SPECIFIED", "CATALOG-MATCHED"];
pub const NO_MATCHES_MESSAGE: &str =
    "No catalog images matched this query. The analysis above covers the closest component families.";
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/320x200?text=Catalog+Preview";

const BADGE_NEUTRAL: &str = "#0f172a";
const RELEVANCE_GOOD: &str = "#10b981";
const RELEVANCE_WEAK: &str = "#f97316";
const ENTITY_COLOR: &str = "#8b5cf6";
const CAPTION_PLACEHOLDER: &str = "Catalog illustration";
const CAPTION_CHARS: usize = 50;
const ENTITY_BADGE_CAP: usize = 2;
const RELEVANCE_THRESHOLD: f64 = 0.6;
const IMAGE_ROUTE: &str = "/images";
const PATH_MARKER: &str = "Data";

/// One visual-result tile: image source, caption, source metadata, and an
/// optional link back to the catalog page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCard {
    pub src: String,
    pub caption: String,
    pub meta: String,
    pub link: Option<String>,
}

/// Explicit view-model for one completed search. Built wholesale by
/// [`render_results`] and replaced on the next search; surfaces read it, they
/// never patch it.
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub answer_markdown: String,
    pub answer_html: String,
    pub timing: String,
    pub badges: Vec<Badge>,
    pub cards: Vec<ImageCard>,
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(markdown));
    out
}

pub fn base_badges() -> Vec<Badge> {
    BASE_BADGE_TEXTS
        .iter()
        .map(|text| Badge {
            text: (*text).to_string(),
            color: BADGE_NEUTRAL.to_string(),
        })
        .collect()
}

/// Badge strip for a response: the two base badges, any mode-specific badge,
/// and a trailing badge with the uppercased mode.
pub fn compute_badges(result: &AnswerResult) -> Vec<Badge> {
    let mut badges = base_badges();

    if result.mode == "corrective" {
        if let Some(score) = result.relevance_score {
            let color = if score > RELEVANCE_THRESHOLD {
                RELEVANCE_GOOD
            } else {
                RELEVANCE_WEAK
            };
            badges.push(Badge {
                text: format!("RELEVANCE: {score:.2}"),
                color: color.to_string(),
            });
        }
    } else if result.mode == "speculative" && !result.entities.is_empty() {
        for entity in result.entities.iter().take(ENTITY_BADGE_CAP) {
            badges.push(Badge {
                text: format!("ENTITY: {entity}"),
                color: ENTITY_COLOR.to_string(),
            });
        }
    }

    badges.push(Badge {
        text: format!("MODE: {}", result.mode.to_uppercase()),
        color: BADGE_NEUTRAL.to_string(),
    });

    badges
}

/// Rewrite a backend-supplied image path onto the local static route. Paths
/// containing a `Data` segment are reduced to their file name (the backend
/// stores extracted images in a flat directory served at `/images`); anything
/// else passes through untouched, which makes the rewrite idempotent.
pub fn rewrite_image_path(raw: &str) -> String {
    let segments: Vec<&str> = raw.split(['/', '\\']).collect();
    if !segments.iter().any(|segment| *segment == PATH_MARKER) {
        return raw.to_string();
    }

    let file_name = segments
        .iter()
        .rev()
        .find(|segment| !segment.is_empty())
        .copied()
        .unwrap_or(raw);
    format!("{IMAGE_ROUTE}/{file_name}")
}

/// Timing line: the backend's own figure wins over the locally measured one.
pub fn timing_text(generation_time: Option<&str>, elapsed_secs: f64) -> String {
    match generation_time {
        Some(time) => time.to_string(),
        None => format!("{elapsed_secs:.1}s"),
    }
}

pub fn image_caption(ocr_text: Option<&str>) -> String {
    match ocr_text.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => {
            let prefix: String = text.chars().take(CAPTION_CHARS).collect();
            format!("\"{prefix}...\"")
        }
        None => CAPTION_PLACEHOLDER.to_string(),
    }
}

pub fn image_card(image: &ImageRef) -> ImageCard {
    ImageCard {
        src: rewrite_image_path(&image.image_path),
        caption: image_caption(image.ocr_text.as_deref()),
        meta: format!(
            "{} | Page {} | Score {:.2}",
            image.pdf, image.page, image.score
        ),
        link: image.pdf_url.clone(),
    }
}

/// Pure presentation step: build the full view-model for one response. No
/// network, no shared state.
pub fn render_results(result: &AnswerResult, elapsed_secs: f64) -> ResultsView {
    ResultsView {
        answer_markdown: result.answer.clone(),
        answer_html: markdown_to_html(&result.answer),
        timing: timing_text(result.generation_time.as_deref(), elapsed_secs),
        badges: compute_badges(result),
        cards: result.images.iter().map(image_card).collect(),
    }
}

impl ResultsView {
    /// Emit the three result regions as an HTML fragment. The answer HTML is
    /// trusted as-is (it comes from the markdown renderer); every other
    /// dynamic string is escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<div id=\"resultsArea\">\n");
        out.push_str(&format!(
            "  <div id=\"aiResponse\">{}</div>\n",
            self.answer_html
        ));
        out.push_str(&format!(
            "  <p id=\"timingInfo\">Generated in {}</p>\n",
            escape_html(&self.timing)
        ));

        out.push_str("  <div id=\"badgesContainer\">");
        for badge in &self.badges {
            out.push_str(&format!(
                "<span class=\"status-badge\" style=\"color: {};\">{}</span>",
                escape_html(&badge.color),
                escape_html(&badge.text)
            ));
        }
        out.push_str("</div>\n");

        out.push_str("  <div id=\"imageGallery\">\n");
        if self.cards.is_empty() {
            out.push_str(&format!(
                "    <p class=\"no-matches\" style=\"grid-column: 1 / -1; text-align: center;\">{}</p>\n",
                escape_html(NO_MATCHES_MESSAGE)
            ));
        } else {
            for card in &self.cards {
                out.push_str("    <div class=\"result-card\">\n");
                out.push_str(&format!(
                    "      <img src=\"{}\" onerror=\"this.src='{}'\">\n",
                    escape_html(&card.src),
                    PLACEHOLDER_IMAGE
                ));
                out.push_str(&format!(
                    "      <p class=\"caption\">{}</p>\n",
                    escape_html(&card.caption)
                ));
                out.push_str(&format!(
                    "      <p class=\"meta\">{}</p>\n",
                    escape_html(&card.meta)
                ));
                if let Some(link) = &card.link {
                    out.push_str(&format!(
                        "      <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Open catalog page</a>\n",
                        escape_html(link)
                    ));
                }
                out.push_str("    </div>\n");
            }
        }
        out.push_str("  </div>\n</div>\n");
        out
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
