use crate::error::{AppError, AppResult};
use crate::models::{PosterRequest, PosterResponse};
use crate::services::GeminiClient;

const DEFAULT_TITLE: &str = "Yoga Class";

const CLOSING: &str = " The poster should be suitable for digital sharing and print. \
                       Use high-quality imagery related to yoga practice, wellness, and mindfulness.";

fn style_clause(style: &str) -> Option<&'static str> {
    match style {
        "Calm & Minimal" => Some(
            "Use a calm, minimal design with soft colors, plenty of white space, and gentle typography. \
             Think serene and peaceful.",
        ),
        "Energetic" => Some(
            "Use vibrant, energetic colors with dynamic composition and bold typography. \
             Think movement and vitality.",
        ),
        "Meditative" => Some(
            "Use deep, grounding colors with contemplative imagery and elegant typography. \
             Think stillness and introspection.",
        ),
        _ => None,
    }
}

fn poster_type_clause(poster_type: &str) -> Option<&'static str> {
    match poster_type {
        "Class Announcement" => Some(
            " Include space for class details like date, time, and instructor name. \
             Make it inviting and welcoming.",
        ),
        "Event Poster" => Some(
            " Create an eye-catching event poster with clear event information and compelling visuals.",
        ),
        "Workshop Flyer" => {
            Some(" Design a workshop flyer that highlights the learning outcomes and benefits.")
        }
        _ => None,
    }
}

/// Image prompt for a studio poster. Unknown styles and poster types add nothing.
pub fn build_poster_prompt(request: &PosterRequest) -> String {
    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE);

    let mut prompt = format!("Create a professional yoga poster for \"{}\"", title);

    if let Some(description) = request.description.as_deref().filter(|d| !d.trim().is_empty()) {
        prompt.push_str(&format!(". Description: {}", description.trim()));
    }

    if let Some(clause) = request.style.as_deref().and_then(style_clause) {
        prompt.push_str(&format!(". {}", clause));
    }

    if let Some(clause) = request.poster_type.as_deref().and_then(poster_type_clause) {
        prompt.push_str(clause);
    }

    prompt.push_str(CLOSING);
    prompt
}

#[derive(Debug, Clone)]
pub struct PosterService {
    gemini: Option<GeminiClient>,
}

impl PosterService {
    pub fn new(gemini: Option<GeminiClient>) -> Self {
        Self { gemini }
    }

    pub async fn generate_poster(&self, request: PosterRequest) -> AppResult<PosterResponse> {
        let gemini = self.gemini.as_ref().ok_or(AppError::AiNotConfigured)?;
        let prompt = build_poster_prompt(&request);

        let image = gemini
            .generate_image(&prompt)
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?
            .ok_or_else(|| AppError::Upstream("No image data in response".to_string()))?;

        tracing::info!(mime_type = %image.mime_type, "poster generated");

        Ok(PosterResponse {
            success: true,
            image_data: image.data,
            mime_type: image.mime_type,
            prompt,
        })
    }
}
