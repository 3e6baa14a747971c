use crate::config::ImageSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

// OpenAI compatible images/generations structures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub size: String,
    pub quality: String,
}

impl ImageGenerationRequest {
    pub fn new(settings: &ImageSettings, prompt: String) -> Self {
        Self {
            model: settings.model.clone(),
            prompt,
            n: settings.n,
            size: settings.size.clone(),
            quality: settings.quality.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

/// Where the image bytes live in a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    RemoteReference(String),
    InlinePayload(String),
    Unrecognized,
}

impl ImagesResponse {
    /// A URL wins over an inline payload; empty strings count as absent.
    pub fn image_source(&self) -> ImageSource {
        let Some(first) = self.data.first() else {
            return ImageSource::Unrecognized;
        };
        if let Some(url) = first.url.as_deref().filter(|u| !u.is_empty()) {
            return ImageSource::RemoteReference(url.to_string());
        }
        if let Some(b64) = first.b64_json.as_deref().filter(|b| !b.is_empty()) {
            return ImageSource::InlinePayload(b64.to_string());
        }
        ImageSource::Unrecognized
    }
}
