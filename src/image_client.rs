use crate::config::Config;
use crate::error::{ApiError, ImageError};
use crate::models::{ErrorResponse, ImageGenerationRequest, ImagesResponse};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Parsed provider reply plus the raw JSON text it came from.
#[derive(Debug, Clone)]
pub struct GenerationReply {
    pub images: ImagesResponse,
    pub raw: String,
}

#[derive(Debug)]
pub struct ImageClient {
    http_client: Arc<reqwest::Client>,
    api_base: String,
    api_key: String,
}

impl ImageClient {
    pub fn new(http_client: Arc<reqwest::Client>, config: &Config) -> Self {
        Self {
            http_client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn build_target_url(api_base: &str) -> String {
        let path = "images/generations";
        if api_base.ends_with('/') {
            format!("{}{}", api_base, path)
        } else {
            format!("{}/{}", api_base, path)
        }
    }

    pub async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<GenerationReply, ImageError> {
        let target_url = Self::build_target_url(&self.api_base);
        info!("Requesting {} image(s) from: {}", request.n, target_url);

        let response = self
            .http_client
            .post(&target_url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ImageError::generation_failed("calling the image API", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ImageError::generation_failed("reading the image API response", e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => err.error.message,
                Err(_) => truncate(&body, 500),
            };
            return Err(ImageError::generation_failed(
                "calling the image API",
                ApiError { status: status.as_u16(), message },
            ));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ImageError::generation_failed("parsing the image API response", e))?;
        debug!("API Response: {}", redact_payloads(&value));

        // A JSON body that doesn't fit the images shape is reported with the raw text.
        let images: ImagesResponse = match serde_json::from_value(value) {
            Ok(images) => images,
            Err(e) => {
                debug!("Response did not match images schema: {}", e);
                return Err(ImageError::UnexpectedResponse { raw: truncate(&body, 2000) });
            }
        };

        Ok(GenerationReply { images, raw: body })
    }

    pub async fn fetch_image(&self, url: &str) -> Result<Bytes, ImageError> {
        info!("Downloading image from: {}", url);
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ImageError::generation_failed("downloading the image", e))?;

        response
            .bytes()
            .await
            .map_err(|e| ImageError::generation_failed("downloading the image", e))
    }
}

/// Replaces inline image payloads with their length so responses stay loggable.
pub fn redact_payloads(value: &Value) -> Value {
    let mut value = value.clone();
    if let Some(items) = value.get_mut("data").and_then(Value::as_array_mut) {
        for item in items {
            if let Some(b64) = item.get_mut("b64_json") {
                if let Some(len) = b64.as_str().map(str::len) {
                    *b64 = Value::String(format!("<{} base64 chars>", len));
                }
            }
        }
    }
    value
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        match s.char_indices().nth(max_len) {
            None => s.to_string(),
            Some((idx, _)) => format!("{}…", &s[..idx]),
        }
    }
}
