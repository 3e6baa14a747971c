use crate::error::ImageError;
use std::path::Path;
use tracing::debug;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const API_BASE_VAR: &str = "OPENAI_BASE_URL";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_ENV_FILE: &str = "/home/walub/projects/Personal_AI_Infrastructure/.env";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub image: ImageSettings,
}

/// Fixed generation parameters sent with every request.
#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub model: String,
    pub size: String,
    pub quality: String,
    pub n: u8,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            model: "gpt-image-1".to_string(),
            // Landscape HD
            size: "1536x1024".to_string(),
            quality: "high".to_string(),
            n: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ImageError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ImageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ImageError::MissingCredential {
                var: API_KEY_VAR.to_string(),
            })?;

        let api_base = lookup(API_BASE_VAR)
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Config {
            api_key,
            api_base,
            image: ImageSettings::default(),
        })
    }
}

/// Loads variables from `path` without overriding ones already set.
/// `Ok(false)` means the file does not exist.
pub fn load_env_file(path: &Path) -> Result<bool, dotenvy::Error> {
    if !path.exists() {
        return Ok(false);
    }
    dotenvy::from_path(path)?;
    debug!("Loaded environment from {}", path.display());
    Ok(true)
}
