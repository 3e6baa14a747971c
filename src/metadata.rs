use crate::error::ImageError;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

// Bullet marker, label, then the rest of the line. Not anchored to line start.
static IMAGE_PROMPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-*][ \t]*image_prompt:[ \t]*(.+)").expect("image_prompt pattern is valid")
});

/// Scene text taken from a post's `image_prompt` metadata line. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenePrompt(String);

impl ScenePrompt {
    pub fn new(value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| ScenePrompt(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenePrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the trimmed value of the first `image_prompt:` line with a non-blank value.
pub fn find_image_prompt(content: &str) -> Option<ScenePrompt> {
    IMAGE_PROMPT_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| ScenePrompt::new(m.as_str()))
}

pub fn extract_image_prompt(markdown_file: &Path) -> Result<ScenePrompt, ImageError> {
    let content =
        std::fs::read_to_string(markdown_file).map_err(|source| ImageError::FileNotFound {
            path: markdown_file.to_path_buf(),
            source,
        })?;

    match find_image_prompt(&content) {
        Some(prompt) => {
            debug!("Found image_prompt in {}: {}", markdown_file.display(), prompt);
            Ok(prompt)
        }
        None => Err(ImageError::MissingField {
            path: markdown_file.to_path_buf(),
        }),
    }
}
