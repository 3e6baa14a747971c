use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
    Unknown,
}

impl ImageFormat {
    /// Detects the format from the payload's magic bytes.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            ImageFormat::Jpeg
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            ImageFormat::Png
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            ImageFormat::Webp
        } else {
            ImageFormat::Unknown
        }
    }

    pub fn extension(self) -> Option<&'static str> {
        match self {
            ImageFormat::Jpeg => Some("jpg"),
            ImageFormat::Png => Some("png"),
            ImageFormat::Webp => Some("webp"),
            ImageFormat::Unknown => None,
        }
    }

    /// True when `path`'s extension names this format. Unknown payloads and
    /// extensionless paths always match.
    pub fn matches_path(self, path: &Path) -> bool {
        let Some(expected) = self.extension() else {
            return true;
        };
        let Some(actual) = path.extension().and_then(|e| e.to_str()) else {
            return true;
        };
        let actual = actual.to_ascii_lowercase();
        match self {
            ImageFormat::Jpeg => actual == "jpg" || actual == "jpeg",
            _ => actual == expected,
        }
    }
}
