use crate::config::ImageSettings;
use crate::error::ImageError;
use crate::image_client::ImageClient;
use crate::image_format::ImageFormat;
use crate::metadata::ScenePrompt;
use crate::models::{ImageGenerationRequest, ImageSource};
use crate::prompt::build_prompt;
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Generates one image for `scene` and writes it to `output_path`.
///
/// The URL in the response is preferred over an inline payload. Parent
/// directories are created and an existing file is overwritten.
pub async fn generate_image(
    client: &ImageClient,
    settings: &ImageSettings,
    scene: &ScenePrompt,
    output_path: &Path,
) -> Result<PathBuf, ImageError> {
    let request = ImageGenerationRequest::new(settings, build_prompt(scene));
    let reply = client.generate(&request).await?;

    let image_bytes: Bytes = match reply.images.image_source() {
        ImageSource::RemoteReference(url) => {
            info!("Image URL: {}", url);
            client.fetch_image(&url).await?
        }
        ImageSource::InlinePayload(b64) => {
            let decoded = STANDARD
                .decode(b64.trim())
                .map_err(|e| ImageError::generation_failed("decoding the inline image", e))?;
            Bytes::from(decoded)
        }
        ImageSource::Unrecognized => {
            return Err(ImageError::UnexpectedResponse { raw: reply.raw });
        }
    };

    let format = ImageFormat::sniff(&image_bytes);
    if !format.matches_path(output_path) {
        warn!(
            "Provider returned {:?} data but {} has a different extension; writing as-is",
            format,
            output_path.display()
        );
    }

    write_image(output_path, &image_bytes).await?;
    info!("Image saved to: {} ({} bytes)", output_path.display(), image_bytes.len());
    Ok(output_path.to_path_buf())
}

async fn write_image(output_path: &Path, bytes: &[u8]) -> Result<(), ImageError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ImageError::generation_failed("creating the output directory", e))?;
    }
    tokio::fs::write(output_path, bytes)
        .await
        .map_err(|e| ImageError::generation_failed("writing the image file", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use std::sync::Arc;

    const JPEG_BYTES: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0xFF, 0xD9,
    ];

    fn test_client(api_base: &str) -> ImageClient {
        let config = Config {
            api_key: "sk-test".to_string(),
            api_base: api_base.to_string(),
            image: ImageSettings::default(),
        };
        ImageClient::new(Arc::new(reqwest::Client::new()), &config)
    }

    fn scene() -> ScenePrompt {
        ScenePrompt::new("a sunrise over hills").unwrap()
    }

    #[tokio::test]
    async fn test_inline_payload_written_with_parent_dirs() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/images/generations")
            .match_body(mockito::Matcher::Regex("SCENE: a sunrise over hills".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"created": 1, "data": [{"b64_json": STANDARD.encode(JPEG_BYTES)}]})
                    .to_string(),
            )
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("deeper").join("out.jpg");

        let client = test_client(&server.url());
        let written = generate_image(&client, &ImageSettings::default(), &scene(), &output)
            .await
            .unwrap();

        assert_eq!(written, output);
        assert_eq!(std::fs::read(&output).unwrap(), JPEG_BYTES);
    }

    #[tokio::test]
    async fn test_remote_reference_fetched_unchanged() {
        let mut server = mockito::Server::new_async().await;
        let image_url = format!("{}/files/img-abc.png", server.url());
        let png: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];

        let _gen = server
            .mock("POST", "/images/generations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"created": 1, "data": [{"url": image_url}]}).to_string())
            .create_async()
            .await;
        let _file = server
            .mock("GET", "/files/img-abc.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(png.clone())
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");

        let client = test_client(&server.url());
        generate_image(&client, &ImageSettings::default(), &scene(), &output)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), png);
    }

    #[tokio::test]
    async fn test_existing_file_is_truncated() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/images/generations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": [{"b64_json": STANDARD.encode(b"new")}]}).to_string())
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.jpg");
        std::fs::write(&output, b"a much longer previous image").unwrap();

        let client = test_client(&server.url());
        generate_image(&client, &ImageSettings::default(), &scene(), &output)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_neither_field_is_unexpected_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/images/generations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"created": 1, "data": [{"revised_prompt": "nothing here"}]}).to_string(),
            )
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.jpg");

        let client = test_client(&server.url());
        let err = generate_image(&client, &ImageSettings::default(), &scene(), &output)
            .await
            .unwrap_err();

        match err {
            ImageError::UnexpectedResponse { raw } => assert!(raw.contains("nothing here")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_empty_data_is_unexpected_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/images/generations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"created": 1, "data": []}).to_string())
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = test_client(&server.url());
        let output = dir.path().join("out.jpg");
        let err = generate_image(&client, &ImageSettings::default(), &scene(), &output)
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_invalid_base64_is_generation_failure() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/images/generations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": [{"b64_json": "not*valid*base64"}]}).to_string())
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.jpg");
        let client = test_client(&server.url());
        let err = generate_image(&client, &ImageSettings::default(), &scene(), &output)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ImageError::GenerationFailed { stage: "decoding the inline image", .. }
        ));
        assert!(!output.exists());
    }
}
