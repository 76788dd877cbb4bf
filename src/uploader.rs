//! Per-image upload routine: request construction, transport-level
//! retry, and delegation to the response parser.

use std::path::Path;

use base64::Engine;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::CaptionerConfig;
use crate::error::UploadError;
use crate::parser;
use crate::prompt;
use crate::types::{Platform, UploadResult};

/// Total attempts per image when the transport body is not valid JSON.
const MAX_ATTEMPTS: u32 = 3;

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Caption one image file.
///
/// Checks the file and prompt template before any network call, then
/// POSTs the prompt plus the base64-encoded image to the
/// chat-completions endpoint. A response body that fails to decode as
/// JSON is retried up to 3 total attempts; every other outcome —
/// success, non-200 status, or a parser error — is returned
/// immediately. All failures come back as data in
/// [`UploadResult::Failure`]; this function never aborts a batch.
pub async fn upload_image(
    client: &Client,
    config: &CaptionerConfig,
    path: &Path,
    platform: &Platform,
) -> UploadResult {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    info!("Processing file: {}", filename);

    if !path.is_file() {
        return UploadResult::failure(
            filename.clone(),
            platform,
            UploadError::FileNotFound(filename),
        );
    }
    if !has_image_extension(&filename) {
        return UploadResult::failure(
            filename.clone(),
            platform,
            UploadError::UnsupportedType(filename),
        );
    }

    let prompt_text = match prompt::load_prompt(&config.prompt_dir, platform) {
        Ok(text) => text,
        Err(e) => return UploadResult::failure(filename, platform, e),
    };

    let image_b64 = match read_image_base64(path) {
        Ok(b64) => b64,
        Err(e) => return UploadResult::failure(filename, platform, e),
    };

    // The data URL always declares image/jpeg; the API accepts the
    // mismatch for PNG payloads.
    let body = json!({
        "model": config.model,
        "temperature": config.temperature,
        "messages": [
            {
                "role": "user",
                "content": [
                    {"type": "text", "text": prompt_text},
                    {
                        "type": "image_url",
                        "image_url": {
                            "url": format!("data:image/jpeg;base64,{}", image_b64)
                        }
                    }
                ]
            }
        ],
    });

    let mut last_decode_error = String::new();

    for attempt in 1..=MAX_ATTEMPTS {
        let resp = match client
            .post(&config.endpoint)
            .bearer_auth(&config.api_key)
            .timeout(config.timeout)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                return UploadResult::failure(
                    filename,
                    platform,
                    UploadError::Connection(e.to_string()),
                );
            }
        };

        let status = resp.status().as_u16();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                return UploadResult::failure(
                    filename,
                    platform,
                    UploadError::Connection(e.to_string()),
                );
            }
        };

        if config.log_raw_responses {
            debug!("{}", text);
        }

        if status != 200 {
            return UploadResult::failure(
                filename,
                platform,
                UploadError::Request { status, body: text },
            );
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(decoded) => {
                return match parser::extract_payload(&decoded, platform) {
                    Ok(payload) => UploadResult::success(filename, platform, payload),
                    Err(e) => UploadResult::failure(filename, platform, e),
                };
            }
            Err(e) => {
                last_decode_error = e.to_string();
                if attempt < MAX_ATTEMPTS {
                    warn!(
                        "Attempt {}/{} for {}: response body was not valid JSON, retrying",
                        attempt, MAX_ATTEMPTS, filename
                    );
                }
            }
        }
    }

    UploadResult::failure(
        filename,
        platform,
        UploadError::JsonDecode {
            attempts: MAX_ATTEMPTS,
            last_error: last_decode_error,
        },
    )
}

fn has_image_extension(filename: &str) -> bool {
    let lowered = filename.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
}

fn read_image_base64(path: &Path) -> Result<String, UploadError> {
    let bytes = std::fs::read(path)
        .map_err(|e| UploadError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(&bytes))
}
