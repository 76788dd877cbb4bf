//! Directory enumeration and the sequential per-file batch loop.

use std::path::Path;

use reqwest::Client;
use tracing::{error, info};

use crate::config::CaptionerConfig;
use crate::types::{BatchResults, Platform, UploadResult};
use crate::uploader;

/// Housekeeping file kept next to the images; never captioned.
const RESERVED_FILENAME: &str = "file_list.txt";

/// List candidate files directly inside `dir`.
///
/// Subdirectories are not traversed and the reserved housekeeping file
/// is skipped. Names are sorted so runs process files in a stable
/// order.
pub fn list_images(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == RESERVED_FILENAME {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Caption every candidate file in `dir` sequentially.
///
/// One file is fully uploaded and parsed before the next begins.
/// Failures are logged and stored as data; they never stop the
/// remaining files. Results are keyed by filename in processing order.
pub async fn caption_directory(
    client: &Client,
    config: &CaptionerConfig,
    dir: &Path,
    platform: &Platform,
) -> std::io::Result<BatchResults> {
    info!("Starting caption generation for all files");

    let mut results = BatchResults::new();
    for name in list_images(dir)? {
        let result = uploader::upload_image(client, config, &dir.join(&name), platform).await;
        if let UploadResult::Failure { error, .. } = &result {
            error!("{}: {}", name, error);
        }
        results.insert(name, result);
    }

    info!("Finished caption generation for all files");
    Ok(results)
}
