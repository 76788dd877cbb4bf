//! Flat-file persistence of successful captioning results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::{BatchResults, CaptionPayload, UploadResult};

/// Write successful results to `path`, replacing any previous content.
///
/// Each record is four lines terminated by a `---` separator:
/// filename, caption, then either the space-joined tags (generic
/// platforms) or the subreddit (one record per suggested subreddit).
/// Failures are skipped; they are visible only in the run's logs.
pub fn save_captions(results: &BatchResults, path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    for (filename, result) in results {
        let payload = match result {
            UploadResult::Success { payload, .. } => payload,
            UploadResult::Failure { .. } => continue,
        };
        match payload {
            CaptionPayload::Tags { caption, tags } => {
                writeln!(out, "{}\n{}\n{}\n---", filename, caption, tags.join(" "))?;
            }
            CaptionPayload::Subreddits { entries } => {
                for entry in entries {
                    writeln!(
                        out,
                        "{}\n{}\n{}\n---",
                        filename, entry.caption, entry.subreddit
                    )?;
                }
            }
        }
    }

    out.flush()
}
