//! # pixtral-captions
//!
//! Batch image captioning and tagging for social platforms via the
//! Mistral Pixtral vision API.
//!
//! Points the Pixtral chat-completions endpoint at every image in a
//! directory, asks for platform-specific output using a prompt
//! template (`<platform>-prompt.txt`), validates the model's JSON
//! answer against the platform's schema, and appends the successful
//! results to a flat `captions.txt` log.
//!
//! ## Features
//!
//! - **Two response schemas** — generic `{caption, tags}` objects for
//!   platforms like Flickr and Instagram, and subreddit/caption lists
//!   for Reddit
//! - **Fence-tolerant parsing** — the model may or may not wrap its
//!   JSON answer in a markdown code fence
//! - **Bounded retry** — up to 3 attempts when the transport returns
//!   unparseable data; schema and content errors are never retried
//! - **Failure isolation** — one bad file never stops the batch; every
//!   outcome is captured as an [`UploadResult`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixtral_captions::{batch, writer, CaptionerConfig, Platform};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CaptionerConfig::new(std::env::var("MISTRAL_API_KEY")?);
//!     let client = reqwest::Client::new();
//!
//!     let results = batch::caption_directory(
//!         &client,
//!         &config,
//!         Path::new("photos"),
//!         &Platform::new("flickr"),
//!     ).await?;
//!
//!     writer::save_captions(&results, Path::new("captions.txt"))?;
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod parser;
pub mod prompt;
pub mod types;
pub mod uploader;
pub mod writer;

// Re-export the main types and operations at crate root
pub use batch::{caption_directory, list_images};
pub use config::{load_env, CaptionerConfig, EnvSettings};
pub use error::UploadError;
pub use parser::{extract_payload, strip_code_fences};
pub use prompt::load_prompt;
pub use types::{BatchResults, CaptionPayload, Platform, SubredditEntry, UploadResult};
pub use uploader::upload_image;
pub use writer::save_captions;
