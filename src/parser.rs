//! Model response parsing and schema validation.
//!
//! Chat-completion replies carry the model's answer as free text in
//! the first choice's message content, optionally wrapped in a
//! markdown code fence. The answer is expected to be JSON in one of
//! two shapes:
//!
//! - generic platforms: an object `{"caption": ..., "tags": [...]}`
//! - reddit: an array of `{"subreddit": ..., "caption": ...}` objects

use serde::Deserialize;
use serde_json::Value;

use crate::error::UploadError;
use crate::types::{CaptionPayload, Platform, SubredditEntry};

#[derive(Deserialize)]
struct TagsReply {
    caption: String,
    tags: Vec<String>,
}

/// Extract the platform payload from a decoded chat-completion body.
///
/// Walks `choices[0].message.content`, strips an optional code fence,
/// decodes the remainder as JSON and validates it against the
/// platform's schema. Field values and ordering are preserved exactly
/// as the model returned them.
pub fn extract_payload(body: &Value, platform: &Platform) -> Result<CaptionPayload, UploadError> {
    let choices = body
        .get("choices")
        .and_then(Value::as_array)
        .filter(|c| !c.is_empty())
        .ok_or(UploadError::EmptyChoices)?;

    let content = choices[0]
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("");
    if content.is_empty() {
        return Err(UploadError::EmptyContent);
    }

    let unfenced = strip_code_fences(content);
    let value: Value = serde_json::from_str(unfenced)
        .map_err(|e| UploadError::InvalidJson(e.to_string()))?;

    if platform.is_reddit() {
        let entries: Vec<SubredditEntry> = serde_json::from_value(value)
            .map_err(|e| UploadError::SchemaValidation(e.to_string()))?;
        Ok(CaptionPayload::Subreddits { entries })
    } else {
        let reply: TagsReply = serde_json::from_value(value)
            .map_err(|e| UploadError::SchemaValidation(e.to_string()))?;
        Ok(CaptionPayload::Tags {
            caption: reply.caption,
            tags: reply.tags,
        })
    }
}

/// Strip one leading code fence (language-tagged or bare) and one
/// trailing fence, if present.
///
/// Deliberately tolerant rather than exhaustive: nothing is trimmed
/// first and fence placement is not validated, so partially fenced
/// content falls through to the JSON decode and fails there.
pub fn strip_code_fences(content: &str) -> &str {
    let mut s = content;
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_body(content: &str) -> Value {
        serde_json::json!({
            "choices": [{"message": {"content": content}}]
        })
    }

    // ── Fence stripping ──

    #[test]
    fn strips_language_tagged_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "\n{\"a\":1}\n");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fences("```\n[1,2]\n```"), "\n[1,2]\n");
    }

    #[test]
    fn leaves_unfenced_content_alone() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn strips_only_one_fence_per_side() {
        // No pre-trim and no placement validation: a fence after
        // leading whitespace is not recognized.
        assert_eq!(strip_code_fences("  ```json\n{}\n```"), "  ```json\n{}\n");
    }

    // ── Generic caption/tags schema ──

    #[test]
    fn parses_unfenced_tags_reply() {
        let body = reply_body(r#"{"caption": "Old pier at dusk", "tags": ["pier", "dusk", "sea"]}"#);
        let payload = extract_payload(&body, &Platform::new("flickr")).unwrap();
        assert_eq!(
            payload,
            CaptionPayload::Tags {
                caption: "Old pier at dusk".to_string(),
                tags: vec!["pier".to_string(), "dusk".to_string(), "sea".to_string()],
            }
        );
    }

    #[test]
    fn parses_fenced_tags_reply() {
        let body = reply_body(
            "```json\n{\"caption\":\"Mist over stone walls\",\"tags\":[\"ruins\",\"fog\"]}\n```",
        );
        let payload = extract_payload(&body, &Platform::new("instagram")).unwrap();
        assert_eq!(
            payload,
            CaptionPayload::Tags {
                caption: "Mist over stone walls".to_string(),
                tags: vec!["ruins".to_string(), "fog".to_string()],
            }
        );
    }

    #[test]
    fn parses_bare_fenced_tags_reply() {
        let body = reply_body("```\n{\"caption\":\"c\",\"tags\":[\"t\"]}\n```");
        let payload = extract_payload(&body, &Platform::new("flickr")).unwrap();
        match payload {
            CaptionPayload::Tags { caption, tags } => {
                assert_eq!(caption, "c");
                assert_eq!(tags, vec!["t"]);
            }
            _ => panic!("Expected Tags payload"),
        }
    }

    #[test]
    fn preserves_tag_order_and_case() {
        let body = reply_body(r#"{"caption": "c", "tags": ["Zebra", "apple", "Moss"]}"#);
        let payload = extract_payload(&body, &Platform::new("flickr")).unwrap();
        match payload {
            CaptionPayload::Tags { tags, .. } => {
                assert_eq!(tags, vec!["Zebra", "apple", "Moss"]);
            }
            _ => panic!("Expected Tags payload"),
        }
    }

    #[test]
    fn tags_reply_missing_tags_fails_schema() {
        let body = reply_body(r#"{"caption": "no tags here"}"#);
        let err = extract_payload(&body, &Platform::new("flickr")).unwrap_err();
        match &err {
            UploadError::SchemaValidation(msg) => assert!(msg.contains("tags")),
            other => panic!("Expected SchemaValidation, got {:?}", other),
        }
    }

    #[test]
    fn tags_reply_missing_caption_fails_schema() {
        let body = reply_body(r#"{"tags": ["a"]}"#);
        assert!(matches!(
            extract_payload(&body, &Platform::new("flickr")),
            Err(UploadError::SchemaValidation(_))
        ));
    }

    #[test]
    fn tags_reply_with_non_string_tag_fails_schema() {
        let body = reply_body(r#"{"caption": "c", "tags": ["ok", 3]}"#);
        assert!(matches!(
            extract_payload(&body, &Platform::new("flickr")),
            Err(UploadError::SchemaValidation(_))
        ));
    }

    #[test]
    fn tags_array_reply_fails_schema_for_generic_platform() {
        let body = reply_body(r#"[{"subreddit": "r/pics", "caption": "c"}]"#);
        assert!(matches!(
            extract_payload(&body, &Platform::new("flickr")),
            Err(UploadError::SchemaValidation(_))
        ));
    }

    // ── Reddit schema ──

    #[test]
    fn parses_reddit_reply_preserving_order() {
        let body = reply_body(
            r#"[{"subreddit": "r/AbandonedPorn", "caption": "first"},
                {"subreddit": "r/urbex", "caption": "second"}]"#,
        );
        let payload = extract_payload(&body, &Platform::new("reddit")).unwrap();
        match payload {
            CaptionPayload::Subreddits { entries } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].subreddit, "r/AbandonedPorn");
                assert_eq!(entries[0].caption, "first");
                assert_eq!(entries[1].subreddit, "r/urbex");
                assert_eq!(entries[1].caption, "second");
            }
            _ => panic!("Expected Subreddits payload"),
        }
    }

    #[test]
    fn parses_fenced_reddit_reply() {
        let body = reply_body("```json\n[{\"subreddit\": \"r/pics\", \"caption\": \"c\"}]\n```");
        let payload = extract_payload(&body, &Platform::new("reddit")).unwrap();
        assert!(matches!(payload, CaptionPayload::Subreddits { .. }));
    }

    #[test]
    fn reddit_entry_missing_subreddit_fails_schema() {
        let body = reply_body(
            r#"[{"subreddit": "r/pics", "caption": "ok"}, {"caption": "no subreddit"}]"#,
        );
        let err = extract_payload(&body, &Platform::new("reddit")).unwrap_err();
        match &err {
            UploadError::SchemaValidation(msg) => assert!(msg.contains("subreddit")),
            other => panic!("Expected SchemaValidation, got {:?}", other),
        }
    }

    #[test]
    fn reddit_object_reply_fails_schema() {
        let body = reply_body(r#"{"caption": "c", "tags": ["t"]}"#);
        assert!(matches!(
            extract_payload(&body, &Platform::new("reddit")),
            Err(UploadError::SchemaValidation(_))
        ));
    }

    // ── Envelope errors ──

    #[test]
    fn empty_choices_array_fails() {
        let body = serde_json::json!({"choices": []});
        assert!(matches!(
            extract_payload(&body, &Platform::new("flickr")),
            Err(UploadError::EmptyChoices)
        ));
    }

    #[test]
    fn missing_choices_key_fails() {
        let body = serde_json::json!({"object": "chat.completion"});
        assert!(matches!(
            extract_payload(&body, &Platform::new("flickr")),
            Err(UploadError::EmptyChoices)
        ));
    }

    #[test]
    fn empty_content_fails() {
        let body = reply_body("");
        assert!(matches!(
            extract_payload(&body, &Platform::new("flickr")),
            Err(UploadError::EmptyContent)
        ));
    }

    #[test]
    fn missing_content_key_fails_as_empty_content() {
        let body = serde_json::json!({"choices": [{"message": {}}]});
        assert!(matches!(
            extract_payload(&body, &Platform::new("flickr")),
            Err(UploadError::EmptyContent)
        ));
    }

    #[test]
    fn non_json_content_fails_as_invalid_json() {
        let body = reply_body("Sorry, I cannot caption this image.");
        let err = extract_payload(&body, &Platform::new("flickr")).unwrap_err();
        match &err {
            UploadError::InvalidJson(_) => {}
            other => panic!("Expected InvalidJson, got {:?}", other),
        }
        assert!(err.to_string().contains("InvalidJsonError"));
    }

    #[test]
    fn half_fenced_content_fails_as_invalid_json() {
        // Leading fence without a closing one leaves no valid JSON.
        let body = reply_body("```json\n{\"caption\": \"c\", \"tags\": [\"t\"]");
        assert!(matches!(
            extract_payload(&body, &Platform::new("flickr")),
            Err(UploadError::InvalidJson(_))
        ));
    }
}
