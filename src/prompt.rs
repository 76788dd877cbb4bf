use std::path::Path;

use crate::error::UploadError;
use crate::types::Platform;

/// Load the instruction template for a platform from
/// `<dir>/<platform>-prompt.txt`.
///
/// A missing file is a [`UploadError::PromptNotFound`]; any other read
/// failure surfaces the path alongside the I/O error.
pub fn load_prompt(dir: &Path, platform: &Platform) -> Result<String, UploadError> {
    let path = dir.join(platform.prompt_filename());
    match std::fs::read_to_string(&path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(UploadError::PromptNotFound(path.display().to_string()))
        }
        Err(e) => Err(UploadError::PromptNotFound(format!(
            "{}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_platform_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("flickr-prompt.txt"), "Describe the photo.").unwrap();

        let prompt = load_prompt(dir.path(), &Platform::new("flickr")).unwrap();
        assert_eq!(prompt, "Describe the photo.");
    }

    #[test]
    fn missing_template_is_prompt_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_prompt(dir.path(), &Platform::new("reddit")).unwrap_err();
        match &err {
            UploadError::PromptNotFound(path) => {
                assert!(path.ends_with("reddit-prompt.txt"));
            }
            other => panic!("Expected PromptNotFound, got {:?}", other),
        }
        assert!(err.to_string().contains("PromptNotFoundError"));
    }
}
