use thiserror::Error;

/// Everything that can go wrong while captioning a single image.
///
/// Display messages carry a stable class prefix (e.g. `JsonDecodeError:`)
/// so a failure is still identifiable after it has been flattened into
/// the error text of an [`UploadResult::Failure`](crate::UploadResult).
///
/// Only [`UploadError::JsonDecode`] is ever retried; the pre-network
/// variants (`FileNotFound`, `UnsupportedType`, `PromptNotFound`) fail
/// before any request is sent.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("FileNotFoundError: {0}")]
    FileNotFound(String),

    #[error("UnsupportedTypeError: {0} is not a supported image type")]
    UnsupportedType(String),

    #[error("PromptNotFoundError: missing prompt file {0}")]
    PromptNotFound(String),

    #[error("ConnectionError: {0}")]
    Connection(String),

    #[error("RequestError: HTTP {status}: {body}")]
    Request { status: u16, body: String },

    #[error("EmptyChoicesError: response contained no choices")]
    EmptyChoices,

    #[error("EmptyContentError: choice message content was empty")]
    EmptyContent,

    #[error("InvalidJsonError: {0}")]
    InvalidJson(String),

    #[error("SchemaValidationError: {0}")]
    SchemaValidation(String),

    #[error("JsonDecodeError: response body was not valid JSON after {attempts} attempts: {last_error}")]
    JsonDecode { attempts: u32, last_error: String },
}
