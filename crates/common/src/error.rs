//! Error types for the upload path.

use thiserror::Error;

/// Top-level upload-path error type.
///
/// Every variant is reported to clients as HTTP 400 with the display message
/// as a plaintext body; callers can only tell the cases apart by message
/// text. Startup errors (missing TLS material, unreadable storage directory)
/// never reach this type — they abort the process instead.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The declared media type or the filename extension is outside the
    /// allow-list.
    #[error("Only images and PDFs are allowed!")]
    UnsupportedType,

    /// The upload exceeded the configured maximum byte size.
    #[error("File too large")]
    TooLarge,

    /// The client-supplied filename is empty, absolute, or would escape the
    /// storage directory.
    #[error("invalid filename: {0}")]
    InvalidFilename(String),

    /// The request carried no field named `file`.
    #[error("no file field in request")]
    MissingFile,

    /// The multipart body could not be parsed.
    #[error("malformed multipart body: {0}")]
    Multipart(String),

    /// Reading or writing the file on disk failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Returns the HTTP status code that should be sent for this error.
    ///
    /// Type rejection, size overflow, and disk failures all collapse to the
    /// same 400 status; the message body is the only differentiator.
    pub fn http_status(&self) -> u16 {
        match self {
            UploadError::UnsupportedType
            | UploadError::TooLarge
            | UploadError::InvalidFilename(_)
            | UploadError::MissingFile
            | UploadError::Multipart(_)
            | UploadError::Io(_) => 400,
        }
    }
}
