//! Upload validation: declared media type and filename extension against a
//! fixed allow-list.
//!
//! Purely label-based — the file's actual bytes are never inspected, so the
//! check trusts whatever the client declares. This mirrors the accepted
//! behaviour of the service; swapping in magic-byte sniffing would change
//! what clients observe.

use std::path::Path;

use common::UploadError;

/// File types accepted by the service: images and PDFs.
const ALLOWED_TYPES: [&str; 5] = ["jpg", "jpeg", "png", "gif", "pdf"];

/// Accept or reject an upload from its declared media type and filename.
///
/// Accepts iff the lowercased media type contains one of the allowed tokens
/// (`"image/jpeg"` matches `jpeg`, `"application/pdf"` matches `pdf`) AND
/// the filename's extension, case-insensitively, is one of the allowed
/// extensions. Both conditions are necessary.
///
/// # Errors
///
/// Returns [`UploadError::UnsupportedType`] when either condition fails.
pub fn check(content_type: &str, filename: &str) -> Result<(), UploadError> {
    let media = content_type.to_ascii_lowercase();
    let media_ok = ALLOWED_TYPES.iter().any(|t| media.contains(t));

    let ext_ok = extension(filename)
        .map(|e| ALLOWED_TYPES.contains(&e.as_str()))
        .unwrap_or(false);

    if media_ok && ext_ok {
        Ok(())
    } else {
        Err(UploadError::UnsupportedType)
    }
}

/// The filename's extension, lowercased. `None` when there is no extension.
fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
