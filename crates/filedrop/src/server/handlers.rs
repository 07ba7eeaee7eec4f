//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::UploadError;
use tracing::{info, warn};

use super::state::AppState;
use crate::validate;

/// Multipart field the uploaded file is read from.
const FILE_FIELD: &str = "file";

/// Fixed confirmation body returned on a successful upload.
const UPLOAD_OK: &str = "File uploaded successfully!";

/// `POST /upload` — accept one multipart file upload and store it to disk.
///
/// The file is taken from the first field named `file`; other form fields
/// are read and ignored. The declared media type and filename extension are
/// checked against the allow-list before any byte reaches disk, and the
/// configured size limit is enforced while streaming.
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Response {
    match receive_file(&state, multipart).await {
        Ok(stored) => {
            info!(filename = %stored.filename, bytes = stored.bytes, "file uploaded");
            (StatusCode::OK, UPLOAD_OK).into_response()
        }
        Err(e) => {
            warn!(error = %e, "upload rejected");
            error_response(&e)
        }
    }
}

/// `GET /healthcheck` — process-liveness signal.
///
/// Always `200 "okk"`, regardless of storage or TLS state. Not a readiness
/// check: disk space and directory writability are never inspected.
pub async fn healthcheck() -> &'static str {
    "okk"
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}

/// Terminal error responder for the upload path.
///
/// Maps any [`UploadError`] to its (uniform) status code with the error's
/// message as a plaintext body.
fn error_response(err: &UploadError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::BAD_REQUEST);
    (status, err.to_string()).into_response()
}

/// A successfully stored upload, for logging.
struct StoredUpload {
    filename: String,
    bytes: u64,
}

/// Walk the multipart body, store the first `file` field, ignore the rest.
async fn receive_file(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<StoredUpload, UploadError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            // Non-file form fields are permitted and ignored.
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| UploadError::InvalidFilename("missing filename".into()))?;
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();

        validate::check(&content_type, &filename)?;

        let mut sink = state.storage.create(&filename).await?;
        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    sink.abort().await;
                    return Err(UploadError::Multipart(e.to_string()));
                }
            };

            if sink.written() + chunk.len() as u64 > state.max_upload_bytes {
                sink.abort().await;
                return Err(UploadError::TooLarge);
            }
            if let Err(e) = sink.append(&chunk).await {
                sink.abort().await;
                return Err(e);
            }
        }

        let bytes = sink.finish().await?;
        return Ok(StoredUpload { filename, bytes });
    }

    Err(UploadError::MissingFile)
}
