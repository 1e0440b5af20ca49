use super::state::AppState;
use crate::analysis::analyze_with_timeout;
use crate::errors::error_logging;
use crate::observability;
use crate::path_validation::{content_type_for, resolve_static_image};
use crate::tiers::{tier_for_score, ResultRecord};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub const NO_FILE_PART: &str = "No file part";
pub const NO_SELECTED_FILE: &str = "No selected file";
pub const INVALID_REQUEST: &str = "Invalid request";
pub const ANALYSIS_FAILED: &str = "Image analysis failed";
pub const FILE_TOO_LARGE: &str = "File too large";
pub const NOT_FOUND: &str = "Not found";

/// JSON `{"error": message}` body with the given status
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

struct UploadedPhoto {
    filename: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadForm {
    photo: Option<UploadedPhoto>,
    hair_color: Option<String>,
}

enum FormError {
    Malformed(String),
    TooLarge,
}

/// Drain the multipart body, keeping the first `photo` file part and the
/// first `hair_color` text field.
async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, FormError> {
    let mut form = UploadForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(FormError::TooLarge),
            Err(e) => return Err(FormError::Malformed(e.body_text())),
        };

        let name = field.name().unwrap_or_default().to_string();
        // Only parts with a filename count as files
        let filename = field.file_name().map(str::to_string);

        match (name.as_str(), filename) {
            ("photo", Some(filename)) if form.photo.is_none() => {
                let bytes = field.bytes().await.map_err(|e| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        FormError::TooLarge
                    } else {
                        FormError::Malformed(e.body_text())
                    }
                })?;
                form.photo = Some(UploadedPhoto { filename, bytes });
            }
            ("hair_color", None) if form.hair_color.is_none() => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| FormError::Malformed(e.body_text()))?;
                form.hair_color = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::warn!("Rejected upload without a multipart body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST);
        }
    };

    let form = match read_upload_form(&mut multipart).await {
        Ok(form) => form,
        Err(FormError::TooLarge) => {
            tracing::warn!("Upload exceeded body limit");
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, FILE_TOO_LARGE);
        }
        Err(FormError::Malformed(reason)) => {
            tracing::warn!("Malformed multipart upload: {}", reason);
            return error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST);
        }
    };

    let Some(photo) = form.photo else {
        return error_response(StatusCode::BAD_REQUEST, NO_FILE_PART);
    };

    if photo.filename.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, NO_SELECTED_FILE);
    }

    let hair_color = match form.hair_color {
        Some(color) if !color.is_empty() => color,
        _ => return error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST),
    };

    if photo.bytes.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST);
    }

    if photo.bytes.len() > state.analysis.max_upload_bytes {
        return error_response(StatusCode::PAYLOAD_TOO_LARGE, FILE_TOO_LARGE);
    }

    tracing::info!(
        filename = %photo.filename,
        hair_color = %hair_color,
        size_bytes = photo.bytes.len(),
        "Received photo for analysis"
    );

    match analyze_with_timeout(photo.bytes.to_vec(), hair_color, state.analysis.clone()).await {
        Ok(outcome) => {
            observability::record_tier_result(tier_for_score(outcome.score).level);
            (StatusCode::OK, Json(ResultRecord::from_score(outcome.score))).into_response()
        }
        Err(e) => {
            error_logging::log_request_error(&e, "POST", "/upload", 500);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, ANALYSIS_FAILED)
        }
    }
}

pub async fn static_image_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    let path = match resolve_static_image(&state.image_dir, &filename) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(filename = %filename, "Rejected static image request: {}", e);
            return error_response(StatusCode::NOT_FOUND, NOT_FOUND);
        }
    };

    match tokio::fs::read(&path).await {
        Ok(contents) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(&filename))],
            contents,
        )
            .into_response(),
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                error_logging::log_filesystem_error(
                    &e,
                    "read_static_image",
                    Some(&path.display().to_string()),
                );
            }
            error_response(StatusCode::NOT_FOUND, NOT_FOUND)
        }
    }
}

pub async fn fallback_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, NOT_FOUND)
}
