use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::document::{build, AbstractDocument};
use crate::errors::AppError;
use crate::export::{derive_filename_today, normalize_filename, Delivery, DownloadTarget, Exporter};
use crate::layout::{render, DrawInstructions, ProfileKind, RenderProfile};
use crate::sample::SAMPLE_JSON;
use crate::state::AppState;
use crate::validation::validate;

#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    pub profile: Option<ProfileKind>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub filename: Option<String>,
    pub profile: Option<ProfileKind>,
}

#[derive(Serialize)]
pub struct LayoutResponse {
    pub profile: ProfileKind,
    pub document: AbstractDocument,
    pub instructions: DrawInstructions,
}

#[derive(Serialize)]
pub struct ArchiveResponse {
    pub id: uuid::Uuid,
    pub filename: String,
    pub path: String,
    pub bytes: u64,
}

/// GET /api/v1/resume/sample
pub async fn handle_sample() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], SAMPLE_JSON)
}

/// POST /api/v1/resume/validate
///
/// Always answers with the validation outcome itself: 200 with the normalized
/// document, or 422 with every diagnostic.
pub async fn handle_validate(body: String) -> Response {
    match validate(&body) {
        Ok(doc) => {
            let filename = derive_filename_today(&doc);
            debug!(filename = %filename, "document valid");
            Json(json!({
                "valid": true,
                "document": doc,
                "filename": filename,
            }))
            .into_response()
        }
        Err(failure) => {
            debug!(
                kind = ?failure.kind,
                count = failure.diagnostics.len(),
                "document invalid"
            );
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "valid": false,
                    "diagnostics": failure.diagnostics,
                    "errors": failure.messages(),
                })),
            )
                .into_response()
        }
    }
}

/// POST /api/v1/resume/layout
pub async fn handle_layout(
    State(state): State<AppState>,
    Query(params): Query<RenderQuery>,
    body: String,
) -> Result<Json<LayoutResponse>, AppError> {
    let doc = validate(&body)?;
    let kind = params.profile.unwrap_or(state.config.render_profile);

    let response = tokio::task::spawn_blocking(move || {
        let document = build(&doc);
        let instructions = render(&document, &RenderProfile::for_kind(kind));
        LayoutResponse {
            profile: kind,
            document,
            instructions,
        }
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))?;

    Ok(Json(response))
}

/// POST /api/v1/resume/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(params): Query<RenderQuery>,
    body: String,
) -> Result<Response, AppError> {
    let doc = validate(&body)?;
    let exporter = exporter_for(&state, params.profile);
    let bytes = exporter.render_bytes(&doc).await?;
    let filename = derive_filename_today(&doc);

    debug!(filename = %filename, bytes = bytes.len(), "preview rendered");
    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(exporter.content_type()),
            ),
            (header::CONTENT_DISPOSITION, content_disposition("inline", &filename)?),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/resume/export
pub async fn handle_export(
    State(state): State<AppState>,
    Query(params): Query<ExportQuery>,
    body: String,
) -> Result<Response, AppError> {
    let filename = requested_filename(params.filename.as_deref())?;
    let doc = validate(&body)?;
    let exporter = exporter_for(&state, params.profile);
    let receipt = exporter
        .export_document(&doc, filename.as_deref(), &DownloadTarget)
        .await?;

    let Delivery::Download(bytes) = receipt.delivery else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "download target returned a stored delivery"
        )));
    };
    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(exporter.content_type()),
            ),
            (
                header::CONTENT_DISPOSITION,
                content_disposition("attachment", &receipt.filename)?,
            ),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/resume/archive
pub async fn handle_archive(
    State(state): State<AppState>,
    Query(params): Query<ExportQuery>,
    body: String,
) -> Result<(StatusCode, Json<ArchiveResponse>), AppError> {
    let Some(archive) = state.archive.clone() else {
        return Err(AppError::NotImplemented(
            "Archiving is disabled; set ARCHIVE_DIR to enable it".to_string(),
        ));
    };
    let filename = requested_filename(params.filename.as_deref())?;
    let doc = validate(&body)?;
    let exporter = exporter_for(&state, params.profile);
    let receipt = exporter
        .export_document(&doc, filename.as_deref(), archive.as_ref())
        .await?;

    let path = match &receipt.delivery {
        Delivery::Stored(path) => path.display().to_string(),
        Delivery::Download(_) => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "directory target returned a download delivery"
            )))
        }
    };
    info!(export_id = %receipt.id, path = %path, "document archived");
    Ok((
        StatusCode::CREATED,
        Json(ArchiveResponse {
            id: receipt.id,
            filename: receipt.filename,
            path,
            bytes: receipt.bytes,
        }),
    ))
}

/// An override that reduces to no usable name is rejected rather than ignored.
fn requested_filename(raw: Option<&str>) -> Result<Option<String>, AppError> {
    match raw {
        None => Ok(None),
        Some(raw) => normalize_filename(raw).map(Some).ok_or_else(|| {
            AppError::BadRequest(format!("filename {raw:?} does not name a file"))
        }),
    }
}

fn exporter_for(state: &AppState, profile: Option<ProfileKind>) -> Exporter {
    match profile {
        Some(kind) if kind != state.exporter.profile().kind => {
            state.exporter.with_profile(RenderProfile::for_kind(kind))
        }
        _ => state.exporter.clone(),
    }
}

/// `<disposition>; filename="<ascii>"; filename*=UTF-8''<percent-encoded>`.
fn content_disposition(disposition: &str, filename: &str) -> Result<HeaderValue, AppError> {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded: String = filename
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&b) {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect();

    HeaderValue::from_str(&format!(
        "{disposition}; filename=\"{ascii}\"; filename*=UTF-8''{encoded}"
    ))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid Content-Disposition: {e}")))
}
