//! Log page and live tail handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use logdeck_core::{AppLogPaths, LogPage, LogService, LogStreamKind};
use tracing::info;

use crate::dto::{FilePageQuery, FileStreamQuery, LogFormat, PageQuery};
use crate::error::HttpError;
use crate::sse::tail_response;
use crate::state::AppState;

/// Resolve `{name}/{stream}` to a log path via the catalog.
async fn resolve_app_log(
    state: &AppState,
    name: &str,
    stream: &str,
) -> Result<String, HttpError> {
    let kind: LogStreamKind = stream.parse()?;
    if name.trim().is_empty() {
        return Err(HttpError::BadRequest("App name is required".to_string()));
    }
    let app: AppLogPaths = state
        .catalog
        .describe(name)
        .await
        .ok_or_else(|| HttpError::NotFound(format!("App '{name}' not found")))?;
    Ok(app.path_for(kind).to_string_lossy().into_owned())
}

fn file_service(state: &AppState) -> Result<&LogService, HttpError> {
    state
        .file_logs
        .as_ref()
        .ok_or_else(|| HttpError::NotFound("Arbitrary-path log access is disabled".to_string()))
}

async fn read_page(service: &LogService, path: &str, query: &PageQuery) -> LogPage {
    let (cursor, lines) = (query.cursor(), query.lines_per_page());
    match query.format {
        LogFormat::Markup => service.read_markup_page(path, cursor, lines).await,
        LogFormat::Raw => service.read_page(path, cursor, lines).await,
    }
}

/// `GET /api/apps/{name}/logs/{stream}` - one backward page.
pub async fn app_page(
    State(state): State<AppState>,
    Path((name, stream)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
) -> Result<Json<LogPage>, HttpError> {
    let path = resolve_app_log(&state, &name, &stream).await?;
    Ok(Json(read_page(&state.app_logs, &path, &query).await))
}

/// `GET /api/apps/{name}/logs/{stream}/stream` - live tail over SSE.
pub async fn app_stream(
    State(state): State<AppState>,
    Path((name, stream)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpError> {
    let path = resolve_app_log(&state, &name, &stream).await?;
    let session = state.app_logs.open_tail(&path).await?;
    info!(session = %session.id(), app = %name, stream = %stream, "Streaming app log");
    Ok(tail_response(session))
}

/// `GET /api/logs/page?path=` - one backward page of a file under the log root.
pub async fn file_page(
    State(state): State<AppState>,
    Query(query): Query<FilePageQuery>,
) -> Result<Json<LogPage>, HttpError> {
    let service = file_service(&state)?;
    // The page API never fails, so check the path up front to report a
    // rejected path as an error instead of an empty page.
    service.guard().resolve_file(&query.path).await?;
    Ok(Json(read_page(service, &query.path, &query.page).await))
}

/// `GET /api/logs/stream?path=` - live tail of a file under the log root.
pub async fn file_stream(
    State(state): State<AppState>,
    Query(query): Query<FileStreamQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let service = file_service(&state)?;
    let session = service.open_tail(&query.path).await?;
    info!(session = %session.id(), path = %query.path, "Streaming log file");
    Ok(tail_response(session))
}
