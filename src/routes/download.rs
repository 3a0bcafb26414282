use std::io::ErrorKind;

use axum::{extract::State, http::header, response::IntoResponse};
use tracing::{info, instrument};

use crate::{auth::extractors::RequireUser, error::AppError, state::AppState};

/// Relative to the configured static dir; never derived from the request.
const DOWNLOAD_PATH: &str = "files/cheat_sheet.pdf";
const DOWNLOAD_DISPOSITION: &str = r#"attachment; filename="cheat_sheet.pdf""#;

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn download(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, AppError> {
    let path = state.config.static_dir.join(DOWNLOAD_PATH);
    let body = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::FileNotFound(path.display().to_string()),
        _ => AppError::Io(e),
    })?;

    info!(bytes = body.len(), "download served");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, DOWNLOAD_DISPOSITION),
        ],
        body,
    ))
}
