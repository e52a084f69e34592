use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::record::{ResumeRecord, RoleType};
use crate::screening::analyzer::{analyze, ranked_results, rescore, UploadedResume};
use crate::screening::ranking::RankedResults;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RescoreRequest {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub experience_bucket: String,
}

/// POST /api/v1/analyze
///
/// Multipart fields: `job_desc`, optional `role_type` (defaults to internship),
/// and one or more `resumes` file parts. File parts without a filename are skipped.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RankedResults>, AppError> {
    let mut job_description = String::new();
    let mut role_type: Option<String> = None;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_desc" => job_description = field.text().await?,
            "role_type" => role_type = Some(field.text().await?),
            "resumes" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if filename.trim().is_empty() {
                    debug!("Skipping resume part without a filename");
                    continue;
                }
                files.push(UploadedResume { filename, data });
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    let role = match role_type.as_deref().map(str::trim) {
        None | Some("") => RoleType::default(),
        Some(raw) => raw.parse::<RoleType>().map_err(AppError::Validation)?,
    };

    let ranked = analyze(&state, &job_description, role, files).await?;
    Ok(Json(ranked))
}

/// GET /api/v1/results
pub async fn handle_list_results(State(state): State<AppState>) -> Json<RankedResults> {
    Json(ranked_results(&state.store).await)
}

/// GET /api/v1/results/:filename
pub async fn handle_get_result(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<ResumeRecord>, AppError> {
    state
        .store
        .get(&filename)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Result for '{filename}' not found")))
}

/// POST /api/v1/rescore
pub async fn handle_rescore(
    State(state): State<AppState>,
    Json(req): Json<RescoreRequest>,
) -> Result<Json<RankedResults>, AppError> {
    let ranked = rescore(&state, &req.filename, &req.experience_bucket).await?;
    Ok(Json(ranked))
}
