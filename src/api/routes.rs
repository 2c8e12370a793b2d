use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, warn};

use super::AppState;
use super::error::ApiError;
use crate::store::SessionRecord;

#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    /// Overrides the default message window size
    pub limit: Option<usize>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/projects/{project_id}/sessions`
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<SessionRecord>>, ApiError> {
    let limit = query.limit.unwrap_or(state.service.default_limit());
    if limit == 0 || limit > state.max_limit {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {}",
            state.max_limit
        )));
    }

    let project = state
        .store
        .project(&project_id)
        .inspect_err(|e| error!(project = %project_id, error = %e, "Session store lookup failed"))?
        .ok_or_else(|| ApiError::ProjectNotFound(project_id.clone()))?;
    let sessions = state
        .store
        .sessions(&project_id)
        .inspect_err(|e| error!(project = %project_id, error = %e, "Session store lookup failed"))?;

    let mut views = Vec::with_capacity(sessions.len());
    for mut session in sessions {
        let identity = session.identity(project.transcript_key())?;
        let legacy = session.messages.take();
        let messages = state.service.get_messages(&identity, legacy, limit).await.inspect_err(|e| {
            warn!(project = %project_id, session = %session.id, error = %e, "Rejected session messages request")
        })?;
        session.messages = Some(messages);
        views.push(session);
    }

    Ok(Json(views))
}
