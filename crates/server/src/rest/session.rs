use axum::Json;
use shared_types::{route_for, AppError, SessionResponse};

use crate::auth::extractors::AuthRequired;

/// GET /api/session
///
/// Who the bearer token says the caller is, and where their dashboard lives.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Verified identity", body = SessionResponse),
        (status = 401, description = "No identity", body = AppError),
        (status = 403, description = "Token carries an unknown role", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "session"
)]
pub async fn current_session(auth: AuthRequired) -> Result<Json<SessionResponse>, AppError> {
    let role = auth.role()?;
    let claims = auth.0;
    Ok(Json(SessionResponse {
        subject: claims.sub,
        name: claims.name,
        role,
        organization: claims.organization,
        dashboard: route_for(role).to_string(),
    }))
}
