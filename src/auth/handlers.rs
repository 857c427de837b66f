use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        password::verify_password_blocking,
    },
    error::{ApiError, JsonBody},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = match state.users.find_by_email(&payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::UserNotFound);
        }
    };

    let ok = verify_password_blocking(payload.password, user.password_hash.clone()).await?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::IncorrectPassword);
    }

    let issued = state.keys.sign(&user)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    let expires_in = issued.expires_at_millis();
    Ok(Json(LoginResponse {
        token: issued.token,
        expires_in,
        user: user.into(),
    }))
}
