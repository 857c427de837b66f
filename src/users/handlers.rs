use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{extractors::AuthUser, password::hash_password_blocking},
    error::{ApiError, JsonBody},
    state::AppState,
    users::{
        dto::{PublicUser, RegisterRequest},
        repo::StoreError,
        repo_types::NewUser,
    },
};

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register))
        .route("/users/me", get(get_me))
        .route("/users/:id", get(get_user))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let password_hash = hash_password_blocking(payload.password).await?;

    let new_user = NewUser {
        name: payload.name,
        email: payload.email,
        password_hash,
    };
    let user = match state.users.create(new_user).await {
        Ok(u) => u,
        Err(StoreError::EmailTaken) => {
            warn!("email already registered");
            return Err(ApiError::UserExists);
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PublicUser>, ApiError> {
    // An id that is not a UUID cannot name any user.
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::UserNotFound)?;
    find_public(&state, id).await.map(Json)
}

#[instrument(skip_all)]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    debug!(user_id = %claims.id, "profile for caller");
    find_public(&state, claims.id).await.map(Json)
}

async fn find_public(state: &AppState, id: Uuid) -> Result<PublicUser, ApiError> {
    state
        .users
        .find_by_id(id)
        .await?
        .map(PublicUser::from)
        .ok_or(ApiError::UserNotFound)
}
