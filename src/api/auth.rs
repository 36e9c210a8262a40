//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::user::{CreateUser, LoginRequest, LoginResponse, User},
};

use super::ValidatedJson;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input or email already in use"),
        (status = 500, description = "Password hashing failed")
    )
)]
pub async fn signup(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.auth.signup(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticate and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Unknown email or incorrect password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.services.auth.login(request).await?;
    Ok(Json(response))
}
