//! Auth HTTP handlers

use axum::extract::State;
use axum::{Extension, Json};
use validator::Validate;

use crate::auth::{create_token, hash_password, verify_password};
use crate::domain::principal::Principal;
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = ApiResponse<UserInfo>),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    request
        .validate()
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    if state
        .repos
        .users()
        .find_by_username(&request.username)
        .await?
        .is_some()
    {
        return Err(DomainError::Conflict(format!(
            "Username '{}' is already taken",
            request.username
        ))
        .into());
    }

    let password_hash = hash_password(&request.password)
        .map_err(|e| DomainError::Validation(format!("Password hashing failed: {}", e)))?;

    let mut user = User::new(request.username, password_hash);
    user.name = request.name;
    user.email = request.email;

    state.repos.users().save(user.clone()).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let invalid = || DomainError::Unauthorized("Invalid username or password".to_string());

    let user = state
        .repos
        .users()
        .find_by_username(&request.username)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(invalid)?;

    let ok = verify_password(&request.password, &user.password_hash)
        .map_err(|e| DomainError::Validation(format!("Password verification failed: {}", e)))?;
    if !ok {
        return Err(invalid().into());
    }

    let token = create_token(&user, &state.jwt_config)
        .map_err(|e| DomainError::Validation(format!("Token creation failed: {}", e)))?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        user: user.into(),
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = ApiResponse<UserInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = state
        .repos
        .users()
        .find_by_id(&principal.id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", "id", &principal.id))?;

    Ok(Json(ApiResponse::success(user.into())))
}
