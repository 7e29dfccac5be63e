use crate::{
    auth::{extract::AuthUser, tokens::TokenIssuer},
    dtos::auth::{
        ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, TokenResponse,
        UserResponse,
    },
    error::{ApiError, ApiJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::user::UserService;
use models::role::Capability;
use sea_orm::prelude::Uuid;

/// Register a new account and hand back a token pair
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = TokenResponse),
        (status = 400, description = "Invalid or duplicate registration data"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    if request.password != request.password2 {
        return Err(ApiError::bad_request(
            "Password and confirm password do not match",
        ));
    }

    let account =
        UserService::register(&state.db, &request.name, &request.email, &request.password).await?;

    let token = state
        .tokens
        .issue(account.id, account.role)
        .map_err(|_| ApiError::bad_request("Token issuance failed"))?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            message: "Registration successful".to_string(),
        }),
    ))
}

/// Exchange credentials for a token pair
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let account = UserService::authenticate(&state.db, &request.email, &request.password).await?;

    let token = state
        .tokens
        .issue(account.id, account.role)
        .map_err(|_| ApiError::bad_request("Token issuance failed"))?;

    Ok(Json(TokenResponse {
        token,
        message: "Login successful".to_string(),
    }))
}

/// The calling user's own profile
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile retrieved", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Authentication"
)]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let account = UserService::get_user(&state.db, user.id).await?;

    Ok(Json(account.into()))
}

/// Change the calling user's password
#[utoipa::path(
    post,
    path = "/changepassword",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Passwords do not match"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Authentication"
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if request.password != request.password2 {
        return Err(ApiError::bad_request(
            "Password and confirm password do not match",
        ));
    }

    UserService::change_password(&state.db, user.id, &request.password).await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// List every account; admin only
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users retrieved", body = [UserResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller lacks the admin capability"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Authentication"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    user.require(Capability::Admin)?;

    let users = UserService::list_users(&state.db).await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Delete an account; admin only
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller lacks the admin capability"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Authentication"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.require(Capability::Admin)?;

    UserService::delete_user(&state.db, user_id).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
