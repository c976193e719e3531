//! Registro, login y logout

use crate::middleware::auth::CurrentUser;
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::models::ApiResponse;
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{extract::State, routing::post, Json, Router};

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let service = AuthService::new(state.pool.clone());
    let user = service.register(&request).await?;
    Ok(Json(ApiResponse::success_with_message(
        user.into(),
        "Account created, you can now log in".to_string(),
    )))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let service = AuthService::new(state.pool.clone());
    let user = service.login(&request).await?;
    let token = state.create_session(&user).await;
    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        user: user.into(),
    })))
}

async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.remove_session(&user.token).await;
    Ok(Json(ApiResponse::success_with_message(
        (),
        "Logged out".to_string(),
    )))
}
