//! Authentication HTTP Handlers
//!
//! 회원가입, 로그인, 토큰 리프레시, 로그아웃 엔드포인트입니다.
//!
//! # Endpoints
//!
//! - `POST /api/auth/register` - 회원가입 (인증 제외 경로)
//! - `POST /api/auth/login` - 로그인 (인증 제외 경로)
//! - `POST /api/auth/refresh-token` - 액세스 토큰 재발급 (인증 제외 경로)
//! - `GET /api/auth/me` - 현재 사용자 정보
//! - `POST /api/auth/logout` - 로그아웃
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::domain::{AuthenticatedUser, LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::errors::AppError;
use crate::services::users::UserService;

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/auth/register`
#[post("/register")]
pub async fn register(
    service: web::Data<UserService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let session = service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "User registered successfully",
        "user": session.user.to_public_json(),
        "tokens": session.tokens,
    })))
}

/// 로그인 핸들러
///
/// # Endpoint
/// `POST /api/auth/login`
#[post("/login")]
pub async fn login(
    service: web::Data<UserService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let session = service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
        "user": session.user.to_public_json(),
        "tokens": session.tokens,
    })))
}

/// 리프레시 토큰으로 액세스 토큰 재발급
///
/// 실패 원인(만료, 서명, 소유자 불일치)은 구분하지 않고 401 하나로 응답합니다.
///
/// # Endpoint
/// `POST /api/auth/refresh-token`
#[post("/refresh-token")]
pub async fn refresh_token(
    service: web::Data<UserService>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let grant = service.refresh(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Token refreshed successfully",
        "accessToken": grant.access_token,
        "tokenType": grant.token_type,
        "expiresIn": grant.expires_in,
    })))
}

/// 현재 로그인한 사용자 정보
///
/// # Endpoint
/// `GET /api/auth/me`
#[get("/me")]
pub async fn me(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = service.current_user(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": user.to_public_json(),
    })))
}

/// 로그아웃. 저장된 리프레시 토큰을 폐기
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout")]
pub async fn logout(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    service.logout(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Logged out successfully",
    })))
}
