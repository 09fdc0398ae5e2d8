//! 사용자 프로필 HTTP 핸들러
//!
//! `/api/users` 아래 엔드포인트는 모두 인증 게이트를 통과한 요청만 받습니다.
use actix_web::{get, post, put, web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::domain::{AuthenticatedUser, ChangePasswordRequest, UpdateProfileRequest};
use crate::errors::AppError;
use crate::services::users::UserService;

/// 프로필 조회
///
/// # Endpoint
/// `GET /api/users/profile`
#[get("/profile")]
pub async fn get_profile(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = service.current_user(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": user.to_public_json(),
    })))
}

/// 프로필 수정
///
/// # Endpoint
/// `PUT /api/users/profile`
#[put("/profile")]
pub async fn update_profile(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = service.update_profile(&user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Profile updated successfully",
        "user": updated.to_public_json(),
    })))
}

/// 비밀번호 변경
///
/// # Endpoint
/// `POST /api/users/change-password`
#[post("/change-password")]
pub async fn change_password(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    service.change_password(&user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Password changed successfully",
    })))
}

/// # Endpoint
/// `GET /api/users/dashboard`
#[get("/dashboard")]
pub async fn dashboard(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let data = service.dashboard(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": data,
    })))
}

/// 관리자 전용. 역할 검사는 `RequireRole` 미들웨어가 담당
///
/// # Endpoint
/// `GET /api/users/admin`
#[get("")]
pub async fn admin_panel(user: AuthenticatedUser) -> HttpResponse {
    log::info!("관리자 페이지 접근 - 사용자 ID: {}", user.user_id);

    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Admin access granted",
        "adminData": {
            "secretInfo": "This is admin only information",
            "timestamp": Utc::now().to_rfc3339(),
        }
    }))
}
