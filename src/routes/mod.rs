//! API 라우트 설정 모듈
//!
//! 엔드포인트들을 기능별로 그룹화하고 인증/인가 미들웨어를 붙입니다.
//!
//! # Route Layout
//!
//! ```text
//! GET  /health                      공개
//! GET  /api                         공개 (API 안내)
//! /api                              JwtAuth (제외 경로는 통과)
//! ├── /auth
//! │   ├── POST /register            제외 경로
//! │   ├── POST /login               제외 경로
//! │   ├── POST /refresh-token       제외 경로
//! │   ├── GET  /me
//! │   └── POST /logout
//! └── /users
//!     ├── GET|PUT /profile
//!     ├── POST /change-password
//!     ├── GET  /dashboard
//!     └── GET  /admin               RequireRole(admin)
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! let tokens = Arc::new(TokenService::new(config));
//! App::new().configure(|cfg| configure_all_routes(cfg, tokens.clone()));
//! ```

use std::sync::Arc;

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::handlers;
use crate::middlewares::{JwtAuth, RequireRole};
use crate::services::auth::TokenService;

/// 자격 증명 없이 통과시키는 기본 경로
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &[
    "/health",
    "/api/auth/register",
    "/api/auth/login",
    "/api/auth/refresh-token",
];

/// 모든 라우트를 설정합니다
///
/// `/api` 아래 전체가 인증 게이트를 거치며, 공개 엔드포인트는
/// 토큰 설정의 `excluded_paths`로 통과시킵니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    cfg.service(health_check).service(api_index);

    cfg.service(
        web::scope("/api")
            .wrap(JwtAuth::new(tokens))
            .configure(configure_auth_routes)
            .configure(configure_user_routes),
    );
}

/// 인증 관련 라우트
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_token)
            .service(handlers::auth::me)
            .service(handlers::auth::logout),
    );
}

/// 사용자 관련 라우트. 관리자 라우트에는 역할 검사가 추가됨
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(handlers::users::get_profile)
            .service(handlers::users::update_profile)
            .service(handlers::users::change_password)
            .service(handlers::users::dashboard)
            .service(
                web::scope("/admin")
                    .wrap(RequireRole::roles(["admin"]))
                    .service(handlers::users::admin_panel),
            ),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:5000/health
/// ```
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[get("/api")]
async fn api_index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Welcome to JWT Authentication API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth/*",
            "users": "/api/users/*"
        }
    }))
}
