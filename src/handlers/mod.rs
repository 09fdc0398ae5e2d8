//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Middlewares - JwtAuth, RequireRole           ← 인증/인가 게이트
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 핸들러 작성 규칙
//!
//! - 서비스는 `web::Data<UserService>`로 주입받습니다.
//! - 인증이 필요한 핸들러는 [`AuthenticatedUser`](crate::domain::AuthenticatedUser) 추출자를 받습니다.
//! - 요청 본문은 `payload.validate()?`로 검증하고, 에러는 `AppError`로 반환합니다.
//!
//! ```rust,ignore
//! #[get("/profile")]
//! pub async fn get_profile(
//!     service: web::Data<UserService>,
//!     user: AuthenticatedUser,
//! ) -> Result<HttpResponse, AppError> {
//!     let user = service.current_user(&user.user_id).await?;
//!     Ok(HttpResponse::Ok().json(json!({ "success": true, "user": user.to_public_json() })))
//! }
//! ```

pub mod auth;
pub mod users;
