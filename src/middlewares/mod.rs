//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 인증/인가 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 인증 미들웨어 (JwtAuth)
//! - 제외 경로는 자격 증명 확인 없이 통과
//! - Bearer 토큰 추출 및 검증
//! - 검증된 클레임을 request extension에 저장
//! - 만료 임박 시 `X-New-Access-Token` 응답 헤더로 새 토큰 전달
//!
//! ### 2. 인가 미들웨어 (RequireRole)
//! - 클레임의 `role`이 허용 목록에 없으면 403
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::{JwtAuth, RequireRole};
//!
//! App::new()
//!     .service(
//!         web::scope("/api")
//!             .wrap(JwtAuth::new(token_service.clone()))
//!             .service(
//!                 web::scope("/admin")
//!                     .wrap(RequireRole::roles(["admin"]))
//!                     .route("", web::get().to(admin_only))
//!             )
//!     )
//! ```

pub mod auth_gate;
pub mod auth_middleware;
mod auth_inner;
pub mod role_middleware;

// 미들웨어 재export
pub use auth_gate::{AuthGate, GateOutcome};
pub use auth_middleware::JwtAuth;
pub use role_middleware::RequireRole;
