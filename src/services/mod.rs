//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 전역 싱글톤 없이 `main`에서 한 번 생성되어 `web::Data`로 주입됩니다.
//!
//! # Features
//!
//! - JWT 토큰 발급, 검증, 리프레시, 자동 갱신 판단
//! - 사용자 계정 생명주기 관리
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::TokenService, users::UserService};
//!
//! let token_service = Arc::new(TokenService::new(JwtConfig::from_env()?));
//! let user_service = UserService::new(repo, token_service.clone(), PasswordConfig::bcrypt_cost());
//! ```

pub mod users;
pub mod auth;
