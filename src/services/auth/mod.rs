//! 인증 및 보안 서비스 모듈
//!
//! JWT 기반 토큰 인증을 담당하는 서비스를 제공합니다.
//!
//! # Features
//!
//! - JWT 액세스/리프레시 토큰 쌍 발급
//! - 토큰 검증 및 실패 원인 분류
//! - 리프레시 토큰으로 액세스 토큰 재발급
//! - 만료 임박 토큰 자동 갱신 판단
//!
//! # Security
//!
//! - HMAC 토큰 서명 (액세스/리프레시 시크릿 분리)
//! - 서명 전 민감 필드 제거
//! - 리프레시 실패 원인 비공개
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::new(JwtConfig::from_env()?);
//! let tokens = token_service.create_tokens(&user.to_claims(), None)?;
//! ```

pub mod token_service;

pub use token_service::*;
