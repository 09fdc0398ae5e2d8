//! JWT 인증 게이트웨이
//!
//! actix-web 기반의 JWT 발급/검증 및 요청 인증 서비스입니다.
//! 액세스/리프레시 토큰 쌍 발급, 요청 단위 토큰 검증, 만료 임박 토큰의 자동 갱신,
//! 역할 기반 인가를 제공합니다.
//!
//! # Features
//!
//! - **토큰 서비스**: 서로 다른 시크릿으로 서명한 액세스/리프레시 토큰
//! - **인증 게이트**: Bearer 토큰 검증, 제외 경로, `X-New-Access-Token` 자동 갱신
//! - **인가 게이트**: 허용 역할 목록 기반 403 처리
//! - **계정 관리**: 회원가입, 로그인, 리프레시, 로그아웃, 프로필
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Middlewares   │ ← JwtAuth → RequireRole
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenService, UserService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserRepository
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use jwt_auth_gateway::config::JwtConfig;
//! use jwt_auth_gateway::domain::Claims;
//! use jwt_auth_gateway::services::auth::TokenService;
//!
//! let tokens = TokenService::new(JwtConfig::from_env()?);
//! let pair = tokens.create_tokens(&Claims::new("u1").with_role("user"), None)?;
//! let claims = tokens.verify_access_token(&pair.access_token)?;
//! ```

pub mod config;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
