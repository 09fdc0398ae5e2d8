//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 시작 시점에 한 번 읽어 불변 값으로 주입합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 비밀번호 해싱, Rate Limiting, CORS
//! - [`auth_config`] - JWT 토큰과 인증 게이트 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, JwtConfig};
//!
//! let env = Environment::current();
//! let jwt = JwtConfig::from_env()?;
//! println!("bind {} (env {:?}, access ttl {}s)", ServerConfig::bind_address(), env, jwt.access_ttl_secs());
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="5000"
//! export ENVIRONMENT="production"  # development, test, staging, production (미설정 시 production)
//!
//! # JWT 설정 (프로덕션 필수)
//! export JWT_SECRET="your-super-secret-key"
//! export REFRESH_TOKEN_SECRET="another-secret-key"
//!
//! # 보안 설정
//! export BCRYPT_COST="12"          # 4-15 범위
//! export CORS_ORIGIN="https://app.example.com"
//! ```

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;
