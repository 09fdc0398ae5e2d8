//! 도메인 모델
//!
//! - [`token`] - JWT 클레임과 토큰 쌍
//! - [`auth`] - 인증된 사용자 추출자와 역할 정책

pub mod auth;
pub mod token;
