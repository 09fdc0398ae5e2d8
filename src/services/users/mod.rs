//! 사용자 계정 서비스 모듈
//!
//! 사용자 등록, 로그인, 토큰 리프레시, 프로필 관리 등의 핵심 기능을 구현합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱
//! - 이메일/사용자명 중복 방지
//! - 로그아웃 시 저장된 리프레시 토큰 폐기

pub mod user_service;

pub use user_service::*;
