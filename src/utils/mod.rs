//! 공통 유틸리티 모듈
//!
//! - [`duration`] - `1h`, `7d` 형식의 기간 문자열 파싱
//! - [`string_utils`] - 입력/설정 문자열 정리

pub mod duration;
pub mod string_utils;

pub use duration::parse_duration;
