//! 요청 DTO 모듈
//!
//! HTTP 요청 본문을 역직렬화하고 `validator`로 입력 규칙을 검증합니다.

pub mod users;

pub use users::*;
