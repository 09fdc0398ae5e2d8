//! 에러 모듈
//!
//! - [`auth_error`] - 인증/인가 실패 분류 (401/403, 안정적인 `code`)
//! - [`errors`] - 계정 관리 계층 에러와 HTTP 응답 변환

pub mod auth_error;
#[allow(clippy::module_inception)]
pub mod errors;

pub use auth_error::{AuthError, AuthErrorBody};
pub use errors::{AppError, AppResult, ErrorContext};
