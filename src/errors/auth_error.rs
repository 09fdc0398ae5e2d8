//! 인증/인가 실패 분류 체계
//!
//! 인증 게이트와 토큰 서비스가 만들어내는 모든 실패를 하나의 열거형으로 표현합니다.
//! 각 실패는 안정적인 기계 판독용 코드(`code`)와 사람이 읽는 메시지,
//! 그리고 HTTP 상태 코드(401/403)로 변환됩니다.
//!
//! | AuthError | HTTP Status | code |
//! |-----------|-------------|------|
//! | `TokenExpired` | 401 | `TOKEN_EXPIRED` |
//! | `InvalidSignature` / `TokenMalformed` / `ClaimsMismatch` | 401 | `INVALID_TOKEN` |
//! | `MissingCredentials` / `MalformedCredentials` / `InvalidRefreshToken` / `Unauthenticated` | 401 | `AUTH_FAILED` |
//! | `Forbidden` | 403 | `FORBIDDEN` |

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// 인증 실패 종류
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization 헤더 없음
    #[error("Authorization header is missing")]
    MissingCredentials,

    /// `<scheme> <token>` 형식이 아니거나 스킴이 다름
    #[error("Invalid token format. Expected {expected_scheme} <token>")]
    MalformedCredentials { expected_scheme: String },

    /// `exp`가 이미 지남
    #[error("Token has expired")]
    TokenExpired,

    /// 서명 불일치 또는 허용되지 않은 알고리즘
    #[error("Invalid token signature")]
    InvalidSignature,

    /// 구조적으로 잘못된 토큰 (세그먼트, base64, JSON)
    #[error("Malformed token")]
    TokenMalformed,

    /// issuer/audience 불일치 또는 필수 클레임 누락
    #[error("Token claims mismatch")]
    ClaimsMismatch,

    /// 리프레시 토큰 검증 실패. 세부 원인은 의도적으로 숨김
    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    /// 인증 게이트가 클레임을 붙이지 않은 요청
    #[error("User not authenticated")]
    Unauthenticated,

    /// 역할이 허용 목록에 없음
    #[error("Access forbidden: insufficient permissions")]
    Forbidden,
}

/// 거부 응답 본문 `{success: false, message, code}`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthErrorBody {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
}

impl AuthError {
    /// 클라이언트에 노출되는 안정적인 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidSignature
            | AuthError::TokenMalformed
            | AuthError::ClaimsMismatch => "INVALID_TOKEN",
            AuthError::MissingCredentials
            | AuthError::MalformedCredentials { .. }
            | AuthError::InvalidRefreshToken
            | AuthError::Unauthenticated => "AUTH_FAILED",
            AuthError::Forbidden => "FORBIDDEN",
        }
    }

    /// 응답 메시지.
    ///
    /// 토큰 검증 계열은 세부 원인을 감추고 `Invalid token` 하나로 통일합니다.
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidSignature
            | AuthError::TokenMalformed
            | AuthError::ClaimsMismatch => "Invalid token".to_string(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn body(&self) -> AuthErrorBody {
        AuthErrorBody {
            success: false,
            message: self.message(),
            code: self.code(),
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_kinds_share_invalid_token_code() {
        for err in [
            AuthError::InvalidSignature,
            AuthError::TokenMalformed,
            AuthError::ClaimsMismatch,
        ] {
            assert_eq!(err.code(), "INVALID_TOKEN");
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(err.message(), "Invalid token");
        }
    }

    #[test]
    fn test_expired_token_code() {
        let err = AuthError::TokenExpired;
        assert_eq!(err.code(), "TOKEN_EXPIRED");
        assert_eq!(err.message(), "Token has expired");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let err = AuthError::Forbidden;
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn test_credential_failures_are_auth_failed() {
        let malformed = AuthError::MalformedCredentials {
            expected_scheme: "Bearer".to_string(),
        };
        assert_eq!(malformed.code(), "AUTH_FAILED");
        assert_eq!(
            malformed.message(),
            "Invalid token format. Expected Bearer <token>"
        );
        assert_eq!(AuthError::MissingCredentials.code(), "AUTH_FAILED");
        assert_eq!(AuthError::InvalidRefreshToken.code(), "AUTH_FAILED");
        assert_eq!(AuthError::Unauthenticated.code(), "AUTH_FAILED");
    }

    #[test]
    fn test_error_response_body() {
        let response = AuthError::Forbidden.error_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = AuthError::TokenExpired.body();
        assert!(!body.success);
        assert_eq!(body.code, "TOKEN_EXPIRED");
    }
}
