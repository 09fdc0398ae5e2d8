//! 요청 단위 인증 판정
//!
//! 헤더와 경로만 보고 통과/거부를 결정합니다. actix 파이프라인과 분리되어 있어
//! 미들웨어 외의 곳(예: WebSocket 업그레이드)에서도 그대로 호출할 수 있습니다.

use std::sync::Arc;

use actix_web::http::header::HeaderMap;

use crate::config::JwtConfig;
use crate::domain::models::token::token::Claims;
use crate::errors::AuthError;
use crate::services::auth::TokenService;

/// 인증 판정 결과
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// 통과. 제외 경로면 `claims`가 비어 있음
    Pass {
        claims: Option<Claims>,
        renewed_token: Option<String>,
    },
    /// 거부. 상태 코드와 응답 본문은 `AuthError`가 결정
    Reject(AuthError),
}

impl GateOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, GateOutcome::Pass { .. })
    }
}

/// 인증 게이트
///
/// 처리 순서: 제외 경로 확인 → 헤더 추출 → 스킴 확인 → 토큰 검증 → 만료 임박 시 갱신 토큰 발급
#[derive(Debug, Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn config(&self) -> &JwtConfig {
        self.tokens.config()
    }

    pub fn authenticate(&self, headers: &HeaderMap, path: &str) -> GateOutcome {
        let config = self.tokens.config();

        if config.is_path_excluded(path) {
            log::debug!("인증 제외 경로: {}", path);
            return GateOutcome::Pass {
                claims: None,
                renewed_token: None,
            };
        }

        let claims = match self.verify_headers(headers) {
            Ok(claims) => claims,
            Err(err) => {
                log::warn!("인증 거부 - 경로: {}, 사유: {:?}", path, err);
                return GateOutcome::Reject(err);
            }
        };

        let renewed_token = self.renew_if_needed(&claims);
        log::debug!("인증 성공 - 사용자 ID: {}", claims.id);

        GateOutcome::Pass {
            claims: Some(claims),
            renewed_token,
        }
    }

    fn verify_headers(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let config = self.tokens.config();

        let raw = headers
            .get(config.authorization_header.as_str())
            .ok_or(AuthError::MissingCredentials)?;

        let value = raw.to_str().map_err(|_| AuthError::MalformedCredentials {
            expected_scheme: config.token_type.clone(),
        })?;

        let token = self.tokens.extract_bearer_token(value)?;
        self.tokens.verify_access_token(token)
    }

    /// 갱신 토큰 발급 실패는 본 요청에 영향을 주지 않음
    fn renew_if_needed(&self, claims: &Claims) -> Option<String> {
        if !self.tokens.should_renew(claims) {
            return None;
        }

        match self.tokens.renew_access_token(claims) {
            Ok(token) => {
                log::debug!("액세스 토큰 자동 갱신 - 사용자 ID: {}", claims.id);
                Some(token)
            }
            Err(e) => {
                log::error!("액세스 토큰 자동 갱신 실패: {}", e);
                None
            }
        }
    }
}
