//! JWT 토큰 관리 서비스 구현
//!
//! 액세스/리프레시 토큰 쌍의 발급, 검증, 리프레시, 만료 임박 시 자동 갱신 판단을 담당합니다.
//! 서비스는 불변 설정만 들고 있으므로 여러 요청에서 동시에 호출해도 안전합니다.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::JwtConfig;
use crate::domain::models::token::token::{AccessTokenGrant, Claims, RefreshClaims, TokenPair};
use crate::errors::{AppResult, AuthError, ErrorContext};

/// 토큰 검증 옵션
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyOptions {
    /// 허용 알고리즘
    pub algorithms: Vec<Algorithm>,
    /// 기대하는 `iss`. `None`이면 검사하지 않음
    pub issuer: Option<String>,
    /// 기대하는 `aud`. `None`이면 검사하지 않음
    pub audience: Option<String>,
    /// 만료 허용 오차 (초)
    pub leeway_secs: u64,
}

impl VerifyOptions {
    fn to_validation(&self) -> Validation {
        let default_algorithm = self.algorithms.first().copied().unwrap_or(Algorithm::HS256);
        let mut validation = Validation::new(default_algorithm);
        validation.algorithms = self.algorithms.clone();
        validation.leeway = self.leeway_secs;

        // 필수 클레임은 exp만 둠. 누락된 iss/aud는 만료 검사 뒤 set_issuer/set_audience에서 거부됨
        validation.set_required_spec_claims(&["exp"]);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        validation
    }
}

/// 액세스 토큰 발급 시 설정값을 덮어쓰는 옵션
#[derive(Debug, Clone, Default)]
pub struct SignOverrides {
    pub expires_in: Option<Duration>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

/// JWT 토큰 관리 서비스
///
/// 액세스 토큰과 리프레시 토큰은 서로 다른 시크릿으로 서명됩니다.
///
/// # Examples
///
/// ```rust,ignore
/// let service = TokenService::new(JwtConfig::new("access", "refresh"));
/// let pair = service.create_tokens(&Claims::new("u1").with_role("user"), None)?;
/// let claims = service.verify_access_token(&pair.access_token)?;
/// assert_eq!(claims.id, "u1");
/// ```
#[derive(Debug, Clone)]
pub struct TokenService {
    config: Arc<JwtConfig>,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self::from_shared(Arc::new(config))
    }

    pub fn from_shared(config: Arc<JwtConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// 액세스 토큰 검증 옵션 (알고리즘, issuer, audience 모두 검사)
    pub fn access_verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            algorithms: vec![self.config.algorithm],
            issuer: Some(self.config.issuer.clone()),
            audience: Some(self.config.audience.clone()),
            leeway_secs: self.config.leeway_secs,
        }
    }

    /// 리프레시 토큰 검증 옵션
    pub fn refresh_verify_options(&self) -> VerifyOptions {
        self.access_verify_options()
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// 민감 필드(`password`, `refreshToken` 등)는 서명 전에 제거됩니다.
    /// 리프레시 토큰에는 사용자 ID만 들어갑니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 인코딩 실패
    pub fn create_tokens(
        &self,
        payload: &Claims,
        overrides: Option<&SignOverrides>,
    ) -> AppResult<TokenPair> {
        let now = Utc::now().timestamp();
        let ttl = overrides
            .and_then(|o| o.expires_in)
            .unwrap_or(self.config.access_ttl);

        let access_token = self.sign_access_at(payload, now, ttl, overrides)?;
        let refresh_token = self.sign_refresh_at(&payload.id, now)?;

        log::debug!("토큰 쌍 발급 - 사용자 ID: {}", payload.id);

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: self.config.token_type.clone(),
            expires_in: ttl.num_seconds(),
        })
    }

    /// 토큰 디코딩 및 서명/만료/issuer/audience 검증
    ///
    /// # Errors
    ///
    /// * `AuthError::TokenExpired` - `exp`가 지남
    /// * `AuthError::InvalidSignature` - 서명 불일치, 허용되지 않은 알고리즘
    /// * `AuthError::ClaimsMismatch` - issuer/audience 불일치, 필수 클레임 누락
    /// * `AuthError::TokenMalformed` - 구조적으로 잘못된 토큰
    pub fn verify<T: DeserializeOwned>(
        &self,
        token: &str,
        secret: &str,
        options: &VerifyOptions,
    ) -> Result<T, AuthError> {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        decode::<T>(token, &decoding_key, &options.to_validation())
            .map(|data| data.claims)
            .map_err(|e| classify(e.kind()))
    }

    /// 액세스 시크릿으로 액세스 토큰 검증
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, &self.config.access_secret, &self.access_verify_options())
    }

    /// 리프레시 토큰으로 새 액세스 토큰 발급
    ///
    /// 새 토큰의 클레임은 `user_data`에서 만들고, 리프레시 토큰에서는 사용자 ID만 사용합니다.
    /// 검증 실패 원인은 모두 `InvalidRefreshToken` 하나로 합쳐집니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidRefreshToken` - 검증 실패 또는 사용자 ID 불일치
    pub fn refresh_access_token(
        &self,
        refresh_token: &str,
        user_data: &Claims,
    ) -> AppResult<AccessTokenGrant> {
        let decoded: RefreshClaims = self
            .verify(
                refresh_token,
                &self.config.refresh_secret,
                &self.refresh_verify_options(),
            )
            .map_err(|e| {
                log::debug!("리프레시 토큰 검증 실패: {:?}", e);
                AuthError::InvalidRefreshToken
            })?;

        if decoded.id != user_data.id {
            log::warn!("리프레시 토큰 소유자 불일치 - 사용자 ID: {}", user_data.id);
            return Err(AuthError::InvalidRefreshToken.into());
        }

        let ttl = self.config.access_ttl;
        let access_token = self.sign_access_at(user_data, Utc::now().timestamp(), ttl, None)?;

        Ok(AccessTokenGrant {
            access_token,
            token_type: self.config.token_type.clone(),
            expires_in: ttl.num_seconds(),
        })
    }

    /// 만료 임박 여부 판단 (현재 시각 기준)
    pub fn should_renew(&self, claims: &Claims) -> bool {
        self.should_renew_at(claims, Utc::now().timestamp())
    }

    /// `exp - now < threshold`이면 true. 자동 갱신이 꺼져 있으면 항상 false
    pub fn should_renew_at(&self, claims: &Claims, now: i64) -> bool {
        if !self.config.auto_refresh {
            return false;
        }

        claims
            .seconds_until_expiry(now)
            .is_some_and(|remaining| remaining < self.config.auto_refresh_threshold.num_seconds())
    }

    /// 디코딩된 클레임을 그대로 실은 새 액세스 토큰 발급.
    /// `iat`/`exp`/`iss`/`aud`는 새로 채워집니다.
    pub fn renew_access_token(&self, claims: &Claims) -> AppResult<String> {
        self.sign_access_at(claims, Utc::now().timestamp(), self.config.access_ttl, None)
    }

    /// Authorization 헤더 값에서 토큰 부분 추출
    ///
    /// # Errors
    ///
    /// * `AuthError::MalformedCredentials` - 스킴 불일치 또는 빈 토큰
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AuthError> {
        let mut parts = auth_header.split(' ');
        let scheme = parts.next().unwrap_or_default();
        let token = parts.next().unwrap_or_default();

        if scheme != self.config.token_type || token.is_empty() {
            return Err(AuthError::MalformedCredentials {
                expected_scheme: self.config.token_type.clone(),
            });
        }

        Ok(token)
    }

    fn sign_access_at(
        &self,
        payload: &Claims,
        now: i64,
        ttl: Duration,
        overrides: Option<&SignOverrides>,
    ) -> AppResult<String> {
        let mut claims = payload.sanitized().without_registered();
        claims.iat = Some(now);
        claims.exp = Some(now + ttl.num_seconds());
        claims.iss = Some(
            overrides
                .and_then(|o| o.issuer.clone())
                .unwrap_or_else(|| self.config.issuer.clone()),
        );
        claims.aud = Some(
            overrides
                .and_then(|o| o.audience.clone())
                .unwrap_or_else(|| self.config.audience.clone()),
        );

        self.encode(&claims, &self.config.access_secret)
            .context("액세스 토큰 생성 실패")
    }

    fn sign_refresh_at(&self, user_id: &str, now: i64) -> AppResult<String> {
        let claims = RefreshClaims {
            id: user_id.to_string(),
            iat: now,
            exp: now + self.config.refresh_ttl.num_seconds(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        self.encode(&claims, &self.config.refresh_secret)
            .context("리프레시 토큰 생성 실패")
    }

    fn encode<T: Serialize>(
        &self,
        claims: &T,
        secret: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))
    }
}

/// jsonwebtoken 에러 종류를 인증 실패 분류로 변환
fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
            AuthError::InvalidSignature
        }
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::ClaimsMismatch,
        _ => AuthError::TokenMalformed,
    }
}
