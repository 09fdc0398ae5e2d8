//! # Authentication Configuration Module
//!
//! JWT 발급/검증과 인증 게이트 동작을 결정하는 설정입니다.
//! 설정은 시작 시 한 번 만들어지고 이후에는 읽기 전용으로 공유됩니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export REFRESH_TOKEN_SECRET="another-secret"
//! export JWT_EXPIRES_IN="1h"
//! export REFRESH_TOKEN_EXPIRES_IN="7d"
//! export JWT_ISSUER="jwt-auth-system"
//! export JWT_AUDIENCE="jwt-auth-client"
//! export JWT_AUTO_REFRESH="true"
//! export JWT_AUTO_REFRESH_THRESHOLD="300"
//! export JWT_EXCLUDED_PATHS="/health,/api/auth/login,/api/public/*"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::JwtConfig;
//!
//! let config = JwtConfig::new("access-secret", "refresh-secret")
//!     .with_auto_refresh(true, chrono::Duration::minutes(10))
//!     .with_excluded_paths(["/health"]);
//! ```

use std::env;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::config::Environment;
use crate::errors::AppError;
use crate::utils::parse_duration;
use crate::utils::string_utils::split_csv;

const DEV_ACCESS_SECRET: &str = "your-secret-key";
const DEV_REFRESH_SECRET: &str = "refresh-secret-key";

/// 인증 없이 통과시키는 경로 규칙
///
/// 리터럴은 정확히 일치하거나 접두사로 일치하면 매칭됩니다.
/// `*`가 들어간 패턴은 `*`가 임의 길이의 문자열과 대응하는 전체 일치입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludedPath {
    Literal(String),
    Pattern(String),
}

impl ExcludedPath {
    pub fn parse(value: &str) -> Self {
        if value.contains('*') {
            ExcludedPath::Pattern(value.to_string())
        } else {
            ExcludedPath::Literal(value.to_string())
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            ExcludedPath::Literal(literal) => path == literal || path.starts_with(literal.as_str()),
            ExcludedPath::Pattern(pattern) => wildcard_match(pattern, path),
        }
    }
}

impl From<&str> for ExcludedPath {
    fn from(value: &str) -> Self {
        ExcludedPath::parse(value)
    }
}

fn wildcard_match(pattern: &str, path: &str) -> bool {
    let mut parts = pattern.split('*');
    let head = parts.next().unwrap_or_default();
    let Some(mut rest) = path.strip_prefix(head) else {
        return false;
    };

    let tail: Vec<&str> = parts.collect();
    let Some((last, middle)) = tail.split_last() else {
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(index) => rest = &rest[index + part.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

/// JWT 토큰 및 인증 게이트 설정
///
/// 액세스 토큰과 리프레시 토큰은 서로 다른 시크릿으로 서명되므로
/// 한 종류의 토큰이 다른 종류의 검증을 통과할 수 없습니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 액세스 토큰 서명 시크릿
    pub access_secret: String,
    /// 리프레시 토큰 서명 시크릿
    pub refresh_secret: String,
    /// 액세스 토큰 수명
    pub access_ttl: Duration,
    /// 리프레시 토큰 수명
    pub refresh_ttl: Duration,
    /// 서명 알고리즘 (HMAC 계열만 허용)
    pub algorithm: Algorithm,
    pub issuer: String,
    pub audience: String,
    /// 만료 임박 시 자동 갱신 여부
    pub auto_refresh: bool,
    /// 만료까지 남은 시간이 이 값보다 작으면 갱신
    pub auto_refresh_threshold: Duration,
    /// 인증 게이트를 건너뛰는 경로 (선언 순서대로 검사)
    pub excluded_paths: Vec<ExcludedPath>,
    /// Authorization 헤더의 스킴
    pub token_type: String,
    pub authorization_header: String,
    /// 갱신된 액세스 토큰을 실어 보내는 응답 헤더
    pub renewal_header: String,
    /// 만료 검증 허용 오차 (초)
    pub leeway_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: DEV_ACCESS_SECRET.to_string(),
            refresh_secret: DEV_REFRESH_SECRET.to_string(),
            access_ttl: Duration::hours(1),
            refresh_ttl: Duration::days(7),
            algorithm: Algorithm::HS256,
            issuer: "jwt-auth-system".to_string(),
            audience: "jwt-auth-client".to_string(),
            auto_refresh: true,
            auto_refresh_threshold: Duration::seconds(300),
            excluded_paths: Vec::new(),
            token_type: "Bearer".to_string(),
            authorization_header: "Authorization".to_string(),
            renewal_header: "X-New-Access-Token".to_string(),
            leeway_secs: 0,
        }
    }
}

impl JwtConfig {
    /// 두 시크릿으로 기본 설정을 생성합니다.
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// 환경 변수에서 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 프로덕션에서 시크릿 누락, 잘못된 기간/알고리즘 값
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&Environment::current(), |key| env::var(key).ok())
    }

    /// 키 조회 함수로 설정을 읽습니다. 값이 없으면 `None`을 반환해야 합니다.
    pub fn from_lookup<F>(environment: &Environment, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let secret = |key: &str, fallback: &str| match lookup(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ if *environment == Environment::Production => {
                Err(AppError::ConfigError(format!("{} must be set in production", key)))
            }
            _ => {
                log::warn!("{} 미설정, 개발용 기본 시크릿 사용", key);
                Ok(fallback.to_string())
            }
        };
        let duration = |key: &str, default: Duration| match lookup(key) {
            Some(value) => parse_duration(&value),
            None => Ok(default),
        };

        let access_secret = secret("JWT_SECRET", DEV_ACCESS_SECRET)?;
        let refresh_secret = secret("REFRESH_TOKEN_SECRET", DEV_REFRESH_SECRET)?;

        let access_ttl = duration("JWT_EXPIRES_IN", defaults.access_ttl)?;
        let refresh_ttl = duration("REFRESH_TOKEN_EXPIRES_IN", defaults.refresh_ttl)?;
        let auto_refresh_threshold =
            duration("JWT_AUTO_REFRESH_THRESHOLD", defaults.auto_refresh_threshold)?;

        let algorithm = match lookup("JWT_ALGORITHM") {
            Some(value) => parse_algorithm(&value)?,
            None => defaults.algorithm,
        };

        let auto_refresh = match lookup("JWT_AUTO_REFRESH") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| AppError::ConfigError(format!("JWT_AUTO_REFRESH 값이 잘못되었습니다: {}", value)))?,
            None => defaults.auto_refresh,
        };

        let excluded_paths = lookup("JWT_EXCLUDED_PATHS")
            .map(|value| split_csv(&value).iter().map(|p| ExcludedPath::parse(p)).collect())
            .unwrap_or_default();

        let config = Self {
            access_secret,
            refresh_secret,
            access_ttl,
            refresh_ttl,
            algorithm,
            issuer: lookup("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: lookup("JWT_AUDIENCE").unwrap_or(defaults.audience),
            auto_refresh,
            auto_refresh_threshold,
            excluded_paths,
            token_type: lookup("JWT_TOKEN_TYPE").unwrap_or(defaults.token_type),
            authorization_header: lookup("JWT_AUTH_HEADER").unwrap_or(defaults.authorization_header),
            renewal_header: defaults.renewal_header,
            leeway_secs: defaults.leeway_secs,
        };

        config.validate()?;
        Ok(config)
    }

    /// 설정값의 일관성을 검사합니다.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err(AppError::ConfigError("JWT 시크릿이 비어 있습니다".to_string()));
        }
        if self.access_secret == self.refresh_secret {
            log::warn!("액세스/리프레시 토큰 시크릿이 동일합니다. 토큰 종류 간 격리가 깨집니다");
        }
        if !matches!(self.algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AppError::ConfigError(format!(
                "HMAC 알고리즘만 지원합니다: {:?}",
                self.algorithm
            )));
        }
        if self.access_ttl <= Duration::zero() || self.refresh_ttl <= Duration::zero() {
            return Err(AppError::ConfigError("토큰 수명은 0보다 커야 합니다".to_string()));
        }
        Ok(())
    }

    pub fn with_auto_refresh(mut self, enabled: bool, threshold: Duration) -> Self {
        self.auto_refresh = enabled;
        self.auto_refresh_threshold = threshold;
        self
    }

    pub fn with_excluded_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ExcludedPath>,
    {
        self.excluded_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// 경로가 인증 제외 목록에 있는지 확인합니다.
    pub fn is_path_excluded(&self, path: &str) -> bool {
        self.excluded_paths.iter().any(|rule| rule.matches(path))
    }

    /// 액세스 토큰 수명 (초)
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }
}

fn parse_algorithm(value: &str) -> Result<Algorithm, AppError> {
    Algorithm::from_str(value.trim())
        .map_err(|_| AppError::ConfigError(format!("알 수 없는 JWT 알고리즘: {}", value)))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
