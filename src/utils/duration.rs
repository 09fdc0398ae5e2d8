//! 기간 문자열 파싱
//!
//! 토큰 TTL과 갱신 임계값을 `1h`, `7d`, `30m`, `45s`, `300` 같은 형식으로 받습니다.
//! 단위가 있는 값은 `humantime`으로 해석하고, 숫자만 있으면 초 단위로 봅니다.

use chrono::Duration;

use crate::errors::AppError;

/// 기간 문자열을 [`Duration`]으로 변환합니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(parse_duration("1h")?, Duration::hours(1));
/// assert_eq!(parse_duration("1h 30m")?, Duration::minutes(90));
/// assert_eq!(parse_duration("300")?, Duration::seconds(300));
/// ```
pub fn parse_duration(value: &str) -> Result<Duration, AppError> {
    let value = value.trim();
    let invalid = |reason: String| AppError::ConfigError(format!("잘못된 기간 형식 '{}': {}", value, reason));

    if let Ok(seconds) = value.parse::<u64>() {
        let seconds = i64::try_from(seconds).map_err(|e| invalid(e.to_string()))?;
        return Duration::try_seconds(seconds).ok_or_else(|| invalid("범위 초과".to_string()));
    }

    let parsed = humantime::parse_duration(value).map_err(|e| invalid(e.to_string()))?;
    Duration::from_std(parsed).map_err(|e| invalid(e.to_string()))
}
