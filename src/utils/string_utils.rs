//! # 문자열 유틸리티
//!
//! 설정값과 요청 입력값 정리에 쓰이는 공통 함수들입니다.

/// 선택적 문자열을 정리합니다
///
/// 공백만 있는 값은 `None`으로 취급합니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  ".into())), None);
/// assert_eq!(clean_optional_string(Some(" kim ".into())), Some("kim".into()));
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 이메일 주소를 비교 가능한 형태로 정규화합니다 (trim + 소문자)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 쉼표로 구분된 목록을 분리합니다. 빈 항목은 버립니다.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
