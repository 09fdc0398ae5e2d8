//! 역할 기반 인가 정책
//!
//! 허용 역할 집합을 명시적 인자로 받는 순수 함수로 인가를 결정합니다.

use crate::domain::models::token::token::Claims;
use crate::errors::AuthError;

/// 허용 역할 목록
///
/// 비어 있으면 인증된 모든 주체를 허용합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedRoles(Vec<String>);

impl AllowedRoles {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(roles.into_iter().map(Into::into).collect())
    }

    /// 인증만 요구하는 정책
    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn roles(&self) -> &[String] {
        &self.0
    }

    /// 역할이 정책을 만족하는지 확인
    pub fn is_satisfied(&self, role: Option<&str>) -> bool {
        if self.0.is_empty() {
            return true;
        }
        role.is_some_and(|role| self.0.iter().any(|allowed| allowed == role))
    }
}

/// 요청에 붙은 클레임으로 인가 여부를 결정합니다.
///
/// # Errors
///
/// * `AuthError::Unauthenticated` - 인증 게이트가 클레임을 붙이지 않음
/// * `AuthError::Forbidden` - `role`이 없거나 허용 목록에 없음
pub fn authorize(claims: Option<&Claims>, allowed: &AllowedRoles) -> Result<(), AuthError> {
    let claims = claims.ok_or(AuthError::Unauthenticated)?;

    if allowed.is_satisfied(claims.role.as_deref()) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
