use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::domain::models::token::token::Claims;
use crate::errors::AuthError;

/// 인증 게이트가 요청 확장에 붙인 클레임에서 추출된 사용자 정보
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 사용자 역할
    pub role: Option<String>,

    /// 검증된 전체 클레임
    pub claims: Claims,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.id.clone(),
            role: claims.role.clone(),
            claims,
        }
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        ready(claims.map(AuthenticatedUser::from).ok_or(AuthError::Unauthenticated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extractor_reads_claims_from_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(Claims::new("u1").with_role("user"));

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.user_id, "u1");
        assert_eq!(user.role.as_deref(), Some("user"));
    }

    #[actix_web::test]
    async fn test_extractor_without_claims_is_unauthenticated() {
        let req = TestRequest::default().to_http_request();

        let err = AuthenticatedUser::extract(&req).await.unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated);
    }
}
