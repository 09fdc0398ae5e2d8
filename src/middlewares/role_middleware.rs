//! 역할 기반 인가 미들웨어
//!
//! `JwtAuth`가 요청 확장에 붙인 클레임의 `role`을 허용 목록과 비교합니다.
//! 반드시 `JwtAuth` 안쪽(나중에 실행되는 쪽)에 등록해야 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::role_policy::{authorize, AllowedRoles};
use crate::domain::models::token::token::Claims;

/// 역할 요구 미들웨어
#[derive(Debug, Clone)]
pub struct RequireRole {
    allowed: Rc<AllowedRoles>,
}

impl RequireRole {
    pub fn new(allowed: AllowedRoles) -> Self {
        Self {
            allowed: Rc::new(allowed),
        }
    }

    /// 지정한 역할 중 하나를 요구
    pub fn roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(AllowedRoles::new(roles))
    }

    /// 인증된 사용자면 역할과 무관하게 통과
    pub fn authenticated() -> Self {
        Self::new(AllowedRoles::any())
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireRoleService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleService {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleService<S> {
    service: Rc<S>,
    allowed: Rc<AllowedRoles>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let decision = authorize(req.extensions().get::<Claims>(), &allowed);

            if let Err(err) = decision {
                log::warn!(
                    "권한 부족 - 경로: {}, 필요 권한: {:?}",
                    req.path(),
                    allowed.roles()
                );
                let response = err.error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
