//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 JWT 토큰을 검증하고 클레임을 요청 확장에 붙입니다.
//! 만료가 임박한 토큰이면 응답 헤더로 새 액세스 토큰을 내려줍니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_gate::AuthGate;
use crate::middlewares::auth_inner::JwtAuthService;
use crate::services::auth::TokenService;

/// JWT 인증 미들웨어
#[derive(Clone)]
pub struct JwtAuth {
    gate: AuthGate,
}

impl JwtAuth {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self {
            gate: AuthGate::new(tokens),
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthService {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}
