//! JwtAuth 미들웨어의 요청 처리부
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::middlewares::auth_gate::{AuthGate, GateOutcome};

/// 실제 인증 로직을 수행하는 서비스
pub struct JwtAuthService<S> {
    pub service: Rc<S>,
    pub gate: AuthGate,
}

impl<S, B> Service<ServiceRequest> for JwtAuthService<S>
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
        let gate = self.gate.clone();

        Box::pin(async move {
            let outcome = gate.authenticate(req.headers(), req.path());

            let renewed_token = match outcome {
                GateOutcome::Reject(err) => {
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response).map_into_right_body();
                    return Ok(res);
                }
                GateOutcome::Pass {
                    claims,
                    renewed_token,
                } => {
                    // 클레임은 이번 요청의 확장에만 저장
                    if let Some(claims) = claims {
                        req.extensions_mut().insert(claims);
                    }
                    renewed_token
                }
            };

            let mut res = service.call(req).await?;

            if let Some(token) = renewed_token {
                attach_renewed_token(&mut res, &gate.config().renewal_header, &token);
            }

            Ok(res.map_into_left_body())
        })
    }
}

/// 갱신 토큰을 응답 헤더에 추가. 헤더를 만들 수 없으면 응답은 그대로 둠
fn attach_renewed_token<B>(res: &mut ServiceResponse<B>, header: &str, token: &str) {
    match (
        HeaderName::from_bytes(header.as_bytes()),
        HeaderValue::from_str(token),
    ) {
        (Ok(name), Ok(value)) => {
            res.headers_mut().insert(name, value);
        }
        _ => log::error!("갱신 토큰 헤더 생성 실패: {}", header),
    }
}
